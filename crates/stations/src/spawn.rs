//! Where each player last launched from, per dimension.

use std::collections::{BTreeMap, HashMap};

use engine_core::{DimensionId, GlobalPos, PlayerId};
use serde::{Deserialize, Serialize};

/// Launch origins, at most one per (player, dimension). A new launch overwrites the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnLocationTracker {
    locations: HashMap<PlayerId, BTreeMap<DimensionId, GlobalPos>>,
}

impl SpawnLocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember that `player` left from `origin`, keyed by the origin's dimension.
    pub fn record(&mut self, player: PlayerId, origin: GlobalPos) {
        self.locations
            .entry(player)
            .or_default()
            .insert(origin.dimension.clone(), origin);
    }

    pub fn get(&self, player: PlayerId, dimension: &DimensionId) -> Option<&GlobalPos> {
        self.locations.get(&player)?.get(dimension)
    }

    /// Every recorded origin of `player`, ordered by dimension.
    pub fn locations_for(&self, player: PlayerId) -> Vec<GlobalPos> {
        self.locations
            .get(&player)
            .map(|by_dim| by_dim.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn player_count(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{BlockPos, Uuid};

    #[test]
    fn record_overwrites_same_dimension() {
        let mut tracker = SpawnLocationTracker::new();
        let player = Uuid::new_v4();
        let earth = DimensionId::new("earth");
        tracker.record(player, GlobalPos::new(earth.clone(), BlockPos::new(1, 64, 1)));
        tracker.record(player, GlobalPos::new(earth.clone(), BlockPos::new(9, 70, -3)));

        assert_eq!(tracker.get(player, &earth).unwrap().pos, BlockPos::new(9, 70, -3));
        assert_eq!(tracker.locations_for(player).len(), 1);
    }

    #[test]
    fn dimensions_and_players_are_independent() {
        let mut tracker = SpawnLocationTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        tracker.record(a, GlobalPos::new(DimensionId::new("earth"), BlockPos::new(0, 64, 0)));
        tracker.record(a, GlobalPos::new(DimensionId::new("moon"), BlockPos::new(5, 80, 5)));

        assert_eq!(tracker.locations_for(a).len(), 2);
        assert!(tracker.get(b, &DimensionId::new("earth")).is_none());
        assert!(tracker.locations_for(b).is_empty());
    }
}
