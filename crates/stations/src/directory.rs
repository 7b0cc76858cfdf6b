//! Directory of built space stations, per dimension and owner.

use std::collections::BTreeMap;

use engine_core::{ChunkPos, DimensionId, PlayerId};
use serde::{Deserialize, Serialize};

/// A player-owned station. Its position never changes once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceStation {
    pub owner: PlayerId,
    pub dimension: DimensionId,
    /// Chunk the station is centered on.
    pub position: ChunkPos,
    #[serde(default)]
    pub name: Option<String>,
}

/// Stations grouped by dimension, then owner. Within an owner, insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDirectory {
    stations: BTreeMap<DimensionId, BTreeMap<PlayerId, Vec<SpaceStation>>>,
}

impl StationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff any station in `dimension`, whoever owns it, lies within
    /// chessboard distance `radius` of `position`.
    pub fn proximity(&self, dimension: &DimensionId, position: ChunkPos, radius: i32) -> bool {
        self.stations_in(dimension)
            .any(|station| station.position.chessboard_distance(position) <= radius)
    }

    /// Stations `owner` has in `dimension`, nearest to `reference` first.
    /// Equal distances keep registration order.
    pub fn owned_by(&self, dimension: &DimensionId, owner: PlayerId, reference: ChunkPos) -> Vec<&SpaceStation> {
        let mut owned: Vec<&SpaceStation> = self
            .stations
            .get(dimension)
            .and_then(|owners| owners.get(&owner))
            .map(|stations| stations.iter().collect())
            .unwrap_or_default();
        owned.sort_by_key(|station| station.position.chessboard_distance(reference));
        owned
    }

    /// Add a station. Returns false, changing nothing, when a station already
    /// sits at that exact chunk in that dimension.
    pub fn register(&mut self, station: SpaceStation) -> bool {
        if self
            .stations_in(&station.dimension)
            .any(|existing| existing.position == station.position)
        {
            return false;
        }
        self.stations
            .entry(station.dimension.clone())
            .or_default()
            .entry(station.owner)
            .or_default()
            .push(station);
        true
    }

    /// Every station in `dimension`.
    pub fn stations_in<'a>(&'a self, dimension: &DimensionId) -> impl Iterator<Item = &'a SpaceStation> {
        self.stations
            .get(dimension)
            .into_iter()
            .flat_map(|owners| owners.values())
            .flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpaceStation> {
        self.stations.values().flat_map(|owners| owners.values()).flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.values().all(|owners| owners.values().all(Vec::is_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Uuid;

    fn station(owner: PlayerId, x: i32, z: i32) -> SpaceStation {
        SpaceStation {
            owner,
            dimension: DimensionId::new("earth_orbit"),
            position: ChunkPos::new(x, z),
            name: None,
        }
    }

    #[test]
    fn proximity_checks_every_owner() {
        let mut dir = StationDirectory::new();
        let other = Uuid::new_v4();
        dir.register(station(other, 10, 10));
        let orbit = DimensionId::new("earth_orbit");

        assert!(dir.proximity(&orbit, ChunkPos::new(12, 8), 2));
        assert!(!dir.proximity(&orbit, ChunkPos::new(13, 10), 2));
        assert!(!dir.proximity(&DimensionId::new("moon_orbit"), ChunkPos::new(10, 10), 2));
    }

    #[test]
    fn owned_by_sorts_by_distance() {
        let mut dir = StationDirectory::new();
        let me = Uuid::new_v4();
        dir.register(station(me, 5, 0));
        dir.register(station(me, 0, 1));
        dir.register(station(me, -3, 3));
        dir.register(station(Uuid::new_v4(), 0, 9));

        let owned = dir.owned_by(&DimensionId::new("earth_orbit"), me, ChunkPos::new(0, 0));
        let distances: Vec<i32> = owned
            .iter()
            .map(|s| s.position.chessboard_distance(ChunkPos::new(0, 0)))
            .collect();
        assert_eq!(distances, vec![1, 3, 5]);
    }

    #[test]
    fn owned_by_ties_keep_insertion_order() {
        let mut dir = StationDirectory::new();
        let me = Uuid::new_v4();
        dir.register(station(me, 4, 0));
        dir.register(station(me, 0, -4));
        dir.register(station(me, -4, 4));

        let owned = dir.owned_by(&DimensionId::new("earth_orbit"), me, ChunkPos::new(0, 0));
        let positions: Vec<ChunkPos> = owned.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![ChunkPos::new(4, 0), ChunkPos::new(0, -4), ChunkPos::new(-4, 4)]);
    }

    #[test]
    fn owned_by_unknown_owner_is_empty() {
        let dir = StationDirectory::new();
        assert!(dir
            .owned_by(&DimensionId::new("earth_orbit"), Uuid::new_v4(), ChunkPos::new(0, 0))
            .is_empty());
    }

    #[test]
    fn register_same_position_is_noop() {
        let mut dir = StationDirectory::new();
        let me = Uuid::new_v4();
        assert!(dir.register(station(me, 1, 1)));
        assert!(!dir.register(station(me, 1, 1)));
        assert!(!dir.register(station(Uuid::new_v4(), 1, 1)));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn serializes_through_ron() {
        let mut dir = StationDirectory::new();
        dir.register(SpaceStation {
            name: Some("Outpost".to_string()),
            ..station(Uuid::new_v4(), 3, -2)
        });
        let text = ron::to_string(&dir).unwrap();
        let back: StationDirectory = ron::from_str(&text).unwrap();
        assert_eq!(back, dir);
    }
}
