//! Messages exchanged with the planets menu.
//!
//! Both directions are encoded as RON text. The client sends a
//! [`ServerboundMessage`]; on menu open the server sends a [`MenuOpenPayload`].

use engine_core::{DimensionId, GlobalPos, PlayerId};
use serde::{Deserialize, Serialize};

use crate::directory::StationDirectory;
use crate::error::ProtocolError;
use crate::spawn::SpawnLocationTracker;

/// Requests a client may send from the planets menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerboundMessage {
    /// Build a station in the orbit of `dimension`, named `name`.
    ConstructStation { dimension: DimensionId, name: String },
    /// Descend to `dimension`.
    Land {
        dimension: DimensionId,
        try_previous_location: bool,
    },
}

impl ServerboundMessage {
    /// Stable channel id of the message.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ConstructStation { .. } => "construct_space_station",
            Self::Land { .. } => "land",
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(ron::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(ron::from_str(text)?)
    }
}

/// Snapshot sent when the planets menu opens. The client treats it as
/// read-only for the lifetime of that menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOpenPayload {
    pub stations: StationDirectory,
    /// Launch origins recorded for the receiving player.
    pub spawn_locations: Vec<GlobalPos>,
}

impl MenuOpenPayload {
    pub fn build(directory: &StationDirectory, spawns: &SpawnLocationTracker, player: PlayerId) -> Self {
        Self {
            stations: directory.clone(),
            spawn_locations: spawns.locations_for(player),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(ron::to_string(self)?)
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SpaceStation;
    use engine_core::{BlockPos, ChunkPos, Uuid};

    #[test]
    fn message_ids_are_stable() {
        let construct = ServerboundMessage::ConstructStation {
            dimension: DimensionId::new("earth"),
            name: "Home".into(),
        };
        let land = ServerboundMessage::Land {
            dimension: DimensionId::new("moon"),
            try_previous_location: true,
        };
        assert_eq!(construct.id(), "construct_space_station");
        assert_eq!(land.id(), "land");
    }

    #[test]
    fn decodes_handwritten_message() {
        let msg = ServerboundMessage::decode(
            r#"Land(dimension: "orbital:mars", try_previous_location: false)"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ServerboundMessage::Land {
                dimension: DimensionId::new("mars"),
                try_previous_location: false,
            }
        );
    }

    #[test]
    fn bare_dimension_gets_default_namespace() {
        let msg = ServerboundMessage::decode(r#"Land(dimension: "mars", try_previous_location: false)"#).unwrap();
        assert_eq!(
            msg,
            ServerboundMessage::Land {
                dimension: DimensionId::new("mars"),
                try_previous_location: false,
            }
        );
        assert!(msg.encode().unwrap().contains("\"orbital:mars\""));
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = ServerboundMessage::decode("Demolish(dimension: \"orbital:earth\")");
        assert!(matches!(err, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn payload_carries_only_the_players_origins() {
        let ada = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut directory = StationDirectory::new();
        directory.register(SpaceStation {
            owner: bob,
            dimension: DimensionId::new("earth_orbit"),
            position: ChunkPos::new(3, 3),
            name: None,
        });
        let mut spawns = SpawnLocationTracker::new();
        spawns.record(ada, GlobalPos::new(DimensionId::new("earth"), BlockPos::new(1, 64, 1)));
        spawns.record(bob, GlobalPos::new(DimensionId::new("mars"), BlockPos::new(9, 70, 9)));

        let payload = MenuOpenPayload::build(&directory, &spawns, ada);
        assert_eq!(payload.stations.len(), 1);
        assert_eq!(payload.spawn_locations.len(), 1);
        assert_eq!(payload.spawn_locations[0].dimension, DimensionId::new("earth"));

        let decoded = MenuOpenPayload::decode(&payload.encode().unwrap()).unwrap();
        assert_eq!(decoded, payload);
    }
}
