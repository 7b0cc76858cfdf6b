//! Error types for station requests.

use engine_core::{ChunkPos, DimensionId};
use thiserror::Error;

/// Why a construction request failed outright.
///
/// Nearby stations and missing ingredients are not errors; see
/// [`crate::ConstructionOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("no planet is registered for dimension {0}")]
    UnknownPlanet(DimensionId),
    #[error("dimension {0} does not exist, try restarting the server")]
    DimensionUnavailable(DimensionId),
    #[error("station prefab {0:?} is not loaded")]
    MissingPrefab(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandingError {
    #[error("no planet is registered for dimension {0}")]
    UnknownPlanet(DimensionId),
    #[error("dimension {0} does not exist, try restarting the server")]
    DimensionUnavailable(DimensionId),
}

/// Failure reported by the territory-claim integration. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("chunk {0} is already claimed")]
    AlreadyClaimed(ChunkPos),
    #[error("claim rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Decode(#[from] ron::error::SpannedError),
    #[error("could not encode message: {0}")]
    Encode(#[from] ron::Error),
}

/// A request that failed with an error rather than being quietly skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Landing(#[from] LandingError),
}

impl RequestError {
    /// True when the server's dimension set or prefabs disagree with its catalog.
    /// Operators have to fix these; retrying will not help.
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            RequestError::Construction(ConstructionError::DimensionUnavailable(_))
                | RequestError::Construction(ConstructionError::MissingPrefab(_))
                | RequestError::Landing(LandingError::DimensionUnavailable(_))
        )
    }
}
