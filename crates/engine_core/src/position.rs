//! Dimension identifiers and integer world positions.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Width of a chunk in blocks along X and Z.
pub const CHUNK_SIZE: i32 = 16;

/// Namespace used when a dimension id is written without one.
pub const DEFAULT_NAMESPACE: &str = "orbital";

/// Namespaced identifier of a dimension (`namespace:path`), e.g. `orbital:earth_orbit`.
///
/// Serialized as the plain string. Decoding goes through [`DimensionId::new`],
/// so a bare path read from a file or message gets the default namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DimensionId(String);

impl DimensionId {
    /// Create a dimension id. A bare path gets the default namespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.contains(':') {
            Self(id)
        } else {
            Self(format!("{}:{}", DEFAULT_NAMESPACE, id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or(DEFAULT_NAMESPACE, |(ns, _)| ns)
    }

    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, path)| path)
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DimensionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DimensionId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<DimensionId> for String {
    fn from(id: DimensionId) -> Self {
        id.0
    }
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block containing a continuous position (floors every axis).
    pub fn containing(position: DVec3) -> Self {
        Self {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
            z: position.z.floor() as i32,
        }
    }

    /// Same column, different height.
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// Chunk column this block belongs to.
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::new(self.x >> 4, self.z >> 4)
    }

    pub fn as_dvec3(self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Horizontal chunk coordinate (a 16×16 column of blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chessboard (Chebyshev) distance: `max(|Δx|, |Δz|)`.
    pub fn chessboard_distance(self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// X of the block in the middle of this chunk.
    pub fn middle_block_x(self) -> i32 {
        (self.x << 4) + CHUNK_SIZE / 2
    }

    /// Z of the block in the middle of this chunk.
    pub fn middle_block_z(self) -> i32 {
        (self.z << 4) + CHUNK_SIZE / 2
    }

    pub fn middle_block_position(self, y: i32) -> BlockPos {
        BlockPos::new(self.middle_block_x(), y, self.middle_block_z())
    }

    /// All chunks within `radius` (chessboard) of this one, row by row.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = ChunkPos> {
        (-radius..=radius).flat_map(move |dx| (-radius..=radius).map(move |dz| self.offset(dx, dz)))
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// A block position qualified by the dimension it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalPos {
    pub dimension: DimensionId,
    pub pos: BlockPos,
}

impl GlobalPos {
    pub fn new(dimension: DimensionId, pos: BlockPos) -> Self {
        Self { dimension, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_id_defaults_namespace() {
        let dim = DimensionId::new("moon");
        assert_eq!(dim.as_str(), "orbital:moon");
        assert_eq!(dim.namespace(), "orbital");
        assert_eq!(dim.path(), "moon");
        assert_eq!(DimensionId::new("other:mars").namespace(), "other");
    }

    #[test]
    fn block_pos_containing_floors_negative_coordinates() {
        let pos = BlockPos::containing(DVec3::new(-0.5, 64.9, 15.99));
        assert_eq!(pos, BlockPos::new(-1, 64, 15));
    }

    #[test]
    fn block_pos_chunk_uses_arithmetic_shift() {
        assert_eq!(BlockPos::new(15, 0, 16).chunk(), ChunkPos::new(0, 1));
        assert_eq!(BlockPos::new(-1, 0, -17).chunk(), ChunkPos::new(-1, -2));
    }

    #[test]
    fn chunk_middle_block() {
        let chunk = ChunkPos::new(2, -1);
        assert_eq!(chunk.middle_block_position(100), BlockPos::new(40, 100, -8));
    }

    #[test]
    fn chessboard_distance_takes_larger_axis() {
        let a = ChunkPos::new(0, 0);
        assert_eq!(a.chessboard_distance(ChunkPos::new(2, -1)), 2);
        assert_eq!(a.chessboard_distance(ChunkPos::new(-3, 3)), 3);
        assert_eq!(a.chessboard_distance(a), 0);
    }

    #[test]
    fn square_around_covers_three_by_three() {
        let chunks: Vec<_> = ChunkPos::new(5, 5).square_around(1).collect();
        assert_eq!(chunks.len(), 9);
        assert!(chunks.contains(&ChunkPos::new(4, 4)));
        assert!(chunks.contains(&ChunkPos::new(6, 6)));
        assert!(chunks.iter().all(|c| c.chessboard_distance(ChunkPos::new(5, 5)) <= 1));
    }
}
