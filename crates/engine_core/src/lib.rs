//! Core world types shared by the orbital crates.
//!
//! This crate provides the foundational types used across the server:
//! - Dimension, block, chunk and global positions
//! - Items, stacks and player inventories
//! - ECS components for player entities
//! - Fixed-rate tick timing

pub mod components;
pub mod inventory;
pub mod position;
pub mod time;

pub use components::*;
pub use inventory::*;
pub use position::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{DVec3, IVec3};
pub use hecs::{Entity, World};
pub use uuid::Uuid;

/// Players are identified by their account UUID.
pub type PlayerId = Uuid;
