//! Hexboard - hex-grid topology and procedural board generation
//!
//! This crate provides the engine behind a 3D hex board table, including:
//! - Coordinate system linking tiles, corners, edges and world positions
//! - Balanced random pools for resources, number tokens and harbors
//! - Board generation: land rows, the surrounding ocean ring and its harbors
//! - Structure ghosts for every buildable corner and edge
//! - An interactive session that gates board commands by interaction mode
//!
//! # Architecture
//!
//! The engine is synchronous and renderer-agnostic. It can be compiled to:
//! - Native Rust for the WebSocket board service
//! - WebAssembly for a browser renderer (feature `wasm`)
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system and world-space mapping
//! - [`distribution`]: Tile, token and harbor pools
//! - [`board`]: Board shape, generation and claim operations
//! - [`ghosts`]: Structure placeholders and their derivation
//! - [`player`]: Player ids and colours
//! - [`actions`]: Session commands, modes and events
//! - [`session`]: Interactive board session

pub mod actions;
pub mod board;
pub mod distribution;
pub mod ghosts;
pub mod hex;
pub mod player;
pub mod session;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{InteractionMode, SessionCommand, SessionEvent};
pub use board::{
    Board, BoardError, BoardJson, BoardShape, Dimension, HarborPlacement, HarborType, HexType,
    Resource, TileJson, TileRecord, MAX_LENGTH,
};
pub use distribution::{generate_harbors, generate_tiles, TileSeed, TOKEN_NUMBERS};
pub use ghosts::{GhostDeriver, StructureKind, StructurePlaceholder, StructureSite};
pub use hex::{CornerCoord, EdgeCoord, EdgeLocation, HexOffset, TileCoord, WorldPos};
pub use player::{PlayerColor, PlayerId};
pub use session::{BoardSession, SessionError};
