//! Commands a client can send to a board session.
//!
//! This module defines every command accepted by `BoardSession::apply`, the
//! interaction modes that gate them, and the events that result.

use crate::board::Dimension;
use crate::ghosts::{StructureKind, StructureSite};
use crate::hex::{CornerCoord, TileCoord};
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What clicks on the board currently do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Camera only
    #[default]
    Idle,
    /// Claiming and building settlements, cities and roads
    Structure,
    /// Resizing and regenerating the board
    Board,
    /// Moving the robber
    Robber,
    /// Rolling the dice
    Dice,
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Structure => "structure",
            InteractionMode::Board => "board",
            InteractionMode::Robber => "robber",
            InteractionMode::Dice => "dice",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All commands a session accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    // ==================== Any Mode ====================
    /// Replace the board with a fresh one; a seed makes it reproducible
    Generate {
        length: u16,
        width: u16,
        seed: Option<u64>,
    },
    /// Enter a mode, or drop back to idle if it is already active
    ToggleMode(InteractionMode),

    // ==================== Board Mode ====================
    /// Grow or shrink the shape used by the next reset
    ResizeBoard { dimension: Dimension, amount: i32 },
    /// Regenerate using the pending shape
    ResetBoard,

    // ==================== Robber Mode ====================
    MoveRobber(TileCoord),

    // ==================== Dice Mode ====================
    RollDice,

    // ==================== Structure Mode ====================
    ClaimStructure {
        site: StructureSite,
        player: PlayerId,
    },
    /// Swap a claimed corner between settlement and city
    SetStructureKind {
        corner: CornerCoord,
        kind: StructureKind,
    },
    InstantiateStructure(StructureSite),
    ReleaseStructure(StructureSite),
}

impl SessionCommand {
    /// The mode this command is only valid in, or `None` if it is always valid
    pub fn required_mode(&self) -> Option<InteractionMode> {
        match self {
            SessionCommand::Generate { .. } | SessionCommand::ToggleMode(_) => None,
            SessionCommand::ResizeBoard { .. } | SessionCommand::ResetBoard => {
                Some(InteractionMode::Board)
            }
            SessionCommand::MoveRobber(_) => Some(InteractionMode::Robber),
            SessionCommand::RollDice => Some(InteractionMode::Dice),
            SessionCommand::ClaimStructure { .. }
            | SessionCommand::SetStructureKind { .. }
            | SessionCommand::InstantiateStructure(_)
            | SessionCommand::ReleaseStructure(_) => Some(InteractionMode::Structure),
        }
    }
}

/// Events that occur as a result of commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The board was replaced wholesale
    BoardGenerated {
        length: u16,
        width: u16,
        land_tiles: usize,
        harbors: usize,
    },

    /// The shape for the next reset changed
    ShapeChanged { length: u16, width: u16 },

    ModeChanged {
        from: InteractionMode,
        to: InteractionMode,
    },

    /// Claims that were never built were dropped on leaving structure mode
    ClaimsReleased { sites: Vec<StructureSite> },

    RobberMoved {
        from: Option<TileCoord>,
        to: TileCoord,
    },

    DiceRolled {
        roll: (u8, u8),
        total: u8,
        /// Tiles that produce on this total
        producing: Vec<TileCoord>,
    },

    StructureClaimed {
        site: StructureSite,
        player: PlayerId,
    },

    StructureKindChanged {
        site: StructureSite,
        kind: StructureKind,
    },

    StructureInstantiated {
        site: StructureSite,
        player: PlayerId,
        kind: StructureKind,
    },

    StructureReleased { site: StructureSite },
}

impl SessionEvent {
    /// Whether a client holding a board snapshot needs a fresh one
    pub fn changes_board(&self) -> bool {
        !matches!(
            self,
            SessionEvent::ShapeChanged { .. }
                | SessionEvent::ModeChanged { .. }
                | SessionEvent::DiceRolled { .. }
        )
    }
}
