//! Interactive board session.
//!
//! A `BoardSession` owns one generated board and the state around it: the shape the
//! next reset will use, the current interaction mode, the last dice roll and the
//! random source. Every change goes through `apply`, which checks the command
//! against the current mode before touching the board.

use crate::actions::{InteractionMode, SessionCommand, SessionEvent};
use crate::board::{Board, BoardError, BoardShape};
use crate::ghosts::StructureSite;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Reasons a command is rejected. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SessionError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("command needs {required} mode, session is in {current} mode")]
    WrongMode {
        required: InteractionMode,
        current: InteractionMode,
    },
}

#[derive(Debug, Clone)]
pub struct BoardSession {
    board: Board,
    /// Applied by the next reset
    pending_shape: BoardShape,
    mode: InteractionMode,
    last_roll: Option<(u8, u8)>,
    rng: StdRng,
}

impl BoardSession {
    /// Start a session with a freshly generated board. Without a seed the board is
    /// drawn from OS entropy.
    pub fn new(shape: BoardShape, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::generate(shape, &mut rng);
        Self {
            board,
            pending_shape: shape,
            mode: InteractionMode::Idle,
            last_roll: None,
            rng,
        }
    }

    pub fn standard() -> Self {
        Self::new(BoardShape::standard(), None)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pending_shape(&self) -> BoardShape {
        self.pending_shape
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.last_roll
    }

    /// Apply a command and report what changed
    pub fn apply(&mut self, command: SessionCommand) -> Result<Vec<SessionEvent>, SessionError> {
        if let Some(required) = command.required_mode() {
            if required != self.mode {
                return Err(SessionError::WrongMode {
                    required,
                    current: self.mode,
                });
            }
        }

        let mut events = Vec::new();

        match command {
            // ==================== Any Mode ====================
            SessionCommand::Generate {
                length,
                width,
                seed,
            } => {
                if let Some(seed) = seed {
                    self.rng = StdRng::seed_from_u64(seed);
                }
                self.pending_shape = BoardShape::new(length, width);
                events.push(self.regenerate());
            }

            SessionCommand::ToggleMode(mode) => {
                let next = if self.mode == mode {
                    InteractionMode::Idle
                } else {
                    mode
                };
                if next != self.mode {
                    if self.mode == InteractionMode::Structure {
                        let sites = self.board.release_unbuilt_claims();
                        if !sites.is_empty() {
                            events.push(SessionEvent::ClaimsReleased { sites });
                        }
                    }
                    events.push(SessionEvent::ModeChanged {
                        from: self.mode,
                        to: next,
                    });
                    self.mode = next;
                }
            }

            // ==================== Board Mode ====================
            SessionCommand::ResizeBoard { dimension, amount } => {
                // Out of range resizes are ignored
                if let Some(shape) = self.pending_shape.resized(dimension, amount) {
                    self.pending_shape = shape;
                    events.push(SessionEvent::ShapeChanged {
                        length: shape.length(),
                        width: shape.width(),
                    });
                }
            }

            SessionCommand::ResetBoard => {
                events.push(self.regenerate());
            }

            // ==================== Robber Mode ====================
            SessionCommand::MoveRobber(tile) => {
                let from = self.board.move_robber(tile)?;
                events.push(SessionEvent::RobberMoved { from, to: tile });
            }

            // ==================== Dice Mode ====================
            SessionCommand::RollDice => {
                let roll = (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6));
                let total = roll.0 + roll.1;
                self.last_roll = Some(roll);
                let producing = self
                    .board
                    .producing_tiles(total)
                    .into_iter()
                    .map(|tile| tile.coord)
                    .collect();
                events.push(SessionEvent::DiceRolled {
                    roll,
                    total,
                    producing,
                });
            }

            // ==================== Structure Mode ====================
            SessionCommand::ClaimStructure { site, player } => {
                let claimed = self.board.claim_structure(site, player)?;
                events.push(SessionEvent::StructureClaimed {
                    site: claimed.site,
                    player,
                });
            }

            SessionCommand::SetStructureKind { corner, kind } => {
                let changed = self.board.set_structure_kind(corner, kind)?;
                events.push(SessionEvent::StructureKindChanged {
                    site: changed.site,
                    kind,
                });
            }

            SessionCommand::InstantiateStructure(site) => {
                let built = self.board.instantiate_structure(site)?;
                if let Some(player) = built.owner {
                    events.push(SessionEvent::StructureInstantiated {
                        site: built.site,
                        player,
                        kind: built.kind,
                    });
                }
            }

            SessionCommand::ReleaseStructure(site) => {
                let released = self.board.release_structure(site)?;
                events.push(SessionEvent::StructureReleased {
                    site: released.site,
                });
            }
        }

        Ok(events)
    }

    fn regenerate(&mut self) -> SessionEvent {
        self.board = Board::generate(self.pending_shape, &mut self.rng);
        self.last_roll = None;
        let shape = self.board.shape();
        debug!(%shape, mode = %self.mode, "session board replaced");
        SessionEvent::BoardGenerated {
            length: shape.length(),
            width: shape.width(),
            land_tiles: self.board.land_tiles().count(),
            harbors: self.board.harbors().count(),
        }
    }

    /// Sites currently claimed by someone but not built
    pub fn pending_claims(&self) -> Vec<StructureSite> {
        let mut sites: Vec<StructureSite> = self
            .board
            .settlements()
            .chain(self.board.roads())
            .filter(|s| s.is_claimed() && !s.instantiated)
            .map(|s| s.site)
            .collect();
        sites.sort();
        sites
    }
}

impl Default for BoardSession {
    fn default() -> Self {
        Self::standard()
    }
}
