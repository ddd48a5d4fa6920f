//! Structure placeholders ("ghosts") and their derivation from land tiles.
//!
//! Every corner of a land tile gets one settlement ghost and every edge of a land
//! tile gets one road ghost. Ghosts start unowned and uninstantiated; players claim
//! and build them during play.

use crate::hex::{CornerCoord, CornerParity, EdgeCoord, HexOffset, TileCoord, WorldPos};
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// What a placeholder turns into once built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Settlement,
    City,
    Road,
}

impl StructureKind {
    /// Whether this kind sits on a corner (as opposed to an edge)
    pub fn is_corner_kind(&self) -> bool {
        matches!(self, StructureKind::Settlement | StructureKind::City)
    }
}

/// Where a placeholder sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureSite {
    Corner(CornerCoord),
    Edge(EdgeCoord),
}

impl StructureSite {
    pub fn world_position(&self) -> WorldPos {
        match self {
            StructureSite::Corner(corner) => corner.to_world(),
            StructureSite::Edge(edge) => edge.location().position,
        }
    }

    /// Yaw of the piece; settlements are never rotated
    pub fn rotation(&self) -> f64 {
        match self {
            StructureSite::Corner(_) => 0.0,
            StructureSite::Edge(edge) => edge.location().rotation,
        }
    }
}

impl fmt::Display for StructureSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureSite::Corner(corner) => write!(f, "{corner}"),
            StructureSite::Edge(edge) => write!(f, "{edge}"),
        }
    }
}

/// A buildable slot on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructurePlaceholder {
    pub site: StructureSite,
    pub kind: StructureKind,
    /// Built for real rather than shown as a translucent preview
    pub instantiated: bool,
    /// `None` until a player claims the slot
    pub owner: Option<PlayerId>,
}

impl StructurePlaceholder {
    /// An unowned settlement preview at `corner`
    pub fn settlement_ghost(corner: CornerCoord) -> Self {
        Self {
            site: StructureSite::Corner(corner),
            kind: StructureKind::Settlement,
            instantiated: false,
            owner: None,
        }
    }

    /// An unowned road preview along `edge`
    pub fn road_ghost(edge: EdgeCoord) -> Self {
        Self {
            site: StructureSite::Edge(edge),
            kind: StructureKind::Road,
            instantiated: false,
            owner: None,
        }
    }

    /// Still just a preview: unowned and not built
    pub fn is_ghost(&self) -> bool {
        self.owner.is_none() && !self.instantiated
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    /// Back to an unowned preview of the kind the site started with
    pub fn release(&mut self) {
        *self = match self.site {
            StructureSite::Corner(corner) => Self::settlement_ghost(corner),
            StructureSite::Edge(edge) => Self::road_ghost(edge),
        };
    }

    pub fn world_position(&self) -> WorldPos {
        self.site.world_position()
    }

    pub fn rotation(&self) -> f64 {
        self.site.rotation()
    }
}

/// Walks land tiles in board order, creating each corner and edge ghost once.
///
/// A corner is claimed by the first tile that reaches it. Roads are anchored at
/// their canonical corner and only emitted when a tile on the far side of the edge
/// is land, so each shared edge appears exactly once however many tiles touch it.
#[derive(Debug, Default)]
pub struct GhostDeriver {
    visited: HashSet<CornerCoord>,
}

impl GhostDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corners seen so far
    pub fn visited(&self) -> &HashSet<CornerCoord> {
        &self.visited
    }

    /// Ghosts for the corners of `tile` not yet claimed by an earlier tile.
    ///
    /// `is_land` reports whether a tile exists on the board.
    pub fn derive<F>(&mut self, tile: TileCoord, is_land: F) -> Vec<StructurePlaceholder>
    where
        F: Fn(&TileCoord) -> bool,
    {
        let mut ghosts = Vec::new();
        for offset in HexOffset::ALL {
            let corner = tile.corner(offset);
            if !self.visited.insert(corner) {
                continue;
            }
            ghosts.push(StructurePlaceholder::settlement_ghost(corner));

            let around = corner.adjacent_tiles();
            let land_at = |offset: HexOffset| around.get(offset).is_some_and(|t| is_land(&t));

            match corner.parity() {
                CornerParity::Even => {
                    if land_at(HexOffset::UpperLeft) || land_at(HexOffset::UpperRight) {
                        ghosts.push(StructurePlaceholder::road_ghost(EdgeCoord::new(
                            corner,
                            HexOffset::Top,
                        )));
                    }
                }
                CornerParity::Odd => {
                    let above = land_at(HexOffset::Top);
                    if above || land_at(HexOffset::LowerLeft) {
                        ghosts.push(StructurePlaceholder::road_ghost(EdgeCoord::new(
                            corner,
                            HexOffset::UpperLeft,
                        )));
                    }
                    if above || land_at(HexOffset::LowerRight) {
                        ghosts.push(StructurePlaceholder::road_ghost(EdgeCoord::new(
                            corner,
                            HexOffset::UpperRight,
                        )));
                    }
                }
            }
        }
        ghosts
    }
}
