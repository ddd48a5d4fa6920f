//! Hex coordinate system for the board.
//!
//! This module provides the coordinate types and the pure geometry that ties them
//! together:
//! - `TileCoord`: Identifies individual hex tiles (skewed offset coordinates)
//! - `CornerCoord`: Identifies corners where settlements and cities are placed
//! - `EdgeCoord`: Identifies edges where roads and harbors are placed
//! - `WorldPos`: 2D world-space positions consumed by the renderer
//!
//! Tiles use pointy-top hexes. `x` runs along a row and each step in `y` moves one
//! row "forward" while shifting half a tile to the right, so a tile's world `x` is
//! `x + y/2` row spacings. World `y` is flipped so increasing tile `y` reads as
//! moving away from the default camera.
//!
//! Corners live on their own integer lattice: the top corner of tile `(x, y)` is
//! `(2x + y, y)`. Corners with an even coordinate sum are the top corner of the tile
//! below them; odd corners are the bottom corner of the tile above them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// √3, spelled out so the scale constants below can stay `const`.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Distance between the centers of two horizontally adjacent tiles.
pub const ROW_SPACING: f64 = 12.8;
pub const HALF_ROW_SPACING: f64 = ROW_SPACING / 2.0;
pub const QUARTER_ROW_SPACING: f64 = ROW_SPACING / 4.0;
/// Vertical distance between two tile rows.
pub const ROW_OFFSET: f64 = HALF_ROW_SPACING * SQRT_3;
/// Vertical distance from a tile's center to one of its four diagonal corners.
pub const CORNER_OFFSET: f64 = HALF_ROW_SPACING / SQRT_3;
pub const HALF_CORNER_OFFSET: f64 = CORNER_OFFSET / 2.0;

/// One sixth of a clockwise turn.
pub const NEG_PI_OVER_3: f64 = -std::f64::consts::FRAC_PI_3;

/// Direction of a corner or edge relative to a hex.
///
/// Variants are declared clockwise starting from the top. Rotations are derived from
/// this ordering, so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexOffset {
    Top,
    UpperRight,
    LowerRight,
    Bottom,
    LowerLeft,
    UpperLeft,
}

impl HexOffset {
    /// All offsets in clockwise order starting from the top
    pub const ALL: [HexOffset; 6] = [
        HexOffset::Top,
        HexOffset::UpperRight,
        HexOffset::LowerRight,
        HexOffset::Bottom,
        HexOffset::LowerLeft,
        HexOffset::UpperLeft,
    ];

    /// Position of this offset going clockwise from the top (1..=6)
    pub fn clockwise_rank(self) -> u8 {
        match self {
            HexOffset::Top => 1,
            HexOffset::UpperRight => 2,
            HexOffset::LowerRight => 3,
            HexOffset::Bottom => 4,
            HexOffset::LowerLeft => 5,
            HexOffset::UpperLeft => 6,
        }
    }

    /// The offset pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            HexOffset::Top => HexOffset::Bottom,
            HexOffset::UpperRight => HexOffset::LowerLeft,
            HexOffset::LowerRight => HexOffset::UpperLeft,
            HexOffset::Bottom => HexOffset::Top,
            HexOffset::LowerLeft => HexOffset::UpperRight,
            HexOffset::UpperLeft => HexOffset::LowerRight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HexOffset::Top => "top",
            HexOffset::UpperRight => "upper right",
            HexOffset::LowerRight => "lower right",
            HexOffset::Bottom => "bottom",
            HexOffset::LowerLeft => "lower left",
            HexOffset::UpperLeft => "upper left",
        }
    }

    /// Shift from a tile center to the corner in this direction
    fn corner_shift(self) -> (f64, f64) {
        match self {
            HexOffset::Top => (0.0, -2.0 * CORNER_OFFSET),
            HexOffset::Bottom => (0.0, 2.0 * CORNER_OFFSET),
            HexOffset::UpperLeft => (-HALF_ROW_SPACING, -CORNER_OFFSET),
            HexOffset::LowerLeft => (-HALF_ROW_SPACING, CORNER_OFFSET),
            HexOffset::UpperRight => (HALF_ROW_SPACING, -CORNER_OFFSET),
            HexOffset::LowerRight => (HALF_ROW_SPACING, CORNER_OFFSET),
        }
    }

    /// Shift from a corner to the midpoint of the edge leaving it in this direction
    fn edge_shift(self) -> (f64, f64) {
        match self {
            HexOffset::Top => (0.0, -CORNER_OFFSET),
            HexOffset::Bottom => (0.0, CORNER_OFFSET),
            HexOffset::UpperLeft => (-QUARTER_ROW_SPACING, -HALF_CORNER_OFFSET),
            HexOffset::LowerLeft => (-QUARTER_ROW_SPACING, HALF_CORNER_OFFSET),
            HexOffset::UpperRight => (QUARTER_ROW_SPACING, -HALF_CORNER_OFFSET),
            HexOffset::LowerRight => (QUARTER_ROW_SPACING, HALF_CORNER_OFFSET),
        }
    }

    /// Rotation of a piece laid along an edge in this direction
    pub fn edge_rotation(self) -> f64 {
        NEG_PI_OVER_3 * f64::from(self.clockwise_rank())
    }
}

impl fmt::Display for HexOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A position in world space (the renderer's ground plane)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn shifted(self, (dx, dy): (f64, f64)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(&self, other: &WorldPos) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn midpoint(&self, other: &WorldPos) -> WorldPos {
        WorldPos::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Offset coordinate of a hex tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TileCoord {
    /// Position along the row
    pub x: i32,
    /// Row, increasing away from the camera
    pub y: i32,
}

impl TileCoord {
    /// Create a new tile coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The six tiles sharing an edge with this one
    pub fn neighbors(&self) -> [TileCoord; 6] {
        [
            TileCoord::new(self.x + 1, self.y),
            TileCoord::new(self.x + 1, self.y - 1),
            TileCoord::new(self.x, self.y - 1),
            TileCoord::new(self.x - 1, self.y),
            TileCoord::new(self.x - 1, self.y + 1),
            TileCoord::new(self.x, self.y + 1),
        ]
    }

    /// World position of the tile center
    pub fn to_world(&self) -> WorldPos {
        let x = f64::from(self.x) + f64::from(self.y) / 2.0;
        WorldPos::new(x * ROW_SPACING, -f64::from(self.y) * ROW_OFFSET)
    }

    /// Corner of this tile in the given direction
    pub fn corner(&self, offset: HexOffset) -> CornerCoord {
        let base = CornerCoord::new(2 * self.x + self.y, self.y);
        match offset {
            HexOffset::Top => base,
            HexOffset::UpperRight => CornerCoord::new(base.x + 1, base.y),
            HexOffset::LowerRight => CornerCoord::new(base.x + 1, base.y - 1),
            HexOffset::Bottom => CornerCoord::new(base.x, base.y - 1),
            HexOffset::LowerLeft => CornerCoord::new(base.x - 1, base.y - 1),
            HexOffset::UpperLeft => CornerCoord::new(base.x - 1, base.y),
        }
    }

    /// All six corners, clockwise from the top
    pub fn corners(&self) -> [CornerCoord; 6] {
        HexOffset::ALL.map(|offset| self.corner(offset))
    }

    /// World position of the corner in the given direction
    pub fn corner_to_world(&self, offset: HexOffset) -> WorldPos {
        self.to_world().shifted(offset.corner_shift())
    }

    /// Locate the edge leaving `corner_offset` of this tile in direction `edge_offset`.
    ///
    /// The same side of a hex can be reached from either of its corners; for example
    /// the left side is `(LowerLeft, Top)` or `(UpperLeft, Bottom)`.
    pub fn edge_location(&self, corner_offset: HexOffset, edge_offset: HexOffset) -> EdgeLocation {
        let corner = self.corner(corner_offset);
        EdgeLocation {
            position: self
                .corner_to_world(corner_offset)
                .shifted(edge_offset.edge_shift()),
            rotation: edge_offset.edge_rotation(),
            corner,
            edge: EdgeCoord::new(corner, edge_offset),
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile ({}, {})", self.x, self.y)
    }
}

/// Which of the two corner classes a corner belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerParity {
    /// Top corner of the tile below; edges run up, lower-left and lower-right
    Even,
    /// Bottom corner of the tile above; edges run down, upper-left and upper-right
    Odd,
}

/// Corner coordinate - identifies a point where 3 hexes meet.
///
/// Every (tile, offset) pair naming the same geometric corner produces the same
/// `CornerCoord`, so it can be used directly as a map key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CornerCoord {
    pub x: i32,
    pub y: i32,
}

impl CornerCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn parity(&self) -> CornerParity {
        if (self.x + self.y).rem_euclid(2) == 0 {
            CornerParity::Even
        } else {
            CornerParity::Odd
        }
    }

    /// `ceil((x - y) / 2)`: the `x` of the right-hand tile in the corner's row
    fn right_tile_x(&self) -> i32 {
        (self.x - self.y + 1).div_euclid(2)
    }

    /// The three tiles touching this corner, keyed by where they sit relative to it
    pub fn adjacent_tiles(&self) -> AdjacentTiles {
        let right_x = self.right_tile_x();
        let entries = match self.parity() {
            CornerParity::Even => [
                (HexOffset::UpperLeft, TileCoord::new(right_x - 1, self.y + 1)),
                (HexOffset::UpperRight, TileCoord::new(right_x, self.y + 1)),
                (HexOffset::Bottom, TileCoord::new(right_x, self.y)),
            ],
            CornerParity::Odd => [
                (HexOffset::LowerLeft, TileCoord::new(right_x - 1, self.y)),
                (HexOffset::LowerRight, TileCoord::new(right_x, self.y)),
                (HexOffset::Top, TileCoord::new(right_x - 1, self.y + 1)),
            ],
        };
        AdjacentTiles { entries }
    }

    /// The 3 tiles that touch this corner
    pub fn touching_tiles(&self) -> [TileCoord; 3] {
        self.adjacent_tiles().tiles()
    }

    /// World position of this corner, measured from the tile above it when there is
    /// one and from the tile below otherwise
    pub fn to_world(&self) -> WorldPos {
        let right_x = self.right_tile_x();
        match self.parity() {
            CornerParity::Odd => {
                TileCoord::new(right_x - 1, self.y + 1).corner_to_world(HexOffset::Bottom)
            }
            CornerParity::Even => TileCoord::new(right_x, self.y).corner_to_world(HexOffset::Top),
        }
    }

    /// Directions in which an edge leaves this corner
    pub fn edge_directions(&self) -> [HexOffset; 3] {
        match self.parity() {
            CornerParity::Even => [HexOffset::Top, HexOffset::LowerRight, HexOffset::LowerLeft],
            CornerParity::Odd => [HexOffset::UpperRight, HexOffset::Bottom, HexOffset::UpperLeft],
        }
    }

    /// The corner one edge away in `direction`, if an edge leaves this corner that way
    pub fn step(&self, direction: HexOffset) -> Option<CornerCoord> {
        match (self.parity(), direction) {
            (CornerParity::Even, HexOffset::Top) => Some(CornerCoord::new(self.x, self.y + 1)),
            (CornerParity::Even, HexOffset::LowerLeft) => Some(CornerCoord::new(self.x - 1, self.y)),
            (CornerParity::Even, HexOffset::LowerRight) => {
                Some(CornerCoord::new(self.x + 1, self.y))
            }
            (CornerParity::Odd, HexOffset::Bottom) => Some(CornerCoord::new(self.x, self.y - 1)),
            (CornerParity::Odd, HexOffset::UpperLeft) => Some(CornerCoord::new(self.x - 1, self.y)),
            (CornerParity::Odd, HexOffset::UpperRight) => {
                Some(CornerCoord::new(self.x + 1, self.y))
            }
            _ => None,
        }
    }

    /// The 3 corners connected to this one by a single edge
    pub fn adjacent_corners(&self) -> [CornerCoord; 3] {
        self.touching_edges().map(|edge| edge.other_end(self))
    }

    /// The 3 edges meeting at this corner, in canonical form
    pub fn touching_edges(&self) -> [EdgeCoord; 3] {
        self.edge_directions()
            .map(|direction| EdgeCoord::new(*self, direction).canonical_or_self())
    }
}

impl fmt::Display for CornerCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corner ({}, {})", self.x, self.y)
    }
}

/// The tiles around a corner, keyed by their offset from it.
///
/// Exactly three of the six offsets are present: `UpperLeft`, `UpperRight` and
/// `Bottom` for even corners, `LowerLeft`, `LowerRight` and `Top` for odd ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentTiles {
    entries: [(HexOffset, TileCoord); 3],
}

impl AdjacentTiles {
    pub fn get(&self, offset: HexOffset) -> Option<TileCoord> {
        self.entries
            .iter()
            .find(|(key, _)| *key == offset)
            .map(|(_, tile)| *tile)
    }

    pub fn contains(&self, tile: &TileCoord) -> bool {
        self.entries.iter().any(|(_, t)| t == tile)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexOffset, TileCoord)> + '_ {
        self.entries.iter().copied()
    }

    pub fn tiles(&self) -> [TileCoord; 3] {
        self.entries.map(|(_, tile)| tile)
    }
}

/// Edge coordinate - a corner plus the direction of the edge leaving it.
///
/// Each side of a hex can be named from either of its two corners. `canonical` picks
/// the form used for road placeholders: vertical edges hang off their lower (even)
/// corner pointing `Top`, diagonal edges off their lower (odd) corner pointing
/// `UpperLeft` or `UpperRight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeCoord {
    /// The corner the edge is anchored at
    pub corner: CornerCoord,
    /// Which way the edge leaves that corner
    pub direction: HexOffset,
}

impl EdgeCoord {
    pub const fn new(corner: CornerCoord, direction: HexOffset) -> Self {
        Self { corner, direction }
    }

    /// Both ends of the edge, or `None` when no edge leaves the corner that way
    pub fn endpoints(&self) -> Option<[CornerCoord; 2]> {
        self.corner
            .step(self.direction)
            .map(|other| [self.corner, other])
    }

    pub fn is_valid(&self) -> bool {
        self.endpoints().is_some()
    }

    /// The canonical name of this edge, or `None` for a direction that leaves no edge
    pub fn canonical(&self) -> Option<EdgeCoord> {
        let other = self.corner.step(self.direction)?;
        Some(match self.direction {
            HexOffset::Top | HexOffset::UpperLeft | HexOffset::UpperRight => *self,
            _ => EdgeCoord::new(other, self.direction.opposite()),
        })
    }

    fn canonical_or_self(self) -> EdgeCoord {
        self.canonical().unwrap_or(self)
    }

    fn other_end(&self, from: &CornerCoord) -> CornerCoord {
        match self.endpoints() {
            Some([a, b]) if a == *from => b,
            Some([a, _]) => a,
            None => self.corner,
        }
    }

    /// The 2 tiles sharing this edge
    pub fn touching_tiles(&self) -> Option<[TileCoord; 2]> {
        let [a, b] = self.endpoints()?;
        let far = b.adjacent_tiles();
        let mut shared = a
            .adjacent_tiles()
            .tiles()
            .into_iter()
            .filter(|tile| far.contains(tile));
        Some([shared.next()?, shared.next()?])
    }

    /// World position and rotation of a piece laid along this edge
    pub fn location(&self) -> EdgeLocation {
        EdgeLocation {
            position: self.corner.to_world().shifted(self.direction.edge_shift()),
            rotation: self.direction.edge_rotation(),
            corner: self.corner,
            edge: *self,
        }
    }
}

impl fmt::Display for EdgeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} edge of {}", self.direction, self.corner)
    }
}

/// Where a road or harbor sits along an edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLocation {
    /// Midpoint of the edge
    pub position: WorldPos,
    /// Rotation in radians, clockwise turns are negative
    pub rotation: f64,
    /// The corner the edge is anchored at, used as its identity
    pub corner: CornerCoord,
    pub edge: EdgeCoord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: WorldPos, b: WorldPos) {
        assert!(
            (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn sample_tiles() -> impl Iterator<Item = TileCoord> {
        (-5..=5).flat_map(|x| (-5..=5).map(move |y| TileCoord::new(x, y)))
    }

    #[test]
    fn test_offsets_are_clockwise() {
        let ranks: Vec<u8> = HexOffset::ALL.iter().map(|o| o.clockwise_rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        for (i, offset) in HexOffset::ALL.iter().enumerate() {
            assert_eq!(*offset as usize, i, "declaration order must match ALL");
            assert_eq!(offset.opposite().opposite(), *offset);
            assert_eq!(
                offset.opposite().clockwise_rank(),
                (offset.clockwise_rank() + 2) % 6 + 1
            );
        }
    }

    #[test]
    fn test_tile_world_position() {
        assert_close(TileCoord::new(0, 0).to_world(), WorldPos::new(0.0, 0.0));
        assert_close(TileCoord::new(1, 0).to_world(), WorldPos::new(ROW_SPACING, 0.0));
        assert_close(
            TileCoord::new(0, 1).to_world(),
            WorldPos::new(HALF_ROW_SPACING, -ROW_OFFSET),
        );
        assert_close(
            TileCoord::new(1, -2).to_world(),
            WorldPos::new(0.0, 2.0 * ROW_OFFSET),
        );
    }

    #[test]
    fn test_tile_corners_are_distinct() {
        for tile in sample_tiles() {
            let unique: HashSet<_> = tile.corners().into_iter().collect();
            assert_eq!(unique.len(), 6);
        }
    }

    #[test]
    fn test_shared_corner_has_one_coordinate() {
        let upper_right = TileCoord::new(0, 0).corner(HexOffset::UpperRight);
        assert_eq!(upper_right, TileCoord::new(1, 0).corner(HexOffset::UpperLeft));
        assert_eq!(upper_right, TileCoord::new(0, 1).corner(HexOffset::Bottom));

        let top = TileCoord::new(0, 0).corner(HexOffset::Top);
        assert_eq!(top, TileCoord::new(-1, 1).corner(HexOffset::LowerRight));
        assert_eq!(top, TileCoord::new(0, 1).corner(HexOffset::LowerLeft));
    }

    #[test]
    fn test_corner_adjacent_tiles_round_trip() {
        for tile in sample_tiles() {
            for offset in HexOffset::ALL {
                let adjacent = tile.corner(offset).adjacent_tiles();
                assert!(adjacent.contains(&tile));
                // Seen from the corner, the tile sits on the opposite side.
                assert_eq!(adjacent.get(offset.opposite()), Some(tile));
            }
        }
    }

    #[test]
    fn test_corner_touches_three_tiles() {
        let even = CornerCoord::new(0, 0);
        let odd = CornerCoord::new(1, 0);
        assert_eq!(even.parity(), CornerParity::Even);
        assert_eq!(odd.parity(), CornerParity::Odd);

        for corner in [even, odd, CornerCoord::new(-3, -2), CornerCoord::new(-4, 1)] {
            let unique: HashSet<_> = corner.touching_tiles().into_iter().collect();
            assert_eq!(unique.len(), 3);
            for (offset, tile) in corner.adjacent_tiles().iter() {
                assert_eq!(tile.corner(offset.opposite()), corner);
            }
        }

        let adjacent = even.adjacent_tiles();
        assert!(adjacent.get(HexOffset::Top).is_none());
        assert_eq!(adjacent.get(HexOffset::Bottom), Some(TileCoord::new(0, 0)));
    }

    #[test]
    fn test_corner_world_position_matches_tile_corner() {
        for tile in sample_tiles() {
            for offset in HexOffset::ALL {
                assert_close(tile.corner(offset).to_world(), tile.corner_to_world(offset));
            }
        }
    }

    #[test]
    fn test_corner_is_one_radius_from_tile_center() {
        let radius = 2.0 * CORNER_OFFSET;
        let tile = TileCoord::new(2, -1);
        for offset in HexOffset::ALL {
            let distance = tile.to_world().distance_to(&tile.corner_to_world(offset));
            assert!((distance - radius).abs() < EPSILON);
        }
    }

    #[test]
    fn test_edge_location_is_midpoint_of_endpoints() {
        for tile in sample_tiles() {
            for corner_offset in HexOffset::ALL {
                let corner = tile.corner(corner_offset);
                for edge_offset in corner.edge_directions() {
                    let location = tile.edge_location(corner_offset, edge_offset);
                    let [a, b] = location.edge.endpoints().unwrap();
                    assert_close(location.position, a.to_world().midpoint(&b.to_world()));
                    assert_eq!(location.corner, corner);
                }
            }
        }
    }

    #[test]
    fn test_edge_rotation_follows_rank() {
        let tile = TileCoord::new(0, 0);
        for offset in HexOffset::ALL {
            let location = tile.edge_location(HexOffset::Top, offset);
            let expected = -std::f64::consts::PI / 3.0 * f64::from(offset.clockwise_rank());
            assert!((location.rotation - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_edge_location_from_edge_alone() {
        let tile = TileCoord::new(-1, 2);
        let location = tile.edge_location(HexOffset::LowerLeft, HexOffset::Top);
        let from_edge = location.edge.location();
        assert_close(location.position, from_edge.position);
        assert_eq!(location.rotation, from_edge.rotation);
    }

    #[test]
    fn test_left_side_named_from_either_corner() {
        let tile = TileCoord::new(0, 0);
        let from_below = tile.edge_location(HexOffset::LowerLeft, HexOffset::Top);
        let from_above = tile.edge_location(HexOffset::UpperLeft, HexOffset::Bottom);
        assert_close(from_below.position, from_above.position);
        assert_eq!(from_below.edge.canonical(), from_above.edge.canonical());
    }

    #[test]
    fn test_edge_canonical_equality() {
        for tile in sample_tiles() {
            for corner in tile.corners() {
                for direction in corner.edge_directions() {
                    let edge = EdgeCoord::new(corner, direction);
                    let other = corner.step(direction).unwrap();
                    let reverse = EdgeCoord::new(other, direction.opposite());
                    assert_eq!(edge.canonical(), reverse.canonical());
                    let canonical = edge.canonical().unwrap();
                    assert_eq!(canonical.canonical(), Some(canonical));
                }
            }
        }
    }

    #[test]
    fn test_invalid_edge_direction() {
        let even = CornerCoord::new(0, 0);
        assert!(even.step(HexOffset::Bottom).is_none());
        assert!(!EdgeCoord::new(even, HexOffset::UpperLeft).is_valid());
        assert!(EdgeCoord::new(even, HexOffset::Bottom).canonical().is_none());
    }

    #[test]
    fn test_edge_touching_tiles_share_corners() {
        let tile = TileCoord::new(1, 1);
        for corner in tile.corners() {
            for edge in corner.touching_edges() {
                let tiles = edge.touching_tiles().unwrap();
                assert_ne!(tiles[0], tiles[1]);
                for t in tiles {
                    let [a, b] = edge.endpoints().unwrap();
                    assert!(t.corners().contains(&a) && t.corners().contains(&b));
                }
            }
        }
    }

    #[test]
    fn test_corner_adjacent_corners() {
        let corner = CornerCoord::new(3, -1);
        let adjacent = corner.adjacent_corners();
        let unique: HashSet<_> = adjacent.iter().collect();
        assert_eq!(unique.len(), 3);
        for other in adjacent {
            assert_ne!(other, corner);
            assert!(other.adjacent_corners().contains(&corner));
            let spacing = corner.to_world().distance_to(&other.to_world());
            assert!((spacing - 2.0 * CORNER_OFFSET).abs() < EPSILON);
        }
    }

    #[test]
    fn test_neighbors_share_two_corners() {
        let tile = TileCoord::new(0, 0);
        let corners: HashSet<_> = tile.corners().into_iter().collect();
        for neighbor in tile.neighbors() {
            let shared = neighbor
                .corners()
                .iter()
                .filter(|c| corners.contains(*c))
                .count();
            assert_eq!(shared, 2, "{} should share an edge with {}", neighbor, tile);
        }
    }
}
