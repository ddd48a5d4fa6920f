//! Board model and procedural board generation.
//!
//! This module contains:
//! - Resource, hex and harbor types
//! - `BoardShape`, the length/width pair that fixes which tiles are land
//! - `Board`, the generated tiles, ocean ring, harbors and structure ghosts
//! - Claim operations used while players build on the board
//!
//! A board is a hexagon-ish blob of land rows. The centre row (`y = 0`) holds
//! `length` tiles and each row further out loses one tile, for `width` rows on each
//! side. One ring of ocean surrounds the land and carries the harbors.

use crate::distribution::{generate_harbors, generate_tiles, TileSeed};
use crate::ghosts::{GhostDeriver, StructureKind, StructurePlaceholder, StructureSite};
use crate::hex::{CornerCoord, EdgeCoord, EdgeLocation, HexOffset, TileCoord, WorldPos};
use crate::player::PlayerId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use thiserror::Error;
use tracing::{debug, warn};

/// Resources produced by land tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Brick,
    Lumber,
    Grain,
    Wool,
    Ore,
}

impl Resource {
    /// All resource types, in the order leftover tiles are handed out
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Lumber,
        Resource::Grain,
        Resource::Wool,
        Resource::Ore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Brick => "brick",
            Resource::Lumber => "lumber",
            Resource::Grain => "grain",
            Resource::Wool => "wool",
            Resource::Ore => "ore",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of hex tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexType {
    Grain,
    Wool,
    Lumber,
    Brick,
    Ore,
    /// Produces nothing; the robber starts here
    Desert,
    /// Surrounds the land and carries harbors
    Ocean,
}

impl HexType {
    /// The five producing types
    pub const RESOURCE_TYPES: [HexType; 5] = [
        HexType::Grain,
        HexType::Wool,
        HexType::Lumber,
        HexType::Brick,
        HexType::Ore,
    ];

    pub const ALL: [HexType; 7] = [
        HexType::Grain,
        HexType::Wool,
        HexType::Lumber,
        HexType::Brick,
        HexType::Ore,
        HexType::Desert,
        HexType::Ocean,
    ];

    /// The resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            HexType::Grain => Some(Resource::Grain),
            HexType::Wool => Some(Resource::Wool),
            HexType::Lumber => Some(Resource::Lumber),
            HexType::Brick => Some(Resource::Brick),
            HexType::Ore => Some(Resource::Ore),
            HexType::Desert | HexType::Ocean => None,
        }
    }

    pub fn is_land(&self) -> bool {
        !matches!(self, HexType::Ocean)
    }

    pub fn is_productive(&self) -> bool {
        self.resource().is_some()
    }

    /// Base colour of the hex mesh
    pub fn color_code(&self) -> u32 {
        match self {
            HexType::Lumber => 0x336E14,
            HexType::Brick => 0x8F482B,
            HexType::Grain => 0xA49940,
            HexType::Ore => 0x353C3E,
            HexType::Wool => 0x4D8C2B,
            HexType::Desert => 0xCBBD93,
            HexType::Ocean => 0x42B9F5,
        }
    }
}

impl From<Resource> for HexType {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Brick => HexType::Brick,
            Resource::Lumber => HexType::Lumber,
            Resource::Grain => HexType::Grain,
            Resource::Wool => HexType::Wool,
            Resource::Ore => HexType::Ore,
        }
    }
}

/// Harbor types for maritime trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HarborType {
    /// 3:1 trade any resource
    ThreeToOne,
    /// 2:1 trade for a specific resource
    Resource(Resource),
}

impl HarborType {
    /// The exchange rate for this harbor
    pub fn rate(&self) -> u32 {
        match self {
            HarborType::ThreeToOne => 3,
            HarborType::Resource(_) => 2,
        }
    }

    /// Text painted on the harbor sign
    pub fn label(&self) -> String {
        match self {
            HarborType::ThreeToOne => "3:1".to_string(),
            HarborType::Resource(resource) => format!("2:1 {resource}"),
        }
    }
}

/// A harbor attached to one side of an ocean tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarborPlacement {
    pub harbor_type: HarborType,
    /// Corner of the ocean tile the harbor edge starts from
    pub corner: HexOffset,
    /// Direction of the harbor edge from that corner
    pub edge: HexOffset,
}

/// A single hex tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub coord: TileCoord,
    pub hex_type: HexType,
    /// Present exactly when the tile produces a resource
    pub token: Option<u8>,
    /// Only ever set on ocean tiles
    pub harbor: Option<HarborPlacement>,
}

impl TileRecord {
    /// A land tile filled from a generated seed
    pub fn land(coord: TileCoord, seed: TileSeed) -> Self {
        Self {
            coord,
            hex_type: seed.hex_type(),
            token: seed.token(),
            harbor: None,
        }
    }

    pub fn ocean(coord: TileCoord) -> Self {
        Self {
            coord,
            hex_type: HexType::Ocean,
            token: None,
            harbor: None,
        }
    }

    pub fn resource(&self) -> Option<Resource> {
        self.hex_type.resource()
    }

    pub fn world_position(&self) -> WorldPos {
        self.coord.to_world()
    }

    /// The edge the harbor is drawn on
    pub fn harbor_edge(&self) -> Option<EdgeCoord> {
        self.harbor
            .map(|h| EdgeCoord::new(self.coord.corner(h.corner), h.edge))
    }

    /// World position and rotation of the harbor
    pub fn harbor_location(&self) -> Option<EdgeLocation> {
        self.harbor
            .map(|h| self.coord.edge_location(h.corner, h.edge))
    }
}

/// Which side of the board a resize applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Width,
}

/// Longest centre row a board may have
pub const MAX_LENGTH: u16 = 64;

/// Length of the centre row and number of rows on each side of it.
///
/// The width is always smaller than the length, so every row holds at least one
/// tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoardShape {
    length: u16,
    width: u16,
}

impl BoardShape {
    /// Clamps `length` to `1..=MAX_LENGTH` and `width` to at most `length - 1`
    pub fn new(length: u16, width: u16) -> Self {
        let length = length.clamp(1, MAX_LENGTH);
        Self {
            length,
            width: width.min(length - 1),
        }
    }

    /// The classic 19 tile board
    pub fn standard() -> Self {
        Self::new(5, 2)
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of land tiles
    pub fn land_tile_count(&self) -> usize {
        let mut total = usize::from(self.length);
        let mut row = usize::from(self.length) - 1;
        for _ in 0..self.width {
            if row == 0 {
                break;
            }
            total += 2 * row;
            row -= 1;
        }
        total
    }

    /// Number of ocean tiles that get a harbor
    pub fn harbor_slot_count(&self) -> usize {
        let length = usize::from(self.length);
        let width = usize::from(self.width);
        1 + 2 * width + 2 * ((length - width + 1) / 2)
    }

    fn start_offset(&self) -> i32 {
        -(i32::from(self.length) / 2)
    }

    /// Half-open `x` range of the land in row `y`
    pub fn row_bounds(&self, y: i32) -> Range<i32> {
        let start = self.start_offset();
        let left = start + y.min(0).abs();
        let right = start + i32::from(self.length) - y.max(0).abs();
        left..right
    }

    /// Land coordinates, row by row from `-width` to `width`
    pub fn land_coords(&self) -> Vec<TileCoord> {
        let width = i32::from(self.width);
        (-width..=width)
            .flat_map(|y| self.row_bounds(y).map(move |x| TileCoord::new(x, y)))
            .collect()
    }

    /// The shape after growing or shrinking one dimension, or `None` when the result
    /// would leave no land, exceed `MAX_LENGTH`, or have a width that reaches the
    /// length.
    pub fn resized(&self, dimension: Dimension, amount: i32) -> Option<BoardShape> {
        let (length, width) = match dimension {
            Dimension::Length => (i32::from(self.length) + amount, i32::from(self.width)),
            Dimension::Width => (i32::from(self.length), i32::from(self.width) + amount),
        };
        if length <= 0 || length > i32::from(MAX_LENGTH) || width < 0 || width >= length {
            return None;
        }
        Some(BoardShape {
            length: u16::try_from(length).ok()?,
            width: u16::try_from(width).ok()?,
        })
    }
}

impl Default for BoardShape {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for BoardShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// Errors from querying or building on a generated board
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("no tile at {0}")]
    TileNotFound(TileCoord),

    #[error("the robber cannot stand on the ocean at {0}")]
    RobberOnOcean(TileCoord),

    #[error("no structure at {0}")]
    StructureNotFound(StructureSite),

    #[error("{site} is already claimed by player {owner}")]
    AlreadyClaimed { site: StructureSite, owner: PlayerId },

    #[error("{0} has not been claimed")]
    Unclaimed(StructureSite),

    #[error("{0} is already built")]
    AlreadyInstantiated(StructureSite),

    #[error("a {kind:?} cannot stand at {site}")]
    KindMismatch {
        site: StructureSite,
        kind: StructureKind,
    },
}

/// Slot on the outer ocean rows: `column` counts from the first ocean tile of the
/// row, `last` marks the final tile.
fn outer_row_harbor(near_side: bool, column: i32, last: bool) -> Option<(HexOffset, HexOffset)> {
    use HexOffset::*;
    match (near_side, column.rem_euclid(4)) {
        (true, 3) => Some((UpperLeft, UpperRight)),
        (true, 1) if last => Some((UpperLeft, UpperRight)),
        (true, 1) => Some((Top, LowerRight)),
        (false, 1) if last => Some((Bottom, UpperLeft)),
        (false, 1) => Some((LowerRight, LowerLeft)),
        (false, 3) => Some((Bottom, UpperLeft)),
        _ => None,
    }
}

/// Slot on an inner row's ocean ends. Even rows use the left end, odd rows the right.
fn side_harbor(y: i32) -> (bool, (HexOffset, HexOffset)) {
    use HexOffset::*;
    if y.rem_euclid(2) == 1 {
        return (false, (LowerLeft, Top));
    }
    let slot = match y.signum() {
        1 => (LowerRight, LowerLeft),
        -1 => (Top, LowerRight),
        _ => (UpperRight, Bottom),
    };
    (true, slot)
}

/// A generated board
#[derive(Debug, Clone)]
pub struct Board {
    shape: BoardShape,
    tiles: HashMap<TileCoord, TileRecord>,
    land_order: Vec<TileCoord>,
    ocean_order: Vec<TileCoord>,
    settlements: HashMap<CornerCoord, StructurePlaceholder>,
    roads: HashMap<EdgeCoord, StructurePlaceholder>,
    robber: Option<TileCoord>,
}

impl Board {
    fn empty(shape: BoardShape) -> Self {
        Self {
            shape,
            tiles: HashMap::new(),
            land_order: Vec::new(),
            ocean_order: Vec::new(),
            settlements: HashMap::new(),
            roads: HashMap::new(),
            robber: None,
        }
    }

    /// Create the standard board with randomized tiles, tokens and harbors
    pub fn standard() -> Self {
        let mut rng = rand::thread_rng();
        Self::standard_with_rng(&mut rng)
    }

    /// Create the standard board with a provided RNG
    pub fn standard_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate(BoardShape::standard(), rng)
    }

    /// Generate a board of the given shape.
    ///
    /// Land tiles are laid row by row, then every land tile's corners and edges get
    /// ghosts, then the ocean ring is walked and harbors are attached to it.
    pub fn generate<R: Rng + ?Sized>(shape: BoardShape, rng: &mut R) -> Self {
        let mut board = Self::empty(shape);

        let mut seeds = generate_tiles(shape.land_tile_count(), rng);
        for coord in shape.land_coords() {
            match seeds.pop() {
                Some(seed) => board.insert_land(coord, seed),
                None => warn!(%coord, "tile pool ran dry, leaving slot empty"),
            }
        }

        board.derive_ghosts();

        let mut harbors = generate_harbors(shape.harbor_slot_count(), rng);
        board.surround_with_ocean(&mut harbors);

        debug!(
            %shape,
            land = board.land_order.len(),
            ocean = board.ocean_order.len(),
            harbors = board.harbors().count(),
            settlements = board.settlements.len(),
            roads = board.roads.len(),
            "generated board"
        );
        board
    }

    fn insert_land(&mut self, coord: TileCoord, seed: TileSeed) {
        if seed == TileSeed::Desert && self.robber.is_none() {
            self.robber = Some(coord);
        }
        self.tiles.insert(coord, TileRecord::land(coord, seed));
        self.land_order.push(coord);
    }

    fn derive_ghosts(&mut self) {
        let land = &self.tiles;
        let mut deriver = GhostDeriver::new();
        let mut settlements = HashMap::new();
        let mut roads = HashMap::new();

        for coord in &self.land_order {
            for ghost in deriver.derive(*coord, |tile| land.contains_key(tile)) {
                match ghost.site {
                    StructureSite::Corner(corner) => {
                        settlements.insert(corner, ghost);
                    }
                    StructureSite::Edge(edge) => {
                        roads.insert(edge, ghost);
                    }
                }
            }
        }

        self.settlements = settlements;
        self.roads = roads;
    }

    // ====== Ocean ring ======

    fn surround_with_ocean(&mut self, harbors: &mut Vec<HarborType>) {
        let width = i32::from(self.shape.width);

        for y in (-width - 1)..=(width + 1) {
            let bounds = self.shape.row_bounds(y);
            let first = bounds.start - 1;
            let last = bounds.end;

            if y.abs() == width + 1 {
                for x in first..=last {
                    let slot = outer_row_harbor(y < 0, x - first, x == last);
                    self.place_ocean(TileCoord::new(x, y), slot, harbors);
                }
            } else {
                let (on_left, slot) = side_harbor(y);
                self.place_ocean(TileCoord::new(first, y), on_left.then_some(slot), harbors);
                self.place_ocean(TileCoord::new(last, y), (!on_left).then_some(slot), harbors);
            }
        }
    }

    fn place_ocean(
        &mut self,
        coord: TileCoord,
        slot: Option<(HexOffset, HexOffset)>,
        harbors: &mut Vec<HarborType>,
    ) {
        let mut tile = TileRecord::ocean(coord);
        if let Some((corner, edge)) = slot {
            match harbors.pop() {
                Some(harbor_type) => {
                    tile.harbor = Some(HarborPlacement {
                        harbor_type,
                        corner,
                        edge,
                    });
                }
                None => warn!(%coord, "harbor pool ran dry, leaving slot empty"),
            }
        }
        self.tiles.insert(coord, tile);
        self.ocean_order.push(coord);
    }

    // ====== Queries ======

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn tile(&self, coord: &TileCoord) -> Option<&TileRecord> {
        self.tiles.get(coord)
    }

    /// Land tiles in generation order
    pub fn land_tiles(&self) -> impl Iterator<Item = &TileRecord> {
        self.land_order.iter().filter_map(|c| self.tiles.get(c))
    }

    /// Ocean ring in generation order
    pub fn ocean_tiles(&self) -> impl Iterator<Item = &TileRecord> {
        self.ocean_order.iter().filter_map(|c| self.tiles.get(c))
    }

    /// Every tile, land first
    pub fn tiles(&self) -> impl Iterator<Item = &TileRecord> {
        self.land_tiles().chain(self.ocean_tiles())
    }

    /// Ocean tiles that carry a harbor
    pub fn harbors(&self) -> impl Iterator<Item = &TileRecord> {
        self.ocean_tiles().filter(|t| t.harbor.is_some())
    }

    pub fn is_land(&self, coord: &TileCoord) -> bool {
        self.tiles.get(coord).is_some_and(|t| t.hex_type.is_land())
    }

    pub fn settlement(&self, corner: &CornerCoord) -> Option<&StructurePlaceholder> {
        self.settlements.get(corner)
    }

    /// Road on `edge`, named from either of its ends
    pub fn road(&self, edge: &EdgeCoord) -> Option<&StructurePlaceholder> {
        self.roads.get(&edge.canonical()?)
    }

    pub fn structure(&self, site: &StructureSite) -> Option<&StructurePlaceholder> {
        match site {
            StructureSite::Corner(corner) => self.settlement(corner),
            StructureSite::Edge(edge) => self.road(edge),
        }
    }

    pub fn settlements(&self) -> impl Iterator<Item = &StructurePlaceholder> {
        self.settlements.values()
    }

    pub fn roads(&self) -> impl Iterator<Item = &StructurePlaceholder> {
        self.roads.values()
    }

    /// Land tiles showing `token`, in generation order
    pub fn tiles_with_token(&self, token: u8) -> Vec<&TileRecord> {
        self.land_tiles()
            .filter(|t| t.token == Some(token))
            .collect()
    }

    /// Tiles that produce on `roll`; the tile under the robber does not
    pub fn producing_tiles(&self, roll: u8) -> Vec<&TileRecord> {
        self.tiles_with_token(roll)
            .into_iter()
            .filter(|t| Some(t.coord) != self.robber)
            .collect()
    }

    pub fn robber(&self) -> Option<TileCoord> {
        self.robber
    }

    /// Structures owned by `player`
    pub fn structures_of(&self, player: PlayerId) -> Vec<&StructurePlaceholder> {
        self.settlements
            .values()
            .chain(self.roads.values())
            .filter(|s| s.owner == Some(player))
            .collect()
    }

    // ====== Robber ======

    /// Moves the robber and returns where it stood before
    pub fn move_robber(&mut self, target: TileCoord) -> Result<Option<TileCoord>, BoardError> {
        let tile = self
            .tiles
            .get(&target)
            .ok_or(BoardError::TileNotFound(target))?;
        if !tile.hex_type.is_land() {
            return Err(BoardError::RobberOnOcean(target));
        }
        Ok(self.robber.replace(target))
    }

    // ====== Structures ======

    fn structure_mut(&mut self, site: &StructureSite) -> Result<&mut StructurePlaceholder, BoardError> {
        let found = match site {
            StructureSite::Corner(corner) => self.settlements.get_mut(corner),
            StructureSite::Edge(edge) => match edge.canonical() {
                Some(key) => self.roads.get_mut(&key),
                None => None,
            },
        };
        found.ok_or(BoardError::StructureNotFound(*site))
    }

    /// Marks a ghost as claimed by `player`. Claiming your own claim again is a no-op.
    pub fn claim_structure(
        &mut self,
        site: StructureSite,
        player: PlayerId,
    ) -> Result<StructurePlaceholder, BoardError> {
        let structure = self.structure_mut(&site)?;
        match structure.owner {
            Some(owner) if owner != player => Err(BoardError::AlreadyClaimed { site, owner }),
            _ => {
                structure.owner = Some(player);
                Ok(*structure)
            }
        }
    }

    /// Switches a claimed corner between settlement and city
    pub fn set_structure_kind(
        &mut self,
        corner: CornerCoord,
        kind: StructureKind,
    ) -> Result<StructurePlaceholder, BoardError> {
        let site = StructureSite::Corner(corner);
        if !kind.is_corner_kind() {
            return Err(BoardError::KindMismatch { site, kind });
        }
        let structure = self.structure_mut(&site)?;
        if structure.owner.is_none() {
            return Err(BoardError::Unclaimed(site));
        }
        structure.kind = kind;
        Ok(*structure)
    }

    /// Turns a claimed ghost into a built piece
    pub fn instantiate_structure(
        &mut self,
        site: StructureSite,
    ) -> Result<StructurePlaceholder, BoardError> {
        let structure = self.structure_mut(&site)?;
        if structure.owner.is_none() {
            return Err(BoardError::Unclaimed(site));
        }
        if structure.instantiated {
            return Err(BoardError::AlreadyInstantiated(site));
        }
        structure.instantiated = true;
        Ok(*structure)
    }

    /// Returns a structure to an unowned ghost
    pub fn release_structure(
        &mut self,
        site: StructureSite,
    ) -> Result<StructurePlaceholder, BoardError> {
        let structure = self.structure_mut(&site)?;
        structure.release();
        Ok(*structure)
    }

    /// Releases every claim that was never built and returns the released sites
    pub fn release_unbuilt_claims(&mut self) -> Vec<StructureSite> {
        let mut released: Vec<StructureSite> = self
            .settlements
            .values_mut()
            .chain(self.roads.values_mut())
            .filter(|s| s.is_claimed() && !s.instantiated)
            .map(|s| {
                s.release();
                s.site
            })
            .collect();
        released.sort();
        released
    }

    /// Convert to a JSON-friendly representation with arrays instead of HashMaps
    /// This is needed because JSON doesn't support complex types as keys
    pub fn to_json_friendly(&self) -> BoardJson {
        let mut settlements: Vec<StructurePlaceholder> = self.settlements.values().copied().collect();
        settlements.sort_by_key(|s| s.site);
        let mut roads: Vec<StructurePlaceholder> = self.roads.values().copied().collect();
        roads.sort_by_key(|s| s.site);

        BoardJson {
            length: self.shape.length,
            width: self.shape.width,
            tiles: self
                .tiles()
                .map(|tile| TileJson {
                    x: tile.coord.x,
                    y: tile.coord.y,
                    hex_type: tile.hex_type,
                    token: tile.token,
                    harbor: tile.harbor,
                    has_robber: Some(tile.coord) == self.robber,
                    position: tile.world_position(),
                    color: tile.hex_type.color_code(),
                })
                .collect(),
            settlements,
            roads,
            robber: self.robber,
        }
    }
}

/// JSON-friendly board representation with arrays instead of HashMaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardJson {
    pub length: u16,
    pub width: u16,
    pub tiles: Vec<TileJson>,
    pub settlements: Vec<StructurePlaceholder>,
    pub roads: Vec<StructurePlaceholder>,
    pub robber: Option<TileCoord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    pub x: i32,
    pub y: i32,
    pub hex_type: HexType,
    pub token: Option<u8>,
    pub harbor: Option<HarborPlacement>,
    pub has_robber: bool,
    pub position: WorldPos,
    pub color: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded(shape: BoardShape, seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        Board::generate(shape, &mut rng)
    }

    fn all_shapes() -> impl Iterator<Item = BoardShape> {
        (1..=9u16).flat_map(|length| (0..length).map(move |width| BoardShape::new(length, width)))
    }

    #[test]
    fn test_standard_board_has_19_land_tiles() {
        let board = Board::standard();
        assert_eq!(board.land_tiles().count(), 19);
        assert_eq!(BoardShape::standard().land_tile_count(), 19);
    }

    #[test]
    fn test_standard_board_has_desert() {
        let board = seeded(BoardShape::standard(), 3);
        let deserts: Vec<_> = board
            .land_tiles()
            .filter(|t| t.hex_type == HexType::Desert)
            .collect();
        assert_eq!(deserts.len(), 1);
        assert_eq!(deserts[0].token, None);
    }

    #[test]
    fn test_robber_starts_on_desert() {
        let board = seeded(BoardShape::standard(), 11);
        let robber_tile = board.tile(&board.robber().unwrap()).unwrap();
        assert_eq!(robber_tile.hex_type, HexType::Desert);
    }

    #[test]
    fn test_standard_board_counts() {
        let board = seeded(BoardShape::standard(), 5);
        assert_eq!(board.settlements().count(), 54);
        assert_eq!(board.roads().count(), 72);
        assert_eq!(board.harbors().count(), 9);
        assert_eq!(board.ocean_tiles().count(), 18);

        let generic = board
            .harbors()
            .filter(|t| t.harbor.unwrap().harbor_type == HarborType::ThreeToOne)
            .count();
        assert_eq!(generic, 4);
    }

    #[test]
    fn test_standard_land_rows() {
        let shape = BoardShape::standard();
        assert_eq!(shape.row_bounds(0), -2..3);
        assert_eq!(shape.row_bounds(2), -2..1);
        assert_eq!(shape.row_bounds(-2), 0..3);
        assert_eq!(shape.land_coords()[0], TileCoord::new(0, -2));
        assert_eq!(shape.land_coords()[18], TileCoord::new(0, 2));
    }

    #[test]
    fn test_shape_clamping() {
        assert_eq!(BoardShape::new(0, 0), BoardShape::new(1, 0));
        assert_eq!(BoardShape::new(3, 7).width(), 2);
        assert_eq!(BoardShape::new(1, 4).width(), 0);
        assert_eq!(
            BoardShape::new(u16::MAX, u16::MAX),
            BoardShape::new(MAX_LENGTH, MAX_LENGTH - 1)
        );
        assert_eq!(BoardShape::new(u16::MAX, 3).length(), MAX_LENGTH);
    }

    #[test]
    fn test_land_count_formula() {
        for shape in all_shapes() {
            let length = usize::from(shape.length());
            let expected: usize =
                length + (1..=usize::from(shape.width())).map(|i| 2 * (length - i)).sum::<usize>();
            assert_eq!(shape.land_tile_count(), expected, "{shape}");
            assert_eq!(shape.land_coords().len(), expected, "{shape}");
            assert_eq!(seeded(shape, 0).land_tiles().count(), expected, "{shape}");
        }
    }

    #[test]
    fn test_token_iff_productive() {
        for shape in all_shapes() {
            let board = seeded(shape, 42);
            for tile in board.tiles() {
                assert_eq!(tile.token.is_some(), tile.hex_type.is_productive(), "{}", tile.coord);
                if tile.harbor.is_some() {
                    assert_eq!(tile.hex_type, HexType::Ocean);
                }
            }
        }
    }

    #[test]
    fn test_ocean_ring_is_exactly_the_coast() {
        for shape in all_shapes() {
            let board = seeded(shape, 1);
            let land: HashSet<TileCoord> = board.land_tiles().map(|t| t.coord).collect();
            let coast: HashSet<TileCoord> = land
                .iter()
                .flat_map(|t| t.neighbors())
                .filter(|n| !land.contains(n))
                .collect();
            let ocean: Vec<TileCoord> = board.ocean_tiles().map(|t| t.coord).collect();
            let ring: HashSet<TileCoord> = ocean.iter().copied().collect();
            assert_eq!(ring.len(), ocean.len(), "{shape}");
            assert_eq!(ring, coast, "{shape}");
        }
    }

    #[test]
    fn test_every_harbor_faces_land() {
        for shape in all_shapes() {
            let board = seeded(shape, 9);
            assert_eq!(board.harbors().count(), shape.harbor_slot_count(), "{shape}");
            for tile in board.harbors() {
                let edge = tile.harbor_edge().unwrap();
                let touching = edge.touching_tiles().expect("harbor edge exists");
                assert!(touching.contains(&tile.coord), "{shape} {edge}");
                let land = touching.iter().filter(|t| board.is_land(t)).count();
                assert_eq!(land, 1, "{shape} {edge}");
            }
        }
    }

    #[test]
    fn test_ghosts_cover_land_once() {
        for shape in all_shapes() {
            let board = seeded(shape, 2);

            let corners: HashSet<CornerCoord> =
                board.land_tiles().flat_map(|t| t.coord.corners()).collect();
            assert_eq!(board.settlements().count(), corners.len(), "{shape}");
            assert!(corners.iter().all(|c| board.settlement(c).is_some()));

            let edges: HashSet<EdgeCoord> = corners
                .iter()
                .flat_map(|c| c.touching_edges())
                .filter(|e| {
                    e.touching_tiles()
                        .is_some_and(|tiles| tiles.iter().any(|t| board.is_land(t)))
                })
                .collect();
            assert_eq!(board.roads().count(), edges.len(), "{shape}");
            assert!(edges.iter().all(|e| board.road(e).is_some()), "{shape}");
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = seeded(BoardShape::standard(), 77).to_json_friendly();
        let b = seeded(BoardShape::standard(), 77).to_json_friendly();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_tile_board() {
        let board = seeded(BoardShape::new(1, 0), 0);
        let tiles: Vec<_> = board.land_tiles().collect();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].hex_type, HexType::Desert);
        assert_eq!(board.ocean_tiles().count(), 6);
        assert_eq!(board.harbors().count(), 3);
        assert!(board
            .harbors()
            .all(|t| t.harbor.unwrap().harbor_type == HarborType::ThreeToOne));
    }

    #[test]
    fn test_harbor_slot_count() {
        assert_eq!(BoardShape::standard().harbor_slot_count(), 9);
        assert_eq!(BoardShape::new(1, 0).harbor_slot_count(), 3);
        assert_eq!(BoardShape::new(5, 1).harbor_slot_count(), 7);
    }

    #[test]
    fn test_resize() {
        let shape = BoardShape::standard();
        assert_eq!(shape.resized(Dimension::Length, 1), Some(BoardShape::new(6, 2)));
        assert_eq!(shape.resized(Dimension::Width, -2), Some(BoardShape::new(5, 0)));
        assert_eq!(shape.resized(Dimension::Width, 2), Some(BoardShape::new(5, 4)));
        assert_eq!(shape.resized(Dimension::Width, 3), None);
        assert_eq!(shape.resized(Dimension::Width, -3), None);
        assert_eq!(shape.resized(Dimension::Length, -3), None);
        assert_eq!(BoardShape::new(1, 0).resized(Dimension::Length, -1), None);

        let widest = BoardShape::new(MAX_LENGTH, 0);
        assert_eq!(widest.resized(Dimension::Length, 1), None);
        assert_eq!(
            widest.resized(Dimension::Length, -1),
            Some(BoardShape::new(MAX_LENGTH - 1, 0))
        );
    }

    #[test]
    fn test_move_robber() {
        let mut board = seeded(BoardShape::standard(), 4);
        let start = board.robber();
        let target = board
            .land_tiles()
            .map(|t| t.coord)
            .find(|c| Some(*c) != start)
            .unwrap();
        assert_eq!(board.move_robber(target), Ok(start));
        assert_eq!(board.robber(), Some(target));

        let ocean = board.ocean_tiles().next().unwrap().coord;
        assert_eq!(board.move_robber(ocean), Err(BoardError::RobberOnOcean(ocean)));

        let nowhere = TileCoord::new(40, 40);
        assert_eq!(board.move_robber(nowhere), Err(BoardError::TileNotFound(nowhere)));
        assert_eq!(board.robber(), Some(target));
    }

    #[test]
    fn test_producing_tiles_skip_robber() {
        let mut board = seeded(BoardShape::standard(), 8);
        let six = board.tiles_with_token(6);
        assert_eq!(six.len(), 2);
        let blocked = six[0].coord;
        board.move_robber(blocked).unwrap();
        let producing = board.producing_tiles(6);
        assert_eq!(producing.len(), 1);
        assert_ne!(producing[0].coord, blocked);
    }

    #[test]
    fn test_claim_and_build() {
        let mut board = seeded(BoardShape::standard(), 6);
        let corner = TileCoord::new(0, 0).corner(HexOffset::Top);
        let site = StructureSite::Corner(corner);

        assert_eq!(
            board.instantiate_structure(site),
            Err(BoardError::Unclaimed(site))
        );
        assert_eq!(board.claim_structure(site, 1).unwrap().owner, Some(1));
        assert!(board.claim_structure(site, 1).is_ok());
        assert_eq!(
            board.claim_structure(site, 2),
            Err(BoardError::AlreadyClaimed { site, owner: 1 })
        );

        let city = board.set_structure_kind(corner, StructureKind::City).unwrap();
        assert_eq!(city.kind, StructureKind::City);
        assert_eq!(
            board.set_structure_kind(corner, StructureKind::Road),
            Err(BoardError::KindMismatch {
                site,
                kind: StructureKind::Road
            })
        );

        assert!(board.instantiate_structure(site).unwrap().instantiated);
        assert_eq!(
            board.instantiate_structure(site),
            Err(BoardError::AlreadyInstantiated(site))
        );
        assert_eq!(board.structures_of(1).len(), 1);

        let released = board.release_structure(site).unwrap();
        assert_eq!(released, StructurePlaceholder::settlement_ghost(corner));
    }

    #[test]
    fn test_road_found_from_either_end() {
        let mut board = seeded(BoardShape::standard(), 6);
        let tile = TileCoord::new(0, 0);
        let left_side = tile.edge_location(HexOffset::LowerLeft, HexOffset::Top).edge;
        let same_side = tile.edge_location(HexOffset::UpperLeft, HexOffset::Bottom).edge;
        assert!(board.road(&left_side).is_some());
        assert_eq!(board.road(&left_side), board.road(&same_side));

        board
            .claim_structure(StructureSite::Edge(same_side), 3)
            .unwrap();
        assert_eq!(board.road(&left_side).unwrap().owner, Some(3));
    }

    #[test]
    fn test_release_unbuilt_claims() {
        let mut board = seeded(BoardShape::standard(), 6);
        let kept = StructureSite::Corner(TileCoord::new(0, 0).corner(HexOffset::Top));
        let dropped = StructureSite::Corner(TileCoord::new(1, 0).corner(HexOffset::Bottom));
        board.claim_structure(kept, 0).unwrap();
        board.instantiate_structure(kept).unwrap();
        board.claim_structure(dropped, 0).unwrap();

        assert_eq!(board.release_unbuilt_claims(), vec![dropped]);
        assert!(board.structure(&dropped).unwrap().is_ghost());
        assert_eq!(board.structure(&kept).unwrap().owner, Some(0));
    }

    #[test]
    fn test_missing_structure() {
        let mut board = seeded(BoardShape::standard(), 6);
        let far = StructureSite::Corner(CornerCoord::new(100, 100));
        assert_eq!(board.claim_structure(far, 0), Err(BoardError::StructureNotFound(far)));
        assert!(board.settlement(&CornerCoord::new(100, 100)).is_none());
    }

    #[test]
    fn test_json_friendly_board() {
        let board = seeded(BoardShape::standard(), 12);
        let json = board.to_json_friendly();
        assert_eq!(json.tiles.len(), 19 + 18);
        assert_eq!(json.settlements.len(), 54);
        assert_eq!(json.roads.len(), 72);
        assert_eq!(json.tiles.iter().filter(|t| t.has_robber).count(), 1);

        let text = serde_json::to_string(&json).unwrap();
        let back: BoardJson = serde_json::from_str(&text).unwrap();
        assert_eq!(back.robber, board.robber());
    }

    #[test]
    fn test_hex_type_helpers() {
        assert_eq!(HexType::RESOURCE_TYPES.len(), 5);
        assert!(HexType::RESOURCE_TYPES.iter().all(|t| t.is_productive()));
        assert!(!HexType::Desert.is_productive());
        assert!(HexType::Desert.is_land());
        assert!(!HexType::Ocean.is_land());
        assert_eq!(HexType::from(Resource::Ore), HexType::Ore);
        assert_eq!(HexType::Ocean.color_code(), 0x42B9F5);
        assert_eq!(HarborType::ThreeToOne.rate(), 3);
        assert_eq!(HarborType::Resource(Resource::Wool).rate(), 2);
        assert_eq!(HarborType::Resource(Resource::Wool).label(), "2:1 wool");
    }
}
