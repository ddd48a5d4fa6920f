//! Balanced random pools for land tiles, number tokens and harbors.
//!
//! Every pool is built deterministically from its size and then shuffled with the
//! caller's RNG, so the multiset of a pool never depends on the seed.

use crate::board::{HarborType, HexType, Resource};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Token numbers ranked by how often two dice roll them, most likely first
pub const TOKEN_NUMBERS: [u8; 10] = [6, 8, 5, 9, 4, 10, 3, 11, 2, 12];

/// Number of dice combinations that roll `token` (the dots printed under it)
pub fn pip_count(token: u8) -> u8 {
    6u8.saturating_sub(token.abs_diff(7))
}

/// 6 and 8 are drawn highlighted
pub fn is_high_yield(token: u8) -> bool {
    matches!(token, 6 | 8)
}

/// One land tile waiting to be placed on the board.
///
/// A token is carried only by producing tiles, so a desert can never hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSeed {
    Desert,
    Resource { resource: Resource, token: u8 },
}

impl TileSeed {
    pub fn hex_type(&self) -> HexType {
        match self {
            TileSeed::Desert => HexType::Desert,
            TileSeed::Resource { resource, .. } => HexType::from(*resource),
        }
    }

    pub fn resource(&self) -> Option<Resource> {
        match self {
            TileSeed::Desert => None,
            TileSeed::Resource { resource, .. } => Some(*resource),
        }
    }

    pub fn token(&self) -> Option<u8> {
        match self {
            TileSeed::Desert => None,
            TileSeed::Resource { token, .. } => Some(*token),
        }
    }
}

/// Spreads `count` items over `values`: an even share each, then one extra for
/// the first `count % len` values.
fn balanced<T: Copy>(values: &[T], count: usize) -> Vec<T> {
    if values.is_empty() {
        return Vec::new();
    }
    let each = count / values.len();
    let mut pool: Vec<T> = values
        .iter()
        .flat_map(|&value| std::iter::repeat(value).take(each))
        .collect();
    pool.extend(values.iter().take(count % values.len()).copied());
    pool
}

/// Unshuffled resources for `count` producing tiles
pub fn resource_pool(count: usize) -> Vec<Resource> {
    balanced(&Resource::ALL, count)
}

/// Unshuffled number tokens for `count` producing tiles
pub fn token_pool(count: usize) -> Vec<u8> {
    balanced(&TOKEN_NUMBERS, count)
}

/// Unshuffled harbors for `total_harbors` slots.
///
/// Half the harbors (rounded up) are split evenly between the resources; whatever
/// the split leaves over becomes 3:1.
pub fn harbor_pool(total_harbors: usize) -> Vec<HarborType> {
    let half = (total_harbors + 1) / 2;
    let each = half / Resource::ALL.len();
    let mut pool: Vec<HarborType> = Resource::ALL
        .iter()
        .flat_map(|&resource| std::iter::repeat(HarborType::Resource(resource)).take(each))
        .collect();
    pool.resize(total_harbors, HarborType::ThreeToOne);
    pool
}

/// Shuffled land tiles for a board with `total_tiles` land hexes.
///
/// Exactly one tile is a desert; every other tile gets a resource and a token.
pub fn generate_tiles<R: Rng + ?Sized>(total_tiles: usize, rng: &mut R) -> Vec<TileSeed> {
    if total_tiles == 0 {
        return Vec::new();
    }
    let producing = total_tiles - 1;

    let mut kinds: Vec<Option<Resource>> = std::iter::once(None)
        .chain(resource_pool(producing).into_iter().map(Some))
        .collect();
    kinds.shuffle(rng);

    let mut tokens = token_pool(producing);
    tokens.shuffle(rng);

    kinds
        .into_iter()
        .filter_map(|kind| match kind {
            None => Some(TileSeed::Desert),
            Some(resource) => tokens
                .pop()
                .map(|token| TileSeed::Resource { resource, token }),
        })
        .collect()
}

/// Shuffled harbors for `total_harbors` slots
pub fn generate_harbors<R: Rng + ?Sized>(total_harbors: usize, rng: &mut R) -> Vec<HarborType> {
    let mut harbors = harbor_pool(total_harbors);
    harbors.shuffle(rng);
    harbors
}
