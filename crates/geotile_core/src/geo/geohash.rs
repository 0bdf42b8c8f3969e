//! Geohash codec: interleaved-bisection encoding, bounding-box decoding and
//! neighbor derivation.
//!
//! A geohash is built by repeatedly halving the longitude and latitude ranges,
//! longitude first, recording one bit per halving. Every five bits become one
//! character of the base-32 alphabet below. Because each extra character only
//! subdivides the current cell, a shorter hash of a point is always a prefix of
//! a longer hash of the same point.

use crate::error::GeoError;
use crate::types::Coordinate;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// The geohash base-32 alphabet (no `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Practical precision ceiling. Beyond twelve characters the cell is smaller
/// than an `f64` can meaningfully resolve; longer hashes are still produced
/// on request but carry no extra information.
pub const MAX_PRECISION: usize = 12;

const BITS_PER_CHAR: u8 = 5;

/// Neighbor list with inline storage for the usual eight cells.
pub type NeighborList = SmallVec<[Geohash; 8]>;

/// A validated geohash string.
///
/// Stored inline for any practical precision, so tagging and cloning hashes
/// does not allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Geohash(CompactString);

impl Geohash {
    /// Returns the hash as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters in the hash.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the hash is empty (the whole-world cell).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Precision of the hash, identical to its length.
    pub fn precision(&self) -> usize {
        self.len()
    }

    /// Decodes this hash into the cell it covers.
    pub fn bounding_box(&self) -> BoundingBox {
        // Characters were validated on construction.
        replay_bits(self.as_str().bytes().map(|b| char_index(b).unwrap_or(0)))
    }

    /// Returns the up-to-eight surrounding cells at the same precision. The
    /// whole-world cell has none.
    pub fn neighbors(&self) -> NeighborList {
        neighbors_of(self)
    }

    /// Returns the enclosing cell one precision level up, or `None` for the
    /// whole-world cell.
    pub fn parent(&self) -> Option<Geohash> {
        if self.is_empty() {
            return None;
        }
        let mut parent = self.0.clone();
        parent.pop();
        Some(Geohash(parent))
    }

    /// Whether this cell contains (or equals) `other`.
    pub fn is_prefix_of(&self, other: &Geohash) -> bool {
        other.as_str().starts_with(self.as_str())
    }
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Geohash {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Geohash {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)?;
        Ok(Geohash(CompactString::new(s)))
    }
}

impl TryFrom<String> for Geohash {
    type Error = GeoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Geohash> for String {
    fn from(hash: Geohash) -> Self {
        hash.0.into()
    }
}

impl PartialEq<str> for Geohash {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Geohash {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Latitude/longitude rectangle covered by a geohash cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// The whole-world box every encode/decode starts from.
    pub const WORLD: BoundingBox = BoundingBox {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Midpoint of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }

    /// Height of the box in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Width of the box in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Whether `point` lies inside the box (edges inclusive).
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.lat_min
            && point.latitude <= self.lat_max
            && point.longitude >= self.lon_min
            && point.longitude <= self.lon_max
    }

    /// External `[latMin, latMax, lonMin, lonMax]` form.
    pub fn as_array(&self) -> [f64; 4] {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
    }
}

/// Encodes a point as a geohash of `precision` characters.
///
/// Longitude is bisected first, then latitude, alternating. A coordinate at or
/// above the midpoint emits a `1` bit and keeps the upper half. Coordinates
/// are not range-checked; NaN input yields an all-zero-bit hash.
///
/// # Errors
///
/// Returns [`GeoError::InvalidPrecision`] when `precision` is zero.
///
/// # Example
///
/// ```rust
/// use geotile_core::geo::geohash::encode;
///
/// let hash = encode(1.29027, 103.851959, 7)?;
/// assert_eq!(hash.len(), 7);
/// # Ok::<(), geotile_core::GeoError>(())
/// ```
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<Geohash, GeoError> {
    NonZeroUsize::new(precision)
        .map(|p| encode_nonzero(lat, lon, p))
        .ok_or(GeoError::InvalidPrecision(precision))
}

/// Infallible form of [`encode`] for precisions known to be positive.
pub fn encode_nonzero(lat: f64, lon: f64, precision: NonZeroUsize) -> Geohash {
    let precision = precision.get();
    let mut bounds = BoundingBox::WORLD;
    let mut hash = CompactString::with_capacity(precision.min(MAX_PRECISION));
    let mut even_bit = true;
    let mut bit = 0u8;
    let mut idx = 0usize;

    while hash.len() < precision {
        if even_bit {
            let mid = (bounds.lon_min + bounds.lon_max) / 2.0;
            if lon >= mid {
                idx = idx * 2 + 1;
                bounds.lon_min = mid;
            } else {
                idx *= 2;
                bounds.lon_max = mid;
            }
        } else {
            let mid = (bounds.lat_min + bounds.lat_max) / 2.0;
            if lat >= mid {
                idx = idx * 2 + 1;
                bounds.lat_min = mid;
            } else {
                idx *= 2;
                bounds.lat_max = mid;
            }
        }

        even_bit = !even_bit;
        bit += 1;
        if bit == BITS_PER_CHAR {
            hash.push(BASE32[idx] as char);
            bit = 0;
            idx = 0;
        }
    }

    Geohash(hash)
}

/// Decodes a geohash string into the bounding box of its cell.
///
/// An empty string decodes to [`BoundingBox::WORLD`].
///
/// # Errors
///
/// Returns [`GeoError::InvalidGeohashCharacter`] for the first character
/// outside the alphabet. Matching is case-sensitive.
pub fn decode_bounding_box(hash: &str) -> Result<BoundingBox, GeoError> {
    let indices = hash
        .chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(character)
                .ok()
                .and_then(char_index)
                .ok_or(GeoError::InvalidGeohashCharacter { character, position })
        })
        .collect::<Result<SmallVec<[usize; MAX_PRECISION]>, _>>()?;

    Ok(replay_bits(indices))
}

/// Returns the distinct cells surrounding `hash` at the same precision.
///
/// Steps one full cell span from the cell center in the four cardinal and four
/// diagonal directions and re-encodes each point. Duplicates and the input
/// itself are removed, so near the poles the list can be shorter than eight.
/// Longitude is not wrapped across the antimeridian.
///
/// # Errors
///
/// Returns [`GeoError::InvalidGeohashCharacter`] when `hash` is malformed and
/// [`GeoError::InvalidPrecision`] for the empty (whole-world) hash.
pub fn neighbors(hash: &str) -> Result<NeighborList, GeoError> {
    let origin: Geohash = hash.parse()?;
    if origin.is_empty() {
        return Err(GeoError::InvalidPrecision(0));
    }
    Ok(neighbors_of(&origin))
}

fn neighbors_of(origin: &Geohash) -> NeighborList {
    let bbox = origin.bounding_box();
    let center = bbox.center();
    let lat_span = bbox.lat_span();
    let lon_span = bbox.lon_span();
    let Some(precision) = NonZeroUsize::new(origin.precision()) else {
        return NeighborList::new();
    };

    // N, S, E, W, NE, NW, SE, SW
    let steps: [(f64, f64); 8] = [
        (lat_span, 0.0),
        (-lat_span, 0.0),
        (0.0, lon_span),
        (0.0, -lon_span),
        (lat_span, lon_span),
        (lat_span, -lon_span),
        (-lat_span, lon_span),
        (-lat_span, -lon_span),
    ];

    let mut out = NeighborList::new();
    for (dlat, dlon) in steps {
        let candidate = encode_nonzero(center.latitude + dlat, center.longitude + dlon, precision);
        if &candidate != origin && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

fn validate(hash: &str) -> Result<(), GeoError> {
    for (position, character) in hash.chars().enumerate() {
        let valid = u8::try_from(character).ok().and_then(char_index).is_some();
        if !valid {
            return Err(GeoError::InvalidGeohashCharacter { character, position });
        }
    }
    Ok(())
}

fn char_index(byte: u8) -> Option<usize> {
    BASE32.iter().position(|&c| c == byte)
}

fn replay_bits(indices: impl IntoIterator<Item = usize>) -> BoundingBox {
    let mut bounds = BoundingBox::WORLD;
    let mut even_bit = true;

    for idx in indices {
        for n in (0..BITS_PER_CHAR).rev() {
            let bit = (idx >> n) & 1;
            if even_bit {
                let mid = (bounds.lon_min + bounds.lon_max) / 2.0;
                if bit == 1 {
                    bounds.lon_min = mid;
                } else {
                    bounds.lon_max = mid;
                }
            } else {
                let mid = (bounds.lat_min + bounds.lat_max) / 2.0;
                if bit == 1 {
                    bounds.lat_min = mid;
                } else {
                    bounds.lat_max = mid;
                }
            }
            even_bit = !even_bit;
        }
    }

    bounds
}
