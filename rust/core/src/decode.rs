// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter decoders
//!
//! Convert raw string parameters into `f32` values and `V/T/N`
//! coordinate references. Errors carry the logical line number and the
//! zero-based parameter index they were decoding.

use crate::error::{CoordSlot, Error, Result};

/// Decoded face-vertex reference: `V`, `V/T`, `V//N` or `V/T/N`.
///
/// Indices are kept exactly as written; OBJ indices are 1-based and may be
/// negative (relative), neither of which is checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordReference {
    pub vertex: i64,
    pub tex_coord: Option<i64>,
    pub normal: Option<i64>,
}

impl CoordReference {
    pub fn new(vertex: i64) -> Self {
        Self {
            vertex,
            tex_coord: None,
            normal: None,
        }
    }

    pub fn with_tex_coord(mut self, index: i64) -> Self {
        self.tex_coord = Some(index);
        self
    }

    pub fn with_normal(mut self, index: i64) -> Self {
        self.normal = Some(index);
        self
    }

    #[inline]
    pub fn has_tex_coord(&self) -> bool {
        self.tex_coord.is_some()
    }

    #[inline]
    pub fn has_normal(&self) -> bool {
        self.normal.is_some()
    }
}

/// Decode a single-precision float parameter.
///
/// `inf`/`nan` spellings are accepted; finite literals that overflow `f32`
/// are not.
pub fn decode_float(text: &str, line: usize, index: usize) -> Result<f32> {
    let malformed = || Error::MalformedNumber {
        line,
        index,
        text: text.to_string(),
    };

    let value = fast_float::parse::<f32, _>(text).map_err(|_| malformed())?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(malformed());
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.trim_start_matches(|c| c == '+' || c == '-');
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Decode a `V[/[T][/[N]]]` coordinate reference parameter.
///
/// Slots beyond the third are ignored. An empty texture or normal slot
/// means "absent"; an empty vertex slot is malformed.
pub fn decode_coord_reference(text: &str, line: usize, index: usize) -> Result<CoordReference> {
    let bytes = text.as_bytes();
    let mut bounds = memchr::memchr_iter(b'/', bytes).chain(std::iter::once(bytes.len()));

    let mut slots: [Option<&str>; 3] = [None; 3];
    let mut start = 0;
    for slot in slots.iter_mut() {
        match bounds.next() {
            Some(end) => {
                *slot = Some(&text[start..end]);
                start = end + 1;
            }
            None => break,
        }
    }

    let malformed = |slot: CoordSlot| Error::MalformedIndex {
        line,
        index,
        slot,
        text: text.to_string(),
    };

    let vertex = parse_index(slots[0].unwrap_or_default())
        .ok_or_else(|| malformed(CoordSlot::Vertex))?;
    let tex_coord = optional_index(slots[1]).map_err(|_| malformed(CoordSlot::TexCoord))?;
    let normal = optional_index(slots[2]).map_err(|_| malformed(CoordSlot::Normal))?;

    Ok(CoordReference {
        vertex,
        tex_coord,
        normal,
    })
}

/// Absent or empty slot is `Ok(None)`; a non-empty slot must be an integer.
#[inline]
fn optional_index(slot: Option<&str>) -> std::result::Result<Option<i64>, ()> {
    match slot {
        Some(text) if !text.is_empty() => parse_index(text).map(Some).ok_or(()),
        _ => Ok(None),
    }
}

#[inline]
fn parse_index(text: &str) -> Option<i64> {
    lexical_core::parse::<i64>(text.as_bytes()).ok()
}
