// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recognised OBJ statements and the element values decoded from them.

use std::fmt;

/// Statement keywords the scanner dispatches on. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjCommand {
    /// `v x y z [w]`
    Vertex,
    /// `vt u [v [w]]`
    TexCoord,
    /// `vn x y z`
    Normal,
    /// `o name`
    Object,
    /// `g name`
    Group,
    /// `f ref ref ref ...`
    Face,
    /// `mtllib file ...`
    MaterialLibrary,
    /// `usemtl [name]`; a bare `usemtl` selects no material
    MaterialReference,
}

impl ObjCommand {
    pub const ALL: [ObjCommand; 8] = [
        ObjCommand::Vertex,
        ObjCommand::TexCoord,
        ObjCommand::Normal,
        ObjCommand::Object,
        ObjCommand::Group,
        ObjCommand::Face,
        ObjCommand::MaterialLibrary,
        ObjCommand::MaterialReference,
    ];

    /// Look up a command by keyword (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.keyword() == name)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ObjCommand::Vertex => "v",
            ObjCommand::TexCoord => "vt",
            ObjCommand::Normal => "vn",
            ObjCommand::Object => "o",
            ObjCommand::Group => "g",
            ObjCommand::Face => "f",
            ObjCommand::MaterialLibrary => "mtllib",
            ObjCommand::MaterialReference => "usemtl",
        }
    }

    /// Inclusive parameter count bounds; `None` upper bound means unlimited.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            ObjCommand::Vertex => (3, Some(4)),
            ObjCommand::TexCoord => (1, Some(3)),
            ObjCommand::Normal => (3, Some(3)),
            ObjCommand::Object | ObjCommand::Group => (1, Some(1)),
            ObjCommand::MaterialReference => (0, Some(1)),
            ObjCommand::Face => (3, None),
            ObjCommand::MaterialLibrary => (1, None),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }

    /// Human-readable arity for error messages.
    pub fn expected_arity(self) -> &'static str {
        match self {
            ObjCommand::Vertex => "3 or 4",
            ObjCommand::TexCoord => "1 to 3",
            ObjCommand::Normal => "3",
            ObjCommand::Object | ObjCommand::Group => "1",
            ObjCommand::MaterialReference => "0 or 1",
            ObjCommand::Face => "at least 3",
            ObjCommand::MaterialLibrary => "at least 1",
        }
    }
}

impl fmt::Display for ObjCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Geometric vertex with optional weight `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: Option<f32>,
}

/// Texture coordinate with optional `v` and `w` components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TexCoord {
    pub u: f32,
    pub v: Option<f32>,
    pub w: Option<f32>,
}

/// Vertex normal
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normal {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
