// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event-based OBJ scanner
//!
//! Drives a [`LineScanner`] to the end of the stream and reports every
//! recognised statement to a [`ScanHandler`]. Unknown statements are
//! counted and skipped. The first error, whether from the stream, a
//! decoder, an arity check or the handler, ends the scan.

use std::io::BufRead;

use rustc_hash::FxHashMap;

use crate::command::{Normal, ObjCommand, TexCoord, Vertex};
use crate::config::ScanConfig;
use crate::decode::CoordReference;
use crate::error::{Error, Result};
use crate::line::{CommandLine, LineScanner, ScanRecord};

/// Receives scanned OBJ statements in file order.
///
/// Every callback defaults to a no-op; returning an error aborts the scan.
#[allow(unused_variables)]
pub trait ScanHandler {
    fn on_comment(&mut self, comment: &str) -> Result<()> {
        Ok(())
    }

    fn on_vertex(&mut self, vertex: Vertex) -> Result<()> {
        Ok(())
    }

    fn on_tex_coord(&mut self, tex_coord: TexCoord) -> Result<()> {
        Ok(())
    }

    fn on_normal(&mut self, normal: Normal) -> Result<()> {
        Ok(())
    }

    fn on_object(&mut self, name: &str) -> Result<()> {
        Ok(())
    }

    /// Groups are reported as objects unless overridden.
    fn on_group(&mut self, name: &str) -> Result<()> {
        self.on_object(name)
    }

    fn on_face_start(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_coord_reference(&mut self, reference: CoordReference) -> Result<()> {
        Ok(())
    }

    fn on_face_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per library named by an `mtllib` statement.
    fn on_material_library(&mut self, path: &str) -> Result<()> {
        Ok(())
    }

    /// `name` is empty for a bare `usemtl`, which clears the current material.
    fn on_material_reference(&mut self, name: &str) -> Result<()> {
        Ok(())
    }
}

/// Counts gathered during one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanSummary {
    /// Logical lines classified, end-of-stream excluded
    pub logical_lines: usize,
    pub blank_lines: usize,
    pub comments: usize,
    pub vertices: usize,
    pub tex_coords: usize,
    pub normals: usize,
    pub objects: usize,
    pub groups: usize,
    pub faces: usize,
    pub coord_references: usize,
    pub material_libraries: usize,
    pub material_references: usize,
    /// Unrecognised command names and how often each appeared
    pub ignored: FxHashMap<String, usize>,
}

impl ScanSummary {
    /// Total number of ignored statements.
    pub fn ignored_count(&self) -> usize {
        self.ignored.values().sum()
    }
}

/// OBJ stream scanner
///
/// ```rust,ignore
/// use obj_lite_core::{ObjScanner, ScanHandler, Vertex};
///
/// struct Positions(Vec<Vertex>);
///
/// impl ScanHandler for Positions {
///     fn on_vertex(&mut self, vertex: Vertex) -> obj_lite_core::Result<()> {
///         self.0.push(vertex);
///         Ok(())
///     }
/// }
///
/// let mut positions = Positions(Vec::new());
/// let summary = ObjScanner::new().scan(reader, &mut positions)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjScanner {
    config: ScanConfig,
}

impl ObjScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `reader` to the end, reporting statements to `handler`.
    pub fn scan<R, H>(&self, reader: R, handler: &mut H) -> Result<ScanSummary>
    where
        R: BufRead,
        H: ScanHandler + ?Sized,
    {
        tracing::debug!(config = ?self.config, "Starting OBJ scan");

        let mut summary = ScanSummary::default();
        match scan_lines(LineScanner::with_config(reader, &self.config), handler, &mut summary) {
            Ok(()) => {
                tracing::debug!(
                    lines = summary.logical_lines,
                    vertices = summary.vertices,
                    faces = summary.faces,
                    ignored = summary.ignored_count(),
                    "OBJ scan complete"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    lines = summary.logical_lines,
                    "OBJ scan failed"
                );
                Err(e)
            }
        }
    }
}

/// Scan `reader` with the default configuration.
pub fn scan<R, H>(reader: R, handler: &mut H) -> Result<ScanSummary>
where
    R: BufRead,
    H: ScanHandler + ?Sized,
{
    ObjScanner::new().scan(reader, handler)
}

fn scan_lines<R, H>(
    mut lines: LineScanner<R>,
    handler: &mut H,
    summary: &mut ScanSummary,
) -> Result<()>
where
    R: BufRead,
    H: ScanHandler + ?Sized,
{
    loop {
        match lines.parse_next_line()? {
            ScanRecord::EndOfStream => break,
            ScanRecord::Blank => summary.blank_lines += 1,
            ScanRecord::Comment(body) => {
                summary.comments += 1;
                handler.on_comment(body)?;
            }
            ScanRecord::Command(command) => dispatch(&command, handler, summary)?,
        }
        summary.logical_lines += 1;

        // Content buffered from a trailing continuation arrives together
        // with end of stream
        if lines.is_end_of_stream() {
            break;
        }
    }
    Ok(())
}

fn dispatch<H>(command: &CommandLine<'_>, handler: &mut H, summary: &mut ScanSummary) -> Result<()>
where
    H: ScanHandler + ?Sized,
{
    let Some(kind) = ObjCommand::from_name(command.name()) else {
        tracing::trace!(
            line = command.line_number(),
            command = command.name(),
            "Ignoring unsupported OBJ statement"
        );
        *summary.ignored.entry(command.name().to_string()).or_insert(0) += 1;
        return Ok(());
    };

    let count = command.param_count();
    if !kind.accepts(count) {
        return Err(Error::InvalidArity {
            line: command.line_number(),
            command: kind.keyword(),
            expected: kind.expected_arity(),
            found: count,
        });
    }

    match kind {
        ObjCommand::Vertex => {
            handler.on_vertex(Vertex {
                x: command.float_param(0)?,
                y: command.float_param(1)?,
                z: command.float_param(2)?,
                w: optional_float(command, 3)?,
            })?;
            summary.vertices += 1;
        }
        ObjCommand::TexCoord => {
            handler.on_tex_coord(TexCoord {
                u: command.float_param(0)?,
                v: optional_float(command, 1)?,
                w: optional_float(command, 2)?,
            })?;
            summary.tex_coords += 1;
        }
        ObjCommand::Normal => {
            handler.on_normal(Normal {
                x: command.float_param(0)?,
                y: command.float_param(1)?,
                z: command.float_param(2)?,
            })?;
            summary.normals += 1;
        }
        ObjCommand::Object => {
            handler.on_object(command.string_param(0)?)?;
            summary.objects += 1;
        }
        ObjCommand::Group => {
            handler.on_group(command.string_param(0)?)?;
            summary.groups += 1;
        }
        ObjCommand::Face => {
            handler.on_face_start()?;
            for index in 0..count {
                handler.on_coord_reference(command.coord_reference_param(index)?)?;
            }
            handler.on_face_end()?;
            summary.faces += 1;
            summary.coord_references += count;
        }
        ObjCommand::MaterialLibrary => {
            for path in command.params() {
                handler.on_material_library(path)?;
            }
            summary.material_libraries += count;
        }
        ObjCommand::MaterialReference => {
            let name = if count == 0 { "" } else { command.string_param(0)? };
            handler.on_material_reference(name)?;
            summary.material_references += 1;
        }
    }

    Ok(())
}

#[inline]
fn optional_float(command: &CommandLine<'_>, index: usize) -> Result<Option<f32>> {
    if index < command.param_count() {
        command.float_param(index).map(Some)
    } else {
        Ok(None)
    }
}
