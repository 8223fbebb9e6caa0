// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OBJ-Lite Core Scanner
//!
//! Streaming scanner for Wavefront OBJ files. Reads a byte stream one
//! logical line at a time and reports statements to a handler without
//! building an in-memory model.
//!
//! ## Overview
//!
//! - **Logical lines**: physical lines ending in `\` are joined before parsing
//! - **Classification**: each line is blank, a `#` comment, or a command with
//!   whitespace-separated parameters, tokenized with [nom](https://docs.rs/nom)
//! - **Decoding**: parameters decode on demand into `f32` values
//!   ([fast-float](https://docs.rs/fast-float)) or `V/T/N` coordinate
//!   references ([lexical-core](https://docs.rs/lexical-core))
//! - **Dispatch**: recognised statements (`v`, `vt`, `vn`, `o`, `g`, `f`,
//!   `mtllib`, `usemtl`) go to a [`ScanHandler`]; everything else is skipped
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use obj_lite_core::{scan, CoordReference, ScanHandler, Result};
//!
//! #[derive(Default)]
//! struct FaceCounter { faces: usize, refs: usize }
//!
//! impl ScanHandler for FaceCounter {
//!     fn on_face_start(&mut self) -> Result<()> {
//!         self.faces += 1;
//!         Ok(())
//!     }
//!
//!     fn on_coord_reference(&mut self, _reference: CoordReference) -> Result<()> {
//!         self.refs += 1;
//!         Ok(())
//!     }
//! }
//!
//! let file = std::io::BufReader::new(std::fs::File::open("cube.obj")?);
//! let mut counter = FaceCounter::default();
//! let summary = scan(file, &mut counter)?;
//! println!("{} faces, {} ignored statements", counter.faces, summary.ignored_count());
//! ```
//!
//! ## Line-level access
//!
//! [`LineScanner`] exposes the per-line API directly for callers that want
//! their own dispatch:
//!
//! ```rust,ignore
//! use obj_lite_core::{LineScanner, ScanRecord};
//!
//! let mut lines = LineScanner::new(reader);
//! loop {
//!     match lines.parse_next_line()? {
//!         ScanRecord::EndOfStream => break,
//!         ScanRecord::Command(cmd) if cmd.name() == "f" => {
//!             for i in 0..cmd.param_count() {
//!                 let reference = cmd.coord_reference_param(i)?;
//!                 println!("vertex {}", reference.vertex);
//!             }
//!         }
//!         _ => {}
//!     }
//!     if lines.is_end_of_stream() {
//!         break;
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for decoded values and summaries

pub mod command;
pub mod config;
pub mod decode;
pub mod error;
pub mod line;
pub mod reader;
pub mod scanner;

pub use command::{Normal, ObjCommand, TexCoord, Vertex};
pub use config::ScanConfig;
pub use decode::{decode_coord_reference, decode_float, CoordReference};
pub use error::{CoordSlot, Error, Result};
pub use line::{classify, CommandLine, LineScanner, ScanRecord};
pub use reader::LogicalLineReader;
pub use scanner::{scan, ObjScanner, ScanHandler, ScanSummary};
