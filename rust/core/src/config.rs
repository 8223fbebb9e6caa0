// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scanner configuration, optionally loaded from environment variables.

/// Default physical line limit in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Default initial capacity of the logical-line buffer.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// Scanner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// Maximum bytes in one physical line, terminator excluded. `None` disables the check.
    pub max_line_length: Option<usize>,
    /// Initial capacity of the reused logical-line buffer.
    pub line_capacity: usize,
}

impl ScanConfig {
    /// Load configuration from environment variables.
    ///
    /// - `OBJ_MAX_LINE_LENGTH`: physical line limit in bytes (`0` = unlimited)
    /// - `OBJ_LINE_CAPACITY`: initial line buffer capacity
    pub fn from_env() -> Self {
        let max_line_length = std::env::var("OBJ_MAX_LINE_LENGTH")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_LINE_LENGTH);

        Self {
            max_line_length: (max_line_length > 0).then_some(max_line_length),
            line_capacity: std::env::var("OBJ_LINE_CAPACITY")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_LINE_CAPACITY),
        }
    }

    pub fn with_max_line_length(mut self, limit: Option<usize>) -> Self {
        self.max_line_length = limit;
        self
    }

    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_line_length: Some(DEFAULT_MAX_LINE_LENGTH),
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }
}
