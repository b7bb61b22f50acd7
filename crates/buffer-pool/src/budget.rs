// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Memory budget for the buffer pool.

use crate::PoolError;
use std::fmt;

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// Upper bound on the bytes a [`crate::BufferPool`] may have live at once.
///
/// # Parsing
/// - `"256M"` / `"256MB"` → 256 × 1024² bytes
/// - `"1G"` / `"1GB"` → 1024³ bytes
/// - `"64K"` / `"64KB"` → 64 × 1024 bytes
/// - `"4096"` / `"4096B"` → raw byte count
///
/// ```
/// use buffer_pool::MemoryBudget;
///
/// assert_eq!(MemoryBudget::parse("1G").unwrap().as_mb(), 1024);
/// assert_eq!(MemoryBudget::from_kb(8).as_bytes(), 8192);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryBudget {
    bytes: usize,
}

impl MemoryBudget {
    pub fn from_bytes(bytes: usize) -> Self {
        Self { bytes }
    }

    pub fn from_kb(kb: usize) -> Self {
        Self { bytes: kb * KIB }
    }

    pub fn from_mb(mb: usize) -> Self {
        Self { bytes: mb * MIB }
    }

    pub fn from_gb(gb: usize) -> Self {
        Self { bytes: gb * GIB }
    }

    /// Largest representable budget; allocation never fails on budget grounds.
    pub fn unlimited() -> Self {
        Self { bytes: usize::MAX }
    }

    pub fn as_bytes(&self) -> usize {
        self.bytes
    }

    /// Budget in whole megabytes (truncated).
    pub fn as_mb(&self) -> usize {
        self.bytes / MIB
    }

    /// How many `f32` elements fit in the budget.
    pub fn as_elements(&self) -> usize {
        self.bytes / crate::ELEMENT_BYTES
    }

    /// Parses a human-readable budget string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, PoolError> {
        let trimmed = s.trim();
        let invalid = |reason: &str| PoolError::InvalidBudget {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty string"));
        }

        let upper = trimmed.to_ascii_uppercase();
        let unit = upper.strip_suffix('B').unwrap_or(&upper);
        let (digits, multiplier) = match unit.chars().last() {
            Some('G') => (&unit[..unit.len() - 1], GIB),
            Some('M') => (&unit[..unit.len() - 1], MIB),
            Some('K') => (&unit[..unit.len() - 1], KIB),
            _ => (unit, 1),
        };

        let value: usize = digits
            .trim()
            .parse()
            .map_err(|_| invalid("expected a number followed by an optional K, M or G suffix"))?;

        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("value overflows usize"))?;

        if bytes == 0 {
            return Err(invalid("budget must be non-zero"));
        }

        Ok(Self { bytes })
    }
}

impl fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes == usize::MAX {
            write!(f, "unlimited")
        } else if self.bytes >= GIB && self.bytes % GIB == 0 {
            write!(f, "{} GB", self.bytes / GIB)
        } else if self.bytes >= MIB && self.bytes % MIB == 0 {
            write!(f, "{} MB", self.bytes / MIB)
        } else if self.bytes >= KIB && self.bytes % KIB == 0 {
            write!(f, "{} KB", self.bytes / KIB)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}
