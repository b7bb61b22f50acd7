// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Execution location of a tensor's storage.

use std::fmt;

/// Where a tensor's buffer lives and where its kernels run.
///
/// Only host memory exists today. New backends are added as variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Host memory, CPU kernels.
    #[default]
    Host,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Host => "host",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
