// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Key-set parity reporting across the shipped architecture tables.
//!
//! The option record schema is universal, but architectures differ in
//! which optional hypervisor keys they populate. The report makes that
//! divergence visible and fails only on required keys going missing.

use std::collections::BTreeSet;
use std::fmt;

use crate::arch::Arch;
use crate::options::{ArchOptions, OptionKey};

/// A single parity finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParityFinding {
    /// A key every architecture must define is missing.
    MissingRequired {
        /// Architecture with the gap.
        arch: Arch,
        /// The missing key.
        key: OptionKey,
    },
    /// A key populated on at least one other architecture is absent here.
    /// Informational; optional keys are allowed to diverge.
    OptionalDivergence {
        /// Architecture the key is absent on.
        arch: Arch,
        /// The diverging key.
        key: OptionKey,
    },
}

impl ParityFinding {
    /// Whether the finding fails verification.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParityFinding::MissingRequired { .. })
    }
}

impl fmt::Display for ParityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParityFinding::MissingRequired { arch, key } => {
                write!(f, "required key {key} is missing on {arch}")
            }
            ParityFinding::OptionalDivergence { arch, key } => {
                write!(f, "{key} is not defined on {arch}")
            }
        }
    }
}

/// Compares the shipped default tables across every architecture.
///
/// Findings are ordered by architecture, then key declaration order.
pub fn parity_report() -> Vec<ParityFinding> {
    let tables: Vec<(Arch, ArchOptions)> = Arch::ALL
        .into_iter()
        .map(|arch| (arch, ArchOptions::for_arch(arch)))
        .collect();

    let populated_anywhere: BTreeSet<OptionKey> = tables
        .iter()
        .flat_map(|(_, options)| options.entries())
        .filter_map(|(key, value)| value.map(|_| key))
        .collect();

    let mut findings = Vec::new();
    for (arch, options) in &tables {
        for key in OptionKey::ALL {
            if options.get(key).is_some() {
                continue;
            }
            if OptionKey::REQUIRED.contains(&key) {
                findings.push(ParityFinding::MissingRequired { arch: *arch, key });
            } else if populated_anywhere.contains(&key) {
                findings.push(ParityFinding::OptionalDivergence { arch: *arch, key });
            }
        }
    }
    findings
}
