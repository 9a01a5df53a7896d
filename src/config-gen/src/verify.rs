// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The `verify` subcommand: prove that every supported
//! (architecture, hypervisor) pair resolves, validates and renders, and
//! report key-set parity across the shipped tables.

use std::fmt::Write;

use arch_options::overrides::OptionsOverride;
use arch_options::parity::parity_report;
use arch_options::{Arch, HypervisorKind, Template, resolve, resolve_options};

use crate::templates;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse overrides: {0}")]
    Override(#[from] arch_options::overrides::OverrideError),
    #[error("{}", .problems.join("\n"))]
    Failed {
        /// One line per problem found.
        problems: Vec<String>,
    },
}

/// Runs the checks and returns the report text. Any problem fails the
/// whole run with every finding collected.
pub fn verify(arch: Option<Arch>, overrides: Option<&str>) -> Result<String, Error> {
    let update = overrides.map(OptionsOverride::from_json).transpose()?;
    let arches: Vec<Arch> = match arch {
        Some(arch) => vec![arch],
        None => Arch::ALL.to_vec(),
    };

    let mut problems: Vec<String> = Vec::new();
    let mut report = String::new();
    let mut rendered = 0usize;

    for &arch in &arches {
        let options = match resolve_options(arch, update.as_ref()) {
            Ok(options) => options,
            Err(e) => {
                problems.push(e.to_string());
                continue;
            }
        };
        let mut line = format!("{arch}:");
        for hypervisor in HypervisorKind::ALL {
            if hypervisor.binary(&options).is_none() {
                continue;
            }
            for &key in hypervisor.template_keys() {
                if options.get(key).is_none() {
                    problems.push(format!(
                        "{arch}/{hypervisor}: declared key {key} is not populated"
                    ));
                }
            }
            let result = resolve(arch, hypervisor, update.as_ref())
                .map_err(|e| e.to_string())
                .and_then(|resolved| {
                    resolved
                        .render_with(&Template::new(templates::embedded(hypervisor)))
                        .map_err(|e| format!("{arch}/{hypervisor}: {e}"))
                });
            match result {
                Ok(_) => {
                    line.push(' ');
                    line.push_str(hypervisor.as_str());
                    rendered += 1;
                }
                Err(problem) => problems.push(problem),
            }
        }
        report.push_str(&line);
        report.push('\n');
    }

    // Parity only makes sense across the full set of shipped tables.
    if arch.is_none() {
        for finding in parity_report() {
            if finding.is_fatal() {
                problems.push(finding.to_string());
            } else {
                let _ = writeln!(report, "note: {finding}");
            }
        }
    }

    if !problems.is_empty() {
        return Err(Error::Failed { problems });
    }
    let _ = writeln!(
        report,
        "Verified {} architecture(s), {} configuration(s).",
        arches.len(),
        rendered
    );
    Ok(report)
}
