// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Option resolution and configuration rendering.
//!
//! Resolution overlays consumer overrides onto an architecture's default
//! table, validates the result and pins the hypervisor binary. Rendering
//! substitutes the resolved record into a configuration template. Both are
//! pure functions of their inputs; generating twice from unchanged inputs
//! yields byte-identical output.

use std::collections::BTreeMap;

use crate::arch::Arch;
use crate::hypervisor::HypervisorKind;
use crate::options::ArchOptions;
use crate::overrides::OptionsOverride;
use crate::template::{Template, TemplateError};
use crate::validators;

/// Directory the configured binaries are expected under.
pub const DEFAULT_BINDIR: &str = "/usr/bin";

/// Errors associated with resolving an option record.
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum ResolveError {
    /// Options for {arch} failed validation: {source}
    InvalidOptions {
        /// Architecture being resolved.
        arch: Arch,
        /// The offending value.
        source: validators::Error,
    },
    /// {hypervisor} is not available on {arch}
    UnsupportedHypervisor {
        /// Requested hypervisor.
        hypervisor: HypervisorKind,
        /// Architecture being resolved.
        arch: Arch,
    },
}

/// Resolves the option record for `arch`: defaults, then the override
/// overlay, then validation.
pub fn resolve_options(
    arch: Arch,
    update: Option<&OptionsOverride>,
) -> Result<ArchOptions, ResolveError> {
    let mut options = ArchOptions::for_arch(arch);
    if let Some(update) = update {
        options.apply(update);
    }
    options
        .validate()
        .map_err(|source| ResolveError::InvalidOptions { arch, source })?;
    Ok(options)
}

/// Resolves the option record and pins the hypervisor binary.
pub fn resolve(
    arch: Arch,
    hypervisor: HypervisorKind,
    update: Option<&OptionsOverride>,
) -> Result<ResolvedConfig, ResolveError> {
    let options = resolve_options(arch, update)?;
    let Some(binary) = hypervisor.binary(&options) else {
        return Err(ResolveError::UnsupportedHypervisor { hypervisor, arch });
    };
    let binary = String::from(binary);
    Ok(ResolvedConfig {
        arch,
        hypervisor,
        options,
        binary,
    })
}

/// A validated option record pinned to an architecture and hypervisor,
/// ready to render.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    /// Architecture the record was resolved for.
    pub arch: Arch,
    /// Hypervisor the configuration targets.
    pub hypervisor: HypervisorKind,
    /// The resolved option record.
    pub options: ArchOptions,
    binary: String,
}

impl ResolvedConfig {
    /// The hypervisor binary name.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// The template substitution map: every populated option key plus the
    /// derived values the embedded templates consume.
    pub fn substitutions(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        for (key, value) in self.options.entries() {
            if let Some(value) = value {
                vars.insert(String::from(key.as_str()), value);
            }
        }
        vars.insert(
            String::from("RUNTIME_ARCH"),
            String::from(self.arch.as_str()),
        );
        vars.insert(
            String::from("HYPERVISOR"),
            String::from(self.hypervisor.as_str()),
        );
        vars.insert(
            String::from("HYPERVISOR_PATH"),
            format!("{DEFAULT_BINDIR}/{}", self.binary),
        );
        if let (Some(companion), Some(placeholder)) = (
            self.hypervisor.companion(&self.options),
            companion_placeholder(self.hypervisor),
        ) {
            vars.insert(
                String::from(placeholder),
                format!("{DEFAULT_BINDIR}/{companion}"),
            );
        }
        vars.insert(
            String::from("GUESTCPUFEATURES"),
            self.guest_cpu_features(),
        );
        vars
    }

    /// Renders the configuration through `template`.
    pub fn render_with(&self, template: &Template) -> Result<String, TemplateError> {
        template.render(&self.substitutions())
    }

    // The feature list the guest CPU model actually gets: the TDX list for
    // the TDX hypervisor, the standard list otherwise.
    fn guest_cpu_features(&self) -> String {
        match self.hypervisor {
            HypervisorKind::QemuTdx => self
                .options
                .tdx_cpu_features
                .clone()
                .unwrap_or_else(|| self.options.cpu_features.clone()),
            _ => self.options.cpu_features.clone(),
        }
    }
}

fn companion_placeholder(hypervisor: HypervisorKind) -> Option<&'static str> {
    match hypervisor {
        HypervisorKind::Firecracker => Some("JAILER_PATH"),
        HypervisorKind::Acrn => Some("CTLPATH"),
        _ => None,
    }
}
