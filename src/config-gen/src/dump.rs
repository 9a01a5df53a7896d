// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The `dump` subcommand: resolved option table as pretty JSON.

use arch_options::overrides::OptionsOverride;
use arch_options::{Arch, resolve_options};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse overrides: {0}")]
    Override(#[from] arch_options::overrides::OverrideError),
    #[error("Failed to resolve options: {0}")]
    Resolve(#[from] arch_options::resolve::ResolveError),
    #[error("Failed to serialize options: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolves the option table for `arch` and serializes it.
pub fn dump(arch: Arch, overrides: Option<&str>) -> Result<String, Error> {
    let update = overrides.map(OptionsOverride::from_json).transpose()?;
    let options = resolve_options(arch, update.as_ref())?;
    let mut json = serde_json::to_string_pretty(&options)?;
    json.push('\n');
    Ok(json)
}
