// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Architecture-specific hypervisor option tables for a VM-based container
//! runtime, plus the machinery that turns them into the generated runtime
//! configuration: an override layer, value validation, placeholder
//! substitution and key-set parity checking.
//!
//! The option tables are pure data. Nothing in this crate launches a
//! hypervisor or reads runtime state; resolution and rendering are
//! deterministic functions of their inputs.

/// Architecture identifiers.
pub mod arch;
/// Hypervisor kinds and their binary lookup.
pub mod hypervisor;
/// The logger.
pub mod logger;
/// Per-architecture option tables.
pub mod options;
/// Option overrides supplied by the consumer.
pub mod overrides;
/// Key-set parity reporting across architectures.
pub mod parity;
/// Option resolution and configuration rendering.
pub mod resolve;
/// Placeholder substitution templates.
pub mod template;
/// Wall-clock timestamps for log lines.
pub mod time;
/// Option value validation.
pub mod validators;

pub use arch::Arch;
pub use hypervisor::HypervisorKind;
pub use options::{ArchOptions, OptionKey};
pub use overrides::OptionsOverride;
pub use resolve::{ResolvedConfig, resolve, resolve_options};
pub use template::Template;
