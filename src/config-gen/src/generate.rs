// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The `generate` subcommand: render the runtime configuration for one
//! (architecture, hypervisor) pair.

use arch_options::overrides::OptionsOverride;
use arch_options::template::TemplateError;
use arch_options::{Arch, HypervisorKind, Template, resolve};

use crate::templates;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse overrides: {0}")]
    Override(#[from] arch_options::overrides::OverrideError),
    #[error("Failed to resolve options: {0}")]
    Resolve(#[from] arch_options::resolve::ResolveError),
    #[error("Failed to render template: {0}")]
    Render(#[from] TemplateError),
}

/// Renders the configuration text. `template` replaces the embedded
/// template when given.
pub fn generate(
    arch: Arch,
    hypervisor: HypervisorKind,
    overrides: Option<&str>,
    template: Option<&str>,
) -> Result<String, Error> {
    let update = overrides.map(OptionsOverride::from_json).transpose()?;
    let resolved = resolve(arch, hypervisor, update.as_ref())?;
    let source = match template {
        Some(source) => source,
        None => templates::embedded(hypervisor),
    };
    Ok(resolved.render_with(&Template::new(source))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_qemu_amd64() {
        let out = generate(Arch::Amd64, HypervisorKind::Qemu, None, None).unwrap();
        assert!(out.contains("path = \"/usr/bin/qemu-system-x86_64\""), "{out}");
        assert!(out.contains("machine_type = \"q35\""), "{out}");
        assert!(out.contains("cpu_features = \"pmu=off\""), "{out}");
        assert!(out.contains("kernel_params = \"\""), "{out}");
    }

    #[test]
    fn generate_qemu_tdx_uses_tdx_features() {
        let out = generate(Arch::Amd64, HypervisorKind::QemuTdx, None, None).unwrap();
        assert!(
            out.contains("path = \"/usr/bin/qemu-system-x86_64-tdx-experimental\""),
            "{out}"
        );
        assert!(
            out.contains("cpu_features = \"-vmx-rdseed-exit,pmu=off\""),
            "{out}"
        );
    }

    #[test]
    fn generate_clh_renders_boolean_flag() {
        let out = generate(Arch::Amd64, HypervisorKind::CloudHypervisor, None, None).unwrap();
        assert!(out.contains("static_sandbox_resource_mgmt = true"), "{out}");

        let update = r#"{ "def_static_resource_mgmt_clh": false }"#;
        let out = generate(
            Arch::Amd64,
            HypervisorKind::CloudHypervisor,
            Some(update),
            None,
        )
        .unwrap();
        assert!(out.contains("static_sandbox_resource_mgmt = false"), "{out}");
    }

    #[test]
    fn generate_is_idempotent() {
        let first = generate(Arch::Amd64, HypervisorKind::Firecracker, None, None).unwrap();
        let second = generate(Arch::Amd64, HypervisorKind::Firecracker, None, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn generate_with_custom_template() {
        let out = generate(
            Arch::Ppc64le,
            HypervisorKind::Qemu,
            None,
            Some("accel = \"@MACHINEACCELERATORS@\"\n"),
        )
        .unwrap();
        assert_eq!(
            out,
            "accel = \"cap-cfpc=broken,cap-sbbc=broken,cap-ibs=broken,cap-large-decr=off,\
             cap-ccf-assist=off\"\n"
        );
    }

    #[test]
    fn generate_rejects_unknown_placeholder() {
        let err = generate(
            Arch::Amd64,
            HypervisorKind::Qemu,
            None,
            Some("x = \"@NOT_A_KEY@\""),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to render template: No value for placeholder @NOT_A_KEY@"
        );
    }

    #[test]
    fn generate_rejects_unsupported_pair() {
        let err = generate(Arch::S390x, HypervisorKind::Acrn, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to resolve options: acrn is not available on s390x"
        );
    }
}
