// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Option overrides supplied by the consumer of the generated
//! configuration.

use serde::{Deserialize, Serialize};

/// Partial option record supplied by the consuming build step.
///
/// Mirrors every field of
/// [`ArchOptions`](crate::options::ArchOptions); a `Some` value replaces
/// the architecture default during resolution, a `None` keeps it. An
/// override can populate keys the architecture omits by default but can
/// never remove one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsOverride {
    /// Machine/board model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    /// Additional guest kernel boot parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_params: Option<String>,
    /// Machine accelerator flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_accelerators: Option<String>,
    /// CPU feature toggles for standard VMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_features: Option<String>,
    /// CPU feature toggles for TDX confidential VMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdx_cpu_features: Option<String>,
    /// QEMU binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qemu_cmd: Option<String>,
    /// Binary name of the QEMU build with TDX support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qemu_tdx_cmd: Option<String>,
    /// Binary name of the QEMU build with SNP support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qemu_snp_cmd: Option<String>,
    /// Firecracker binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fc_cmd: Option<String>,
    /// Binary name of Firecracker's jailer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fc_jailer_cmd: Option<String>,
    /// ACRN device model binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acrn_cmd: Option<String>,
    /// ACRN control binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acrn_ctl_cmd: Option<String>,
    /// cloud-hypervisor binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clh_cmd: Option<String>,
    /// Binary name of the cloud-hypervisor build with SNP support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clh_snp_cmd: Option<String>,
    /// StratoVirt binary name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stratovirt_cmd: Option<String>,
    /// Default to static resource management for cloud-hypervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def_static_resource_mgmt_clh: Option<bool>,
}

/// Errors associated with parsing an override file.
#[derive(Debug, thiserror::Error, displaydoc::Display)]
pub enum OverrideError {
    /// Override file is not valid JSON for an option record: {0}
    InvalidJson(#[from] serde_json::Error),
}

impl OptionsOverride {
    /// Parses an override record from JSON.
    pub fn from_json(json: &str) -> Result<OptionsOverride, OverrideError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns `true` when no field is set, meaning there is nothing to
    /// overlay.
    pub fn is_empty(&self) -> bool {
        *self == OptionsOverride::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_partial() {
        let update = OptionsOverride::from_json(
            r#"{ "machine_type": "pc", "def_static_resource_mgmt_clh": false }"#,
        )
        .unwrap();
        assert_eq!(update.machine_type.as_deref(), Some("pc"));
        assert_eq!(update.def_static_resource_mgmt_clh, Some(false));
        assert!(update.qemu_cmd.is_none());
        assert!(!update.is_empty());
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        let err = OptionsOverride::from_json(r#"{ "machinetype": "pc" }"#).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Override file is not valid JSON"),
            "{err}"
        );
    }

    #[test]
    fn empty_override() {
        assert!(OptionsOverride::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn json_round_trip_skips_unset_fields() {
        let update = OptionsOverride {
            qemu_cmd: Some(String::from("qemu-system-x86_64-v9")),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"qemu_cmd":"qemu-system-x86_64-v9"}"#);
        assert_eq!(OptionsOverride::from_json(&json).unwrap(), update);
    }
}
