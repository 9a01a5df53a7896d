// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Per-architecture option tables.
//!
//! One submodule per architecture holds the documented defaults, mirroring
//! the one-fragment-per-architecture layout of the build system that
//! consumes the generated configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arch::Arch;
use crate::overrides::OptionsOverride;
use crate::validators;

mod amd64;
mod arm64;
mod ppc64le;
mod s390x;

/// The architecture-specific option record the runtime configuration is
/// assembled from.
///
/// Every value is a literal known at generation time. `Option` fields are
/// only populated on architectures that carry the corresponding
/// hypervisor.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArchOptions {
    /// Default machine/board model presented to the guest.
    pub machine_type: String,
    /// Additional guest kernel boot parameters.
    pub kernel_params: String,
    /// Machine accelerator flags, comma-separated.
    pub machine_accelerators: String,
    /// CPU feature toggles for standard VMs.
    pub cpu_features: String,
    /// CPU feature toggles for TDX confidential VMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdx_cpu_features: Option<String>,
    /// QEMU binary name.
    pub qemu_cmd: String,
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
    /// Whether cloud-hypervisor sandboxes default to static resource
    /// management instead of hotplug.
    pub def_static_resource_mgmt_clh: bool,
}

impl ArchOptions {
    /// The documented defaults for `arch`.
    pub fn for_arch(arch: Arch) -> ArchOptions {
        match arch {
            Arch::Amd64 => amd64::options(),
            Arch::Arm64 => arm64::options(),
            Arch::Ppc64le => ppc64le::options(),
            Arch::S390x => s390x::options(),
        }
    }

    /// The record as key/value pairs in declaration order.
    ///
    /// Booleans render as `true`/`false`; keys the architecture does not
    /// carry yield `None`.
    pub fn entries(&self) -> Vec<(OptionKey, Option<String>)> {
        OptionKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }

    /// The rendered value for a single key.
    pub fn get(&self, key: OptionKey) -> Option<String> {
        match key {
            OptionKey::MachineType => Some(self.machine_type.clone()),
            OptionKey::KernelParams => Some(self.kernel_params.clone()),
            OptionKey::MachineAccelerators => Some(self.machine_accelerators.clone()),
            OptionKey::CpuFeatures => Some(self.cpu_features.clone()),
            OptionKey::TdxCpuFeatures => self.tdx_cpu_features.clone(),
            OptionKey::QemuCmd => Some(self.qemu_cmd.clone()),
            OptionKey::QemuTdxCmd => self.qemu_tdx_cmd.clone(),
            OptionKey::QemuSnpCmd => self.qemu_snp_cmd.clone(),
            OptionKey::FcCmd => self.fc_cmd.clone(),
            OptionKey::FcJailerCmd => self.fc_jailer_cmd.clone(),
            OptionKey::AcrnCmd => self.acrn_cmd.clone(),
            OptionKey::AcrnCtlCmd => self.acrn_ctl_cmd.clone(),
            OptionKey::ClhCmd => self.clh_cmd.clone(),
            OptionKey::ClhSnpCmd => self.clh_snp_cmd.clone(),
            OptionKey::StratovirtCmd => self.stratovirt_cmd.clone(),
            OptionKey::DefStaticResourceMgmtClh => {
                Some(self.def_static_resource_mgmt_clh.to_string())
            }
        }
    }

    /// Overlays `update` onto the record.
    ///
    /// `Some` replaces the current value, `None` keeps it. Overriding a
    /// key the architecture does not populate by default is allowed; that
    /// is how a consumer opts into an experimental hypervisor.
    pub fn apply(&mut self, update: &OptionsOverride) {
        if let Some(v) = &update.machine_type {
            self.machine_type = v.clone();
        }
        if let Some(v) = &update.kernel_params {
            self.kernel_params = v.clone();
        }
        if let Some(v) = &update.machine_accelerators {
            self.machine_accelerators = v.clone();
        }
        if let Some(v) = &update.cpu_features {
            self.cpu_features = v.clone();
        }
        if let Some(v) = &update.tdx_cpu_features {
            self.tdx_cpu_features = Some(v.clone());
        }
        if let Some(v) = &update.qemu_cmd {
            self.qemu_cmd = v.clone();
        }
        if let Some(v) = &update.qemu_tdx_cmd {
            self.qemu_tdx_cmd = Some(v.clone());
        }
        if let Some(v) = &update.qemu_snp_cmd {
            self.qemu_snp_cmd = Some(v.clone());
        }
        if let Some(v) = &update.fc_cmd {
            self.fc_cmd = Some(v.clone());
        }
        if let Some(v) = &update.fc_jailer_cmd {
            self.fc_jailer_cmd = Some(v.clone());
        }
        if let Some(v) = &update.acrn_cmd {
            self.acrn_cmd = Some(v.clone());
        }
        if let Some(v) = &update.acrn_ctl_cmd {
            self.acrn_ctl_cmd = Some(v.clone());
        }
        if let Some(v) = &update.clh_cmd {
            self.clh_cmd = Some(v.clone());
        }
        if let Some(v) = &update.clh_snp_cmd {
            self.clh_snp_cmd = Some(v.clone());
        }
        if let Some(v) = &update.stratovirt_cmd {
            self.stratovirt_cmd = Some(v.clone());
        }
        if let Some(v) = update.def_static_resource_mgmt_clh {
            self.def_static_resource_mgmt_clh = v;
        }
    }

    /// Validates every populated value.
    ///
    /// The values end up in a configuration the runtime uses to locate and
    /// invoke executables, so this runs after every override overlay.
    pub fn validate(&self) -> Result<(), validators::Error> {
        validators::validate_machine_type(OptionKey::MachineType, &self.machine_type)?;
        validators::validate_kernel_params(&self.kernel_params)?;
        for (key, value) in self.entries() {
            let Some(value) = value else {
                continue;
            };
            if key.is_binary() {
                validators::validate_binary_name(key, &value)?;
            } else if key.is_feature_list() {
                validators::validate_feature_list(key, &value)?;
            }
        }
        Ok(())
    }
}

/// Canonical key set of the option record.
///
/// `as_str` returns the upper-case name used for template placeholders
/// and in reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    /// MACHINETYPE
    MachineType,
    /// KERNELPARAMS
    KernelParams,
    /// MACHINEACCELERATORS
    MachineAccelerators,
    /// CPUFEATURES
    CpuFeatures,
    /// TDXCPUFEATURES
    TdxCpuFeatures,
    /// QEMUCMD
    QemuCmd,
    /// QEMUTDXCMD
    QemuTdxCmd,
    /// QEMUSNPCMD
    QemuSnpCmd,
    /// FCCMD
    FcCmd,
    /// FCJAILERCMD
    FcJailerCmd,
    /// ACRNCMD
    AcrnCmd,
    /// ACRNCTLCMD
    AcrnCtlCmd,
    /// CLHCMD
    ClhCmd,
    /// CLHSNPCMD
    ClhSnpCmd,
    /// STRATOVIRTCMD
    StratovirtCmd,
    /// DEFSTATICRESOURCEMGMT_CLH
    DefStaticResourceMgmtClh,
}

impl OptionKey {
    /// Every key, in declaration order of the record.
    pub const ALL: [OptionKey; 16] = [
        OptionKey::MachineType,
        OptionKey::KernelParams,
        OptionKey::MachineAccelerators,
        OptionKey::CpuFeatures,
        OptionKey::TdxCpuFeatures,
        OptionKey::QemuCmd,
        OptionKey::QemuTdxCmd,
        OptionKey::QemuSnpCmd,
        OptionKey::FcCmd,
        OptionKey::FcJailerCmd,
        OptionKey::AcrnCmd,
        OptionKey::AcrnCtlCmd,
        OptionKey::ClhCmd,
        OptionKey::ClhSnpCmd,
        OptionKey::StratovirtCmd,
        OptionKey::DefStaticResourceMgmtClh,
    ];

    /// Keys every architecture must populate.
    pub const REQUIRED: [OptionKey; 6] = [
        OptionKey::MachineType,
        OptionKey::KernelParams,
        OptionKey::MachineAccelerators,
        OptionKey::CpuFeatures,
        OptionKey::QemuCmd,
        OptionKey::DefStaticResourceMgmtClh,
    ];

    /// The placeholder name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::MachineType => "MACHINETYPE",
            OptionKey::KernelParams => "KERNELPARAMS",
            OptionKey::MachineAccelerators => "MACHINEACCELERATORS",
            OptionKey::CpuFeatures => "CPUFEATURES",
            OptionKey::TdxCpuFeatures => "TDXCPUFEATURES",
            OptionKey::QemuCmd => "QEMUCMD",
            OptionKey::QemuTdxCmd => "QEMUTDXCMD",
            OptionKey::QemuSnpCmd => "QEMUSNPCMD",
            OptionKey::FcCmd => "FCCMD",
            OptionKey::FcJailerCmd => "FCJAILERCMD",
            OptionKey::AcrnCmd => "ACRNCMD",
            OptionKey::AcrnCtlCmd => "ACRNCTLCMD",
            OptionKey::ClhCmd => "CLHCMD",
            OptionKey::ClhSnpCmd => "CLHSNPCMD",
            OptionKey::StratovirtCmd => "STRATOVIRTCMD",
            OptionKey::DefStaticResourceMgmtClh => "DEFSTATICRESOURCEMGMT_CLH",
        }
    }

    /// Whether the value names an executable.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            OptionKey::QemuCmd
                | OptionKey::QemuTdxCmd
                | OptionKey::QemuSnpCmd
                | OptionKey::FcCmd
                | OptionKey::FcJailerCmd
                | OptionKey::AcrnCmd
                | OptionKey::AcrnCtlCmd
                | OptionKey::ClhCmd
                | OptionKey::ClhSnpCmd
                | OptionKey::StratovirtCmd
        )
    }

    /// Whether the value is a comma-separated feature list.
    pub fn is_feature_list(self) -> bool {
        matches!(
            self,
            OptionKey::CpuFeatures | OptionKey::TdxCpuFeatures | OptionKey::MachineAccelerators
        )
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for [`<OptionKey as FromStr>::from_str`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown option key: {0}")]
pub struct OptionKeyFromStrError(String);

impl FromStr for OptionKey {
    type Err = OptionKeyFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| OptionKeyFromStrError(String::from(s)))
    }
}
