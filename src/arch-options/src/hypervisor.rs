// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Hypervisor kinds and their binary lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arch::Arch;
use crate::options::{ArchOptions, OptionKey};

/// Hypervisor backends a runtime configuration can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HypervisorKind {
    /// Stock QEMU.
    Qemu,
    /// QEMU with TDX support.
    QemuTdx,
    /// QEMU with SNP support.
    QemuSnp,
    /// Firecracker.
    Firecracker,
    /// ACRN device model.
    Acrn,
    /// cloud-hypervisor.
    CloudHypervisor,
    /// cloud-hypervisor with SNP support.
    CloudHypervisorSnp,
    /// StratoVirt.
    Stratovirt,
}

impl HypervisorKind {
    /// Every hypervisor kind.
    pub const ALL: [HypervisorKind; 8] = [
        HypervisorKind::Qemu,
        HypervisorKind::QemuTdx,
        HypervisorKind::QemuSnp,
        HypervisorKind::Firecracker,
        HypervisorKind::Acrn,
        HypervisorKind::CloudHypervisor,
        HypervisorKind::CloudHypervisorSnp,
        HypervisorKind::Stratovirt,
    ];

    /// The wire name of the hypervisor.
    pub fn as_str(self) -> &'static str {
        match self {
            HypervisorKind::Qemu => "qemu",
            HypervisorKind::QemuTdx => "qemu-tdx",
            HypervisorKind::QemuSnp => "qemu-snp",
            HypervisorKind::Firecracker => "firecracker",
            HypervisorKind::Acrn => "acrn",
            HypervisorKind::CloudHypervisor => "cloud-hypervisor",
            HypervisorKind::CloudHypervisorSnp => "cloud-hypervisor-snp",
            HypervisorKind::Stratovirt => "stratovirt",
        }
    }

    /// The option key holding the hypervisor's binary name.
    pub fn binary_key(self) -> OptionKey {
        match self {
            HypervisorKind::Qemu => OptionKey::QemuCmd,
            HypervisorKind::QemuTdx => OptionKey::QemuTdxCmd,
            HypervisorKind::QemuSnp => OptionKey::QemuSnpCmd,
            HypervisorKind::Firecracker => OptionKey::FcCmd,
            HypervisorKind::Acrn => OptionKey::AcrnCmd,
            HypervisorKind::CloudHypervisor => OptionKey::ClhCmd,
            HypervisorKind::CloudHypervisorSnp => OptionKey::ClhSnpCmd,
            HypervisorKind::Stratovirt => OptionKey::StratovirtCmd,
        }
    }

    /// The option key holding the auxiliary binary name, where one exists
    /// (Firecracker's jailer, ACRN's control tool).
    pub fn companion_key(self) -> Option<OptionKey> {
        match self {
            HypervisorKind::Firecracker => Some(OptionKey::FcJailerCmd),
            HypervisorKind::Acrn => Some(OptionKey::AcrnCtlCmd),
            _ => None,
        }
    }

    /// The hypervisor's binary name in `options`, if the architecture
    /// carries it.
    pub fn binary<'a>(&self, options: &'a ArchOptions) -> Option<&'a str> {
        match self {
            HypervisorKind::Qemu => Some(options.qemu_cmd.as_str()),
            HypervisorKind::QemuTdx => options.qemu_tdx_cmd.as_deref(),
            HypervisorKind::QemuSnp => options.qemu_snp_cmd.as_deref(),
            HypervisorKind::Firecracker => options.fc_cmd.as_deref(),
            HypervisorKind::Acrn => options.acrn_cmd.as_deref(),
            HypervisorKind::CloudHypervisor => options.clh_cmd.as_deref(),
            HypervisorKind::CloudHypervisorSnp => options.clh_snp_cmd.as_deref(),
            HypervisorKind::Stratovirt => options.stratovirt_cmd.as_deref(),
        }
    }

    /// The auxiliary binary name in `options`.
    pub fn companion<'a>(&self, options: &'a ArchOptions) -> Option<&'a str> {
        match self {
            HypervisorKind::Firecracker => options.fc_jailer_cmd.as_deref(),
            HypervisorKind::Acrn => options.acrn_ctl_cmd.as_deref(),
            _ => None,
        }
    }

    /// Whether the architecture's default option table carries the
    /// hypervisor.
    ///
    /// Support is derived from key presence, never from a second
    /// hand-maintained matrix.
    pub fn supported_on(&self, arch: Arch) -> bool {
        self.binary(&ArchOptions::for_arch(arch)).is_some()
    }

    /// The option keys the hypervisor's configuration template consumes,
    /// directly or through a derived value.
    pub fn template_keys(self) -> &'static [OptionKey] {
        match self {
            HypervisorKind::Qemu => &[
                OptionKey::QemuCmd,
                OptionKey::MachineType,
                OptionKey::MachineAccelerators,
                OptionKey::CpuFeatures,
                OptionKey::KernelParams,
            ],
            HypervisorKind::QemuTdx => &[
                OptionKey::QemuTdxCmd,
                OptionKey::MachineType,
                OptionKey::MachineAccelerators,
                OptionKey::TdxCpuFeatures,
                OptionKey::KernelParams,
            ],
            HypervisorKind::QemuSnp => &[
                OptionKey::QemuSnpCmd,
                OptionKey::MachineType,
                OptionKey::MachineAccelerators,
                OptionKey::CpuFeatures,
                OptionKey::KernelParams,
            ],
            HypervisorKind::Firecracker => &[
                OptionKey::FcCmd,
                OptionKey::FcJailerCmd,
                OptionKey::KernelParams,
            ],
            HypervisorKind::Acrn => &[
                OptionKey::AcrnCmd,
                OptionKey::AcrnCtlCmd,
                OptionKey::KernelParams,
            ],
            HypervisorKind::CloudHypervisor => &[
                OptionKey::ClhCmd,
                OptionKey::KernelParams,
                OptionKey::DefStaticResourceMgmtClh,
            ],
            HypervisorKind::CloudHypervisorSnp => &[
                OptionKey::ClhSnpCmd,
                OptionKey::KernelParams,
                OptionKey::DefStaticResourceMgmtClh,
            ],
            HypervisorKind::Stratovirt => &[
                OptionKey::StratovirtCmd,
                OptionKey::MachineType,
                OptionKey::KernelParams,
            ],
        }
    }
}

impl fmt::Display for HypervisorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for [`<HypervisorKind as FromStr>::from_str`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown hypervisor: {0}")]
pub struct HypervisorKindFromStrError(String);

impl FromStr for HypervisorKind {
    type Err = HypervisorKindFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qemu" => Ok(HypervisorKind::Qemu),
            "qemu-tdx" => Ok(HypervisorKind::QemuTdx),
            "qemu-snp" => Ok(HypervisorKind::QemuSnp),
            "firecracker" | "fc" => Ok(HypervisorKind::Firecracker),
            "acrn" => Ok(HypervisorKind::Acrn),
            "cloud-hypervisor" | "clh" => Ok(HypervisorKind::CloudHypervisor),
            "cloud-hypervisor-snp" | "clh-snp" => Ok(HypervisorKind::CloudHypervisorSnp),
            "stratovirt" => Ok(HypervisorKind::Stratovirt),
            _ => Err(HypervisorKindFromStrError(String::from(s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypervisor_from_str() {
        assert_eq!(HypervisorKind::from_str("qemu"), Ok(HypervisorKind::Qemu));
        assert_eq!(
            HypervisorKind::from_str("fc"),
            Ok(HypervisorKind::Firecracker)
        );
        assert_eq!(
            HypervisorKind::from_str("clh-snp"),
            Ok(HypervisorKind::CloudHypervisorSnp)
        );
        assert_eq!(
            format!("{}", HypervisorKind::from_str("xen").unwrap_err()),
            "Unknown hypervisor: xen"
        );
    }

    #[test]
    fn display_round_trip() {
        for kind in HypervisorKind::ALL {
            assert_eq!(HypervisorKind::from_str(&kind.to_string()), Ok(kind));
        }
    }

    #[test]
    fn wire_form_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&HypervisorKind::CloudHypervisorSnp).unwrap(),
            "\"cloud-hypervisor-snp\""
        );
        assert_eq!(
            serde_json::from_str::<HypervisorKind>("\"qemu-tdx\"").unwrap(),
            HypervisorKind::QemuTdx
        );
    }

    #[test]
    fn binary_lookup_follows_table() {
        let amd64 = ArchOptions::for_arch(Arch::Amd64);
        assert_eq!(
            HypervisorKind::Qemu.binary(&amd64),
            Some("qemu-system-x86_64")
        );
        assert_eq!(HypervisorKind::Firecracker.companion(&amd64), Some("jailer"));
        assert_eq!(HypervisorKind::Acrn.companion(&amd64), Some("acrnctl"));
        assert_eq!(HypervisorKind::Qemu.companion(&amd64), None);

        let s390x = ArchOptions::for_arch(Arch::S390x);
        assert_eq!(HypervisorKind::Firecracker.binary(&s390x), None);
    }

    #[test]
    fn support_matrix() {
        for kind in HypervisorKind::ALL {
            assert!(kind.supported_on(Arch::Amd64), "{kind}");
        }
        assert!(HypervisorKind::Qemu.supported_on(Arch::S390x));
        assert!(!HypervisorKind::Acrn.supported_on(Arch::Arm64));
        assert!(!HypervisorKind::QemuTdx.supported_on(Arch::Ppc64le));
    }

    #[test]
    fn template_keys_include_binary_key() {
        for kind in HypervisorKind::ALL {
            assert!(
                kind.template_keys().contains(&kind.binary_key()),
                "{kind}"
            );
            if let Some(companion) = kind.companion_key() {
                assert!(kind.template_keys().contains(&companion), "{kind}");
            }
        }
    }
}
