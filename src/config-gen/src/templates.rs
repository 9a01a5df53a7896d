// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Embedded configuration templates, one per hypervisor family.

use arch_options::HypervisorKind;

/// The embedded template for `hypervisor`.
///
/// The confidential-computing variants share their family's template; the
/// binary path and CPU feature list are what differ, and both are derived
/// values.
pub fn embedded(hypervisor: HypervisorKind) -> &'static str {
    match hypervisor {
        HypervisorKind::Qemu | HypervisorKind::QemuTdx | HypervisorKind::QemuSnp => {
            include_str!("../templates/configuration-qemu.toml.in")
        }
        HypervisorKind::Firecracker => include_str!("../templates/configuration-fc.toml.in"),
        HypervisorKind::Acrn => include_str!("../templates/configuration-acrn.toml.in"),
        HypervisorKind::CloudHypervisor | HypervisorKind::CloudHypervisorSnp => {
            include_str!("../templates/configuration-clh.toml.in")
        }
        HypervisorKind::Stratovirt => {
            include_str!("../templates/configuration-stratovirt.toml.in")
        }
    }
}
