// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! arm64 option defaults.

use super::ArchOptions;

pub(super) fn options() -> ArchOptions {
    ArchOptions {
        machine_type: String::from("virt"),
        kernel_params: String::new(),
        machine_accelerators: String::new(),
        cpu_features: String::from("pmu=off"),
        // No confidential-computing or ACRN support on arm64.
        tdx_cpu_features: None,
        qemu_cmd: String::from("qemu-system-aarch64"),
        qemu_tdx_cmd: None,
        qemu_snp_cmd: None,
        fc_cmd: Some(String::from("firecracker")),
        fc_jailer_cmd: Some(String::from("jailer")),
        acrn_cmd: None,
        acrn_ctl_cmd: None,
        clh_cmd: Some(String::from("cloud-hypervisor")),
        clh_snp_cmd: None,
        stratovirt_cmd: Some(String::from("stratovirt")),
        def_static_resource_mgmt_clh: true,
    }
}
