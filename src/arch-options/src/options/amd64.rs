// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! amd64 option defaults.

use super::ArchOptions;

pub(super) fn options() -> ArchOptions {
    ArchOptions {
        machine_type: String::from("q35"),
        kernel_params: String::new(),
        machine_accelerators: String::new(),
        cpu_features: String::from("pmu=off"),
        // A leading `-` on a feature strips it from the guest CPU model.
        tdx_cpu_features: Some(String::from("-vmx-rdseed-exit,pmu=off")),
        qemu_cmd: String::from("qemu-system-x86_64"),
        // QEMU builds with experimental TDX and SNP support ship under
        // their own names.
        qemu_tdx_cmd: Some(String::from("qemu-system-x86_64-tdx-experimental")),
        qemu_snp_cmd: Some(String::from("qemu-system-x86_64-snp-experimental")),
        fc_cmd: Some(String::from("firecracker")),
        fc_jailer_cmd: Some(String::from("jailer")),
        acrn_cmd: Some(String::from("acrn-dm")),
        acrn_ctl_cmd: Some(String::from("acrnctl")),
        clh_cmd: Some(String::from("cloud-hypervisor")),
        clh_snp_cmd: Some(String::from("cloud-hypervisor-snp")),
        stratovirt_cmd: Some(String::from("stratovirt")),
        def_static_resource_mgmt_clh: true,
    }
}
