// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! ppc64le option defaults.

use super::ArchOptions;

pub(super) fn options() -> ArchOptions {
    ArchOptions {
        machine_type: String::from("pseries"),
        // Hash MMU; radix is not supported under nested virtualization.
        kernel_params: String::from("disable_radix"),
        machine_accelerators: String::from(
            "cap-cfpc=broken,cap-sbbc=broken,cap-ibs=broken,cap-large-decr=off,cap-ccf-assist=off",
        ),
        cpu_features: String::new(),
        tdx_cpu_features: None,
        qemu_cmd: String::from("qemu-system-ppc64"),
        qemu_tdx_cmd: None,
        qemu_snp_cmd: None,
        fc_cmd: None,
        fc_jailer_cmd: None,
        acrn_cmd: None,
        acrn_ctl_cmd: None,
        clh_cmd: None,
        clh_snp_cmd: None,
        stratovirt_cmd: None,
        def_static_resource_mgmt_clh: false,
    }
}
