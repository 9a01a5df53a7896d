// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The `list` subcommand: the architecture / hypervisor support matrix.

use arch_options::{Arch, ArchOptions, HypervisorKind};

/// One line per architecture with the hypervisors its default table
/// carries.
pub fn list() -> String {
    let mut out = String::new();
    for arch in Arch::ALL {
        let options = ArchOptions::for_arch(arch);
        let supported: Vec<&str> = HypervisorKind::ALL
            .iter()
            .filter(|hypervisor| hypervisor.binary(&options).is_some())
            .map(|hypervisor| hypervisor.as_str())
            .collect();
        out.push_str(&format!("{arch}: {}\n", supported.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_shape() {
        let out = list();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), Arch::ALL.len());
        assert_eq!(
            lines[0],
            "amd64: qemu qemu-tdx qemu-snp firecracker acrn cloud-hypervisor \
             cloud-hypervisor-snp stratovirt"
        );
        assert_eq!(lines[3], "s390x: qemu");
    }
}
