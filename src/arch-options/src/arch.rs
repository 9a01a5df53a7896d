// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Architectures a runtime configuration can be generated for.
///
/// The wire form is the Go-style name the build system keys its
/// per-architecture option fragments by (`amd64`, not `x86_64`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 64-bit x86.
    Amd64,
    /// 64-bit Arm.
    Arm64,
    /// Little-endian 64-bit PowerPC.
    Ppc64le,
    /// IBM Z.
    S390x,
}

impl Arch {
    /// Every supported architecture, in option-table order.
    pub const ALL: [Arch; 4] = [Arch::Amd64, Arch::Arm64, Arch::Ppc64le, Arch::S390x];

    /// The wire name of the architecture.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::Ppc64le => "ppc64le",
            Arch::S390x => "s390x",
        }
    }

    /// The architecture of the build host.
    ///
    /// Generation is cross-architecture; hosts outside the supported set
    /// fall back to amd64.
    pub const fn host() -> Arch {
        #[cfg(target_arch = "aarch64")]
        return Arch::Arm64;
        #[cfg(target_arch = "powerpc64")]
        return Arch::Ppc64le;
        #[cfg(target_arch = "s390x")]
        return Arch::S390x;
        #[cfg(not(any(
            target_arch = "aarch64",
            target_arch = "powerpc64",
            target_arch = "s390x"
        )))]
        Arch::Amd64
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for [`<Arch as FromStr>::from_str`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported architecture: {0}")]
pub struct ArchFromStrError(String);

impl FromStr for Arch {
    type Err = ArchFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "amd64" | "x86_64" => Ok(Arch::Amd64),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "ppc64le" | "powerpc64le" => Ok(Arch::Ppc64le),
            "s390x" => Ok(Arch::S390x),
            _ => Err(ArchFromStrError(String::from(s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arch_from_str() {
        assert_eq!(Arch::from_str("amd64"), Ok(Arch::Amd64));
        assert_eq!(Arch::from_str("x86_64"), Ok(Arch::Amd64));
        assert_eq!(Arch::from_str("AArch64"), Ok(Arch::Arm64));
        assert_eq!(Arch::from_str("ppc64le"), Ok(Arch::Ppc64le));
        assert_eq!(Arch::from_str("s390x"), Ok(Arch::S390x));
        assert_eq!(
            Arch::from_str("riscv64"),
            Err(ArchFromStrError(String::from("riscv64")))
        );
        assert_eq!(
            format!("{}", Arch::from_str("mips").unwrap_err()),
            "Unsupported architecture: mips"
        );
    }

    #[test]
    fn arch_display_round_trip() {
        for arch in Arch::ALL {
            assert_eq!(Arch::from_str(&arch.to_string()), Ok(arch));
        }
    }

    #[test]
    fn arch_wire_form() {
        assert_eq!(serde_json::to_string(&Arch::Amd64).unwrap(), "\"amd64\"");
        assert_eq!(
            serde_json::from_str::<Arch>("\"s390x\"").unwrap(),
            Arch::S390x
        );
    }

    #[test]
    fn host_is_supported() {
        assert!(Arch::ALL.contains(&Arch::host()));
    }
}
