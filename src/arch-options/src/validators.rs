// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Validation of option values before they reach the generated
//! configuration.

use crate::options::OptionKey;

const MAX_VALUE_LEN: usize = 128;

#[derive(Debug, PartialEq, Eq, thiserror::Error, displaydoc::Display)]
pub enum Error {
    /// Value for {0} is empty
    Empty(OptionKey),
    /// Value for {0} is {1} chars long; the maximum is {2}
    TooLong(OptionKey, usize, usize), // (key, length, max)
    /// Invalid char ({1}) at position {2} in value for {0}
    InvalidChar(OptionKey, char, usize), // (key, char, position)
    /// Malformed token ({1}) in value for {0}
    MalformedToken(OptionKey, String), // (key, token)
}

/// Checks that a binary name is a plain executable name for PATH lookup:
/// non-empty, leading alphanumeric, the rest alphanumeric or `-`, `_`,
/// `.`, `+`. The names are later invoked, so shell metacharacters,
/// whitespace and path separators are all rejected.
pub fn validate_binary_name(key: OptionKey, input: &str) -> Result<(), Error> {
    validate_word(key, input)
}

/// Checks a machine/board model name; same shape as a binary name.
pub fn validate_machine_type(key: OptionKey, input: &str) -> Result<(), Error> {
    validate_word(key, input)
}

fn validate_word(key: OptionKey, input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::Empty(key));
    }
    if input.len() > MAX_VALUE_LEN {
        return Err(Error::TooLong(key, input.len(), MAX_VALUE_LEN));
    }
    for (i, c) in input.chars().enumerate() {
        let valid = match i {
            0 => c.is_ascii_alphanumeric(),
            _ => c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '+',
        };
        if !valid {
            return Err(Error::InvalidChar(key, c, i));
        }
    }
    Ok(())
}

/// Checks a comma-separated feature list: each token is `name` or
/// `name=value` with an optional `+`/`-` prefix. Empty input means no
/// features and is allowed.
pub fn validate_feature_list(key: OptionKey, input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Ok(());
    }
    if input.len() > MAX_VALUE_LEN {
        return Err(Error::TooLong(key, input.len(), MAX_VALUE_LEN));
    }
    for token in input.split(',') {
        let stripped = token
            .strip_prefix(['+', '-'])
            .unwrap_or(token);
        let (name, value) = match stripped.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (stripped, None),
        };
        if !is_feature_word(name) || !value.is_none_or(is_feature_word) {
            return Err(Error::MalformedToken(key, String::from(token)));
        }
    }
    Ok(())
}

fn is_feature_word(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Checks additional kernel boot parameters: any printable text,
/// space-separated; control characters (including newlines) are rejected
/// so a value can never break out of the generated line.
pub fn validate_kernel_params(input: &str) -> Result<(), Error> {
    for (i, c) in input.chars().enumerate() {
        if c.is_control() {
            return Err(Error::InvalidChar(OptionKey::KernelParams, c, i));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_binary_name() {
        assert!(validate_binary_name(OptionKey::QemuCmd, "qemu-system-x86_64").is_ok());
        assert!(validate_binary_name(OptionKey::ClhSnpCmd, "cloud-hypervisor-snp").is_ok());
        assert!(validate_binary_name(OptionKey::AcrnCmd, "acrn-dm").is_ok());

        assert_eq!(
            format!("{}", validate_binary_name(OptionKey::FcCmd, "").unwrap_err()),
            "Value for FCCMD is empty"
        );
        assert_eq!(
            validate_binary_name(OptionKey::FcCmd, "fire cracker").unwrap_err(),
            Error::InvalidChar(OptionKey::FcCmd, ' ', 4)
        );
        // Path separators, shell metacharacters and leading dashes are all
        // rejected.
        assert!(validate_binary_name(OptionKey::FcCmd, "/usr/bin/firecracker").is_err());
        assert!(validate_binary_name(OptionKey::FcCmd, "../firecracker").is_err());
        assert!(validate_binary_name(OptionKey::FcCmd, "qemu;reboot").is_err());
        assert!(validate_binary_name(OptionKey::FcCmd, "qemu$(id)").is_err());
        assert!(validate_binary_name(OptionKey::FcCmd, "-rf").is_err());
        assert_eq!(
            validate_binary_name(OptionKey::FcCmd, str::repeat("a", 129).as_str()).unwrap_err(),
            Error::TooLong(OptionKey::FcCmd, 129, 128)
        );
    }

    #[test]
    fn test_validate_feature_list() {
        assert!(validate_feature_list(OptionKey::CpuFeatures, "").is_ok());
        assert!(validate_feature_list(OptionKey::CpuFeatures, "pmu=off").is_ok());
        assert!(
            validate_feature_list(OptionKey::TdxCpuFeatures, "-vmx-rdseed-exit,pmu=off").is_ok()
        );
        assert!(validate_feature_list(OptionKey::CpuFeatures, "+avx2,-sgx").is_ok());
        assert!(
            validate_feature_list(
                OptionKey::MachineAccelerators,
                "cap-cfpc=broken,cap-large-decr=off"
            )
            .is_ok()
        );

        assert_eq!(
            validate_feature_list(OptionKey::CpuFeatures, "pmu=off,").unwrap_err(),
            Error::MalformedToken(OptionKey::CpuFeatures, String::new())
        );
        assert!(validate_feature_list(OptionKey::CpuFeatures, ",pmu=off").is_err());
        assert!(validate_feature_list(OptionKey::CpuFeatures, "pmu off").is_err());
        assert!(validate_feature_list(OptionKey::CpuFeatures, "=off").is_err());
        assert!(validate_feature_list(OptionKey::CpuFeatures, "pmu=off;id").is_err());
        assert_eq!(
            format!(
                "{}",
                validate_feature_list(OptionKey::CpuFeatures, "pmu=").unwrap_err()
            ),
            "Malformed token (pmu=) in value for CPUFEATURES"
        );
    }

    #[test]
    fn test_validate_kernel_params() {
        assert!(validate_kernel_params("").is_ok());
        assert!(validate_kernel_params("disable_radix").is_ok());
        assert!(validate_kernel_params("console=hvc0 quiet systemd.show_status=false").is_ok());

        assert_eq!(
            validate_kernel_params("quiet\ninit=/bin/sh").unwrap_err(),
            Error::InvalidChar(OptionKey::KernelParams, '\n', 5)
        );
        assert!(validate_kernel_params("quiet\tsplash").is_err());
    }
}
