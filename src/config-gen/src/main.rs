// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fs::{read_to_string, write};
use std::path::PathBuf;

use arch_options::logger::{LOGGER, LevelFilter, LoggerConfig};
use arch_options::{Arch, HypervisorKind};
use clap::{Parser, Subcommand};
use log::info;

mod dump;
mod generate;
mod list;
mod templates;
mod verify;

const EXIT_CODE_ERROR: i32 = 1;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("Failed to operate file: {0}")]
    FileIo(#[from] std::io::Error),
    #[error("Failed to register logger: {0}")]
    LoggerInit(#[from] arch_options::logger::LoggerInitError),
    #[error("Failed to configure logger: {0}")]
    Logger(#[from] arch_options::logger::LoggerUpdateError),
    #[error("Failed to generate configuration: {0}")]
    Generate(#[from] generate::Error),
    #[error("Failed to dump options: {0}")]
    Dump(#[from] dump::Error),
    #[error("Verification failed:\n{0}")]
    Verify(#[from] verify::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Parser)]
#[command(
    version,
    about = "Generates and verifies the hypervisor runtime configuration."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Path of the file to write logs to; stdout when absent.
    #[arg(long, value_name = "PATH", global = true)]
    log_path: Option<PathBuf>,
    /// Log level filter.
    #[arg(long, value_name = "LEVEL", global = true)]
    level: Option<LevelFilter>,
    /// Show the log level in each log line.
    #[arg(long, global = true)]
    show_level: bool,
    /// Show the origin file and line in each log line.
    #[arg(long, global = true)]
    show_log_origin: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the runtime configuration for a hypervisor.
    Generate {
        /// Target architecture.
        #[arg(short, long, value_name = "ARCH", default_value_t = Arch::host())]
        arch: Arch,
        /// Hypervisor to target.
        #[arg(long, value_name = "HYPERVISOR")]
        hypervisor: HypervisorKind,
        /// Path of a JSON option override file.
        #[arg(long, value_name = "PATH")]
        overrides: Option<PathBuf>,
        /// Path of a template replacing the embedded one.
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,
        /// Path of the output file; `-` writes to stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Dump the resolved option table as JSON.
    Dump {
        /// Target architecture.
        #[arg(short, long, value_name = "ARCH", default_value_t = Arch::host())]
        arch: Arch,
        /// Path of a JSON option override file.
        #[arg(long, value_name = "PATH")]
        overrides: Option<PathBuf>,
        /// Path of the output file; stdout when absent.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Check option tables, key-set parity and template coverage.
    Verify {
        /// Restrict the check to one architecture.
        #[arg(short, long, value_name = "ARCH")]
        arch: Option<Arch>,
        /// Path of a JSON option override file.
        #[arg(long, value_name = "PATH")]
        overrides: Option<PathBuf>,
    },
    /// List the architecture / hypervisor support matrix.
    List,
}

fn run(cli: Cli) -> Result<()> {
    LOGGER.init()?;
    LOGGER.update(LoggerConfig {
        log_path: cli.log_path,
        level: cli.level,
        show_level: Some(cli.show_level),
        show_log_origin: Some(cli.show_log_origin),
        module: None,
    })?;

    match cli.command {
        Command::Generate {
            arch,
            hypervisor,
            overrides,
            template,
            output,
        } => {
            let overrides = overrides.map(read_to_string).transpose()?;
            let template = template.map(read_to_string).transpose()?;
            let rendered =
                generate::generate(arch, hypervisor, overrides.as_deref(), template.as_deref())?;
            let output = output
                .unwrap_or_else(|| PathBuf::from(format!("configuration-{hypervisor}.toml")));
            if output.as_os_str() == "-" {
                print!("{rendered}");
            } else {
                write(&output, &rendered)?;
                info!(
                    "Wrote {arch}/{hypervisor} configuration to {}",
                    output.display()
                );
            }
        }
        Command::Dump {
            arch,
            overrides,
            output,
        } => {
            let overrides = overrides.map(read_to_string).transpose()?;
            let json = dump::dump(arch, overrides.as_deref())?;
            match output {
                Some(path) if path.as_os_str() != "-" => {
                    write(&path, &json)?;
                    info!("Wrote {arch} option dump to {}", path.display());
                }
                _ => print!("{json}"),
            }
        }
        Command::Verify { arch, overrides } => {
            let overrides = overrides.map(read_to_string).transpose()?;
            let report = verify::verify(arch, overrides.as_deref())?;
            print!("{report}");
        }
        Command::List => print!("{}", list::list()),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_CODE_ERROR);
    }
}
