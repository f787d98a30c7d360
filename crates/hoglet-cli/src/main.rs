//! # hoglet — namespace-isolated test-fixture launcher
//!
//! Creates a long-running dummy workload as PID 1 of a fresh PID
//! namespace and prints its PID. With `-t`, the workload also isolates a
//! network namespace and drives a pair of loopback TCP peers so tests
//! have a live socket endpoint to observe or kill.
//!
//! Killing the printed PID tears down the whole namespace, peers
//! included.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use hoglet_common::constants::{BIN_NAME, LAUNCHER_LOG_MODE};
use hoglet_common::types::LaunchOptions;

/// Disposable namespaced dummy workload for test harnesses.
#[derive(Parser, Debug)]
#[command(name = "hoglet", version, about, long_about = None)]
struct Cli {
    /// Redirect workload and launcher output to this file.
    #[arg(short = 'o', long = "log-file", value_name = "log_file")]
    log_file: Option<PathBuf>,

    /// Isolate a network namespace and generate loopback TCP traffic.
    #[arg(short = 't', long = "tcp-socket")]
    tcp_socket: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1 (clap's default is 2); --help/--version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{BIN_NAME}: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = LaunchOptions {
        log_file: cli.log_file.clone(),
        enable_traffic: cli.tcp_socket,
    };

    let pid = hoglet_core::launcher::launch(&options)?;
    tracing::debug!(pid = pid.as_raw(), "fixture launched");

    // The PID is the sole structured output and must land on the original
    // stdout, before any log rebinding.
    println!("{pid}");

    if let Some(path) = &options.log_file {
        hoglet_core::stdio::redirect_output_to(path, LAUNCHER_LOG_MODE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_file_short_and_long() {
        let cli = Cli::try_parse_from(["hoglet", "-o", "/tmp/t.log"]).expect("parse failed");
        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("/tmp/t.log")));

        let cli =
            Cli::try_parse_from(["hoglet", "--log-file", "/tmp/t.log"]).expect("parse failed");
        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("/tmp/t.log")));
    }

    #[test]
    fn traffic_flag_defaults_off() {
        let cli = Cli::try_parse_from(["hoglet"]).expect("parse failed");
        assert!(!cli.tcp_socket);
        assert!(cli.log_file.is_none());

        let cli = Cli::try_parse_from(["hoglet", "-t"]).expect("parse failed");
        assert!(cli.tcp_socket);

        let cli = Cli::try_parse_from(["hoglet", "--tcp-socket"]).expect("parse failed");
        assert!(cli.tcp_socket);
    }

    #[test]
    fn rejects_unknown_flags() {
        let err = Cli::try_parse_from(["hoglet", "--bogus"]).expect_err("parse should fail");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn log_file_requires_a_value() {
        let err = Cli::try_parse_from(["hoglet", "-o"]).expect_err("parse should fail");
        assert!(err.to_string().contains("--log-file"));
    }
}
