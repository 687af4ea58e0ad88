//! # shimrun
//! Thin launcher in front of the `container-shim` runtime binary. It
//! validates the invocation, resolves the shim and the rootfs, then hands
//! the terminal over to the shim and mirrors its exit status.
mod commands;
mod error;
mod logger;
mod paths;
mod shim;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Opts {
    #[clap(flatten)]
    global: GlobalOpts,

    #[clap(subcommand)]
    subcmd: SubCommand,
}

// Observability-only flags; none of them change what gets launched.
#[derive(Parser, Debug)]
struct GlobalOpts {
    /// Set the log file to write shimrun logs to (default is '/dev/stderr')
    #[clap(short, long)]
    log: Option<PathBuf>,
    /// Change log level to debug
    #[clap(long)]
    debug: bool,
}

#[derive(Parser, Debug)]
enum SubCommand {
    Run(commands::run::Run),
}

const USAGE_EXAMPLE: &str = "example: shimrun run ./rootfs /bin/sh";

/// Entry point. Parse failures exit 1 with clap's usage plus a one-line
/// example, before any path is resolved or any process is spawned. A launch
/// failure exits 1 with the error chain on stderr; a successful launch exits
/// with the shim's own exit code.
fn main() -> Result<()> {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let code = usage_exit_code(&err);
            let _ = err.print();
            if code != 0 {
                eprintln!("{}", USAGE_EXAMPLE);
            }
            process::exit(code);
        }
    };

    if let Err(e) = logger::init(opts.global.debug, opts.global.log) {
        eprintln!("log init failed: {:?}", e);
    }

    match opts.subcmd {
        SubCommand::Run(run) => {
            let code = commands::run::run(run)?;
            process::exit(code)
        }
    }
}

fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        // help and version are requested output, not misuse
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
