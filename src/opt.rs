//! The command line arguments of the binary.

use std::path::PathBuf;

use clap::Parser;

/// Manager for the testcases of a task.
///
/// Scans a directory for `name.in`/`name.ans` pairs, keeps them as an ordered list
/// annotated with time limit, memory limit, score and subtask id, and exports the
/// result to a YAML-like file (with round-trip import). Without `--export` an
/// interactive prompt is started, type `help` there for the available commands.
#[derive(Parser, Debug)]
#[clap(name = "tcman", version)]
pub struct Opt {
    /// Directory with the .in/.ans files to scan at startup.
    pub dir: Option<PathBuf>,

    /// Import this file right after the initial scan.
    #[clap(long, requires = "dir")]
    pub import: Option<PathBuf>,

    /// Apply the imported file order without asking for confirmation.
    #[clap(long, requires = "import")]
    pub apply_order: bool,

    /// Export to this file and exit, without starting the interactive prompt.
    #[clap(long, short = 'o', requires = "dir")]
    pub export: Option<PathBuf>,

    #[clap(flatten)]
    pub logger: LoggerOpt,
}

/// CLI arguments for configuring the logger.
#[derive(Parser, Debug, Clone)]
pub struct LoggerOpt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl LoggerOpt {
    /// Enable the logs based on the verbosity level.
    pub fn enable_log(&self) {
        if self.verbose > 0 {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
        match self.verbose {
            0 => {}
            1 => std::env::set_var("RUST_LOG", "info"),
            2 => std::env::set_var("RUST_LOG", "debug"),
            _ => std::env::set_var("RUST_LOG", "trace"),
        }
        env_logger::Builder::from_default_env()
            .format_timestamp_nanos()
            .init();
        better_panic::install();
    }
}
