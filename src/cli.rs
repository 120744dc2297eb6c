//! Command-line interface for par-tint.

use clap::Parser;
use std::path::PathBuf;

/// par-tint - streaming pattern highlighter for piped terminal output
#[derive(Parser)]
#[command(name = "par-tint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Override the rules file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the terminal window title at startup
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<log::LevelFilter>,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Explicit rules file, overriding the rc-file search
    pub config: Option<PathBuf>,
    /// Terminal title to set once at startup
    pub title: Option<String>,
    /// Log level override
    pub log_level: Option<log::LevelFilter>,
}

/// Process CLI arguments. Help and version exit via clap.
pub fn process_cli() -> RuntimeOptions {
    let cli = Cli::parse();
    RuntimeOptions {
        config: cli.config,
        title: cli.title,
        log_level: cli.log_level,
    }
}
