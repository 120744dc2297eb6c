use anyhow::Result;
use par_tint::cli;
use par_tint::reader::{self, WAIT_FOR_NEW_LINE};
use par_tint::session::Session;
use par_tint_config::RulesConfig;
use std::io::Write;
use tokio::runtime;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();
    par_tint::debug::init_log_bridge(options.log_level);

    log::info!("Starting par-tint");

    // Terminal title, once, before any stream output
    if let Some(title) = &options.title {
        let mut stdout = std::io::stdout();
        write!(stdout, "\x1b]0;{title}\x07")?;
        stdout.flush()?;
    }

    let config = match RulesConfig::load(options.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("par-tint: error: {e}");
            std::process::exit(1);
        }
    };

    let mut session = Session::new(std::io::stdout());
    session.set_command_char(config.command_char);
    for rule in &config.rules {
        session.register_rule(&rule.pattern, &rule.style);
    }
    log::info!("{} highlight rule(s) active", session.registry().len());

    // One thread of control: the read loop, matching, and emission all run
    // on a current-thread runtime. The stdin reader is the only helper
    // thread, and it only feeds the channel.
    let rt = runtime::Builder::new_current_thread().enable_time().build()?;
    let rx = reader::spawn_stdin_reader();
    let result = rt.block_on(reader::run(&mut session, rx, WAIT_FOR_NEW_LINE));

    log::info!("Shutting down");
    if let Err(e) = session.shutdown(None) {
        log::warn!("Flush during shutdown failed: {e}");
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("par-tint: error: {e}");
            Err(e.into())
        }
    }
}
