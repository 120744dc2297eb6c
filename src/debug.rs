//! Logging bridge for par-tint.
//!
//! stdout *is* the data stream here, so log output must never land on it.
//! All `log::info!()` etc. routes to a session log file in the temp
//! directory; when `RUST_LOG` is set, messages are mirrored to stderr for
//! debugging. Level precedence: CLI `--log-level` flag, then `RUST_LOG`,
//! then warn.

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    mirror_stderr: bool,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut f = file.lock();
            let _ = f.write_all(line.as_bytes());
            let _ = f.flush();
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {}
}

fn timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(now) => format!("{}.{:06}", now.as_secs(), now.subsec_micros()),
        Err(_) => "0.000000".into(),
    }
}

fn log_file_path() -> std::path::PathBuf {
    #[cfg(unix)]
    let path = std::path::PathBuf::from("/tmp/par_tint_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("par_tint_debug.log");
    path
}

/// Install the global logger. Safe to call once at startup; a second call
/// is a no-op.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok());
    let level = cli_level.or(env_filter).unwrap_or(LevelFilter::Warn);

    // Open failures are silent: a missing log file must never disturb the
    // colorized stream
    let file = if level > LevelFilter::Off {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path())
            .ok()
            .map(Mutex::new)
    } else {
        None
    };

    let bridge = Box::new(LogBridge {
        level,
        file,
        mirror_stderr: std::env::var("RUST_LOG").is_ok(),
    });
    if log::set_boxed_logger(bridge).is_ok() {
        log::set_max_level(level);
    }
}
