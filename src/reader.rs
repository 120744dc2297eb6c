//! Adaptive read loop: decides when buffered input is ready to colorize.
//!
//! Upstream programs write in arbitrarily small pieces that can split one
//! logical line across several reads. Matching a fragment against anchored
//! patterns would misfire, so after every chunk the loop waits a short
//! bounded interval for evidence that the producer is still mid-line. More
//! data before the deadline means "keep the partial line buffered"; silence
//! means "flush everything, nothing more is coming soon". The timeout bounds
//! added latency so interactive use stays responsive.

use crate::buffer::INPUT_MAX;
use crate::session::Session;
use std::io::{self, Read};
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::time;

/// Bounded wait before assuming no more output is coming for the current
/// line.
pub const WAIT_FOR_NEW_LINE: Duration = Duration::from_micros(500);

/// Spawn the stdin reader thread.
///
/// Chunks of at most [`INPUT_MAX`] bytes are forwarded over a channel of
/// capacity 1, so a producer blocked on a full pipe still throttles us.
/// End of stream and read errors both close the channel — either way the
/// loop shuts down cleanly.
pub fn spawn_stdin_reader() -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut chunk = vec![0u8; INPUT_MAX];
        loop {
            match stdin.read(&mut chunk) {
                Ok(0) => break, // end of stream
                Ok(n) => {
                    if tx.blocking_send(chunk[..n].to_vec()).is_err() {
                        break; // consumer gone
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("Input read failed, treating as end of stream: {e}");
                    break;
                }
            }
        }
        log::info!("Input stream closed");
    });
    rx
}

/// Drive the session until the input channel closes.
///
/// Two steady states per outer iteration: **Reading** blocks for the next
/// chunk; **Deciding** waits up to `wait` for more. When more data arrives
/// mid-wait the buffered bytes are processed in strict-line mode — unless
/// at most one byte of room remains, in which case everything is flushed
/// (failsafe for pathologically long or never-terminated lines). A timeout
/// flushes everything and returns to Reading.
pub async fn run<W: io::Write>(
    session: &mut Session<W>,
    mut rx: Receiver<Vec<u8>>,
    wait: Duration,
) -> io::Result<()> {
    loop {
        // Reading: block until the producer delivers a chunk
        let Some(chunk) = rx.recv().await else { break };
        session.append_chunk(&chunk)?;

        // Deciding: bounded wait for evidence of more output
        loop {
            match time::timeout(wait, rx.recv()).await {
                Ok(Some(next)) => {
                    let strict = session.buffer().remaining() > 1;
                    session.process(strict)?;
                    session.append_chunk(&next)?;
                }
                Ok(None) => {
                    // End of stream mid-decide
                    session.process(false)?;
                    return Ok(());
                }
                Err(_elapsed) => {
                    // Producer paused; show what we have, partial line included
                    session.process(false)?;
                    break;
                }
            }
        }
    }
    session.process(false)?;
    Ok(())
}
