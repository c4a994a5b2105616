//! Line-oriented variable update feed
//!
//! Parses `NAME=VALUE` lines from a buffered reader and applies them to the
//! store, firing change notifications. Blank lines and `#` comments are
//! ignored; malformed lines are logged and skipped.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::MemoryProvider;

/// Apply updates from the reader until EOF, returning how many were applied
pub async fn drive_updates<R>(reader: R, provider: &MemoryProvider) -> u64
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut applied = 0u64;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match line.split_once('=') {
                    Some((name, value)) if !name.trim().is_empty() => {
                        provider.set(name.trim(), value.trim());
                        applied += 1;
                    }
                    _ => warn!(line, "Ignoring malformed update line"),
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Update feed read error");
                break;
            }
        }
    }

    debug!(applied, "Update feed finished");
    applied
}
