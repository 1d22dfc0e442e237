//! Input feeding.

use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Normalizes one input line into a domain, or `None` for lines to skip.
///
/// Lines are trimmed and lower-cased; blank lines and `#` comments are skipped.
pub fn normalize_domain(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Sends every domain of `reader` into the input channel, then closes it.
///
/// Lines are read as raw bytes. A line that is not valid UTF-8 is decoded
/// lossily and still submitted, so it fails on its own as an invalid domain
/// instead of ending the input.
///
/// Returns the number of domains submitted. Stops early (without error) when
/// every worker has gone away.
///
/// # Errors
///
/// Returns the I/O error of the underlying reader; the channel is closed either way.
pub async fn feed_domains<R>(mut reader: R, input: mpsc::Sender<String>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut line_number = 0usize;
    let mut submitted = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            log::warn!("Input line {line_number} is not valid UTF-8");
        }
        let Some(domain) = normalize_domain(&line) else {
            continue;
        };
        if input.send(domain).await.is_err() {
            log::warn!("All workers stopped, {submitted} domains submitted before input was exhausted");
            break;
        }
        submitted += 1;
    }

    // Dropping the sender closes the input channel for the workers
    drop(input);
    Ok(submitted)
}
