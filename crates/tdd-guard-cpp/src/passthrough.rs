//! Stdin tee: every line reaches stdout before anything is analyzed.

use std::io::{self, BufRead, Write};
use tracing::warn;

/// Echo `input` to `output` line by line and return the captured lines.
///
/// Lines are echoed verbatim (a missing final newline is added) and flushed
/// one at a time. Captured lines have their `\n` / `\r\n` terminator removed
/// and invalid UTF-8 replaced. If the echo side fails (e.g. the reader closed
/// the pipe) capture continues without echoing; only read errors are returned.
pub fn tee_lines<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut echo = true;

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        if echo {
            if let Err(e) = echo_line(&mut output, &buf) {
                warn!(error = %e, "Stopped echoing test output");
                echo = false;
            }
        }

        let mut content = buf.as_slice();
        if let Some(rest) = content.strip_suffix(b"\n") {
            content = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        lines.push(String::from_utf8_lossy(content).into_owned());
    }

    Ok(lines)
}

fn echo_line<W: Write>(output: &mut W, raw: &[u8]) -> io::Result<()> {
    output.write_all(raw)?;
    if !raw.ends_with(b"\n") {
        output.write_all(b"\n")?;
    }
    output.flush()
}
