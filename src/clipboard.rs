// Clipboard copy through the terminal (OSC 52)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};
use tracing::debug;

/// Escape sequence asking the terminal to put `text` on the clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Copy `text` to the system clipboard of the attached terminal
pub fn copy(text: &str) -> io::Result<()> {
    copy_to(&mut io::stdout().lock(), text)
}

pub fn copy_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()?;
    debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_copy_to_writer() {
        let mut buf = Vec::new();
        copy_to(&mut buf, "Hello").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b]52;c;SGVsbG8=\x07");
    }
}
