//! HTML assembly primitives: the escape rule and a size-capped builder.

use crate::error::{AppError, Result};

/// Escape exactly `<`, `>`, and `&`; no other byte is transformed.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            other => out.push(other),
        }
    }
    out
}

/// Growable output buffer with a hard size cap.
///
/// The whole document is accumulated here and written to the transport in
/// one reply. Exceeding the cap is an explicit `PageTooLarge` error; the
/// buffer is left as it was, nothing is partially appended.
pub struct HtmlBuf {
    buf: String,
    limit: usize,
}

impl HtmlBuf {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: String::new(),
            limit,
        }
    }

    pub fn push(&mut self, s: &str) -> Result<()> {
        if self.buf.len() + s.len() > self.limit {
            return Err(AppError::PageTooLarge(self.limit));
        }
        self.buf.push_str(s);
        Ok(())
    }

    pub fn push_escaped(&mut self, text: &str) -> Result<()> {
        let escaped = escape_html(text);
        self.push(&escaped)
    }

    /// Escape raw object bytes. Invalid UTF-8 sequences are replaced;
    /// everything else passes through verbatim, newlines included.
    pub fn push_escaped_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.push_escaped(&String::from_utf8_lossy(bytes))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
