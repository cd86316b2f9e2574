//! Content-type checks and character decoding for fetched pages.
//!
//! Fetched bytes are decoded to UTF-8 before parsing. The charset comes from
//! the `Content-Type` header when the server supplies one, otherwise from a
//! `<meta>` declaration in the first kilobyte of the document, otherwise
//! UTF-8. Decoding is lossy; invalid sequences become U+FFFD rather than
//! failing the scrape.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `charset=...` inside a Content-Type header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*"?([^";\s]+)"#).expect("valid regex")
});

/// Match `<meta charset="...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Check whether a Content-Type header value indicates an HTML document.
///
/// Parameters (`; charset=...`) are ignored; the match is on the media type
/// alone, case-insensitively.
#[must_use]
pub fn is_html(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media_type == "text/html" || media_type == "application/xhtml+xml"
}

/// Decode fetched bytes to a UTF-8 string.
///
/// Charset priority: Content-Type header, then `<meta>` declaration in the
/// first 1024 bytes, then UTF-8.
#[must_use]
pub fn decode(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_header)
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(bytes).into_owned();
    }

    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

fn charset_from_header(content_type: &str) -> Option<&'static Encoding> {
    let label = HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))?;
    Encoding::for_label(label.as_str().as_bytes())
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    // Only the document head is worth scanning for a declaration.
    let head = &bytes[..bytes.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    let label = META_CHARSET_RE.captures(&head_str).and_then(|c| c.get(1))?;
    Encoding::for_label(label.as_str().as_bytes())
}
