//! Text normalization for email-safe output.
//!
//! Email clients disagree about everything except printable ASCII, so every
//! piece of extracted text and markup goes through [`normalize`] before it
//! reaches a fragment. Existing HTML character references pass through
//! untouched; the function never rewrites bytes below 0x80.

use deunicode::deunicode_char;

/// Normalize a string to printable ASCII plus numeric character references.
///
/// Two stages:
///
/// 1. **Gremlin fix**: code points U+0080..=U+009F are C1 controls in
///    Unicode but almost always bytes from a Windows-1252 document that was
///    decoded as Latin-1. Each is remapped through a fixed table to the
///    character the author meant (0x96 → en dash, 0x93 → left double
///    quotation mark, ...). Points without a table entry pass through to
///    stage two.
/// 2. **Transliteration**: remaining non-ASCII characters are replaced by
///    their closest ASCII approximation (diacritics stripped, typographic
///    punctuation simplified). A character with no approximation becomes a
///    numeric reference `&#NNNN;` rather than being dropped. An
///    approximation that lands on a markup-significant character (quotes,
///    angle brackets, ampersand) also becomes a reference: the function runs
///    over serialized HTML, and a curly quote inside an attribute value must
///    not turn into a raw `"`.
///
/// The output contains no byte >= 0x80, so applying `normalize` twice yields
/// the same result as once. Literal entity syntax in the input (`&amp;`) is
/// preserved as-is since `&`, `#`, and `;` are ASCII.
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for ch in input.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }

        let ch = fix_gremlin(ch);
        match deunicode_char(ch) {
            // An empty approximation would silently drop the character, and
            // a markup-significant one would corrupt serialized HTML; both
            // fall through to a numeric reference instead.
            Some(ascii) if usable_approximation(ascii) => out.push_str(ascii),
            _ => {
                out.push_str("&#");
                out.push_str(&u32::from(ch).to_string());
                out.push(';');
            }
        }
    }

    out
}

fn usable_approximation(ascii: &str) -> bool {
    !ascii.is_empty()
        && ascii.is_ascii()
        && !ascii.chars().any(|c| matches!(c, '"' | '\'' | '<' | '>' | '&'))
}

/// Remap a mis-decoded Windows-1252 byte to its intended code point.
///
/// The table covers exactly the 0x80-0x9F range; everything else is
/// returned unchanged. Positions undefined in Windows-1252 (0x81, 0x8D,
/// 0x8F, 0x90, 0x9D) also pass through.
#[must_use]
pub fn fix_gremlin(ch: char) -> char {
    match u32::from(ch) {
        0x80 => '\u{20AC}', // euro sign
        0x82 => '\u{201A}', // single low-9 quotation mark
        0x83 => '\u{0192}', // latin small letter f with hook
        0x84 => '\u{201E}', // double low-9 quotation mark
        0x85 => '\u{2026}', // horizontal ellipsis
        0x86 => '\u{2020}', // dagger
        0x87 => '\u{2021}', // double dagger
        0x88 => '\u{02C6}', // modifier letter circumflex accent
        0x89 => '\u{2030}', // per mille sign
        0x8A => '\u{0160}', // latin capital letter s with caron
        0x8B => '\u{2039}', // single left-pointing angle quotation mark
        0x8C => '\u{0152}', // latin capital ligature oe
        0x8E => '\u{017D}', // latin capital letter z with caron
        0x91 => '\u{2018}', // left single quotation mark
        0x92 => '\u{2019}', // right single quotation mark
        0x93 => '\u{201C}', // left double quotation mark
        0x94 => '\u{201D}', // right double quotation mark
        0x95 => '\u{2022}', // bullet
        0x96 => '\u{2013}', // en dash
        0x97 => '\u{2014}', // em dash
        0x98 => '\u{02DC}', // small tilde
        0x99 => '\u{2122}', // trade mark sign
        0x9A => '\u{0161}', // latin small letter s with caron
        0x9B => '\u{203A}', // single right-pointing angle quotation mark
        0x9C => '\u{0153}', // latin small ligature oe
        0x9E => '\u{017E}', // latin small letter z with caron
        0x9F => '\u{0178}', // latin capital letter y with diaeresis
        _ => ch,
    }
}
