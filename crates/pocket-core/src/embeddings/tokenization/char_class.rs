//! Unicode character classes the BERT tokenizer splits on.

use once_cell::sync::Lazy;
use regex::Regex;

// Single-char matchers over Unicode general categories.
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Z}$").expect("valid regex"));
static CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Cc}\p{Cf}]$").expect("valid regex"));
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}$").expect("valid regex"));

fn in_class(re: &Regex, c: char) -> bool {
    let mut buf = [0u8; 4];
    re.is_match(c.encode_utf8(&mut buf))
}

/// Space, tab, newline, CR, or any space/line/paragraph separator.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r') || in_class(&SEPARATOR, c)
}

/// Control or format character. Tab, newline and CR count as whitespace instead.
pub fn is_control(c: char) -> bool {
    if matches!(c, '\t' | '\n' | '\r') {
        return false;
    }
    in_class(&CONTROL, c)
}

/// Any Unicode punctuation category (connector, dash, open/close, quotes, other).
pub fn is_punctuation(c: char) -> bool {
    in_class(&PUNCTUATION, c)
}

/// CJK Unified Ideographs and their extension/compatibility blocks.
pub fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x4E00..=0x9FFF
            | 0x3400..=0x4DBF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B820..=0x2CEAF
            | 0xF900..=0xFAFF
            | 0x2F800..=0x2FA1F
    )
}
