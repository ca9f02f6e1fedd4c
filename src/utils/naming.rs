/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Display name sanitization
//!
//! The portal only accepts ASCII letters, digits and whitespace in display
//! names. Human supplied names are transliterated to that alphabet; when
//! the transliteration changed anything, an MD5 digest of the original
//! input is appended so that two visually distinct names never collapse
//! into the same portal name.

use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9A-Za-z \t\n\r\x0B\x0C]").expect("valid name filter pattern")
});

/// Letters that have no canonical decomposition into a base letter
fn ligature(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ß' => "ss",
        'Æ' => "AE",
        'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        'Ø' => "O",
        'ø' => "o",
        'Ł' => "L",
        'ł' => "l",
        'Đ' => "D",
        'đ' => "d",
        'Þ' => "Th",
        'þ' => "th",
        _ => return None,
    };
    Some(replacement)
}

/// Best-effort Latin transliteration: accents are stripped, a few
/// ligatures expanded, everything else passes through untouched.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        match ligature(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Lowercase hex MD5 digest of `input`
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Normalizes a display name into something the portal accepts
///
/// `"MyApp"` comes back unchanged; `"Café"` becomes `"Cafe "` followed by
/// the MD5 digest of `"Café"`.
pub fn valid_name_for(input: &str) -> String {
    let latinized = transliterate(input);
    let mut latinized = DISALLOWED.replace_all(&latinized, "").into_owned();

    // The result may now be empty, or equal to the sanitized form of
    // another name.
    if latinized != input {
        latinized.push(' ');
        latinized.push_str(&md5_hex(input));
    }
    latinized
}
