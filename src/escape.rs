//! The fixed escape set shared by the reader and the writer.
//!
//! Six characters are inter-convertible, listed here in priority order:
//!
//! | raw      | encoded   |
//! |----------|-----------|
//! | U+00A0   | `&nbsp;`  |
//! | `&`      | `&amp;`   |
//! | `>`      | `&gt;`    |
//! | `<`      | `&lt;`    |
//! | `'`      | `&apos;`  |
//! | `"`      | `&#34;`   |
//!
//! Both directions work in a single pass, so `decode(&encode(s)) == s` holds
//! for any string, including ones that already contain entity-like text.

use memchr::memchr;
use std::borrow::Cow;

/// (raw, entity) pairs in priority order.
const ESCAPES: [(char, &str); 6] = [
    ('\u{a0}', "&nbsp;"),
    ('&', "&amp;"),
    ('>', "&gt;"),
    ('<', "&lt;"),
    ('\'', "&apos;"),
    ('"', "&#34;"),
];

fn entity_for(c: char) -> Option<&'static str> {
    ESCAPES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, entity)| *entity)
}

/// Replaces every raw special character with its entity.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn encode(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| entity_for(c).is_some()) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match entity_for(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Replaces each recognised entity with its raw character.
///
/// Unknown references such as `&copy;` or a lone `&` are kept verbatim.
pub fn decode(input: &str) -> Cow<'_, str> {
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ESCAPES
            .iter()
            .find(|(_, entity)| rest.starts_with(entity))
        {
            Some((raw, entity)) => {
                out.push(*raw);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_all_specials() {
        assert_eq!(
            encode("a\u{a0}b & <c> 'd' \"e\""),
            "a&nbsp;b &amp; &lt;c&gt; &apos;d&apos; &#34;e&#34;"
        );
    }

    #[test]
    fn test_encode_borrows_plain_text() {
        assert!(matches!(encode("plain text"), Cow::Borrowed(_)));
        assert!(matches!(decode("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_all_entities() {
        assert_eq!(
            decode("&nbsp;&amp;&gt;&lt;&apos;&#34;"),
            "\u{a0}&><'\""
        );
    }

    #[test]
    fn test_decode_is_single_pass() {
        // `&amp;lt;` is an escaped ampersand followed by "lt;", not `<`.
        assert_eq!(decode("&amp;lt;"), "&lt;");
        assert_eq!(decode("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_decode_keeps_unknown_references() {
        assert_eq!(decode("&copy; & &#65; &"), "&copy; & &#65; &");
    }

    #[test]
    fn test_entity_text_survives_round_trip() {
        for s in ["&lt;", "&amp;&gt;", "a & b", "&#34;quoted&#34;", "&nbsp;"] {
            assert_eq!(decode(&encode(s)), s);
        }
    }
}
