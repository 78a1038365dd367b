//! Character content preparation: HTML escaping and the Hebrew adjustments
//! needed by older Android web views.

const HEBREW_SOF_PASUQ: char = '\u{05C3}';

/// Escape text for an HTML text node.
pub(super) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a single-quoted HTML attribute value.
pub(super) fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Vowel points (U+05B0–U+05C2 except sof pasuq and maqaf) and cantillation
/// marks (U+0591–U+05AF).
fn is_hebrew_point(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05AF}' | '\u{05B0}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}')
}

/// Strip points that confuse bidi layout and isolate sof pasuq so it stays
/// at the end of the verse.
pub(super) fn adjust_hebrew(s: &str) -> String {
    if !s.chars().any(|c| is_hebrew_point(c) || c == HEBREW_SOF_PASUQ) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if is_hebrew_point(c) {
            continue;
        }
        if c == HEBREW_SOF_PASUQ {
            out.push_str("<span dir='rtl'>");
            out.push(c);
            out.push_str("</span> ");
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }

    #[test]
    fn removes_points_and_wraps_sof_pasuq() {
        // bet + sheva + resh, then sof pasuq
        let input = "\u{05D1}\u{05B0}\u{05E8}\u{05C3}";
        assert_eq!(adjust_hebrew(input), "\u{05D1}\u{05E8}<span dir='rtl'>\u{05C3}</span> ");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(adjust_hebrew("In the beginning"), "In the beginning");
    }
}
