//! Word handler and the Strong's/morphology decorator.
//!
//! ```xml
//! <w lemma="strong:H0430">God</w>
//! <w lemma="strong:H0853 strong:H01254" morph="strongMorph:TH8804">created</w>
//! <w lemma="strong:G652" morph="robinson:N-NSM" src="2">an apostle</w>
//! ```
//!
//! The word's text is written as usual; the reference links follow it when
//! the element closes.

use crate::diagnostics;
use crate::model::Attributes;

use super::constants::*;
use super::context::RenderContext;
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;
use super::text::{escape_attr, escape_text};

pub(super) struct WordHandler;

pub(super) static WORD: WordHandler = WordHandler;

impl TagHandler for WordHandler {
    fn tag_name(&self) -> &'static str {
        "w"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        let show_strongs = cx.options.show_strongs;
        let show_morphology = cx.options.show_morphology;
        if !show_strongs && !show_morphology {
            return FrameState::Empty;
        }
        let fragments = decorate(
            attrs.get("lemma").unwrap_or(""),
            attrs.get("morph").unwrap_or(""),
            show_strongs,
            show_morphology,
        );
        if fragments.is_empty() {
            FrameState::Empty
        } else {
            FrameState::Lexical(fragments)
        }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        let FrameState::Lexical(fragments) = state else {
            return;
        };
        for fragment in &fragments {
            // separator between adjacent tags and words
            cx.write(SPACE);
            cx.write(fragment);
        }
        cx.write(SPACE);
    }
}

// ─── Decorator ───────────────────────────────────────────────────────

/// Build the merged link fragments for one word, in emission order.
///
/// Strong's and morphology links pair up by position; the merged list is
/// emitted in reverse, which matches the order other reference tools show.
pub(super) fn decorate(lemma: &str, morph: &str, show_strongs: bool, show_morphology: bool) -> Vec<String> {
    let strongs = if show_strongs { strongs_links(lemma) } else { Vec::new() };
    let morphs = if show_morphology { morph_links(morph) } else { Vec::new() };

    let len = strongs.len().max(morphs.len());
    let mut merged = Vec::with_capacity(len);
    for i in 0..len {
        let mut fragment = String::new();
        if let Some(link) = strongs.get(i) {
            fragment.push_str(link);
        }
        if let Some(link) = morphs.get(i) {
            fragment.push_str(link);
        }
        merged.push(fragment);
    }
    merged.reverse();
    merged
}

/// `strong:H0430` → `<a href='hdef:00430' class='strongs'>H0430</a>`
fn strongs_links(lemma: &str) -> Vec<String> {
    lemma
        .split_whitespace()
        .filter(|token| token.len() > LEMMA_STRONGS.len() + 2)
        .filter_map(|token| token.strip_prefix(LEMMA_STRONGS))
        .filter_map(|reference| {
            let (protocol, number) = if let Some(n) = reference.strip_prefix('H') {
                (HEBREW_DEF_PROTOCOL, n)
            } else if let Some(n) = reference.strip_prefix('G') {
                (GREEK_DEF_PROTOCOL, n)
            } else {
                diagnostics::malformed_attribute("w", "lemma", Some(reference));
                return None;
            };
            let padded = format!("{number:0>width$}", width = STRONGS_PAD_WIDTH);
            Some(format!(
                "<a href='{protocol}:{}' class='{CLASS_STRONGS}'>{}</a>",
                escape_attr(&padded),
                escape_text(reference),
            ))
        })
        .collect()
}

/// `robinson:N-NSM` → `<a href='robinson:N-NSM' class='morphology'>N-NSM</a>`
fn morph_links(morph: &str) -> Vec<String> {
    morph
        .split_whitespace()
        .filter_map(|token| {
            MORPH_PREFIXES.iter().find_map(|prefix| {
                if token.len() <= prefix.len() + 2 {
                    return None;
                }
                token.strip_prefix(prefix).map(|display| {
                    format!(
                        "<a href='{}' class='{CLASS_MORPHOLOGY}'>{}</a>",
                        escape_attr(token),
                        escape_text(display),
                    )
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_hebrew_reference() {
        assert_eq!(
            decorate("strong:H0430", "", true, true),
            vec!["<a href='hdef:00430' class='strongs'>H0430</a>".to_string()]
        );
    }

    #[test]
    fn short_greek_number_is_padded() {
        assert_eq!(
            decorate("strong:G652", "robinson:N-NSM", true, true),
            vec!["<a href='gdef:00652' class='strongs'>G652</a><a href='robinson:N-NSM' class='morphology'>N-NSM</a>"
                .to_string()]
        );
    }

    #[test]
    fn pairs_by_position_then_reverses() {
        let fragments = decorate("strong:H0853 strong:H01254", "strongMorph:TH8804", true, true);
        assert_eq!(
            fragments,
            vec![
                "<a href='hdef:01254' class='strongs'>H01254</a>".to_string(),
                "<a href='hdef:00853' class='strongs'>H0853</a><a href='strongMorph:TH8804' class='morphology'>TH8804</a>"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn disabled_flags_drop_their_half() {
        assert_eq!(
            decorate("strong:G652", "robinson:N-NSM", false, true),
            vec!["<a href='robinson:N-NSM' class='morphology'>N-NSM</a>".to_string()]
        );
        assert_eq!(
            decorate("strong:G652", "robinson:N-NSM", true, false),
            vec!["<a href='gdef:00652' class='strongs'>G652</a>".to_string()]
        );
        assert!(decorate("strong:G652", "robinson:N-NSM", false, false).is_empty());
    }

    #[test]
    fn unprefixed_and_short_tokens_are_ignored() {
        assert!(decorate("lemma.TR:theos strong:H1", "packard:N x-foo:Y", true, true).is_empty());
        assert!(decorate("strong:X123", "", true, false).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let a = decorate("strong:H0853 strong:H01254", "strongMorph:TH8804", true, true);
        let b = decorate("strong:H0853 strong:H01254", "strongMorph:TH8804", true, true);
        assert_eq!(a, b);
    }
}
