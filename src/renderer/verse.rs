//! Verse handler. Writes the verse-number marker and keeps the verse
//! context current.
//!
//! ```xml
//! <verse osisID='Gen.1.1'/>In the beginning
//! <verse sID='Gen.1.2' osisID='Gen.1.2'/>And the earth<verse eID='Gen.1.2'/>
//! ```

use crate::diagnostics;
use crate::model::Attributes;

use super::constants::*;
use super::context::{RenderContext, VerseZero};
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;
use super::text::escape_attr;

pub(super) struct VerseHandler;

pub(super) static VERSE: VerseHandler = VerseHandler;

impl TagHandler for VerseHandler {
    fn tag_name(&self) -> &'static str {
        "verse"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        cx.release_preverse();

        let osis_id = attrs.non_empty("osisID").or_else(|| attrs.non_empty("sID"));
        if osis_id.is_none() && attrs.non_empty("eID").is_some() {
            // end milestone of a verse: nothing to render
            return FrameState::Empty;
        }
        cx.settle_verse_zero();

        let parsed = osis_id.map(|id| (id, parse_osis_id(id)));
        let verse_no = match parsed {
            Some((_, Some(verse))) => {
                if let Some(book) = verse.book {
                    cx.verse.book = Some(book.to_string());
                }
                cx.verse.chapter = verse.chapter;
                verse.verse_no
            }
            Some((id, None)) => {
                diagnostics::malformed_attribute("verse", "osisID", Some(id));
                cx.verse.current_verse_no + 1
            }
            None => cx.verse.current_verse_no + 1,
        };
        cx.verse.current_verse_no = verse_no;

        if cx.options.verse_per_line {
            if cx.verse_line_open {
                cx.write("</div>");
            }
            cx.write("<div>");
            cx.verse_line_open = true;
        }

        let rollback = cx.buffer.position();
        write_verse_marker(cx, verse_no);
        cx.verse.text_written_since_verse = false;
        if verse_no == 0 {
            // an empty superscription slot leaves no marker behind
            cx.verse.pending_verse_zero = Some(VerseZero {
                rollback,
                marker_end: cx.buffer.position(),
            });
        }
        FrameState::Empty
    }

    fn end(&self, cx: &mut RenderContext<'_>, _state: FrameState, _content: &str) {
        cx.release_preverse();
    }
}

/// Write `<span class='verse' id='1.3'>3</span>` plus any bookmark markers,
/// and remember where a preverse heading would have to go.
fn write_verse_marker(cx: &mut RenderContext<'_>, verse_no: u32) {
    cx.verse.pre_verse_offset = cx.buffer.position();

    let styles = cx.markers.styles_for(verse_no);
    let mut classes = String::from(CLASS_VERSE);
    for style in &styles {
        classes.push(' ');
        classes.push_str(&escape_attr(&style.class));
    }

    let label = if cx.options.show_verse_numbers && verse_no != 0 {
        verse_no.to_string()
    } else {
        // an empty span confuses verse position calculation in the viewer
        ZERO_WIDTH_SPACE.to_string()
    };
    let id = escape_attr(&cx.verse.verse_id());
    cx.write(&format!("<span class='{classes}' id='{id}'>{label}</span>"));

    for fragment in styles.iter().filter_map(|s| s.fragment.as_deref()) {
        cx.write(fragment);
    }
}

/// Parts of a verse osisID.
#[derive(Debug, PartialEq, Eq)]
struct VerseId<'a> {
    book: Option<&'a str>,
    chapter: Option<u32>,
    verse_no: u32,
}

/// Book, chapter and verse from an osisID such as `Gen.1.3`,
/// `Gen.1.3 Gen.1.4` or `Gen.1.3-Gen.1.5`; the first verse wins.
fn parse_osis_id(osis_id: &str) -> Option<VerseId<'_>> {
    let first = osis_id.split_whitespace().next()?;
    let first = first.split('-').next()?;
    let mut parts = first.rsplit('.');
    let verse_no = parts.next()?.parse::<u32>().ok().filter(|v| *v <= MAX_VERSE_NO)?;
    let chapter = parts.next().and_then(|c| c.parse::<u32>().ok());
    let book = parts.next().filter(|b| !b.is_empty());
    Some(VerseId { book, chapter, verse_no })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(book: Option<&str>, chapter: Option<u32>, verse_no: u32) -> Option<VerseId<'_>> {
        Some(VerseId { book, chapter, verse_no })
    }

    #[test]
    fn parses_simple_osis_id() {
        assert_eq!(parse_osis_id("Gen.1.3"), id(Some("Gen"), Some(1), 3));
    }

    #[test]
    fn first_verse_of_a_list_or_range_wins() {
        assert_eq!(parse_osis_id("Ps.117.1 Ps.117.2"), id(Some("Ps"), Some(117), 1));
        assert_eq!(parse_osis_id("Rom.3.23-Rom.3.24"), id(Some("Rom"), Some(3), 23));
    }

    #[test]
    fn bare_number_has_no_chapter() {
        assert_eq!(parse_osis_id("7"), id(None, None, 7));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_osis_id("Gen.1.x"), None);
        assert_eq!(parse_osis_id(""), None);
        assert_eq!(parse_osis_id("Gen.1.100000"), None);
    }
}
