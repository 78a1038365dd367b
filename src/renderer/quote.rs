//! Quotation handler, including red-letter rendering of the words of Jesus.
//!
//! Quotations appear both nested and as milestones:
//!
//! ```xml
//! <q who="Jesus">Follow me</q>
//! <q sID="q1" who="Jesus" marker="“"/>Follow me<q eID="q1" marker="”"/>
//! ```

use crate::model::Attributes;

use super::constants::*;
use super::context::{QuoteEntry, RenderContext};
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;
use super::text::escape_text;

pub(super) struct QuoteHandler;

pub(super) static QUOTE: QuoteHandler = QuoteHandler;

const RED_LETTER_CLOSE: &str = "</span>";

impl TagHandler for QuoteHandler {
    fn tag_name(&self) -> &'static str {
        "q"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        if let Some(eid) = attrs.non_empty("eID") {
            match cx.quotes.iter().rposition(|q| q.id == eid) {
                Some(idx) => {
                    let entry = cx.quotes.remove(idx);
                    if entry.red_letter {
                        close_red_letter(cx);
                    }
                }
                None => tracing::debug!(eid, "quotation end without matching start"),
            }
            write_marker(cx, attrs);
            return FrameState::Empty;
        }

        write_marker(cx, attrs);
        let red_letter = cx.options.red_letter && attrs.is("who", JESUS);
        if red_letter {
            cx.write(&format!("<span class='{CLASS_RED_LETTER}'>"));
            cx.verse.red_letter_depth += 1;
        }

        match attrs.non_empty("sID") {
            Some(sid) => {
                cx.quotes.push(QuoteEntry { id: sid.to_string(), red_letter });
                FrameState::Empty
            }
            None if red_letter => FrameState::Close(RED_LETTER_CLOSE),
            None => FrameState::Empty,
        }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        if let FrameState::Close(_) = state {
            close_red_letter(cx);
        }
    }
}

fn close_red_letter(cx: &mut RenderContext<'_>) {
    cx.write(RED_LETTER_CLOSE);
    cx.verse.red_letter_depth = cx.verse.red_letter_depth.saturating_sub(1);
}

fn write_marker(cx: &mut RenderContext<'_>, attrs: &Attributes) {
    if let Some(marker) = attrs.non_empty("marker") {
        let marker = escape_text(marker);
        cx.write(&marker);
    }
}
