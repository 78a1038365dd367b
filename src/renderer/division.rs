//! Division handlers: `div`, `p` and `milestone`.
//!
//! Paragraph divisions break the text after their content; a paragraph
//! without visible text (only markers or whitespace) writes nothing. Divisions flagged `x-preverse` hold headings
//! that belong before the current verse marker and are inserted there.

use crate::model::Attributes;

use super::constants::*;
use super::context::{DivisionEntry, PreverseEntry, RenderContext};
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;

pub(super) struct DivHandler;
pub(super) struct ParagraphHandler;
pub(super) struct MilestoneHandler;

pub(super) static DIV: DivHandler = DivHandler;
pub(super) static PARAGRAPH: ParagraphHandler = ParagraphHandler;
pub(super) static MILESTONE: MilestoneHandler = MilestoneHandler;

impl TagHandler for DivHandler {
    fn tag_name(&self) -> &'static str {
        "div"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        let paragraph = attrs.get("type").is_some_and(|t| PARAGRAPH_TYPES.contains(&t));
        start_division(cx, attrs, paragraph)
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        end_division(cx, state);
    }
}

impl TagHandler for ParagraphHandler {
    fn tag_name(&self) -> &'static str {
        "p"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        start_division(cx, attrs, true)
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        end_division(cx, state);
    }
}

impl TagHandler for MilestoneHandler {
    fn tag_name(&self) -> &'static str {
        "milestone"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        if cx.verse.any_text_written {
            match attrs.get("type") {
                Some("x-p") | Some("pb") => cx.write(BREAKLINE),
                Some("line") => cx.write(BR),
                _ => {}
            }
        }
        FrameState::Empty
    }

    fn end(&self, _cx: &mut RenderContext<'_>, _state: FrameState, _content: &str) {}
}

fn is_preverse(attrs: &Attributes) -> bool {
    attrs.is("subType", PREVERSE)
}

fn start_division(cx: &mut RenderContext<'_>, attrs: &Attributes, paragraph: bool) -> FrameState {
    let preverse = is_preverse(attrs);

    // closing milestone
    if let Some(eid) = attrs.non_empty("eID") {
        if preverse {
            if let Some(idx) = cx.preverse.iter().rposition(|e| e.id == eid) {
                let entry = cx.preverse.remove(idx);
                cx.finish_preverse_insertion(entry.insertion);
            }
        } else if let Some(idx) = cx.divisions.iter().rposition(|e| e.id == eid) {
            let entry = cx.divisions.remove(idx);
            if entry.paragraph && cx.verse.text_runs > entry.text_mark {
                cx.write(BREAKLINE);
            }
        }
        return FrameState::Empty;
    }

    // opening milestone
    if let Some(sid) = attrs.non_empty("sID") {
        if preverse {
            if !cx.verse.text_written_since_verse {
                let insertion = cx.buffer.begin_insert_at(cx.verse.pre_verse_offset);
                cx.preverse.push(PreverseEntry { id: sid.to_string(), insertion });
            }
        } else {
            cx.divisions.push(DivisionEntry {
                id: sid.to_string(),
                text_mark: cx.verse.text_runs,
                paragraph,
            });
        }
        return FrameState::Empty;
    }

    // container element
    let insertion = if preverse && !cx.verse.text_written_since_verse {
        Some(cx.buffer.begin_insert_at(cx.verse.pre_verse_offset))
    } else {
        None
    };
    FrameState::Division {
        text_mark: cx.verse.text_runs,
        paragraph,
        insertion,
    }
}

fn end_division(cx: &mut RenderContext<'_>, state: FrameState) {
    let FrameState::Division { text_mark, paragraph, insertion } = state else {
        return;
    };
    if paragraph && cx.verse.text_runs > text_mark {
        cx.write(BREAKLINE);
    }
    if let Some(insertion) = insertion {
        cx.finish_preverse_insertion(insertion);
    }
}
