//! Title handler.
//!
//! A heading that belongs before a verse is often emitted after that
//! verse's marker:
//!
//! ```xml
//! <verse osisID='Ps.117.1'/><title subType="x-preverse" type="section">The Lord's Faithfulness</title>Praise the Lord
//! ```
//!
//! When no verse text has been written yet the heading is inserted at the
//! offset recorded just before the marker.

use crate::model::Attributes;

use super::constants::*;
use super::context::RenderContext;
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;

pub(super) struct TitleHandler;

pub(super) static TITLE: TitleHandler = TitleHandler;

impl TagHandler for TitleHandler {
    fn tag_name(&self) -> &'static str {
        "title"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        if !is_shown(cx, attrs) {
            return FrameState::Title {
                suppression: Some(cx.buffer.suppress()),
                insertion: None,
            };
        }

        let insertion = if is_preverse(attrs) && !cx.verse.text_written_since_verse {
            Some(cx.buffer.begin_insert_at(cx.verse.pre_verse_offset))
        } else {
            None
        };

        let level = attrs
            .non_empty("level")
            .and_then(|l| l.parse::<u8>().ok())
            .filter(|l| (1..=6).contains(l))
            .unwrap_or(1);
        let canonical = if is_canonical(attrs) { " canonical" } else { "" };
        cx.write(&format!("<h1 class='heading{level}{canonical}'>"));

        FrameState::Title { suppression: None, insertion }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        let FrameState::Title { suppression, insertion } = state else {
            return;
        };
        if let Some(suppression) = suppression {
            cx.buffer.unsuppress(suppression);
            return;
        }
        cx.write("</h1>");
        if let Some(insertion) = insertion {
            cx.finish_preverse_insertion(insertion);
        }
    }
}

fn is_canonical(attrs: &Attributes) -> bool {
    attrs.is("canonical", "true")
}

fn is_preverse(attrs: &Attributes) -> bool {
    attrs.is("subType", PREVERSE) || attrs.is("type", PREVERSE)
}

/// Titles generated by the module toolchain carry only `type="x-gen"`.
fn is_generated(attrs: &Attributes) -> bool {
    attrs.iter().eq([("type", GENERATED_TITLE_TYPE)])
}

fn is_shown(cx: &RenderContext<'_>, attrs: &Attributes) -> bool {
    if is_canonical(attrs) {
        return true;
    }
    cx.options.show_titles && !is_generated(attrs)
}
