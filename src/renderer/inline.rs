//! Inline formatting handlers: `hi`, `transChange`, `divineName` and
//! `figure`.

use crate::diagnostics;
use crate::model::Attributes;

use super::constants::*;
use super::context::RenderContext;
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;
use super::text::escape_attr;

pub(super) struct HiHandler;
pub(super) struct TransChangeHandler;
pub(super) struct DivineNameHandler;
pub(super) struct FigureHandler;

pub(super) static HI: HiHandler = HiHandler;
pub(super) static TRANS_CHANGE: TransChangeHandler = TransChangeHandler;
pub(super) static DIVINE_NAME: DivineNameHandler = DivineNameHandler;
pub(super) static FIGURE: FigureHandler = FigureHandler;

const SPAN_CLOSE: &str = "</span>";

impl TagHandler for HiHandler {
    fn tag_name(&self) -> &'static str {
        "hi"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        let Some(hi_type) = attrs.non_empty("type") else {
            return FrameState::Empty;
        };
        let (open, close) = match hi_type {
            "bold" => ("<span class='bold'>", SPAN_CLOSE),
            "italic" | "emphasis" => ("<span class='italic'>", SPAN_CLOSE),
            "underline" => ("<span class='underline'>", SPAN_CLOSE),
            "small-caps" => ("<span class='smallCaps'>", SPAN_CLOSE),
            "super" => ("<sup>", "</sup>"),
            "sub" => ("<sub>", "</sub>"),
            other => {
                diagnostics::malformed_attribute("hi", "type", Some(other));
                return FrameState::Empty;
            }
        };
        cx.write(open);
        FrameState::Close(close)
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        write_close(cx, state);
    }
}

impl TagHandler for TransChangeHandler {
    fn tag_name(&self) -> &'static str {
        "transChange"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, _attrs: &Attributes) -> FrameState {
        cx.write(&format!("<span class='{CLASS_TRANS_CHANGE}'>"));
        FrameState::Close(SPAN_CLOSE)
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        write_close(cx, state);
    }
}

impl TagHandler for DivineNameHandler {
    fn tag_name(&self) -> &'static str {
        "divineName"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, _attrs: &Attributes) -> FrameState {
        cx.write(&format!("<span class='{CLASS_DIVINE_NAME}'>"));
        FrameState::Close(SPAN_CLOSE)
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        write_close(cx, state);
    }
}

impl TagHandler for FigureHandler {
    fn tag_name(&self) -> &'static str {
        "figure"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        match attrs.non_empty("src") {
            Some(src) => {
                let path = figure_path(&cx.options.module_base_path, src);
                cx.write(&format!("<img src='{}'/>", escape_attr(&path)));
            }
            None => diagnostics::malformed_attribute("figure", "src", None),
        }
        FrameState::Empty
    }

    fn end(&self, _cx: &mut RenderContext<'_>, _state: FrameState, _content: &str) {}
}

fn write_close(cx: &mut RenderContext<'_>, state: FrameState) {
    if let FrameState::Close(close) = state {
        cx.write(close);
    }
}

/// Image path relative to the module's data directory.
fn figure_path(base: &str, src: &str) -> String {
    let base = base.trim_end_matches('/');
    let src = src.trim_start_matches('/');
    if base.is_empty() {
        src.to_string()
    } else {
        format!("{base}/{src}")
    }
}
