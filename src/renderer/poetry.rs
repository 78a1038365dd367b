//! Poetry handlers: `l` (line), `lg` (line group) and `lb` (line break).
//!
//! Lines usually arrive as milestone pairs sharing an identifier:
//!
//! ```xml
//! <l sID="x7682" type="x-indent"/>Extol him, all peoples!<l eID="x7682" type="x-br"/>
//! ```
//!
//! The start marker writes the indent and pushes an entry; the matching end
//! marker pops it and breaks the line.

use crate::diagnostics;
use crate::model::Attributes;

use super::constants::*;
use super::context::{LineEntry, LineKind, RenderContext};
use super::dispatch::{FrameState, TagHandler};
use super::element::ElementKind;

pub(super) struct LineHandler;
pub(super) struct LineGroupHandler;
pub(super) struct LineBreakHandler;

pub(super) static LINE: LineHandler = LineHandler;
pub(super) static LINE_GROUP: LineGroupHandler = LineGroupHandler;
pub(super) static LINE_BREAK: LineBreakHandler = LineBreakHandler;

impl TagHandler for LineHandler {
    fn tag_name(&self) -> &'static str {
        "l"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        if let Some(eid) = attrs.non_empty("eID") {
            match cx.lines.iter().rposition(|e| e.id.as_deref() == Some(eid)) {
                Some(idx) => {
                    let entry = cx.lines.remove(idx);
                    tracing::trace!(eid, kind = ?entry.kind, "line closed");
                }
                None => tracing::debug!(eid, "line end without matching start"),
            }
            // an end marker always breaks the line, whatever its type says
            cx.write(BR);
            return FrameState::Empty;
        }

        let kind = line_kind(attrs.get("type"));
        write_indent(cx, kind);
        match attrs.non_empty("sID") {
            Some(sid) => {
                cx.lines.push(LineEntry { id: Some(sid.to_string()), kind });
                FrameState::Empty
            }
            None => {
                cx.lines.push(LineEntry { id: None, kind });
                FrameState::Line
            }
        }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        if let FrameState::Line = state {
            if let Some(idx) = cx.lines.iter().rposition(|e| e.id.is_none()) {
                cx.lines.remove(idx);
            }
            cx.write(BR);
        }
    }
}

impl TagHandler for LineGroupHandler {
    fn tag_name(&self) -> &'static str {
        "lg"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, attrs: &Attributes) -> FrameState {
        if attrs.non_empty("eID").is_some() {
            if cx.verse.any_text_written {
                cx.write(BR);
            }
            FrameState::Empty
        } else if attrs.non_empty("sID").is_some() {
            FrameState::Empty
        } else {
            FrameState::LineGroup
        }
    }

    fn end(&self, cx: &mut RenderContext<'_>, state: FrameState, _content: &str) {
        if let FrameState::LineGroup = state {
            if cx.verse.any_text_written {
                cx.write(BR);
            }
        }
    }
}

impl TagHandler for LineBreakHandler {
    fn tag_name(&self) -> &'static str {
        "lb"
    }

    fn start(&self, cx: &mut RenderContext<'_>, _parent: Option<&ElementKind>, _attrs: &Attributes) -> FrameState {
        // no blank lines at the top of a page
        if cx.verse.any_text_written {
            cx.write(BR);
        }
        FrameState::Empty
    }

    fn end(&self, _cx: &mut RenderContext<'_>, _state: FrameState, _content: &str) {}
}

/// `x-indent` indents one step, `x-indent-N` N steps; `x-br` and a missing
/// type mean a plain line.
fn line_kind(line_type: Option<&str>) -> LineKind {
    match line_type {
        None | Some("") | Some("x-br") => LineKind::Plain,
        Some("x-indent") => LineKind::Indent(1),
        Some(other) => match other.strip_prefix("x-indent-").and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => LineKind::Indent(n.min(8)),
            None => {
                diagnostics::malformed_attribute("l", "type", Some(other));
                LineKind::Plain
            }
        },
    }
}

fn write_indent(cx: &mut RenderContext<'_>, kind: LineKind) {
    if let LineKind::Indent(steps) = kind {
        let indent = NBSP.repeat(2 * steps);
        cx.write(&indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_kinds() {
        assert_eq!(line_kind(None), LineKind::Plain);
        assert_eq!(line_kind(Some("x-br")), LineKind::Plain);
        assert_eq!(line_kind(Some("x-indent")), LineKind::Indent(1));
        assert_eq!(line_kind(Some("x-indent-2")), LineKind::Indent(2));
        assert_eq!(line_kind(Some("x-wobble")), LineKind::Plain);
    }
}
