//! OSIS element vocabulary understood by the renderer.

/// Every element kind with its own handler, plus `Unknown` for names only
/// seen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Verse,
    Title,
    L,
    Lg,
    Lb,
    Div,
    P,
    Milestone,
    Q,
    W,
    Note,
    Reference,
    Hi,
    TransChange,
    DivineName,
    Figure,
    /// Known structural elements that render only their content
    PassThrough,
    Unknown(String),
}

const ELEMENT_TABLE: &[(&str, ElementKind)] = &[
    ("verse", ElementKind::Verse),
    ("title", ElementKind::Title),
    ("l", ElementKind::L),
    ("lg", ElementKind::Lg),
    ("lb", ElementKind::Lb),
    ("div", ElementKind::Div),
    ("p", ElementKind::P),
    ("milestone", ElementKind::Milestone),
    ("q", ElementKind::Q),
    ("w", ElementKind::W),
    ("note", ElementKind::Note),
    ("reference", ElementKind::Reference),
    ("hi", ElementKind::Hi),
    ("transChange", ElementKind::TransChange),
    ("divineName", ElementKind::DivineName),
    ("figure", ElementKind::Figure),
    ("chapter", ElementKind::PassThrough),
    ("seg", ElementKind::PassThrough),
    ("foreign", ElementKind::PassThrough),
    ("osis", ElementKind::PassThrough),
    ("osisText", ElementKind::PassThrough),
    ("header", ElementKind::PassThrough),
];

impl ElementKind {
    /// Resolve an element name: exact match first, then case-insensitive.
    pub fn resolve(name: &str) -> ElementKind {
        let name = local_name(name);
        ELEMENT_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .or_else(|| ELEMENT_TABLE.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)))
            .map(|(_, kind)| kind.clone())
            .unwrap_or_else(|| ElementKind::Unknown(name.to_string()))
    }
}

/// Strip a namespace prefix such as `osis:verse`.
fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}
