use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A rhetorical technique the classifier can detect.
///
/// The serialized names and the rationale strings are part of the public
/// response contract; clients key UI behavior off them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Technique {
    /// Time pressure cues ("act now", "last chance").
    #[serde(rename = "Urgency")]
    Urgency,
    /// Emotionally charged vocabulary ("shocking", "devastating").
    #[serde(rename = "Emotional Framing")]
    EmotionalFraming,
    /// Universal or unquestionable claims ("always", "nobody").
    #[serde(rename = "Absolute Language")]
    AbsoluteLanguage,
}

impl Technique {
    /// Every technique, in scan order.
    pub const ALL: [Technique; 3] = [
        Technique::Urgency,
        Technique::EmotionalFraming,
        Technique::AbsoluteLanguage,
    ];

    /// External category name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Urgency => "Urgency",
            Self::EmotionalFraming => "Emotional Framing",
            Self::AbsoluteLanguage => "Absolute Language",
        }
    }

    /// Fixed, category-level rationale attached to every highlight.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Urgency => "Creates time pressure that may reduce reflection",
            Self::EmotionalFraming => {
                "Uses emotionally charged language to amplify emotional response"
            }
            Self::AbsoluteLanguage => "Presents statements as universal or unquestionable",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexicon hit.
///
/// `text` is the canonical lexicon form, not the casing found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub text: &'static str,
    pub technique: Technique,
    pub reason: &'static str,
}

impl Highlight {
    pub fn new(text: &'static str, technique: Technique) -> Self {
        Self {
            text,
            technique,
            reason: technique.reason(),
        }
    }
}

/// Outcome of a single classification call.
///
/// The ordered highlight list is authoritative; the technique set is
/// always derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    highlights: Vec<Highlight>,
}

impl Analysis {
    pub fn new(highlights: Vec<Highlight>) -> Self {
        Self { highlights }
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn into_highlights(self) -> Vec<Highlight> {
        self.highlights
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Distinct techniques in order of first appearance.
    pub fn techniques(&self) -> Vec<Technique> {
        let mut seen = Vec::with_capacity(Technique::ALL.len());
        for h in &self.highlights {
            if !seen.contains(&h.technique) {
                seen.push(h.technique);
            }
        }
        seen
    }

    /// Set view of the detected techniques.
    pub fn technique_set(&self) -> BTreeSet<Technique> {
        self.highlights.iter().map(|h| h.technique).collect()
    }

    pub fn has(&self, technique: Technique) -> bool {
        self.highlights.iter().any(|h| h.technique == technique)
    }

    /// Highlights for one technique, in scan order.
    pub fn highlights_for(&self, technique: Technique) -> impl Iterator<Item = &Highlight> {
        self.highlights
            .iter()
            .filter(move |h| h.technique == technique)
    }
}
