use std::sync::LazyLock;

use super::lexicon::{builtin_lexicons, Lexicon};
use super::types::{Analysis, Highlight};

static BUILTIN: LazyLock<PatternClassifier> =
    LazyLock::new(|| PatternClassifier::new(builtin_lexicons()));

/// Scans text against an ordered set of lexicons.
///
/// Immutable after construction, so one instance can be shared across
/// threads and requests without locking.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    lexicons: Vec<Lexicon>,
}

impl PatternClassifier {
    pub fn new(lexicons: Vec<Lexicon>) -> Self {
        Self { lexicons }
    }

    /// Process-wide classifier over the built-in lexicons.
    pub fn builtin() -> &'static PatternClassifier {
        &BUILTIN
    }

    pub fn lexicons(&self) -> &[Lexicon] {
        &self.lexicons
    }

    /// Scan `text` and collect one highlight per lexicon entry present.
    ///
    /// Highlights follow lexicon order, then entry order within each lexicon.
    /// Overlapping entries fire independently.
    pub fn classify(&self, text: &str) -> Analysis {
        let lowered = text.to_lowercase();
        let mut highlights = Vec::new();

        for lexicon in &self.lexicons {
            let technique = lexicon.technique();
            highlights.extend(
                lexicon
                    .entries()
                    .iter()
                    .filter(|entry| entry.occurs_in(text, &lowered))
                    .map(|entry| Highlight::new(entry.term(), technique)),
            );
        }

        let analysis = Analysis::new(highlights);
        tracing::debug!(
            text_len = text.len(),
            highlights = analysis.highlights().len(),
            techniques = analysis.techniques().len(),
            "Text classified"
        );
        analysis
    }
}

/// Classify `text` with the built-in lexicons.
pub fn classify(text: &str) -> Analysis {
    PatternClassifier::builtin().classify(text)
}
