//! Rule-based rhetorical pattern classifier.
//!
//! Three static lexicons are scanned in a fixed order:
//! Urgency (phrase substring) → Emotional Framing (whole word) →
//! Absolute Language (whole word). Each lexicon entry present in the text
//! produces exactly one highlight carrying its category's fixed rationale.

pub mod classifier;
pub mod lexicon;
pub mod types;

pub use classifier::{classify, PatternClassifier};
pub use lexicon::{builtin_lexicons, Lexicon, LexiconEntry, MatchMode};
pub use types::{Analysis, Highlight, Technique};
