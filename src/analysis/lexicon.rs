use regex::Regex;

use super::types::Technique;

/// Urgency phrases, matched as substrings of the lowercased text.
pub const URGENCY_PHRASES: &[&str] = &[
    "before it's too late",
    "act now",
    "right now",
    "limited time",
    "don't miss out",
    "hurry",
    "urgent",
    "breaking",
    "immediate action",
    "last chance",
    "limited offer",
    "expires soon",
    "time-sensitive",
    "while supplies last",
    "only today",
    "final hours",
    "don't wait",
    "sign up now",
    "order now",
    "call now",
    "join now",
    "register now",
    "get it now",
    "today only",
    "ends soon",
    "deadline",
    "countdown",
    "rush",
    "asap",
    "without delay",
    "instant",
    "immediately",
    "quick",
    "fast",
    "now or never",
    "once in a lifetime",
    "last minute",
    "running out",
    "limited availability",
    "exclusive offer",
    "act fast",
    "grab it now",
];

/// Emotionally charged vocabulary, matched as whole words.
pub const EMOTIONAL_WORDS: &[&str] = &[
    "shocking",
    "terrifying",
    "unbelievable",
    "heartbreaking",
    "outrageous",
    "devastating",
    "incredible",
    "shattered",
    "crucial",
    "panic",
    "horrifying",
    "tragic",
    "desperate",
    "furious",
    "devastated",
    "heartbroken",
    "stunned",
    "appalled",
    "disturbing",
    "alarming",
    "frightening",
    "terrible",
    "horrible",
    "nightmare",
    "catastrophic",
    "disaster",
    "crisis",
    "scandal",
    "outrage",
    "fear",
    "terror",
    "despair",
    "hopeless",
    "critical",
    "vital",
    "essential",
    "must-see",
    "must-read",
    "explosive",
    "bombshell",
    "revelation",
    "exposed",
    "betrayed",
    "betrayal",
    "victim",
    "suffering",
    "trauma",
    "traumatic",
    "disturbing",
    "gut-wrenching",
    "jaw-dropping",
    "mind-blowing",
    "stunning",
    "astonishing",
    "unprecedented",
    "historic",
    "legendary",
    "epic",
    "inspiring",
    "moving",
    "powerful",
    "intense",
    "emotional",
    "controversial",
    "divisive",
    "polarizing",
    "inflammatory",
    "provocative",
];

/// Universal or unquestionable claims, matched as whole words.
pub const ABSOLUTE_WORDS: &[&str] = &[
    "always",
    "everyone",
    "no one",
    "never",
    "guaranteed",
    "all",
    "every",
    "everybody",
    "nobody",
    "nothing",
    "everything",
    "none",
    "only",
    "must",
    "certain",
    "certainly",
    "definitely",
    "absolutely",
    "undoubtedly",
    "unquestionably",
    "invariably",
    "inevitably",
    "without exception",
    "without doubt",
    "no doubt",
    "no question",
    "clearly",
    "obviously",
    "plainly",
    "simply",
    "pure",
    "purely",
    "total",
    "totally",
    "complete",
    "completely",
    "entire",
    "entirely",
    "full",
    "fully",
    "perfect",
    "perfectly",
    "ultimate",
    "ultimately",
    "forever",
    "permanent",
    "permanently",
    "irreversible",
    "unanimous",
    "universal",
    "unconditional",
    "unparalleled",
    "unmatched",
    "undeniable",
    "infallible",
    "flawless",
    "impossible",
    "inevitable",
    "unstoppable",
    "unbeatable",
    "best",
    "worst",
    "greatest",
    "biggest",
    "smallest",
    "first",
    "last",
    "only one",
    "sole",
    "exclusive",
    "unique",
    "one and only",
];

/// How a lexicon entry is located in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Unbounded containment in the lowercased text. Can fire mid-word
    /// ("fast" inside "breakfast").
    Substring,
    /// Case-insensitive occurrence bounded by `\b` on both sides, checked
    /// against the original text. No stemming: "panic" misses "panicked".
    WholeWord,
}

#[derive(Debug, Clone)]
enum Matcher {
    Substring(String),
    WholeWord(Regex),
}

/// A single trigger with its compiled matcher.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    term: &'static str,
    matcher: Matcher,
}

impl LexiconEntry {
    fn new(term: &'static str, mode: MatchMode) -> Self {
        let matcher = match mode {
            MatchMode::Substring => Matcher::Substring(term.to_lowercase()),
            MatchMode::WholeWord => Matcher::WholeWord(whole_word_regex(term)),
        };
        Self { term, matcher }
    }

    /// Canonical form reported in highlights.
    pub fn term(&self) -> &'static str {
        self.term
    }

    /// Presence test. `lowered` must be `text.to_lowercase()`.
    pub fn occurs_in(&self, text: &str, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::Substring(needle) => lowered.contains(needle.as_str()),
            Matcher::WholeWord(regex) => regex.is_match(text),
        }
    }
}

fn whole_word_regex(term: &str) -> Regex {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
    Regex::new(&pattern).expect("Escaped lexicon term must compile")
}

/// An ordered trigger list bound to one technique and one match mode.
#[derive(Debug, Clone)]
pub struct Lexicon {
    technique: Technique,
    mode: MatchMode,
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon, keeping authoring order. Repeated terms are kept
    /// once so each term yields at most one highlight.
    pub fn new(technique: Technique, mode: MatchMode, terms: &[&'static str]) -> Self {
        let mut entries: Vec<LexiconEntry> = Vec::with_capacity(terms.len());
        for &term in terms {
            if term.is_empty() || entries.iter().any(|e| e.term == term) {
                continue;
            }
            entries.push(LexiconEntry::new(term, mode));
        }
        Self {
            technique,
            mode,
            entries,
        }
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three built-in lexicons in scan order.
pub fn builtin_lexicons() -> Vec<Lexicon> {
    vec![
        Lexicon::new(Technique::Urgency, MatchMode::Substring, URGENCY_PHRASES),
        Lexicon::new(
            Technique::EmotionalFraming,
            MatchMode::WholeWord,
            EMOTIONAL_WORDS,
        ),
        Lexicon::new(
            Technique::AbsoluteLanguage,
            MatchMode::WholeWord,
            ABSOLUTE_WORDS,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicons_in_scan_order() {
        let lexicons = builtin_lexicons();
        let order: Vec<Technique> = lexicons.iter().map(|l| l.technique()).collect();
        assert_eq!(order, Technique::ALL.to_vec());
        assert_eq!(lexicons[0].mode(), MatchMode::Substring);
        assert_eq!(lexicons[1].mode(), MatchMode::WholeWord);
        assert_eq!(lexicons[2].mode(), MatchMode::WholeWord);
    }

    #[test]
    fn authored_terms_are_lowercase() {
        for term in URGENCY_PHRASES
            .iter()
            .chain(EMOTIONAL_WORDS)
            .chain(ABSOLUTE_WORDS)
        {
            assert_eq!(*term, term.to_lowercase(), "Term not canonical: {term}");
        }
    }

    #[test]
    fn repeated_terms_collapse() {
        let lexicon = Lexicon::new(
            Technique::EmotionalFraming,
            MatchMode::WholeWord,
            &["disturbing", "tragic", "disturbing"],
        );
        assert_eq!(lexicon.len(), 2);
        let terms: Vec<&str> = lexicon.entries().iter().map(|e| e.term()).collect();
        assert_eq!(terms, vec!["disturbing", "tragic"]);
    }

    #[test]
    fn builtin_emotional_list_has_no_duplicates_after_build() {
        let lexicon = &builtin_lexicons()[1];
        assert_eq!(lexicon.len(), EMOTIONAL_WORDS.len() - 1);
    }

    #[test]
    fn empty_terms_skipped() {
        let lexicon = Lexicon::new(Technique::Urgency, MatchMode::Substring, &["", "hurry"]);
        assert_eq!(lexicon.len(), 1);
        assert!(!lexicon.is_empty());
    }

    #[test]
    fn substring_entry_fires_mid_word() {
        let entry = LexiconEntry::new("fast", MatchMode::Substring);
        let text = "Breakfast is served";
        assert!(entry.occurs_in(text, &text.to_lowercase()));
    }

    #[test]
    fn whole_word_entry_respects_boundaries() {
        let entry = LexiconEntry::new("panic", MatchMode::WholeWord);
        for text in ["panic", "Panic!", "don't PANIC.", "(panic)"] {
            assert!(entry.occurs_in(text, &text.to_lowercase()), "Should match: {text}");
        }
        for text in ["panicked", "panics", "antipanic"] {
            assert!(!entry.occurs_in(text, &text.to_lowercase()), "Should not match: {text}");
        }
    }

    #[test]
    fn whole_word_entry_handles_spaces_and_hyphens() {
        let no_one = LexiconEntry::new("no one", MatchMode::WholeWord);
        assert!(no_one.occurs_in("No one saw it", ""));
        assert!(!no_one.occurs_in("nobody saw it", ""));

        let must_see = LexiconEntry::new("must-see", MatchMode::WholeWord);
        assert!(must_see.occurs_in("A MUST-SEE event", ""));
    }

    #[test]
    fn apostrophe_phrase_matches_lowercased() {
        let entry = LexiconEntry::new("don't wait", MatchMode::Substring);
        let text = "DON'T WAIT any longer";
        assert!(entry.occurs_in(text, &text.to_lowercase()));
    }
}
