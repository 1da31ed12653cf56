//! Seed keyword expansion.
//!
//! The first query of a run is tokenized into a relevance keyword set; seeds
//! that mention AI get a fixed synonym cluster unioned in so that native and
//! transliterated phrasings all match during the relevance gate.

/// Tokens that mark a seed as AI-related. Matched as substrings so that
/// compound tokens ("openai", "ИИшка") still trigger expansion.
const AI_MARKERS: [&str; 6] = [
    "ai",
    "ии",
    "нейросеть",
    "нейросети",
    "искусственный",
    "интеллект",
];

/// Synonym cluster unioned into AI-related seeds.
const AI_SYNONYMS: [&str; 7] = [
    "искусственный интеллект",
    "нейросеть",
    "нейросети",
    "ai",
    "ml",
    "machine learning",
    "artificial intelligence",
];

/// Two views over one seed expansion.
///
/// `all` keeps every token including purely numeric ones; `lexical` keeps
/// only tokens containing at least one letter and is what substring matching
/// uses. An empty set downstream means "match everything".
#[derive(Debug, Clone, Default)]
pub struct SeedKeywords {
    pub all: Vec<String>,
    pub lexical: Vec<String>,
}

impl SeedKeywords {
    /// Builds the keyword set for a seed query.
    #[must_use]
    pub fn from_seed(seed: &str) -> Self {
        let expanded = expand_ai_keywords(tokenize(seed));
        let lexical = expanded
            .iter()
            .filter(|token| token.chars().any(is_letter))
            .cloned()
            .collect();
        Self {
            all: expanded,
            lexical,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Keywords used for substring matching: the lexical view, falling back
    /// to `all` when the seed had no lexical tokens.
    #[must_use]
    pub fn matching_pool(&self) -> &[String] {
        if self.lexical.is_empty() {
            &self.all
        } else {
            &self.lexical
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('а'..='я').contains(&c) || c == 'ё'
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('а'..='я').contains(&c) || c == 'ё'
}

/// Splits case-folded text on non-alphanumeric boundaries (ASCII + Cyrillic),
/// dropping tokens shorter than 2 characters.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_owned)
        .collect()
}

/// Unions the AI synonym cluster into the token set when any token contains
/// an AI marker. Keeps first-seen order and deduplicates.
fn expand_ai_keywords(tokens: Vec<String>) -> Vec<String> {
    let has_marker = tokens
        .iter()
        .any(|token| AI_MARKERS.iter().any(|marker| token.contains(marker)));
    if !has_marker {
        return tokens;
    }

    let mut expanded = tokens;
    for synonym in AI_SYNONYMS {
        if !expanded.iter().any(|t| t == synonym) {
            expanded.push(synonym.to_owned());
        }
    }
    expanded
}
