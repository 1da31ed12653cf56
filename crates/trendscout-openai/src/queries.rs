//! Cleaning of model-generated search queries.
//!
//! Generated queries drift off-topic; cleaning pins them back to the seed:
//! whitespace normalization, a banned-topic blocklist, a seed-keyword
//! containment gate, a modifier backfill when too few survive, and a hard
//! cap.

use regex::Regex;

/// Upper bound on queries returned to the pipeline.
const MAX_QUERIES: usize = 12;
/// Backfill with default modifiers when fewer than this survive cleaning.
const MIN_QUERIES_BEFORE_BACKFILL: usize = 5;

/// Off-topic patterns the query generator keeps drifting into.
const BANNED_PATTERNS: [&str; 11] = [
    "toyota",
    "corolla",
    "нумеролог",
    "астролог",
    "forester",
    "subaru",
    "wilderness",
    "полит",
    "выборы",
    "украин",
    "гороскоп",
];

/// Modifiers appended to the seed when the generator under-delivers.
const DEFAULT_MODIFIERS: [&str; 7] = [
    "аналитика",
    "новости",
    "экспертный разбор",
    "исследование рынка",
    "прогноз",
    "кейсы",
    "best practices",
];

/// Seed tokens that flag the topic as AI-related (exact token match).
const AI_TOKENS: [&str; 6] = [
    "ai",
    "ии",
    "нейросеть",
    "нейросети",
    "искусственный",
    "интеллект",
];

/// Keywords unioned into AI-related seeds before the containment gate.
const AI_KEYWORDS: [&str; 4] = [
    "искусственный интеллект",
    "ai",
    "нейросети",
    "machine learning",
];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('а'..='я').contains(&c) || c == 'ё'
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_owned)
        .collect()
}

fn enrich_keywords(mut tokens: Vec<String>) -> Vec<String> {
    let has_marker = tokens
        .iter()
        .any(|token| AI_TOKENS.iter().any(|marker| token == marker));
    if has_marker {
        for keyword in AI_KEYWORDS {
            if !tokens.iter().any(|t| t == keyword) {
                tokens.push(keyword.to_owned());
            }
        }
    }
    tokens
}

fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Filters and bounds generated queries against the seed topic.
///
/// Survivors keep generation order; the seed itself is appended when the
/// generator left it out. Never returns more than 12 queries.
#[must_use]
pub fn clean_queries(seed: &str, generated: Vec<String>) -> Vec<String> {
    let banned: Vec<Regex> = BANNED_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid banned-topic regex"))
        .collect();
    let keywords = enrich_keywords(tokenize(seed));

    let mut unique: Vec<String> = Vec::new();
    for query in &generated {
        push_query(&mut unique, &banned, &keywords, query);
    }
    if unique.len() < MIN_QUERIES_BEFORE_BACKFILL {
        for modifier in DEFAULT_MODIFIERS {
            push_query(&mut unique, &banned, &keywords, &format!("{seed} {modifier}"));
        }
    }
    if !unique.iter().any(|q| q == seed.trim()) {
        push_query(&mut unique, &banned, &keywords, seed);
    }

    unique.truncate(MAX_QUERIES);
    unique
}

/// Admits `candidate` when it normalizes non-empty, avoids banned topics,
/// shares a seed keyword, and is not already present.
fn push_query(unique: &mut Vec<String>, banned: &[Regex], keywords: &[String], candidate: &str) {
    let normalized = normalize(candidate);
    if normalized.is_empty() {
        return;
    }
    if banned.iter().any(|pattern| pattern.is_match(&normalized)) {
        return;
    }
    if !keywords.is_empty() {
        let lower = normalized.to_lowercase();
        if !keywords.iter().any(|k| lower.contains(k.as_str())) {
            return;
        }
    }
    if !unique.contains(&normalized) {
        unique.push(normalized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn keeps_on_topic_queries_in_order() {
        let cleaned = clean_queries(
            "нейросети",
            owned(&[
                "нейросети в бизнесе",
                "нейросети обзор",
                "тренды нейросети 2025",
                "нейросети кейсы",
                "новые нейросети",
            ]),
        );
        assert_eq!(cleaned[0], "нейросети в бизнесе");
        // The five survivors plus the seed appended at the end.
        assert_eq!(cleaned.len(), 6);
        assert_eq!(cleaned[5], "нейросети");
    }

    #[test]
    fn drops_banned_topics() {
        let cleaned = clean_queries(
            "нейросети",
            owned(&[
                "нейросети и выборы",
                "гороскоп от нейросети",
                "нейросети аналитика",
            ]),
        );
        assert!(cleaned.iter().all(|q| !q.contains("выборы")));
        assert!(cleaned.iter().all(|q| !q.contains("гороскоп")));
    }

    #[test]
    fn drops_queries_without_seed_keywords() {
        let cleaned = clean_queries(
            "нейросети",
            owned(&["лучшие рецепты пасты", "нейросети разбор"]),
        );
        assert!(!cleaned.iter().any(|q| q.contains("рецепты")));
        assert!(cleaned.iter().any(|q| q == "нейросети разбор"));
    }

    #[test]
    fn ai_seed_accepts_english_keyword_queries() {
        // The enriched keyword set lets "machine learning" queries through an
        // "ИИ" seed even though they share no literal token.
        let cleaned = clean_queries(
            "тренды ИИ",
            owned(&["machine learning кейсы", "ai агенты обзор"]),
        );
        assert!(cleaned.iter().any(|q| q == "machine learning кейсы"));
        assert!(cleaned.iter().any(|q| q == "ai агенты обзор"));
    }

    #[test]
    fn backfills_with_default_modifiers_when_too_few_survive() {
        let cleaned = clean_queries("нейросети", owned(&["про котиков"]));
        assert!(
            cleaned.iter().any(|q| q == "нейросети аналитика"),
            "expected modifier backfill, got: {cleaned:?}"
        );
        assert!(cleaned.iter().any(|q| q == "нейросети"));
    }

    #[test]
    fn appends_the_seed_when_missing() {
        let cleaned = clean_queries(
            "нейросети",
            owned(&[
                "нейросети в бизнесе",
                "нейросети обзор",
                "тренды нейросети",
                "нейросети кейсы",
                "новые нейросети",
            ]),
        );
        assert!(cleaned.iter().any(|q| q == "нейросети"));
    }

    #[test]
    fn never_returns_more_than_twelve() {
        let many: Vec<String> = (0..30).map(|i| format!("нейросети вариант {i}")).collect();
        let cleaned = clean_queries("нейросети", many);
        assert_eq!(cleaned.len(), 12);
    }

    #[test]
    fn collapses_whitespace_and_deduplicates() {
        let cleaned = clean_queries(
            "нейросети",
            owned(&["нейросети   обзор", "нейросети обзор"]),
        );
        assert_eq!(
            cleaned.iter().filter(|q| *q == "нейросети обзор").count(),
            1
        );
    }
}
