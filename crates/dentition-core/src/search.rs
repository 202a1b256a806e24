//! Free-text record search.
//!
//! Three matching policies are available. [`SearchMode::Tokenized`] is the
//! default: every whitespace-separated token must appear somewhere in the
//! record's searchable text, in any order, as a partial word if need be
//! (`"max can right"` finds the maxillary right canine). [`SearchMode::Exact`]
//! looks for the whole phrase inside a single field, and [`SearchMode::Fuzzy`]
//! ranks the phrase against the joined text using a match-sorter style
//! ranking ladder. Only fuzzy ranking folds diacritics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CatalogError;
use crate::model::ToothRecord;

/// Which matching policy to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Tokenized,
    Fuzzy,
    Exact,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Tokenized => write!(f, "tokenized"),
            SearchMode::Fuzzy => write!(f, "fuzzy"),
            SearchMode::Exact => write!(f, "exact"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tokenized" | "tokens" => Ok(SearchMode::Tokenized),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            "exact" => Ok(SearchMode::Exact),
            other => Err(CatalogError::InvalidValue {
                field: "search mode",
                value: other.to_string(),
            }),
        }
    }
}

/// The fields a record is searchable by, in haystack order.
///
/// Absent optional ages contribute empty strings.
pub fn searchable_fields(record: &ToothRecord) -> [String; 8] {
    let range = |span: &Option<crate::model::AgeSpan>| {
        span.as_ref()
            .map(|s| s.age_range.clone())
            .unwrap_or_default()
    };
    [
        record.name.clone(),
        record.tooth_type.to_string(),
        record.position.to_string(),
        record.side.to_string(),
        record.eruption.age_range.clone(),
        range(&record.shedding),
        range(&record.root_completion),
        record.display_name(),
    ]
}

/// The lower-cased, space-joined text tokenized queries are checked against.
pub fn haystack(record: &ToothRecord) -> String {
    searchable_fields(record).join(" ").to_lowercase()
}

/// Split a raw query into lower-cased tokens. Empty tokens are dropped.
pub fn tokenize(raw_query: &str) -> Vec<String> {
    raw_query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokenized match. An empty or whitespace-only query matches everything.
pub fn matches(record: &ToothRecord, raw_query: &str) -> bool {
    let tokens = tokenize(raw_query);
    if tokens.is_empty() {
        return true;
    }
    let text = haystack(record);
    tokens.iter().all(|t| text.contains(t.as_str()))
}

/// Whole-phrase match against each field individually.
pub fn matches_exact(record: &ToothRecord, raw_query: &str) -> bool {
    if raw_query.is_empty() {
        return true;
    }
    let term = raw_query.to_lowercase().trim().to_string();
    searchable_fields(record)
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Match with an explicit policy.
pub fn matches_with(record: &ToothRecord, raw_query: &str, mode: SearchMode) -> bool {
    match mode {
        SearchMode::Tokenized => matches(record, raw_query),
        SearchMode::Exact => matches_exact(record, raw_query),
        SearchMode::Fuzzy => raw_query.is_empty() || rank(record, raw_query).passed(),
    }
}

/// Filter records by a query.
///
/// Tokenized and exact results keep input order. Fuzzy results are ordered by
/// rank, best first, with ties in input order.
pub fn filter<'a, I>(records: I, raw_query: &str, mode: SearchMode) -> Vec<&'a ToothRecord>
where
    I: IntoIterator<Item = &'a ToothRecord>,
{
    let matched: Vec<&ToothRecord> = match mode {
        SearchMode::Fuzzy if !raw_query.is_empty() => {
            let mut ranked: Vec<(Ranking, &ToothRecord)> = records
                .into_iter()
                .map(|r| (rank(r, raw_query), r))
                .filter(|(rk, _)| rk.passed())
                .collect();
            // sort_by is stable, so equal ranks keep input order
            ranked.sort_by(|a, b| b.0.value().total_cmp(&a.0.value()));
            ranked.into_iter().map(|(_, r)| r).collect()
        }
        _ => records
            .into_iter()
            .filter(|r| matches_with(r, raw_query, mode))
            .collect(),
    };
    tracing::debug!(%mode, query = raw_query, matched = matched.len(), "filtered records");
    matched
}

// ---------------------------------------------------------------------------
// Fuzzy ranking
// ---------------------------------------------------------------------------

/// How well a query matches a piece of text, best first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ranking {
    CaseSensitiveEqual,
    Equal,
    StartsWith,
    WordStartsWith,
    Contains,
    Acronym,
    /// All query characters appear in order. Carries the closeness bonus in
    /// `(0, 1]`.
    Matches(f64),
    NoMatch,
}

impl Ranking {
    /// Numeric rank; higher is better.
    pub fn value(&self) -> f64 {
        match self {
            Ranking::CaseSensitiveEqual => 7.0,
            Ranking::Equal => 6.0,
            Ranking::StartsWith => 5.0,
            Ranking::WordStartsWith => 4.0,
            Ranking::Contains => 3.0,
            Ranking::Acronym => 2.0,
            Ranking::Matches(closeness) => 1.0 + closeness,
            Ranking::NoMatch => 0.0,
        }
    }

    /// Whether the rank clears the default threshold (an in-order match).
    pub fn passed(&self) -> bool {
        self.value() >= 1.0
    }
}

/// Rank a query against a record's joined searchable text.
pub fn rank(record: &ToothRecord, query: &str) -> Ranking {
    rank_text(&searchable_fields(record).join(" "), query)
}

/// Rank `query` against `text`. Accents are stripped from both first.
pub fn rank_text(text: &str, query: &str) -> Ranking {
    let text = fold_diacritics(text);
    let query = fold_diacritics(query);
    let (text, query) = (text.as_str(), query.as_str());

    if query.chars().count() > text.chars().count() {
        return Ranking::NoMatch;
    }
    if text == query {
        return Ranking::CaseSensitiveEqual;
    }

    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text == query {
        return Ranking::Equal;
    }
    if text.starts_with(&query) {
        return Ranking::StartsWith;
    }
    if text.contains(&format!(" {query}")) {
        return Ranking::WordStartsWith;
    }
    if text.contains(&query) {
        return Ranking::Contains;
    }
    if query.chars().count() == 1 {
        return Ranking::NoMatch;
    }
    if acronym(&text).contains(&query) {
        return Ranking::Acronym;
    }
    closeness(&text, &query)
}

/// Decompose and drop combining marks: `"canïne"` becomes `"canine"`.
fn fold_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// First letter of every word and every hyphenated word part.
fn acronym(text: &str) -> String {
    text.split(' ')
        .flat_map(|word| word.split('-'))
        .filter_map(|part| part.chars().next())
        .collect()
}

/// In-order character match, scored by how tightly the characters cluster.
fn closeness(text: &str, query: &str) -> Ranking {
    let text: Vec<char> = text.chars().collect();
    let query: Vec<char> = query.chars().collect();

    let mut matched = 0usize;
    let mut cursor = 0usize;
    let mut find = |c: char, from: usize| -> Option<usize> {
        let idx = text[from..].iter().position(|&t| t == c)? + from;
        matched += 1;
        Some(idx + 1)
    };

    let Some(first) = query.first().and_then(|&c| find(c, cursor)) else {
        return Ranking::NoMatch;
    };
    cursor = first;
    for &c in &query[1..] {
        match find(c, cursor) {
            Some(next) => cursor = next,
            None => return Ranking::NoMatch,
        }
    }

    let spread = (cursor - first).max(1) as f64;
    let in_order = matched as f64 / query.len() as f64;
    Ranking::Matches(in_order * (1.0 / spread))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, catalog};
    use crate::model::{AgeSpan, Category, Notation, Position, Side, ToothType};

    fn canine(side: Side) -> ToothRecord {
        ToothRecord {
            id: format!("permanent-canine-{side}"),
            tooth_type: ToothType::Permanent,
            category: Category::Canine,
            position: Position::Maxillary,
            side,
            name: "Canine".into(),
            name_key: "canine".into(),
            notation: Notation {
                universal: "6".into(),
                palmer: "UR3".into(),
                fdi: "13".into(),
            },
            eruption: AgeSpan::new(138, "11-12 years"),
            shedding: None,
            root_completion: None,
            crown_completion: None,
        }
    }

    #[test]
    fn tokens_match_in_any_order_and_partially() {
        let right = canine(Side::Right);
        let left = canine(Side::Left);
        assert!(matches(&right, "max can right"));
        assert!(matches(&right, "right can max"));
        assert!(matches(&right, "  MAX\t can   RiGhT "));
        assert!(!matches(&left, "max can right"));
    }

    #[test]
    fn empty_query_matches_everything() {
        for r in catalog() {
            assert!(matches(r, ""));
            assert!(matches(r, "   \t "));
            assert!(matches_exact(r, ""));
            assert!(matches_with(r, "", SearchMode::Fuzzy));
        }
    }

    #[test]
    fn every_haystack_token_matches_its_record() {
        for r in catalog() {
            let text = haystack(r);
            let mut tokens: Vec<&str> = text.split_whitespace().collect();
            tokens.reverse();
            let query = tokens.join("  ").to_uppercase();
            assert!(matches(r, &query), "{} should match {query:?}", r.id);
        }
    }

    #[test]
    fn missing_optional_fields_are_empty() {
        let r = canine(Side::Right);
        let fields = searchable_fields(&r);
        assert_eq!(fields[5], "");
        assert_eq!(fields[6], "");
        assert_eq!(fields[7], "maxillary right Canine");
    }

    #[test]
    fn no_accent_folding() {
        let r = canine(Side::Right);
        assert!(!matches(&r, "canïne"));
        assert!(!matches_exact(&r, "canïne"));
    }

    #[test]
    fn fuzzy_folds_accents() {
        assert_eq!(rank_text("Canine", "canïne"), Ranking::Equal);
        assert_eq!(rank_text("Canïne", "Canine"), Ranking::CaseSensitiveEqual);
        assert!(rank(&canine(Side::Right), "canïne").passed());

        let hits = filter(catalog(), "canïne", SearchMode::Fuzzy);
        assert!(hits[..8].iter().all(|t| t.category == Category::Canine));
        assert!(filter(catalog(), "canïne", SearchMode::Tokenized).is_empty());
    }

    #[test]
    fn age_ranges_are_searchable() {
        let hits = filter(catalog(), "6-10 months", SearchMode::Tokenized);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|t| t.is_primary() && t.name == "Central Incisor"));
    }

    #[test]
    fn exact_requires_the_phrase_in_one_field() {
        let r = canine(Side::Right);
        assert!(matches_exact(&r, "Maxillary Right"));
        assert!(matches_exact(&r, "  canine "));
        assert!(!matches_exact(&r, "max can right"));
        assert!(!matches_exact(&r, "right maxillary"));
    }

    #[test]
    fn ranking_ladder() {
        assert_eq!(rank_text("Canine", "Canine"), Ranking::CaseSensitiveEqual);
        assert_eq!(rank_text("Canine", "canine"), Ranking::Equal);
        assert_eq!(rank_text("Canine tooth", "can"), Ranking::StartsWith);
        assert_eq!(rank_text("upper canine", "can"), Ranking::WordStartsWith);
        assert_eq!(rank_text("upper canine", "nin"), Ranking::Contains);
        assert_eq!(rank_text("first-premolar tooth", "fpt"), Ranking::Acronym);
        assert!(matches!(rank_text("maxillary", "mxl"), Ranking::Matches(_)));
        assert_eq!(rank_text("maxillary", "z"), Ranking::NoMatch);
        assert_eq!(rank_text("ab", "abc"), Ranking::NoMatch);
        assert_eq!(rank_text("maxillary", "yx"), Ranking::NoMatch);
    }

    #[test]
    fn closeness_prefers_tight_matches() {
        let tight = rank_text("abcdxyz", "ac").value();
        let loose = rank_text("axxxxxc", "ac").value();
        assert!(tight > loose);
        assert!(loose > 1.0);
    }

    #[test]
    fn fuzzy_filter_orders_by_rank() {
        // scattered in-order matches pass too, but rank below prefix hits
        let hits = filter(catalog(), "Third Molar", SearchMode::Fuzzy);
        assert!(hits.len() > 4);
        assert!(hits[..4].iter().all(|t| t.name == "Third Molar"));
        assert!(hits[4..].iter().all(|t| t.name != "Third Molar"));

        let hits = filter(catalog(), "canine", SearchMode::Fuzzy);
        assert!(hits[..8].iter().all(|t| t.category == Category::Canine));
        assert_eq!(hits[0].id, "primary-53");
    }

    #[test]
    fn filter_keeps_catalog_order() {
        let hits = filter(catalog(), "premolar", SearchMode::Tokenized);
        assert_eq!(hits.len(), 8);
        let ids: Vec<_> = hits.iter().map(|t| t.notation.fdi.as_str()).collect();
        assert_eq!(ids, ["14", "15", "24", "25", "34", "35", "44", "45"]);
    }

    #[test]
    fn filter_with_type_restriction() {
        let primary = catalog::by_type(Some(ToothType::Primary));
        let hits = filter(primary, "molar", SearchMode::Tokenized);
        assert_eq!(hits.len(), 8);
        assert!(hits.iter().all(|t| t.is_primary()));
    }

    #[test]
    fn search_mode_parse() {
        assert_eq!("FUZZY".parse::<SearchMode>().unwrap(), SearchMode::Fuzzy);
        assert_eq!(SearchMode::default(), SearchMode::Tokenized);
        assert!("regex".parse::<SearchMode>().is_err());
    }
}
