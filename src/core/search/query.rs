//! Substring scoring over an index snapshot.
//!
//! ```text
//! score = 10 · [query ⊂ title] + max(0, 5 − ⌊first_offset / 500⌋)
//! ```
//!
//! `first_offset` is measured in characters within `title + "\n" + body`.
//! Results are stable-sorted by score, so equal scores keep scan order.

use crate::core::search::index::Document;

pub const TITLE_BONUS: u32 = 10;
pub const MAX_POSITION_BONUS: u32 = 5;
pub const POSITION_BUCKET: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// Rank `documents` against `query`, best first, at most `limit` hits.
///
/// A blank query means "no search" and returns nothing without iterating.
pub fn rank<'a, I>(documents: I, query: &str, limit: usize) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a Document>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit<'a>> = documents
        .into_iter()
        .filter_map(|document| {
            score(document, &needle).map(|score| SearchHit { document, score })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

/// Score one document against an already-normalized needle; `None` if it doesn't match.
fn score(document: &Document, needle: &str) -> Option<u32> {
    let title = document.title.to_lowercase();
    let haystack = format!("{}\n{}", title, document.body.to_lowercase());
    let byte_offset = haystack.find(needle)?;

    let char_offset = haystack[..byte_offset].chars().count();
    let bucket = (char_offset / POSITION_BUCKET).min(MAX_POSITION_BONUS as usize) as u32;
    let mut score = MAX_POSITION_BONUS - bucket;
    if title.contains(needle) {
        score += TITLE_BONUS;
    }
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn doc(rel: &str, title: &str, body: &str) -> Document {
        Document {
            rel_path: rel.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn rels<'a>(hits: &[SearchHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.document.rel_path.as_str()).collect()
    }

    #[test]
    fn test_blank_query_scans_nothing() {
        let docs = vec![doc("a.md", "A", "anything")];
        let scanned = Cell::new(0);
        let hits = rank(docs.iter().inspect(|_| scanned.set(scanned.get() + 1)), "   ", 20);
        assert!(hits.is_empty());
        assert_eq!(scanned.get(), 0);
    }

    #[test]
    fn test_match_is_case_insensitive_and_trimmed() {
        let docs = vec![doc("a.md", "Notes", "Nmap SCAN flags")];
        let hits = rank(&docs, "  scan ", 20);
        assert_eq!(rels(&hits), vec!["a.md"]);
    }

    #[test]
    fn test_non_matching_documents_excluded() {
        let docs = vec![doc("a.md", "A", "alpha"), doc("b.md", "B", "beta")];
        assert_eq!(rels(&rank(&docs, "beta", 20)), vec!["b.md"]);
    }

    #[test]
    fn test_title_match_outscores_body_only_match() {
        let body = "padding ".repeat(10);
        let in_title = doc("t.md", "Hashcat", &body);
        let in_body = doc("b.md", "Cracking", &format!("hashcat {body}"));
        let docs = vec![in_body, in_title];
        let hits = rank(&docs, "hashcat", 20);
        assert_eq!(rels(&hits), vec!["t.md", "b.md"]);
        assert_eq!(hits[0].score, TITLE_BONUS + MAX_POSITION_BONUS);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_position_bonus_decays_and_floors() {
        let early = doc("early.md", "x", "needle");
        let mid = doc("mid.md", "x", &format!("{}needle", "a".repeat(1200)));
        let late = doc("late.md", "x", &format!("{}needle", "a".repeat(5000)));
        let docs = vec![late, mid, early];
        let hits = rank(&docs, "needle", 20);
        assert_eq!(rels(&hits), vec!["early.md", "mid.md", "late.md"]);
        assert_eq!(hits[0].score, 5);
        // offset 1202 → bucket 2
        assert_eq!(hits[1].score, 3);
        assert_eq!(hits[2].score, 0);
    }

    #[test]
    fn test_offset_counts_characters_not_bytes() {
        // 400 two-byte chars put the match at char 402 but byte 802.
        let body = format!("{}needle", "é".repeat(400));
        let docs = vec![doc("fr.md", "x", &body)];
        assert_eq!(rank(&docs, "needle", 20)[0].score, 5);
    }

    #[test]
    fn test_equal_scores_keep_scan_order() {
        let docs = vec![
            doc("1.md", "a", "term"),
            doc("2.md", "b", "term"),
            doc("3.md", "c", "term"),
        ];
        assert_eq!(rels(&rank(&docs, "term", 20)), vec!["1.md", "2.md", "3.md"]);
    }

    #[test]
    fn test_limit_truncates() {
        let docs: Vec<Document> = (0..30)
            .map(|i| doc(&format!("{i}.md"), "t", "common"))
            .collect();
        assert_eq!(rank(&docs, "common", 20).len(), 20);
        assert!(rank(&docs, "common", 0).is_empty());
    }
}
