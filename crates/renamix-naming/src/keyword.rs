//! Heuristic document analyzer.
//!
//! Extracts text from PDFs, scores keywords by frequency against a stop-word
//! list, classifies the document's category and type from keyword tables,
//! and composes a suggestion of the form
//! `{category}_{type}[_{keyword}[_{keyword}]]_{date}`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;

use crate::analyzer::ContentAnalyzer;

const MAX_TEXT_LEN: usize = 20_000;
const MAX_KEYWORDS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "about", "which", "when", "were", "been", "into", "more", "also", "some", "than",
    "then",
];

const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "technical",
        &["code", "programming", "software", "data", "algorithm", "technical", "documentation"],
    ),
    (
        "business",
        &["report", "financial", "marketing", "strategy", "business", "proposal", "budget"],
    ),
    (
        "academic",
        &["research", "study", "analysis", "theory", "methodology", "experiment", "hypothesis"],
    ),
    (
        "legal",
        &["contract", "agreement", "law", "regulation", "policy", "compliance", "terms"],
    ),
    (
        "medical",
        &["patient", "clinical", "medical", "health", "diagnosis", "treatment", "healthcare"],
    ),
    (
        "educational",
        &["course", "lecture", "lesson", "student", "education", "learning", "teaching"],
    ),
    (
        "creative",
        &["design", "art", "music", "video", "photo", "creative", "portfolio"],
    ),
    (
        "scientific",
        &["science", "physics", "chemistry", "biology", "mathematics", "lab", "experiment"],
    ),
];

const DOCUMENT_TYPES: &[(&str, &[&str])] = &[
    ("report", &["report", "analysis", "summary", "review"]),
    ("presentation", &["presentation", "slides", "deck"]),
    ("manual", &["manual", "guide", "documentation", "instructions"]),
    ("proposal", &["proposal", "pitch", "plan"]),
    ("form", &["form", "application", "questionnaire"]),
    ("paper", &["paper", "article", "publication", "journal"]),
    ("thesis", &["thesis", "dissertation", "research"]),
    ("contract", &["contract", "agreement", "terms"]),
    ("invoice", &["invoice", "bill", "receipt"]),
    ("resume", &["resume", "cv", "curriculum"]),
];

/// Deterministic, fully local analyzer for PDF documents.
#[derive(Debug, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compose a name suggestion from already-extracted text.
    pub fn suggest_from_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let keywords = extract_keywords(&lowered);
        let category = category_for(&lowered);
        let doc_type = document_type_for(&lowered);

        let mut name = format!("{}_{}", category, doc_type);
        for keyword in keywords.iter().take(2) {
            // Classification labels double as frequent words; repeating them
            // in the name adds nothing.
            if keyword != category && keyword != doc_type {
                name.push('_');
                name.push_str(keyword);
            }
        }

        name.push('_');
        name.push_str(&Utc::now().date_naive().format("%Y-%m-%d").to_string());
        name
    }
}

#[async_trait]
impl ContentAnalyzer for KeywordAnalyzer {
    fn name(&self) -> &str {
        "keyword"
    }

    fn supports(&self, content_type: &str) -> bool {
        content_type == "application/pdf"
    }

    async fn analyze(&self, data: &[u8], content_type: &str) -> Result<String> {
        if !self.supports(content_type) {
            return Err(anyhow!("Unsupported content type: {}", content_type));
        }

        let mut text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| anyhow!("Failed to extract PDF text: {}", e))?;
        crate::analyzer::truncate_text(&mut text, MAX_TEXT_LEN);

        if text.trim().is_empty() {
            return Err(anyhow!("Document contains no extractable text"));
        }

        Ok(self.suggest_from_text(&text))
    }
}

/// Most frequent non-stop-words of length > 3, at most [`MAX_KEYWORDS`],
/// first-occurrence order breaking frequency ties.
fn extract_keywords(lowered: &str) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut position = 0usize;

    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3 && !STOP_WORDS.contains(w))
    {
        let entry = counts.entry(word).or_insert((0, position));
        entry.0 += 1;
        position += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(w, _)| w.to_string())
        .collect()
}

/// Category with the most keyword hits; "document" when nothing matches.
fn category_for(lowered: &str) -> &'static str {
    let mut best = "document";
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORIES {
        let score = keywords.iter().filter(|k| lowered.contains(*k)).count();
        if score > best_score {
            best_score = score;
            best = category;
        }
    }

    best
}

/// First document type with any keyword hit; "document" when none match.
fn document_type_for(lowered: &str) -> &'static str {
    for (doc_type, keywords) in DOCUMENT_TYPES {
        if keywords.iter().any(|k| lowered.contains(*k)) {
            return doc_type;
        }
    }
    "document"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let keywords = extract_keywords("revenue revenue revenue growth growth margin");
        assert_eq!(keywords[0], "revenue");
        assert_eq!(keywords[1], "growth");
        assert_eq!(keywords[2], "margin");
    }

    #[test]
    fn test_extract_keywords_filters_short_and_stop_words() {
        let keywords = extract_keywords("the and are all too big big big");
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"and".to_string()));
        // "big" is only three characters.
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_category_detection() {
        assert_eq!(category_for("quarterly financial report with budget"), "business");
        assert_eq!(category_for("patient clinical diagnosis notes"), "medical");
        assert_eq!(category_for("nothing matching here"), "document");
    }

    #[test]
    fn test_document_type_detection() {
        assert_eq!(document_type_for("annual summary and analysis"), "report");
        assert_eq!(document_type_for("signed agreement between parties"), "contract");
        assert_eq!(document_type_for("unclassifiable text"), "document");
    }

    #[test]
    fn test_suggest_from_text_shape() {
        let analyzer = KeywordAnalyzer::new();
        let name = analyzer
            .suggest_from_text("Quarterly financial report: revenue revenue growth projections");
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(name.starts_with("business_report_"), "got {}", name);
        assert!(name.contains("revenue"));
        assert!(name.ends_with(&today));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf() {
        let analyzer = KeywordAnalyzer::new();
        assert!(!analyzer.supports("image/png"));
        assert!(analyzer.analyze(b"data", "image/png").await.is_err());
    }

    #[tokio::test]
    async fn test_analyze_rejects_garbage_pdf() {
        let analyzer = KeywordAnalyzer::new();
        assert!(analyzer
            .analyze(b"not a pdf at all", "application/pdf")
            .await
            .is_err());
    }
}
