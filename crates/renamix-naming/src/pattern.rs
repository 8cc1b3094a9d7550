//! Token-pattern name generation.
//!
//! Recognized tokens: `{date}` (ISO date), `{type}` (primary part of the
//! content type), `{original}` (original name without its final extension),
//! `{counter}` (store-scoped monotonic counter). Unrecognized tokens pass
//! through verbatim. The resolved base name always gets the original file's
//! extension appended.

use chrono::NaiveDate;

use renamix_core::constants::DEFAULT_PATTERN_TEMPLATE;
use renamix_core::FileRecord;

/// Per-resolution inputs for token substitution.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext {
    pub today: NaiveDate,
    /// Monotonic counter value for the `{counter}` token, handed out by the
    /// store so values never collide within a batch.
    pub counter: u32,
}

impl TokenContext {
    pub fn new(today: NaiveDate, counter: u32) -> Self {
        Self { today, counter }
    }
}

/// Resolve a template (falling back to the synthesized default when empty or
/// absent) and append the original file's extension.
pub fn resolve_pattern(template: Option<&str>, record: &FileRecord, ctx: &TokenContext) -> String {
    let template = template
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PATTERN_TEMPLATE);

    let base = expand(template, record, ctx);
    format!("{}{}", base, extension_suffix(&record.original_name))
}

/// Substitute all recognized tokens in `template`.
fn expand(template: &str, record: &FileRecord, ctx: &TokenContext) -> String {
    template
        .replace("{date}", &ctx.today.format("%Y-%m-%d").to_string())
        .replace("{type}", primary_type(&record.content_type))
        .replace("{original}", file_stem(&record.original_name))
        .replace("{counter}", &ctx.counter.to_string())
}

/// Text before the `/` of a content type (`application/pdf` → `application`).
pub fn primary_type(content_type: &str) -> &str {
    content_type.split('/').next().unwrap_or(content_type)
}

/// Name with its final extension stripped. Leading-dot files keep their
/// name unchanged.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// The final extension including the dot, or empty when there is none.
pub fn extension_suffix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// Reduce an analyzer suggestion to a safe base name: lowercase, word
/// characters only, underscores between words.
pub fn sanitize_base_name(suggestion: &str) -> String {
    const MAX: usize = 80;

    let mut out = String::with_capacity(suggestion.len().min(MAX));
    let mut last_underscore = true;
    for c in suggestion.trim().chars() {
        if out.len() >= MAX {
            break;
        }
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }

    if out.len() < 3 {
        "file".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::Utc;
    use renamix_core::RawFile;

    fn record(name: &str, content_type: &str) -> FileRecord {
        FileRecord::from_raw(RawFile::new(name, content_type, Bytes::from_static(b"x")))
    }

    fn ctx(counter: u32) -> TokenContext {
        TokenContext::new(Utc::now().date_naive(), counter)
    }

    #[test]
    fn test_all_tokens_substituted() {
        let rec = record("report.pdf", "application/pdf");
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let name = resolve_pattern(Some("{date}_{type}_{original}"), &rec, &ctx(7));
        assert_eq!(name, format!("{}_application_report.pdf", today));
    }

    #[test]
    fn test_counter_token_and_repeats() {
        let rec = record("a.txt", "text/plain");
        let name = resolve_pattern(Some("{counter}-{counter}"), &rec, &ctx(42));
        assert_eq!(name, "42-42.txt");
    }

    #[test]
    fn test_unrecognized_tokens_pass_through() {
        let rec = record("a.txt", "text/plain");
        let name = resolve_pattern(Some("{project}_{original}"), &rec, &ctx(0));
        assert_eq!(name, "{project}_a.txt");
    }

    #[test]
    fn test_empty_template_synthesizes_default() {
        let rec = record("photo.png", "image/png");
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(
            resolve_pattern(None, &rec, &ctx(3)),
            format!("image_{}_3.png", today)
        );
        assert_eq!(
            resolve_pattern(Some("   "), &rec, &ctx(3)),
            format!("image_{}_3.png", today)
        );
    }

    #[test]
    fn test_extensionless_original_gets_no_extension() {
        let rec = record("README", "text/plain");
        let name = resolve_pattern(Some("{original}_{counter}"), &rec, &ctx(1));
        assert_eq!(name, "README_1");
    }

    #[test]
    fn test_stem_and_extension_edge_cases() {
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(extension_suffix("archive.tar.gz"), ".gz");
        assert_eq!(file_stem(".env"), ".env");
        assert_eq!(extension_suffix(".env"), "");
        assert_eq!(file_stem("plain"), "plain");
        assert_eq!(extension_suffix("plain"), "");
    }

    #[test]
    fn test_sanitize_base_name() {
        assert_eq!(
            sanitize_base_name("Quarterly Revenue Report"),
            "quarterly_revenue_report"
        );
        assert_eq!(sanitize_base_name("  A -- strange / name!  "), "a_strange_name");
        assert_eq!(sanitize_base_name("??"), "file");
        assert_eq!(sanitize_base_name(""), "file");
    }

    #[test]
    fn test_sanitize_truncates_long_suggestions() {
        let long = "word ".repeat(50);
        assert!(sanitize_base_name(&long).len() <= 80);
    }
}
