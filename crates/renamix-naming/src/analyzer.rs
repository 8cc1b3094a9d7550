//! Content analyzer contract.

use anyhow::Result;
use async_trait::async_trait;

/// External collaborator that derives a name suggestion from file content.
///
/// Implementations return a free-form suggestion; the resolver sanitizes it
/// and appends the original extension. A rejection of any kind is treated as
/// "no suggestion available" by the caller.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Identifier used in logs and notifications.
    fn name(&self) -> &str;

    /// Whether this analyzer can handle the given content type.
    fn supports(&self, content_type: &str) -> bool;

    /// Derive a name suggestion from the file's content.
    async fn analyze(&self, data: &[u8], content_type: &str) -> Result<String>;
}

/// Truncate extracted text to at most `max` bytes, backing off to a char
/// boundary so multibyte text cannot split.
pub(crate) fn truncate_text(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_respects_char_boundaries() {
        let mut text = "héllo wörld".to_string();
        truncate_text(&mut text, 2);
        // 'é' is two bytes; the cut backs off to before it.
        assert_eq!(text, "h");

        let mut short = "abc".to_string();
        truncate_text(&mut short, 10);
        assert_eq!(short, "abc");
    }
}
