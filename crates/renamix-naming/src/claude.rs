//! Anthropic (Claude) content analyzer.
//!
//! Uses the Messages API: PDFs are analyzed through their extracted text,
//! images through a base64 vision block. The base URL is injectable so tests
//! can point the analyzer at a mock server.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::analyzer::ContentAnalyzer;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 256;

/// How much extracted document text is sent for analysis.
const TEXT_SAMPLE_LEN: usize = 2000;

#[derive(Clone)]
pub struct ClaudeAnalyzer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

// Messages API request/response
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
struct MessageParam {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlockResponse {
    Text { text: String },
}

impl ClaudeAnalyzer {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, ANTHROPIC_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client for Claude analyzer")?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url,
            client,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    fn naming_prompt() -> &'static str {
        "Suggest a short, descriptive file name for this content. \
         Use a few words capturing the topic. Respond with the name only, \
         no extension, no explanation."
    }

    async fn call_messages(&self, content: Vec<ContentBlock>) -> Result<String> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![MessageParam {
                role: "user".to_string(),
                content,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send Messages API request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Anthropic Messages API failed with status {}: {}",
                status,
                error_text
            ));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse Messages API response")?;

        let text = parsed
            .content
            .into_iter()
            .map(|b| match b {
                ContentBlockResponse::Text { text } => text,
            })
            .next()
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(anyhow!("Messages API returned an empty suggestion"));
        }
        Ok(text)
    }
}

#[async_trait]
impl ContentAnalyzer for ClaudeAnalyzer {
    fn name(&self) -> &str {
        "claude"
    }

    fn supports(&self, content_type: &str) -> bool {
        matches!(
            content_type,
            "application/pdf" | "image/jpeg" | "image/png" | "image/webp"
        )
    }

    async fn analyze(&self, data: &[u8], content_type: &str) -> Result<String> {
        let content = match content_type {
            "application/pdf" => {
                let mut text = pdf_extract::extract_text_from_mem(data)
                    .map_err(|e| anyhow!("Failed to extract PDF text: {}", e))?;
                crate::analyzer::truncate_text(&mut text, TEXT_SAMPLE_LEN);
                if text.trim().is_empty() {
                    return Err(anyhow!("Document contains no extractable text"));
                }
                vec![ContentBlock::Text {
                    text: format!("{}\n\nDocument text:\n{}", Self::naming_prompt(), text),
                }]
            }
            t if t.starts_with("image/") => vec![
                ContentBlock::Image {
                    source: ImageSource {
                        source_type: "base64".to_string(),
                        media_type: content_type.to_string(),
                        data: STANDARD.encode(data),
                    },
                },
                ContentBlock::Text {
                    text: Self::naming_prompt().to_string(),
                },
            ],
            other => return Err(anyhow!("Unsupported content type: {}", other)),
        };

        self.call_messages(content).await
    }
}
