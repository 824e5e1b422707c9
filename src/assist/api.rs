use std::{
    future::Future,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::OboeruError;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub role: &'static str,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// The subset of a generateContent response we read. Some gateways return
/// an SDK-style top level `text` shortcut, most only fill candidate parts,
/// so both shapes are kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Where usable text was found in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// The top level `text` field.
    Direct(String),
    /// Concatenated text parts of the first candidate.
    Fragments(String),
    /// No usable text anywhere.
    Absent,
}

/// Tries the `text` field first, then the first candidate's parts joined in
/// order. Whitespace-only content does not count as text.
pub fn extract_text(response: &GenerateResponse) -> ExtractedText {
    if let Some(text) = &response.text {
        if !text.trim().is_empty() {
            return ExtractedText::Direct(text.clone());
        }
    }

    if let Some(candidate) = response.candidates.first() {
        if let Some(content) = &candidate.content {
            let joined: String =
                content.parts.iter().filter_map(|part| part.text.as_deref()).collect();
            if !joined.trim().is_empty() {
                return ExtractedText::Fragments(joined);
            }
        }
    }

    ExtractedText::Absent
}

/// One-line description of why a response carried no text, for the log.
pub fn absence_reason(response: &GenerateResponse) -> String {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return format!("prompt blocked: {}", reason);
        }
    }

    if let Some(candidate) = response.candidates.first() {
        if let Some(reason) = &candidate.finish_reason {
            return format!("finish reason: {}", reason);
        }
    }

    "empty response".to_string()
}

pub trait GenerateBackend {
    fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> impl Future<Output = Result<GenerateResponse, OboeruError>>;
}

pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(api_key: String) -> Result<Self, OboeruError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(120)).build()?;

        Ok(Self { client, api_key })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent?key={}", GEMINI_BASE_URL, GEMINI_MODEL, self.api_key)
    }
}

impl GenerateBackend for GeminiBackend {
    async fn generate(
        &self,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<GenerateResponse, OboeruError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt.to_string() }],
            }],
            generation_config: config,
        };

        let response = self.client.post(self.endpoint()).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(OboeruError::Custom(format!(
                "Text service returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json::<GenerateResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_parts(parts: &[Option<&str>]) -> GenerateResponse {
        GenerateResponse {
            text: None,
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: parts
                        .iter()
                        .map(|text| CandidatePart { text: text.map(str::to_string) })
                        .collect(),
                }),
                finish_reason: None,
            }],
            prompt_feedback: None,
        }
    }

    #[test]
    fn test_direct_text_wins_over_fragments() {
        let mut response = response_with_parts(&[Some("fragment")]);
        response.text = Some("direct".to_string());

        assert_eq!(extract_text(&response), ExtractedText::Direct("direct".to_string()));
    }

    #[test]
    fn test_fragments_join_in_order() {
        let response = response_with_parts(&[Some("Нэг. "), None, Some("Хоёр.")]);

        assert_eq!(extract_text(&response), ExtractedText::Fragments("Нэг. Хоёр.".to_string()));
    }

    #[test]
    fn test_whitespace_only_text_falls_through_to_fragments() {
        let mut response = response_with_parts(&[Some("Бодит хариулт")]);
        response.text = Some("   \n".to_string());

        assert_eq!(
            extract_text(&response),
            ExtractedText::Fragments("Бодит хариулт".to_string())
        );
    }

    #[test]
    fn test_contentless_response_is_absent() {
        let response = GenerateResponse {
            text: None,
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some("SAFETY".to_string()),
            }],
            prompt_feedback: None,
        };

        assert_eq!(extract_text(&response), ExtractedText::Absent);
        assert!(absence_reason(&response).contains("SAFETY"));
    }

    #[test]
    fn test_whitespace_parts_are_absent() {
        let response = response_with_parts(&[Some("  "), Some("\n")]);

        assert_eq!(extract_text(&response), ExtractedText::Absent);
    }

    #[test]
    fn test_response_parses_from_wire_json() {
        // Trimmed capture of a real generateContent response body.
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "Сайн байна уу" }], "role": "model" },
                "finishReason": "STOP",
                "index": 0
            }],
            "modelVersion": "test"
        }"#;

        let response: GenerateResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            extract_text(&response),
            ExtractedText::Fragments("Сайн байна уу".to_string())
        );
    }
}
