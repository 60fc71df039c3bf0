//! Gemini `generateContent` backend.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use campus_shared::types::Language;

use super::{Assistant, AssistantError, AssistantReply};
use crate::config::GeminiConfig;

const ASK_INSTRUCTION: &str = "You are Jarvis, an academic assistant for Algerian university \
students and professors. Answer precisely, cite your sources, and reply in the requested language.";

const TRANSLATE_INSTRUCTION: &str = "You are Jarvis, an assistant specialised in translating \
abstracts of scientific papers. Keep the academic register and the terminology appropriate to the \
field. Always translate the provided abstract into the target language and return only the translation.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAssistant {
    /// Returns `None` when the configuration carries no API key.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>, AssistantError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Some(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }))
    }

    async fn generate(&self, body: Value) -> Result<GenerateResponse, AssistantError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistantError::Api { status, body });
        }

        Ok(resp.json().await?)
    }
}

fn request_body(instruction: &str, prompt: &str, generation: Value, tools: Option<Value>) -> Value {
    let mut body = json!({
        "systemInstruction": { "parts": [{ "text": instruction }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": generation,
    });
    if let Some(tools) = tools {
        body["tools"] = tools;
    }
    body
}

fn into_reply(response: GenerateResponse) -> Result<AssistantReply, AssistantError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(AssistantError::EmptyResponse);
    };

    let mut text = String::new();
    let mut audio = None;
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(inline) = part.inline_data {
            audio = Some(BASE64.decode(inline.data.as_bytes())?);
        }
    }

    let sources = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web.and_then(|w| w.uri))
        .collect();

    if text.trim().is_empty() && audio.is_none() {
        return Err(AssistantError::EmptyResponse);
    }

    Ok(AssistantReply {
        text,
        audio,
        sources,
    })
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn ask(&self, prompt: &str, language: Language) -> Result<AssistantReply, AssistantError> {
        let prompt = format!("Answer in {}.\n\n{prompt}", language.english_name());
        let body = request_body(
            ASK_INSTRUCTION,
            &prompt,
            json!({ "temperature": 0.7 }),
            Some(json!([{ "google_search": {} }])),
        );

        debug!(model = %self.model, "assistant ask");
        into_reply(self.generate(body).await?)
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String, AssistantError> {
        let prompt = format!(
            "Jarvis, please translate the following scientific abstract into {}:\n\n\"{text}\"",
            target.english_name()
        );
        let body = request_body(
            TRANSLATE_INSTRUCTION,
            &prompt,
            json!({ "temperature": 0.2, "topP": 0.9, "topK": 40 }),
            None,
        );

        debug!(model = %self.model, target = target.code(), "assistant translate");
        let reply = into_reply(self.generate(body).await?)?;
        if reply.text.trim().is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reply_collects_text_audio_and_sources() {
        let audio = BASE64.encode([1u8, 2, 3]);
        let json = format!(
            r#"{{"candidates":[{{
                "content":{{"parts":[{{"text":"Hello "}},{{"text":"world"}},{{"inlineData":{{"mimeType":"audio/pcm","data":"{audio}"}}}}]}},
                "groundingMetadata":{{"groundingChunks":[{{"web":{{"uri":"https://a.dz","title":"A"}}}},{{"retrievedContext":{{}}}}]}}
            }}]}}"#
        );
        let reply = into_reply(parse(&json)).unwrap();
        assert_eq!(reply.text, "Hello world");
        assert_eq!(reply.audio, Some(vec![1, 2, 3]));
        assert_eq!(reply.sources, vec!["https://a.dz".to_string()]);
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = into_reply(parse(r#"{"candidates":[]}"#)).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyResponse));
    }

    #[test]
    fn blank_text_is_empty_response() {
        let err = into_reply(parse(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyResponse));
    }

    #[test]
    fn missing_key_builds_no_client() {
        let config = GeminiConfig::default();
        assert!(GeminiAssistant::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn request_body_includes_tools_only_when_given() {
        let plain = request_body("i", "p", json!({}), None);
        assert!(plain.get("tools").is_none());
        let grounded = request_body("i", "p", json!({}), Some(json!([{ "google_search": {} }])));
        assert!(grounded["tools"].is_array());
        assert_eq!(grounded["contents"][0]["parts"][0]["text"], "p");
    }
}
