//! Mock upstream providers
//!
//! Each helper mounts the routes one provider kind's module calls, so tests
//! exercise the real request code against a local wiremock server.

use serde_json::json;
use universal_ai::{Capability, ProviderDescriptor, ProviderKind};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "test-key-123";

/// A wiremock server playing the part of one provider
pub struct MockProvider {
    pub server: MockServer,
}

impl MockProvider {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Descriptor for `kind` pointing at this server, credential attached
    pub fn descriptor(&self, name: &str, kind: ProviderKind) -> ProviderDescriptor {
        let base_url = match kind {
            ProviderKind::OpenAi => format!("{}/v1", self.uri()),
            ProviderKind::Generic => format!("{}/generate", self.uri()),
            _ => self.uri(),
        };
        ProviderDescriptor::new(name, kind)
            .with_base_url(base_url)
            .with_api_key(TEST_KEY)
    }

    /// OpenAI-style `/v1/models` answering 200
    pub async fn healthy_openai(&self) {
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&self.server)
            .await;
    }

    pub async fn openai_chat(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", format!("Bearer {}", TEST_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": text},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn openai_image(&self, url: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"created": 1, "data": [{"url": url}]})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn openai_speech(&self, audio: &[u8]) {
        Mock::given(method("POST"))
            .and(path("/v1/audio/speech"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(audio.to_vec()),
            )
            .mount(&self.server)
            .await;
    }

    /// Serves `/files/clip.mp3` and answers the transcription upload
    pub async fn openai_transcription(&self, text: &str) -> String {
        Mock::given(method("GET"))
            .and(path("/files/clip.mp3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0u8, 1, 2, 3]),
            )
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": text})))
            .mount(&self.server)
            .await;
        format!("{}/files/clip.mp3", self.uri())
    }

    pub async fn anthropic_messages(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", TEST_KEY))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": text}],
                "usage": {"input_tokens": 10, "output_tokens": 20}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn gemini_generate(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1beta/models/[^/]+:generateContent$"))
            .and(query_param("key", TEST_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": text}]}
                }],
                "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 6}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn elevenlabs_speech(&self, audio: &[u8]) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/v1/text-to-speech/[^/]+$"))
            .and(header("xi-api-key", TEST_KEY))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(audio.to_vec()),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn generic(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Every request answers `status` with `body`
    pub async fn fail_all(&self, status: u16, body: serde_json::Value) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Every POST answers after `millis`
    pub async fn slow_posts(&self, millis: u64) {
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_millis(millis))
                    .set_body_json(json!({"text": "late"})),
            )
            .mount(&self.server)
            .await;
    }
}

/// Descriptor with text models m1 and m2
pub fn text_models(descriptor: ProviderDescriptor) -> ProviderDescriptor {
    descriptor.with_models(Capability::Text, ["m1", "m2"])
}
