//! Request executor tests
//!
//! One mock server per test, mounted with the routes of the provider kind
//! under test.

#[cfg(test)]
mod tests {
    use crate::common::providers::{MockProvider, text_models};
    use tokio_test::{assert_err, assert_ok};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;
    use std::time::Duration;
    use universal_ai::core::providers::base::ConnectionPool;
    use universal_ai::core::types::AudioData;
    use universal_ai::{
        Capability, GenerationRequest, PricingTable, ProviderError, ProviderKind,
        RequestExecutor, ResponsePayload,
    };

    fn executor() -> RequestExecutor {
        RequestExecutor::new(
            ConnectionPool::new().unwrap(),
            PricingTable::default(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_openai_chat_completion() {
        let mock = MockProvider::start().await;
        mock.openai_chat("Hello from the mock").await;
        let provider = text_models(mock.descriptor("openai", ProviderKind::OpenAi));

        let request = GenerationRequest::text("Hello world").with_model("m2");
        let output = assert_ok!(executor().execute(&provider, &request).await);

        assert_eq!(output.model, "m2");
        assert!(!output.degraded);
        assert!(output.cost > 0.0);
        match output.payload {
            ResponsePayload::Text { text, usage } => {
                assert_eq!(text, "Hello from the mock");
                assert_eq!(usage.unwrap().total_tokens, 21);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_model_falls_back_to_default() {
        let mock = MockProvider::start().await;
        mock.openai_chat("ok").await;
        let provider = text_models(mock.descriptor("openai", ProviderKind::OpenAi));

        let request = GenerationRequest::text("hi").with_model("not-listed");
        let output = assert_ok!(executor().execute(&provider, &request).await);
        assert_eq!(output.model, "m1");
    }

    #[tokio::test]
    async fn test_openai_image_generation() {
        let mock = MockProvider::start().await;
        mock.openai_image("https://images.test/cat.png").await;
        let provider = mock
            .descriptor("openai", ProviderKind::OpenAi)
            .with_models(Capability::Image, ["dall-e-3"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::image("a cat"))
                .await
        );
        assert_eq!(
            output.payload,
            ResponsePayload::Image {
                url: "https://images.test/cat.png".to_string()
            }
        );
        assert!((output.cost - 0.04).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_openai_speech_is_base64_encoded() {
        let mock = MockProvider::start().await;
        mock.openai_speech(b"ID3-audio").await;
        let provider = mock
            .descriptor("openai", ProviderKind::OpenAi)
            .with_models(Capability::Voice, ["tts-1"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::voice("Read this aloud"))
                .await
        );
        match output.payload {
            ResponsePayload::Voice {
                audio: AudioData::Base64 { data, mime_type },
            } => {
                assert_eq!(STANDARD.decode(data).unwrap(), b"ID3-audio");
                assert_eq!(mime_type, "audio/mpeg");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_openai_transcription() {
        let mock = MockProvider::start().await;
        let audio_url = mock.openai_transcription("the quick brown fox").await;
        let provider = mock
            .descriptor("openai", ProviderKind::OpenAi)
            .with_models(Capability::Audio, ["whisper-1"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::transcription(audio_url))
                .await
        );
        assert_eq!(
            output.payload,
            ResponsePayload::Transcript {
                text: "the quick brown fox".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_anthropic_messages() {
        let mock = MockProvider::start().await;
        mock.anthropic_messages("Bonjour").await;
        let provider = mock
            .descriptor("anthropic", ProviderKind::Anthropic)
            .with_models(Capability::Text, ["claude-3-5-haiku-latest"]);

        let request = GenerationRequest::text("Say hello in French").with_system("Be brief");
        let output = assert_ok!(executor().execute(&provider, &request).await);
        assert_eq!(output.payload.as_text(), Some("Bonjour"));
        assert_eq!(output.model, "claude-3-5-haiku-latest");
    }

    #[tokio::test]
    async fn test_gemini_generate_content() {
        let mock = MockProvider::start().await;
        mock.gemini_generate("Hola").await;
        let provider = mock
            .descriptor("google", ProviderKind::Google)
            .with_models(Capability::Text, ["gemini-1.5-flash"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::text("Say hello in Spanish"))
                .await
        );
        match output.payload {
            ResponsePayload::Text { text, usage } => {
                assert_eq!(text, "Hola");
                assert_eq!(usage.unwrap().prompt_tokens, 4);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_elevenlabs_speech() {
        let mock = MockProvider::start().await;
        mock.elevenlabs_speech(b"mp3-bytes").await;
        let provider = mock
            .descriptor("elevenlabs", ProviderKind::ElevenLabs)
            .with_models(Capability::Voice, ["eleven_multilingual_v2"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::voice("Narrate this"))
                .await
        );
        assert!(matches!(
            output.payload,
            ResponsePayload::Voice {
                audio: AudioData::Base64 { .. }
            }
        ));
        assert!((output.cost - 0.03).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_generic_video_submission() {
        let mock = MockProvider::start().await;
        mock.generic(json!({"id": "job-42", "status": "queued"})).await;
        let provider = mock
            .descriptor("runway", ProviderKind::Generic)
            .with_models(Capability::Video, ["gen-3"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::video("a lighthouse at dusk"))
                .await
        );
        assert!(!output.degraded);
        match output.payload {
            ResponsePayload::Video { job_id, status, .. } => {
                assert_eq!(job_id, "job-42");
                assert_eq!(status, "queued");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
        assert!((output.cost - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_generic_failure_degrades() {
        let mock = MockProvider::start().await;
        mock.fail_all(503, json!({"error": "overloaded"})).await;
        let provider = mock
            .descriptor("stability", ProviderKind::Generic)
            .with_models(Capability::Image, ["sdxl"]);

        let output = assert_ok!(
            executor()
                .execute(&provider, &GenerationRequest::image("a fox"))
                .await
        );
        assert!(output.degraded);
        assert_eq!(output.cost, 0.0);
        assert_eq!(
            output.payload,
            ResponsePayload::Image { url: String::new() }
        );
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let mock = MockProvider::start().await;
        mock.fail_all(401, json!({"error": {"message": "invalid api key"}}))
            .await;
        let provider = text_models(mock.descriptor("openai", ProviderKind::OpenAi));

        let err = assert_err!(
            executor()
                .execute(&provider, &GenerationRequest::text("hi"))
                .await
        );
        assert!(matches!(err, ProviderError::Authentication { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_rate_limit_carries_retry_hint() {
        let mock = MockProvider::start().await;
        mock.fail_all(429, json!({"error": {"retry_after": 7}})).await;
        let provider = mock
            .descriptor("anthropic", ProviderKind::Anthropic)
            .with_models(Capability::Text, ["claude-3-5-haiku-latest"]);

        let err = assert_err!(
            executor()
                .execute(&provider, &GenerationRequest::text("hi"))
                .await
        );
        assert!(matches!(err, ProviderError::RateLimit { .. }));
        assert_eq!(err.retry_delay(), Some(7));
    }

    #[tokio::test]
    async fn test_deadline_is_enforced() {
        let mock = MockProvider::start().await;
        mock.slow_posts(2_000).await;
        let provider = text_models(mock.descriptor("openai", ProviderKind::OpenAi));

        let request = GenerationRequest::text("hi").with_timeout(Duration::from_millis(200));
        let err = assert_err!(executor().execute(&provider, &request).await);
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_missing_credential_is_rejected_before_sending() {
        let mock = MockProvider::start().await;
        let provider = universal_ai::ProviderDescriptor::new("openai", ProviderKind::OpenAi)
            .with_base_url(format!("{}/v1", mock.uri()))
            .with_models(Capability::Text, ["m1"]);

        let err = assert_err!(
            executor()
                .execute(&provider, &GenerationRequest::text("hi"))
                .await
        );
        assert!(matches!(err, ProviderError::Configuration { .. }));
        assert!(mock.server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_video_is_not_supported_by_openai() {
        let mock = MockProvider::start().await;
        let provider = mock
            .descriptor("openai", ProviderKind::OpenAi)
            .with_models(Capability::Video, ["sora"]);

        let err = assert_err!(
            executor()
                .execute(&provider, &GenerationRequest::video("waves"))
                .await
        );
        assert!(matches!(err, ProviderError::NotSupported { .. }));
    }
}
