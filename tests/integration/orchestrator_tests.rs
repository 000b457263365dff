//! Orchestrator end-to-end tests
//!
//! Real HTTP probes and provider calls against mock servers.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{AlwaysDown, RequestFactory, quiet_health};
    use crate::common::providers::{MockProvider, TEST_KEY, text_models};
    use serde_json::json;
    use std::sync::Arc;
    use universal_ai::config::ProviderConfig;
    use universal_ai::{
        Capability, Config, GenerationRequest, Orchestrator, ProviderDescriptor, ProviderKind,
        ProviderRegistry, Tier,
    };
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    async fn orchestrator(providers: Vec<ProviderDescriptor>) -> Orchestrator {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.register(provider).unwrap();
        }
        let orchestrator = Orchestrator::builder()
            .registry(registry)
            .health_config(quiet_health())
            .build()
            .unwrap();
        orchestrator.start().await;
        orchestrator
    }

    async fn chat_calls(mock: &MockProvider) -> usize {
        mock.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == "/v1/chat/completions")
            .count()
    }

    #[tokio::test]
    async fn test_hello_world_then_cache_hit() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        mock.openai_chat("Hi there").await;
        let orchestrator =
            orchestrator(vec![text_models(mock.descriptor("openai", ProviderKind::OpenAi))]).await;

        let first = orchestrator.process(RequestFactory::hello_world()).await;
        assert!(first.success, "{:?}", first.error);
        // no "google" provider registered, so the free tier falls back to the first healthy one
        assert_eq!(first.provider.as_deref(), Some("openai"));
        assert_eq!(first.model.as_deref(), Some("m1"));
        assert_eq!(first.text_or(""), "Hi there");
        assert!(first.cost > 0.0);
        let spent = orchestrator.cost_tracker().total_for("openai");

        let second = orchestrator.process(RequestFactory::hello_world()).await;
        assert!(second.success);
        assert!(second.is_cached());
        assert_eq!(second.provider.as_deref(), Some("cache"));
        assert_eq!(second.cost, 0.0);
        assert_eq!(second.text_or(""), "Hi there");
        assert!(second.response_time_ms <= first.response_time_ms.max(50));

        assert_eq!(chat_calls(&mock).await, 1);
        assert_eq!(orchestrator.cost_tracker().total_for("openai"), spent);
        assert_eq!(orchestrator.cache_stats().hits, 1);
        orchestrator.shutdown();
    }

    #[tokio::test]
    async fn test_tier_preference_picks_table_provider() {
        let openai = MockProvider::start().await;
        openai.healthy_openai().await;
        openai.openai_chat("from openai").await;

        let google = MockProvider::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .mount(&google.server)
            .await;
        google.gemini_generate("from google").await;

        let orchestrator = orchestrator(vec![
            text_models(openai.descriptor("openai", ProviderKind::OpenAi)),
            text_models(google.descriptor("google", ProviderKind::Google)),
        ])
        .await;

        let free = orchestrator
            .process(GenerationRequest::text("tier test").with_tier(Tier::Free))
            .await;
        assert_eq!(free.provider.as_deref(), Some("google"));
        assert_eq!(free.text_or(""), "from google");

        let premium = orchestrator
            .process(GenerationRequest::text("tier test 2").with_tier(Tier::Premium))
            .await;
        assert_eq!(premium.provider.as_deref(), Some("openai"));
        assert_eq!(premium.text_or(""), "from openai");
    }

    #[tokio::test]
    async fn test_all_image_providers_unhealthy() {
        let mock = MockProvider::start().await;
        mock.fail_all(500, json!({"error": "down"})).await;
        let orchestrator = orchestrator(vec![
            mock.descriptor("openai", ProviderKind::OpenAi)
                .with_models(Capability::Image, ["dall-e-3"]),
        ])
        .await;

        let envelope = orchestrator.process(RequestFactory::image("a red fox")).await;
        assert!(!envelope.success);
        assert!(
            envelope
                .error
                .as_deref()
                .unwrap()
                .contains("no healthy providers")
        );
        assert_eq!(envelope.cost, 0.0);
        assert_eq!(orchestrator.cost_report().total, 0.0);
    }

    #[tokio::test]
    async fn test_upstream_error_is_contained() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": {"message": "internal failure"}})),
            )
            .mount(&mock.server)
            .await;
        let orchestrator =
            orchestrator(vec![text_models(mock.descriptor("openai", ProviderKind::OpenAi))]).await;

        let envelope = orchestrator.process(RequestFactory::hello_world()).await;
        assert!(!envelope.success);
        assert!(!envelope.error.as_deref().unwrap_or_default().is_empty());
        assert_eq!(envelope.provider.as_deref(), Some("openai"));
        assert!(orchestrator.cache().is_empty());
        assert_eq!(orchestrator.cost_tracker().request_count("openai"), 0);
    }

    #[tokio::test]
    async fn test_concurrent_requests_accumulate_cost() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        mock.openai_chat("ok").await;
        let orchestrator =
            orchestrator(vec![text_models(mock.descriptor("openai", ProviderKind::OpenAi))]).await;

        let requests = (0..5)
            .map(|i| GenerationRequest::text(format!("prompt number {}", i)))
            .collect();
        let envelopes = orchestrator.process_all(requests).await;

        assert!(envelopes.iter().all(|e| e.success));
        let expected: f64 = envelopes.iter().map(|e| e.cost).sum();
        assert_eq!(orchestrator.cost_tracker().request_count("openai"), 5);
        assert!((orchestrator.cost_tracker().total() - expected).abs() < 1e-12);
        assert_eq!(orchestrator.cache().len(), 5);
    }

    #[tokio::test]
    async fn test_probe_failure_keeps_requests_away() {
        let mock = MockProvider::start().await;
        mock.openai_chat("never").await;
        let mut registry = ProviderRegistry::new();
        registry
            .register(text_models(mock.descriptor("openai", ProviderKind::OpenAi)))
            .unwrap();
        let orchestrator = Orchestrator::builder()
            .registry(registry)
            .probe(Arc::new(AlwaysDown))
            .health_config(quiet_health())
            .build()
            .unwrap();
        orchestrator.start().await;

        let envelope = orchestrator.process(RequestFactory::hello_world()).await;
        assert!(!envelope.success);
        assert_eq!(chat_calls(&mock).await, 0);
    }

    #[tokio::test]
    async fn test_built_from_config() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        mock.openai_chat("configured").await;

        let provider = ProviderConfig::new("openai", ProviderKind::OpenAi)
            .with_api_key(TEST_KEY)
            .with_base_url(format!("{}/v1", mock.uri()))
            .with_models(Capability::Text, ["m1"]);

        let mut config = Config::default();
        config.gateway.providers.push(provider);
        config.gateway.health = quiet_health();

        let orchestrator = Orchestrator::from_config(&config).unwrap();
        orchestrator.start().await;

        let envelope = orchestrator.process(GenerationRequest::text("hello")).await;
        assert!(envelope.success, "{:?}", envelope.error);
        assert_eq!(envelope.model.as_deref(), Some("m1"));
        assert_eq!(envelope.text_or(""), "configured");
    }
}
