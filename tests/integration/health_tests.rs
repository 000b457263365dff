//! Health monitor tests against HTTP probes

#[cfg(test)]
mod tests {
    use crate::common::fixtures::quiet_health;
    use crate::common::providers::{MockProvider, text_models};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use universal_ai::core::health::{HealthStatus, HttpHealthProbe};
    use universal_ai::core::providers::base::ConnectionPool;
    use universal_ai::{HealthMonitor, ProviderDescriptor, ProviderKind, ProviderRegistry};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn monitor(providers: Vec<ProviderDescriptor>) -> HealthMonitor {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.register(provider).unwrap();
        }
        let probe = HttpHealthProbe::new(ConnectionPool::new().unwrap());
        HealthMonitor::new(Arc::new(registry), Arc::new(probe), &quiet_health())
    }

    #[tokio::test]
    async fn test_reachable_provider_becomes_healthy() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        let monitor = monitor(vec![text_models(
            mock.descriptor("openai", ProviderKind::OpenAi),
        )]);

        assert!(!monitor.snapshot()["openai"]);
        let snapshot = monitor.check_all().await;
        assert!(snapshot["openai"]);

        let health = monitor.provider_health("openai").unwrap();
        assert_eq!(health.consecutive_failures, 0);
        assert!(health.last_checked.is_some());
        assert!(health.last_latency_ms.is_some());
    }

    #[tokio::test]
    async fn test_server_error_marks_unhealthy() {
        let mock = MockProvider::start().await;
        mock.fail_all(500, json!({"error": "boom"})).await;
        let monitor = monitor(vec![
            mock.descriptor("anthropic", ProviderKind::Anthropic)
                .with_models(universal_ai::Capability::Text, ["claude"]),
        ]);

        assert!(!monitor.check_health("anthropic").await);
        assert!(!monitor.check_health("anthropic").await);

        let health = monitor.provider_health("anthropic").unwrap();
        assert_eq!(health.consecutive_failures, 2);
        assert!(health.last_error.unwrap().contains("500"));
        assert_eq!(monitor.system_health().status, HealthStatus::Down);
    }

    #[tokio::test]
    async fn test_generic_endpoint_accepts_client_errors() {
        let mock = MockProvider::start().await;
        Mock::given(method("GET"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&mock.server)
            .await;
        let monitor = monitor(vec![
            mock.descriptor("runway", ProviderKind::Generic)
                .with_models(universal_ai::Capability::Video, ["gen-3"]),
        ]);

        assert!(monitor.check_health("runway").await);
    }

    #[tokio::test]
    async fn test_missing_credential_skips_probe() {
        let mock = MockProvider::start().await;
        mock.healthy_openai().await;
        let provider = ProviderDescriptor::new("openai", ProviderKind::OpenAi)
            .with_base_url(format!("{}/v1", mock.uri()))
            .with_models(universal_ai::Capability::Text, ["m1"]);
        let monitor = monitor(vec![provider]);

        assert!(!monitor.check_health("openai").await);
        assert_eq!(
            monitor.provider_health("openai").unwrap().last_error.as_deref(),
            Some("missing credential")
        );
        assert!(mock.server.received_requests().await.unwrap().is_empty());
        assert!(monitor.set_health("openai", true).is_err());
    }

    #[tokio::test]
    async fn test_slow_probe_times_out() {
        let mock = MockProvider::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2_500)))
            .mount(&mock.server)
            .await;
        let mut config = quiet_health();
        config.probe_timeout_secs = 1;

        let mut registry = ProviderRegistry::new();
        registry
            .register(text_models(mock.descriptor("openai", ProviderKind::OpenAi)))
            .unwrap();
        let probe = HttpHealthProbe::new(ConnectionPool::new().unwrap());
        let monitor = HealthMonitor::new(Arc::new(registry), Arc::new(probe), &config);

        assert!(!monitor.check_health("openai").await);
        assert_eq!(
            monitor.provider_health("openai").unwrap().last_error.as_deref(),
            Some("Health check timeout")
        );
    }

    #[tokio::test]
    async fn test_mixed_results_are_degraded() {
        let up = MockProvider::start().await;
        up.healthy_openai().await;
        let down = MockProvider::start().await;
        down.fail_all(503, json!({})).await;

        let monitor = monitor(vec![
            text_models(up.descriptor("openai", ProviderKind::OpenAi)),
            text_models(down.descriptor("backup", ProviderKind::OpenAi)),
        ]);
        monitor.check_all().await;

        let system = monitor.system_health();
        assert_eq!(system.total_providers, 2);
        assert_eq!(system.healthy_providers, 1);
        assert_eq!(system.status, HealthStatus::Degraded);
    }
}
