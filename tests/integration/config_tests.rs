//! Configuration loading tests

#[cfg(test)]
mod tests {
    use tokio_test::{assert_err, assert_ok, block_on};
    use std::io::Write;
    use universal_ai::config::{CacheKeyMode, RoutingStrategy};
    use universal_ai::{Capability, Config, GatewayError, ProviderKind, ProviderRegistry};

    const EXAMPLE: &str = include_str!("../../config/router.yaml.example");

    #[test]
    fn test_example_config_is_valid() {
        let config = assert_ok!(Config::from_yaml(EXAMPLE));

        let names: Vec<&str> = config.providers().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["openai", "anthropic", "google", "elevenlabs", "runway", "stability"]
        );
        assert_eq!(config.router().strategy, RoutingStrategy::TierPreference);
        assert_eq!(config.cache().key_mode, CacheKeyMode::Prefix);
        assert_eq!(config.cache().prefix_chars, 100);
        assert_eq!(config.providers()[4].pricing.per_video, Some(0.75));
    }

    #[test]
    fn test_registry_skips_disabled_providers() {
        let config = assert_ok!(Config::from_yaml(EXAMPLE));
        let registry = assert_ok!(ProviderRegistry::from_configs(config.providers()));

        assert_eq!(registry.len(), 5);
        assert!(!registry.contains("stability"));
        let runway = registry.get("runway").unwrap();
        assert_eq!(runway.kind, ProviderKind::Generic);
        assert!(runway.supports(Capability::Video));
        assert_eq!(
            registry.get("google").unwrap().base_url,
            "https://generativelanguage.googleapis.com"
        );
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
providers:
  - name: local
    provider_type: generic
    api_key: local-key
    base_url: http://localhost:8080/generate
    models:
      text: [tiny]
router:
  strategy: least_cost
  request_timeout_secs: 5
"#
        )
        .unwrap();

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.router().strategy, RoutingStrategy::LeastCost);
        assert_eq!(config.router().request_timeout_secs, 5);
        assert_eq!(config.providers()[0].resolve_api_key().as_deref(), Some("local-key"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(block_on(Config::from_file(dir.path().join("absent.yaml"))));
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_preference_target_is_rejected() {
        let yaml = r#"
providers:
  - name: openai
    provider_type: openai
    models:
      text: [gpt-4o-mini]
router:
  preferences:
    text:
      free: nowhere
"#;
        let err = assert_err!(Config::from_yaml(yaml));
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_provider_kind_must_support_declared_models() {
        let yaml = r#"
providers:
  - name: claude
    provider_type: anthropic
    models:
      video: [claude-video]
  - name: runway
    provider_type: generic
    base_url: https://video.example/generate
    models:
      video: [gen-3]
router:
  strategy: registry_order
"#;
        let err = assert_err!(Config::from_yaml(yaml));
        assert!(err.is_configuration());
        assert!(err.to_string().contains("claude"));
    }

    #[test]
    fn test_environment_variables() {
        let vars = [
            ("UAI_PROVIDER_OPENAI_TYPE", "openai"),
            ("UAI_PROVIDER_OPENAI_API_KEY", "sk-env"),
            ("UAI_PROVIDER_OPENAI_TEXT_MODELS", "gpt-4o-mini, gpt-4o"),
            ("UAI_CACHE_TTL_SECS", "60"),
            ("UAI_ROUTER_STRATEGY", "registry_order"),
            ("PATH", "/usr/bin"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let config = assert_ok!(Config::from_vars(vars));
        assert_eq!(config.providers().len(), 1);
        assert_eq!(
            config.providers()[0].models[&Capability::Text],
            ["gpt-4o-mini", "gpt-4o"]
        );
        assert_eq!(config.cache().ttl_secs, 60);
        assert_eq!(config.router().strategy, RoutingStrategy::RegistryOrder);
    }
}
