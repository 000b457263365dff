//! Chat completions

use serde_json::{Value, json};

use crate::core::providers::base::ProviderCall;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{ResponsePayload, Usage};

pub(super) fn build_body(
    model: &str,
    prompt: &str,
    system: Option<&str>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Value {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(json!({"role": "system", "content": system}));
    }
    messages.push(json!({"role": "user", "content": prompt}));

    let mut body = json!({
        "model": model,
        "messages": messages,
    });
    if let Some(max_tokens) = max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    if let Some(temperature) = temperature {
        body["temperature"] = json!(temperature);
    }
    body
}

pub(super) fn parse_response(response: &Value) -> Result<ResponsePayload, ProviderError> {
    let text = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProviderError::response_parsing("openai", "Missing choices[0].message.content")
        })?;

    let usage = response
        .get("usage")
        .map(|usage| Usage::from_fields(usage, "prompt_tokens", "completion_tokens"));

    Ok(ResponsePayload::Text {
        text: text.to_string(),
        usage,
    })
}

pub(super) async fn complete(
    call: ProviderCall<'_>,
    prompt: &str,
    system: Option<&str>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Result<ResponsePayload, ProviderError> {
    let body = call.with_options(build_body(call.model, prompt, system, max_tokens, temperature));
    let request = call.pool.post(call.provider, "/chat/completions").json(&body);
    let response = call.pool.send_json(call.kind(), request).await?;
    parse_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_usage_does_not_overflow() {
        let payload = parse_response(&json!({
            "choices": [{"message": {"content": "x"}}],
            "usage": {"prompt_tokens": 4294967295u64, "completion_tokens": 1}
        }))
        .unwrap();
        let ResponsePayload::Text { usage, .. } = payload else {
            panic!("expected text payload");
        };
        let usage = usage.unwrap();
        assert_eq!(usage.prompt_tokens, u32::MAX);
        assert_eq!(usage.total_tokens, u32::MAX);

        let payload = parse_response(&json!({
            "choices": [{"message": {"content": "x"}}],
            "usage": {"prompt_tokens": 4294967296u64, "completion_tokens": 0}
        }))
        .unwrap();
        let ResponsePayload::Text { usage, .. } = payload else {
            panic!("expected text payload");
        };
        assert_eq!(usage.unwrap().prompt_tokens, u32::MAX);
    }

    #[test]
    fn test_body_includes_system_message() {
        let body = build_body("gpt-4o-mini", "Hello", Some("Be brief"), Some(64), None);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert_eq!(body["max_tokens"], 64);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_with_usage() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let payload = parse_response(&response).unwrap();
        assert_eq!(
            payload,
            ResponsePayload::Text {
                text: "Hi there".to_string(),
                usage: Some(Usage::new(10, 5)),
            }
        );
    }

    #[test]
    fn test_parse_response_missing_content() {
        let err = parse_response(&json!({"choices": []})).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseParsing { .. }));
    }
}
