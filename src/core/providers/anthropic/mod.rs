//! Anthropic Messages API

use serde_json::{Value, json};

use super::base::ProviderCall;
use super::unified_provider::ProviderError;
use crate::core::types::{RequestKind, ResponsePayload, Usage};

/// Messages API requires an explicit output bound
const DEFAULT_MAX_TOKENS: u32 = 1024;

pub async fn execute(call: ProviderCall<'_>) -> Result<ResponsePayload, ProviderError> {
    call.require_credential()?;
    let RequestKind::Text {
        prompt,
        system,
        max_tokens,
        temperature,
    } = &call.request.kind
    else {
        return Err(call.not_supported());
    };

    let body = call.with_options(build_body(
        call.model,
        prompt,
        system.as_deref(),
        *max_tokens,
        *temperature,
    ));
    let request = call.pool.post(call.provider, "/v1/messages").json(&body);
    let response = call.pool.send_json(call.kind(), request).await?;
    parse_response(&response)
}

fn build_body(
    model: &str,
    prompt: &str,
    system: Option<&str>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Value {
    let mut body = json!({
        "model": model,
        "max_tokens": max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        "messages": [{"role": "user", "content": prompt}],
    });
    if let Some(system) = system {
        body["system"] = json!(system);
    }
    if let Some(temperature) = temperature {
        body["temperature"] = json!(temperature);
    }
    body
}

fn parse_response(response: &Value) -> Result<ResponsePayload, ProviderError> {
    let blocks = response
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::response_parsing("anthropic", "Missing content array"))?;

    let text: String = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();

    let usage = response
        .get("usage")
        .map(|usage| Usage::from_fields(usage, "input_tokens", "output_tokens"));

    Ok(ResponsePayload::Text { text, usage })
}
