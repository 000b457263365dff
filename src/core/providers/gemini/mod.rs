//! Google Gemini `generateContent`

use serde_json::{Value, json};

use super::base::ProviderCall;
use super::unified_provider::ProviderError;
use crate::core::types::{RequestKind, ResponsePayload, Usage};

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

    let body = call.with_options(build_body(prompt, system.as_deref(), *max_tokens, *temperature));
    let path = format!("/v1beta/models/{}:generateContent", call.model);
    let request = call.pool.post(call.provider, &path).json(&body);
    let response = call.pool.send_json(call.kind(), request).await?;
    parse_response(&response)
}

fn build_body(
    prompt: &str,
    system: Option<&str>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Value {
    let mut body = json!({
        "contents": [{"role": "user", "parts": [{"text": prompt}]}],
    });
    if let Some(system) = system {
        body["systemInstruction"] = json!({"parts": [{"text": system}]});
    }

    let mut generation_config = serde_json::Map::new();
    if let Some(max_tokens) = max_tokens {
        generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
    }
    if let Some(temperature) = temperature {
        generation_config.insert("temperature".to_string(), json!(temperature));
    }
    if !generation_config.is_empty() {
        body["generationConfig"] = Value::Object(generation_config);
    }
    body
}

fn parse_response(response: &Value) -> Result<ResponsePayload, ProviderError> {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ProviderError::response_parsing("google", "Missing candidates[0].content.parts")
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    let usage = response
        .get("usageMetadata")
        .map(|usage| Usage::from_fields(usage, "promptTokenCount", "candidatesTokenCount"));

    Ok(ResponsePayload::Text { text, usage })
}
