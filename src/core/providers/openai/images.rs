//! Image generation

use serde_json::{Value, json};

use crate::core::providers::base::ProviderCall;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::ResponsePayload;

const DEFAULT_SIZE: &str = "1024x1024";

pub(super) async fn generate(
    call: ProviderCall<'_>,
    prompt: &str,
    size: Option<&str>,
) -> Result<ResponsePayload, ProviderError> {
    let body = call.with_options(json!({
        "model": call.model,
        "prompt": prompt,
        "n": 1,
        "size": size.unwrap_or(DEFAULT_SIZE),
    }));
    let request = call.pool.post(call.provider, "/images/generations").json(&body);
    let response = call.pool.send_json(call.kind(), request).await?;
    parse_response(&response)
}

/// First image of the response, as a URL or an inline data URL
fn parse_response(response: &Value) -> Result<ResponsePayload, ProviderError> {
    let image = response
        .pointer("/data/0")
        .ok_or_else(|| ProviderError::response_parsing("openai", "Missing data[0]"))?;

    if let Some(url) = image.get("url").and_then(Value::as_str) {
        return Ok(ResponsePayload::Image {
            url: url.to_string(),
        });
    }
    if let Some(b64) = image.get("b64_json").and_then(Value::as_str) {
        return Ok(ResponsePayload::Image {
            url: format!("data:image/png;base64,{}", b64),
        });
    }
    Err(ProviderError::response_parsing(
        "openai",
        "Image result has neither url nor b64_json",
    ))
}
