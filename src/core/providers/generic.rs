//! Generic HTTP providers
//!
//! Providers without a dedicated module get a best-effort JSON POST to
//! their base URL. The result is read from whichever common field the
//! upstream happens to use. Callers turn any failure here into a degraded
//! placeholder via [`placeholder`].

use serde_json::{Value, json};

use super::base::ProviderCall;
use super::unified_provider::ProviderError;
use crate::core::types::{AudioData, Capability, RequestKind, ResponsePayload};

const TEXT_FIELDS: &[&str] = &[
    "/text",
    "/output",
    "/content",
    "/result",
    "/response",
    "/message",
    "/choices/0/text",
    "/choices/0/message/content",
    "/data/text",
];
const URL_FIELDS: &[&str] = &[
    "/url",
    "/image_url",
    "/audio_url",
    "/video_url",
    "/output",
    "/data/0/url",
    "/data/url",
];
const ID_FIELDS: &[&str] = &["/id", "/job_id", "/task_id", "/generation_id", "/data/id"];

pub async fn execute(call: ProviderCall<'_>) -> Result<ResponsePayload, ProviderError> {
    let body = call.with_options(build_body(call.model, &call.request.kind));
    let request = call.pool.post(call.provider, "").json(&body);
    let response = call.pool.send_json(call.kind(), request).await?;
    extract(call.request.capability(), &response)
}

fn build_body(model: &str, kind: &RequestKind) -> Value {
    let mut body = json!({
        "model": model,
        "prompt": kind.prompt(),
        "type": kind.capability().as_str(),
    });
    match kind {
        RequestKind::Text {
            system, max_tokens, ..
        } => {
            if let Some(system) = system {
                body["system"] = json!(system);
            }
            if let Some(max_tokens) = max_tokens {
                body["max_tokens"] = json!(max_tokens);
            }
        }
        RequestKind::Image { size: Some(size), .. } => body["size"] = json!(size),
        RequestKind::Voice { voice: Some(voice), .. } => body["voice"] = json!(voice),
        RequestKind::Video {
            duration_secs: Some(duration),
            ..
        } => body["duration"] = json!(duration),
        RequestKind::Audio {
            language: Some(language),
            ..
        } => body["language"] = json!(language),
        _ => {}
    }
    body
}

fn first_str<'a>(response: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .filter_map(|pointer| response.pointer(pointer))
        .find_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Read a capability-shaped payload out of an arbitrary JSON response
pub fn extract(capability: Capability, response: &Value) -> Result<ResponsePayload, ProviderError> {
    let missing =
        || ProviderError::response_parsing("generic", format!("No {} result field", capability));

    match capability {
        Capability::Text => first_str(response, TEXT_FIELDS)
            .map(|text| ResponsePayload::Text {
                text: text.to_string(),
                usage: None,
            })
            .ok_or_else(missing),
        Capability::Audio => first_str(response, &["/transcript", "/text", "/output"])
            .map(|text| ResponsePayload::Transcript {
                text: text.to_string(),
            })
            .ok_or_else(missing),
        Capability::Image => first_str(response, URL_FIELDS)
            .map(|url| ResponsePayload::Image {
                url: url.to_string(),
            })
            .ok_or_else(missing),
        Capability::Voice => {
            if let Some(url) = first_str(response, URL_FIELDS) {
                return Ok(ResponsePayload::Voice {
                    audio: AudioData::Url {
                        url: url.to_string(),
                    },
                });
            }
            first_str(response, &["/audio", "/audio_base64"])
                .map(|data| ResponsePayload::Voice {
                    audio: AudioData::Base64 {
                        data: data.to_string(),
                        mime_type: first_str(response, &["/mime_type"])
                            .unwrap_or("audio/mpeg")
                            .to_string(),
                    },
                })
                .ok_or_else(missing)
        }
        Capability::Video => {
            let job_id = first_str(response, ID_FIELDS).ok_or_else(missing)?;
            Ok(ResponsePayload::Video {
                job_id: job_id.to_string(),
                status: first_str(response, &["/status", "/state"])
                    .unwrap_or("submitted")
                    .to_string(),
                url: first_str(response, URL_FIELDS).map(str::to_string),
            })
        }
    }
}

/// Non-authoritative stand-in returned when a generic provider fails
pub fn placeholder(provider: &str, capability: Capability) -> ResponsePayload {
    let notice = format!(
        "[degraded] {} output from {} is unavailable right now",
        capability, provider
    );
    match capability {
        Capability::Text => ResponsePayload::Text {
            text: notice,
            usage: None,
        },
        Capability::Audio => ResponsePayload::Transcript { text: notice },
        Capability::Image => ResponsePayload::Image { url: String::new() },
        Capability::Voice => ResponsePayload::Voice {
            audio: AudioData::Url { url: String::new() },
        },
        Capability::Video => ResponsePayload::Video {
            job_id: format!("degraded-{}", crate::utils::generate_request_id()),
            status: "unavailable".to_string(),
            url: None,
        },
    }
}
