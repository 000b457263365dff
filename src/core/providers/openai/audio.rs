//! Speech synthesis and transcription

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tracing::debug;

use crate::core::providers::base::ProviderCall;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{AudioData, ResponsePayload};

const DEFAULT_VOICE: &str = "alloy";
const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

pub(super) async fn speech(
    call: ProviderCall<'_>,
    text: &str,
    voice: Option<&str>,
) -> Result<ResponsePayload, ProviderError> {
    let voice = voice
        .or(call.provider.default_voice.as_deref())
        .unwrap_or(DEFAULT_VOICE);
    let body = call.with_options(json!({
        "model": call.model,
        "input": text,
        "voice": voice,
    }));

    let request = call.pool.post(call.provider, "/audio/speech").json(&body);
    let (bytes, content_type) = call.pool.send_bytes(call.kind(), request).await?;
    if bytes.is_empty() {
        return Err(ProviderError::response_parsing("openai", "Empty audio body"));
    }

    Ok(ResponsePayload::Voice {
        audio: AudioData::Base64 {
            data: STANDARD.encode(&bytes),
            mime_type: content_type.unwrap_or_else(|| DEFAULT_AUDIO_MIME.to_string()),
        },
    })
}

pub(super) async fn transcribe(
    call: ProviderCall<'_>,
    audio_url: &str,
    language: Option<&str>,
) -> Result<ResponsePayload, ProviderError> {
    debug!("Fetching audio reference for transcription");
    let fetch = call.pool.client().get(audio_url);
    let (audio, content_type) = call.pool.send_bytes(call.kind(), fetch).await?;

    let file_name = audio_url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && name.contains('.'))
        .unwrap_or("audio.mp3")
        .to_string();
    let file = Part::bytes(audio)
        .file_name(file_name)
        .mime_str(content_type.as_deref().unwrap_or(DEFAULT_AUDIO_MIME))
        .map_err(|e| ProviderError::invalid_request("openai", e.to_string()))?;

    let mut form = Form::new()
        .part("file", file)
        .text("model", call.model.to_string());
    if let Some(language) = language {
        form = form.text("language", language.to_string());
    }

    let request = call
        .pool
        .post(call.provider, "/audio/transcriptions")
        .multipart(form);
    let response = call.pool.send_json(call.kind(), request).await?;

    let text = response
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::response_parsing("openai", "Missing transcription text"))?;
    Ok(ResponsePayload::Transcript {
        text: text.to_string(),
    })
}
