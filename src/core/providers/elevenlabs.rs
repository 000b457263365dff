//! ElevenLabs text-to-speech

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;

use super::base::ProviderCall;
use super::unified_provider::ProviderError;
use crate::core::types::{AudioData, RequestKind, ResponsePayload};

/// Stock "Rachel" voice
const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

pub async fn execute(call: ProviderCall<'_>) -> Result<ResponsePayload, ProviderError> {
    call.require_credential()?;
    let RequestKind::Voice { text, voice } = &call.request.kind else {
        return Err(call.not_supported());
    };

    let voice_id = voice
        .as_deref()
        .or(call.provider.default_voice.as_deref())
        .unwrap_or(DEFAULT_VOICE_ID);
    let body = call.with_options(json!({
        "text": text,
        "model_id": call.model,
    }));

    let request = call
        .pool
        .post(call.provider, &format!("/v1/text-to-speech/{}", voice_id))
        .header(reqwest::header::ACCEPT, "audio/mpeg")
        .json(&body);
    let (bytes, content_type) = call.pool.send_bytes(call.kind(), request).await?;
    if bytes.is_empty() {
        return Err(ProviderError::response_parsing("elevenlabs", "Empty audio body"));
    }

    Ok(ResponsePayload::Voice {
        audio: AudioData::Base64 {
            data: STANDARD.encode(&bytes),
            mime_type: content_type.unwrap_or_else(|| "audio/mpeg".to_string()),
        },
    })
}
