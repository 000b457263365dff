//! OpenAI
//!
//! Chat completions, image generation, speech synthesis and transcription.

mod audio;
mod chat;
mod images;

use super::base::ProviderCall;
use super::unified_provider::ProviderError;
use crate::core::types::{RequestKind, ResponsePayload};

/// Dispatch a call to the OpenAI endpoint for its capability
pub async fn execute(call: ProviderCall<'_>) -> Result<ResponsePayload, ProviderError> {
    call.require_credential()?;
    match &call.request.kind {
        RequestKind::Text {
            prompt,
            system,
            max_tokens,
            temperature,
        } => chat::complete(call, prompt, system.as_deref(), *max_tokens, *temperature).await,
        RequestKind::Image { prompt, size } => images::generate(call, prompt, size.as_deref()).await,
        RequestKind::Voice { text, voice } => audio::speech(call, text, voice.as_deref()).await,
        RequestKind::Audio {
            audio_url,
            language,
        } => audio::transcribe(call, audio_url, language.as_deref()).await,
        RequestKind::Video { .. } => Err(call.not_supported()),
    }
}
