use super::client::GeminiHttpClient;
use super::stream;
use super::types::{
    Content, GenerationConfig, ImageGenerationConfig, MediaRequest, PrebuiltVoiceConfig,
    SpeechConfig, SpeechGenerationConfig, VoiceConfig,
};
use crate::ai::MediaGenerationService;
use crate::models::{
    Config, GenerationRequest, Modality, RawPayload, DEFAULT_IMAGE_MODEL, DEFAULT_TTS_MODEL,
    DEFAULT_TTS_VOICE,
};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Generates images and speech through Gemini's streaming endpoint.
pub struct GeminiMediaClient {
    http: GeminiHttpClient,
    image_model: String,
    tts_model: String,
    voice: String,
}

impl GeminiMediaClient {
    pub fn new() -> Self {
        Self::new_with_client(reqwest::Client::new(), Duration::from_secs(120))
    }

    pub fn new_with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(timeout, client),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_TTS_VOICE.to_string(),
        }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new_with_client(client, config.request_timeout)
            .with_base_url(config.gemini_base_url.clone())
            .with_image_model(config.image_model.clone())
            .with_tts_model(config.tts_model.clone())
            .with_voice(config.tts_voice.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_image_model(mut self, model: String) -> Self {
        self.image_model = model;
        self
    }

    pub fn with_tts_model(mut self, model: String) -> Self {
        self.tts_model = model;
        self
    }

    pub fn with_voice(mut self, voice: String) -> Self {
        self.voice = voice;
        self
    }

    fn model_for(&self, modality: Modality) -> &str {
        match modality {
            Modality::Image => &self.image_model,
            Modality::Audio => &self.tts_model,
        }
    }

    fn build_request(&self, request: &GenerationRequest) -> MediaRequest {
        match request.modality {
            Modality::Image => MediaRequest {
                contents: vec![Content::user_text(prompts::render(
                    prompts::IMAGE,
                    &[("text", request.prompt_text.as_str())],
                ))],
                generation_config: GenerationConfig::Image(ImageGenerationConfig {
                    response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
                }),
            },
            Modality::Audio => MediaRequest {
                contents: vec![Content::user_text(prompts::render(
                    prompts::SPEECH,
                    &[("text", request.prompt_text.as_str())],
                ))],
                generation_config: GenerationConfig::Speech(SpeechGenerationConfig {
                    response_modalities: vec!["audio".to_string()],
                    temperature: 1.0,
                    speech_config: SpeechConfig {
                        voice_config: VoiceConfig {
                            prebuilt_voice_config: PrebuiltVoiceConfig {
                                voice_name: self.voice.clone(),
                            },
                        },
                    },
                }),
            },
        }
    }
}

impl Default for GeminiMediaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaGenerationService for GeminiMediaClient {
    async fn fetch_payload(&self, request: &GenerationRequest) -> Result<RawPayload> {
        let model = self.model_for(request.modality);
        tracing::debug!(
            "Requesting {} from Gemini (model: {})",
            request.modality,
            model
        );

        let body = self.build_request(request);
        let response = self
            .http
            .stream_generate_content(model, &request.api_key, &body)
            .await?;

        let payload = stream::read_body(response.bytes_stream(), request.modality)
            .await?
            .ok_or(Error::MissingPayload(request.modality))?;

        tracing::debug!(
            "Gemini returned {} payload with mime_type: {}",
            request.modality,
            payload.mime_type
        );
        Ok(payload)
    }
}
