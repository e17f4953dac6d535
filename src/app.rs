//! Application orchestration for image and speech requests.
//!
//! Every user action makes one best-effort Gemini request. Whatever goes wrong
//! (HTTP status, missing inline data, undecodable payload) degrades to a local
//! result: a placeholder image or locally synthesized speech, together with a
//! status message for the learner. Nothing here returns an error to the caller.

use crate::ai::{GeminiMediaClient, MediaGenerationService};
use crate::audio::{AudioPlayer, CommandPlayer};
use crate::image::{PlaceholderRenderer, PlaceholderService};
use crate::models::{Config, GenerationRequest, Modality};
use crate::resource::{MediaOrigin, MediaResource};
use crate::settings::{FileSettingsStore, Settings, SettingsStore};
use crate::speech::{EspeakSpeech, SpeechFallback};
use crate::status::StatusMessage;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// What a user action produced: media to show or play, and/or a status line.
#[derive(Debug, Clone)]
pub struct MediaOutcome {
    pub resource: Option<MediaResource>,
    pub status: Option<StatusMessage>,
}

impl MediaOutcome {
    fn media(resource: MediaResource) -> Self {
        Self {
            resource: Some(resource),
            status: None,
        }
    }

    fn status(status: StatusMessage) -> Self {
        Self {
            resource: None,
            status: Some(status),
        }
    }
}

/// Coordinates Gemini generation with the local fallbacks.
pub struct App {
    media: Box<dyn MediaGenerationService>,
    placeholder: Box<dyn PlaceholderService>,
    speech: Box<dyn SpeechFallback>,
    player: Box<dyn AudioPlayer>,
    settings: Box<dyn SettingsStore>,
    default_api_key: Option<String>,
    scratch_dir: PathBuf,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub media: Box<dyn MediaGenerationService>,
    pub placeholder: Box<dyn PlaceholderService>,
    pub speech: Box<dyn SpeechFallback>,
    pub player: Box<dyn AudioPlayer>,
    pub settings: Box<dyn SettingsStore>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// `default_api_key` is used when the settings hold no key; `scratch_dir`
    /// receives short-lived playback files.
    pub fn with_services(
        services: AppServices,
        default_api_key: Option<String>,
        scratch_dir: PathBuf,
    ) -> Self {
        Self {
            media: services.media,
            placeholder: services.placeholder,
            speech: services.speech,
            player: services.player,
            settings: services.settings,
            default_api_key,
            scratch_dir,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new(config: &Config) -> Self {
        info!("Image model: {}", config.image_model);
        info!("Speech model: {} (voice: {})", config.tts_model, config.tts_voice);

        Self::with_services(
            AppServices {
                media: Box::new(GeminiMediaClient::from_config(config, reqwest::Client::new())),
                placeholder: Box::new(PlaceholderRenderer::from_font_path(
                    config.placeholder_font.as_deref(),
                )),
                speech: Box::new(EspeakSpeech::new(config.espeak_bin.clone())),
                player: Box::new(CommandPlayer::new(config.audio_player.clone())),
                settings: Box::new(FileSettingsStore::new(&config.settings_path)),
            },
            config.gemini_api_key.clone(),
            std::env::temp_dir(),
        )
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    fn api_key(&self, settings: &Settings) -> Option<String> {
        settings
            .api_key()
            .map(str::to_string)
            .or_else(|| self.default_api_key.clone())
    }

    /// One request, with every failure turned into the modality's fallback.
    pub async fn fetch_media(&self, request: &GenerationRequest) -> MediaOutcome {
        let settings = self.settings.load();

        match self.fetch_remote(request).await {
            Ok(resource) => {
                info!(
                    "Received {} from Gemini ({} bytes, {})",
                    request.modality,
                    resource.bytes.len(),
                    resource.mime_type
                );
                MediaOutcome::media(resource)
            }
            Err(e) => {
                warn!("Gemini {} request failed: {}", request.modality, e);
                match request.modality {
                    Modality::Image => {
                        self.placeholder_outcome(&request.prompt_text, &settings)
                            .await
                    }
                    Modality::Audio => self.fallback_speech(&request.prompt_text).await,
                }
            }
        }
    }

    async fn fetch_remote(&self, request: &GenerationRequest) -> Result<MediaResource> {
        let payload = self.media.fetch_payload(request).await?;
        MediaResource::from_payload(&payload, request.modality)
    }

    async fn placeholder_outcome(&self, text: &str, settings: &Settings) -> MediaOutcome {
        match self.placeholder.render(text, settings.primary_color()).await {
            Ok(png) => {
                info!("Rendered placeholder image ({} bytes)", png.len());
                MediaOutcome {
                    resource: Some(MediaResource::new(png, "image/png", MediaOrigin::Placeholder)),
                    status: Some(StatusMessage::ImageFallback),
                }
            }
            Err(e) => {
                error!("Failed to render placeholder: {}", e);
                MediaOutcome::status(StatusMessage::ImageFallback)
            }
        }
    }

    async fn fallback_speech(&self, text: &str) -> MediaOutcome {
        match self.speech.synthesize(text).await {
            Ok(resource) => MediaOutcome::media(resource),
            Err(Error::SpeechUnavailable(reason)) => {
                error!("No local speech engine: {}", reason);
                MediaOutcome::status(StatusMessage::SpeechUnsupported)
            }
            Err(e) => {
                error!("Local speech synthesis failed: {}", e);
                MediaOutcome::status(StatusMessage::SpeechFailed)
            }
        }
    }

    /// Generates an image for the typed word.
    pub async fn generate_image(&self, text: &str) -> MediaOutcome {
        let text = text.trim();
        if text.is_empty() {
            return MediaOutcome::status(StatusMessage::EnterWord);
        }

        let settings = self.settings.load();
        let Some(api_key) = self.api_key(&settings) else {
            warn!("No Gemini API key configured");
            return MediaOutcome::status(StatusMessage::ApiKeyRequired);
        };

        info!("Generating image for {:?}", text);
        self.fetch_media(&GenerationRequest::new(text, Modality::Image, api_key))
            .await
    }

    /// Produces speech for the typed word. Without an API key the local
    /// engine is used directly.
    pub async fn speak(&self, text: &str) -> MediaOutcome {
        let text = text.trim();
        if text.is_empty() {
            return MediaOutcome::status(StatusMessage::EnterWordFirst);
        }

        let settings = self.settings.load();
        match self.api_key(&settings) {
            Some(api_key) => {
                info!("Generating speech for {:?}", text);
                self.fetch_media(&GenerationRequest::new(text, Modality::Audio, api_key))
                    .await
            }
            None => {
                info!("No Gemini API key, speaking {:?} locally", text);
                self.fallback_speech(text).await
            }
        }
    }

    /// Plays an audio resource and releases its playback file afterwards.
    pub async fn play(&self, resource: &MediaResource) -> Result<()> {
        let handle = resource.persist(&self.scratch_dir)?;
        let played = self.player.play(handle.path()).await;

        let path = handle.path().to_path_buf();
        if let Err(e) = handle.revoke() {
            warn!("Failed to release playback file {}: {}", path.display(), e);
        }

        played
    }
}
