//! Gemini request payload types for image and speech generation.

use serde::Serialize;

/// Gemini content container.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

impl Content {
    pub fn user_text(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text }],
        }
    }
}

/// `streamGenerateContent` body shared by both modalities.
#[derive(Debug, Serialize)]
pub struct MediaRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerationConfig {
    Image(ImageGenerationConfig),
    Speech(SpeechGenerationConfig),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    pub response_modalities: Vec<String>,
}

/// Speech config keys are sent in snake_case, which the API accepts alongside camelCase.
#[derive(Debug, Serialize)]
pub struct SpeechGenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
    pub temperature: f32,
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}
