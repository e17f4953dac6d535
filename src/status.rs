//! User-facing status lines, in Bengali.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    EnterWord,
    GeneratingImage,
    ApiKeyRequired,
    ImageFallback,
    EnterWordFirst,
    Synthesizing,
    SpeechFailed,
    SpeechUnsupported,
    Reading,
    PlaybackFailed,
}

impl StatusMessage {
    pub fn text(self) -> &'static str {
        match self {
            StatusMessage::EnterWord => "শব্দ লিখুন, তারপর চলো বাটন চাপুন।",
            StatusMessage::GeneratingImage => "ছবি তৈরি হচ্ছে… অনুগ্রহ করে অপেক্ষা করুন।",
            StatusMessage::ApiKeyRequired => "Gemini API কী প্রয়োজন — সেটিংস থেকে যোগ করুন।",
            StatusMessage::ImageFallback => {
                "ত্রুটি: আসল ছবি আনা যায়নি — প্লেসহোল্ডার দেখানো হলো।"
            }
            StatusMessage::EnterWordFirst => "প্রথমে শব্দ লিখুন।",
            StatusMessage::Synthesizing => "শব্দকে বক্তব্যে রূপান্তর হচ্ছে…",
            StatusMessage::SpeechFailed => "ত্রুটি: বক্তব্য তৈরি করা যায়নি।",
            StatusMessage::SpeechUnsupported => "আপনার ডিভাইসে বক্তব্য সমর্থিত নয়।",
            StatusMessage::Reading => "পাঠ করা হচ্ছে…",
            StatusMessage::PlaybackFailed => "বক্তব্য চালু করা যায়নি।",
        }
    }

    /// Whether the message reports a failure rather than progress or a prompt.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            StatusMessage::ImageFallback
                | StatusMessage::SpeechFailed
                | StatusMessage::SpeechUnsupported
                | StatusMessage::PlaybackFailed
        )
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
