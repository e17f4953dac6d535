//! Bengali on-screen keyboard layout and the word being typed with it.

pub const VOWELS: [&str; 11] = ["অ", "আ", "ই", "ঈ", "উ", "ঊ", "ঋ", "এ", "ঐ", "ও", "ঔ"];

pub const CONSONANTS: [&str; 38] = [
    "ক", "খ", "গ", "ঘ", "ঙ", "চ", "ছ", "জ", "ঝ", "ঞ",
    "ট", "ঠ", "ড", "ঢ", "ণ", "ত", "থ", "দ", "ধ", "ন",
    "প", "ফ", "ব", "ভ", "ম", "য", "র", "ল", "শ", "ষ",
    "স", "হ", "ড়", "ঢ়", "য়", "ৎ", "ক্ষ", "জ্ঞ",
];

pub const VOWEL_SIGNS: [&str; 12] = ["া", "ি", "ী", "ু", "ূ", "ৃ", "ে", "ৈ", "ো", "ৌ", "ঁ", "্"];

pub const BACKSPACE_LABEL: &str = "⌫";
pub const SPACE_LABEL: &str = "স্পেস";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(&'static str),
    Backspace,
    Space,
}

impl Key {
    pub fn label(self) -> &'static str {
        match self {
            Key::Char(label) => label,
            Key::Backspace => BACKSPACE_LABEL,
            Key::Space => SPACE_LABEL,
        }
    }

    /// Looks a key up by the label printed on it.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            BACKSPACE_LABEL => Some(Key::Backspace),
            SPACE_LABEL => Some(Key::Space),
            _ => VOWELS
                .iter()
                .chain(CONSONANTS.iter())
                .chain(VOWEL_SIGNS.iter())
                .find(|key| **key == label)
                .map(|key| Key::Char(*key)),
        }
    }
}

/// Keyboard rows, top to bottom.
pub fn rows() -> Vec<Vec<Key>> {
    vec![
        VOWELS.iter().map(|k| Key::Char(*k)).collect(),
        CONSONANTS.iter().map(|k| Key::Char(*k)).collect(),
        VOWEL_SIGNS.iter().map(|k| Key::Char(*k)).collect(),
        vec![Key::Backspace, Key::Space],
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBuffer {
    text: String,
}

impl WordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys append their label verbatim; vowel signs are not reordered.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Char(label) => self.text.push_str(label),
            Key::Space => self.text.push(' '),
            Key::Backspace => {
                self.text.pop();
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
