//! External labeled-key lookup for HMAC preset keys.
//!
//! The host owns the store; this crate only reads from it. Keys are fixed
//! at 16 bytes.

use crate::crypto::PRESET_KEY_LEN;

pub trait KeyPresetStore {
    fn key_num(&self) -> usize;
    fn key_label(&self, index: usize) -> Option<&str>;
    fn key(&self, index: usize) -> Option<[u8; PRESET_KEY_LEN]>;
}

/// Simple in-memory store, useful for hosts without their own backend and
/// for tests.
#[derive(Debug, Default)]
pub struct StaticPresets {
    entries: Vec<(String, [u8; PRESET_KEY_LEN])>,
}

impl StaticPresets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str, key: [u8; PRESET_KEY_LEN]) {
        self.entries.push((label.to_string(), key));
    }
}

impl KeyPresetStore for StaticPresets {
    fn key_num(&self) -> usize {
        self.entries.len()
    }

    fn key_label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(label, _)| label.as_str())
    }

    fn key(&self, index: usize) -> Option<[u8; PRESET_KEY_LEN]> {
        self.entries.get(index).map(|(_, key)| *key)
    }
}
