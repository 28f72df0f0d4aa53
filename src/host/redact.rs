use std::sync::Mutex;

use crate::utils::constants::MASK;

/// Registered secret values, replaced with `***` in any text passed
/// through [`Redactor::mask`].
#[derive(Debug, Default)]
pub struct Redactor {
    secrets: Mutex<Vec<String>>,
}

impl Redactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty values are ignored, they would mask everything.
    pub fn register(&self, value: &str) {
        if value.is_empty() {
            return;
        }
        let mut secrets = self.secrets.lock().unwrap_or_else(|e| e.into_inner());
        if !secrets.iter().any(|s| s == value) {
            secrets.push(value.to_owned());
            // longest first so a secret containing another is masked whole
            secrets.sort_by(|a, b| b.len().cmp(&a.len()));
        }
    }

    pub fn mask(&self, text: &str) -> String {
        let secrets = self.secrets.lock().unwrap_or_else(|e| e.into_inner());
        secrets
            .iter()
            .fold(text.to_owned(), |acc, secret| acc.replace(secret.as_str(), MASK))
    }
}
