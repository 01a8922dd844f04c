//! Shared form state: the last committed registration record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Countries offered by the country select when no config override exists
pub const DEFAULT_COUNTRIES: &[&str] = &["Russia", "Belarus", "China"];

/// Accepted gender values, in radio order
pub const GENDERS: &[&str] = &["male", "female"];

/// Registration record. Used both as the in-progress draft and as the
/// committed value held by [`FormStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub age: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: String,
    pub terms: bool,
    /// `data:` URL of the uploaded image
    pub picture: String,
    pub country: Vec<String>,
    pub country_select: String,
}

impl Default for FormData {
    fn default() -> Self {
        Self::with_countries(DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect())
    }
}

impl FormData {
    /// Empty record offering the given countries
    pub fn with_countries(country: Vec<String>) -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            gender: GENDERS[0].to_string(),
            terms: false,
            picture: String::new(),
            country,
            country_select: String::new(),
        }
    }

    /// Copy with secrets and the image payload blanked, for logging
    pub fn redacted(&self) -> Self {
        let mask = |s: &str| if s.is_empty() { String::new() } else { "***".to_string() };
        Self {
            password: mask(&self.password),
            confirm_password: mask(&self.confirm_password),
            picture: self
                .picture
                .split_once(',')
                .map(|(prefix, _)| format!("{prefix},..."))
                .unwrap_or_default(),
            ..self.clone()
        }
    }
}

/// Actions accepted by [`FormStore::dispatch`]
#[derive(Debug, Clone)]
pub enum FormAction {
    /// Replace the committed record with the payload
    Commit(FormData),
}

/// Holds the committed registration record for the lifetime of the app
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    data: FormData,
    committed_at: Option<DateTime<Utc>>,
}

impl FormStore {
    /// Store seeded with the given defaults
    pub fn new(initial: FormData) -> Self {
        Self {
            data: initial,
            committed_at: None,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// When the current record was committed, `None` while still on defaults
    pub fn committed_at(&self) -> Option<DateTime<Utc>> {
        self.committed_at
    }

    pub fn dispatch(&mut self, action: FormAction) {
        match action {
            FormAction::Commit(payload) => {
                match serde_json::to_string(&payload.redacted()) {
                    Ok(json) => tracing::info!(record = %json, "Committing registration"),
                    Err(e) => tracing::warn!("Failed to serialize committed record: {e}"),
                }
                self.data = payload;
                self.committed_at = Some(Utc::now());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_record() {
        let data = FormData::default();
        assert_eq!(data.gender, "male");
        assert!(!data.terms);
        assert_eq!(data.country, vec!["Russia", "Belarus", "China"]);
        assert!(data.country_select.is_empty());
        assert!(data.picture.is_empty());
    }

    #[test]
    fn test_new_store_has_no_commit() {
        let store = FormStore::default();
        assert!(store.committed_at().is_none());
        assert_eq!(store.data(), &FormData::default());
    }

    #[test]
    fn test_commit_replaces_whole_record() {
        let mut store = FormStore::default();
        let payload = FormData {
            name: "Alice".to_string(),
            age: "30".to_string(),
            country: vec!["Chile".to_string()],
            country_select: "Chile".to_string(),
            ..FormData::default()
        };

        store.dispatch(FormAction::Commit(payload.clone()));

        assert_eq!(store.data(), &payload);
        assert!(store.committed_at().is_some());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&FormData::default()).unwrap();
        assert!(json.contains("\"confirmPassword\""));
        assert!(json.contains("\"countrySelect\""));
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let data = FormData {
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
            picture: "data:image/png;base64,AAAA".to_string(),
            ..FormData::default()
        };
        let redacted = data.redacted();
        assert_eq!(redacted.password, "***");
        assert_eq!(redacted.confirm_password, "***");
        assert_eq!(redacted.picture, "data:image/png;base64,...");
    }
}
