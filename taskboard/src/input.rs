//! Request payloads and their field rules.
//!
//! Payloads arrive as plain data from whatever surface sits in front of the
//! board, so nothing here is trusted until [`CreateCollection::validate`] or
//! [`CreateTask::validate`] accepts it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::entity::CollectionColor;
use crate::error::{Error, Result};

pub const MIN_COLLECTION_NAME_CHARS: usize = 4;
pub const MIN_TASK_CONTENT_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCollection {
    pub name: String,
    pub color: String,
}

impl CreateCollection {
    pub fn new(name: impl Into<String>, color: CollectionColor) -> Self {
        Self {
            name: name.into(),
            color: color.to_string(),
        }
    }

    pub fn validate(self) -> Result<ValidCollection> {
        if self.name.chars().count() < MIN_COLLECTION_NAME_CHARS {
            return Err(Error::validation(
                "name",
                format!("Collection name must be at least {MIN_COLLECTION_NAME_CHARS} characters"),
            ));
        }
        let color = self
            .color
            .parse::<CollectionColor>()
            .map_err(|err| Error::validation("color", err.to_string()))?;
        Ok(ValidCollection {
            name: self.name,
            color,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCollection {
    pub name: String,
    pub color: CollectionColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub collection_id: i32,
    pub content: String,
    /// May lie in the past.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateTask {
    pub fn new(collection_id: i32, content: impl Into<String>) -> Self {
        Self {
            collection_id,
            content: content.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    pub fn validate(self) -> Result<ValidTask> {
        if self.collection_id < 0 {
            return Err(Error::validation(
                "collectionId",
                "Collection id must not be negative",
            ));
        }
        if self.content.chars().count() < MIN_TASK_CONTENT_CHARS {
            return Err(Error::validation(
                "content",
                format!("Task content must be at least {MIN_TASK_CONTENT_CHARS} characters"),
            ));
        }
        Ok(ValidTask {
            collection_id: self.collection_id,
            content: self.content,
            expires_at: self.expires_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    pub collection_id: i32,
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: Error) -> &'static str {
        match err {
            Error::ValidationFailed { field, .. } => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_collection_name_boundary() {
        for len in 0..MIN_COLLECTION_NAME_CHARS {
            let input = CreateCollection::new("x".repeat(len), CollectionColor::Sunset);
            assert_eq!(field_of(input.validate().unwrap_err()), "name");
        }
        let ok = CreateCollection::new("Work", CollectionColor::Metal)
            .validate()
            .unwrap();
        assert_eq!(ok.color, CollectionColor::Metal);
    }

    #[test]
    fn test_collection_color_must_be_in_palette() {
        let input = CreateCollection {
            name: "Personal".into(),
            color: "teal".into(),
        };
        assert_eq!(field_of(input.validate().unwrap_err()), "color");
    }

    #[test]
    fn test_task_content_boundary() {
        for len in 0..MIN_TASK_CONTENT_CHARS {
            let input = CreateTask::new(1, "a".repeat(len));
            assert_eq!(field_of(input.validate().unwrap_err()), "content");
        }
        let ok = CreateTask::new(1, "a".repeat(MIN_TASK_CONTENT_CHARS))
            .validate()
            .unwrap();
        assert_eq!(ok.content.len(), 8);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert!(CreateCollection::new("ÄÖÜß", CollectionColor::Candy)
            .validate()
            .is_ok());
        // 7 characters, more than 8 bytes
        let input = CreateTask::new(1, "ééééééé");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_negative_collection_id_is_rejected() {
        let input = CreateTask::new(-1, "Buy groceries");
        assert_eq!(field_of(input.validate().unwrap_err()), "collectionId");
    }

    #[test]
    fn test_task_payload_uses_camel_case() {
        let input: CreateTask = serde_json::from_str(
            r#"{"collectionId": 3, "content": "Water the plants", "expiresAt": "2026-10-20T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(input.collection_id, 3);
        assert!(input.expires_at.is_some());

        let without_expiry: CreateTask =
            serde_json::from_str(r#"{"collectionId": 3, "content": "Water the plants"}"#).unwrap();
        assert_eq!(without_expiry.expires_at, None);
    }
}
