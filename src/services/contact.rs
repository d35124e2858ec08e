//! Contact message service
//!
//! Validates public contact-form submissions and hands them to a
//! `MessageStore`; also serves the admin listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::{FolioError, Result};
use crate::storage::{ContactMessage, NewContactMessage};

const MAX_NAME_CHARS: usize = 200;
const MAX_EMAIL_CHARS: usize = 320;
const MAX_MESSAGE_CHARS: usize = 5000;

/// 联系消息存储
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    async fn save_message(&self, message: NewContactMessage) -> Result<()>;

    /// 全部消息，最新的在前
    async fn list_messages(&self) -> Result<Vec<ContactMessage>>;
}

// ============ Request DTO ============

/// Raw contact form body; every field is checked in `validate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(FolioError::validation(format!("{} is required", field)));
    }
    Ok(value)
}

impl ContactForm {
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewContactMessage> {
        let name = required("name", self.name)?;
        let email = required("email", self.email)?;
        let message = required("message", self.message)?;

        if name.chars().count() > MAX_NAME_CHARS {
            return Err(FolioError::validation(format!(
                "name must be at most {} characters",
                MAX_NAME_CHARS
            )));
        }
        if !email.contains('@') {
            return Err(FolioError::validation("email must be a valid address"));
        }
        if email.chars().count() > MAX_EMAIL_CHARS {
            return Err(FolioError::validation(format!(
                "email must be at most {} characters",
                MAX_EMAIL_CHARS
            )));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(FolioError::validation(format!(
                "message must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        Ok(NewContactMessage {
            name,
            email,
            message,
            timestamp: now,
        })
    }
}

// ============ Service ============

pub struct ContactService {
    store: Arc<dyn MessageStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Validate then persist one submission
    pub async fn submit(&self, form: ContactForm) -> Result<()> {
        let message = form.validate(Utc::now())?;
        let email = message.email.clone();

        self.store.save_message(message).await.inspect_err(|e| {
            error!("Failed to store contact message from {}: {}", email, e);
        })?;

        info!("Contact message stored from {}", email);
        Ok(())
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        self.store.list_messages().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecStore(Mutex<Vec<NewContactMessage>>);

    #[async_trait::async_trait]
    impl MessageStore for VecStore {
        async fn save_message(&self, message: NewContactMessage) -> Result<()> {
            self.0.lock().unwrap().push(message);
            Ok(())
        }

        async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
            Ok(Vec::new())
        }
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let msg = form("  Ada ", " ada@example.com ", " Hello there ")
            .validate(Utc::now())
            .unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
        assert_eq!(msg.message, "Hello there");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = ContactForm::default().validate(Utc::now()).unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)));
        assert!(err.message().contains("name"));

        let err = form("Ada", "   ", "hi").validate(Utc::now()).unwrap_err();
        assert!(err.message().contains("email"));
    }

    #[test]
    fn test_email_needs_at_sign() {
        assert!(form("Ada", "ada.example.com", "hi").validate(Utc::now()).is_err());
    }

    #[test]
    fn test_length_limits() {
        let long_name = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(form(&long_name, "a@b.c", "hi").validate(Utc::now()).is_err());

        let max_email = format!("{}@example.com", "a".repeat(MAX_EMAIL_CHARS - 12));
        assert!(form("Ada", &max_email, "hi").validate(Utc::now()).is_ok());

        let long_email = format!("{}@example.com", "a".repeat(318));
        let err = form("Ada", &long_email, "hi").validate(Utc::now()).unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)));
        assert!(err.message().contains("email"));

        let max_message = "y".repeat(MAX_MESSAGE_CHARS);
        assert!(form("Ada", "a@b.c", &max_message).validate(Utc::now()).is_ok());

        let long_message = "y".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(form("Ada", "a@b.c", &long_message).validate(Utc::now()).is_err());
    }

    #[tokio::test]
    async fn test_submit_persists() {
        let store = Arc::new(VecStore::default());
        let service = ContactService::new(store.clone());

        service.submit(form("Ada", "a@b.c", "hi")).await.unwrap();
        assert_eq!(store.0.lock().unwrap().len(), 1);

        assert!(service.submit(form("", "a@b.c", "hi")).await.is_err());
        assert_eq!(store.0.lock().unwrap().len(), 1);
    }
}
