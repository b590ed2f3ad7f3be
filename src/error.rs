//! Error types for the assistant and dashboard core

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Dashboard Errors
    // =============================

    #[error("{0}")]
    Validation(String),

    #[error("Bank API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("No active card")]
    NoActiveCard,

    #[error("Card limit reached: at most {0} cards per account")]
    CardLimitReached(usize),

    #[error("Insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("Unknown card: {0}")]
    UnknownCard(i64),

    #[error("Speech capability unavailable: {0}")]
    SpeechUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssistantError {
    /// Message suitable for a user-facing notification.
    ///
    /// Backend errors surface the backend's own `error` text.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Api { message, .. } => message.clone(),
            AssistantError::Validation(message) => message.clone(),
            AssistantError::NoActiveCard => "Нет активной карты".to_string(),
            AssistantError::NotSignedIn => "Войдите в аккаунт".to_string(),
            AssistantError::CardLimitReached(max) => format!("Максимум {} карты на аккаунт", max),
            AssistantError::InsufficientFunds { .. } => "На карте недостаточно денег".to_string(),
            AssistantError::SpeechUnavailable(_) => "Голосовой ввод не поддерживается".to_string(),
            other => other.to_string(),
        }
    }
}
