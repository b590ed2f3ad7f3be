//! Core data models for the bank dashboard

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Cards,
    Transfer,
    Credit,
    Investments,
    History,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierType {
    #[default]
    Card,
    Phone,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Transfer,
    Credit,
    #[serde(other)]
    Other,
}

/// Ordered from safest to riskiest
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

//
// ================= Accounts =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankCard {
    pub id: i64,
    pub card_number: String,
    pub card_type: String,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub card_category: Option<String>,
    #[serde(default)]
    pub is_child_card: Option<bool>,
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub from_card: Option<String>,
    #[serde(default)]
    pub to_card: Option<String>,
}

impl Transaction {
    /// Amount with the sign the history list shows: credits in, transfers out.
    pub fn signed_display(&self) -> String {
        let sign = if self.kind == TransactionType::Credit { '+' } else { '-' };
        format!("{}{:.2} ₽", sign, self.amount)
    }

    /// Parses `created_at`, accepting both offset and naive (UTC) timestamps.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

//
// ================= Requests =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub phone: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCardRequest {
    pub user_id: i64,
    pub card_type: String,
    pub card_name: String,
    pub card_category: String,
    pub is_child_card: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRequest {
    pub from_card_id: i64,
    pub to_identifier: String,
    pub amount: f64,
    pub identifier_type: IdentifierType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditRequest {
    pub card_id: i64,
    pub amount: f64,
}

//
// ================= Responses =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsResponse {
    #[serde(default)]
    pub cards: Vec<BankCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCreatedResponse {
    pub card: BankCard,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(default)]
    pub message: String,
    pub transaction_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditResponse {
    #[serde(default)]
    pub message: String,
    pub amount: f64,
    pub new_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

//
// ================= Notifications =================
//

/// A toast shown to the user after an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::build(title.into(), description.into(), NotificationVariant::Default)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::build("Ошибка".to_string(), description.into(), NotificationVariant::Destructive)
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }

    fn build(title: String, description: String, variant: NotificationVariant) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            variant,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tab::Home => "Главная",
            Tab::Cards => "Карты",
            Tab::Transfer => "Переводы",
            Tab::Credit => "Кредиты",
            Tab::Investments => "Инвестиции",
            Tab::History => "История",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Низкий",
            RiskLevel::Medium => "Средний",
            RiskLevel::High => "Высокий",
            RiskLevel::Critical => "Очень высокий",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IdentifierType::Card => "card",
            IdentifierType::Phone => "phone",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.description)
    }
}
