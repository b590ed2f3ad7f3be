//! Card catalog
//!
//! Card products offered when issuing a new card, and the two physical
//! formats a card can take.

use crate::models::CreateCardRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-side limit on cards per account
pub const MAX_CARDS_PER_ACCOUNT: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CardProduct {
    DebitPremium,
    CreditGold,
    Youth,
    Child,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardFormat {
    #[default]
    Virtual,
    Plastic,
}

impl CardProduct {
    pub const ALL: [CardProduct; 4] = [
        CardProduct::DebitPremium,
        CardProduct::CreditGold,
        CardProduct::Youth,
        CardProduct::Child,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CardProduct::DebitPremium => "Дебетовая карта Premium",
            CardProduct::CreditGold => "Кредитная карта Gold",
            CardProduct::Youth => "Молодёжная карта Start",
            CardProduct::Child => "Детская карта",
        }
    }

    /// Backend `card_category` value
    pub fn category(self) -> &'static str {
        match self {
            CardProduct::DebitPremium => "debit",
            CardProduct::CreditGold => "credit",
            CardProduct::Youth => "youth",
            CardProduct::Child => "child",
        }
    }

    pub fn is_child(self) -> bool {
        self == CardProduct::Child
    }

    pub fn request(self, format: CardFormat, user_id: i64) -> CreateCardRequest {
        CreateCardRequest {
            user_id,
            card_type: format.to_string(),
            card_name: self.name().to_string(),
            card_category: self.category().to_string(),
            is_child_card: self.is_child(),
        }
    }
}

impl CardFormat {
    /// Russian adjective used in the "card is being issued" toast
    pub fn label(self) -> &'static str {
        match self {
            CardFormat::Virtual => "виртуальная",
            CardFormat::Plastic => "пластиковая",
        }
    }
}

impl fmt::Display for CardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardFormat::Virtual => "virtual",
            CardFormat::Plastic => "plastic",
        };
        write!(f, "{}", s)
    }
}
