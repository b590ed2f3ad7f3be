//! Scripted investments view
//!
//! Portfolio options are static marketing data. The yearly projection is a
//! flat placeholder rate, not a model of any portfolio.

use crate::error::AssistantError;
use crate::models::RiskLevel;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Flat yearly rate used by the projection, whatever the portfolio
const PLACEHOLDER_ANNUAL_RATE: f64 = 0.15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Portfolio {
    Conservative,
    Balanced,
    Aggressive,
    Crypto,
}

/// Display data for one portfolio card
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioOption {
    pub portfolio: Portfolio,
    pub name: &'static str,
    pub description: &'static str,
    /// Advertised yearly return range, percent
    pub expected_return: (u8, u8),
    pub risk: RiskLevel,
}

impl Portfolio {
    pub const ALL: [Portfolio; 4] = [
        Portfolio::Conservative,
        Portfolio::Balanced,
        Portfolio::Aggressive,
        Portfolio::Crypto,
    ];

    pub fn option(self) -> PortfolioOption {
        let (name, description, expected_return, risk) = match self {
            Portfolio::Conservative => (
                "Консервативный портфель",
                "Облигации и стабильные активы",
                (8, 12),
                RiskLevel::Low,
            ),
            Portfolio::Balanced => (
                "Сбалансированный портфель",
                "Микс акций и облигаций",
                (12, 18),
                RiskLevel::Medium,
            ),
            Portfolio::Aggressive => (
                "Агрессивный портфель",
                "Акции роста и криптовалюта",
                (18, 30),
                RiskLevel::High,
            ),
            Portfolio::Crypto => (
                "Криптовалюты",
                "BTC, ETH и другие крипто",
                (20, 50),
                RiskLevel::Critical,
            ),
        };

        PortfolioOption {
            portfolio: self,
            name,
            description,
            expected_return,
            risk,
        }
    }
}

/// Placeholder projection of one year's return. Replace with a real model.
pub fn placeholder_annual_return(amount: f64) -> f64 {
    amount * PLACEHOLDER_ANNUAL_RATE
}

/// Amount must be positive and covered by the active balance
pub fn check_investment(amount: f64, balance: Option<f64>) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AssistantError::Validation(
            "Выберите портфель и укажите сумму".to_string(),
        ));
    }

    let available = balance.unwrap_or(0.0);
    if amount > available {
        return Err(AssistantError::InsufficientFunds {
            requested: amount,
            available,
        });
    }

    Ok(())
}
