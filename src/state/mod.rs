//! Dashboard view state
//!
//! Everything the dashboard page holds between actions: the signed-in user,
//! their cards, the active card, its history, the active tab and the two
//! pending forms. Owned by the caller and passed by reference.

use crate::cards::MAX_CARDS_PER_ACCOUNT;
use crate::classifier::Mode;
use crate::error::AssistantError;
use crate::models::{BankCard, CreditRequest, IdentifierType, Tab, Transaction, TransferRequest, User};
use crate::Result;

/// Pending transfer form. Fields hold raw user input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
    pub to_identifier: String,
    pub amount: String,
    pub identifier_type: IdentifierType,
}

impl TransferForm {
    pub fn to_request(&self, from_card_id: i64) -> Result<TransferRequest> {
        let to_identifier = self.to_identifier.trim();
        if to_identifier.is_empty() || self.amount.trim().is_empty() {
            return Err(AssistantError::Validation("Заполните все поля".to_string()));
        }

        Ok(TransferRequest {
            from_card_id,
            to_identifier: to_identifier.to_string(),
            amount: parse_amount(&self.amount)?,
            identifier_type: self.identifier_type,
        })
    }
}

/// Pending credit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditForm {
    pub amount: String,
}

impl CreditForm {
    pub fn to_request(&self, card_id: i64) -> Result<CreditRequest> {
        if self.amount.trim().is_empty() {
            return Err(AssistantError::Validation("Укажите сумму кредита".to_string()));
        }

        Ok(CreditRequest {
            card_id,
            amount: parse_amount(&self.amount)?,
        })
    }
}

/// Parse a user-typed amount; accepts a decimal comma
pub fn parse_amount(raw: &str) -> Result<f64> {
    let normalized = raw.trim().replace(' ', "").replace(',', ".");

    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(AssistantError::Validation(format!(
            "Некорректная сумма: {}",
            raw.trim()
        ))),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    user: Option<User>,
    cards: Vec<BankCard>,
    selected_card_id: Option<i64>,
    transactions: Vec<Transaction>,
    active_tab: Tab,
    pub mode: Mode,
    pub transfer_form: TransferForm,
    pub credit_form: CreditForm,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    // =============================
    // Session
    // =============================

    pub fn sign_in(&mut self, user: User) {
        let mode = self.mode;
        *self = Self::with_mode(mode);
        self.user = Some(user);
    }

    /// Drops the session and everything loaded for it; keeps the mode
    pub fn sign_out(&mut self) {
        let mode = self.mode;
        *self = Self::with_mode(mode);
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(AssistantError::NotSignedIn)
    }

    // =============================
    // Cards
    // =============================

    /// Replace the card list. Keeps the selection when the card is still
    /// present, otherwise falls back to the first card.
    pub fn set_cards(&mut self, cards: Vec<BankCard>) {
        let keep = self
            .selected_card_id
            .filter(|id| cards.iter().any(|c| c.id == *id));

        if keep.is_none() {
            self.transactions.clear();
        }
        self.selected_card_id = keep.or_else(|| cards.first().map(|c| c.id));
        self.cards = cards;
    }

    pub fn cards(&self) -> &[BankCard] {
        &self.cards
    }

    pub fn select_card(&mut self, card_id: i64) -> Result<&BankCard> {
        let card = self
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .ok_or(AssistantError::UnknownCard(card_id))?;

        if self.selected_card_id != Some(card_id) {
            self.transactions.clear();
        }
        self.selected_card_id = Some(card_id);
        Ok(card)
    }

    pub fn selected_card(&self) -> Option<&BankCard> {
        let id = self.selected_card_id?;
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn require_card(&self) -> Result<&BankCard> {
        self.selected_card().ok_or(AssistantError::NoActiveCard)
    }

    /// Balance of the active card
    pub fn balance(&self) -> Option<f64> {
        self.selected_card().map(|c| c.balance)
    }

    pub fn can_create_card(&self) -> bool {
        self.cards.len() < MAX_CARDS_PER_ACCOUNT
    }

    // =============================
    // History & navigation
    // =============================

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64, balance: f64) -> BankCard {
        BankCard {
            id,
            card_number: format!("1111 2222 3333 {:04}", id),
            card_type: "virtual".to_string(),
            card_name: None,
            card_category: None,
            is_child_card: None,
            balance,
            created_at: None,
        }
    }

    fn user() -> User {
        User {
            id: 1,
            phone: "+79990000000".to_string(),
            name: "Иван".to_string(),
        }
    }

    #[test]
    fn test_first_card_selected_by_default() {
        let mut state = AppState::new();
        assert_eq!(state.balance(), None);

        state.set_cards(vec![card(5, 10.0), card(6, 20.0)]);
        assert_eq!(state.selected_card().map(|c| c.id), Some(5));
        assert_eq!(state.balance(), Some(10.0));
    }

    #[test]
    fn test_selection_survives_reload() {
        let mut state = AppState::new();
        state.set_cards(vec![card(5, 10.0), card(6, 20.0)]);
        state.select_card(6).unwrap();

        state.set_cards(vec![card(5, 10.0), card(6, 25.0)]);
        assert_eq!(state.balance(), Some(25.0));

        state.set_cards(vec![card(7, 1.0)]);
        assert_eq!(state.selected_card().map(|c| c.id), Some(7));
    }

    #[test]
    fn test_select_unknown_card() {
        let mut state = AppState::new();
        state.set_cards(vec![card(5, 10.0)]);
        assert!(matches!(state.select_card(9), Err(AssistantError::UnknownCard(9))));
    }

    #[test]
    fn test_card_limit() {
        let mut state = AppState::new();
        state.set_cards(vec![card(1, 0.0), card(2, 0.0)]);
        assert!(state.can_create_card());

        state.set_cards(vec![card(1, 0.0), card(2, 0.0), card(3, 0.0)]);
        assert!(!state.can_create_card());
    }

    #[test]
    fn test_sign_out_clears_session_but_keeps_mode() {
        let mut state = AppState::with_mode(Mode::Child);
        state.sign_in(user());
        state.set_cards(vec![card(1, 0.0)]);
        state.set_tab(Tab::History);

        state.sign_out();
        assert!(state.user().is_none());
        assert!(state.cards().is_empty());
        assert_eq!(state.active_tab(), Tab::Home);
        assert_eq!(state.mode, Mode::Child);
    }

    #[test]
    fn test_transfer_form_validation() {
        let mut form = TransferForm::default();
        assert!(matches!(form.to_request(1), Err(AssistantError::Validation(m)) if m == "Заполните все поля"));

        form.to_identifier = " 1234 5678 9012 3456 ".to_string();
        form.amount = "abc".to_string();
        assert!(form.to_request(1).is_err());

        form.amount = "-5".to_string();
        assert!(form.to_request(1).is_err());

        form.amount = "1 500,50".to_string();
        let req = form.to_request(1).unwrap();
        assert_eq!(req.amount, 1500.5);
        assert_eq!(req.to_identifier, "1234 5678 9012 3456");
        assert_eq!(req.identifier_type, IdentifierType::Card);
    }

    #[test]
    fn test_credit_form_validation() {
        let form = CreditForm::default();
        assert!(matches!(form.to_request(1), Err(AssistantError::Validation(m)) if m == "Укажите сумму кредита"));

        let form = CreditForm { amount: "50000".to_string() };
        assert_eq!(form.to_request(3).unwrap(), CreditRequest { card_id: 3, amount: 50000.0 });
    }
}
