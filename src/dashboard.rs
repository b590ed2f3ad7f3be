//! Dashboard controller
//!
//! Applies assistant intents and form submissions to the view state,
//! delegates all money movement to the `BankApi`, and answers every action
//! with the notification the user should see. Failures never escape as
//! errors here; they become destructive notifications.

use crate::cards::{CardFormat, CardProduct, MAX_CARDS_PER_ACCOUNT};
use crate::classifier::{ClassificationInput, CommandInterpreter, Intent, Mode};
use crate::client::BankApi;
use crate::credit::{placeholder_credit_decision, CreditDecision};
use crate::error::AssistantError;
use crate::hotline::{HotlineCall, SupportTopic};
use crate::investments::{check_investment, placeholder_annual_return, Portfolio};
use crate::models::{AuthRequest, CreateCardRequest, Notification};
use crate::speech::SpeechCapability;
use crate::state::{AppState, CreditForm, TransferForm};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const BOT_TITLE: &str = "ОТПК Бот";

/// What the assistant did with one command
#[derive(Debug, Clone)]
pub struct CommandReply {
    pub intent: Intent,
    pub notification: Notification,
}

pub struct Dashboard {
    api: Arc<dyn BankApi>,
    state: AppState,
    hotline: HotlineCall,
}

impl Dashboard {
    pub fn new(api: Arc<dyn BankApi>, mode: Mode, hotline_hold: Duration) -> Self {
        Self {
            api,
            state: AppState::with_mode(mode),
            hotline: HotlineCall::new(hotline_hold),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn hotline(&self) -> &HotlineCall {
        &self.hotline
    }

    // =============================
    // Session
    // =============================

    pub async fn login(&mut self, phone: &str, name: &str) -> Notification {
        let result = self.try_login(phone, name).await;
        report("login", result)
    }

    async fn try_login(&mut self, phone: &str, name: &str) -> Result<Notification> {
        let (phone, name) = (phone.trim(), name.trim());
        if phone.is_empty() || name.is_empty() {
            return Err(AssistantError::Validation("Заполните все поля".to_string()));
        }

        let auth = self
            .api
            .login(&AuthRequest {
                phone: phone.to_string(),
                name: name.to_string(),
            })
            .await?;

        info!(user_id = auth.user.id, "Signed in");
        self.state.sign_in(auth.user);
        self.reload_after("login").await;

        Ok(Notification::info("Успешно!", auth.message))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.state.user() {
            info!(user_id = user.id, "Signed out");
        }
        self.state.sign_out();
    }

    pub async fn delete_account(&mut self) -> Notification {
        let result = self.try_delete_account().await;
        report("delete_account", result)
    }

    async fn try_delete_account(&mut self) -> Result<Notification> {
        let user_id = self.state.require_user()?.id;
        let response = self.api.delete_account(user_id).await?;
        self.state.sign_out();

        Ok(Notification::info("Аккаунт удалён", response.message))
    }

    // =============================
    // Cards & history
    // =============================

    /// Reload the card list and, when a card is active, its history
    pub async fn refresh_cards(&mut self) -> Result<()> {
        let user_id = self.state.require_user()?.id;
        let cards = self.api.list_cards(user_id).await?;
        debug!(user_id, card_count = cards.len(), "Cards loaded");

        self.state.set_cards(cards);
        self.refresh_transactions().await
    }

    /// Reload once the backend has accepted a change. The change already
    /// happened, so a failed reload is logged and never reported as a
    /// failure of the action itself.
    async fn reload_after(&mut self, action: &str) {
        if let Err(e) = self.refresh_cards().await {
            warn!(action, "Reload after successful action failed: {}", e);
        }
    }

    pub async fn refresh_transactions(&mut self) -> Result<()> {
        let Some(card_id) = self.state.selected_card().map(|c| c.id) else {
            return Ok(());
        };

        let transactions = self.api.list_transactions(card_id).await?;
        self.state.set_transactions(transactions);
        Ok(())
    }

    pub async fn select_card(&mut self, card_id: i64) -> Result<()> {
        self.state.select_card(card_id)?;
        self.refresh_transactions().await
    }

    /// Quick action: a plain virtual debit card
    pub async fn create_virtual_card(&mut self) -> Notification {
        let result = match self.state.require_user().map(|u| u.id) {
            Ok(user_id) => {
                let request = CreateCardRequest {
                    user_id,
                    card_type: CardFormat::Virtual.to_string(),
                    card_name: "Виртуальная карта".to_string(),
                    card_category: "debit".to_string(),
                    is_child_card: false,
                };
                self.issue_card(request, "Виртуальная карта создана".to_string())
                    .await
            }
            Err(e) => Err(e),
        };
        report("create_virtual_card", result)
    }

    pub async fn create_card(&mut self, product: CardProduct, format: CardFormat) -> Notification {
        let result = match self.state.require_user().map(|u| u.id) {
            Ok(user_id) => {
                let request = product.request(format, user_id);
                let message = format!("{} ({})", product.name(), format.label());
                self.issue_card(request, message).await
            }
            Err(e) => Err(e),
        };
        report("create_card", result)
    }

    async fn issue_card(&mut self, request: CreateCardRequest, message: String) -> Result<Notification> {
        if !self.state.can_create_card() {
            return Err(AssistantError::CardLimitReached(MAX_CARDS_PER_ACCOUNT));
        }

        let created = self.api.create_card(&request).await?;
        info!(card_id = created.card.id, category = %request.card_category, "Card issued");
        self.reload_after("create_card").await;

        Ok(Notification::info("Успешно!", message))
    }

    // =============================
    // Money movement
    // =============================

    pub async fn submit_transfer(&mut self) -> Notification {
        let result = self.try_transfer().await;
        report("transfer", result)
    }

    async fn try_transfer(&mut self) -> Result<Notification> {
        let card_id = self.state.require_card()?.id;
        let request = self.state.transfer_form.to_request(card_id)?;

        let response = self.api.transfer(&request).await?;
        info!(
            transaction_id = response.transaction_id,
            amount = request.amount,
            via = %request.identifier_type,
            "Transfer completed"
        );

        self.state.transfer_form = TransferForm::default();
        self.reload_after("transfer").await;

        Ok(Notification::info("Успешно!", "Перевод выполнен"))
    }

    pub async fn submit_credit(&mut self) -> Notification {
        let result = self.try_credit().await;
        report("credit", result)
    }

    async fn try_credit(&mut self) -> Result<Notification> {
        let card_id = self.state.require_card()?.id;
        let request = self.state.credit_form.to_request(card_id)?;

        if let CreditDecision::Declined { reason } = placeholder_credit_decision(&request) {
            return Err(AssistantError::Validation(reason));
        }

        let response = self.api.issue_credit(&request).await?;
        info!(card_id, amount = response.amount, new_balance = response.new_balance, "Credit issued");

        self.state.credit_form = CreditForm::default();
        self.reload_after("credit").await;

        Ok(Notification::info(
            "Кредит одобрен!",
            format!("{:.2} ₽ зачислено на карту", response.amount),
        ))
    }

    /// Scripted investment: checks the balance and reports the projection.
    /// Nothing is sent to the backend.
    pub fn invest(&self, portfolio: Portfolio, amount: f64) -> Notification {
        let result = check_investment(amount, self.state.balance()).map(|()| {
            let option = portfolio.option();
            Notification::info(
                "Инвестиция оформлена",
                format!(
                    "{}: {:.2} ₽, прогноз дохода через год +{:.2} ₽",
                    option.name,
                    amount,
                    placeholder_annual_return(amount)
                ),
            )
        });

        match result {
            Err(AssistantError::InsufficientFunds { .. }) => {
                let mut n = Notification::error("На карте недостаточно денег");
                n.title = "Недостаточно средств".to_string();
                n
            }
            other => report("invest", other),
        }
    }

    // =============================
    // Assistant
    // =============================

    /// Classify one command and apply its navigation
    pub fn handle_command(&mut self, text: &str) -> CommandReply {
        let input = ClassificationInput::new(text, self.state.mode).with_balance(self.state.balance());
        let result = CommandInterpreter::classify(&input);

        if let Some(tab) = result.intent.target_tab() {
            self.state.set_tab(tab);
        }

        info!(intent = ?result.intent, mode = %self.state.mode, "Assistant command");

        CommandReply {
            intent: result.intent,
            notification: Notification::info(BOT_TITLE, result.response),
        }
    }

    /// Run a speech session: every transcript is handled as a command, and
    /// a call request dials the hotline before the next transcript.
    pub async fn listen(&mut self, speech: &dyn SpeechCapability) -> Vec<Notification> {
        let transcripts = match speech.start_listening() {
            Ok(transcripts) => transcripts,
            Err(e) => {
                warn!("Voice input unavailable: {}", e);
                return vec![Notification::error(e.user_message())];
            }
        };

        let mut notifications = vec![Notification::info("Слушаю...", "Говорите команду")];

        for text in transcripts {
            if text.trim().is_empty() {
                continue;
            }

            let reply = self.handle_command(&text);
            notifications.push(reply.notification);

            if reply.intent == Intent::PlaceCall {
                notifications.push(self.call_hotline(speech).await);
            }
        }

        notifications
    }

    pub async fn call_hotline(&mut self, speech: &dyn SpeechCapability) -> Notification {
        self.hotline.connect(speech).await
    }

    pub fn hotline_topic(&self, topic: SupportTopic) -> Option<Notification> {
        self.hotline.choose(topic)
    }

    pub fn hang_up(&mut self) {
        self.hotline.hang_up();
    }
}

fn report(action: &str, result: Result<Notification>) -> Notification {
    result.unwrap_or_else(|e| {
        warn!(action, "Dashboard action failed: {}", e);
        Notification::error(e.user_message())
    })
}
