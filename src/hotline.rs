//! Hotline call simulation
//!
//! A scripted support call: hold music for a fixed time, then the robot
//! greets the caller by voice and offers a fixed set of topics.

use crate::models::Notification;
use crate::speech::SpeechCapability;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_HOLD: Duration = Duration::from_secs(3);

pub const ROBOT_GREETING: &str =
    "Здравствуйте! Вас приветствует служба поддержки ОТПК Банк. Чем я могу вам помочь?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPhase {
    Idle,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SupportTopic {
    Cards,
    Credits,
    TechSupport,
    Operator,
}

impl SupportTopic {
    pub const ALL: [SupportTopic; 4] = [
        SupportTopic::Cards,
        SupportTopic::Credits,
        SupportTopic::TechSupport,
        SupportTopic::Operator,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SupportTopic::Cards => "Вопросы по картам",
            SupportTopic::Credits => "Вопросы по кредитам",
            SupportTopic::TechSupport => "Техническая поддержка",
            SupportTopic::Operator => "Связаться с оператором",
        }
    }

    pub fn robot_reply(self) -> &'static str {
        match self {
            SupportTopic::Cards => "Переключаю на консультанта по картам...",
            SupportTopic::Credits => "Переключаю на консультанта по кредитам...",
            SupportTopic::TechSupport => "Открываю техническую поддержку...",
            SupportTopic::Operator => "Соединяю с живым оператором...",
        }
    }
}

pub struct HotlineCall {
    phase: CallPhase,
    hold: Duration,
}

impl HotlineCall {
    pub fn new(hold: Duration) -> Self {
        Self {
            phase: CallPhase::Idle,
            hold,
        }
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Status line shown under the hotline dialog title
    pub fn status_line(&self) -> &'static str {
        match self.phase {
            CallPhase::Connecting => "Соединяем с оператором...",
            CallPhase::Idle | CallPhase::Connected => "Вас приветствует робот службы поддержки",
        }
    }

    /// Hold, then greet. A speech failure does not drop the call; the
    /// greeting still arrives as a notification.
    pub async fn connect(&mut self, speech: &dyn SpeechCapability) -> Notification {
        self.phase = CallPhase::Connecting;
        info!(hold_ms = self.hold.as_millis() as u64, "Hotline call connecting");

        tokio::time::sleep(self.hold).await;

        self.phase = CallPhase::Connected;
        if let Err(e) = speech.speak(ROBOT_GREETING) {
            warn!("Hotline greeting not spoken: {}", e);
        }

        Notification::info("Горячая линия", "Робот: Здравствуйте! Чем могу помочь?")
    }

    /// Robot reply for a topic; only meaningful once connected
    pub fn choose(&self, topic: SupportTopic) -> Option<Notification> {
        if self.phase != CallPhase::Connected {
            return None;
        }
        Some(Notification::info("Робот", topic.robot_reply()))
    }

    pub fn hang_up(&mut self) {
        self.phase = CallPhase::Idle;
    }
}

impl Default for HotlineCall {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}
