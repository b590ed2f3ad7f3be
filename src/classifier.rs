//! Command Interpreter
//!
//! Maps free-text assistant input (typed or transcribed) to one of a fixed
//! set of intents. Matching is case-insensitive substring search over an
//! ordered rule table; the first matching rule wins.
//!
//! The mode only changes the wording of the response, never the intent.

use crate::models::Tab;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    NavigateTransfer,
    NavigateCredit,
    ReportBalance,
    NavigateInvestments,
    NavigateHistory,
    ShowHelp,
    PlaceCall,
    NavigateCards,
    Unrecognized,
}

impl Intent {
    /// Dashboard tab opened by a navigation intent.
    pub fn target_tab(self) -> Option<Tab> {
        match self {
            Intent::NavigateTransfer => Some(Tab::Transfer),
            Intent::NavigateCredit => Some(Tab::Credit),
            Intent::NavigateInvestments => Some(Tab::Investments),
            Intent::NavigateHistory => Some(Tab::History),
            Intent::NavigateCards => Some(Tab::Cards),
            Intent::ReportBalance
            | Intent::ShowHelp
            | Intent::PlaceCall
            | Intent::Unrecognized => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    #[serde(rename = "normal", alias = "standard")]
    Standard,
    #[serde(rename = "ai")]
    AssistantAI,
    #[serde(rename = "child")]
    Child,
    #[serde(rename = "adult")]
    Adult,
}

const BASE_COMMANDS: &[&str] = &[
    "• \"Баланс\" - показать баланс карты",
    "• \"Перевод\" - открыть раздел переводов",
    "• \"История\" - показать историю операций",
    "• \"Помощь\" - список всех команд",
];

const AI_COMMANDS: &[&str] = &[
    "• Спросите что угодно про банк",
    "• \"Как перевести деньги?\"",
    "• \"Сколько у меня денег?\"",
    "• \"Оформи кредит на 50000\"",
    "• AI поймёт естественную речь",
];

const CHILD_COMMANDS: &[&str] = &[
    "🎈 \"Сколько денег\" - узнать сколько денег",
    "🎨 \"Отправить маме\" - перевести деньги",
    "🎮 \"Что я покупал\" - посмотреть покупки",
    "🎪 \"Помоги\" - получить помощь",
];

const ADULT_EXTRA_COMMANDS: &[&str] = &[
    "• \"Кредит\" - оформить кредит",
    "• \"Инвестиции\" - открыть инвестиции",
    "• \"Горячая линия\" - связаться с поддержкой",
    "• \"Статистика\" - финансовая статистика",
];

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::AssistantAI, Mode::Standard, Mode::Child, Mode::Adult];

    /// Wire identifier, as used by the assistant dialog tabs
    pub fn id(self) -> &'static str {
        match self {
            Mode::Standard => "normal",
            Mode::AssistantAI => "ai",
            Mode::Child => "child",
            Mode::Adult => "adult",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Standard => "Обычный",
            Mode::AssistantAI => "AI режим",
            Mode::Child => "Детский",
            Mode::Adult => "Взрослый",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Standard => "Стандартные команды",
            Mode::AssistantAI => "Умный помощник с AI",
            Mode::Child => "Простой интерфейс для детей",
            Mode::Adult => "Расширенные функции",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Child => "Скажи что хочешь...",
            Mode::AssistantAI => "Спросите что угодно...",
            Mode::Standard | Mode::Adult => "Введите команду...",
        }
    }

    /// Command hints listed in the assistant dialog for this mode
    pub fn command_hints(self) -> Vec<&'static str> {
        match self {
            Mode::AssistantAI => AI_COMMANDS.to_vec(),
            Mode::Child => CHILD_COMMANDS.to_vec(),
            Mode::Adult => BASE_COMMANDS
                .iter()
                .chain(ADULT_EXTRA_COMMANDS)
                .copied()
                .collect(),
            Mode::Standard => BASE_COMMANDS.to_vec(),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "standard" => Ok(Mode::Standard),
            "ai" => Ok(Mode::AssistantAI),
            "child" => Ok(Mode::Child),
            "adult" => Ok(Mode::Adult),
            other => Err(format!("unknown assistant mode: {}", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone)]
pub struct ClassificationInput {
    pub text: String,
    pub mode: Mode,
    /// Balance of the active card, `None` when no card is active
    pub balance: Option<f64>,
}

impl ClassificationInput {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        Self {
            text: text.into(),
            mode,
            balance: None,
        }
    }

    pub fn with_balance(mut self, balance: Option<f64>) -> Self {
        self.balance = balance;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub response: String,
}

/// Ordered (keywords, intent) rules. Static, first match wins.
const RULES: &[(&[&str], Intent)] = &[
    (&["перевод", "отправить"], Intent::NavigateTransfer),
    (&["кредит"], Intent::NavigateCredit),
    (&["баланс", "сколько денег"], Intent::ReportBalance),
    (&["инвестиц"], Intent::NavigateInvestments),
    (&["история", "покупал"], Intent::NavigateHistory),
    (&["помощь", "что умеешь", "помоги"], Intent::ShowHelp),
    (&["горячая линия", "позвонить"], Intent::PlaceCall),
    (&["карт"], Intent::NavigateCards),
];

/// Command interpreter
pub struct CommandInterpreter;

impl CommandInterpreter {
    /// Classify a command and phrase the response for the active mode
    pub fn classify(input: &ClassificationInput) -> ClassificationResult {
        let intent = Self::match_intent(&input.text);

        ClassificationResult {
            intent,
            response: respond(intent, input.mode, input.balance),
        }
    }

    /// Intent only; independent of mode
    pub fn match_intent(text: &str) -> Intent {
        let text = text.to_lowercase();

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| text.contains(*kw)))
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Unrecognized)
    }
}

fn respond(intent: Intent, mode: Mode, balance: Option<f64>) -> String {
    let child = mode == Mode::Child;

    match intent {
        Intent::NavigateTransfer => "Открываю раздел переводов".to_string(),
        Intent::NavigateCredit => "Открываю раздел кредитов".to_string(),
        Intent::NavigateInvestments => "Открываю раздел инвестиций".to_string(),
        Intent::NavigateHistory => "Показываю историю операций".to_string(),
        Intent::NavigateCards => "Открываю ваши карты".to_string(),
        Intent::PlaceCall => "Звоню на горячую линию...".to_string(),
        Intent::ReportBalance => match (balance, child) {
            (Some(b), false) => format!("Ваш баланс: {:.2} ₽", b),
            (Some(b), true) => format!("У тебя на карте {:.2} ₽ 💰", b),
            (None, false) => "Нет активной карты".to_string(),
            (None, true) => "Ой, у тебя пока нет карты 🙈".to_string(),
        },
        Intent::ShowHelp if child => {
            "Я умею: говорить, сколько у тебя денег, отправлять деньги маме и показывать, что ты покупал 🎈"
                .to_string()
        }
        Intent::ShowHelp => {
            "Я могу: переводить деньги, показывать баланс, оформлять кредиты, звонить на горячую линию"
                .to_string()
        }
        Intent::Unrecognized if child => {
            "Я не понял 🙈 Скажи \"помоги\", и я расскажу, что умею".to_string()
        }
        Intent::Unrecognized => {
            "Команда не распознана. Скажите \"помощь\" чтобы узнать, что я умею".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str, mode: Mode) -> ClassificationResult {
        CommandInterpreter::classify(&ClassificationInput::new(text, mode))
    }

    #[test]
    fn test_transfer_keyword_anywhere_any_case() {
        let cases = vec![
            "перевод",
            "Сделай ПЕРЕВОД маме",
            "хочу переводы посмотреть",
            "ПеРеВоД",
        ];

        for c in cases {
            for mode in Mode::ALL {
                assert_eq!(classify(c, mode).intent, Intent::NavigateTransfer, "{}", c);
            }
        }
    }

    #[test]
    fn test_each_rule() {
        let cases = vec![
            ("отправить деньги", Intent::NavigateTransfer),
            ("оформи кредит на 50000", Intent::NavigateCredit),
            ("какой баланс", Intent::ReportBalance),
            ("сколько денег у меня", Intent::ReportBalance),
            ("инвестиции", Intent::NavigateInvestments),
            ("история", Intent::NavigateHistory),
            ("что я покупал", Intent::NavigateHistory),
            ("помоги", Intent::ShowHelp),
            ("что умеешь?", Intent::ShowHelp),
            ("горячая линия", Intent::PlaceCall),
            ("позвонить в банк", Intent::PlaceCall),
            ("мои карты", Intent::NavigateCards),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(text, Mode::Standard).intent, expected, "{}", text);
        }
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify("перевод кредит", Mode::Standard).intent, Intent::NavigateTransfer);
        assert_eq!(classify("кредит перевод", Mode::Standard).intent, Intent::NavigateTransfer);
        assert_eq!(classify("баланс кредитной карты", Mode::Standard).intent, Intent::NavigateCredit);
        assert_eq!(classify("баланс карты", Mode::Standard).intent, Intent::ReportBalance);
        assert_eq!(classify("помощь с картой", Mode::Standard).intent, Intent::ShowHelp);
    }

    #[test]
    fn test_case_insensitive_help() {
        assert_eq!(classify("ПОМОЩЬ", Mode::Standard).intent, Intent::ShowHelp);
    }

    #[test]
    fn test_empty_and_unknown_are_unrecognized() {
        for mode in Mode::ALL {
            assert_eq!(classify("", mode).intent, Intent::Unrecognized);
            assert_eq!(classify("что-то случайное", mode).intent, Intent::Unrecognized);
        }
    }

    #[test]
    fn test_substring_matching_inside_other_words() {
        // "карт" inside "картошка" still routes to cards
        assert_eq!(classify("купи картошку", Mode::Standard).intent, Intent::NavigateCards);
    }

    #[test]
    fn test_mode_never_changes_intent() {
        let texts = ["баланс", "помоги", "перевод", "ерунда", "", "карта", "позвонить"];

        for text in texts {
            let child = classify(text, Mode::Child);
            let adult = classify(text, Mode::Adult);
            assert_eq!(child.intent, adult.intent, "{}", text);
        }
    }

    #[test]
    fn test_balance_formatting() {
        let input = ClassificationInput::new("баланс", Mode::Standard).with_balance(Some(1234.5));
        let result = CommandInterpreter::classify(&input);

        assert_eq!(result.intent, Intent::ReportBalance);
        assert!(result.response.contains("1234.50"));

        let child = CommandInterpreter::classify(
            &ClassificationInput::new("сколько денег", Mode::Child).with_balance(Some(10.0)),
        );
        assert!(child.response.contains("10.00"));
        assert_ne!(child.response, CommandInterpreter::classify(
            &ClassificationInput::new("сколько денег", Mode::Adult).with_balance(Some(10.0)),
        ).response);
    }

    #[test]
    fn test_balance_without_active_card() {
        let result = classify("баланс", Mode::Standard);
        assert_eq!(result.response, "Нет активной карты");
    }

    #[test]
    fn test_child_phrasing_differs_for_help_and_fallback() {
        assert_ne!(classify("помощь", Mode::Child).response, classify("помощь", Mode::Standard).response);
        assert_ne!(classify("???", Mode::Child).response, classify("???", Mode::AssistantAI).response);
        assert_eq!(classify("???", Mode::Adult).response, classify("???", Mode::Standard).response);
    }

    #[test]
    fn test_target_tabs() {
        assert_eq!(Intent::NavigateTransfer.target_tab(), Some(Tab::Transfer));
        assert_eq!(Intent::NavigateCards.target_tab(), Some(Tab::Cards));
        assert_eq!(Intent::ReportBalance.target_tab(), None);
        assert_eq!(Intent::Unrecognized.target_tab(), None);
    }

    #[test]
    fn test_mode_parsing_and_hints() {
        assert_eq!("ai".parse::<Mode>(), Ok(Mode::AssistantAI));
        assert_eq!("NORMAL".parse::<Mode>(), Ok(Mode::Standard));
        assert!("robot".parse::<Mode>().is_err());

        assert_eq!(Mode::Standard.command_hints().len(), 4);
        assert_eq!(Mode::Adult.command_hints().len(), 8);
        assert!(Mode::Child.command_hints()[0].contains("Сколько денег"));
    }

    #[test]
    fn test_config_and_json_accept_same_mode_names() {
        for name in ["normal", "standard", "ai", "child", "adult"] {
            let parsed: Mode = name.parse().unwrap();
            let decoded: Mode = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(parsed, decoded, "{}", name);
        }

        assert_eq!(serde_json::to_value(Mode::Standard).unwrap(), "normal");
        assert!(serde_json::from_value::<Mode>(serde_json::json!("robot")).is_err());
    }
}
