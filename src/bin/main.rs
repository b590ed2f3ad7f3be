use otpk_assistant::{
    client::HttpBankApi,
    config::Config,
    dashboard::Dashboard,
    speech::{ConsoleSpeech, SpeechCapability},
    hotline::SupportTopic,
    Intent,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::from_env()?;
    let api = Arc::new(HttpBankApi::new(config.endpoints.clone(), config.http_timeout)?);
    let mut dashboard = Dashboard::new(api, config.mode, config.hotline_hold);

    info!(mode = %config.mode, "ОТПК Бот starting");

    // Optional sign-in so balance commands have an active card
    if let (Ok(phone), Ok(name)) = (std::env::var("BANK_PHONE"), std::env::var("BANK_NAME")) {
        println!("{}", dashboard.login(&phone, &name).await);
    }

    let mode = dashboard.state().mode;
    println!("=== ОТПК Бот ({}) ===", mode.display_name());
    for hint in mode.command_hints() {
        println!("{}", hint);
    }
    println!("{}  (\"выход\" to quit)", mode.placeholder());

    let speech = ConsoleSpeech;
    for text in speech.start_listening()? {
        if text.is_empty() {
            continue;
        }

        let reply = dashboard.handle_command(&text);
        println!("{}", reply.notification);

        if reply.intent == Intent::PlaceCall {
            println!("Ожидайте соединения...");
            println!("{}", dashboard.call_hotline(&speech).await);
            for topic in SupportTopic::ALL {
                println!("  • {}", topic.label());
            }
        }
    }

    println!("Active tab: {}", dashboard.state().active_tab());
    Ok(())
}
