//! OTPK Bank assistant core
//!
//! The client-side logic behind the "ОТПК Банк" demo dashboard:
//! - A pure command interpreter for the voice/chat assistant
//! - Explicit dashboard view state (session, cards, tabs, forms)
//! - Typed clients for the remote auth, cards, transactions and credit services
//! - Injected speech capability and a scripted hotline call
//! - Placeholder investment and credit rules
//!
//! COMMAND FLOW:
//! TEXT → CLASSIFY → INTENT → APPLY (tab / balance / call) → NOTIFY

pub mod api;
pub mod cards;
pub mod classifier;
pub mod client;
pub mod config;
pub mod credit;
pub mod dashboard;
pub mod error;
pub mod hotline;
pub mod investments;
pub mod models;
pub mod speech;
pub mod state;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{ClassificationInput, ClassificationResult, CommandInterpreter, Intent, Mode};
