//! Speech capability
//!
//! Speech recognition and synthesis are injected capabilities. The
//! interpreter never sees them; the dashboard pulls transcripts from
//! `start_listening` and feeds each one through the command path.

use crate::error::AssistantError;
use crate::Result;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// Recognition language for transcription and synthesis
pub const SPEECH_LANG: &str = "ru-RU";

/// Lazy, finite stream of transcribed utterances
pub type Transcripts<'a> = Box<dyn Iterator<Item = String> + Send + 'a>;

pub trait SpeechCapability: Send + Sync {
    /// Start a recognition session. Fails when recognition is unsupported.
    fn start_listening(&self) -> Result<Transcripts<'_>>;

    fn speak(&self, text: &str) -> Result<()>;
}

/// No speech support at all, like a browser without the recognition API
pub struct UnsupportedSpeech;

impl SpeechCapability for UnsupportedSpeech {
    fn start_listening(&self) -> Result<Transcripts<'_>> {
        Err(AssistantError::SpeechUnavailable(
            "speech recognition is not available".to_string(),
        ))
    }

    fn speak(&self, _text: &str) -> Result<()> {
        Err(AssistantError::SpeechUnavailable(
            "speech synthesis is not available".to_string(),
        ))
    }
}

/// Replays canned transcripts and records everything spoken
#[derive(Default)]
pub struct ScriptedSpeech {
    transcripts: Mutex<VecDeque<String>>,
    spoken: Mutex<Vec<String>>,
}

impl ScriptedSpeech {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: Mutex::new(transcripts.into_iter().map(Into::into).collect()),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Utterances passed to `speak`, oldest first
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SpeechCapability for ScriptedSpeech {
    fn start_listening(&self) -> Result<Transcripts<'_>> {
        let pending: Vec<String> = self
            .transcripts
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default();

        Ok(Box::new(pending.into_iter()))
    }

    fn speak(&self, text: &str) -> Result<()> {
        debug!(lang = SPEECH_LANG, text, "speak");
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(text.to_string());
        }
        Ok(())
    }
}

/// Console stand-in: stdin lines are transcripts, speech goes to stdout
pub struct ConsoleSpeech;

impl SpeechCapability for ConsoleSpeech {
    fn start_listening(&self) -> Result<Transcripts<'_>> {
        let stdin = std::io::stdin();
        let lines = std::iter::from_fn(move || {
            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(line.trim().to_string()),
            }
        })
        .take_while(|line| line != "выход" && line != "exit");

        Ok(Box::new(lines))
    }

    fn speak(&self, text: &str) -> Result<()> {
        println!("🔊 {}", text);
        Ok(())
    }
}
