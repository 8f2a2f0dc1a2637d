//! Test doubles for the speech seam.
//!
//! `RecordingSpeech` captures every call so tests can assert on
//! announcements; `ScriptedSpeech` plays back a canned `is_speaking`
//! sequence, one sample per query, for exercising poll-based detection.

use std::cell::Cell;

use voicegrid_types::error::Result;

use crate::{SpeakOptions, SpeechService};

/// Records every utterance and stop call.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    utterances: Vec<(String, SpeakOptions)>,
    stop_count: usize,
    speaking: bool,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded utterance texts, in order.
    pub fn spoken(&self) -> Vec<&str> {
        self.utterances.iter().map(|(t, _)| t.as_str()).collect()
    }

    /// The most recent utterance text.
    pub fn last(&self) -> Option<&str> {
        self.utterances.last().map(|(t, _)| t.as_str())
    }

    /// The options of the most recent utterance.
    pub fn last_options(&self) -> Option<&SpeakOptions> {
        self.utterances.last().map(|(_, o)| o)
    }

    /// Whether any recorded utterance contains `needle`.
    pub fn has_spoken(&self, needle: &str) -> bool {
        self.utterances.iter().any(|(t, _)| t.contains(needle))
    }

    pub fn utterance_count(&self) -> usize {
        self.utterances.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Force the `is_speaking` answer for subsequent queries.
    pub fn set_speaking(&mut self, speaking: bool) {
        self.speaking = speaking;
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.utterances.clear();
        self.stop_count = 0;
    }
}

impl SpeechService for RecordingSpeech {
    fn speak(&mut self, text: &str, opts: &SpeakOptions) -> Result<()> {
        self.utterances.push((text.to_string(), opts.clone()));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stop_count += 1;
        self.speaking = false;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.speaking
    }
}

/// Plays back a scripted `is_speaking` sequence, one sample per query.
///
/// Once the script is exhausted every further query answers `false`.
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    script: Vec<bool>,
    cursor: Cell<usize>,
    utterances: Vec<String>,
}

impl ScriptedSpeech {
    pub fn new(script: Vec<bool>) -> Self {
        Self {
            script,
            cursor: Cell::new(0),
            utterances: Vec::new(),
        }
    }

    /// How many `is_speaking` samples have been taken.
    pub fn samples_taken(&self) -> usize {
        self.cursor.get()
    }

    /// All recorded utterance texts, in order.
    pub fn spoken(&self) -> &[String] {
        &self.utterances
    }
}

impl SpeechService for ScriptedSpeech {
    fn speak(&mut self, text: &str, _opts: &SpeakOptions) -> Result<()> {
        self.utterances.push(text.to_string());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        self.script.get(i).copied().unwrap_or(false)
    }
}
