//! Speech synthesis service seam.
//!
//! The engine treats text-to-speech as an opaque capability: queue an
//! utterance, stop everything, ask whether anything is still being spoken.
//! Front ends supply a real engine; tests use the doubles in [`test_utils`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use voicegrid_types::error::Result;

pub mod test_utils;

/// Delivery options for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakOptions {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Cancel anything queued or playing before starting this utterance.
    /// When unset the utterance queues after the current one.
    pub interrupt: bool,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            interrupt: false,
        }
    }
}

impl SpeakOptions {
    /// Options that cut off the current utterance.
    pub fn interrupting() -> Self {
        Self {
            interrupt: true,
            ..Self::default()
        }
    }
}

/// Abstraction over a speech synthesis engine.
///
/// Every utterance eventually terminates; `is_speaking` reports whether
/// anything is queued or audible right now.
pub trait SpeechService {
    /// Queue one utterance (or replace the queue when `interrupt` is set).
    fn speak(&mut self, text: &str, opts: &SpeakOptions) -> Result<()>;

    /// Cancel everything queued or playing.
    fn stop(&mut self) -> Result<()>;

    /// Whether anything is queued or audible right now.
    fn is_speaking(&self) -> bool;
}

/// Single-threaded shared handle to the active speech engine.
///
/// The whole engine runs on one event loop, so a plain `Rc<RefCell<..>>`
/// is the ownership model: screens, controllers, and monitors each hold a
/// handle and borrow only for the duration of a call.
pub type SharedSpeech = Rc<RefCell<dyn SpeechService>>;

/// Wrap an engine in a shared handle.
pub fn shared<S: SpeechService + 'static>(service: S) -> SharedSpeech {
    Rc::new(RefCell::new(service))
}

/// Speak through a shared handle, logging engine failures instead of
/// propagating them. Narration failures never break navigation.
pub fn say(speech: &SharedSpeech, text: &str, opts: &SpeakOptions) {
    if let Err(err) = speech.borrow_mut().speak(text, opts) {
        log::warn!("speech engine rejected utterance: {err}");
    }
}

/// Engine that discards all utterances (headless runs).
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechService for NullSpeech {
    fn speak(&mut self, _text: &str, _opts: &SpeakOptions) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

/// Engine that logs utterances instead of synthesizing them.
///
/// Desktop stand-in: real synthesis lives behind a platform front end.
/// Utterance duration is estimated from text length so that `is_speaking`
/// behaves like a real engine (queued utterances extend the busy window,
/// interrupts replace it).
#[derive(Debug, Default)]
pub struct LogSpeech {
    busy_until: Option<Instant>,
}

impl LogSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    fn estimate(text: &str, rate: f32) -> Duration {
        let chars = text.chars().count() as u64;
        let base_ms = (chars * 100).max(300);
        let rate = if rate > 0.0 { rate } else { 1.0 };
        Duration::from_millis((base_ms as f32 / rate) as u64)
    }
}

impl SpeechService for LogSpeech {
    fn speak(&mut self, text: &str, opts: &SpeakOptions) -> Result<()> {
        log::info!(target: "speech", "{text}");
        let now = Instant::now();
        let duration = Self::estimate(text, opts.rate);
        let start = if opts.interrupt {
            now
        } else {
            self.busy_until.filter(|&t| t > now).unwrap_or(now)
        };
        self.busy_until = Some(start + duration);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.busy_until = None;
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        self.busy_until.is_some_and(|t| Instant::now() < t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- SpeakOptions --

    #[test]
    fn default_options_do_not_interrupt() {
        let opts = SpeakOptions::default();
        assert!(!opts.interrupt);
        assert_eq!(opts.rate, 1.0);
        assert_eq!(opts.pitch, 1.0);
        assert_eq!(opts.volume, 1.0);
    }

    #[test]
    fn interrupting_options_set_flag_only() {
        let opts = SpeakOptions::interrupting();
        assert!(opts.interrupt);
        assert_eq!(opts.rate, 1.0);
    }

    // -- NullSpeech --

    #[test]
    fn null_speech_accepts_everything() {
        let mut s = NullSpeech;
        s.speak("こんにちは", &SpeakOptions::default()).unwrap();
        s.stop().unwrap();
        assert!(!s.is_speaking());
    }

    // -- LogSpeech --

    #[test]
    fn log_speech_is_busy_after_speak() {
        let mut s = LogSpeech::new();
        assert!(!s.is_speaking());
        s.speak("ながい読み上げテキストです", &SpeakOptions::default())
            .unwrap();
        assert!(s.is_speaking());
    }

    #[test]
    fn log_speech_stop_clears_busy_window() {
        let mut s = LogSpeech::new();
        s.speak("テキスト", &SpeakOptions::default()).unwrap();
        s.stop().unwrap();
        assert!(!s.is_speaking());
    }

    #[test]
    fn log_speech_queueing_extends_busy_window() {
        let mut s = LogSpeech::new();
        s.speak("ひとつめ", &SpeakOptions::default()).unwrap();
        let first = s.busy_until.unwrap();
        s.speak("ふたつめ", &SpeakOptions::default()).unwrap();
        assert!(s.busy_until.unwrap() > first);
    }

    #[test]
    fn log_speech_interrupt_replaces_queue() {
        let mut s = LogSpeech::new();
        s.speak(
            "とてもとてもとてもとてもながいはなし",
            &SpeakOptions::default(),
        )
        .unwrap();
        s.speak(
            "とてもとてもとてもとてもながいはなしのつづき",
            &SpeakOptions::default(),
        )
        .unwrap();
        let queued = s.busy_until.unwrap();
        s.speak("あ", &SpeakOptions::interrupting()).unwrap();
        assert!(s.busy_until.unwrap() < queued);
    }

    #[test]
    fn log_speech_estimate_scales_with_rate() {
        let slow = LogSpeech::estimate("あいうえおかきくけこ", 1.0);
        let fast = LogSpeech::estimate("あいうえおかきくけこ", 2.0);
        assert!(fast < slow);
    }

    #[test]
    fn log_speech_estimate_has_floor() {
        let d = LogSpeech::estimate("あ", 1.0);
        assert!(d >= Duration::from_millis(300));
    }

    // -- shared / say helpers --

    #[test]
    fn shared_handle_dispatches() {
        let speech = shared(NullSpeech);
        say(&speech, "テスト", &SpeakOptions::default());
        assert!(!speech.borrow().is_speaking());
    }
}
