//! Speech-completion autonavigation: poll the speech engine, detect the
//! moment narration ends, and advance after a grace delay.
//!
//! Detection is sampling-based by contract: the monitor reads
//! `is_speaking()` once per poll interval and reacts to the observed
//! speaking-to-silent transition. An utterance shorter than the poll
//! interval can start and finish between two polls and is never observed,
//! so no advance fires for it.

use voicegrid_speech::SharedSpeech;

/// Timing configuration for the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoNavConfig {
    /// How often `is_speaking()` is sampled.
    pub poll_interval_ms: u32,
    /// Grace delay between observed silence and the advance.
    pub post_silence_delay_ms: u32,
}

impl Default for AutoNavConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            post_silence_delay_ms: 2000,
        }
    }
}

/// Advance action invoked when narration has finished.
pub type AdvanceFn = Box<dyn FnMut()>;

/// Polls the speech engine and triggers hands-free advancement.
///
/// Owned by one screen and driven from the host loop via [`tick`].
/// Dropping the monitor, or calling [`stop`], cancels the poll and any
/// pending grace delay synchronously: no advance fires afterwards.
///
/// [`tick`]: AutoNavMonitor::tick
/// [`stop`]: AutoNavMonitor::stop
pub struct AutoNavMonitor {
    speech: SharedSpeech,
    config: AutoNavConfig,
    on_advance: Option<AdvanceFn>,
    enabled: bool,
    last_speaking: bool,
    poll_elapsed_ms: u32,
    /// Remaining grace delay once a falling edge has been observed. At
    /// most one delay is pending at a time; a new edge observed while one
    /// is pending is ignored.
    pending_delay_ms: Option<u32>,
}

impl AutoNavMonitor {
    pub fn new(speech: SharedSpeech, config: AutoNavConfig) -> Self {
        Self {
            speech,
            config: AutoNavConfig {
                poll_interval_ms: config.poll_interval_ms.max(1),
                post_silence_delay_ms: config.post_silence_delay_ms,
            },
            on_advance: None,
            enabled: false,
            last_speaking: false,
            poll_elapsed_ms: 0,
            pending_delay_ms: None,
        }
    }

    /// Begin monitoring with the given advance action.
    ///
    /// `last_speaking` starts false, so a monitor started while narration
    /// is already in progress will not fire until it observes a fresh
    /// speaking-to-silent transition of its own.
    pub fn start(&mut self, on_advance: AdvanceFn) {
        self.on_advance = Some(on_advance);
        self.enabled = true;
        self.last_speaking = false;
        self.poll_elapsed_ms = 0;
        self.pending_delay_ms = None;
    }

    /// Stop monitoring and cancel any pending advance synchronously.
    pub fn stop(&mut self) {
        self.enabled = false;
        self.poll_elapsed_ms = 0;
        self.pending_delay_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.enabled
    }

    /// Whether a grace delay is counting down.
    pub fn advance_pending(&self) -> bool {
        self.pending_delay_ms.is_some()
    }

    /// Advance time by `dt_ms`.
    ///
    /// A delay armed on an earlier tick counts down first (it is an
    /// independent one-shot timer, not tied to the poll cadence), then as
    /// many polls run as the accumulated time covers.
    pub fn tick(&mut self, dt_ms: u32) {
        if !self.enabled {
            return;
        }

        if let Some(remaining) = self.pending_delay_ms {
            let remaining = remaining.saturating_sub(dt_ms);
            if remaining == 0 {
                self.pending_delay_ms = None;
                if let Some(on_advance) = self.on_advance.as_mut() {
                    on_advance();
                }
            } else {
                self.pending_delay_ms = Some(remaining);
            }
        }

        self.poll_elapsed_ms += dt_ms;
        while self.poll_elapsed_ms >= self.config.poll_interval_ms {
            self.poll_elapsed_ms -= self.config.poll_interval_ms;
            self.poll();
        }
    }

    fn poll(&mut self) {
        let speaking = self.speech.borrow().is_speaking();
        if self.last_speaking && !speaking && self.pending_delay_ms.is_none() {
            log::debug!("autonav: narration ended, arming advance delay");
            self.pending_delay_ms = Some(self.config.post_silence_delay_ms);
        }
        // Updated on every poll, not just on edges.
        self.last_speaking = speaking;
    }
}
