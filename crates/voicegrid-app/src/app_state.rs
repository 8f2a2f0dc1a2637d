//! Application state: shared services and the screen stack.

use voicegrid_speech::{SharedSpeech, SpeakOptions, say};
use voicegrid_types::config::VoiceGridConfig;
use voicegrid_types::input::InputEvent;

use crate::catalog::BuiltinCatalog;
use crate::screens::{HomeScreen, Screen, Transition};
use crate::storage::{RecordStore, TomlFileStore};

/// Long-lived collaborators shared by every screen.
pub struct AppServices {
    pub speech: SharedSpeech,
    pub catalog: BuiltinCatalog,
    pub store: TomlFileStore,
    pub config: VoiceGridConfig,
    pub rng: fastrand::Rng,
}

impl AppServices {
    /// Persist the current settings record. A failing store is reported
    /// in the log but never interrupts navigation.
    pub fn persist_config(&self) {
        if let Err(err) = self.store.save(&self.config) {
            log::warn!("failed to persist settings: {err}");
        }
    }
}

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// The running application: services plus the screen stack. The topmost
/// screen receives input and ticks; screens below are suspended.
pub struct App {
    services: AppServices,
    screens: Vec<Screen>,
}

impl App {
    pub fn new(services: AppServices) -> Self {
        let home = Screen::Home(HomeScreen::new(&services));
        Self {
            services,
            screens: vec![home],
        }
    }

    /// The title of the screen currently receiving input.
    pub fn active_title(&self) -> String {
        self.screens
            .last()
            .map(Screen::title)
            .unwrap_or_else(|| "ホーム".to_string())
    }

    pub fn services(&self) -> &AppServices {
        &self.services
    }

    /// Route one input event to the active screen and apply the
    /// resulting transition.
    pub fn handle_event(&mut self, event: &InputEvent) -> InputResult {
        if matches!(event, InputEvent::Quit) {
            return InputResult::Quit;
        }
        let Some(screen) = self.screens.last_mut() else {
            return InputResult::Quit;
        };
        match screen.handle_event(event, &mut self.services) {
            Transition::None => InputResult::Continue,
            Transition::Push(next) => {
                log::debug!("screen push: {}", next.title());
                self.screens.push(next);
                InputResult::Continue
            },
            Transition::Back => {
                self.pop_screen();
                InputResult::Continue
            },
            Transition::Quit => InputResult::Quit,
        }
    }

    /// Advance time on the active screen only.
    pub fn tick(&mut self, dt_ms: u32) {
        if let Some(screen) = self.screens.last_mut() {
            screen.tick(dt_ms);
        }
    }

    /// Tear down every screen (process exit).
    pub fn shutdown(&mut self) {
        for screen in &mut self.screens {
            screen.teardown();
        }
    }

    fn pop_screen(&mut self) {
        if self.screens.len() <= 1 {
            return;
        }
        if let Some(mut old) = self.screens.pop() {
            // Cancel the departing screen's timers before the screen
            // below resumes.
            old.teardown();
            log::debug!("screen pop: {}", old.title());
        }
        let text = format!("{}に戻りました", self.active_title());
        say(&self.services.speech, &text, &SpeakOptions::interrupting());
    }
}
