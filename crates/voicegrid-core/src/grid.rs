//! 3x3 grid controller: spatial selection and the input-mode state machine.
//!
//! Every screen binds up to nine actions onto a fixed row-major 3x3 grid
//! (indices 0-2 row 0, 3-5 row 1, 6-8 row 2). The controller turns raw
//! input events into at most one command emission per user intent, keeps
//! the keyboard highlight spatially coherent, and confirms every move and
//! activation through the speech seam.

use voicegrid_speech::{SharedSpeech, SpeakOptions, say};
use voicegrid_types::input::{Direction, InputEvent, Key};

/// Number of grid columns.
pub const GRID_COLS: usize = 3;
/// Total slot count on a screen.
pub const SLOT_COUNT: usize = 9;

/// Spoken when the controller arms keyboard mode.
const KEYBOARD_MODE_HELP: &str =
    "キーボードモードに切り替えました。矢印キーで移動、Enterで選択、Escapeで音声読み上げ停止";
/// Spoken acknowledgment for Escape.
const CANCEL_NOTICE: &str = "操作を停止しました";

/// One action bound to a grid slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAction<C> {
    /// Spoken and displayed label.
    pub label: String,
    /// Command emitted when the slot is activated.
    pub command: C,
}

impl<C> GridAction<C> {
    pub fn new(label: impl Into<String>, command: C) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

/// Which input device currently drives the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Touch / mouse: select-and-activate taps, no persistent highlight.
    #[default]
    Pointer,
    /// Arrow-key navigation with a highlighted slot.
    Keyboard,
}

/// 3x3 selection state and input dispatch for one screen.
///
/// Activation never runs the bound behavior directly; it emits the slot's
/// command value exactly once, and the hosting screen dispatches it. That
/// keeps re-entrant mutation of screen state impossible by construction.
pub struct GridController<C> {
    actions: Vec<GridAction<C>>,
    selected: Option<usize>,
    mode: InputMode,
    speech: SharedSpeech,
}

impl<C: Clone> GridController<C> {
    /// Create a controller for a freshly mounted screen: pointer mode,
    /// nothing highlighted, no actions bound yet.
    pub fn new(speech: SharedSpeech) -> Self {
        Self {
            actions: Vec::new(),
            selected: None,
            mode: InputMode::Pointer,
            speech,
        }
    }

    /// Replace the bound action set.
    ///
    /// Screens recompute their actions reactively (labels reflect state),
    /// so the highlight survives a rebind. Anything past the ninth action
    /// is dropped.
    pub fn set_actions(&mut self, mut actions: Vec<GridAction<C>>) {
        if actions.len() > SLOT_COUNT {
            log::debug!(
                "grid: dropping {} actions beyond slot {SLOT_COUNT}",
                actions.len() - SLOT_COUNT
            );
            actions.truncate(SLOT_COUNT);
        }
        self.actions = actions;
    }

    pub fn actions(&self) -> &[GridAction<C>] {
        &self.actions
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Handle one input event. Events are processed strictly in arrival
    /// order; there is no batching.
    ///
    /// Returns the command of the slot this event activated, if any.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<C> {
        match event {
            InputEvent::Key(key) => self.handle_key(*key),
            InputEvent::PointerActivate { index } => self.activate_slot(*index),
            InputEvent::TouchStart => {
                self.touch_start();
                None
            },
            InputEvent::Quit => None,
        }
    }

    /// Handle a key press.
    ///
    /// The first key received in pointer mode only arms keyboard mode:
    /// the highlight lands on slot 0, the help message is spoken, and the
    /// key itself is consumed. The user must press again to move or
    /// activate.
    pub fn handle_key(&mut self, key: Key) -> Option<C> {
        if self.mode != InputMode::Keyboard {
            self.mode = InputMode::Keyboard;
            self.selected = Some(0);
            say(&self.speech, KEYBOARD_MODE_HELP, &SpeakOptions::default());
            return None;
        }

        if let Some(dir) = key.direction() {
            self.move_selection(dir);
            return None;
        }
        match key {
            Key::Confirm => self.activate_selected(),
            Key::Cancel => {
                self.cancel();
                None
            },
            Key::Digit(n) => self.press_digit(n),
            // Arrows were handled above.
            _ => None,
        }
    }

    /// Move the highlight one slot in `dir`, announcing the destination.
    ///
    /// Moves that would leave the 3x3 grid or land past the bound action
    /// list are silent no-ops. Movement never activates anything.
    pub fn move_selection(&mut self, dir: Direction) {
        let Some(current) = self.selected else {
            return;
        };
        let candidate = match dir {
            Direction::Right if current % GRID_COLS < GRID_COLS - 1 => current + 1,
            Direction::Left if current % GRID_COLS > 0 => current - 1,
            Direction::Down if current < SLOT_COUNT - GRID_COLS => current + GRID_COLS,
            Direction::Up if current >= GRID_COLS => current - GRID_COLS,
            _ => return,
        };
        if candidate >= self.actions.len() {
            return;
        }
        self.selected = Some(candidate);
        self.announce_slot(candidate);
    }

    /// Activate the slot at `index` (pointer tap or digit key): highlight
    /// it, announce it, and emit its command once.
    ///
    /// Empty and out-of-range slots are ignored.
    pub fn activate_slot(&mut self, index: usize) -> Option<C> {
        if index >= self.actions.len() {
            return None;
        }
        self.selected = Some(index);
        self.announce_slot(index);
        Some(self.actions[index].command.clone())
    }

    /// Activate the highlighted slot (Enter / Space).
    pub fn activate_selected(&mut self) -> Option<C> {
        self.activate_slot(self.selected?)
    }

    /// Digit 1-9: direct select-and-activate of the matching slot.
    pub fn press_digit(&mut self, digit: u8) -> Option<C> {
        if !(1..=9).contains(&digit) {
            return None;
        }
        self.activate_slot(digit as usize - 1)
    }

    /// Escape: stop narration, then acknowledge aloud. The highlight is
    /// unchanged.
    pub fn cancel(&mut self) {
        if let Err(err) = self.speech.borrow_mut().stop() {
            log::warn!("speech engine rejected stop: {err}");
        }
        say(&self.speech, CANCEL_NOTICE, &SpeakOptions::interrupting());
    }

    /// A touch began: revert to pointer mode with a blank highlight.
    pub fn touch_start(&mut self) {
        self.mode = InputMode::Pointer;
        self.selected = None;
    }

    fn announce_slot(&self, index: usize) {
        let text = format!("{}番、{}", index + 1, self.actions[index].label);
        say(&self.speech, &text, &SpeakOptions::default());
    }
}
