//! Screen stack: home, autoplay settings, autoplay player, and list
//! reader.
//!
//! Each screen owns its grid controller (and, where needed, its
//! autonavigation monitor or autoplay player). Navigating away tears the
//! screen down, which cancels every timer it owns; nothing can fire
//! against a screen that is no longer on top.

use voicegrid_core::autonav::{AutoNavConfig, AutoNavMonitor};
use voicegrid_core::autoplay::{AutoplayPlayer, ContentCatalog, build_playlist};
use voicegrid_core::grid::{GridAction, GridController};
use voicegrid_core::pager::Pager;
use voicegrid_speech::{SharedSpeech, SpeakOptions, say};
use voicegrid_types::content::{ContentItem, ContentKind};
use voicegrid_types::input::InputEvent;

use std::cell::RefCell;
use std::rc::Rc;

use crate::app_state::AppServices;

/// Playlist length for one autoplay session.
const PLAYLIST_LEN: usize = 20;
/// Per-item play durations cycled by the settings screen, in minutes.
const DURATION_CHOICES: &[u32] = &[5, 10, 15];

/// What a screen wants the stack to do after handling an event.
pub enum Transition {
    None,
    Push(Screen),
    Back,
    Quit,
}

/// The active screens, top of the stack receiving input.
pub enum Screen {
    Home(HomeScreen),
    Settings(SettingsScreen),
    Autoplay(AutoplayScreen),
    Reader(ReaderScreen),
}

impl Screen {
    /// Spoken name, used when returning to a screen.
    pub fn title(&self) -> String {
        match self {
            Self::Home(_) => "ホーム".to_string(),
            Self::Settings(_) => "おまかせモード設定".to_string(),
            Self::Autoplay(_) => "おまかせモード".to_string(),
            Self::Reader(screen) => format!("{}の一覧", screen.kind.display_name()),
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, services: &mut AppServices) -> Transition {
        match self {
            Self::Home(screen) => screen.handle_event(event, services),
            Self::Settings(screen) => screen.handle_event(event, services),
            Self::Autoplay(screen) => screen.handle_event(event, services),
            Self::Reader(screen) => screen.handle_event(event, services),
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        match self {
            Self::Home(_) | Self::Settings(_) => {},
            Self::Autoplay(screen) => screen.player.tick(dt_ms),
            Self::Reader(screen) => screen.autonav.tick(dt_ms),
        }
    }

    /// Cancel every timer the screen owns. Safe to call twice.
    pub fn teardown(&mut self) {
        match self {
            Self::Home(_) | Self::Settings(_) => {},
            Self::Autoplay(screen) => screen.player.shutdown(),
            Self::Reader(screen) => screen.autonav.stop(),
        }
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCommand {
    AutoplaySettings,
    Read(ContentKind),
    AnnounceSettings,
    Help,
    Quit,
}

pub struct HomeScreen {
    grid: GridController<HomeCommand>,
}

impl HomeScreen {
    pub fn new(services: &AppServices) -> Self {
        let mut grid = GridController::new(Rc::clone(&services.speech));
        grid.set_actions(vec![
            GridAction::new("おまかせモード", HomeCommand::AutoplaySettings),
            GridAction::new("小説", HomeCommand::Read(ContentKind::Novel)),
            GridAction::new("Podcast", HomeCommand::Read(ContentKind::Podcast)),
            GridAction::new("ラジオ", HomeCommand::Read(ContentKind::Radio)),
            GridAction::new("RSSニュース", HomeCommand::Read(ContentKind::RssNews)),
            GridAction::new(
                "はてなブックマーク",
                HomeCommand::Read(ContentKind::Hatena),
            ),
            GridAction::new("現在の設定", HomeCommand::AnnounceSettings),
            GridAction::new("ヘルプ", HomeCommand::Help),
            GridAction::new("終了", HomeCommand::Quit),
        ]);
        say(
            &services.speech,
            "ホーム画面です。1から9の番号で項目を選べます",
            &SpeakOptions::default(),
        );
        Self { grid }
    }

    fn handle_event(&mut self, event: &InputEvent, services: &mut AppServices) -> Transition {
        let Some(command) = self.grid.handle_event(event) else {
            return Transition::None;
        };
        match command {
            HomeCommand::AutoplaySettings => {
                Transition::Push(Screen::Settings(SettingsScreen::new(services)))
            },
            HomeCommand::Read(kind) => {
                Transition::Push(Screen::Reader(ReaderScreen::new(kind, services)))
            },
            HomeCommand::AnnounceSettings => {
                let autoplay = &services.config.autoplay;
                let shuffle = if autoplay.shuffle { "有効" } else { "無効" };
                let text = format!(
                    "おまかせモードは{}種類のコンテンツが有効、再生時間は{}分、シャッフルは{}です",
                    autoplay.enabled_kinds.len(),
                    autoplay.play_duration_mins,
                    shuffle,
                );
                say(&services.speech, &text, &SpeakOptions::default());
                Transition::None
            },
            HomeCommand::Help => {
                say(
                    &services.speech,
                    "矢印キーで移動、Enterで選択、数字キーで直接選択、Escapeで読み上げ停止です",
                    &SpeakOptions::default(),
                );
                Transition::None
            },
            HomeCommand::Quit => Transition::Quit,
        }
    }
}

// ---------------------------------------------------------------------------
// Autoplay settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Back,
    Toggle(ContentKind),
    CycleDuration,
    ToggleShuffle,
    Start,
}

pub struct SettingsScreen {
    grid: GridController<SettingsCommand>,
}

impl SettingsScreen {
    pub fn new(services: &AppServices) -> Self {
        let mut screen = Self {
            grid: GridController::new(Rc::clone(&services.speech)),
        };
        screen.rebuild_actions(services);
        let text = format!(
            "おまかせモード設定。再生するコンテンツの種類を選択してください。現在、{}種類が有効です",
            services.config.autoplay.enabled_kinds.len(),
        );
        say(&services.speech, &text, &SpeakOptions::default());
        screen
    }

    /// Labels reflect the live settings, so the grid is rebound after
    /// every mutation. The controller keeps the highlight in place.
    fn rebuild_actions(&mut self, services: &AppServices) {
        let autoplay = &services.config.autoplay;
        let on_off = |kind| if autoplay.is_enabled(kind) { "ON" } else { "OFF" };
        let shuffle = if autoplay.shuffle { "ON" } else { "OFF" };
        self.grid.set_actions(vec![
            GridAction::new("戻る", SettingsCommand::Back),
            GridAction::new(
                format!("小説：{}", on_off(ContentKind::Novel)),
                SettingsCommand::Toggle(ContentKind::Novel),
            ),
            GridAction::new(
                format!("Podcast：{}", on_off(ContentKind::Podcast)),
                SettingsCommand::Toggle(ContentKind::Podcast),
            ),
            GridAction::new(
                format!("ラジオ：{}", on_off(ContentKind::Radio)),
                SettingsCommand::Toggle(ContentKind::Radio),
            ),
            GridAction::new(
                format!("ニュース：{}", on_off(ContentKind::RssNews)),
                SettingsCommand::Toggle(ContentKind::RssNews),
            ),
            GridAction::new(
                format!("はてな：{}", on_off(ContentKind::Hatena)),
                SettingsCommand::Toggle(ContentKind::Hatena),
            ),
            GridAction::new(
                format!("再生時間：{}分", autoplay.play_duration_mins),
                SettingsCommand::CycleDuration,
            ),
            GridAction::new(
                format!("シャッフル：{shuffle}"),
                SettingsCommand::ToggleShuffle,
            ),
            GridAction::new("おまかせ開始", SettingsCommand::Start),
        ]);
    }

    fn handle_event(&mut self, event: &InputEvent, services: &mut AppServices) -> Transition {
        let Some(command) = self.grid.handle_event(event) else {
            return Transition::None;
        };
        match command {
            SettingsCommand::Back => Transition::Back,
            SettingsCommand::Toggle(kind) => {
                let now_on = services.config.autoplay.toggle(kind);
                let text = if now_on {
                    format!("{}を有効にしました", kind.display_name())
                } else {
                    format!("{}を無効にしました", kind.display_name())
                };
                say(&services.speech, &text, &SpeakOptions::default());
                services.persist_config();
                self.rebuild_actions(services);
                Transition::None
            },
            SettingsCommand::CycleDuration => {
                let current = services.config.autoplay.play_duration_mins;
                let pos = DURATION_CHOICES.iter().position(|&d| d == current);
                let next = DURATION_CHOICES
                    [pos.map_or(0, |p| (p + 1) % DURATION_CHOICES.len())];
                services.config.autoplay.play_duration_mins = next;
                say(
                    &services.speech,
                    &format!("各コンテンツの再生時間を{next}分に設定しました"),
                    &SpeakOptions::default(),
                );
                services.persist_config();
                self.rebuild_actions(services);
                Transition::None
            },
            SettingsCommand::ToggleShuffle => {
                services.config.autoplay.shuffle = !services.config.autoplay.shuffle;
                let text = if services.config.autoplay.shuffle {
                    "シャッフル再生を有効にしました"
                } else {
                    "シャッフル再生を無効にしました"
                };
                say(&services.speech, text, &SpeakOptions::default());
                services.persist_config();
                self.rebuild_actions(services);
                Transition::None
            },
            SettingsCommand::Start => {
                if services.config.autoplay.enabled_kinds.is_empty() {
                    say(
                        &services.speech,
                        "再生するコンテンツが選択されていません",
                        &SpeakOptions::default(),
                    );
                    return Transition::None;
                }
                Transition::Push(Screen::Autoplay(AutoplayScreen::new(services)))
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Autoplay player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayCommand {
    Back,
    Prev,
    Next,
    TogglePlay,
    Open,
    Status,
    Playlist,
    StopSpeech,
    Remaining,
}

pub struct AutoplayScreen {
    grid: GridController<AutoplayCommand>,
    player: AutoplayPlayer,
}

impl AutoplayScreen {
    pub fn new(services: &mut AppServices) -> Self {
        let playlist = build_playlist(
            &services.config.autoplay,
            &services.catalog,
            PLAYLIST_LEN,
            &mut services.rng,
        );
        let mut player = AutoplayPlayer::new(
            Rc::clone(&services.speech),
            playlist,
            services.config.autoplay.per_item_secs(),
        );
        player.start();
        let mut screen = Self {
            grid: GridController::new(Rc::clone(&services.speech)),
            player,
        };
        screen.rebuild_actions();
        screen
    }

    fn rebuild_actions(&mut self) {
        let play_label = if self.player.is_playing() {
            "一時停止"
        } else {
            "再生"
        };
        self.grid.set_actions(vec![
            GridAction::new("戻る", AutoplayCommand::Back),
            GridAction::new("前へ", AutoplayCommand::Prev),
            GridAction::new("次へ", AutoplayCommand::Next),
            GridAction::new(play_label, AutoplayCommand::TogglePlay),
            GridAction::new("開く", AutoplayCommand::Open),
            GridAction::new("現在の情報", AutoplayCommand::Status),
            GridAction::new("プレイリスト", AutoplayCommand::Playlist),
            GridAction::new("停止", AutoplayCommand::StopSpeech),
            GridAction::new("残り時間", AutoplayCommand::Remaining),
        ]);
    }

    fn handle_event(&mut self, event: &InputEvent, services: &mut AppServices) -> Transition {
        let Some(command) = self.grid.handle_event(event) else {
            return Transition::None;
        };
        match command {
            AutoplayCommand::Back => {
                self.player.shutdown();
                Transition::Back
            },
            AutoplayCommand::Prev => {
                self.player.retreat();
                Transition::None
            },
            AutoplayCommand::Next => {
                self.player.advance();
                Transition::None
            },
            AutoplayCommand::TogglePlay => {
                self.player.toggle_play();
                self.rebuild_actions();
                Transition::None
            },
            AutoplayCommand::Open => {
                let mut target: Option<ContentItem> = None;
                self.player.open_current(&mut |item| target = Some(item.clone()));
                match target {
                    Some(item) => {
                        log::info!("opening {:?} content: {}", item.kind, item.title);
                        Transition::Push(Screen::Reader(ReaderScreen::focused_on(
                            &item, services,
                        )))
                    },
                    None => Transition::None,
                }
            },
            AutoplayCommand::Status => {
                self.player.announce_status();
                Transition::None
            },
            AutoplayCommand::Playlist => {
                self.player.announce_playlist();
                Transition::None
            },
            AutoplayCommand::StopSpeech => {
                if let Err(err) = services.speech.borrow_mut().stop() {
                    log::warn!("speech engine rejected stop: {err}");
                }
                Transition::None
            },
            AutoplayCommand::Remaining => {
                self.player.announce_remaining();
                Transition::None
            },
        }
    }
}

// ---------------------------------------------------------------------------
// List reader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderCommand {
    Back,
    Prev,
    Next,
    Repeat,
    ToggleAutoNav,
    Position,
    StopSpeech,
}

/// Reads one kind's pool item by item. The autonavigation monitor drives
/// hands-free advancement: when narration of an item ends, the next item
/// is announced after the grace delay.
pub struct ReaderScreen {
    kind: ContentKind,
    grid: GridController<ReaderCommand>,
    pager: Rc<RefCell<Pager<ContentItem>>>,
    autonav: AutoNavMonitor,
}

impl ReaderScreen {
    pub fn new(kind: ContentKind, services: &AppServices) -> Self {
        let items = services.catalog.pool(kind).to_vec();
        let mut screen = Self::build(kind, items, services);
        screen.announce_entry(&services.speech);
        screen.start_autonav(&services.speech);
        screen.rebuild_actions();
        screen
    }

    /// Open the reader on a specific item (from the autoplay router).
    pub fn focused_on(item: &ContentItem, services: &AppServices) -> Self {
        let items = services.catalog.pool(item.kind).to_vec();
        let mut screen = Self::build(item.kind, items, services);
        {
            let mut pager = screen.pager.borrow_mut();
            if let Some(pos) = pager.items().iter().position(|i| i.title == item.title) {
                pager.jump_to(pos);
            }
        }
        screen.announce_entry(&services.speech);
        screen.start_autonav(&services.speech);
        screen.rebuild_actions();
        screen
    }

    fn build(kind: ContentKind, items: Vec<ContentItem>, services: &AppServices) -> Self {
        Self {
            kind,
            grid: GridController::new(Rc::clone(&services.speech)),
            pager: Rc::new(RefCell::new(Pager::with_items(items))),
            autonav: AutoNavMonitor::new(Rc::clone(&services.speech), AutoNavConfig::default()),
        }
    }

    fn announce_entry(&self, speech: &SharedSpeech) {
        let pager = self.pager.borrow();
        match (pager.current(), pager.position()) {
            (Some(item), Some((pos, total))) => {
                let text = format!(
                    "{}の一覧です。全{}件。{}件目、{}。{}",
                    self.kind.display_name(),
                    total,
                    pos,
                    item.title,
                    item.description,
                );
                say(speech, &text, &SpeakOptions::default());
            },
            _ => {
                let text = format!("{}のコンテンツがありません", self.kind.display_name());
                say(speech, &text, &SpeakOptions::default());
            },
        }
    }

    fn start_autonav(&mut self, speech: &SharedSpeech) {
        let pager = Rc::clone(&self.pager);
        let speech = Rc::clone(speech);
        self.autonav.start(Box::new(move || {
            let mut pager = pager.borrow_mut();
            match pager.next() {
                Some(item) => {
                    let text = format!("{}。{}", item.title, item.description);
                    say(&speech, &text, &SpeakOptions::interrupting());
                },
                // Running off the end is a normal outcome, not an error.
                None => say(&speech, "最後の項目です", &SpeakOptions::default()),
            }
        }));
    }

    fn rebuild_actions(&mut self) {
        let autonav_label = if self.autonav.is_running() {
            "自動送り：ON"
        } else {
            "自動送り：OFF"
        };
        self.grid.set_actions(vec![
            GridAction::new("戻る", ReaderCommand::Back),
            GridAction::new("前の項目", ReaderCommand::Prev),
            GridAction::new("次の項目", ReaderCommand::Next),
            GridAction::new("もう一度", ReaderCommand::Repeat),
            GridAction::new(autonav_label, ReaderCommand::ToggleAutoNav),
            GridAction::new("何番目", ReaderCommand::Position),
            GridAction::new("読み上げ停止", ReaderCommand::StopSpeech),
        ]);
    }

    fn announce_current(&self, speech: &SharedSpeech, opts: &SpeakOptions) {
        let pager = self.pager.borrow();
        match pager.current() {
            Some(item) => {
                let text = format!("{}。{}", item.title, item.description);
                say(speech, &text, opts);
            },
            None => {
                let text = format!("{}のコンテンツがありません", self.kind.display_name());
                say(speech, &text, &SpeakOptions::default());
            },
        }
    }

    fn handle_event(&mut self, event: &InputEvent, services: &mut AppServices) -> Transition {
        let Some(command) = self.grid.handle_event(event) else {
            return Transition::None;
        };
        match command {
            ReaderCommand::Back => {
                self.autonav.stop();
                Transition::Back
            },
            ReaderCommand::Prev => {
                let moved = self.pager.borrow_mut().prev().is_some();
                if moved {
                    self.announce_current(&services.speech, &SpeakOptions::interrupting());
                } else {
                    say(&services.speech, "最初の項目です", &SpeakOptions::default());
                }
                Transition::None
            },
            ReaderCommand::Next => {
                let moved = self.pager.borrow_mut().next().is_some();
                if moved {
                    self.announce_current(&services.speech, &SpeakOptions::interrupting());
                } else {
                    say(&services.speech, "最後の項目です", &SpeakOptions::default());
                }
                Transition::None
            },
            ReaderCommand::Repeat => {
                self.announce_current(&services.speech, &SpeakOptions::interrupting());
                Transition::None
            },
            ReaderCommand::ToggleAutoNav => {
                if self.autonav.is_running() {
                    self.autonav.stop();
                    say(
                        &services.speech,
                        "自動送りを無効にしました",
                        &SpeakOptions::default(),
                    );
                } else {
                    self.start_autonav(&services.speech);
                    say(
                        &services.speech,
                        "自動送りを有効にしました",
                        &SpeakOptions::default(),
                    );
                }
                self.rebuild_actions();
                Transition::None
            },
            ReaderCommand::Position => {
                let text = match self.pager.borrow().position() {
                    Some((pos, total)) => format!("全{total}件中、{pos}件目です"),
                    None => format!("{}のコンテンツがありません", self.kind.display_name()),
                };
                say(&services.speech, &text, &SpeakOptions::default());
                Transition::None
            },
            ReaderCommand::StopSpeech => {
                if let Err(err) = services.speech.borrow_mut().stop() {
                    log::warn!("speech engine rejected stop: {err}");
                }
                Transition::None
            },
        }
    }
}
