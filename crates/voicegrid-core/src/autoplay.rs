//! Autoplay ("omakase") mode: randomized playlist construction and a
//! per-item countdown that drives playback independent of speech state.

use voicegrid_speech::{SharedSpeech, SpeakOptions, say};
use voicegrid_types::config::AutoplaySettings;
use voicegrid_types::content::{ContentItem, ContentKind};

/// Spoken when playback is requested but nothing is eligible.
const EMPTY_NOTICE: &str =
    "おまかせモードで再生するコンテンツがありません。設定を確認してください";
const END_OF_PLAYLIST: &str = "プレイリストの最後に到達しました";
const AT_FIRST_ITEM: &str = "最初のコンテンツです";
const PAUSED: &str = "一時停止しました";
const RESUMED: &str = "再生を再開しました";

/// Source of per-kind content pools for playlist construction.
pub trait ContentCatalog {
    /// All known items of one kind. May be empty.
    fn pool(&self, kind: ContentKind) -> &[ContentItem];
}

/// Build a randomized playlist from the enabled content pools.
///
/// Each slot draws a kind uniformly from `settings.enabled_kinds`, then
/// one item uniformly from that kind's pool; a kind with an empty pool
/// contributes nothing for that slot. With `shuffle` set the finished
/// sequence is shuffled in place (Fisher-Yates); the per-slot draw already
/// randomizes composition, so the shuffle only reorders.
///
/// An empty `enabled_kinds` yields an empty playlist; callers treat that
/// as "nothing to play" and never start the countdown.
pub fn build_playlist(
    settings: &AutoplaySettings,
    catalog: &dyn ContentCatalog,
    count: usize,
    rng: &mut fastrand::Rng,
) -> Vec<ContentItem> {
    if settings.enabled_kinds.is_empty() {
        return Vec::new();
    }
    let mut playlist = Vec::with_capacity(count);
    for _ in 0..count {
        let kind = settings.enabled_kinds[rng.usize(..settings.enabled_kinds.len())];
        let pool = catalog.pool(kind);
        if pool.is_empty() {
            continue;
        }
        playlist.push(pool[rng.usize(..pool.len())].clone());
    }
    if settings.shuffle {
        rng.shuffle(&mut playlist);
    }
    log::debug!(
        "autoplay: built playlist of {} items from {} kinds",
        playlist.len(),
        settings.enabled_kinds.len()
    );
    playlist
}

/// Drives linear playback of a playlist with a per-item time budget.
///
/// The countdown runs independently of speech state: the host loop calls
/// [`tick`] and the player consumes whole seconds. Reaching zero advances
/// to the next item and resets the budget; the last item is terminal
/// (playback stops, no wraparound).
///
/// [`tick`]: AutoplayPlayer::tick
pub struct AutoplayPlayer {
    speech: SharedSpeech,
    items: Vec<ContentItem>,
    cursor: usize,
    per_item_secs: u32,
    remaining_secs: u32,
    playing: bool,
    tick_elapsed_ms: u32,
}

impl AutoplayPlayer {
    pub fn new(speech: SharedSpeech, items: Vec<ContentItem>, per_item_secs: u32) -> Self {
        Self {
            speech,
            items,
            cursor: 0,
            per_item_secs: per_item_secs.max(1),
            remaining_secs: 0,
            playing: false,
            tick_elapsed_ms: 0,
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The item the cursor points at, if the playlist is non-empty.
    pub fn current(&self) -> Option<&ContentItem> {
        self.items.get(self.cursor)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Begin playback at the first item, announcing the playlist summary.
    ///
    /// On an empty playlist this announces the nothing-to-play notice and
    /// stays stopped; the countdown is never started.
    pub fn start(&mut self) {
        if self.items.is_empty() {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        }
        self.cursor = 0;
        self.remaining_secs = self.per_item_secs;
        self.playing = true;
        let first = &self.items[0];
        let text = format!(
            "おまかせモードを開始します。{}個のコンテンツを用意しました。最初は{}、{}です",
            self.items.len(),
            first.kind.display_name(),
            first.title,
        );
        say(&self.speech, &text, &SpeakOptions::default());
    }

    /// Advance time; the countdown is inert while paused or empty.
    pub fn tick(&mut self, dt_ms: u32) {
        if !self.playing || self.items.is_empty() {
            return;
        }
        self.tick_elapsed_ms += dt_ms;
        while self.tick_elapsed_ms >= 1000 {
            self.tick_elapsed_ms -= 1000;
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.advance();
            }
            if !self.playing {
                break;
            }
        }
    }

    /// Move to the next item, interrupting current narration. At the last
    /// item: announce end-of-playlist and stop (cursor stays, no
    /// wraparound).
    pub fn advance(&mut self) {
        if self.items.is_empty() {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        }
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
            self.remaining_secs = self.per_item_secs;
            let item = &self.items[self.cursor];
            let text = format!(
                "次のコンテンツ：{}、{}",
                item.kind.display_name(),
                item.title,
            );
            say(&self.speech, &text, &SpeakOptions::interrupting());
        } else {
            say(&self.speech, END_OF_PLAYLIST, &SpeakOptions::default());
            self.playing = false;
        }
    }

    /// Move to the previous item. At the first item: announce and stay.
    pub fn retreat(&mut self) {
        if self.items.is_empty() {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            self.remaining_secs = self.per_item_secs;
            let item = &self.items[self.cursor];
            let text = format!(
                "前のコンテンツ：{}、{}",
                item.kind.display_name(),
                item.title,
            );
            say(&self.speech, &text, &SpeakOptions::interrupting());
        } else {
            say(&self.speech, AT_FIRST_ITEM, &SpeakOptions::default());
        }
    }

    /// Pause or resume. The countdown resumes where it left off.
    pub fn toggle_play(&mut self) {
        if self.items.is_empty() {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        }
        self.playing = !self.playing;
        let text = if self.playing { RESUMED } else { PAUSED };
        say(&self.speech, text, &SpeakOptions::default());
    }

    /// Announce the current item and hand it to the content router.
    /// Player state is unchanged.
    pub fn open_current(&self, router: &mut dyn FnMut(&ContentItem)) {
        let Some(item) = self.items.get(self.cursor) else {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        };
        say(
            &self.speech,
            &format!("{} を開きます", item.title),
            &SpeakOptions::default(),
        );
        router(item);
    }

    /// Spoken report of the current item, remaining time, and position.
    pub fn announce_status(&self) {
        let Some(item) = self.items.get(self.cursor) else {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        };
        let text = format!(
            "現在：{}、{}。{}。残り時間：{}。プレイリスト：{}/{}",
            item.kind.display_name(),
            item.title,
            item.description,
            format_secs(self.remaining_secs),
            self.cursor + 1,
            self.items.len(),
        );
        say(&self.speech, &text, &SpeakOptions::default());
    }

    /// Spoken report of the playlist length and position.
    pub fn announce_playlist(&self) {
        if self.items.is_empty() {
            say(&self.speech, EMPTY_NOTICE, &SpeakOptions::default());
            return;
        }
        let text = format!(
            "プレイリスト：全{}個のコンテンツ。現在は{}番目です",
            self.items.len(),
            self.cursor + 1,
        );
        say(&self.speech, &text, &SpeakOptions::default());
    }

    /// Spoken report of the remaining time for the current item.
    pub fn announce_remaining(&self) {
        let text = format!("残り時間：{}", format_secs(self.remaining_secs));
        say(&self.speech, &text, &SpeakOptions::default());
    }

    /// Screen exit: stop playback and cut off narration.
    pub fn shutdown(&mut self) {
        self.playing = false;
        if let Err(err) = self.speech.borrow_mut().stop() {
            log::warn!("speech engine rejected stop: {err}");
        }
    }
}

/// Format seconds as a spoken `X分Y秒`.
fn format_secs(total: u32) -> String {
    format!("{}分{}秒", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use serde_json::json;
    use voicegrid_speech::test_utils::RecordingSpeech;

    struct FixedCatalog {
        novels: Vec<ContentItem>,
        podcasts: Vec<ContentItem>,
    }

    impl FixedCatalog {
        fn new() -> Self {
            let novels = (0..3)
                .map(|i| {
                    ContentItem::new(
                        ContentKind::Novel,
                        format!("小説{i}"),
                        "作者不詳",
                        json!({"id": i}),
                    )
                })
                .collect();
            let podcasts = (0..2)
                .map(|i| {
                    ContentItem::new(
                        ContentKind::Podcast,
                        format!("番組{i}"),
                        "毎週配信",
                        json!({"feed": i}),
                    )
                })
                .collect();
            Self { novels, podcasts }
        }
    }

    impl ContentCatalog for FixedCatalog {
        fn pool(&self, kind: ContentKind) -> &[ContentItem] {
            match kind {
                ContentKind::Novel => &self.novels,
                ContentKind::Podcast => &self.podcasts,
                _ => &[],
            }
        }
    }

    fn settings(kinds: Vec<ContentKind>, shuffle: bool) -> AutoplaySettings {
        AutoplaySettings {
            enabled_kinds: kinds,
            play_duration_mins: 10,
            shuffle,
        }
    }

    fn items(count: usize) -> Vec<ContentItem> {
        (0..count)
            .map(|i| {
                ContentItem::new(
                    ContentKind::RssNews,
                    format!("記事{i}"),
                    "テスト記事",
                    json!({"n": i}),
                )
            })
            .collect()
    }

    fn player_with(count: usize, secs: u32) -> (AutoplayPlayer, Rc<RefCell<RecordingSpeech>>) {
        let speech = Rc::new(RefCell::new(RecordingSpeech::new()));
        let player = AutoplayPlayer::new(Rc::clone(&speech) as SharedSpeech, items(count), secs);
        (player, speech)
    }

    // -- build_playlist --

    #[test]
    fn empty_enabled_kinds_yield_empty_playlist() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let playlist = build_playlist(&settings(vec![], true), &catalog, 20, &mut rng);
        assert!(playlist.is_empty());
    }

    #[test]
    fn playlist_has_requested_count() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(2);
        let playlist = build_playlist(
            &settings(vec![ContentKind::Novel, ContentKind::Podcast], false),
            &catalog,
            20,
            &mut rng,
        );
        assert_eq!(playlist.len(), 20);
    }

    #[test]
    fn playlist_kinds_drawn_from_enabled_set() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(3);
        let playlist = build_playlist(
            &settings(vec![ContentKind::Novel], false),
            &catalog,
            20,
            &mut rng,
        );
        assert!(playlist.iter().all(|item| item.kind == ContentKind::Novel));
    }

    #[test]
    fn kinds_with_empty_pools_contribute_nothing() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(4);
        // Radio is enabled but the catalog has no radio pool.
        let playlist = build_playlist(
            &settings(vec![ContentKind::Radio], true),
            &catalog,
            20,
            &mut rng,
        );
        assert!(playlist.is_empty());
    }

    #[test]
    fn mixed_enabled_kinds_eventually_cover_both() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(5);
        let playlist = build_playlist(
            &settings(vec![ContentKind::Novel, ContentKind::Podcast], false),
            &catalog,
            64,
            &mut rng,
        );
        let kinds: HashSet<_> = playlist.iter().map(|item| item.kind).collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn shuffle_keeps_the_multiset() {
        let catalog = FixedCatalog::new();
        let mut rng = fastrand::Rng::with_seed(6);
        let plain = build_playlist(
            &settings(vec![ContentKind::Novel], false),
            &catalog,
            30,
            &mut rng,
        );
        let mut rng = fastrand::Rng::with_seed(6);
        let shuffled = build_playlist(
            &settings(vec![ContentKind::Novel], true),
            &catalog,
            30,
            &mut rng,
        );
        let count = |list: &[ContentItem], title: &str| {
            list.iter().filter(|i| i.title == title).count()
        };
        for title in ["小説0", "小説1", "小説2"] {
            assert_eq!(count(&plain, title), count(&shuffled, title));
        }
    }

    // -- start --

    #[test]
    fn start_announces_summary_and_first_item() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        assert!(player.is_playing());
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.remaining_secs(), 5);
        let speech = speech.borrow();
        assert!(speech.has_spoken("おまかせモードを開始します"));
        assert!(speech.has_spoken("3個のコンテンツ"));
        assert!(speech.has_spoken("記事0"));
    }

    #[test]
    fn start_on_empty_playlist_stays_stopped() {
        let (mut player, speech) = player_with(0, 5);
        player.start();
        assert!(!player.is_playing());
        assert!(speech.borrow().has_spoken("再生するコンテンツがありません"));
    }

    // -- Countdown --

    #[test]
    fn five_ticks_advance_to_second_item_and_reset_budget() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        for _ in 0..5 {
            player.tick(1000);
        }
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.remaining_secs(), 5);
        assert!(player.is_playing());
        let speech = speech.borrow();
        assert!(speech.has_spoken("次のコンテンツ"));
        assert!(speech.has_spoken("記事1"));
        assert!(speech.last_options().unwrap().interrupt);
    }

    #[test]
    fn countdown_at_last_item_stops_without_wraparound() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        player.advance(); // -> 1
        player.advance(); // -> 2 (last)
        assert_eq!(player.cursor(), 2);
        for _ in 0..5 {
            player.tick(1000);
        }
        assert!(!player.is_playing());
        assert_eq!(player.cursor(), 2);
        assert!(speech.borrow().has_spoken("プレイリストの最後に到達しました"));
    }

    #[test]
    fn tick_is_inert_while_paused() {
        let (mut player, _) = player_with(3, 5);
        player.start();
        player.tick(2000);
        assert_eq!(player.remaining_secs(), 3);
        player.toggle_play(); // pause
        player.tick(10_000);
        assert_eq!(player.remaining_secs(), 3);
        player.toggle_play(); // resume
        player.tick(1000);
        assert_eq!(player.remaining_secs(), 2);
    }

    #[test]
    fn tick_is_inert_on_empty_playlist() {
        let (mut player, _) = player_with(0, 5);
        player.start();
        player.tick(60_000);
        assert_eq!(player.remaining_secs(), 0);
        assert!(!player.is_playing());
    }

    #[test]
    fn sub_second_ticks_accumulate() {
        let (mut player, _) = player_with(2, 5);
        player.start();
        for _ in 0..10 {
            player.tick(100);
        }
        assert_eq!(player.remaining_secs(), 4);
    }

    #[test]
    fn one_large_tick_consumes_multiple_seconds() {
        let (mut player, _) = player_with(2, 5);
        player.start();
        player.tick(3500);
        assert_eq!(player.remaining_secs(), 2);
    }

    // -- Manual navigation --

    #[test]
    fn advance_past_end_is_terminal() {
        let (mut player, speech) = player_with(2, 5);
        player.start();
        player.advance();
        assert_eq!(player.cursor(), 1);
        player.advance();
        assert!(!player.is_playing());
        assert_eq!(player.cursor(), 1);
        assert!(speech.borrow().has_spoken("最後に到達しました"));
    }

    #[test]
    fn retreat_at_first_item_announces_and_stays() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        player.retreat();
        assert_eq!(player.cursor(), 0);
        assert!(speech.borrow().has_spoken("最初のコンテンツです"));
    }

    #[test]
    fn retreat_then_advance_round_trips_with_full_budget() {
        let (mut player, _) = player_with(3, 5);
        player.start();
        player.advance(); // cursor 1
        player.tick(2000); // partially consumed budget
        assert_eq!(player.remaining_secs(), 3);

        player.retreat(); // cursor 0, budget reset
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.remaining_secs(), 5);

        player.tick(1000);
        player.advance(); // cursor 1 again, budget reset again
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.remaining_secs(), 5);
    }

    #[test]
    fn navigation_on_empty_playlist_speaks_notice() {
        let (mut player, speech) = player_with(0, 5);
        player.advance();
        player.retreat();
        player.toggle_play();
        assert_eq!(speech.borrow().utterance_count(), 3);
        assert!(speech.borrow().has_spoken("再生するコンテンツがありません"));
        assert!(!player.is_playing());
    }

    // -- Pause / resume announcements --

    #[test]
    fn toggle_play_announces_each_direction() {
        let (mut player, speech) = player_with(2, 5);
        player.start();
        player.toggle_play();
        assert!(speech.borrow().has_spoken("一時停止しました"));
        player.toggle_play();
        assert!(speech.borrow().has_spoken("再生を再開しました"));
    }

    // -- open_current --

    #[test]
    fn open_current_routes_payload_without_state_change() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        player.advance();
        let mut opened = Vec::new();
        player.open_current(&mut |item| opened.push(item.title.clone()));
        assert_eq!(opened, vec!["記事1"]);
        assert_eq!(player.cursor(), 1);
        assert!(player.is_playing());
        assert!(speech.borrow().has_spoken("記事1 を開きます"));
    }

    #[test]
    fn open_current_on_empty_playlist_speaks_notice() {
        let (player, speech) = player_with(0, 5);
        let mut opened = 0;
        player.open_current(&mut |_| opened += 1);
        assert_eq!(opened, 0);
        assert!(speech.borrow().has_spoken("再生するコンテンツがありません"));
    }

    // -- Status announcements --

    #[test]
    fn announce_status_reports_position_and_time() {
        let (mut player, speech) = player_with(3, 90);
        player.start();
        player.announce_status();
        let speech = speech.borrow();
        assert!(speech.has_spoken("現在：RSSニュース、記事0"));
        assert!(speech.has_spoken("残り時間：1分30秒"));
        assert!(speech.has_spoken("プレイリスト：1/3"));
    }

    #[test]
    fn announce_playlist_reports_length() {
        let (mut player, speech) = player_with(4, 5);
        player.start();
        player.advance();
        player.announce_playlist();
        assert!(speech.borrow().has_spoken("全4個のコンテンツ"));
        assert!(speech.borrow().has_spoken("2番目です"));
    }

    #[test]
    fn announce_remaining_formats_minutes_and_seconds() {
        let (mut player, speech) = player_with(2, 125);
        player.start();
        player.announce_remaining();
        assert!(speech.borrow().has_spoken("残り時間：2分5秒"));
    }

    // -- shutdown --

    #[test]
    fn shutdown_stops_playback_and_narration() {
        let (mut player, speech) = player_with(3, 5);
        player.start();
        player.shutdown();
        assert!(!player.is_playing());
        assert_eq!(speech.borrow().stop_count(), 1);
    }

    // -- format_secs --

    #[test]
    fn format_secs_zero() {
        assert_eq!(format_secs(0), "0分0秒");
    }

    #[test]
    fn format_secs_minutes_only() {
        assert_eq!(format_secs(600), "10分0秒");
    }

    #[test]
    fn format_secs_mixed() {
        assert_eq!(format_secs(61), "1分1秒");
    }
}
