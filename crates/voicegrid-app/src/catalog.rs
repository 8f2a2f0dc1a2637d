//! Built-in content pools.
//!
//! Offline stand-ins for the remote collections (novels, podcast feeds,
//! radio stations, news feeds, bookmark entries). Each pool backs the
//! `ContentCatalog` seam; payloads carry whatever the content router
//! needs to open the item.

use serde_json::json;
use voicegrid_core::autoplay::ContentCatalog;
use voicegrid_types::content::{ContentItem, ContentKind};

/// Static per-kind pools.
pub struct BuiltinCatalog {
    novels: Vec<ContentItem>,
    podcasts: Vec<ContentItem>,
    radio: Vec<ContentItem>,
    rss_news: Vec<ContentItem>,
    hatena: Vec<ContentItem>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let novel = |title: &str, author: &str, card: u32| {
            ContentItem::new(
                ContentKind::Novel,
                title,
                format!("{author} の小説"),
                json!({"author": author, "card": card}),
            )
        };
        let podcast = |title: &str, description: &str, feed: &str| {
            ContentItem::new(
                ContentKind::Podcast,
                title,
                description,
                json!({"feed_url": feed}),
            )
        };
        let station = |name: &str, description: &str, id: &str| {
            ContentItem::new(ContentKind::Radio, name, description, json!({"station_id": id}))
        };
        let feed = |name: &str, url: &str| {
            ContentItem::new(
                ContentKind::RssNews,
                name,
                "RSSニュースフィード",
                json!({"feed_url": url}),
            )
        };

        Self {
            novels: vec![
                novel("走れメロス", "太宰治", 1567),
                novel("吾輩は猫である", "夏目漱石", 789),
                novel("羅生門", "芥川龍之介", 127),
                novel("銀河鉄道の夜", "宮沢賢治", 456),
                novel("こころ", "夏目漱石", 773),
                novel("注文の多い料理店", "宮沢賢治", 1927),
            ],
            podcasts: vec![
                podcast(
                    "ニュースまとめポッドキャスト",
                    "朝晩のニュースを音声で",
                    "https://example.com/feeds/news-digest.xml",
                ),
                podcast(
                    "ゆっくり技術ラジオ",
                    "ITの話題をゆっくり解説",
                    "https://example.com/feeds/tech-radio.xml",
                ),
                podcast(
                    "朗読の時間",
                    "短編小説の朗読番組",
                    "https://example.com/feeds/roudoku.xml",
                ),
            ],
            radio: vec![
                station("第1放送", "ニュースと生活情報", "r1"),
                station("FM放送", "音楽とトーク", "fm"),
                station("深夜放送", "夜のトーク番組", "midnight"),
            ],
            rss_news: vec![
                feed("総合ニュース", "https://example.com/rss/general.xml"),
                feed("ITニュース", "https://example.com/rss/it.xml"),
                feed("スポーツニュース", "https://example.com/rss/sports.xml"),
            ],
            hatena: vec![
                ContentItem::new(
                    ContentKind::Hatena,
                    "人気エントリー",
                    "本日の人気記事",
                    json!({"category": "hot"}),
                ),
                ContentItem::new(
                    ContentKind::Hatena,
                    "新着エントリー",
                    "新着の注目記事",
                    json!({"category": "new"}),
                ),
            ],
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCatalog for BuiltinCatalog {
    fn pool(&self, kind: ContentKind) -> &[ContentItem] {
        match kind {
            ContentKind::Novel => &self.novels,
            ContentKind::Podcast => &self.podcasts,
            ContentKind::Radio => &self.radio,
            ContentKind::RssNews => &self.rss_news,
            ContentKind::Hatena => &self.hatena,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_pool() {
        let catalog = BuiltinCatalog::new();
        for &kind in ContentKind::ALL {
            assert!(!catalog.pool(kind).is_empty(), "empty pool for {kind:?}");
        }
    }

    #[test]
    fn pool_items_carry_their_kind() {
        let catalog = BuiltinCatalog::new();
        for &kind in ContentKind::ALL {
            assert!(catalog.pool(kind).iter().all(|item| item.kind == kind));
        }
    }

    #[test]
    fn payloads_are_structured() {
        let catalog = BuiltinCatalog::new();
        let novel = &catalog.pool(ContentKind::Novel)[0];
        assert!(novel.payload["author"].is_string());
        let station = &catalog.pool(ContentKind::Radio)[0];
        assert!(station.payload["station_id"].is_string());
    }
}
