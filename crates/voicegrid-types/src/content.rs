//! Content references shared by screens, pagers, and the autoplay engine.

use serde::{Deserialize, Serialize};

/// Kinds of content the browser can narrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Novel,
    Podcast,
    Radio,
    RssNews,
    Hatena,
}

impl ContentKind {
    /// Spoken / displayed name of the kind.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Novel => "小説",
            Self::Podcast => "Podcast",
            Self::Radio => "ラジオ",
            Self::RssNews => "RSSニュース",
            Self::Hatena => "はてなブックマーク",
        }
    }

    /// All kinds in presentation order.
    pub const ALL: &[ContentKind] = &[
        ContentKind::Novel,
        ContentKind::Podcast,
        ContentKind::Radio,
        ContentKind::RssNews,
        ContentKind::Hatena,
    ];
}

/// A reference to one playable piece of content.
///
/// `payload` is opaque to the engine; only the content router that opens
/// the item interprets it (novel identifiers, feed URLs, stream IDs, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub payload: serde_json::Value,
}

impl ContentItem {
    /// Create an item with an opaque payload.
    pub fn new(
        kind: ContentKind,
        title: impl Into<String>,
        description: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- ContentKind --

    #[test]
    fn display_name_all_variants() {
        assert_eq!(ContentKind::Novel.display_name(), "小説");
        assert_eq!(ContentKind::Podcast.display_name(), "Podcast");
        assert_eq!(ContentKind::Radio.display_name(), "ラジオ");
        assert_eq!(ContentKind::RssNews.display_name(), "RSSニュース");
        assert_eq!(ContentKind::Hatena.display_name(), "はてなブックマーク");
    }

    #[test]
    fn all_lists_every_kind_once() {
        assert_eq!(ContentKind::ALL.len(), 5);
        use std::collections::HashSet;
        let set: HashSet<_> = ContentKind::ALL.iter().collect();
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ContentKind::RssNews).unwrap();
        assert_eq!(json, "\"rss-news\"");
        let back: ContentKind = serde_json::from_str("\"rss-news\"").unwrap();
        assert_eq!(back, ContentKind::RssNews);
    }

    #[test]
    fn kind_serde_roundtrip_all() {
        for &kind in ContentKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: ContentKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }

    // -- ContentItem --

    #[test]
    fn item_new_fills_fields() {
        let item = ContentItem::new(
            ContentKind::Novel,
            "走れメロス",
            "太宰治 の小説",
            json!({"author": "太宰治"}),
        );
        assert_eq!(item.kind, ContentKind::Novel);
        assert_eq!(item.title, "走れメロス");
        assert_eq!(item.description, "太宰治 の小説");
        assert_eq!(item.payload["author"], "太宰治");
    }

    #[test]
    fn item_payload_is_opaque_json() {
        let item = ContentItem::new(
            ContentKind::Radio,
            "第1放送",
            "ニュースと生活情報",
            json!({"stream_id": "r1", "bitrate": 128}),
        );
        assert_eq!(item.payload["bitrate"], 128);
    }

    #[test]
    fn item_serde_roundtrip() {
        let item = ContentItem::new(
            ContentKind::Hatena,
            "人気エントリー",
            "本日の人気記事",
            json!({"category": "hot"}),
        );
        let json = serde_json::to_string(&item).unwrap();
        let back: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }

    #[test]
    fn item_clone() {
        let item = ContentItem::new(ContentKind::Podcast, "a", "b", json!(null));
        let item2 = item.clone();
        assert_eq!(item, item2);
    }
}
