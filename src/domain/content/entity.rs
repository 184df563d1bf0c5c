use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of playable content.
///
/// On the wire (player messages, embed URLs, stored JSON) series are called
/// `tv`; `series` and `show` are accepted as aliases when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv", alias = "series", alias = "show")]
    Series,
}

impl MediaType {
    /// Lenient parse used for untrusted input (player messages).
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(MediaType::Movie),
            "tv" | "series" | "show" => Some(MediaType::Series),
            _ => None,
        }
    }

    /// Path segment used by the embeddable player.
    pub fn embed_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Series => write!(f, "series"),
        }
    }
}

/// External catalog identifier.
///
/// Opaque to this crate. The player and the catalog send it either as a JSON
/// number or a JSON string; both are normalized to the decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads an id out of an arbitrary JSON value.
    /// Numbers, non-empty strings are accepted; everything else is absent.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.as_str())),
            serde_json::Value::Number(n) => Some(Self::new(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ContentId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for ContentId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        ContentId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("content id must be a number or a non-empty string"))
    }
}

/// Deterministic progress-tracking key: `movie-{id}` or `series-{id}-s{season}e{episode}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a playable unit.
///
/// Season/episode defaulting happens here and nowhere else: a series
/// reference always carries both numbers (missing or zero becomes 1), a
/// movie reference never carries either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ContentRefWire", into = "ContentRefWire")]
pub struct ContentRef {
    id: ContentId,
    media_type: MediaType,
    season: Option<u32>,
    episode: Option<u32>,
}

impl ContentRef {
    pub fn new(
        id: impl Into<ContentId>,
        media_type: MediaType,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Self {
        let (season, episode) = match media_type {
            MediaType::Movie => (None, None),
            MediaType::Series => (
                Some(season.filter(|s| *s > 0).unwrap_or(1)),
                Some(episode.filter(|e| *e > 0).unwrap_or(1)),
            ),
        };
        Self {
            id: id.into(),
            media_type,
            season,
            episode,
        }
    }

    pub fn movie(id: impl Into<ContentId>) -> Self {
        Self::new(id, MediaType::Movie, None, None)
    }

    pub fn series(id: impl Into<ContentId>, season: Option<u32>, episode: Option<u32>) -> Self {
        Self::new(id, MediaType::Series, season, episode)
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn season(&self) -> Option<u32> {
        self.season
    }

    pub fn episode(&self) -> Option<u32> {
        self.episode
    }

    pub fn key(&self) -> ContentKey {
        match self.media_type {
            MediaType::Movie => ContentKey(format!("movie-{}", self.id)),
            MediaType::Series => ContentKey(format!(
                "series-{}-s{}e{}",
                self.id,
                self.season.unwrap_or(1),
                self.episode.unwrap_or(1)
            )),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentRefWire {
    id: ContentId,
    media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    episode: Option<u32>,
}

impl From<ContentRefWire> for ContentRef {
    fn from(wire: ContentRefWire) -> Self {
        ContentRef::new(wire.id, wire.media_type, wire.season, wire.episode)
    }
}

impl From<ContentRef> for ContentRefWire {
    fn from(content: ContentRef) -> Self {
        Self {
            id: content.id,
            media_type: content.media_type,
            season: content.season,
            episode: content.episode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_key() {
        assert_eq!(ContentRef::movie(42u64).key().as_str(), "movie-42");
    }

    #[test]
    fn test_series_key_includes_season_and_episode() {
        let a = ContentRef::series(42u64, Some(2), Some(5));
        let b = ContentRef::series(42u64, Some(2), Some(6));
        assert_eq!(a.key().as_str(), "series-42-s2e5");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_series_defaults_season_and_episode_to_one() {
        let content = ContentRef::series("7", None, Some(0));
        assert_eq!(content.season(), Some(1));
        assert_eq!(content.episode(), Some(1));
        assert_eq!(content.key().as_str(), "series-7-s1e1");
    }

    #[test]
    fn test_movie_drops_season_and_episode() {
        let content = ContentRef::new("9", MediaType::Movie, Some(3), Some(4));
        assert_eq!(content.season(), None);
        assert_eq!(content.episode(), None);
    }

    #[test]
    fn test_content_id_accepts_numbers_and_strings() {
        assert_eq!(ContentId::from_json(&json!(550)).unwrap().as_str(), "550");
        assert_eq!(ContentId::from_json(&json!(" tt01 ")).unwrap().as_str(), "tt01");
        assert!(ContentId::from_json(&json!("")).is_none());
        assert!(ContentId::from_json(&json!(null)).is_none());
        assert!(ContentId::from_json(&json!({"id": 1})).is_none());
    }

    #[test]
    fn test_wire_form_applies_defaults() {
        let content: ContentRef =
            serde_json::from_value(json!({"id": 1399, "mediaType": "tv"})).unwrap();
        assert_eq!(content.key().as_str(), "series-1399-s1e1");

        let stored = serde_json::to_value(&content).unwrap();
        assert_eq!(
            stored,
            json!({"id": "1399", "mediaType": "tv", "season": 1, "episode": 1})
        );
    }

    #[test]
    fn test_media_type_from_wire() {
        assert_eq!(MediaType::from_wire("TV"), Some(MediaType::Series));
        assert_eq!(MediaType::from_wire("series"), Some(MediaType::Series));
        assert_eq!(MediaType::from_wire("movie"), Some(MediaType::Movie));
        assert_eq!(MediaType::from_wire("person"), None);
    }
}
