use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tabled::Tabled;

const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";
const TRACK_URL_MARKER: &str = "open.spotify.com/track/";

/// A Spotify track URL with any query string removed.
///
/// This is the key sent to the spotydown endpoints. The inner string never
/// contains a `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLocator(String);

impl TrackLocator {
    pub fn parse(url: &str) -> Self {
        let trimmed = url.trim();
        let without_query = match trimmed.split_once('?') {
            Some((head, _)) => head,
            None => trimmed,
        };
        Self(without_query.to_string())
    }

    pub fn from_track_id(id: &str) -> Self {
        Self::parse(&format!("{}{}", TRACK_URL_PREFIX, id.trim()))
    }

    pub fn is_track_url(&self) -> bool {
        self.0.contains(TRACK_URL_MARKER)
    }

    /// The path segment after `/track/`, if the locator has one.
    pub fn track_id(&self) -> Option<&str> {
        let (_, rest) = self.0.split_once("/track/")?;
        let id = rest.split(['/', '#']).next().unwrap_or_default();
        if id.is_empty() { None } else { Some(id) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackRequest<'a> {
    pub url: &'a str,
}

/// One record of the `apiResponse.data` list.
///
/// The string fields are a display view. Absent or `null` values read as `""`
/// and any other non-string value as its JSON text. The record
/// itself is kept as received and is what gets serialized, so unknown keys,
/// `null`s and odd types survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub name: String,
    pub artist: String,
    pub album_name: String,
    pub album_artist: String,
    pub cover_url: String,
    pub url: String,
    record: Map<String, Value>,
}

impl TrackMetadata {
    /// Builds the display view over `record`.
    ///
    /// `name` and `artist` must be strings; the failing key is returned
    /// otherwise.
    pub fn from_record(record: Map<String, Value>) -> Result<Self, &'static str> {
        let required = |key: &'static str| match record.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(key),
        };
        let name = required("name")?;
        let artist = required("artist")?;

        Ok(Self {
            name,
            artist,
            album_name: display_field(&record, "album_name"),
            album_artist: display_field(&record, "album_artist"),
            cover_url: display_field(&record, "cover_url"),
            url: display_field(&record, "url"),
            record,
        })
    }

    /// The record exactly as the API returned it.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// `"<name> - <artist>"`, the unsanitized base for output file names.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.artist)
    }
}

fn display_field(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl Serialize for TrackMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrackMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_record(record).map_err(|key| {
            serde::de::Error::custom(format!("`{}` is missing or not a string", key))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    pub file_url: String,
}

/// Recorded when the file on disk is noticeably smaller than announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeShortfall {
    pub expected: u64,
    pub actual: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub expected_len: Option<u64>,
    pub shortfall: Option<SizeShortfall>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub field: String,
    pub value: String,
}

impl TrackTableRow {
    pub fn rows(track: &TrackMetadata) -> Vec<TrackTableRow> {
        [
            ("Track Name", &track.name),
            ("Artist", &track.artist),
            ("Album", &track.album_name),
            ("Album Artist", &track.album_artist),
            ("Cover URL", &track.cover_url),
            ("Spotify URL", &track.url),
        ]
        .into_iter()
        .map(|(field, value)| TrackTableRow {
            field: field.to_string(),
            value: value.clone(),
        })
        .collect()
    }
}
