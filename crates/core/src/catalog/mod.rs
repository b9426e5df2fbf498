use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A single entry in the song catalog. Wire field names follow the
/// `songs.json` layout used by the printed QR cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: u32,
    pub artist: String,
    #[serde(rename = "song")]
    pub title: String,
    /// Release date formatted `MM.YYYY`.
    pub date: String,
    /// Opaque reference understood by the playback surface.
    #[serde(rename = "vidId")]
    pub video_id: String,
}

/// Read-only song collection loaded once at startup and queried by exact id.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Reads a catalog from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a catalog from raw JSON (an array of song records).
    pub fn from_json(raw: &str) -> Result<Self> {
        let songs: Vec<Song> = serde_json::from_str(raw)?;
        Ok(Self { songs })
    }

    pub fn get(&self, id: u32) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    /// Checks the catalog for problems the maintenance tooling should flag:
    /// duplicate ids, malformed release dates and missing video references.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for song in &self.songs {
            if !seen.insert(song.id) {
                issues.push(CatalogIssue::DuplicateId(song.id));
            }
            if !date_is_well_formed(&song.date) {
                issues.push(CatalogIssue::MalformedDate {
                    id: song.id,
                    date: song.date.clone(),
                });
            }
            if song.video_id.is_empty() || song.video_id == "NONE" {
                issues.push(CatalogIssue::MissingVideo(song.id));
            }
        }

        issues
    }

    /// Counts songs per release year, keyed in ascending order.
    pub fn year_histogram(&self) -> BTreeMap<u16, usize> {
        let mut counts = BTreeMap::new();
        for song in &self.songs {
            if let Some((_, year)) = song.date.split_once('.') {
                if let Ok(year) = year.parse::<u16>() {
                    *counts.entry(year).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

/// A problem found while validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    DuplicateId(u32),
    MalformedDate { id: u32, date: String },
    MissingVideo(u32),
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateId(id) => write!(f, "duplicate song id {id}"),
            CatalogIssue::MalformedDate { id, date } => {
                write!(f, "song {id} has malformed date `{date}`")
            }
            CatalogIssue::MissingVideo(id) => write!(f, "song {id} has no video reference"),
        }
    }
}

/// Extracts a song id from a decoded QR payload. Accepts a bare integer or
/// any `...Id=<n>` delimited string such as a full card URL.
pub fn parse_scan_payload(text: &str) -> Option<u32> {
    let tail = match text.rsplit_once("Id=") {
        Some((_, tail)) => tail,
        None => text,
    };
    let digits: String = tail
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn date_is_well_formed(date: &str) -> bool {
    match date.split_once('.') {
        Some((month, year)) => {
            matches!(month.parse::<u8>(), Ok(1..=12))
                && year.len() == 4
                && year.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
