//! `note:intensity;note:intensity` cells.

use tracing::debug;

/// Parsed note intensities, in first-appearance order.
///
/// A note repeated within one cell keeps its first position but takes the
/// later intensity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteIntensities {
    entries: Vec<(String, i64)>,
}

impl NoteIntensities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, note: impl Into<String>, intensity: i64) {
        let note = note.into();
        match self.entries.iter_mut().find(|(n, _)| *n == note) {
            Some(entry) => entry.1 = intensity,
            None => self.entries.push((note, intensity)),
        }
    }

    pub fn get(&self, note: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(n, _)| n == note)
            .map(|(_, i)| *i)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(n, i)| (n.as_str(), *i))
    }
}

/// Parse a structured notes cell. Never fails: segments without a `:`, with an
/// empty note, or with a non-integer intensity are skipped.
pub fn parse_note_intensities(cell: Option<&str>) -> NoteIntensities {
    let mut out = NoteIntensities::new();
    let Some(cell) = cell else {
        return out;
    };

    for segment in cell.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((note, intensity)) = segment.split_once(':') else {
            debug!(segment, "dropping note segment without `:`");
            continue;
        };
        let note = note.trim();
        if note.is_empty() {
            debug!(segment, "dropping note segment with empty name");
            continue;
        }
        match intensity.trim().parse::<i64>() {
            Ok(intensity) => out.insert(note, intensity),
            Err(_) => debug!(segment, "dropping note segment with non-integer intensity"),
        }
    }

    out
}
