use std::path::PathBuf;

use rand::Rng;
use thiserror::Error;

use super::title::trim_title;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no tracks found in {0:?}")]
    Empty(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// File name without directory and extension, when there is one.
    pub title: Option<String>,
}

impl Track {
    pub fn new(path: PathBuf) -> Self {
        let title = trim_title(&path.to_string_lossy());
        Self { path, title }
    }
}

/// How the next track is picked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackChange {
    Random,
    Next,
    Previous,
}

/// The ordered, fixed playlist plus the index of the current track.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
    current: usize,
}

impl Catalog {
    /// Build a catalog; `source` only names where the tracks came from in the error.
    pub fn new(tracks: Vec<Track>, source: PathBuf) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty(source));
        }
        Ok(Self { tracks, current: 0 })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    /// Move the cursor and return the newly selected track.
    ///
    /// `Next` and `Previous` wrap around at both ends.
    pub fn advance<R: Rng + ?Sized>(&mut self, change: TrackChange, rng: &mut R) -> &Track {
        let len = self.tracks.len();
        self.current = match change {
            TrackChange::Random => rng.random_range(0..len),
            TrackChange::Next => {
                if self.current + 1 == len {
                    0
                } else {
                    self.current + 1
                }
            }
            TrackChange::Previous => {
                if self.current == 0 {
                    len - 1
                } else {
                    self.current - 1
                }
            }
        };
        self.current()
    }
}
