use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Catalog, CatalogError, Track};

fn is_module_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect module files under `dir`, sorted by path.
///
/// Unreadable entries (including a missing `dir`) are logged and skipped, so
/// the result may be empty.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    log::info!("searching for tracks in {}", dir.display());

    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("cannot read track directory entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_module_file(path, settings) {
            tracks.push(Track::new(path.to_path_buf()));
            log::info!("added track: {} (count: {})", path.display(), tracks.len());
        }
    }

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    tracks
}

/// Build the catalog from the configured track list, or by scanning the
/// configured folder when the list is empty.
pub fn load_catalog(settings: &LibrarySettings) -> Result<Catalog, CatalogError> {
    if !settings.tracks.is_empty() {
        let tracks = settings.tracks.iter().cloned().map(Track::new).collect();
        return Catalog::new(tracks, settings.dir.clone());
    }

    Catalog::new(scan(&settings.dir, settings), settings.dir.clone())
}
