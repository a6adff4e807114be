//! Daily note identification and random selection.
//!
//! A document is a daily note when it lives under the configured folder (or
//! anywhere, if the folder is the vault root) and its file name, without the
//! extension, strictly parses as a date under the configured format. The set of
//! daily notes is never cached: every call works from the configuration and
//! document list it is handed.

use crate::constants::MARKDOWN_EXTENSION;
use crate::date_format::DateFormat;
use crate::host::{DailyNoteConfig, DocumentRef};
use crate::vault_path;
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use thiserror::Error;
use tracing::debug;


/// Why no daily note could be picked. Both cases are reported to the user
/// as a notice rather than treated as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The vault holds no daily notes at all.
    #[error("No daily notes found")]
    NotFound,
    /// The only daily note is the one already open.
    #[error("Only one daily note exists")]
    OnlyOne,
}

/// Path of today's daily note for `config`, relative to the vault root.
///
/// ```
/// use chrono::NaiveDate;
/// use daily_notes_tweaks::daily_notes::compute_today_path;
/// use daily_notes_tweaks::host::DailyNoteConfig;
///
/// let config = DailyNoteConfig {
///     format: "YYYY-MM-DD".to_string(),
///     folder: "Daily/".to_string(),
///     template: None,
/// };
/// let now = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// assert_eq!(compute_today_path(&config, now), "Daily/2024-01-06.md");
/// ```
pub fn compute_today_path(config: &DailyNoteConfig, now: NaiveDateTime) -> String {
    let formatted = DateFormat::new(&config.format).format(&now);
    vault_path::join(&config.folder, &format!("{}{}", formatted, MARKDOWN_EXTENSION))
}

fn in_folder(path: &str, folder: &str) -> bool {
    if vault_path::is_root(folder) {
        return true;
    }
    let prefix = format!("{}/", vault_path::normalize(folder));
    path.starts_with(&prefix)
}

/// Whether `path` names a daily note under `config`.
///
/// Only the file name (or, for formats containing `/`, as many trailing path
/// segments as the format spans) is matched against the format. `today`
/// supplies any date fields the format leaves out.
pub fn is_daily_note(path: &str, config: &DailyNoteConfig, today: NaiveDate) -> bool {
    let path = vault_path::normalize(path);
    if !in_folder(&path, &config.folder) {
        return false;
    }

    let format = DateFormat::new(&config.format);
    let stem = vault_path::strip_extension(&path);

    let segments: Vec<&str> = stem.split('/').collect();
    let wanted = format.segment_count();
    if segments.len() < wanted {
        return false;
    }
    let candidate = segments[segments.len() - wanted..].join("/");

    format.parse_strict(&candidate, today).is_some()
}

/// The daily notes among `documents`, in the order given.
pub fn list_daily_notes(
    documents: &[DocumentRef],
    config: &DailyNoteConfig,
    today: NaiveDate,
) -> Vec<DocumentRef> {
    documents
        .iter()
        .filter(|doc| in_folder(doc.path(), &config.folder))
        .filter(|doc| is_daily_note(doc.path(), config, today))
        .cloned()
        .collect()
}

/// Picks a uniformly random daily note other than `current_path`.
///
/// # Errors
///
/// - [`SelectionError::NotFound`] when `documents` holds no daily notes.
/// - [`SelectionError::OnlyOne`] when the only daily note is `current_path`.
pub fn pick_random_daily_note<R: Rng>(
    documents: &[DocumentRef],
    config: &DailyNoteConfig,
    current_path: Option<&str>,
    today: NaiveDate,
    rng: &mut R,
) -> Result<DocumentRef, SelectionError> {
    let daily_notes = list_daily_notes(documents, config, today);
    if daily_notes.is_empty() {
        return Err(SelectionError::NotFound);
    }

    let current = current_path.map(vault_path::normalize);
    let candidates: Vec<DocumentRef> = daily_notes
        .into_iter()
        .filter(|doc| current.as_deref() != Some(doc.path()))
        .collect();

    if candidates.is_empty() {
        return Err(SelectionError::OnlyOne);
    }

    let index = rng.random_range(0..candidates.len());
    debug!(
        "Picked daily note {} of {} candidates",
        index + 1,
        candidates.len()
    );
    Ok(candidates[index].clone())
}
