//! Loading [`CleanOptions`] from TOML files.

use std::path::Path;

use fire_feed_incidents_models::CleanOptions;

use crate::FeedError;

/// Reads cleaner options from the TOML file at `path`.
///
/// Missing keys take their defaults, so an empty file yields
/// [`CleanOptions::default`].
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file is not valid TOML for [`CleanOptions`]
pub fn load_options(path: &Path) -> Result<CleanOptions, FeedError> {
    let text = std::fs::read_to_string(path)?;
    let options = parse_options(&text)?;
    log::debug!("Loaded cleaner options from {}: {options:?}", path.display());
    Ok(options)
}

/// Parses cleaner options from TOML text.
///
/// # Errors
///
/// * If `text` is not valid TOML for [`CleanOptions`]
pub fn parse_options(text: &str) -> Result<CleanOptions, FeedError> {
    Ok(toml::de::from_str(text)?)
}
