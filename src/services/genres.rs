//! Storage encoding for genre tag sets.
//!
//! Tags are stored in a single text column joined by [`SEPARATOR`]. A tag may
//! not contain the separator, may not be empty and may not carry surrounding
//! whitespace, so `decode(encode(tags)) == tags` for every accepted set.

use crate::error::{AppError, Result};

pub const SEPARATOR: char = ',';

/// Genres offered by the create/edit forms.
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(AppError::Validation("genre must not be empty".to_string()));
    }
    if tag.contains(SEPARATOR) {
        return Err(AppError::Validation(format!(
            "genre `{}` must not contain `{}`",
            tag, SEPARATOR
        )));
    }
    if tag.trim() != tag {
        return Err(AppError::Validation(format!(
            "genre `{}` must not start or end with whitespace",
            tag
        )));
    }
    Ok(())
}

/// Joins tags into their stored form. Repeated tags keep their first position.
pub fn encode<S: AsRef<str>>(tags: &[S]) -> Result<String> {
    let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref();
        validate_tag(tag)?;
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }

    let mut encoded = String::new();
    for (i, tag) in seen.iter().enumerate() {
        if i > 0 {
            encoded.push(SEPARATOR);
        }
        encoded.push_str(tag);
    }
    Ok(encoded)
}

pub fn decode(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(SEPARATOR).map(str::to_string).collect()
}
