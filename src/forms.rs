//! Typed views of the submitted HTML forms.
//!
//! Bodies are decoded as ordered key/value pairs so multi-valued fields such
//! as `genres` survive. Text fields are trimmed and blank optional fields
//! become `None`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::{
    db::entities::{artist, venue},
    error::{AppError, Result},
    services::genres,
};

pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const FALSY: &[&str] = &["", "0", "false", "n", "no", "off"];

/// Raw `application/x-www-form-urlencoded` pairs in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self, key: &str) -> String {
        self.first(key).map(str::trim).unwrap_or_default().to_string()
    }

    pub fn optional(&self, key: &str) -> Option<String> {
        let value = self.text(key);
        (!value.is_empty()).then_some(value)
    }

    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkboxes are only submitted when ticked; an explicit falsy value
    /// also counts as unticked.
    pub fn flag(&self, key: &str) -> bool {
        self.first(key)
            .map(|v| !FALSY.contains(&v.trim().to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state").to_ascii_uppercase(),
            address: fields.text("address"),
            phone: fields.optional("phone"),
            image_link: fields.optional("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            genres: fields.all("genres"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.optional("seeking_description"),
        }
    }

    pub fn from_model(model: &venue::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            address: model.address.clone(),
            phone: model.phone.clone(),
            image_link: model.image_link.clone(),
            facebook_link: model.facebook_link.clone(),
            website_link: model.website.clone(),
            genres: genres::decode(&model.genres),
            seeking_talent: model.seeking_talent,
            seeking_description: model.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        validate_state(&self.state)?;
        require("address", &self.address)?;
        validate_link("image_link", self.image_link.as_deref())?;
        validate_link("facebook_link", self.facebook_link.as_deref())?;
        validate_link("website_link", self.website_link.as_deref())?;
        genres::encode(&self.genres)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state").to_ascii_uppercase(),
            phone: fields.optional("phone"),
            image_link: fields.optional("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            genres: fields.all("genres"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.optional("seeking_description"),
        }
    }

    pub fn from_model(model: &artist::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            phone: model.phone.clone(),
            image_link: model.image_link.clone(),
            facebook_link: model.facebook_link.clone(),
            website_link: model.website.clone(),
            genres: genres::decode(&model.genres),
            seeking_venue: model.seeking_venue,
            seeking_description: model.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        validate_state(&self.state)?;
        validate_link("image_link", self.image_link.as_deref())?;
        validate_link("facebook_link", self.facebook_link.as_deref())?;
        validate_link("website_link", self.website_link.as_deref())?;
        genres::encode(&self.genres)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<FixedOffset>,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Result<Self> {
        Ok(Self {
            artist_id: parse_id("artist_id", &fields.text("artist_id"))?,
            venue_id: parse_id("venue_id", &fields.text("venue_id"))?,
            start_time: parse_start_time(&fields.text("start_time"))?,
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_state(state: &str) -> Result<()> {
    require("state", state)?;
    if !US_STATES.contains(&state) {
        return Err(AppError::Validation(format!(
            "state `{}` is not a US state code",
            state
        )));
    }
    Ok(())
}

fn validate_link(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            AppError::Validation(format!("{} must be an http(s) URL", field)),
        ),
        _ => Ok(()),
    }
}

fn parse_id(field: &str, value: &str) -> Result<i32> {
    require(field, value)?;
    value
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Validation(format!("{} must be a positive integer", field)))
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and the browser's
/// `datetime-local` shape. Naive values are taken as UTC.
pub fn parse_start_time(value: &str) -> Result<DateTime<FixedOffset>> {
    require("start_time", value)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        .ok_or_else(|| {
            AppError::Validation(format!("start_time `{}` is not a valid date and time", value))
        })
}
