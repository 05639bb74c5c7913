//! Venue operations of the booking directory.
//!
//! Reads take any connection plus the reference instant used to split shows
//! into past and upcoming. Writes run in their own transaction and leave the
//! store untouched when they fail.

use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    db::entities::{artist, show, venue, Artist, Show, Venue},
    error::{AppError, Result},
    forms::VenueForm,
    services::{
        genres, schedule,
        search::{contains_ignore_case, SearchHit, SearchResults},
        shows,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show as seen from the venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub starts_at: DateTimeWithTimeZone,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
}

impl VenueDetail {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Venues grouped by location, ordered by city, state and then venue id.
pub async fn list_grouped_by_location<C: ConnectionTrait>(
    db: &C,
    now: DateTime<Utc>,
) -> Result<Vec<VenueArea>> {
    let mut venues = Venue::find().all(db).await?;
    venues.sort_by(|a, b| {
        a.city
            .cmp(&b.city)
            .then_with(|| a.state.cmp(&b.state))
            .then(a.id.cmp(&b.id))
    });

    let counts = shows::all_upcoming_counts(db, show::Column::VenueId, now).await?;

    let mut areas: Vec<VenueArea> = Vec::new();
    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
        };

        match areas.last_mut() {
            Some(area) if area.city == venue.city && area.state == venue.state => {
                area.venues.push(summary)
            }
            _ => areas.push(VenueArea {
                city: venue.city,
                state: venue.state,
                venues: vec![summary],
            }),
        }
    }

    Ok(areas)
}

/// Case-insensitive substring search over venue names.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let term = term.trim();
    let matches: Vec<venue::Model> = Venue::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter(|v| contains_ignore_case(&v.name, term))
        .collect();

    let ids: Vec<i32> = matches.iter().map(|v| v.id).collect();
    let counts = shows::upcoming_counts(db, show::Column::VenueId, &ids, now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|v| SearchHit {
                num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect(),
    ))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model> {
    Venue::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
}

pub async fn get_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<VenueDetail> {
    let venue = find(db, id).await?;

    let mut rows: Vec<(show::Model, Option<artist::Model>)> = venue
        .find_related(Show)
        .find_also_related(Artist)
        .all(db)
        .await?;
    rows.sort_by(|(a, _), (b, _)| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

    let split = schedule::partition(rows, now, |(show, _)| show.start_time);
    let to_entries = |rows: Vec<(show::Model, Option<artist::Model>)>| -> Vec<ArtistShow> {
        rows.into_iter()
            .filter_map(|(show, artist)| {
                artist.map(|a| ArtistShow {
                    artist_id: a.id,
                    artist_name: a.name,
                    artist_image_link: a.image_link,
                    start_time: schedule::format_start_time(&show.start_time),
                    starts_at: show.start_time,
                })
            })
            .collect()
    };

    Ok(VenueDetail {
        genres: genres::decode(&venue.genres),
        venue,
        past_shows: to_entries(split.past),
        upcoming_shows: to_entries(split.upcoming),
    })
}

fn write_fields(active: &mut venue::ActiveModel, form: VenueForm, genres: String) {
    active.name = Set(form.name);
    active.city = Set(form.city);
    active.state = Set(form.state);
    active.address = Set(form.address);
    active.phone = Set(form.phone);
    active.image_link = Set(form.image_link);
    active.facebook_link = Set(form.facebook_link);
    active.website = Set(form.website_link);
    active.genres = Set(genres);
    active.seeking_talent = Set(form.seeking_talent);
    active.seeking_description = Set(form.seeking_description);
}

pub async fn create(db: &DatabaseConnection, form: VenueForm) -> Result<venue::Model> {
    form.validate()?;
    let encoded = genres::encode(&form.genres)?;

    let mut active = venue::ActiveModel {
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    write_fields(&mut active, form, encoded);

    let txn = db.begin().await?;
    let venue = active.insert(&txn).await?;
    txn.commit().await?;

    info!("Listed venue {} ({})", venue.id, venue.name);
    Ok(venue)
}

/// Replaces every editable field of the venue.
pub async fn edit(db: &DatabaseConnection, id: i32, form: VenueForm) -> Result<venue::Model> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;

    form.validate()?;
    let encoded = genres::encode(&form.genres)?;

    let mut active: venue::ActiveModel = existing.into();
    write_fields(&mut active, form, encoded);
    let venue = active.update(&txn).await?;
    txn.commit().await?;

    info!("Edited venue {} ({})", venue.id, venue.name);
    Ok(venue)
}

/// Deletes a venue. Venues that still have shows are kept.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<venue::Model> {
    let txn = db.begin().await?;
    let venue = find(&txn, id).await?;

    let booked = shows::count_for(&txn, show::Column::VenueId, id).await?;
    if booked > 0 {
        warn!("Refused to delete venue {} with {} show(s)", id, booked);
        return Err(AppError::Referential(format!(
            "Venue {} still has {} show(s) and cannot be deleted",
            venue.name, booked
        )));
    }

    Venue::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted venue {} ({})", venue.id, venue.name);
    Ok(venue)
}
