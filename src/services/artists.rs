use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    db::entities::{artist, show, venue, Artist, Show, Venue},
    error::{AppError, Result},
    forms::ArtistForm,
    services::{
        genres, schedule,
        search::{contains_ignore_case, SearchHit, SearchResults},
        shows,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show as seen from the artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub starts_at: DateTimeWithTimeZone,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
}

impl ArtistDetail {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistSummary>> {
    let rows: Vec<(i32, String)> = Artist::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| ArtistSummary { id, name })
        .collect())
}

/// Case-insensitive substring search over artist name, city and state.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let term = term.trim();
    let matches: Vec<artist::Model> = Artist::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter(|a| {
            contains_ignore_case(&a.name, term)
                || contains_ignore_case(&a.city, term)
                || contains_ignore_case(&a.state, term)
        })
        .collect();

    let ids: Vec<i32> = matches.iter().map(|a| a.id).collect();
    let counts = shows::upcoming_counts(db, show::Column::ArtistId, &ids, now).await?;

    Ok(SearchResults::new(
        matches
            .into_iter()
            .map(|a| SearchHit {
                num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect(),
    ))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model> {
    Artist::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
}

pub async fn get_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let artist = find(db, id).await?;

    let mut rows = Show::find()
        .filter(show::Column::ArtistId.eq(id))
        .find_also_related(Venue)
        .all(db)
        .await?;
    rows.sort_by(|(a, _), (b, _)| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

    let split = schedule::partition(rows, now, |(show, _)| show.start_time);

    Ok(ArtistDetail {
        genres: genres::decode(&artist.genres),
        artist,
        past_shows: venue_entries(split.past),
        upcoming_shows: venue_entries(split.upcoming),
    })
}

fn venue_entries(rows: Vec<(show::Model, Option<venue::Model>)>) -> Vec<VenueShow> {
    rows.into_iter()
        .filter_map(|(show, venue)| {
            venue.map(|v| VenueShow {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: schedule::format_start_time(&show.start_time),
                starts_at: show.start_time,
            })
        })
        .collect()
}

fn write_fields(active: &mut artist::ActiveModel, form: ArtistForm, genres: String) {
    active.name = Set(form.name);
    active.city = Set(form.city);
    active.state = Set(form.state);
    active.phone = Set(form.phone);
    active.image_link = Set(form.image_link);
    active.facebook_link = Set(form.facebook_link);
    active.website = Set(form.website_link);
    active.genres = Set(genres);
    active.seeking_venue = Set(form.seeking_venue);
    active.seeking_description = Set(form.seeking_description);
}

pub async fn create(db: &DatabaseConnection, form: ArtistForm) -> Result<artist::Model> {
    form.validate()?;
    let encoded = genres::encode(&form.genres)?;

    let mut active = artist::ActiveModel {
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    write_fields(&mut active, form, encoded);

    let txn = db.begin().await?;
    let artist = active.insert(&txn).await?;
    txn.commit().await?;

    info!("Listed artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// Replaces every editable field of the artist.
pub async fn edit(db: &DatabaseConnection, id: i32, form: ArtistForm) -> Result<artist::Model> {
    let txn = db.begin().await?;
    let mut active: artist::ActiveModel = find(&txn, id).await?.into();

    form.validate()?;
    let encoded = genres::encode(&form.genres)?;
    write_fields(&mut active, form, encoded);
    let artist = active.update(&txn).await?;
    txn.commit().await?;

    info!("Edited artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// Deletes an artist. Artists that still have shows are kept.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<artist::Model> {
    let txn = db.begin().await?;
    let artist = find(&txn, id).await?;

    let booked = shows::count_for(&txn, show::Column::ArtistId, id).await?;
    if booked > 0 {
        warn!("Refused to delete artist {} with {} show(s)", id, booked);
        return Err(AppError::Referential(format!(
            "Artist {} still has {} show(s) and cannot be deleted",
            artist.name, booked
        )));
    }

    Artist::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted artist {} ({})", artist.id, artist.name);
    Ok(artist)
}
