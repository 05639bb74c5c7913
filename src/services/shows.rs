use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelTrait, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter, QuerySelect,
    RelationTrait, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::{
    db::entities::{artist, show, venue, Artist, Show, Venue},
    error::{AppError, Result},
    forms::ShowForm,
    services::schedule,
};

/// One row of the public show listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub starts_at: DateTimeWithTimeZone,
    pub start_time: String,
}

#[derive(FromQueryResult)]
struct ShowRow {
    id: i32,
    start_time: DateTimeWithTimeZone,
    venue_id: i32,
    venue_name: String,
    artist_id: i32,
    artist_name: String,
    artist_image_link: Option<String>,
}

/// Schedules a show after checking that both the artist and the venue exist.
pub async fn create(db: &DatabaseConnection, form: ShowForm) -> Result<show::Model> {
    let txn = db.begin().await?;

    if Artist::find_by_id(form.artist_id).one(&txn).await?.is_none() {
        warn!("Rejected show for missing artist {}", form.artist_id);
        return Err(AppError::Referential(format!(
            "Artist {} does not exist",
            form.artist_id
        )));
    }

    if Venue::find_by_id(form.venue_id).one(&txn).await?.is_none() {
        warn!("Rejected show for missing venue {}", form.venue_id);
        return Err(AppError::Referential(format!(
            "Venue {} does not exist",
            form.venue_id
        )));
    }

    let show = show::ActiveModel {
        venue_id: Set(form.venue_id),
        artist_id: Set(form.artist_id),
        start_time: Set(form.start_time),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Listed show {} (artist {} at venue {})",
        show.id, show.artist_id, show.venue_id
    );
    Ok(show)
}

/// All shows with their venue and artist, earliest first.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    let mut rows: Vec<ShowRow> = Show::find()
        .select_only()
        .column(show::Column::Id)
        .column(show::Column::StartTime)
        .column_as(venue::Column::Id, "venue_id")
        .column_as(venue::Column::Name, "venue_name")
        .column_as(artist::Column::Id, "artist_id")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .into_model::<ShowRow>()
        .all(db)
        .await?;

    // Ordered here rather than in SQL: start times may carry different offsets.
    rows.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

    Ok(rows
        .into_iter()
        .map(|row| ShowListing {
            id: row.id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: schedule::format_start_time(&row.start_time),
            starts_at: row.start_time,
        })
        .collect())
}

/// Largest `IN (...)` list sent in one query, well under the bind limits
/// of both SQLite and Postgres.
const ID_BATCH: usize = 500;

/// Upcoming show count per owner id, where the owner is the venue or artist
/// referenced by `owner`. Ids without shows map to zero.
pub(crate) async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    owner: show::Column,
    ids: &[i32],
    now: DateTime<Utc>,
) -> Result<HashMap<i32, u64>> {
    let mut start_times: HashMap<i32, Vec<DateTimeWithTimeZone>> =
        ids.iter().map(|id| (*id, Vec::new())).collect();

    for batch in ids.chunks(ID_BATCH) {
        let rows: Vec<(i32, DateTimeWithTimeZone)> = Show::find()
            .select_only()
            .column(owner)
            .column(show::Column::StartTime)
            .filter(owner.is_in(batch.to_vec()))
            .into_tuple()
            .all(db)
            .await?;

        for (owner_id, start_time) in rows {
            start_times.entry(owner_id).or_default().push(start_time);
        }
    }

    Ok(tally_upcoming(start_times, now))
}

/// Upcoming show count for every owner that has at least one show.
pub(crate) async fn all_upcoming_counts<C: ConnectionTrait>(
    db: &C,
    owner: show::Column,
    now: DateTime<Utc>,
) -> Result<HashMap<i32, u64>> {
    let rows: Vec<(i32, DateTimeWithTimeZone)> = Show::find()
        .select_only()
        .column(owner)
        .column(show::Column::StartTime)
        .into_tuple()
        .all(db)
        .await?;

    let mut start_times: HashMap<i32, Vec<DateTimeWithTimeZone>> = HashMap::new();
    for (owner_id, start_time) in rows {
        start_times.entry(owner_id).or_default().push(start_time);
    }

    Ok(tally_upcoming(start_times, now))
}

fn tally_upcoming(
    start_times: HashMap<i32, Vec<DateTimeWithTimeZone>>,
    now: DateTime<Utc>,
) -> HashMap<i32, u64> {
    start_times
        .into_iter()
        .map(|(id, starts)| (id, schedule::count_upcoming(&starts, now)))
        .collect()
}

/// Number of shows referencing the given venue or artist.
pub(crate) async fn count_for<C: ConnectionTrait>(
    db: &C,
    owner: show::Column,
    id: i32,
) -> Result<u64> {
    use sea_orm::PaginatorTrait;

    Ok(Show::find().filter(owner.eq(id)).count(db).await?)
}
