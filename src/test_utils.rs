//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Entity factories and the sample directory used across tests

use chrono::{DateTime, Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat},
    db::entities::{artist, show, venue},
    forms::{ArtistForm, VenueForm},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        log_format: LogFormat::Pretty,
        static_dir: "static".to_string(),
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Insert a venue directly, bypassing form validation
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(None),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set("Jazz".to_string()),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Insert an artist directly, bypassing form validation
pub async fn create_test_artist(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        phone: Set(None),
        image_link: Set(Some(format!(
            "https://images.example.com/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        ))),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set("Rock n Roll".to_string()),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Insert a show directly
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time.into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

/// A valid venue form for the service layer
pub fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "335 Delancey Street".to_string(),
        phone: Some("914-003-1132".to_string()),
        image_link: None,
        facebook_link: None,
        website_link: None,
        genres: vec!["Jazz".to_string(), "Classical".to_string()],
        seeking_talent: false,
        seeking_description: None,
    }
}

/// A valid artist form for the service layer
pub fn artist_form(name: &str, city: &str, state: &str) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: None,
        facebook_link: None,
        website_link: None,
        genres: vec!["Rock n Roll".to_string()],
        seeking_venue: false,
        seeking_description: None,
    }
}

/// Ids of the rows inserted by [`seed_sample_directory`]
pub struct SampleDirectory {
    pub musical_hop: venue::Model,
    pub dueling_pianos: venue::Model,
    pub park_square: venue::Model,
    pub guns_n_petals: artist::Model,
    pub matt_quevedo: artist::Model,
    pub wild_sax_band: artist::Model,
}

/// Seed the demo directory: three venues, three artists, one past show at
/// each of two venues and three upcoming shows at Park Square, all relative
/// to `now`.
pub async fn seed_sample_directory(db: &DatabaseConnection, now: DateTime<Utc>) -> SampleDirectory {
    let musical_hop = create_test_venue(db, "The Musical Hop", "San Francisco", "CA").await;
    let dueling_pianos = create_test_venue(db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park_square =
        create_test_venue(db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let guns_n_petals = create_test_artist(db, "Guns N Petals", "San Francisco", "CA").await;
    let matt_quevedo = create_test_artist(db, "Matt Quevedo", "New York", "NY").await;
    let wild_sax_band = create_test_artist(db, "The Wild Sax Band", "San Francisco", "CA").await;

    create_test_show(db, guns_n_petals.id, musical_hop.id, now - Duration::days(30)).await;
    create_test_show(db, matt_quevedo.id, park_square.id, now - Duration::days(10)).await;
    for days in [30, 37, 44] {
        create_test_show(db, wild_sax_band.id, park_square.id, now + Duration::days(days)).await;
    }

    SampleDirectory {
        musical_hop,
        dueling_pianos,
        park_square,
        guns_n_petals,
        matt_quevedo,
        wild_sax_band,
    }
}
