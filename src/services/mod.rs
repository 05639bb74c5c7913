//! The booking directory: venue, artist and show operations over an explicit
//! database handle, plus the pure helpers they share.

pub mod artists;
pub mod genres;
pub mod schedule;
pub mod search;
pub mod shows;
pub mod venues;

pub use artists::{ArtistDetail, ArtistSummary, VenueShow};
pub use search::{SearchHit, SearchResults};
pub use shows::ShowListing;
pub use venues::{ArtistShow, VenueArea, VenueDetail, VenueSummary};
