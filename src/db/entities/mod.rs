pub mod artist;
pub mod show;
pub mod venue;

pub use artist::Entity as Artist;
pub use show::Entity as Show;
pub use venue::Entity as Venue;
