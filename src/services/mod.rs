pub mod catalog;
pub mod clock;
pub mod duration;
pub mod follows;
pub mod genres;
pub mod hours;
pub mod library;
pub mod playlists;
pub mod recommender;
pub mod reviews;
pub mod statistics;
pub mod store;
pub mod streak;
pub mod tracking;

pub use catalog::{ExampleCatalog, StaticCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use library::{GenreReport, Library, NewItem};
pub use playlists::PlaylistUpdate;
pub use recommender::Recommender;
pub use store::{InMemoryStore, TrackedItemStore};
