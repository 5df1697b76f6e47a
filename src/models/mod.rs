pub mod follow;
pub mod playlist;
pub mod recommendation;
pub mod review;
pub mod statistics;
pub mod tracked_item;
pub mod user;

pub use follow::{Connection, Follow};
pub use playlist::{Playlist, PlaylistEntry};
pub use recommendation::{CatalogExample, DurationBand, GenreOption, Recommendation};
pub use review::Review;
pub use statistics::{
    ByType, GenreCount, GenreRanking, LastCompleted, StatisticsSummary, TypeStatusCounts,
};
pub use tracked_item::{MediaType, Status, TrackedItem, TrackedItemView};
pub use user::UserProfile;
