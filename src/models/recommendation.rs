use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Bucket a free-time budget falls into, each mapped to a kind of media
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DurationBand {
    /// Under an hour and a half: a few TV episodes
    ShortTv,
    Movie,
    /// A long session with a live-service game
    LiveGame,
    Book,
    /// Two days or more: a story-driven game
    StoryGame,
}

impl DurationBand {
    pub const ALL: [DurationBand; 5] = [
        DurationBand::ShortTv,
        DurationBand::Movie,
        DurationBand::LiveGame,
        DurationBand::Book,
        DurationBand::StoryGame,
    ];

    /// Name of the recommended media type
    pub fn title(&self) -> &'static str {
        match self {
            DurationBand::ShortTv => "TV Series",
            DurationBand::Movie => "Movie",
            DurationBand::LiveGame => "Live Service Game",
            DurationBand::Book => "Book",
            DurationBand::StoryGame => "Story-Driven Game",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DurationBand::ShortTv => {
                "Perfect for a quick binge! TV episodes are ideal for shorter time slots."
            }
            DurationBand::Movie => "Great choice! Movies fit perfectly in this time frame.",
            DurationBand::LiveGame => {
                "Perfect for extended gaming sessions! These games offer continuous entertainment."
            }
            DurationBand::Book => {
                "Excellent! Books are perfect for longer, more immersive experiences."
            }
            DurationBand::StoryGame => {
                "Perfect for deep, immersive gaming experiences with rich narratives!"
            }
        }
    }

    /// Genre used regardless of the user's taste, if the band has one
    pub fn fixed_genre(&self) -> Option<&'static str> {
        match self {
            DurationBand::LiveGame => Some("Action"),
            DurationBand::StoryGame => Some("Adventure"),
            DurationBand::ShortTv | DurationBand::Movie | DurationBand::Book => None,
        }
    }

    /// Whether the duration label is expressed in days rather than hours
    pub fn labels_in_days(&self) -> bool {
        matches!(self, DurationBand::Book | DurationBand::StoryGame)
    }
}

impl Display for DurationBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DurationBand::ShortTv => "short_tv",
            DurationBand::Movie => "movie",
            DurationBand::LiveGame => "live_game",
            DurationBand::Book => "book",
            DurationBand::StoryGame => "story_game",
        };
        write!(f, "{}", name)
    }
}

/// A title shown as an example of what to consume
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogExample {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub year: Option<u16>,
    /// Critic rating on the catalog's own scale
    #[serde(default)]
    pub rating: Option<f32>,
    /// Comma-separated genre tags, e.g. "Comedy, Romance"
    #[serde(default)]
    pub genres: String,
}

impl CatalogExample {
    /// Case-insensitive substring match against the genre tags
    pub fn matches_genre(&self, genre: &str) -> bool {
        self.genres.to_lowercase().contains(&genre.to_lowercase())
    }
}

/// A selectable genre chip for a band
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenreOption {
    pub name: String,
    /// The genre is among the user's preferred genres
    pub preferred: bool,
}

/// Recommendation produced for one time budget
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub duration_band: DurationBand,
    pub hours_requested: f64,
    pub title: String,
    pub description: String,
    /// Formatted budget, e.g. "2.0 hours" or "1.5 days"
    pub duration: String,
    pub primary_genre: String,
    pub genre_options: Vec<GenreOption>,
    pub examples: Vec<CatalogExample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(genres: &str) -> CatalogExample {
        CatalogExample {
            title: "Sherlock".to_string(),
            description: "A modern update of the famous sleuth.".to_string(),
            year: Some(2010),
            rating: Some(9.1),
            genres: genres.to_string(),
        }
    }

    #[test]
    fn test_band_serialization_matches_display() {
        for band in DurationBand::ALL {
            let json = serde_json::to_string(&band).unwrap();
            assert_eq!(json, format!("\"{}\"", band));
        }
    }

    #[test]
    fn test_fixed_genres() {
        assert_eq!(DurationBand::LiveGame.fixed_genre(), Some("Action"));
        assert_eq!(DurationBand::StoryGame.fixed_genre(), Some("Adventure"));
        assert_eq!(DurationBand::Movie.fixed_genre(), None);
    }

    #[test]
    fn test_matches_genre_is_case_insensitive_substring() {
        let sherlock = example("Mystery, Crime");
        assert!(sherlock.matches_genre("crime"));
        assert!(sherlock.matches_genre("MYST"));
        assert!(!sherlock.matches_genre("Comedy"));
    }
}
