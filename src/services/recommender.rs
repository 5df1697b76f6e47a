use crate::models::{DurationBand, GenreOption, Recommendation};
use crate::services::{catalog::ExampleCatalog, duration, genres::DEFAULT_GENRE};

/// Maps a budget in hours to its duration band
///
/// Zero, negative and non-finite budgets have no band.
pub fn classify(hours: f64) -> Option<DurationBand> {
    if !hours.is_finite() || hours <= 0.0 {
        return None;
    }

    let band = if hours < 1.5 {
        DurationBand::ShortTv
    } else if hours < 4.0 {
        DurationBand::Movie
    } else if hours < 24.0 {
        DurationBand::LiveGame
    } else if hours < 48.0 {
        DurationBand::Book
    } else {
        DurationBand::StoryGame
    };
    Some(band)
}

/// Human-readable budget: hours for short bands, days for long ones
pub fn duration_label(band: DurationBand, hours: f64) -> String {
    if band.labels_in_days() {
        format!("{:.1} days", hours / 24.0)
    } else {
        format!("{:.1} hours", hours)
    }
}

/// Time-budget recommender
///
/// Turns a free-text time budget into a media-type recommendation, personalized
/// by the user's genre ranking and illustrated from an example catalog.
pub struct Recommender<'a> {
    catalog: &'a dyn ExampleCatalog,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a dyn ExampleCatalog) -> Self {
        Self { catalog }
    }

    /// Recommends something for a free-text budget such as "2 hours"
    ///
    /// Returns `None` when the text does not describe a positive amount of time.
    pub fn recommend_for_text(
        &self,
        input: &str,
        preferred_genres: &[String],
        genre: Option<&str>,
    ) -> Option<Recommendation> {
        let hours = duration::parse_hours(input);
        self.recommend(hours, preferred_genres, genre)
    }

    /// Recommends something for a budget already expressed in hours
    ///
    /// `preferred_genres` is the user's ranking, best first. `genre` narrows
    /// the examples to one genre tag.
    pub fn recommend(
        &self,
        hours: f64,
        preferred_genres: &[String],
        genre: Option<&str>,
    ) -> Option<Recommendation> {
        let band = classify(hours)?;

        let primary_genre = match band.fixed_genre() {
            Some(fixed) => fixed.to_string(),
            None => preferred_genres
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_GENRE.to_string()),
        };

        let genre_options = self
            .catalog
            .genre_options(band)
            .iter()
            .map(|name| GenreOption {
                name: name.clone(),
                preferred: preferred_genres.contains(name),
            })
            .collect();

        let genre = genre.map(str::trim).filter(|g| !g.is_empty());
        let examples = self.catalog.lookup(band, genre);

        tracing::debug!(
            hours,
            band = %band,
            catalog = self.catalog.name(),
            examples = examples.len(),
            "Recommendation selected"
        );

        Some(Recommendation {
            duration_band: band,
            hours_requested: hours,
            title: band.title().to_string(),
            description: band.description().to_string(),
            duration: duration_label(band, hours),
            primary_genre,
            genre_options,
            examples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogExample;
    use crate::services::catalog::StaticCatalog;

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// Catalog with one example per band, tagged after the band
    struct TinyCatalog {
        example: Vec<CatalogExample>,
        genres: Vec<String>,
    }

    impl TinyCatalog {
        fn new() -> Self {
            Self {
                example: vec![CatalogExample {
                    title: "Arrival".to_string(),
                    description: "Linguist meets visitors.".to_string(),
                    year: Some(2016),
                    rating: Some(7.9),
                    genres: "Sci-Fi, Drama".to_string(),
                }],
                genres: genres(&["Sci-Fi", "Drama", "Comedy"]),
            }
        }
    }

    impl ExampleCatalog for TinyCatalog {
        fn examples(&self, _band: DurationBand) -> &[CatalogExample] {
            &self.example
        }

        fn genre_options(&self, _band: DurationBand) -> &[String] {
            &self.genres
        }

        fn name(&self) -> &'static str {
            "tiny"
        }
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(0.5), Some(DurationBand::ShortTv));
        assert_eq!(classify(2.0), Some(DurationBand::Movie));
        assert_eq!(classify(10.0), Some(DurationBand::LiveGame));
        assert_eq!(classify(30.0), Some(DurationBand::Book));
        assert_eq!(classify(72.0), Some(DurationBand::StoryGame));
        assert_eq!(classify(0.0), None);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(1.49), Some(DurationBand::ShortTv));
        assert_eq!(classify(1.5), Some(DurationBand::Movie));
        assert_eq!(classify(4.0), Some(DurationBand::LiveGame));
        assert_eq!(classify(24.0), Some(DurationBand::Book));
        assert_eq!(classify(48.0), Some(DurationBand::StoryGame));
        assert_eq!(classify(-3.0), None);
        assert_eq!(classify(f64::NAN), None);
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(duration_label(DurationBand::ShortTv, 0.5), "0.5 hours");
        assert_eq!(duration_label(DurationBand::Movie, 2.0), "2.0 hours");
        assert_eq!(duration_label(DurationBand::Book, 36.0), "1.5 days");
        assert_eq!(duration_label(DurationBand::StoryGame, 168.0), "7.0 days");
    }

    #[test]
    fn test_zero_budget_has_no_recommendation() {
        let catalog = TinyCatalog::new();
        let recommender = Recommender::new(&catalog);
        assert!(recommender.recommend_for_text("garbage", &[], None).is_none());
        assert!(recommender.recommend_for_text("0 hours", &[], None).is_none());
    }

    #[test]
    fn test_user_genre_drives_short_bands() {
        let catalog = TinyCatalog::new();
        let recommender = Recommender::new(&catalog);
        let preferred = genres(&["Drama", "Comedy"]);

        let rec = recommender.recommend_for_text("2 hours", &preferred, None).unwrap();
        assert_eq!(rec.duration_band, DurationBand::Movie);
        assert_eq!(rec.hours_requested, 2.0);
        assert_eq!(rec.primary_genre, "Drama");
        assert_eq!(rec.duration, "2.0 hours");
        assert_eq!(rec.title, "Movie");

        let rec = recommender.recommend_for_text("1 day", &preferred, None).unwrap();
        assert_eq!(rec.duration_band, DurationBand::Book);
        assert_eq!(rec.primary_genre, "Drama");
        assert_eq!(rec.duration, "1.0 days");
    }

    #[test]
    fn test_missing_preferences_default_to_romance() {
        let catalog = TinyCatalog::new();
        let rec = Recommender::new(&catalog)
            .recommend_for_text("30 minutes", &[], None)
            .unwrap();
        assert_eq!(rec.duration_band, DurationBand::ShortTv);
        assert_eq!(rec.primary_genre, "Romance");
    }

    #[test]
    fn test_game_bands_use_fixed_genres() {
        let catalog = TinyCatalog::new();
        let recommender = Recommender::new(&catalog);
        let preferred = genres(&["Drama"]);

        let live = recommender.recommend(10.0, &preferred, None).unwrap();
        assert_eq!(live.primary_genre, "Action");

        let story = recommender.recommend(72.0, &preferred, None).unwrap();
        assert_eq!(story.primary_genre, "Adventure");
    }

    #[test]
    fn test_genre_options_flag_preferences() {
        let catalog = TinyCatalog::new();
        let rec = Recommender::new(&catalog)
            .recommend(2.0, &genres(&["Comedy"]), None)
            .unwrap();

        let flagged: Vec<&str> = rec
            .genre_options
            .iter()
            .filter(|o| o.preferred)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Comedy"]);
        assert_eq!(rec.genre_options.len(), 3);
    }

    #[test]
    fn test_blank_genre_filter_is_ignored() {
        let catalog = TinyCatalog::new();
        let recommender = Recommender::new(&catalog);

        let rec = recommender.recommend(2.0, &[], Some("  ")).unwrap();
        assert_eq!(rec.examples.len(), 1);

        let rec = recommender.recommend(2.0, &[], Some("Western")).unwrap();
        assert!(rec.examples.is_empty());
    }

    #[test]
    fn test_builtin_catalog_examples_are_narrowed() {
        let catalog = StaticCatalog::builtin().unwrap();
        let rec = Recommender::new(&catalog)
            .recommend_for_text("45 min", &[], Some("comedy"))
            .unwrap();

        assert_eq!(rec.duration_band, DurationBand::ShortTv);
        assert_eq!(rec.examples.len(), 4);
        assert!(rec.examples.iter().all(|e| e.matches_genre("Comedy")));
        assert_eq!(rec.examples[0].title, "Friends");
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let catalog = StaticCatalog::builtin().unwrap();
        let recommender = Recommender::new(&catalog);
        let preferred = genres(&["Fantasy"]);
        assert_eq!(
            recommender.recommend_for_text("3 days", &preferred, Some("RPG")),
            recommender.recommend_for_text("3 days", &preferred, Some("RPG"))
        );
    }
}
