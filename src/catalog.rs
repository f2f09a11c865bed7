use crate::models::Track;
use crate::mood::MoodCategory;
use anyhow::Result;

/// Search collaborator: turns a search phrase into tracks
#[cfg_attr(test, mockall::automock)]
pub trait TrackSearch: Send + Sync {
    fn search(&self, term: &str, limit: usize) -> Result<Vec<Track>>;
}

/// Offline catalog returning canned tracks, for running without access to
/// a streaming service.
///
/// The table is chosen by the first mood name appearing in the search
/// phrase; phrases naming no known table get the happy one.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineCatalog;

impl OfflineCatalog {
    pub fn new() -> Self {
        Self
    }

    fn table_for(category: MoodCategory) -> Option<&'static [(&'static str, &'static str)]> {
        match category {
            MoodCategory::Happy => Some(&[
                ("Happy", "Pharrell Williams"),
                ("Good as Hell", "Lizzo"),
                ("Uptown Funk", "Mark Ronson ft. Bruno Mars"),
                ("Can't Stop the Feeling!", "Justin Timberlake"),
                ("Walking on Sunshine", "Katrina and the Waves"),
                ("I Gotta Feeling", "The Black Eyed Peas"),
                ("September", "Earth, Wind & Fire"),
                ("Good Vibrations", "The Beach Boys"),
                ("Mr. Blue Sky", "Electric Light Orchestra"),
                ("Dancing Queen", "ABBA"),
            ]),
            MoodCategory::Sad => Some(&[
                ("Someone Like You", "Adele"),
                ("Hurt", "Johnny Cash"),
                ("Mad World", "Gary Jules"),
                ("Black", "Pearl Jam"),
                ("Everybody Hurts", "R.E.M."),
                ("Tears in Heaven", "Eric Clapton"),
                ("The Night We Met", "Lord Huron"),
                ("Skinny Love", "Bon Iver"),
                ("Hallelujah", "Jeff Buckley"),
                ("Fix You", "Coldplay"),
            ]),
            MoodCategory::Angry => Some(&[
                ("Break Stuff", "Limp Bizkit"),
                ("Bodies", "Drowning Pool"),
                ("Killing in the Name", "Rage Against the Machine"),
                ("Chop Suey!", "System of a Down"),
                ("The Beautiful People", "Marilyn Manson"),
                ("Toxicity", "System of a Down"),
                ("Du Hast", "Rammstein"),
                ("Freak on a Leash", "Korn"),
                ("One Step Closer", "Linkin Park"),
                ("Sabotage", "Beastie Boys"),
            ]),
            MoodCategory::Frustrated => Some(&[
                ("In the End", "Linkin Park"),
                ("Numb", "Linkin Park"),
                ("Crawling", "Linkin Park"),
                ("Heavy", "Linkin Park ft. Kiiara"),
                ("Boulevard of Broken Dreams", "Green Day"),
                ("Hurt", "Nine Inch Nails"),
                ("Breaking the Habit", "Linkin Park"),
                ("Somewhere I Belong", "Linkin Park"),
                ("Papercut", "Linkin Park"),
                ("Points of Authority", "Linkin Park"),
            ]),
            _ => None,
        }
    }

    /// First category whose tag appears in the phrase
    fn category_in(term: &str) -> Option<MoodCategory> {
        let lower = term.to_lowercase();
        MoodCategory::ALL
            .into_iter()
            .find(|category| lower.contains(category.tag()))
    }
}

impl TrackSearch for OfflineCatalog {
    fn search(&self, term: &str, limit: usize) -> Result<Vec<Track>> {
        let category = Self::category_in(term).unwrap_or(MoodCategory::Happy);
        let table = Self::table_for(category)
            .or_else(|| Self::table_for(MoodCategory::Happy))
            .unwrap_or_default();

        let tracks: Vec<Track> = table
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, (title, artist))| {
                let id = format!("{}-mock-{index}", category.name());
                Track::new(*title, *artist)
                    .with_id(id.clone())
                    .with_catalog_id(id)
            })
            .collect();

        log::info!("Offline catalog: {} mock tracks for '{term}'", tracks.len());
        Ok(tracks)
    }
}
