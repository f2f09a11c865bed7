use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A song returned by the catalog search, as cached and shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(rename = "artworkURL")]
    pub artwork_url: Option<String>,
    #[serde(rename = "previewURL")]
    pub preview_url: Option<String>,
    #[serde(rename = "catalogID")]
    pub catalog_id: Option<String>,
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl Track {
    /// Create a track with a fresh random identifier, added now
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            artist: artist.into(),
            artwork_url: None,
            preview_url: None,
            catalog_id: None,
            is_liked: false,
            date_added: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<String>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = date_added;
        self
    }

    /// Copy of this track with the given liked flag
    pub fn with_liked(&self, is_liked: bool) -> Track {
        Track {
            is_liked,
            ..self.clone()
        }
    }

    /// Copy of this track with the liked flag flipped
    pub fn toggled_like(&self) -> Track {
        self.with_liked(!self.is_liked)
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }
}
