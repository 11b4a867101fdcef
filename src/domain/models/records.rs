//! Source records the chaos agents reason over

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file found while searching for duplicated decks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckFile {
    /// File name
    pub name: Option<String>,
    /// Link to the file
    pub web_url: Option<String>,
    /// Last modification time
    pub modified_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Last access time
    pub accessed_at: Option<DateTime<Utc>>,
    /// View count
    pub views: Option<u64>,
}

impl DeckFile {
    /// Ranking score: most recent timestamp in epoch millis plus 1000 per view
    pub fn score(&self) -> i64 {
        let time = self
            .modified_at
            .or(self.accessed_at)
            .or(self.created_at)
            .map_or(0, |stamp| stamp.timestamp_millis());
        let views = i64::try_from(self.views.unwrap_or(0)).unwrap_or(i64::MAX);
        time.saturating_add(views.saturating_mul(1000))
    }
}

/// Size change recorded on a document version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeDelta {
    /// Byte count
    Bytes(f64),
    /// Free-form description, e.g. "+2 KB"
    Description(String),
}

/// One historical version of a product spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocVersion {
    /// Version id
    pub id: Option<String>,
    /// When the version was saved
    pub modified_at: Option<DateTime<Utc>>,
    /// Who saved it
    pub author: Option<String>,
    /// Size change against the previous version
    pub size_delta: Option<SizeDelta>,
}

/// One comment on a support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketComment {
    /// Comment id
    pub id: Option<String>,
    /// Comment author
    pub author: Option<String>,
    /// Comment body
    pub content: Option<String>,
    /// When the comment was posted
    pub created_at: Option<DateTime<Utc>>,
}
