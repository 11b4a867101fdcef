//! Source-record lookup port

use async_trait::async_trait;

use crate::domain::errors::RecordSourceError;
use crate::domain::models::{DeckFile, DocVersion, TicketComment};

/// Lookup of the records each chaos agent reasons over
///
/// Every method defaults to "nothing found", in which case the agent uses
/// its built-in sample records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Files matching a deck search
    async fn search_files(&self, _query: &str) -> Result<Vec<DeckFile>, RecordSourceError> {
        Ok(Vec::new())
    }

    /// Version history of a spec document
    async fn versions(&self, _subject: &str) -> Result<Vec<DocVersion>, RecordSourceError> {
        Ok(Vec::new())
    }

    /// Comment thread of a ticket
    async fn comments(&self, _ticket: &str) -> Result<Vec<TicketComment>, RecordSourceError> {
        Ok(Vec::new())
    }
}

/// Record source with no backing integration
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecordSource;

#[async_trait]
impl RecordSource for NoRecordSource {}
