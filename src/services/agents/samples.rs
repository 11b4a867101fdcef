//! Built-in sample records used when the record source has nothing.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::models::{DeckFile, DocVersion, SizeDelta, TicketComment};

/// Characters left unescaped in a URL path component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const SHARED_DOCUMENTS: &str = "https://sharepoint.microsoft.com/sites/shame/Shared%20Documents";
const DEFAULT_DECK: &str = "Q3_STRATEGY_FINAL_v9.pptx";
const DECK_COPIES: i64 = 17;

const DEFAULT_PRD: &str = "Q3_Prd_Dark_Patterns.md";
const PRD_EDITS: [(&str, &str); 5] = [
    ("Legal", "Legal removed \"no dark patterns\" clause"),
    ("Growth PM", "Growth PM added 3 extra nudges"),
    ("VP of Engagement", "VP swapped \"opt-in\" for \"pre-ticked box\""),
    ("Random Director", "Director inserted 4 review gates and 0 owners"),
    ("Security", "Security added one sentence nobody read"),
];

const DEFAULT_TICKET: &str = "AZ-666666";
const TICKET_COMMENTS: i64 = 400;
const RESOLUTION_COMMENT: i64 = 312;
const MANAGER_PING_EVERY: i64 = 40;

/// Timestamp rendering used for receipts
pub fn receipt_stamp(stamp: DateTime<Utc>) -> String {
    stamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strip one trailing `.ext` made of word characters
fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            stem
        }
        _ => name,
    }
}

/// One fresh, popular deck plus seventeen stale copies
pub fn deck_files(query: &str, now: DateTime<Utc>) -> Vec<DeckFile> {
    let trimmed = query.trim();
    let stem = file_stem(if trimmed.is_empty() { DEFAULT_DECK } else { trimmed });

    let mut files = vec![DeckFile {
        name: Some(format!("{stem}.pptx")),
        web_url: Some(format!("{SHARED_DOCUMENTS}/{DEFAULT_DECK}")),
        modified_at: Some(now),
        created_at: None,
        accessed_at: None,
        views: Some(42),
    }];

    files.extend((1..=DECK_COPIES).map(|n| {
        let name = format!("{stem}_COPY_{n}.pptx");
        DeckFile {
            web_url: Some(format!(
                "{SHARED_DOCUMENTS}/{}",
                utf8_percent_encode(&name, COMPONENT)
            )),
            name: Some(name),
            modified_at: Some(now - Duration::hours(n)),
            created_at: None,
            accessed_at: None,
            views: Some(1),
        }
    }));
    files
}

/// Five hourly edits by the usual suspects, oldest first
pub fn doc_versions(subject: &str, now: DateTime<Utc>) -> Vec<DocVersion> {
    let trimmed = subject.trim();
    let base = if trimmed.is_empty() { DEFAULT_PRD } else { trimmed };
    let total = PRD_EDITS.len() as i64;

    PRD_EDITS
        .iter()
        .zip(1_i64..)
        .map(|((author, change), n)| DocVersion {
            id: Some(format!("{base}-v{n}")),
            modified_at: Some(now - Duration::hours(total - n + 1)),
            author: Some((*author).to_string()),
            size_delta: Some(SizeDelta::Description((*change).to_string())),
        })
        .collect()
}

/// Four hundred comments, five minutes apart, with the fix buried at #312
pub fn ticket_comments(ticket: &str, now: DateTime<Utc>) -> Vec<TicketComment> {
    let trimmed = ticket.trim();
    let base = if trimmed.is_empty() { DEFAULT_TICKET } else { trimmed };

    (1..=TICKET_COMMENTS)
        .map(|n| {
            let (author, content) = if n == RESOLUTION_COMMENT {
                (
                    "Overworked Intern",
                    "Intern quietly fixed it in prod, wrote \"resolved on call\"; nobody read.",
                )
            } else if n % MANAGER_PING_EVERY == 0 {
                (
                    "Manager asking \"any update?\"",
                    "\"Any update?\" (sent from mobile, no context).",
                )
            } else {
                (
                    "Random stakeholder",
                    "Added another screenshot and tagged four teams.",
                )
            };
            TicketComment {
                id: Some(n.to_string()),
                author: Some(author.to_string()),
                content: Some(format!("[{base}] {content}")),
                created_at: Some(now - Duration::minutes((TICKET_COMMENTS - n) * 5)),
            }
        })
        .collect()
}
