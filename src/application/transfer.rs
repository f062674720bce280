//! Tagged JSON payload used for the clipboard and document snapshots.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Entry;

/// Format identifier distinguishing entry payloads from unrelated data.
pub const ENTRY_FORMAT: &str = "BCMEntry";

/// Ordered entries plus the format tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub format: String,
    pub entries: Vec<Entry>,
}

impl TransferPayload {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            format: ENTRY_FORMAT.to_string(),
            entries,
        }
    }

    pub fn encode(&self) -> ApplicationResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ApplicationError::Transfer {
            message: format!("serialize entries: {e}"),
        })
    }

    /// Parse `text`, rejecting anything that is not an entry payload.
    pub fn decode(text: &str) -> ApplicationResult<Self> {
        let payload: Self = serde_json::from_str(text).map_err(|e| ApplicationError::Transfer {
            message: e.to_string(),
        })?;
        if payload.format != ENTRY_FORMAT {
            return Err(ApplicationError::Transfer {
                message: format!("expected format {ENTRY_FORMAT}, found {}", payload.format),
            });
        }
        Ok(payload)
    }

    /// Entries of `text` if it holds a compatible payload.
    pub fn decode_compatible(text: &str) -> Option<Vec<Entry>> {
        Self::decode(text).ok().map(|payload| payload.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_foreign_format_when_decoding_then_rejected() {
        let text = r#"{"format": "PlainText", "entries": []}"#;
        assert!(matches!(
            TransferPayload::decode(text),
            Err(ApplicationError::Transfer { .. })
        ));
        assert!(TransferPayload::decode_compatible(text).is_none());
    }

    #[test]
    fn given_non_json_when_decoding_then_incompatible() {
        assert!(TransferPayload::decode_compatible("hello").is_none());
    }

    #[test]
    fn given_entries_when_encoding_then_tagged_and_ordered() {
        let mut first = Entry::zeroed();
        first.payload.ki_cost = 1;
        let mut second = Entry::zeroed();
        second.payload.ki_cost = 2;
        let text = TransferPayload::new(vec![first.clone(), second.clone()])
            .encode()
            .unwrap();
        assert!(text.contains(ENTRY_FORMAT));
        assert_eq!(
            TransferPayload::decode_compatible(&text),
            Some(vec![first, second])
        );
    }
}
