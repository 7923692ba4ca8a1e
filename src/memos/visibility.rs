//! Memo visibility normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{MemosError, MemosResult};

/// Access scope attached to a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
    #[serde(rename = "VISIBILITY_UNSPECIFIED")]
    Unspecified,
}

impl Visibility {
    /// Canonical token sent to the memos API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Protected => "PROTECTED",
            Visibility::Private => "PRIVATE",
            Visibility::Unspecified => "VISIBILITY_UNSPECIFIED",
        }
    }

    /// Parse caller input, ignoring case and surrounding whitespace.
    ///
    /// `UNSPECIFIED` is accepted as an alias for `VISIBILITY_UNSPECIFIED`.
    pub fn normalize(value: &str) -> MemosResult<Self> {
        let clean = value.trim().to_ascii_uppercase();
        match clean.as_str() {
            "" => Err(MemosError::EmptyVisibility),
            "PUBLIC" => Ok(Visibility::Public),
            "PROTECTED" => Ok(Visibility::Protected),
            "PRIVATE" => Ok(Visibility::Private),
            "VISIBILITY_UNSPECIFIED" | "UNSPECIFIED" => Ok(Visibility::Unspecified),
            _ => Err(MemosError::InvalidVisibility {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
