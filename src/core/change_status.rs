//! Type-safe file change status.
//!
//! [`ChangeStatus`] replaces the bare change codes (`"A"`, `"D"`, `"M"`, `"R"`, ...)
//! that providers put on the wire. The four statuses the browser distinguishes get
//! their own variant; every other single-letter code is kept as [`ChangeStatus::Other`]
//! so it can still be displayed.
//!
//! # Key Features
//! - **Strict wire format**: Serializes as the bare code, rejects anything that is not
//!   a single ASCII letter
//! - **git2 integration**: Direct conversion from [`git2::Delta`]
//! - **Display formatting**: Code and human-readable description for the UI

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChangeStatus {
    /// Added file (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Modified file (M)
    Modified,
    /// Renamed file (R)
    Renamed,
    /// Any other change code (copied, type change, unmerged, ...)
    Other(char),
}

impl ChangeStatus {
    /// Convert a libgit2 delta into a change status.
    ///
    /// Untracked files are reported as additions. Every result carries a letter code,
    /// so it survives the wire format.
    pub fn from_delta(delta: git2::Delta) -> ChangeStatus {
        match delta {
            git2::Delta::Added | git2::Delta::Untracked => ChangeStatus::Added,
            git2::Delta::Deleted => ChangeStatus::Deleted,
            git2::Delta::Modified => ChangeStatus::Modified,
            git2::Delta::Renamed => ChangeStatus::Renamed,
            git2::Delta::Copied => ChangeStatus::Other('C'),
            git2::Delta::Typechange => ChangeStatus::Other('T'),
            git2::Delta::Conflicted => ChangeStatus::Other('U'),
            git2::Delta::Ignored => ChangeStatus::Other('I'),
            git2::Delta::Unreadable => ChangeStatus::Other('X'),
            git2::Delta::Unmodified => ChangeStatus::Other('N'),
        }
    }

    /// Single-character change code
    pub fn code(&self) -> char {
        match self {
            ChangeStatus::Added => 'A',
            ChangeStatus::Deleted => 'D',
            ChangeStatus::Modified => 'M',
            ChangeStatus::Renamed => 'R',
            ChangeStatus::Other(code) => *code,
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "new",
            ChangeStatus::Deleted => "deleted",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Renamed => "renamed",
            ChangeStatus::Other('C') => "copied",
            ChangeStatus::Other('T') => "type changed",
            ChangeStatus::Other('U') => "unmerged",
            ChangeStatus::Other('N') => "unmodified",
            ChangeStatus::Other(_) => "changed",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for ChangeStatus {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        let mut chars = code.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => return Err(format!("invalid change status code '{code}'")),
        };

        Ok(match letter {
            'A' => ChangeStatus::Added,
            'D' => ChangeStatus::Deleted,
            'M' => ChangeStatus::Modified,
            'R' => ChangeStatus::Renamed,
            other => ChangeStatus::Other(other),
        })
    }
}

impl From<ChangeStatus> for String {
    fn from(status: ChangeStatus) -> Self {
        status.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_status_codes() {
        assert_eq!(ChangeStatus::Added.code(), 'A');
        assert_eq!(ChangeStatus::Deleted.code(), 'D');
        assert_eq!(ChangeStatus::Modified.code(), 'M');
        assert_eq!(ChangeStatus::Renamed.code(), 'R');
        assert_eq!(ChangeStatus::Other('C').code(), 'C');
    }

    #[test]
    fn test_change_status_from_code() {
        assert_eq!(ChangeStatus::try_from("M".to_string()), Ok(ChangeStatus::Modified));
        assert_eq!(ChangeStatus::try_from("R".to_string()), Ok(ChangeStatus::Renamed));
        assert_eq!(ChangeStatus::try_from("t".to_string()), Ok(ChangeStatus::Other('T')));
        assert!(ChangeStatus::try_from(String::new()).is_err());
        assert!(ChangeStatus::try_from("??".to_string()).is_err());
        assert!(ChangeStatus::try_from("1".to_string()).is_err());
    }

    #[test]
    fn test_change_status_wire_format() {
        let json = serde_json::to_string(&ChangeStatus::Deleted).unwrap();
        assert_eq!(json, "\"D\"");

        let parsed: ChangeStatus = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(parsed, ChangeStatus::Other('C'));

        assert!(serde_json::from_str::<ChangeStatus>("\"modified\"").is_err());
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(ChangeStatus::from_delta(git2::Delta::Added), ChangeStatus::Added);
        assert_eq!(ChangeStatus::from_delta(git2::Delta::Untracked), ChangeStatus::Added);
        assert_eq!(ChangeStatus::from_delta(git2::Delta::Modified), ChangeStatus::Modified);
        assert_eq!(ChangeStatus::from_delta(git2::Delta::Renamed), ChangeStatus::Renamed);
        assert_eq!(ChangeStatus::from_delta(git2::Delta::Copied), ChangeStatus::Other('C'));
    }

    #[test]
    fn test_every_delta_survives_the_wire_format() {
        let deltas = [
            git2::Delta::Unmodified,
            git2::Delta::Added,
            git2::Delta::Deleted,
            git2::Delta::Modified,
            git2::Delta::Renamed,
            git2::Delta::Copied,
            git2::Delta::Ignored,
            git2::Delta::Untracked,
            git2::Delta::Typechange,
            git2::Delta::Unreadable,
            git2::Delta::Conflicted,
        ];

        for delta in deltas {
            let status = ChangeStatus::from_delta(delta);
            let json = serde_json::to_string(&status).unwrap();
            let parsed: ChangeStatus = serde_json::from_str(&json)
                .unwrap_or_else(|e| panic!("{delta:?} encoded as {json}: {e}"));
            assert_eq!(parsed, status);
        }
        assert_eq!(
            ChangeStatus::from_delta(git2::Delta::Unmodified).description(),
            "unmodified"
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(ChangeStatus::Modified.description(), "modified");
        assert_eq!(ChangeStatus::Added.description(), "new");
        assert_eq!(ChangeStatus::Other('T').description(), "type changed");
        assert_eq!(ChangeStatus::Other('Z').description(), "changed");
    }
}
