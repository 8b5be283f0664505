//! Poll entity for binary-choice "would you rather" questions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use wyr_common::AppError;

/// Category stored when none is supplied.
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll")]
pub struct Model {
    /// Assigned by the database, never reused.
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub question: String,

    pub option_a: String,

    pub option_b: String,

    /// Free-text grouping (e.g. "movies", "food").
    pub category: String,

    pub votes_a: i32,

    pub votes_b: i32,

    /// Inactive polls are soft-deleted: hidden from the public and not votable.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// One of the two options a vote can go to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteSide {
    A,
    B,
}

impl VoteSide {
    /// The tally column this side increments.
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::A => Column::VotesA,
            Self::B => Column::VotesB,
        }
    }

    /// Wire representation, `"a"` or `"b"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl fmt::Display for VoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts exactly `"a"` or `"b"`; nothing is trimmed or case-folded.
impl FromStr for VoteSide {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            other => Err(AppError::Validation(format!(
                "choice must be \"a\" or \"b\", got {other:?}"
            ))),
        }
    }
}

impl Model {
    /// Tally for one side.
    #[must_use]
    pub const fn votes_for(&self, side: VoteSide) -> i32 {
        match side {
            VoteSide::A => self.votes_a,
            VoteSide::B => self.votes_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_side_parses_exact_values() {
        assert_eq!("a".parse::<VoteSide>().ok(), Some(VoteSide::A));
        assert_eq!("b".parse::<VoteSide>().ok(), Some(VoteSide::B));
    }

    #[test]
    fn test_vote_side_rejects_other_values() {
        for bad in ["A", "B", " a", "c", "", "ab", "option_a"] {
            assert!(
                matches!(bad.parse::<VoteSide>(), Err(AppError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_vote_side_column() {
        assert!(matches!(VoteSide::A.column(), Column::VotesA));
        assert!(matches!(VoteSide::B.column(), Column::VotesB));
    }
}
