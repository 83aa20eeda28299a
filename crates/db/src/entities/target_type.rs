//! Target type tag disambiguating action target id namespaces.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of entity an action points at.
///
/// Stored and transported as its integer value; the integer assignments are
/// part of the wire contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// A user profile.
    User = 1,
    /// A post.
    Post = 2,
    /// A comment.
    Comment = 3,
}

impl TryFrom<i32> for TargetType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::User),
            2 => Ok(Self::Post),
            3 => Ok(Self::Comment),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_wire_values_decode() {
        assert_eq!(TargetType::try_from(1), Ok(TargetType::User));
        assert_eq!(TargetType::try_from(2), Ok(TargetType::Post));
        assert_eq!(TargetType::try_from(3), Ok(TargetType::Comment));
    }

    #[test]
    fn test_unknown_wire_value_is_rejected() {
        assert_eq!(TargetType::try_from(0), Err(0));
        assert_eq!(TargetType::try_from(42), Err(42));
    }

    #[test]
    fn test_wire_value_round_trip() {
        for t in [TargetType::User, TargetType::Post, TargetType::Comment] {
            assert_eq!(TargetType::try_from(t as i32), Ok(t));
        }
    }
}
