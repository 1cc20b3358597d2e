//! Data models for the gym group service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Activity status of a membership
///
/// Serializes only as `"active"` or `"inactive"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// Member attends the gym
    #[default]
    Active,
    /// Member does not attend the gym
    Inactive,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ActivityStatus::Active),
            "inactive" => Ok(ActivityStatus::Inactive),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// Group member as seen through a membership
///
/// `status` is the status of the membership the user was listed through,
/// not a property of the user record itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership roster of a single gym
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub gym_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Link between a user and a gym
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMembership {
    pub id: String,
    pub user_id: String,
    pub gym_id: String,
    pub status: ActivityStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
