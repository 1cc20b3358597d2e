//! Database repositories
//!
//! Provides the data access layer for group membership. Each operation is a
//! single statement (member listing for a user's group issues two reads); no
//! retries and no multi-statement transactions.

pub mod group;
pub mod memory;

use async_trait::async_trait;
use gym_groups_shared::{ActivityStatus, Group, User};
use std::sync::Arc;
use thiserror::Error;

pub use group::PgGroupRepository;
pub use memory::InMemoryGroupRepository;

/// Data access errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("stored data is invalid: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage contract for groups and memberships
///
/// Cancellation follows the caller: dropping the returned future abandons the
/// in-flight query.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Users with a membership in `gym_id`, each carrying that membership's
    /// status. Empty when the gym has no members.
    async fn get_group_members(&self, gym_id: &str) -> RepositoryResult<Vec<User>>;

    /// The group of the gym `user_id` belongs to, with its members
    async fn get_user_group(&self, user_id: &str) -> RepositoryResult<(Group, Vec<User>)>;

    /// Set the status of one membership, failing with `NotFound` if it does
    /// not exist
    async fn update_status(
        &self,
        user_id: &str,
        gym_id: &str,
        status: ActivityStatus,
    ) -> RepositoryResult<()>;

    async fn get_status(&self, user_id: &str, gym_id: &str) -> RepositoryResult<ActivityStatus>;

    /// Create an active membership; an existing membership is left untouched
    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> RepositoryResult<()>;
}

#[async_trait]
impl<T: GroupRepository + ?Sized> GroupRepository for Arc<T> {
    async fn get_group_members(&self, gym_id: &str) -> RepositoryResult<Vec<User>> {
        (**self).get_group_members(gym_id).await
    }

    async fn get_user_group(&self, user_id: &str) -> RepositoryResult<(Group, Vec<User>)> {
        (**self).get_user_group(user_id).await
    }

    async fn update_status(
        &self,
        user_id: &str,
        gym_id: &str,
        status: ActivityStatus,
    ) -> RepositoryResult<()> {
        (**self).update_status(user_id, gym_id, status).await
    }

    async fn get_status(&self, user_id: &str, gym_id: &str) -> RepositoryResult<ActivityStatus> {
        (**self).get_status(user_id, gym_id).await
    }

    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> RepositoryResult<()> {
        (**self).add_user_to_gym(user_id, gym_id).await
    }
}
