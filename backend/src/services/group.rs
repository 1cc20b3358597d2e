//! Group membership service

use super::ServiceResult;
use crate::repositories::GroupRepository;
use async_trait::async_trait;
use gym_groups_shared::validation::{parse_status, require_id};
use gym_groups_shared::{ActivityStatus, Group, User};
use tracing::debug;

/// Business operations on gym groups
///
/// Handlers depend on this contract; [`GroupManager`] is the production
/// implementation.
#[async_trait]
pub trait GroupService: Send + Sync {
    async fn get_group_members(&self, gym_id: &str) -> ServiceResult<Vec<User>>;

    async fn get_user_group(&self, user_id: &str) -> ServiceResult<(Group, Vec<User>)>;

    /// `status` is raw client input; anything but `active`/`inactive` is a
    /// validation error
    async fn update_status(&self, user_id: &str, gym_id: &str, status: &str) -> ServiceResult<()>;

    async fn get_status(&self, user_id: &str, gym_id: &str) -> ServiceResult<ActivityStatus>;

    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> ServiceResult<()>;
}

/// Validating pass-through to a [`GroupRepository`]
pub struct GroupManager<R> {
    repo: R,
}

impl<R: GroupRepository> GroupManager<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[async_trait]
impl<R: GroupRepository> GroupService for GroupManager<R> {
    async fn get_group_members(&self, gym_id: &str) -> ServiceResult<Vec<User>> {
        require_id(gym_id, "gym ID")?;

        let members = self.repo.get_group_members(gym_id).await?;
        debug!(gym_id, count = members.len(), "Listed group members");
        Ok(members)
    }

    async fn get_user_group(&self, user_id: &str) -> ServiceResult<(Group, Vec<User>)> {
        require_id(user_id, "user ID")?;

        Ok(self.repo.get_user_group(user_id).await?)
    }

    async fn update_status(&self, user_id: &str, gym_id: &str, status: &str) -> ServiceResult<()> {
        require_id(user_id, "user ID")?;
        require_id(gym_id, "gym ID")?;
        let status = parse_status(status)?;

        self.repo.update_status(user_id, gym_id, status).await?;
        debug!(user_id, gym_id, %status, "Updated membership status");
        Ok(())
    }

    async fn get_status(&self, user_id: &str, gym_id: &str) -> ServiceResult<ActivityStatus> {
        require_id(user_id, "user ID")?;
        require_id(gym_id, "gym ID")?;

        Ok(self.repo.get_status(user_id, gym_id).await?)
    }

    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> ServiceResult<()> {
        require_id(user_id, "user ID")?;
        require_id(gym_id, "gym ID")?;

        self.repo.add_user_to_gym(user_id, gym_id).await?;
        debug!(user_id, gym_id, "Added user to gym");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryGroupRepository;
    use crate::services::ServiceError;
    use rstest::rstest;

    fn service() -> GroupManager<InMemoryGroupRepository> {
        let repo = InMemoryGroupRepository::new();
        repo.insert_user("u1", "u1@example.com", "Ada", "Lovelace");
        repo.insert_group("gymA", "Gym A");
        GroupManager::new(repo)
    }

    #[rstest]
    #[case("", "gymA", "active")]
    #[case("u1", "", "active")]
    #[case("u1", "gymA", "")]
    #[case("u1", "gymA", "ACTIVE")]
    #[case("u1", "gymA", "banned")]
    #[tokio::test]
    async fn test_update_status_validates_before_storage(
        #[case] user_id: &str,
        #[case] gym_id: &str,
        #[case] status: &str,
    ) {
        let service = service();

        let result = service.update_status(user_id, gym_id, status).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(service.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_ids_rejected_before_storage() {
        let service = service();

        assert!(matches!(
            service.get_group_members("").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.get_user_group("").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.get_status("", "gymA").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.add_user_to_gym("u1", "").await,
            Err(ServiceError::Validation(_))
        ));
        assert_eq!(service.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_status_toggles_both_ways() {
        let service = service();
        service.add_user_to_gym("u1", "gymA").await.unwrap();
        assert_eq!(
            service.get_status("u1", "gymA").await.unwrap(),
            ActivityStatus::Active
        );

        service.update_status("u1", "gymA", "inactive").await.unwrap();
        service.update_status("u1", "gymA", "inactive").await.unwrap();
        assert_eq!(
            service.get_status("u1", "gymA").await.unwrap(),
            ActivityStatus::Inactive
        );

        service.update_status("u1", "gymA", "active").await.unwrap();
        assert_eq!(
            service.get_status("u1", "gymA").await.unwrap(),
            ActivityStatus::Active
        );
    }

    #[tokio::test]
    async fn test_repeat_add_preserves_joined_at_and_status() {
        let service = service();
        service.add_user_to_gym("u1", "gymA").await.unwrap();
        service.update_status("u1", "gymA", "inactive").await.unwrap();
        let before = service.repository().membership("u1", "gymA").unwrap();

        service.add_user_to_gym("u1", "gymA").await.unwrap();

        let after = service.repository().membership("u1", "gymA").unwrap();
        assert_eq!(service.repository().membership_count(), 1);
        assert_eq!(before.joined_at, after.joined_at);
        assert_eq!(after.status, ActivityStatus::Inactive);
    }

    #[tokio::test]
    async fn test_not_found_is_translated() {
        let service = service();

        assert!(matches!(
            service.update_status("ghost", "gymA", "active").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.get_status("ghost", "gymA").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.get_user_group("ghost").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_user_group_lists_members() {
        let service = service();
        service.add_user_to_gym("u1", "gymA").await.unwrap();

        let (group, members) = service.get_user_group("u1").await.unwrap();
        assert_eq!(group.gym_id, "gymA");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "u1@example.com");
    }
}
