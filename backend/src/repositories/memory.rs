//! In-memory group repository
//!
//! Mirrors the PostgreSQL queries and constraints: a membership can only be
//! created for a known user and a known gym group. Used by tests and local
//! experiments.

use super::{GroupRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gym_groups_shared::{ActivityStatus, Group, GroupMembership, User};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredUser {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<String, StoredUser>,
    /// Keyed by gym ID
    groups: HashMap<String, Group>,
    memberships: Vec<GroupMembership>,
}

impl Store {
    fn members_of(&self, gym_id: &str) -> Vec<User> {
        let mut memberships: Vec<_> = self
            .memberships
            .iter()
            .filter(|m| m.gym_id == gym_id)
            .collect();
        memberships.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        memberships
            .into_iter()
            .filter_map(|m| {
                self.users.get(&m.user_id).map(|u| User {
                    id: u.id.clone(),
                    email: u.email.clone(),
                    first_name: u.first_name.clone(),
                    last_name: u.last_name.clone(),
                    status: m.status,
                    created_at: u.created_at,
                    updated_at: u.updated_at,
                })
            })
            .collect()
    }

    fn membership_mut(&mut self, user_id: &str, gym_id: &str) -> Option<&mut GroupMembership> {
        self.memberships
            .iter_mut()
            .find(|m| m.user_id == user_id && m.gym_id == gym_id)
    }
}

/// Group repository holding everything in process memory
#[derive(Debug, Default)]
pub struct InMemoryGroupRepository {
    store: RwLock<Store>,
    calls: AtomicUsize,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record
    pub fn insert_user(&self, id: &str, email: &str, first_name: &str, last_name: &str) {
        let now = Utc::now();
        let user = StoredUser {
            id: id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.write().users.insert(id.to_string(), user);
    }

    /// Seed the group of a gym
    pub fn insert_group(&self, gym_id: &str, name: &str) -> Group {
        let group = Group {
            id: Uuid::new_v4().to_string(),
            gym_id: gym_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.write().groups.insert(gym_id.to_string(), group.clone());
        group
    }

    /// Current membership row, if any
    pub fn membership(&self, user_id: &str, gym_id: &str) -> Option<GroupMembership> {
        self.read()
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.gym_id == gym_id)
            .cloned()
    }

    pub fn membership_count(&self) -> usize {
        self.read().memberships.len()
    }

    /// Number of repository operations served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn get_group_members(&self, gym_id: &str) -> RepositoryResult<Vec<User>> {
        self.record_call();
        Ok(self.read().members_of(gym_id))
    }

    async fn get_user_group(&self, user_id: &str) -> RepositoryResult<(Group, Vec<User>)> {
        self.record_call();
        let store = self.read();

        let group = store
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| store.groups.get(&m.gym_id).map(|g| (m.joined_at, g)))
            .min_by_key(|(joined_at, _)| *joined_at)
            .map(|(_, g)| g.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("group for user {}", user_id)))?;

        let members = store.members_of(&group.gym_id);
        Ok((group, members))
    }

    async fn update_status(
        &self,
        user_id: &str,
        gym_id: &str,
        status: ActivityStatus,
    ) -> RepositoryResult<()> {
        self.record_call();
        let mut store = self.write();

        let membership = store.membership_mut(user_id, gym_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("user {} in gym {}", user_id, gym_id))
        })?;
        membership.status = status;
        membership.updated_at = Utc::now();
        Ok(())
    }

    async fn get_status(&self, user_id: &str, gym_id: &str) -> RepositoryResult<ActivityStatus> {
        self.record_call();
        self.read()
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.gym_id == gym_id)
            .map(|m| m.status)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {} in gym {}", user_id, gym_id)))
    }

    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> RepositoryResult<()> {
        self.record_call();
        let mut store = self.write();

        if store.membership_mut(user_id, gym_id).is_some() {
            return Ok(());
        }
        if !store.users.contains_key(user_id) {
            return Err(RepositoryError::NotFound(format!("user {}", user_id)));
        }
        if !store.groups.contains_key(gym_id) {
            return Err(RepositoryError::NotFound(format!("gym {}", gym_id)));
        }

        let now = Utc::now();
        store.memberships.push(GroupMembership {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            gym_id: gym_id.to_string(),
            status: ActivityStatus::Active,
            joined_at: now,
            updated_at: now,
        });
        Ok(())
    }
}
