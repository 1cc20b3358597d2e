//! PostgreSQL group repository

use super::{GroupRepository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gym_groups_shared::{ActivityStatus, Group, User};
use sqlx::PgPool;

/// Member row: user columns joined with the membership status
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRecord {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRecord> for User {
    type Error = RepositoryError;

    fn try_from(record: MemberRecord) -> Result<Self, Self::Error> {
        Ok(User {
            status: parse_stored_status(&record.status)?,
            id: record.id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Group row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupRecord {
    pub id: String,
    pub gym_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Group {
            id: record.id,
            gym_id: record.gym_id,
            name: record.name,
            created_at: record.created_at,
        }
    }
}

fn parse_stored_status(value: &str) -> RepositoryResult<ActivityStatus> {
    value
        .parse()
        .map_err(|_| RepositoryError::Corrupt(format!("membership status {:?}", value)))
}

const FOREIGN_KEY_VIOLATION: &str = "23503";
const USER_FKEY: &str = "group_members_user_id_fkey";
const GYM_FKEY: &str = "group_members_gym_id_fkey";

/// Group repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn get_group_members(&self, gym_id: &str) -> RepositoryResult<Vec<User>> {
        let records = sqlx::query_as::<_, MemberRecord>(
            r#"
            SELECT u.id, u.email, u.first_name, u.last_name, gm.status,
                   u.created_at, u.updated_at
            FROM users u
            JOIN group_members gm ON u.id = gm.user_id
            WHERE gm.gym_id = $1
            ORDER BY gm.joined_at ASC, u.id ASC
            "#,
        )
        .bind(gym_id)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(User::try_from).collect()
    }

    async fn get_user_group(&self, user_id: &str) -> RepositoryResult<(Group, Vec<User>)> {
        let group = sqlx::query_as::<_, GroupRecord>(
            r#"
            SELECT g.id, g.gym_id, g.name, g.created_at
            FROM groups g
            JOIN group_members gm ON g.gym_id = gm.gym_id
            WHERE gm.user_id = $1
            ORDER BY gm.joined_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .map(Group::from)
        .ok_or_else(|| RepositoryError::NotFound(format!("group for user {}", user_id)))?;

        let members = self.get_group_members(&group.gym_id).await?;

        Ok((group, members))
    }

    async fn update_status(
        &self,
        user_id: &str,
        gym_id: &str,
        status: ActivityStatus,
    ) -> RepositoryResult<()> {
        // Zero affected rows yields no id
        let updated = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE group_members
            SET status = $1, updated_at = $2
            WHERE user_id = $3 AND gym_id = $4
            RETURNING id
            "#,
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(user_id)
        .bind(gym_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(format!(
                "user {} in gym {}",
                user_id, gym_id
            ))),
        }
    }

    async fn get_status(&self, user_id: &str, gym_id: &str) -> RepositoryResult<ActivityStatus> {
        let status = sqlx::query_scalar::<_, String>(
            r#"
            SELECT status
            FROM group_members
            WHERE user_id = $1 AND gym_id = $2
            "#,
        )
        .bind(user_id)
        .bind(gym_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("user {} in gym {}", user_id, gym_id)))?;

        parse_stored_status(&status)
    }

    async fn add_user_to_gym(&self, user_id: &str, gym_id: &str) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO group_members (user_id, gym_id, status, joined_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, gym_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(gym_id)
        .bind(ActivityStatus::Active.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| missing_reference(e, user_id, gym_id))?;

        Ok(())
    }
}

/// Turn a foreign key violation on `group_members` into `NotFound` naming the
/// missing row; other errors pass through
fn missing_reference(err: sqlx::Error, user_id: &str, gym_id: &str) -> RepositoryError {
    let constraint = match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    };
    let Some(constraint) = constraint else {
        return RepositoryError::Database(err);
    };

    RepositoryError::NotFound(match constraint.as_str() {
        USER_FKEY => format!("user {}", user_id),
        GYM_FKEY => format!("gym {}", gym_id),
        _ => format!("user {} or gym {}", user_id, gym_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> MemberRecord {
        let now = Utc::now();
        MemberRecord {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_member_record_converts_status() {
        let user = User::try_from(record("inactive")).unwrap();
        assert_eq!(user.status, ActivityStatus::Inactive);
        assert_eq!(user.first_name, "Ada");
    }

    #[test]
    fn test_non_database_error_is_not_a_missing_reference() {
        let err = missing_reference(sqlx::Error::PoolTimedOut, "u1", "gymA");
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn test_member_record_with_unknown_status_is_corrupt() {
        let result = User::try_from(record("suspended"));
        assert!(matches!(result, Err(RepositoryError::Corrupt(_))));
    }

    // Query tests require database - see tests/postgres_repository_test.rs
}
