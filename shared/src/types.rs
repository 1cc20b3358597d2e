//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ActivityStatus, Group, User};

/// Path parameters of gym-scoped routes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GymPath {
    #[validate(length(min = 1, message = "gym ID is required"))]
    pub gym_id: String,
}

/// Path parameters of member-scoped routes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberPath {
    #[validate(length(min = 1, message = "gym ID is required"))]
    pub gym_id: String,
    #[validate(length(min = 1, message = "user ID is required"))]
    pub user_id: String,
}

/// Status update request
///
/// `status` is kept as raw text; the service layer decides whether it is one
/// of the accepted values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Members of a gym's group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembersResponse {
    pub members: Vec<User>,
}

/// Caller's own group with its members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyGroupResponse {
    pub group: Group,
    pub members: Vec<User>,
}

/// Membership status response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: ActivityStatus,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_path_requires_both_ids() {
        let path = MemberPath {
            gym_id: "gymA".to_string(),
            user_id: String::new(),
        };
        let errors = path.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
        assert!(!errors.field_errors().contains_key("gym_id"));
    }

    #[test]
    fn test_gym_path_accepts_non_empty_id() {
        let path = GymPath {
            gym_id: "gymA".to_string(),
        };
        assert!(path.validate().is_ok());
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse {
            error: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"boom"}"#
        );
    }

    #[test]
    fn test_status_response_shape() {
        let body = StatusResponse {
            status: ActivityStatus::Inactive,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"inactive"}"#
        );
    }
}
