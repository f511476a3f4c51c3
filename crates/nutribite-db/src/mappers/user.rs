//! User entity <-> model mapper

use nutribite_core::entities::{AccountStatus, User, UserType};
use nutribite_core::error::DomainError;
use nutribite_core::parse_effective_at;

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let user_type: UserType = model
            .user_type
            .parse()
            .map_err(DomainError::DatabaseError)?;

        let ban_effective_at = model.ban_effective_at.as_deref().and_then(|raw| {
            let parsed = parse_effective_at(raw);
            if parsed.is_none() {
                tracing::warn!(
                    user_id = model.id,
                    value = raw,
                    "Ignoring unparsable ban_effective_at"
                );
            }
            parsed
        });

        Ok(User {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            user_type,
            status: model.status.as_deref().map(AccountStatus::parse),
            ban_effective_at,
            banned_at: model.banned_at,
            ban_reason: model.ban_reason,
            last_seen: model.last_seen,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn model(status: Option<&str>, ban_effective_at: Option<&str>) -> UserModel {
        let now = Utc::now();
        UserModel {
            id: 9,
            name: "Kim".to_string(),
            email: "kim@example.com".to_string(),
            phone: None,
            user_type: "admin".to_string(),
            status: status.map(String::from),
            ban_effective_at: ban_effective_at.map(String::from),
            banned_at: None,
            ban_reason: None,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_postgres_text_timestamp_is_decoded() {
        let user = User::try_from(model(Some("Active"), Some("2020-01-01 00:00:00+00"))).unwrap();
        assert_eq!(
            user.ban_effective_at,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(user.status, Some(AccountStatus::Active));
        assert!(user.is_admin());
    }

    #[test]
    fn test_unparsable_timestamp_becomes_none() {
        let user = User::try_from(model(None, Some("infinity"))).unwrap();
        assert_eq!(user.ban_effective_at, None);
        assert_eq!(user.status, None);
    }

    #[test]
    fn test_unknown_user_type_is_rejected() {
        let mut row = model(None, None);
        row.user_type = "robot".to_string();
        assert!(User::try_from(row).is_err());
    }
}
