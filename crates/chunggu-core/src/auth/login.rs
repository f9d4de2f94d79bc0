use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Gender, Member};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Member id. `None` for the administrator.
    pub id: Option<i64>,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub generation: Option<u32>,
    pub gender: Option<Gender>,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

pub struct Authenticator {
    admin_username: String,
    admin_password: Option<String>,
}

impl Authenticator {
    /// Admin sign-in is disabled while `admin_password` is `None`.
    pub fn new(admin_username: impl Into<String>, admin_password: Option<String>) -> Self {
        Self {
            admin_username: admin_username.into(),
            admin_password,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }

    pub fn login(
        &self,
        members: &[Member],
        username: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        let username = username.trim();

        if username == self.admin_username {
            return match &self.admin_password {
                Some(expected) if expected == password => {
                    info!("Administrator signed in");
                    Ok(SessionUser {
                        id: None,
                        username: username.to_string(),
                        name: "관리자".to_string(),
                        role: Role::Admin,
                        generation: None,
                        gender: None,
                        signed_in_at: Utc::now(),
                    })
                }
                _ => Err(AuthError::InvalidCredentials),
            };
        }

        let member = members
            .iter()
            .find(|m| m.id.to_string() == username)
            .ok_or(AuthError::InvalidCredentials)?;

        match member.phone_last_four() {
            Some(last_four) if last_four == password => {
                debug!(member_id = member.id, "Member signed in");
                Ok(SessionUser {
                    id: Some(member.id),
                    username: username.to_string(),
                    name: member.name.clone(),
                    role: Role::Member,
                    generation: Some(member.generation),
                    gender: Some(member.gender),
                    signed_in_at: Utc::now(),
                })
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<Member> {
        vec![
            Member {
                id: 12,
                name: "김철수".to_string(),
                generation: 30,
                gender: Gender::Male,
                phone: "010-1234-5678".to_string(),
            },
            Member {
                id: 13,
                name: "번호없음".to_string(),
                generation: 31,
                gender: Gender::Female,
                phone: String::new(),
            },
        ]
    }

    #[test]
    fn test_member_login() {
        let auth = Authenticator::new("admin", None);
        let user = auth.login(&members(), "12", "5678").unwrap();
        assert_eq!(user.id, Some(12));
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.generation, Some(30));
        assert!(!user.is_admin());

        assert_eq!(
            auth.login(&members(), "12", "1234"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth.login(&members(), "99", "5678"),
            Err(AuthError::InvalidCredentials)
        );
        // No phone on file means no way in.
        assert_eq!(
            auth.login(&members(), "13", ""),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_admin_login() {
        let auth = Authenticator::new("admin", Some("s3cret".to_string()));
        let user = auth.login(&members(), "admin", "s3cret").unwrap();
        assert!(user.is_admin());
        assert_eq!(user.id, None);
        assert_eq!(
            auth.login(&members(), "admin", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_admin_disabled_without_password() {
        let auth = Authenticator::from_config(&Config::default());
        assert_eq!(
            auth.login(&members(), "admin", ""),
            Err(AuthError::InvalidCredentials)
        );
    }
}
