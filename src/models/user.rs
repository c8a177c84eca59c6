//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// User rights levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rights {
    None = 0,
    Read = 1,
    Write = 2,
}

impl From<char> for Rights {
    fn from(c: char) -> Self {
        match c {
            'r' | 'R' => Rights::Read,
            'w' | 'W' => Rights::Write,
            _ => Rights::None,
        }
    }
}

impl From<Option<String>> for Rights {
    fn from(s: Option<String>) -> Self {
        s.and_then(|s| s.chars().next())
            .map(Rights::from)
            .unwrap_or(Rights::None)
    }
}

/// Per-scope rights attached to a user account
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserRights {
    pub assets_rights: Rights,
    pub maintenance_rights: Rights,
    pub settings_rights: Rights,
}

impl Default for UserRights {
    fn default() -> Self {
        Self {
            assets_rights: Rights::None,
            maintenance_rights: Rights::None,
            settings_rights: Rights::None,
        }
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    id: i32,
    login: String,
    name: String,
    password_hash: Option<String>,
    assets_rights: Option<String>,
    maintenance_rights: Option<String>,
    settings_rights: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            login: row.login,
            name: row.name,
            password_hash: row.password_hash,
            rights: UserRights {
                assets_rights: Rights::from(row.assets_rights),
                maintenance_rights: Rights::from(row.maintenance_rights),
                settings_rights: Rights::from(row.settings_rights),
            },
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// Full user model from database
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[schema(value_type = Object)]
    pub rights: UserRights,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub name: String,
    pub rights: UserRights,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_read_assets(&self) -> Result<(), AppError> {
        if self.rights.assets_rights as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read assets".to_string()))
        }
    }

    pub fn require_write_assets(&self) -> Result<(), AppError> {
        if self.rights.assets_rights as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write assets".to_string()))
        }
    }

    pub fn require_read_maintenance(&self) -> Result<(), AppError> {
        if self.rights.maintenance_rights as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read maintenance".to_string()))
        }
    }

    pub fn require_write_maintenance(&self) -> Result<(), AppError> {
        if self.rights.maintenance_rights as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write maintenance".to_string()))
        }
    }

    pub fn require_read_settings(&self) -> Result<(), AppError> {
        if self.rights.settings_rights as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read settings".to_string()))
        }
    }

    pub fn require_write_settings(&self) -> Result<(), AppError> {
        if self.rights.settings_rights as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write settings".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with(assets: Rights, maintenance: Rights, settings: Rights) -> UserClaims {
        UserClaims {
            sub: "tester".to_string(),
            user_id: 1,
            name: "Tester".to_string(),
            rights: UserRights {
                assets_rights: assets,
                maintenance_rights: maintenance,
                settings_rights: settings,
            },
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn rights_parse_from_stored_chars() {
        assert_eq!(Rights::from(Some("w".to_string())), Rights::Write);
        assert_eq!(Rights::from(Some("R".to_string())), Rights::Read);
        assert_eq!(Rights::from(Some("x".to_string())), Rights::None);
        assert_eq!(Rights::from(None), Rights::None);
    }

    #[test]
    fn write_right_implies_read() {
        let claims = claims_with(Rights::Write, Rights::None, Rights::None);
        assert!(claims.require_read_assets().is_ok());
        assert!(claims.require_write_assets().is_ok());
        assert!(claims.require_read_maintenance().is_err());
    }

    #[test]
    fn read_right_does_not_allow_write() {
        let claims = claims_with(Rights::None, Rights::Read, Rights::None);
        assert!(claims.require_read_maintenance().is_ok());
        assert!(claims.require_write_maintenance().is_err());
        assert!(claims.require_write_settings().is_err());
    }
}
