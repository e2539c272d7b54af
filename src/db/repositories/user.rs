use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use subtle::ConstantTimeEq;
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::now_timestamp;
use crate::entities::users;

/// User data returned from the repository (without the password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            name: model.name,
            avatar: model.avatar,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = users::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Insert a new user, hashing the supplied plaintext password.
    /// Note: hashing uses `spawn_blocking` because scrypt is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn create(&self, new: NewUser, security: &SecurityConfig) -> Result<User> {
        let password = new.password.clone();
        let security = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let model = users::ActiveModel {
            username: Set(new.username),
            password: Set(password_hash),
            email: Set(new.email),
            name: Set(new.name),
            avatar: Set(None),
            role: Set("user".to_string()),
            created_at: Set(now_timestamp()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Verify a password against the stored hash for the given email.
    /// Unknown emails report `false` rather than an error so callers can
    /// return a single generic failure message.
    pub async fn verify_password(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<bool> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(false);
        };

        let stored = user.password;
        let password = password.to_string();
        let security = security.clone();

        let is_valid =
            task::spawn_blocking(move || verify_password_hash(&password, &stored, &security))
                .await
                .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password with scrypt using a fresh random 16-byte salt.
/// Stored format is `<hex derived key>.<hex salt>`. The cost parameters are
/// not encoded in the hash, so changing them invalidates existing hashes.
pub fn hash_password(password: &str, security: &SecurityConfig) -> Result<String> {
    use rand::Rng;

    let mut rng = rand::rng();
    let salt_bytes: [u8; 16] = rng.random();
    let salt = hex::encode(salt_bytes);

    let key = derive_key(password, &salt, security)?;

    Ok(format!("{}.{}", hex::encode(key), salt))
}

/// Re-derive the key from the supplied password and the stored salt, then
/// compare the two derived keys in constant time.
pub fn verify_password_hash(
    password: &str,
    stored: &str,
    security: &SecurityConfig,
) -> Result<bool> {
    let Some((stored_key_hex, salt)) = stored.split_once('.') else {
        anyhow::bail!("Malformed password hash");
    };

    let stored_key = hex::decode(stored_key_hex).context("Malformed password hash")?;
    let derived = derive_key(password, salt, security)?;

    Ok(derived.ct_eq(&stored_key).into())
}

fn derive_key(password: &str, salt: &str, security: &SecurityConfig) -> Result<Vec<u8>> {
    let params = scrypt::Params::new(
        security.scrypt_log_n,
        security.scrypt_r,
        security.scrypt_p,
        KEY_LEN,
    )
    .map_err(|e| anyhow::anyhow!("Invalid scrypt params: {e}"))?;

    // The salt is fed in as its hex string, matching the stored format.
    let mut key = vec![0u8; KEY_LEN];
    scrypt::scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut key)
        .map_err(|e| anyhow::anyhow!("Failed to derive key: {e}"))?;

    Ok(key)
}

const KEY_LEN: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> SecurityConfig {
        SecurityConfig {
            scrypt_log_n: 4,
            scrypt_r: 8,
            scrypt_p: 1,
        }
    }

    #[test]
    fn test_hash_format() {
        let security = fast_params();
        let hash = hash_password("hunter22", &security).unwrap();

        let (key, salt) = hash.split_once('.').unwrap();
        assert_eq!(key.len(), KEY_LEN * 2);
        assert_eq!(salt.len(), 32);
        assert!(hex::decode(key).is_ok());
        assert!(hex::decode(salt).is_ok());
    }

    #[test]
    fn test_verify_roundtrip() {
        let security = fast_params();
        let hash = hash_password("hunter22", &security).unwrap();

        assert!(verify_password_hash("hunter22", &hash, &security).unwrap());
        assert!(!verify_password_hash("hunter23", &hash, &security).unwrap());
    }

    #[test]
    fn test_salts_are_unique() {
        let security = fast_params();
        let a = hash_password("same-password", &security).unwrap();
        let b = hash_password("same-password", &security).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let security = fast_params();
        assert!(verify_password_hash("pw", "no-separator", &security).is_err());
        assert!(verify_password_hash("pw", "zz-not-hex.abcd", &security).is_err());
    }
}
