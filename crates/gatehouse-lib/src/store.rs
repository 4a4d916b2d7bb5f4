// ============================
// crates/gatehouse-lib/src/store.rs
// ============================
//! Credential store abstraction with a flat-file implementation.
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs as tokio_fs, sync::RwLock};

/// Username of the bootstrap account created on an empty store
pub const DEFAULT_USERNAME: &str = "admin";
/// Password of the bootstrap account
pub const DEFAULT_PASSWORD: &str = "password123";

// Verified against when a username does not exist, so the unknown-user path
// costs the same scrypt work as a wrong password.
static ABSENT_USER_HASH: Lazy<String> =
    Lazy::new(|| hash_password("absent user placeholder").unwrap_or_default());

/// A stored user identity.
///
/// `password_hash` is a PHC-format blob with the salt embedded. It is never
/// the plaintext password, and must never be logged or rendered to callers.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    // keep the hash out of debug/log output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Trait for credential store backends.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Provision a new user. Fails if the username already exists; never
    /// silently overwrites.
    async fn create_user(&self, username: &str, password: &str) -> Result<(), AppError>;

    /// Look up a user. `Ok(None)` means "no such user"; `Err` is reserved for
    /// genuine storage failure.
    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Number of provisioned users.
    async fn user_count(&self) -> Result<usize, AppError>;

    /// Check a username/password pair against stored credentials.
    ///
    /// An unknown username returns `Ok(false)`, the same outcome as a wrong
    /// password, so absence of a user does not leak through a separate error
    /// path.
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AppError> {
        match self.get_user(username).await? {
            Some(user) => Ok(verify_password(&user.password_hash, password)),
            None => {
                let _ = verify_password(&ABSENT_USER_HASH, password);
                Ok(false)
            }
        }
    }

    /// Create the default admin account if the store is empty. Idempotent:
    /// a no-op when any user already exists.
    async fn bootstrap_default_user(&self) -> Result<(), AppError> {
        if self.user_count().await? == 0 {
            self.create_user(DEFAULT_USERNAME, DEFAULT_PASSWORD).await?;
            tracing::info!(username = DEFAULT_USERNAME, "created default user");
        }
        Ok(())
    }
}

/// Flat-file implementation of the `UserStore` trait.
///
/// Users live in a single JSON map under the data directory, loaded at open
/// and rewritten atomically (temp file + rename) on every mutation. Fine for
/// the small single-node deployments this system targets.
#[derive(Clone)]
pub struct FlatFileUserStore {
    path: PathBuf,
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl FlatFileUserStore {
    /// Open (or create) the store under `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, AppError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;

        let path = root.join("users.json");
        let users = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            users: Arc::new(RwLock::new(users)),
        })
    }

    /// Rewrite the backing file from the given map. Called with the write
    /// lock held so persisted state never interleaves between mutations.
    async fn persist(&self, users: &HashMap<String, UserRecord>) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(users)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FlatFileUserStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.is_empty() {
            return Err(AppError::InvalidInput(
                "username must not be empty".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(AppError::UserExists);
        }

        users.insert(
            username.to_string(),
            UserRecord {
                username: username.to_string(),
                password_hash,
            },
        );

        if let Err(err) = self.persist(&users).await {
            // roll back the in-memory insert so memory and disk stay in step
            users.remove(username);
            return Err(err);
        }

        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn user_count(&self) -> Result<usize, AppError> {
        Ok(self.users.read().await.len())
    }
}
