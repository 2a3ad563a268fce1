//! Mocked local sign-in.
//!
//! There is no credential check: signing up or in derives a user from the
//! email address and keeps it in the injected [`SessionStore`] until sign-out.

use log::info;
use serde::{Deserialize, Serialize};

use crate::store::{load_json, save_json, SessionStore, StoreError};

/// Store key for the signed-in user.
pub const CURRENT_USER_KEY: &str = "dev_current_user";
/// Store key for the signed-in user's profile.
pub const USER_PROFILE_KEY: &str = "dev_user_profile";

const UID_PREFIX: &str = "dev-user-";
const UID_SUFFIX_LEN: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

impl User {
    /// Derive a fresh user from an email address.
    pub fn from_email(email: &str) -> Result<Self, SessionError> {
        let email = email.trim();
        let local = match email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => return Err(SessionError::InvalidEmail(email.to_string())),
        };

        Ok(Self {
            uid: generate_uid(),
            email: email.to_string(),
            display_name: local.to_string(),
        })
    }
}

/// Profile record kept alongside the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    /// Timestamp of creation (RFC 3339 format).
    pub created_at: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.uid.clone(),
            name: user.display_name.clone(),
            email: user.email.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn generate_uid() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", UID_PREFIX, &random[..UID_SUFFIX_LEN])
}

/// Sign-in state backed by a session store.
pub struct SessionManager<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new user and sign them in.
    pub fn sign_up(&self, email: &str, _password: &str) -> Result<User, SessionError> {
        let user = User::from_email(email)?;
        self.persist(&user)?;
        info!("Signed up as {}", user.display_name);
        Ok(user)
    }

    /// Sign in as the user owning `email`.
    pub fn sign_in(&self, email: &str, _password: &str) -> Result<User, SessionError> {
        let user = User::from_email(email)?;
        self.persist(&user)?;
        info!("Signed in as {}", user.display_name);
        Ok(user)
    }

    /// Forget the signed-in user and profile.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.remove(CURRENT_USER_KEY)?;
        self.store.remove(USER_PROFILE_KEY)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, SessionError> {
        Ok(load_json(&self.store, CURRENT_USER_KEY)?)
    }

    /// Profile of the signed-in user; `None` when nobody is signed in.
    pub fn profile(&self) -> Result<Option<UserProfile>, SessionError> {
        if self.current_user()?.is_none() {
            return Ok(None);
        }
        Ok(load_json(&self.store, USER_PROFILE_KEY)?)
    }

    fn persist(&self, user: &User) -> Result<(), SessionError> {
        save_json(&self.store, CURRENT_USER_KEY, user)?;
        save_json(&self.store, USER_PROFILE_KEY, &UserProfile::from(user))?;
        Ok(())
    }
}
