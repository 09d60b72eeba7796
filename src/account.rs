//! Registration, login and the current-user session.

use crate::constants::keys;
use crate::error::AppError;
use crate::models::{Session, UserRecord};
use crate::store::{load_json, save_json, KeyValueStore};
use crate::validation::{normalize_email, validate_optional, validate_required};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::{info, warn};
use std::sync::Arc;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// False for a wrong password and for an unparseable stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is unreadable: {e}");
            false
        }
    }
}

pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn users(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(load_json(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    fn start_session(&self, user: &UserRecord) -> Result<Session, AppError> {
        let session = user.session();
        save_json(self.store.as_ref(), keys::CURRENT_USER, &session)?;
        Ok(session)
    }

    /// Create an account and log it in.
    ///
    /// Nothing is written unless every check passes.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: &str,
    ) -> Result<Session, AppError> {
        let name = validate_required("name", name)?;
        let email = normalize_email(email)?;
        let phone = validate_optional("phone", phone)?;
        if password.is_empty() {
            return Err(AppError::invalid("password", "is required"));
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            warn!("Signup rejected: {email} already registered");
            return Err(AppError::DuplicateEmail);
        }

        let user = UserRecord {
            name: name.to_string(),
            email,
            phone: phone.to_string(),
            password: hash_password(password)?,
            photo: String::new(),
        };
        users.push(user.clone());
        save_json(self.store.as_ref(), keys::USERS, &users)?;

        info!("Registered {}", user.email);
        self.start_session(&user)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email = email.trim().to_lowercase();
        let users = self.users()?;
        let user = users
            .iter()
            .find(|u| u.email == email && verify_password(password, &u.password))
            .ok_or(AppError::InvalidCredentials)?;

        info!("Logged in {}", user.email);
        self.start_session(user)
    }

    /// End the session and forget auto-login.
    pub fn logout(&self) -> Result<(), AppError> {
        self.store.remove(keys::CURRENT_USER)?;
        self.store.remove(keys::REMEMBER_ME)?;
        info!("Logged out");
        Ok(())
    }

    pub fn current_session(&self) -> Result<Option<Session>, AppError> {
        load_json(self.store.as_ref(), keys::CURRENT_USER)
    }

    pub fn set_remember_me(&self, remember: bool) -> Result<(), AppError> {
        if remember {
            self.store.set(keys::REMEMBER_ME, "true")
        } else {
            self.store.remove(keys::REMEMBER_ME)
        }
    }

    pub fn remember_me(&self) -> Result<bool, AppError> {
        Ok(self.store.get(keys::REMEMBER_ME)?.as_deref() == Some("true"))
    }

    /// Auto-login on start: keep the session only when "remember me" is set.
    ///
    /// Without "remember me" a stored session is removed, which logs the user
    /// out just like [`AccountStore::logout`].
    pub fn restore_session(&self) -> Result<Option<Session>, AppError> {
        if self.remember_me()? {
            return self.current_session();
        }
        if self.current_session()?.is_some() {
            info!("Dropping session left without remember-me");
            self.store.remove(keys::CURRENT_USER)?;
        }
        Ok(None)
    }

    pub fn user(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let email = email.trim().to_lowercase();
        Ok(self.users()?.into_iter().find(|u| u.email == email))
    }
}
