//! User Entity
//!
//! A registered account. Created on registration; this crate never
//! mutates or deletes users.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    bio::Bio, email::Email, phone_number::PhoneNumber, user_id::UserId,
    user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned numeric id
    pub user_id: UserId,
    /// Unique, lowercase
    pub email: Email,
    /// Argon2id hash; never leaves the service
    pub password_hash: UserPassword,
    pub name: String,
    pub phone_number: PhoneNumber,
    pub height: f64,
    pub bio: Option<Bio>,
    pub created_at: DateTime<Utc>,
}

/// A validated registration waiting for the store to assign an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: UserPassword,
    pub name: String,
    pub phone_number: PhoneNumber,
    pub height: f64,
    pub bio: Option<Bio>,
}

impl NewUser {
    /// Attach the id and creation time chosen by the store
    pub fn into_user(self, user_id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            user_id,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            phone_number: self.phone_number,
            height: self.height,
            bio: self.bio,
            created_at,
        }
    }
}
