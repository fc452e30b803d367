//! Entity Module

pub mod auth_session;
pub mod revoked_token;
pub mod user;
