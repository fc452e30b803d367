//! Value Object Module

pub mod bio;
pub mod email;
pub mod phone_number;
pub mod session_id;
pub mod token_claims;
pub mod token_digest;
pub mod token_kind;
pub mod user_id;
pub mod user_password;
