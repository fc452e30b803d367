//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random tokens, Base64url)
//! - Password hashing (Argon2id with optional pepper)
//! - Cookie management
//! - `Authorization` header parsing

pub mod authorization;
pub mod cookie;
pub mod crypto;
pub mod password;
