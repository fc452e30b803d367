//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod credentials;
pub mod issue_token;
pub mod refresh_token;
pub mod revoke_token;
pub mod session_service;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod sweep;
pub mod token_service;

// Re-exports
pub use authenticate::{AuthenticateUseCase, PresentedCredentials};
pub use config::AuthConfig;
pub use issue_token::IssueTokenUseCase;
pub use refresh_token::RefreshTokenUseCase;
pub use revoke_token::RevokeTokenUseCase;
pub use session_service::SessionService;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use sweep::{SweepExpiredUseCase, SweepReport, spawn_sweeper};
pub use token_service::{TokenPair, TokenService};
