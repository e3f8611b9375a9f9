//! Domain model for authentication sessions.

mod error;
mod session;
mod token;
mod user;

pub use error::{ParseRoleError, SessionDomainError};
pub use session::{AuthGrant, Credentials, Registration, Session};
pub use token::AuthToken;
pub use user::{Role, UserProfile};
