//! Registration, login, and cookie sessions.

mod accounts;
mod password;
mod session;

pub use accounts::{AuthError, login, register};
pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStore};
