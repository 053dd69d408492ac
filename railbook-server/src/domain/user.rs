//! User accounts.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Created at registration and never updated. The password is stored as
/// a PHC-format PBKDF2 hash, never in clear text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,

    /// PHC-format password hash.
    pub password: String,

    /// Creation timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}
