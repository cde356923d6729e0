//! Account types for the `usuarios` table.

use std::fmt;

/// A stored user account.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Surrogate ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// The user's RIF.
    pub rif: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("rif", &self.rif)
            .finish_non_exhaustive()
    }
}

/// A user about to be inserted.
#[derive(Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// The user's RIF.
    pub rif: String,
    /// Already hashed.
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("rif", &self.rif)
            .finish_non_exhaustive()
    }
}
