// Username/password gate: a YAML-backed credential store, argon2 password hashes,
// and explicit in-memory sessions.

pub mod handlers;
pub mod password;
pub mod session;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found. Please sign up.")]
    UserNotFound,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("{0}")]
    Validation(String),

    #[error("Username already exists. Please choose another.")]
    UsernameTaken,

    #[error("Credential file {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential file {path:?} is not valid YAML: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
