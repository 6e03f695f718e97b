//! Credential store: the flat YAML file holding every account.
//!
//! The file is read in full on every access and rewritten in full on every mutation.
//! Account counts are small and writes are rare, so there is no cache and no
//! cross-process locking: one writer at a time is assumed.
//!
//! Layout:
//! ```yaml
//! credentials:
//!   usernames:
//!     admin: { name: Admin User, password: $argon2id$..., email: admin@example.com }
//! cookie: { expiry_days: 30, key: ..., name: ... }
//! preauthorized:
//!   emails: [admin@example.com]
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Accounts written when no credential file exists yet: (username, name, email, password).
const SEED_ACCOUNTS: &[(&str, &str, &str, &str)] = &[
    ("admin", "Admin User", "admin@example.com", "admin123"),
    ("demo", "Demo User", "demo@example.com", "demo123"),
    ("john_doe", "John Doe", "john@example.com", "password123"),
];

// ────────────────────────────────────────────────────────────────────────────
// File format
// ────────────────────────────────────────────────────────────────────────────

/// The whole credential file. Keys this service does not know about are carried in
/// `extra` at every level, so a load/save cycle never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialFile {
    #[serde(default)]
    pub credentials: Credentials,
    /// Session-cookie metadata for other readers of the file. Never interpreted here,
    /// so it is held untyped and written back as found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preauthorized: Option<Preauthorized>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub usernames: BTreeMap<String, AccountRecord>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: String,
    /// Password hash. Absent for accounts created through an external identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preauthorized {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Cookie block written into a freshly seeded file.
fn default_cookie() -> Value {
    let mut cookie = Mapping::new();
    cookie.insert("expiry_days".into(), Value::from(30_u64));
    cookie.insert("key".into(), "streamlit_resume_analyzer".into());
    cookie.insert("name".into(), "resume_analyzer_auth".into());
    Value::Mapping(cookie)
}

impl CredentialFile {
    /// Finds the stored key matching `username`, ignoring case.
    fn key_for(&self, username: &str) -> Option<&str> {
        let wanted = username.trim().to_lowercase();
        self.credentials
            .usernames
            .keys()
            .find(|key| key.to_lowercase() == wanted)
            .map(String::as_str)
    }

    fn insert_account(&mut self, username: String, name: String, email: String, hash: String) {
        let preauthorized = self.preauthorized.get_or_insert_with(Preauthorized::default);
        if !preauthorized.emails.contains(&email) {
            preauthorized.emails.push(email.clone());
        }
        self.credentials.usernames.insert(
            username,
            AccountRecord {
                name,
                password: Some(hash),
                email,
                extra: BTreeMap::new(),
            },
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Domain view
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub username: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl Account {
    fn from_record(username: &str, record: &AccountRecord) -> Self {
        Self {
            username: username.to_string(),
            display_name: record.name.clone(),
            email: record.email.clone(),
            password_hash: record.password.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Opens the store at `path`, writing the seed accounts first if the file is
    /// missing or empty. Call once at startup.
    ///
    /// An existing file that fails to parse is an error; it is never overwritten.
    pub fn initialize(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let store = Self { path: path.into() };

        let needs_seed = match std::fs::read_to_string(&store.path) {
            Ok(raw) => raw.trim().is_empty(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(source) => {
                return Err(AuthError::Persistence {
                    path: store.path.clone(),
                    source,
                })
            }
        };

        if needs_seed {
            warn!(
                "No credential file at {:?}; creating one with default accounts",
                store.path
            );
            store.save(&seed_file()?)?;
        } else {
            let users = store.load()?.credentials.usernames.len();
            info!("Loaded credential file {:?} ({} accounts)", store.path, users);
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file.
    pub fn load(&self) -> Result<CredentialFile, AuthError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| AuthError::Persistence {
            path: self.path.clone(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| AuthError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Rewrites the whole file. The new content is written to a sibling temp file and
    /// renamed into place, so readers never observe a half-written store.
    pub fn save(&self, file: &CredentialFile) -> Result<(), AuthError> {
        let yaml = serde_yaml::to_string(file).map_err(|source| AuthError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let io_err = |source: std::io::Error| AuthError::Persistence {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(yaml.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    pub fn find_account(&self, username: &str) -> Result<Option<Account>, AuthError> {
        let file = self.load()?;
        Ok(file.key_for(username).map(|key| {
            Account::from_record(key, &file.credentials.usernames[key])
        }))
    }

    pub fn user_exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.load()?.key_for(username).is_some())
    }

    /// Checks a username/password pair. Lookup ignores case.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .find_account(username)?
            .ok_or(AuthError::UserNotFound)?;

        let Some(hash) = account.password_hash.as_deref() else {
            return Err(AuthError::IncorrectPassword);
        };

        match verify_password(password, hash) {
            Ok(true) => Ok(account),
            Ok(false) => Err(AuthError::IncorrectPassword),
            Err(e) => {
                warn!("Unreadable password hash for '{}': {e}", account.username);
                Err(AuthError::IncorrectPassword)
            }
        }
    }

    /// Creates an account. Checks run in order and the first failure wins:
    /// all fields present, username length, password length, username free.
    ///
    /// The username is stored lowercased; the email joins the preauthorized list.
    pub fn add_user(
        &self,
        username: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let username = username.trim().to_lowercase();
        let name = name.trim();
        let email = email.trim();

        if username.is_empty() || name.is_empty() || email.is_empty() || password.trim().is_empty()
        {
            return Err(AuthError::Validation("All fields are required.".to_string()));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AuthError::Validation(format!(
                "Username must be at least {MIN_USERNAME_LEN} characters."
            )));
        }
        // Padding does not count towards the minimum; the hash still covers the exact input.
        if password.trim().chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }

        let mut file = self.load()?;
        if file.key_for(&username).is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let hash = hash_password(password)?;
        file.insert_account(username.clone(), name.to_string(), email.to_string(), hash);
        self.save(&file)?;

        info!("Created account '{}'", username);
        Ok(Account::from_record(
            &username,
            &file.credentials.usernames[&username],
        ))
    }
}

fn seed_file() -> Result<CredentialFile, AuthError> {
    let mut file = CredentialFile {
        cookie: Some(default_cookie()),
        ..CredentialFile::default()
    };
    for &(username, name, email, password) in SEED_ACCOUNTS {
        file.insert_account(
            username.to_string(),
            name.to_string(),
            email.to_string(),
            hash_password(password)?,
        );
    }
    Ok(file)
}
