//! Data directory locations and admin-secret loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::AdminSecret;


/// File inside the data directory holding the expected admin secret.
pub const SECRET_FILE: &str = "admin_secret";


/// Default data directory (`~/.subsplit/data`).
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".subsplit")
        .join("data")
}


/// Expected admin secret, when one is configured.
///
/// A missing or empty secret file disables the gate entirely.
pub fn load_admin_secret(data_dir: &Path) -> Option<AdminSecret> {
    let raw = fs::read_to_string(data_dir.join(SECRET_FILE)).ok()?;
    let secret = raw.trim();

    if secret.is_empty() {
        None
    } else {
        Some(AdminSecret::new(secret))
    }
}
