//! CLI commands

pub mod check;
pub mod init;
pub mod status;

use anyhow::{Context, Result};
use habit_heroes_core::SubscriptionRecord;
use std::io::Read;
use std::path::Path;

/// Reads a user snapshot from a JSON file, or stdin when `path` is `-`.
///
/// A file containing `null` is a signed-out user.
pub fn load_user(path: &Path) -> Result<Option<SubscriptionRecord>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read user from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("read user file {}", path.display()))?
    };
    parse_user(&text).with_context(|| format!("parse user {}", path.display()))
}

pub fn parse_user(text: &str) -> Result<Option<SubscriptionRecord>> {
    let user = SubscriptionRecord::from_json(text)?;
    tracing::debug!(signed_in = user.is_some(), "loaded user snapshot");
    Ok(user)
}
