//! Login and logout command handlers
//!
//! The credential check is a hard-coded comparison against the configured
//! admin email and password - the same mock check the site shipped with.
//! What matters to the rest of the system is the session record it leaves
//! behind, which gates every write command.

use anyhow::{bail, Context, Result};

use midad_core::{Catalog, Config, Session};

use crate::output::Output;

/// Log in and persist the admin session
pub fn login(
    catalog: &mut Catalog,
    config: &Config,
    email: String,
    password: String,
    output: &Output,
) -> Result<()> {
    if email != config.admin_email || password != config.admin_password {
        bail!("Invalid email or password.");
    }

    catalog
        .save_session(&Session::new(&email))
        .context("Failed to save session")?;

    output.success(&format!("Logged in as {}", email));
    Ok(())
}

/// Log out, clearing the persisted session
pub fn logout(catalog: &mut Catalog, output: &Output) -> Result<()> {
    catalog.clear_session().context("Failed to clear session")?;
    output.success("Logged out");
    Ok(())
}
