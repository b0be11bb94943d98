//! Making sure the i2c-dev kernel module, which ddcutil needs to reach the
//! display, is loaded.

use super::command::CommandStrings;
use anyhow::{Context, Result};

/// Check whether the module `name` appears in `lsmod` output.
///
/// lsmod lists modules with underscores in place of dashes, so `i2c-dev`
/// shows up as `i2c_dev`.
pub fn is_module_listed(lsmod_output: &str, name: &str) -> bool {
    let normalized = name.replace('-', "_");
    lsmod_output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|module| module == normalized)
}

/// Load the module `name` unless it's already loaded. Returns whether the
/// module had to be loaded.
pub async fn ensure_loaded(
    name: &str,
    list_command: &CommandStrings,
    load_command: &CommandStrings,
) -> Result<bool> {
    let listing = list_command
        .run::<&str>(&[])
        .await
        .context("Couldn't list loaded kernel modules")?;
    if is_module_listed(&listing, name) {
        log::debug!("Kernel module {} is already loaded", name);
        return Ok(false);
    }
    log::info!("Loading kernel module {}", name);
    load_command
        .run(&[name])
        .await
        .with_context(|| format!("Couldn't load kernel module {}", name))?;
    Ok(true)
}
