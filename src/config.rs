//! Configuration file handling

use crate::{
    control::adjustment::Adjustment,
    external::{brightness::BrightnessValue, command::CommandStrings},
};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_DIRECTORY: &str = "ddc-brightness";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File the last set brightness is kept in between invocations
    pub state_file: PathBuf,
    /// Brightness assumed when neither the state file nor the display can
    /// tell the current one
    pub fallback: BrightnessValue,
    pub adjustment: Adjustment,
    pub display: DisplayConfig,
    pub notification: NotificationConfig,
    pub kernel_module: KernelModuleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// ddcutil's display number
    pub number: u32,
    /// How to run ddcutil, the VCP arguments are appended
    pub command: CommandStrings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// Notification program, the message is appended as the last argument
    pub command: CommandStrings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelModuleConfig {
    pub ensure_loaded: bool,
    pub name: String,
    pub list_command: CommandStrings,
    /// Module loading program, the module name is appended
    pub load_command: CommandStrings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_file: PathBuf::from("/tmp/brightness.value"),
            fallback: BrightnessValue::MAX,
            adjustment: Adjustment::default(),
            display: DisplayConfig::default(),
            notification: NotificationConfig::default(),
            kernel_module: KernelModuleConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            number: 1,
            command: CommandStrings::new("sudo", &["ddcutil"]),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            enabled: true,
            command: CommandStrings::new(
                "notify-send",
                &[
                    "--app-name=brightness-control",
                    "--urgency=low",
                    "Brightness control",
                ],
            ),
        }
    }
}

impl Default for KernelModuleConfig {
    fn default() -> Self {
        KernelModuleConfig {
            ensure_loaded: true,
            name: "i2c-dev".to_owned(),
            list_command: CommandStrings::new("lsmod", &[]),
            load_command: CommandStrings::new("sudo", &["modprobe"]),
        }
    }
}

impl Config {
    /// Parse and validate a configuration from TOML text
    pub fn parse(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration.
    ///
    /// An explicitly given `path` has to exist. Otherwise the file in the
    /// user's configuration directory is used if there is one, and the
    /// defaults if there isn't.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    log::debug!("No configuration file found, using defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Result<Config> {
        log::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Couldn't read configuration file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.adjustment.step == 0 || self.adjustment.step > 100 {
            bail!(
                "adjustment.step must be between 1 and 100, not {}",
                self.adjustment.step
            );
        }
        if self.adjustment.snap_margin >= 50 {
            bail!(
                "adjustment.snap_margin must be below 50, not {}",
                self.adjustment.snap_margin
            );
        }
        if self.kernel_module.ensure_loaded && self.kernel_module.name.is_empty() {
            bail!("kernel_module.name can't be empty");
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/ddc-brightness/config.toml` or its platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fallback, BrightnessValue::MAX);
        assert_eq!(config.adjustment.step, 33);
        assert_eq!(config.adjustment.snap_margin, 5);
        assert_eq!(config.display.number, 1);
        assert_eq!(
            config.display.command.display_with::<&str>(&[]),
            "sudo ddcutil"
        );
        assert!(config.notification.enabled);
        assert_eq!(config.kernel_module.name, "i2c-dev");
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            state_file = "/run/user/1000/brightness"
            fallback = 50

            [adjustment]
            step = 20
            snap_margin = 0

            [display]
            number = 2
            command = { command = "ddcutil", args = ["--noverify"] }

            [notification]
            enabled = false

            [kernel_module]
            ensure_loaded = false
            "#,
        )
        .unwrap();
        assert_eq!(config.state_file, PathBuf::from("/run/user/1000/brightness"));
        assert_eq!(config.fallback, BrightnessValue::new(50).unwrap());
        assert_eq!(
            config.adjustment,
            Adjustment {
                step: 20,
                snap_margin: 0
            }
        );
        assert_eq!(config.display.number, 2);
        assert_eq!(
            config.display.command,
            CommandStrings::new("ddcutil", &["--noverify"])
        );
        assert!(!config.notification.enabled);
        // Unspecified keys of a specified table keep their defaults
        assert_eq!(
            config.notification.command,
            NotificationConfig::default().command
        );
        assert!(!config.kernel_module.ensure_loaded);
    }

    #[test]
    fn test_partial_adjustment_table() {
        let config = Config::parse("[adjustment]\nstep = 25\n").unwrap();
        assert_eq!(config.adjustment.step, 25);
        assert_eq!(config.adjustment.snap_margin, 5);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("fallback = 101").is_err());
        assert!(Config::parse("fallback = -1").is_err());
        assert!(Config::parse("[adjustment]\nstep = 0").is_err());
        assert!(Config::parse("[adjustment]\nstep = 101").is_err());
        assert!(Config::parse("[adjustment]\nsnap_margin = 50").is_err());
        assert!(Config::parse("[kernel_module]\nname = \"\"").is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("brightness = 50").is_err());
        assert!(Config::parse("[display]\nbus = 4").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "state_file = \"/var/tmp/b\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.state_file, PathBuf::from("/var/tmp/b"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
