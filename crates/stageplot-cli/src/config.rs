//! Configuration lookup for the CLI.
//!
//! A configuration file is optional. When `--config` is not given, the first
//! existing file among [`default_locations`] is used; a file that is found is
//! also checked for layout and color values the builder would reject, so the
//! report names the file instead of failing later during layout.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use stageplot::{StageplotError, config::AppConfig};

/// File name looked up in every configuration location.
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file `{}` not found", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid TOML in `{}`: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid settings in `{}`: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

impl From<ConfigError> for StageplotError {
    fn from(err: ConfigError) -> Self {
        StageplotError::Config(err.to_string())
    }
}

/// Implicit configuration locations, most specific first.
///
/// `stageplot/config.toml` relative to the working directory, then the
/// platform configuration directory when one can be determined.
pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![Path::new("stageplot").join(CONFIG_FILE_NAME)];
    match ProjectDirs::from("com", "stageplot", "stageplot") {
        Some(dirs) => locations.push(dirs.config_dir().join(CONFIG_FILE_NAME)),
        None => debug!("No platform configuration directory"),
    }
    locations
}

/// Loads the configuration for a CLI run.
///
/// An explicit path must exist. Otherwise the first existing entry of
/// [`default_locations`] is loaded, falling back to [`AppConfig::default`].
///
/// # Errors
///
/// Returns [`StageplotError::Config`] when the explicit file is missing, or
/// when the selected file cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StageplotError> {
    match explicit_path {
        Some(path) => Ok(read_config(path.as_ref())?),
        None => Ok(first_existing(&default_locations())?),
    }
}

fn first_existing(locations: &[PathBuf]) -> Result<AppConfig, ConfigError> {
    for path in locations {
        match read_config(path) {
            Err(ConfigError::NotFound(_)) => debug!(path:? = path; "No configuration file"),
            result => return result,
        }
    }

    debug!("Using default configuration");
    Ok(AppConfig::default())
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })?;

    let invalid = |reason: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason,
    };
    config.layout().validate().map_err(invalid)?;
    config.style().palette().map_err(invalid)?;
    config.style().background_color().map_err(invalid)?;

    info!(path:? = path; "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [layout]
            plot_width = 640

            [tooltip]
            wrap_width = 40
            "#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.layout().plot_width(), 640);
        assert_eq!(config.tooltip().wrap_width(), 40);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, StageplotError::Config(ref msg) if msg.contains("absent.toml")));
    }

    #[test]
    fn test_malformed_config_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[layout]\nplot_width = \"wide\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();

        assert!(matches!(err, StageplotError::Config(ref msg) if msg.contains("broken.toml")));
    }

    #[test]
    fn test_invalid_settings_are_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\narrow_length = 0\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref reason, .. } if reason.contains("arrow_length")));

        fs::write(&path, "[style]\nestimator_color = \"not-a-color\"\n").unwrap();
        assert!(matches!(
            read_config(&path).unwrap_err(),
            ConfigError::Invalid { .. }
        ));
    }

    #[test]
    fn test_first_existing_location_wins() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        fs::write(&first, "[layout]\nplot_width = 500\n").unwrap();
        fs::write(&second, "[layout]\nplot_width = 900\n").unwrap();

        let config = first_existing(&[absent.clone(), first, second]).unwrap();
        assert_eq!(config.layout().plot_width(), 500);

        let config = first_existing(&[absent]).unwrap();
        assert_eq!(config.layout().plot_width(), 800);
    }

    #[test]
    fn test_default_locations_start_with_local_file() {
        let locations = default_locations();

        assert_eq!(locations[0], Path::new("stageplot").join("config.toml"));
        assert!(locations.iter().all(|path| path.ends_with("config.toml")));
    }
}
