use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DEFAULT_TAG_PREFIX;
use crate::editor::DEFAULT_EDITOR;
use crate::error::{ReleaseError, Result};
use crate::github::client::DEFAULT_API_URL;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "gitrelease.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".gitrelease.toml";

/// Environment variable taking precedence over the gitconfig token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Runtime settings for git-release.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote whose URL names the GitHub repository
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Prefix carried by release tags (e.g. "v" in "v1.2.3")
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Editor command used when `EDITOR` is unset
    #[serde(default = "default_editor")]
    pub default_editor: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tag_prefix() -> String {
    DEFAULT_TAG_PREFIX.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_editor() -> String {
    DEFAULT_EDITOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            tag_prefix: default_tag_prefix(),
            api_url: default_api_url(),
            default_editor: default_editor(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let raw = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&raw)
        .map_err(|e| ReleaseError::config(format!("invalid {}: {}", path.display(), e)))
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Find the GitHub access token.
///
/// `GITHUB_TOKEN` wins when set and non-empty; otherwise `github.token` is
/// read from `~/.gitconfig`.
pub fn find_token() -> Result<String> {
    if let Some(token) = env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }

    let home = dirs::home_dir()
        .ok_or_else(|| ReleaseError::config("cannot locate home directory"))?;

    token_from_gitconfig(&home.join(".gitconfig"))?
        .ok_or_else(|| ReleaseError::config("token not found in your gitconfig file"))
}

/// Read `github.token` from a gitconfig-style file.
///
/// A missing file or key yields `Ok(None)`.
pub fn token_from_gitconfig(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let config = git2::Config::open(path)?;
    match config.get_string("github.token") {
        Ok(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        Ok(_) => Ok(None),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GITCONFIG: &str = r#"
[core]
	editor = vim
	whitespace = fix,-indent-with-non-tab,trailing-space,cr-at-eol
[github]
	user = testuser
	token = token
[gitflow "prefix"]
	feature = feature-
[alias]
	a = add --all
	#############
	ap = apply
"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_token_from_gitconfig() {
        let file = write_temp(GITCONFIG);
        assert_eq!(
            token_from_gitconfig(file.path()).unwrap(),
            Some("token".to_string())
        );
    }

    #[test]
    fn test_token_missing_section() {
        let file = write_temp("[core]\n\teditor = vim\n");
        assert_eq!(token_from_gitconfig(file.path()).unwrap(), None);
    }

    #[test]
    fn test_token_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            token_from_gitconfig(&dir.path().join("nope")).unwrap(),
            None
        );
    }

    #[test]
    #[serial]
    fn test_env_token_wins() {
        env::set_var(TOKEN_ENV, " from-env ");
        assert_eq!(find_token().unwrap(), "from-env");
        env::remove_var(TOKEN_ENV);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.default_editor, "vim");
    }

    #[test]
    fn test_partial_config_file() {
        let file = write_temp("tag_prefix = \"release-\"\nremote = \"upstream\"\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.tag_prefix, "release-");
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.default_editor, "vim");
    }

    #[test]
    fn test_invalid_config_file() {
        let file = write_temp("tag_prefix = [");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }
}
