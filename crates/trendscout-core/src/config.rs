use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trendscout_api::{is_enterprise, normalize_host, DEFAULT_HOST};

/// Main configuration structure
///
/// This gets loaded from config file, env vars, and CLI args.
/// Priority: CLI > Env > File > Defaults (like a sensible person would do)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub ui: UiConfig,

    /// Values picked up from the environment. Never written back to disk.
    #[serde(skip)]
    env: EnvOverrides,
}

#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    token: Option<String>,
    enterprise_token: Option<String>,
    pager: Option<String>,
    fallback_pager: Option<String>,
    no_color: bool,
    force_color: bool,
    dumb_terminal: bool,
}

impl Config {
    /// Load config from the default location, or defaults if there's no file
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            // No config file? Use defaults
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("trendscout");

        Ok(config_dir.join("config.toml"))
    }

    /// Layer environment variables on top of the file
    ///
    /// Takes a lookup function instead of reading `std::env` directly so
    /// tests don't have to mutate the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(host) = non_empty("GH_HOST") {
            self.set_host(&host);
        }

        self.env.token = non_empty("GH_TOKEN").or_else(|| non_empty("GITHUB_TOKEN"));
        self.env.enterprise_token = non_empty("GH_ENTERPRISE_TOKEN")
            .or_else(|| non_empty("GITHUB_ENTERPRISE_TOKEN"));

        // An empty pager variable is meaningful: it turns paging off
        self.env.pager = lookup("GH_PAGER");
        self.env.fallback_pager = lookup("PAGER");

        self.env.no_color = non_empty("NO_COLOR").is_some();
        self.env.force_color = non_empty("CLICOLOR_FORCE").is_some_and(|v| v != "0");
        self.env.dumb_terminal = lookup("TERM").as_deref() == Some("dumb");
    }

    /// Shorthand for `apply_env` with the real process environment
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    pub fn set_host(&mut self, host: &str) {
        self.github.host = normalize_host(host);
    }

    pub fn host(&self) -> &str {
        &self.github.host
    }

    /// Token for the configured host
    ///
    /// Enterprise hosts only look at the enterprise variables, github.com
    /// only at GH_TOKEN / GITHUB_TOKEN. Either way the file is the fallback.
    pub fn token(&self) -> Option<String> {
        let from_env = if is_enterprise(&self.github.host) {
            self.env.enterprise_token.clone()
        } else {
            self.env.token.clone()
        };

        from_env.or_else(|| self.github.token.clone().filter(|t| !t.is_empty()))
    }

    /// Pager command, or None when output should go straight to stdout
    ///
    /// GH_PAGER beats the config file, which beats PAGER.
    pub fn pager(&self) -> Option<String> {
        let command = self
            .env
            .pager
            .clone()
            .or_else(|| self.ui.pager.clone())
            .or_else(|| self.env.fallback_pager.clone())?;

        let command = command.trim();
        if command.is_empty() || command == "cat" {
            None
        } else {
            Some(command.to_string())
        }
    }

    /// The effective color mode once the environment has had its say
    pub fn color_mode(&self) -> ColorMode {
        if self.env.no_color {
            ColorMode::Never
        } else if self.env.force_color {
            ColorMode::Always
        } else if self.env.dumb_terminal && self.ui.color == ColorMode::Auto {
            ColorMode::Never
        } else {
            self.ui.color
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// github.com, or your GitHub Enterprise Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Personal access token
    /// Get one at https://github.com/settings/tokens
    pub token: Option<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub color: ColorMode,

    /// Pager command, e.g. "less -R". Empty or "cat" disables paging.
    pub pager: Option<String>,
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}
