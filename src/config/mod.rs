use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_LOG_FILE: &str = "./readlog.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub log_level: String,
    pub log_file: PathBuf,
    pub theme: String,
    pub autocomplete: AutocompleteConfig,
    pub http: HttpConfig,
    pub catalog: CatalogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            theme: "dark".to_string(),
            autocomplete: AutocompleteConfig::default(),
            http: HttpConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    pub debounce_ms: u64,
    /// Queries must be strictly longer than this (in chars) to hit the network.
    pub min_query_chars: usize,
    pub max_suggestions: usize,
    /// How long results stay visible after the search field loses focus.
    pub blur_grace_ms: u64,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_chars: 2,
            max_suggestions: 5,
            blur_grace_ms: 100,
        }
    }
}

impl AutocompleteConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            request_timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub shelf_results: usize,
    pub search_results: usize,
    pub default_category: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            shelf_results: 15,
            search_results: 10,
            default_category: "classics".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub theme: Option<String>,
    pub autocomplete: Option<PartialAutocompleteConfig>,
    pub http: Option<PartialHttpConfig>,
    pub catalog: Option<PartialCatalogConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialAutocompleteConfig {
    pub debounce_ms: Option<u64>,
    pub min_query_chars: Option<usize>,
    pub max_suggestions: Option<usize>,
    pub blur_grace_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialCatalogConfig {
    pub shelf_results: Option<usize>,
    pub search_results: Option<usize>,
    pub default_category: Option<String>,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub config: Option<PathBuf>,
}

impl AppConfig {
    /// Priority: CLI > env > project `.readlog/config.toml` > global file > defaults.
    pub fn resolve(cli: CliOverrides) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;
        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var_os("READLOG_CONFIG").map(PathBuf::from));
        let file_cfg = match &config_path {
            Some(path) => load_config_at(path)?,
            None => load_file_config().unwrap_or_default(),
        };
        let env = EnvOverrides {
            base_url: std::env::var("READLOG_BASE_URL").ok(),
            log_level: std::env::var("READLOG_LOG").ok(),
        };
        Ok(Self::merge(cli, env, project_cfg, file_cfg))
    }

    pub(crate) fn merge(
        cli: CliOverrides,
        env: EnvOverrides,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
    ) -> Self {
        let defaults = AppConfig::default();

        let base_url = cli
            .base_url
            .or(env.base_url)
            .or(project_cfg.base_url)
            .or(file_cfg.base_url)
            .unwrap_or(defaults.base_url);
        let log_level = cli
            .log_level
            .or(env.log_level)
            .or(project_cfg.log_level)
            .or(file_cfg.log_level)
            .unwrap_or(defaults.log_level);
        let log_file = project_cfg
            .log_file
            .or(file_cfg.log_file)
            .unwrap_or(defaults.log_file);
        let theme = project_cfg
            .theme
            .or(file_cfg.theme)
            .unwrap_or(defaults.theme);

        // project sections take precedence field by field
        let autocomplete = {
            let p = project_cfg.autocomplete.unwrap_or_default();
            let f = file_cfg.autocomplete.unwrap_or_default();
            let d = defaults.autocomplete;
            AutocompleteConfig {
                debounce_ms: p.debounce_ms.or(f.debounce_ms).unwrap_or(d.debounce_ms),
                min_query_chars: p
                    .min_query_chars
                    .or(f.min_query_chars)
                    .unwrap_or(d.min_query_chars),
                max_suggestions: p
                    .max_suggestions
                    .or(f.max_suggestions)
                    .unwrap_or(d.max_suggestions),
                blur_grace_ms: p
                    .blur_grace_ms
                    .or(f.blur_grace_ms)
                    .unwrap_or(d.blur_grace_ms),
            }
        };

        let http = {
            let p = project_cfg.http.unwrap_or_default();
            let f = file_cfg.http.unwrap_or_default();
            let d = defaults.http;
            HttpConfig {
                connect_timeout_ms: p
                    .connect_timeout_ms
                    .or(f.connect_timeout_ms)
                    .unwrap_or(d.connect_timeout_ms),
                request_timeout_ms: p
                    .request_timeout_ms
                    .or(f.request_timeout_ms)
                    .unwrap_or(d.request_timeout_ms),
            }
        };

        let catalog = {
            let p = project_cfg.catalog.unwrap_or_default();
            let f = file_cfg.catalog.unwrap_or_default();
            let d = defaults.catalog;
            CatalogConfig {
                shelf_results: p
                    .shelf_results
                    .or(f.shelf_results)
                    .unwrap_or(d.shelf_results),
                search_results: p
                    .search_results
                    .or(f.search_results)
                    .unwrap_or(d.search_results),
                default_category: p
                    .default_category
                    .or(f.default_category)
                    .unwrap_or(d.default_category),
            }
        };

        Self {
            base_url,
            log_level,
            log_file,
            theme,
            autocomplete,
            http,
            catalog,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EnvOverrides {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
}

pub fn load_file_config() -> Result<FileConfig> {
    use std::env;

    fn candidate_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Ok(p) = env::var("READLOG_CONFIG") {
            v.push(PathBuf::from(p));
        }
        if let Ok(xdg_home) = env::var("XDG_CONFIG_HOME") {
            v.push(Path::new(&xdg_home).join("readlog/config.toml"));
        } else if let Ok(home) = env::var("HOME") {
            v.push(Path::new(&home).join(".config/readlog/config.toml"));
        }
        if let Ok(dirs) = env::var("XDG_CONFIG_DIRS") {
            for d in dirs.split(':') {
                if !d.is_empty() {
                    v.push(Path::new(d).join("readlog/config.toml"));
                }
            }
        }
        v
    }

    for p in candidate_paths() {
        if p.exists() {
            let s = fs::read_to_string(&p)
                .with_context(|| format!("read config file: {}", p.display()))?;
            match toml::from_str::<FileConfig>(&s) {
                Ok(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                Err(e) => {
                    warn!(path=%p.display(), error=%e.to_string(), "parse config failed");
                    continue;
                }
            }
        }
    }
    Ok(FileConfig::default())
}

/// Explicit `--config` path: unlike the discovered files, errors here are fatal.
pub fn load_config_at(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg = toml::from_str::<FileConfig>(&s)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    info!(path=%path.display(), "loaded config file");
    Ok(cfg)
}

/// Load project-specific configuration from .readlog/config.toml
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let project_config_path = project_root.join(".readlog").join("config.toml");

    if project_config_path.exists() {
        let s = fs::read_to_string(&project_config_path).with_context(|| {
            format!(
                "read project config file: {}",
                project_config_path.display()
            )
        })?;
        match toml::from_str::<FileConfig>(&s) {
            Ok(cfg) => {
                info!(path=%project_config_path.display(), "loaded project config file");
                Ok(cfg)
            }
            Err(e) => {
                warn!(path=%project_config_path.display(), error=%e.to_string(), "parse project config failed");
                Ok(FileConfig::default())
            }
        }
    } else {
        Ok(FileConfig::default())
    }
}

#[cfg(test)]
mod tests;
