use std::{collections::HashMap, fmt, fs};

use server_api::DEFAULT_OPENAI_BASE_URL;

const SETTINGS_FILE: &str = "server.toml";

pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            database_url: "sqlite://./data/articles.db".into(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server_bind", &self.server_bind)
            .field("database_url", &self.database_url)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .finish()
    }
}

impl Settings {
    /// Applies a flat `key = "value"` TOML table. Unparsable files are ignored.
    fn apply_file(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
            return;
        };
        if let Some(v) = file_cfg.get("bind_addr") {
            self.server_bind = v.clone();
        }
        if let Some(v) = file_cfg.get("database_url") {
            self.database_url = v.clone();
        }
        if let Some(v) = file_cfg.get("openai_base_url") {
            self.openai_base_url = v.clone();
        }
    }

    /// Environment wins over the settings file; `APP__*` wins over the bare names.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let pick = |bare: &str, prefixed: &str| lookup(prefixed).or_else(|| lookup(bare));

        if let Some(v) = pick("SERVER_BIND", "APP__BIND_ADDR") {
            self.server_bind = v;
        }
        if let Some(v) = pick("DATABASE_URL", "APP__DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = pick("OPENAI_API_KEY", "APP__OPENAI_API_KEY") {
            self.openai_api_key = Some(v).filter(|key| !key.trim().is_empty());
        }
        if let Some(v) = pick("OPENAI_BASE_URL", "APP__OPENAI_BASE_URL") {
            self.openai_base_url = v;
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        settings.apply_file(&raw);
    }
    settings.apply_env(|key| std::env::var(key).ok());
    settings
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
