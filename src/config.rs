use serde::Deserialize;

/// Where to find like buttons and what to do with them.
///
/// Every field has a default, so the host page only needs to pass the
/// fields it wants to change to `init_with_config`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSS selector marking like buttons
    pub selector: String,
    /// Attribute holding the resource identifier
    pub id_attribute: String,
    /// Request path is this prefix followed by the identifier
    pub path_prefix: String,
    /// Label is this prefix followed by the like count
    pub label_prefix: String,
    /// Shown in a blocking alert when a like fails
    pub failure_message: String,
    /// Console log level, one of `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            selector: ".like-button".into(),
            id_attribute: "data-id".into(),
            path_prefix: "/like/".into(),
            label_prefix: "🌟 ".into(),
            failure_message: "Failed to like. Please try again.".into(),
            log_level: "info".into(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// The identifier is used as-is, without escaping or validation
    pub fn like_path(&self, id: &str) -> String {
        format!("{}{}", self.path_prefix, id)
    }

    pub fn label(&self, likes: u64) -> String {
        format!("{}{}", self.label_prefix, likes)
    }

    /// Unrecognised levels fall back to `Info`
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
