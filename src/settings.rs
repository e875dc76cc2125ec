use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Print debug information to stderr while building tables
    pub verbose: bool,
}

pub const DEFAULT_SETTINGS: Settings = Settings { verbose: false };

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}
