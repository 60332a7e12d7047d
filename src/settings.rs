use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_SPEC_URL: &str = "https://www.w3.org/TR/wai-aria-1.1/";
pub const DEFAULT_OUTPUT: &str = "data.json";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub spec_url: String,
    pub output: PathBuf,
    pub timeout_secs: u64,
    #[serde(default)]
    debug: Option<String>,
}

impl Settings {
    /// Defaults, then `ARIA_*` variables, then the bare `DEBUG` toggle.
    pub fn load() -> Result<Self> {
        Self::from_sources(Environment::with_prefix("ARIA"), std::env::var("DEBUG").ok())
    }

    fn from_sources(env: Environment, debug: Option<String>) -> Result<Self> {
        Config::builder()
            .set_default("spec_url", DEFAULT_SPEC_URL)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(env.try_parsing(true))
            .set_override_option("debug", debug)?
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .context("Failed to load settings")
    }

    pub fn debug(&self) -> bool {
        self.debug.as_deref().is_some_and(is_truthy)
    }
}

fn is_truthy(raw: &str) -> bool {
    let v = raw.trim().to_ascii_lowercase();
    !matches!(v.as_str(), "" | "0" | "false" | "no" | "off")
}
