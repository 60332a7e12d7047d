use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Raw markup plus the URL it should be resolved against.
pub struct LoadedPage {
    pub base_url: String,
    pub markup: String,
}

/// GET the spec page. The client timeout is the only bound on a stalled load.
pub async fn fetch(url: &str, timeout: Duration) -> Result<LoadedPage> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("aria_data/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    spinner.set_message(format!("GET {}", url));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = async {
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Bad response from {}", url))?;
        let base_url = response.url().to_string();
        let markup = response
            .text()
            .await
            .context("Failed to read response body")?;
        Ok::<_, anyhow::Error>(LoadedPage { base_url, markup })
    }
    .await;

    spinner.finish_and_clear();
    let page = result?;
    debug!("Loaded {} ({} bytes)", page.base_url, page.markup.len());
    Ok(page)
}

/// Load a saved copy of the spec; links resolve against `base_url`.
pub fn read_file(path: &Path, base_url: &str) -> Result<LoadedPage> {
    let markup = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} ({} bytes)", path.display(), markup.len());
    Ok(LoadedPage {
        base_url: base_url.to_string(),
        markup,
    })
}
