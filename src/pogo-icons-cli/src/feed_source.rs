//! Game master and enum table loading

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

/// Latest game master published by PokeMiners.
pub const DEFAULT_GAME_MASTER_URL: &str =
    "https://raw.githubusercontent.com/PokeMiners/game_masters/master/latest/latest.json";

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read a document from a local path or an http(s) URL.
pub async fn load_text(source: &str) -> Result<String> {
    if is_url(source) {
        let url = source.to_string();
        return tokio::task::spawn_blocking(move || fetch(&url))
            .await
            .context("Fetch task failed")?;
    }

    tokio::fs::read_to_string(Path::new(source))
        .await
        .with_context(|| format!("Failed to read {}", source))
}

fn fetch(url: &str) -> Result<String> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => bail!("{} returned HTTP {}", url, code),
        Err(e) => return Err(e).with_context(|| format!("Failed to fetch {}", url)),
    };

    // into_string() caps bodies at 10MB; the game master is larger
    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .with_context(|| format!("Failed to read response from {}", url))?;
    Ok(body)
}
