//! Raw payload retrieval with a passive on-disk cache.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::SourceSection;
use crate::state::PayloadCache;

/// Where the schedule payload comes from for this invocation.
pub enum PayloadSource {
    /// A local CSV passed on the command line; the cache is not touched.
    File(PathBuf),
    /// The configured URL, going through the cache.
    Remote { source: SourceSection, offline: bool },
}

pub async fn download(url: &str, cache: &PayloadCache) -> Result<String> {
    info!(url, "downloading schedule");
    let body = reqwest::get(url)
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?
        .text()
        .await
        .context("reading response body")?;
    cache.write(&body)?;
    Ok(body)
}

/// Load the payload text, preferring a fresh cache and falling back to a
/// stale one when the network is unavailable.
pub async fn load_payload(src: &PayloadSource, cache: &PayloadCache) -> Result<String> {
    let (source, offline) = match src {
        PayloadSource::File(path) => {
            return std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()));
        }
        PayloadSource::Remote { source, offline } => (source, *offline),
    };

    if offline {
        return match cache.read()? {
            Some(body) => Ok(body),
            None => bail!("--offline given but no cached schedule exists (run: loadshed fetch)"),
        };
    }

    let ttl = Duration::from_secs(source.cache_ttl_minutes * 60);
    if let Some(age) = cache.age()?.filter(|a| *a < ttl) {
        if let Some(body) = cache.read()? {
            debug!(age_secs = age.as_secs(), "using cached schedule");
            return Ok(body);
        }
    }

    match download(&source.url, cache).await {
        Ok(body) => Ok(body),
        Err(e) => match cache.read()? {
            Some(body) => {
                warn!("download failed, using stale cache: {e:#}");
                Ok(body)
            }
            None => Err(e),
        },
    }
}
