//! `spectre resolve <host>` – find the canonical URL of a Ghost blog.

use anyhow::Result;
use spectre_core::blog_url;
use spectre_core::config::ProbeConfig;

pub async fn run_resolve(host: &str, cfg: &ProbeConfig) -> Result<()> {
    match blog_url::resolve_blog_url(host, cfg).await {
        Ok(url) => {
            println!("{url}");
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            Err(anyhow::Error::new(err).context(format!("no Ghost blog found at {host}")))
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("couldn't reach {host}"))),
    }
}
