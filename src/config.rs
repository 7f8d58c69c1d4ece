use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub disney_base_url: String,
    pub disney_rps: u32,
    pub api_stale_secs: u64,
    pub cache_max_entries: Option<usize>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let disney_base_url = std::env::var("DISNEY_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.disneyapi.dev".to_string());

        let disney_rps: u32 =
            std::env::var("DISNEY_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        let api_stale_secs: u64 =
            std::env::var("API_STALE_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(300);

        // 0 or unset means the cache grows unbounded for the process lifetime.
        let cache_max_entries = std::env::var("CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            disney_base_url,
            disney_rps,
            api_stale_secs,
            cache_max_entries,
        })
    }
}
