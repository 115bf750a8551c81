use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::{info, warn};

use crate::config::DatabaseConfig;

const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 10_000;

/// Connection options from either `DATABASE_URL` or the discrete `DB_*` settings.
pub fn connect_options(cfg: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = &cfg.url {
        return url
            .parse::<PgConnectOptions>()
            .context("parse DATABASE_URL");
    }
    let mut opts = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .database(&cfg.name);
    if let Some(password) = &cfg.password {
        opts = opts.password(password);
    }
    Ok(opts)
}

fn pool_options(cfg: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout())
}

/// Opens the pool, retrying with exponential backoff while the database is
/// unreachable. Once connected, the pool itself replaces broken connections.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = connect_options(cfg)?;
    let mut attempt = 0u32;
    loop {
        match pool_options(cfg).connect_with(options.clone()).await {
            Ok(pool) => {
                info!(attempt = attempt + 1, "database connected");
                return Ok(pool);
            }
            Err(e) if attempt < cfg.connect_retries => {
                let backoff = backoff_for(attempt);
                warn!(
                    error = %e,
                    attempt = attempt + 1,
                    max_retries = cfg.connect_retries,
                    backoff_ms = backoff.as_millis() as u64,
                    "database connect failed; retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e).context("connect to database"),
        }
    }
}

/// Exponential backoff capped at `MAX_BACKOFF_MS`, with 50-100% jitter.
fn backoff_for(attempt: u32) -> Duration {
    let base = INITIAL_BACKOFF_MS.saturating_mul(1u64 << attempt.min(16));
    let capped = base.min(MAX_BACKOFF_MS);
    let jitter = rand::thread_rng().gen_range(0.5..=1.0);
    Duration::from_millis((capped as f64 * jitter) as u64)
}
