pub mod pokeapi;

use std::num::NonZeroU32;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use governor::{Quota, RateLimiter};
use indicatif::ProgressBar;
use thiserror::Error;

use crate::model::{Record, RecordPage, TypeRef};

pub use pokeapi::{ClientOptions, PokeApiClient};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to fetch {what}: {message}")]
    ListFetch { what: &'static str, message: String },

    #[error("Failed to fetch Pokémon details from {url}: {message}")]
    DetailFetch { url: String, message: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Where records and the type taxonomy come from.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_type_list(&self) -> Result<Vec<TypeRef>, SourceError>;

    async fn fetch_record_page(&self, limit: usize, offset: usize)
        -> Result<RecordPage, SourceError>;

    async fn fetch_record_detail(&self, url: &str) -> Result<Record, SourceError>;
}

#[derive(Clone, Copy, Debug)]
pub struct CatalogOptions {
    pub limit: usize,
    pub offset: usize,
    /// Max in-flight detail requests.
    pub concurrency: usize,
    /// Detail requests per second, 0 for no limit.
    pub rate: u32,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            limit: 200,
            offset: 0,
            concurrency: 20,
            rate: 0,
        }
    }
}

/// Fetches one page of references and dereferences every entry.
///
/// Detail requests run concurrently; the result keeps the order of the
/// page, and the first failing detail fails the whole catalog.
pub async fn fetch_catalog(
    source: &dyn DataSource,
    opts: CatalogOptions,
    pb: ProgressBar,
) -> Result<Vec<Record>, SourceError> {
    let page = source.fetch_record_page(opts.limit, opts.offset).await?;
    tracing::info!(
        refs = page.results.len(),
        available = page.count,
        "fetched record list"
    );
    pb.set_length(page.results.len() as u64);

    let lim = NonZeroU32::new(opts.rate).map(|r| RateLimiter::direct(Quota::per_second(r)));
    let lim = &lim;
    let pb = &pb;

    let records = stream::iter(page.results)
        .map(|reference| async move {
            if let Some(lim) = lim.as_ref() {
                lim.until_ready().await;
            }
            let record = source.fetch_record_detail(&reference.url).await;
            pb.inc(1);
            record
        })
        .buffered(opts.concurrency.max(1))
        .try_collect::<Vec<Record>>()
        .await?;

    pb.finish_and_clear();
    Ok(records)
}
