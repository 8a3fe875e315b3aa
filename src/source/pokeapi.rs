use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{DataSource, SourceError};
use crate::model::{PokemonDetail, Record, RecordPage, TypeListResponse, TypeRef};

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

/// `DataSource` backed by the PokéAPI REST service.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: reqwest::Client,
    api_url: String,
}

impl PokeApiClient {
    pub fn new(options: &ClientOptions) -> Result<Self, SourceError> {
        let client = build_client(options.proxy.as_deref(), options.timeout_seconds)?;
        Ok(Self {
            client,
            api_url: options.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn type_list_url(&self) -> String {
        format!("{}/type", self.api_url)
    }

    pub fn record_page_url(&self, limit: usize, offset: usize) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.api_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("status {}", status.as_u16()));
        }
        resp.json::<T>().await.map_err(|e| e.to_string())
    }
}

fn build_client(proxy: Option<&str>, timeout_seconds: u64) -> Result<reqwest::Client, SourceError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!(
            "pokedex/",
            env!("CARGO_PKG_VERSION")
        )),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(timeout_seconds.max(1)));

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| SourceError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| SourceError::ClientBuild { source: e })
}

#[async_trait]
impl DataSource for PokeApiClient {
    async fn fetch_type_list(&self) -> Result<Vec<TypeRef>, SourceError> {
        let url = self.type_list_url();
        tracing::debug!(%url, "fetching type list");
        let list: TypeListResponse =
            self.get_json(&url)
                .await
                .map_err(|message| SourceError::ListFetch {
                    what: "type list",
                    message,
                })?;
        Ok(list.results)
    }

    async fn fetch_record_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<RecordPage, SourceError> {
        let url = self.record_page_url(limit, offset);
        tracing::debug!(%url, "fetching record list");
        self.get_json(&url)
            .await
            .map_err(|message| SourceError::ListFetch {
                what: "Pokémon list",
                message,
            })
    }

    async fn fetch_record_detail(&self, url: &str) -> Result<Record, SourceError> {
        tracing::trace!(%url, "fetching record detail");
        let detail: PokemonDetail =
            self.get_json(url)
                .await
                .map_err(|message| SourceError::DetailFetch {
                    url: url.to_string(),
                    message,
                })?;
        Ok(Record::from(detail))
    }
}
