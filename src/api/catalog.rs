use crate::config::Config;
use crate::error::BallotError;
use crate::types::catalog::{BreedList, CatalogEnvelope, ImageMessage};
use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Source of breed names and image URLs.
pub trait BreedCatalog: Clone + Send + Sync + 'static {
    fn list_all_breeds(&self) -> impl Future<Output = Result<BreedList, BallotError>> + Send;

    /// Image URLs for `breed_path` (`breed` or `breed/subbreed`).
    fn list_images(
        &self,
        breed_path: &str,
    ) -> impl Future<Output = Result<Vec<String>, BallotError>> + Send;
}

/// HTTP client for the dog.ceo catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
    retry_policy: ExponentialBuilder,
}

impl CatalogClient {
    pub fn new(cfg: &Config) -> Result<Self, BallotError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("breed-ballot/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(cfg.catalog_timeout());
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let client = builder.build()?;
        Ok(Self::with_client(
            client,
            cfg.catalog_url.clone(),
            cfg.catalog_retries,
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: Url, retries: usize) -> Self {
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(3))
            .with_max_times(retries)
            .with_jitter();
        Self {
            client,
            base_url,
            retry_policy,
        }
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, BallotError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T>(&self, url: &Url) -> Result<T, BallotError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BallotError::UpstreamStatus(status));
        }
        let envelope: CatalogEnvelope<T> = resp.json().await?;
        if !envelope.is_success() {
            return Err(BallotError::CatalogStatus(envelope.status));
        }
        Ok(envelope.message)
    }

    async fn fetch_with_retry<T>(&self, url: Url) -> Result<T, BallotError>
    where
        T: DeserializeOwned,
    {
        (|| async { self.fetch::<T>(&url).await })
            .retry(self.retry_policy.clone())
            .when(|e: &BallotError| e.is_retryable())
            .notify(|err, dur: Duration| {
                warn!(url = %url, "catalog retrying after error {}, sleeping {:?}", err, dur);
            })
            .await
    }
}

impl BreedCatalog for CatalogClient {
    async fn list_all_breeds(&self) -> Result<BreedList, BallotError> {
        let url = self.endpoint(["breeds", "list", "all"])?;
        let list: BreedList = self.fetch_with_retry(url).await?;
        debug!(count = list.len(), "fetched breed list");
        Ok(list)
    }

    async fn list_images(&self, breed_path: &str) -> Result<Vec<String>, BallotError> {
        let segments = std::iter::once("breed")
            .chain(breed_path.split('/'))
            .chain(std::iter::once("images"));
        let url = self.endpoint(segments)?;
        let message: ImageMessage = self.fetch_with_retry(url).await?;
        let images: Vec<String> = message.into();
        debug!(breed = breed_path, count = images.len(), "fetched breed images");
        Ok(images)
    }
}
