use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use xo_core::models::GifResult;
use xo_core::traits::GifSearch;

const TENOR_SEARCH_URL: &str = "https://tenor.googleapis.com/v2/search";
const SEARCH_LIMIT: u32 = 20;

/// Tenor v2 search. The API key stays on the server.
pub struct TenorGifSearch {
    client: reqwest::Client,
    api_key: Option<SecretString>,
}

impl TenorGifSearch {
    pub fn new(client: reqwest::Client, api_key: Option<SecretString>) -> Self {
        Self { client, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct TenorResponse {
    #[serde(default)]
    results: Vec<TenorItem>,
}

#[derive(Debug, Deserialize)]
struct TenorItem {
    media_formats: MediaFormats,
}

#[derive(Debug, Deserialize)]
struct MediaFormats {
    gif: Option<Media>,
    tinygif: Option<Media>,
}

#[derive(Debug, Deserialize)]
struct Media {
    url: String,
}

impl TenorResponse {
    /// Items lacking either rendition are dropped.
    fn into_results(self) -> Vec<GifResult> {
        self.results
            .into_iter()
            .filter_map(|item| {
                let MediaFormats { gif, tinygif } = item.media_formats;
                Some(GifResult { url: gif?.url, preview: tinygif?.url })
            })
            .collect()
    }
}

#[async_trait]
impl GifSearch for TenorGifSearch {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<GifResult>> {
        let Some(key) = &self.api_key else {
            log::debug!("GIF search requested but no Tenor key is configured");
            return Ok(Vec::new());
        };

        let limit = SEARCH_LIMIT.to_string();
        let body: TenorResponse = self
            .client
            .get(TENOR_SEARCH_URL)
            .query(&[("q", query), ("limit", limit.as_str()), ("key", key.expose_secret())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body.into_results())
    }
}
