use super::SourceError;
use crate::news::{Article, Category, NewsBundle};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

const MAX_RESPONSE_SIZE: usize = 32 * 1024 * 1024; // 32MB, bodies carry full article text

/// Tunables for the backend client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Per-attempt timeout, covering headers and body.
    pub timeout: Duration,
    /// Retries after a 429 or 5xx answer.
    pub max_retries: u32,
    /// Base delay; attempt `n` waits `backoff * 2^n`.
    pub backoff: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 5,
            backoff: Duration::from_secs(1),
        }
    }
}

#[derive(Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<Category>,
}

/// HTTP client for the news backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
    settings: ClientSettings,
}

impl ApiClient {
    /// Build a client for `base_url`. Only http and https are accepted.
    ///
    /// A base with a path prefix (`http://host/api`) keeps the prefix:
    /// endpoints resolve to `http://host/api/articles`.
    pub fn new(base_url: &str, settings: ClientSettings) -> Result<Self, SourceError> {
        let mut base =
            Url::parse(base_url).map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SourceError::InvalidUrl(format!(
                "{base_url}: only http/https allowed"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base,
            settings,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/articles`.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>, SourceError> {
        let response: ArticlesResponse = self.get_json("articles").await?;
        Ok(response.articles)
    }

    /// `GET {base}/categories`.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, SourceError> {
        let response: CategoriesResponse = self.get_json("categories").await?;
        Ok(response.categories)
    }

    /// Fetch both lists concurrently.
    ///
    /// A failed category request is not fatal: the bundle falls back to
    /// categories derived from the articles. A failed article request returns
    /// at once, abandoning the category request.
    pub async fn fetch_all(&self) -> Result<NewsBundle, SourceError> {
        let (articles, categories) = tokio::try_join!(self.fetch_articles(), async {
            Ok::<_, SourceError>(self.fetch_categories().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to fetch categories, deriving from articles");
                Vec::new()
            }))
        })?;
        tracing::info!(
            articles = articles.len(),
            categories = categories.len(),
            base = %self.base,
            "Fetched news"
        );
        Ok(NewsBundle::new(articles, categories))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SourceError> {
        let url = self
            .base
            .join(endpoint)
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        let bytes = self.get_with_retry(&url).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_with_retry(&self, url: &Url) -> Result<Vec<u8>, SourceError> {
        let mut retry_count = 0;

        loop {
            let deadline = Instant::now() + self.settings.timeout;
            let response = within(deadline, async {
                self.client.get(url.clone()).send().await.map_err(network_error)
            })
            .await?;

            let status = response.status();
            let retryable =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();

            if retryable {
                if retry_count >= self.settings.max_retries {
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(SourceError::RateLimited(retry_count));
                    }
                    return Err(SourceError::HttpStatus(status.as_u16()));
                }

                let delay = self.settings.backoff.saturating_mul(2u32.saturating_pow(retry_count));
                tracing::warn!(
                    url = %url,
                    status = %status,
                    retry = retry_count,
                    delay_ms = delay.as_millis() as u64,
                    "Backend busy, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                retry_count += 1;
                continue;
            }

            // 4xx errors fail immediately
            if !status.is_success() {
                return Err(SourceError::HttpStatus(status.as_u16()));
            }

            return within(deadline, read_limited_bytes(response, MAX_RESPONSE_SIZE)).await;
        }
    }
}

/// Run `future` until `deadline`, mapping expiry to `SourceError::Timeout`.
async fn within<T>(
    deadline: Instant,
    future: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    tokio::time::timeout_at(deadline, future)
        .await
        .map_err(|_| SourceError::Timeout)?
}

fn network_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Network(e)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, SourceError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(SourceError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(network_error)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(SourceError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_settings() -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(5),
            max_retries: 3,
            backoff: Duration::ZERO,
        }
    }

    const ARTICLES: &str = r#"{"articles": [
        {"title": "Markets rally", "link": "/economy/markets", "date": "14.10.2026", "category": "Economy", "description": "d", "full_text": "body"},
        {"title": "Derby tonight", "link": "/sports/derby", "category": "Sports"}
    ]}"#;

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ApiClient::new("ftp://example.com", fast_settings()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidUrl(_)));
    }

    #[test]
    fn test_base_path_prefix_kept() {
        let client = ApiClient::new("http://example.com/api", fast_settings()).unwrap();
        assert_eq!(
            client.base_url().join("articles").unwrap().as_str(),
            "http://example.com/api/articles"
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLES))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        let articles = client.fetch_articles().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].category, "Economy");
        assert!(articles[1].full_text.is_empty());
    }

    #[tokio::test]
    async fn test_404_fails_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        match client.fetch_articles().await.unwrap_err() {
            SourceError::HttpStatus(404) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_500_retries_then_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(4) // Initial request + 3 retries
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        match client.fetch_articles().await.unwrap_err() {
            SourceError::HttpStatus(500) => {}
            e => panic!("Expected HttpStatus(500), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_429_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        match client.fetch_articles().await.unwrap_err() {
            SourceError::RateLimited(3) => {}
            e => panic!("Expected RateLimited(3), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_503_retry_then_success() {
        let server = MockServer::start().await;
        Mock::given(path("/articles"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLES))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        assert_eq!(client.fetch_articles().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        assert!(matches!(
            client.fetch_articles().await.unwrap_err(),
            SourceError::Decode(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_all_derives_categories_when_endpoint_fails() {
        let server = MockServer::start().await;
        Mock::given(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLES))
            .mount(&server)
            .await;
        Mock::given(path("/categories"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        let bundle = client.fetch_all().await.unwrap();
        let names: Vec<&str> = bundle.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Economy", "Sports"]);
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(path("/articles"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(ARTICLES)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let settings = ClientSettings {
            timeout: Duration::from_millis(100),
            max_retries: 0,
            backoff: Duration::ZERO,
        };
        let client = ApiClient::new(&server.uri(), settings).unwrap();
        match client.fetch_articles().await.unwrap_err() {
            SourceError::Timeout => {}
            e => panic!("Expected Timeout, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_returns_article_error_without_waiting_for_categories() {
        let server = MockServer::start().await;
        Mock::given(path("/articles"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let settings = ClientSettings {
            timeout: Duration::from_secs(30),
            ..fast_settings()
        };
        let client = ApiClient::new(&server.uri(), settings).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(3), client.fetch_all())
            .await
            .expect("fetch_all should not wait for the category request");
        match result.unwrap_err() {
            SourceError::HttpStatus(404) => {}
            e => panic!("Expected HttpStatus(404), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_uses_backend_categories() {
        let server = MockServer::start().await;
        Mock::given(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLES))
            .mount(&server)
            .await;
        Mock::given(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"categories": [{"title": "Gündem", "link": "/gundem/", "name": "Gündem"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), fast_settings()).unwrap();
        let bundle = client.fetch_all().await.unwrap();
        assert_eq!(bundle.articles.len(), 2);
        assert_eq!(bundle.categories.len(), 1);
        assert_eq!(bundle.categories[0].name, "Gündem");
    }
}
