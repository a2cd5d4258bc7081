use crate::error::{BuildClientError, ClientError, TransportError};
use crate::multistatus::{interpret, interpret_with_skipped, Interpretation};
use crate::request::{self, RequestSpec};
use crate::tree::Document;
use crate::types::{Content, DirectoryEntry};
use bytes::Bytes;
use mime::Mime;
use reqwest::header::CONTENT_TYPE;
use url::Url;

static USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")",
);

/// A WebDAV client.
///
/// The client holds no state besides the underlying HTTP client; each method
/// performs exactly one request, and clones can be used concurrently.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// Create a client with default settings
    pub fn new() -> Result<Client, BuildClientError> {
        let inner = reqwest::ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()
            .map_err(BuildClientError)?;
        Ok(Client { inner })
    }

    /// Create a client that sends its requests through `inner`, e.g., to set
    /// timeouts, proxies, or default headers
    pub fn from_http_client(inner: reqwest::Client) -> Client {
        Client { inner }
    }

    /// List the immediate contents of the collection at `url`.  The
    /// collection itself is not included in the result.
    pub async fn list(&self, url: Url) -> Result<Vec<DirectoryEntry>, ClientError> {
        let doc = self.propfind(url.clone()).await?;
        Ok(interpret(&doc, &url))
    }

    /// Like [`Client::list()`], but also report any responses in the server's
    /// reply that could not be turned into entries
    pub async fn list_with_skipped(&self, url: Url) -> Result<Interpretation, ClientError> {
        let doc = self.propfind(url.clone()).await?;
        Ok(interpret_with_skipped(&doc, &url))
    }

    /// Create a collection at `url`
    pub async fn make_directory(&self, url: Url) -> Result<Url, ClientError> {
        self.send(request::make_directory(url.clone())).await?;
        Ok(url)
    }

    /// Upload `body` to `url` with the given content type
    pub async fn make_file<B: Into<Bytes>>(
        &self,
        url: Url,
        content_type: &Mime,
        body: B,
    ) -> Result<Url, ClientError> {
        self.send(request::make_file(url.clone(), content_type, body.into()))
            .await?;
        Ok(url)
    }

    /// Delete the resource at `url`
    pub async fn remove(&self, url: Url) -> Result<Url, ClientError> {
        self.send(request::remove(url.clone())).await?;
        Ok(url)
    }

    /// Fetch the resource at `url` as text
    pub async fn read_text_file(&self, url: Url) -> Result<Content, ClientError> {
        let data = self
            .send(request::read_text_file(url.clone()))
            .await?
            .text_with_charset("utf-8")
            .await?;
        Ok(Content { path: url, data })
    }

    async fn propfind(&self, url: Url) -> Result<Document, ClientError> {
        let resp = self.send(request::list(url)).await?;
        let charset = response_charset(&resp);
        // xml-rs decodes the raw body using `charset` or the XML declaration
        let blob = resp.bytes().await?;
        Document::parse(&blob, charset.as_deref()).map_err(ClientError::from)
    }

    async fn send(&self, spec: RequestSpec) -> Result<reqwest::Response, TransportError> {
        let method = spec.method.clone();
        let url = spec.url.clone();
        tracing::debug!(%method, %url, "Sending WebDAV request");
        let resp = spec.into_request(&self.inner).send().await?;
        let status = resp.status();
        tracing::debug!(%method, %url, %status, "Received response");
        if status.is_success() {
            Ok(resp)
        } else {
            Err(TransportError::Status { url, status })
        }
    }
}

/// The `charset` parameter of the response's `Content-Type`, if any
fn response_charset(resp: &reqwest::Response) -> Option<String> {
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)?
        .to_str()
        .ok()?
        .parse::<Mime>()
        .ok()?;
    content_type
        .get_param(mime::CHARSET)
        .map(|cs| cs.as_str().to_owned())
}

/// List the immediate contents of the collection at `url` using a default
/// [`Client`]
pub async fn list(url: Url) -> Result<Vec<DirectoryEntry>, ClientError> {
    default_client()?.list(url).await
}

/// Create a collection at `url` using a default [`Client`]
pub async fn make_directory(url: Url) -> Result<Url, ClientError> {
    default_client()?.make_directory(url).await
}

/// Upload `body` to `url` using a default [`Client`]
pub async fn make_file<B: Into<Bytes>>(
    url: Url,
    content_type: &Mime,
    body: B,
) -> Result<Url, ClientError> {
    default_client()?.make_file(url, content_type, body).await
}

/// Delete the resource at `url` using a default [`Client`]
pub async fn remove(url: Url) -> Result<Url, ClientError> {
    default_client()?.remove(url).await
}

/// Fetch the resource at `url` as text using a default [`Client`]
pub async fn read_text_file(url: Url) -> Result<Content, ClientError> {
    default_client()?.read_text_file(url).await
}

fn default_client() -> Result<Client, ClientError> {
    Client::new().map_err(ClientError::from)
}
