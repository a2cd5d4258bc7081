use bytes::Bytes;
use mime::Mime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

static PROPFIND_CONTENT_TYPE: &str = "text/xml";

static PROPFIND_BODY: &str = r#"<?xml version="1.0"?><a:propfind xmlns:a="DAV:"><a:prop><a:resourcetype/></a:prop></a:propfind>"#;

/// Description of a single HTTP request, independent of how it is sent
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RequestSpec {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Bytes>,
}

impl RequestSpec {
    fn new(method: Method, url: Url) -> RequestSpec {
        RequestSpec {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub(crate) fn into_request(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let req = client.request(self.method, self.url).headers(self.headers);
        match self.body {
            Some(body) => req.body(body),
            None => req,
        }
    }
}

/// `PROPFIND` for the `resourcetype` of `url` and its immediate children
pub(crate) fn list(url: Url) -> RequestSpec {
    let mut spec = RequestSpec::new(method("PROPFIND"), url);
    spec.headers
        .insert(HeaderName::from_static("depth"), HeaderValue::from_static("1"));
    spec.headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(PROPFIND_CONTENT_TYPE),
    );
    spec.body = Some(Bytes::from_static(PROPFIND_BODY.as_bytes()));
    spec
}

pub(crate) fn make_directory(url: Url) -> RequestSpec {
    RequestSpec::new(method("MKCOL"), url)
}

/// `PUT` `body` at `url`.  A content type that is not a valid header value
/// is left out of the request.
pub(crate) fn make_file(url: Url, content_type: &Mime, body: Bytes) -> RequestSpec {
    let mut spec = RequestSpec::new(Method::PUT, url);
    if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
        spec.headers.insert(CONTENT_TYPE, value);
    }
    spec.body = Some(body);
    spec
}

pub(crate) fn remove(url: Url) -> RequestSpec {
    RequestSpec::new(Method::DELETE, url)
}

pub(crate) fn read_text_file(url: Url) -> RequestSpec {
    RequestSpec::new(Method::GET, url)
}

fn method(name: &'static str) -> Method {
    name.parse()
        .unwrap_or_else(|_| panic!("{name:?} should be valid HTTP method"))
}
