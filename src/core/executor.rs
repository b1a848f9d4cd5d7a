//! The request pipeline: finalize parameters, consult the cache, throttle, POST,
//! parse, validate.

use reqwest::header::{ACCEPT_CHARSET, CONTENT_TYPE};

use crate::core::params::{ParamValue, Params};
use crate::core::signer::{self, API_KEY, API_SIG, SESSION_KEY};
use crate::core::xml::Document;
use crate::core::{FmError, Network};

/// One call to the web service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    params: Params,
    cacheable: bool,
    signed: bool,
}

impl Request {
    /// A request for the dotted remote method `method`, e.g. `artist.getInfo`.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Params::new(),
            cacheable: false,
            signed: false,
        }
    }

    /// Replaces all caller parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Allow the response to be served from and stored in the network's cache.
    #[must_use]
    pub const fn cacheable(mut self, yes: bool) -> Self {
        self.cacheable = yes;
        self
    }

    /// Sign even without a session key (the authentication calls need this).
    #[must_use]
    pub const fn signed(mut self, yes: bool) -> Self {
        self.signed = yes;
        self
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn caller_params(&self) -> &Params {
        &self.params
    }

    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.cacheable
    }
}

/// Runs `request` against `network` and returns the validated document.
///
/// # Errors
///
/// - [`FmError::Transport`] if no response body could be obtained.
/// - [`FmError::Protocol`] on HTTP 500, 502, 503 or 504.
/// - [`FmError::Malformed`] if the body is not XML even after repair.
/// - [`FmError::Service`] if the service answered `status="failed"`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(network, request), err, fields(method = %request.method)))]
pub async fn execute(network: &Network, request: &Request) -> Result<Document, FmError> {
    let params = finalize_params(network, request).await;

    let cache = if request.cacheable {
        network.cache_backend().await
    } else {
        None
    };
    let cache_key = cache.as_ref().map(|_| signer::cache_key(&params));

    if let (Some(cache), Some(key)) = (&cache, &cache_key)
        && let Some(body) = cache.get(key)
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %key, "cache hit");
        return parse_checked(&body);
    }

    network.throttle().await;
    let body = send(network, &params).await?;
    let doc = parse_checked(&body)?;

    if let (Some(cache), Some(key)) = (&cache, &cache_key) {
        cache.put(key, &body)?;
    }

    Ok(doc)
}

/// Injects `api_key`, `method`, and with a session `sk`; signs when required.
pub(crate) async fn finalize_params(network: &Network, request: &Request) -> Params {
    let mut params = request.params.clone();
    params.remove(API_SIG);
    params.insert(API_KEY, network.api_key());
    params.insert("method", request.method.as_str());

    let mut sign = request.signed;
    if let Some(sk) = network.session_key().await {
        params.insert(SESSION_KEY, sk);
        sign = true;
    }
    if sign {
        let sig = signer::sign(&params, network.api_secret());
        params.insert(API_SIG, sig);
    }
    params
}

async fn send(network: &Network, params: &Params) -> Result<String, FmError> {
    let http = network.http().await;
    let resp = http
        .post(network.ws_base().clone())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT_CHARSET, "utf-8")
        .body(params.to_form_body())
        .send()
        .await?;

    let status = resp.status().as_u16();
    if matches!(status, 500 | 502 | 503 | 504) {
        return Err(FmError::Protocol {
            status,
            url: resp.url().to_string(),
        });
    }

    Ok(resp.text().await?)
}

fn parse_checked(body: &str) -> Result<Document, FmError> {
    let doc = Document::parse(body)?;
    check_status(&doc)?;
    Ok(doc)
}

/// Maps `<lfm status="failed"><error code="N">detail</error></lfm>` to [`FmError::Service`].
pub(crate) fn check_status(doc: &Document) -> Result<(), FmError> {
    if doc.root().attr("status") == Some("ok") {
        return Ok(());
    }

    let error = doc
        .elements_by_tag("error")
        .into_iter()
        .next()
        .ok_or_else(|| FmError::client("failed response carries no error element"))?;
    let code = error
        .attr("code")
        .and_then(|c| c.trim().parse::<u32>().ok())
        .ok_or_else(|| FmError::client("error element has no numeric code"))?;

    Err(FmError::Service {
        code,
        detail: error.text().trim().to_string(),
    })
}

impl Network {
    /// Runs one request through the pipeline. See [`execute`].
    ///
    /// # Errors
    ///
    /// See [`execute`].
    pub async fn execute(&self, request: &Request) -> Result<Document, FmError> {
        execute(self, request).await
    }
}
