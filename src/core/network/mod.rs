//! Network descriptor + builder.
//! Internals are split into `auth` (session flows) and `constants` (endpoints + defaults).

mod auth;
pub(crate) mod constants;

pub use auth::Session;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use url::Url;

use crate::core::FmError;
use crate::core::cache::{CacheBackend, FileCache, MemoryCache};
use crate::core::retry::RetryConfig;
use crate::core::signer::md5_hex;
use constants::{
    LASTFM_HOMEPAGE, LASTFM_NAME, LASTFM_URLS, LASTFM_WS, LIBREFM_HOMEPAGE, LIBREFM_NAME,
    LIBREFM_URLS, LIBREFM_WS, RATE_LIMIT_DELAY, USER_AGENT,
};

/// A known Last.fm-compatible deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    LastFm,
    LibreFm,
}

/// Language-specific website domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    English,
    German,
    Spanish,
    French,
    Italian,
    Polish,
    Portuguese,
    Swedish,
    Turkish,
    Russian,
    Japanese,
    Chinese,
}

impl Domain {
    pub const ALL: [Domain; 12] = [
        Domain::English,
        Domain::German,
        Domain::Spanish,
        Domain::French,
        Domain::Italian,
        Domain::Polish,
        Domain::Portuguese,
        Domain::Swedish,
        Domain::Turkish,
        Domain::Russian,
        Domain::Japanese,
        Domain::Chinese,
    ];

    const fn lastfm_suffix(self) -> &'static str {
        match self {
            Domain::English => "",
            Domain::German => "/de",
            Domain::Spanish => "/es",
            Domain::French => "/fr",
            Domain::Italian => "/it",
            Domain::Polish => "/pl",
            Domain::Portuguese => "/pt",
            Domain::Swedish => "/sv",
            Domain::Turkish => "/tr",
            Domain::Russian => "/ru",
            Domain::Japanese => "/ja",
            Domain::Chinese => "/zh",
        }
    }
}

/// Kinds of entity pages with a website URL template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UrlKind {
    Artist,
    Album,
    Track,
    Tag,
    User,
    Country,
}

#[derive(Debug, Default)]
struct Credentials {
    session_key: Option<String>,
    username: Option<String>,
    password_hash: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpConfig {
    user_agent: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

#[derive(Debug)]
struct HttpState {
    client: Client,
    proxy: Option<String>,
}

struct Inner {
    name: String,
    homepage: String,
    ws_base: Url,
    domains: HashMap<Domain, String>,
    urls: HashMap<UrlKind, String>,
    api_key: String,
    api_secret: String,
    http_config: HttpConfig,
    http: RwLock<HttpState>,
    credentials: RwLock<Credentials>,
    cache: RwLock<Option<Arc<dyn CacheBackend>>>,
    rate_limit: AtomicBool,
    last_call: Mutex<Option<Instant>>,
    retry: RetryConfig,
}

/// One remote endpoint plus the credentials and state used to talk to it.
///
/// Cloning is cheap and clones share state: session key, cache, rate-limit clock.
/// Separate networks built for the same service are fully independent.
///
/// # Example
///
/// ```no_run
/// # use lastfm_rs::{Network, Service};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::builder(Service::LastFm)
///     .api_key("KEY")
///     .api_secret("SECRET")
///     .username("rj")
///     .password("hunter2")
///     .rate_limit(true)
///     .connect()
///     .await?;
/// assert!(network.session_key().await.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Network {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("name", &self.inner.name)
            .field("ws_base", &self.inner.ws_base.as_str())
            .finish_non_exhaustive()
    }
}

impl Network {
    /// Create a builder preloaded with the endpoints of `service`.
    pub fn builder(service: Service) -> NetworkBuilder {
        NetworkBuilder::for_service(service)
    }

    /* -------- descriptor -------- */

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub fn homepage(&self) -> &str {
        &self.inner.homepage
    }

    /// Full webservice URL requests are posted to.
    #[must_use]
    pub fn ws_base(&self) -> &Url {
        &self.inner.ws_base
    }

    #[must_use]
    pub fn ws_host(&self) -> &str {
        self.inner.ws_base.host_str().unwrap_or_default()
    }

    #[must_use]
    pub fn ws_path(&self) -> &str {
        self.inner.ws_base.path()
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.inner.api_secret
    }

    /// Website host for `domain`.
    #[must_use]
    pub fn domain_host(&self, domain: Domain) -> Option<&str> {
        self.inner.domains.get(&domain).map(String::as_str)
    }

    #[must_use]
    pub fn url_template(&self, kind: UrlKind) -> Option<&str> {
        self.inner.urls.get(&kind).map(String::as_str)
    }

    /// Website URL of an entity page.
    ///
    /// Each `{placeholder}` in the template for `kind` is replaced by the matching value,
    /// form-encoded. Returns `None` when the network has no template or domain for it.
    #[must_use]
    pub fn entity_url(&self, domain: Domain, kind: UrlKind, values: &[(&str, &str)]) -> Option<String> {
        let host = self.domain_host(domain)?;
        let mut path = self.url_template(kind)?.to_string();
        for (name, value) in values {
            let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
            path = path.replace(&format!("{{{name}}}"), &encoded);
        }
        Some(format!("https://{host}/{path}"))
    }

    /// Retry policy applied by the paginator.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry
    }

    /* -------- credentials -------- */

    pub async fn session_key(&self) -> Option<String> {
        self.inner.credentials.read().await.session_key.clone()
    }

    pub async fn set_session_key(&self, key: impl Into<String>) {
        self.inner.credentials.write().await.session_key = Some(key.into());
    }

    pub async fn username(&self) -> Option<String> {
        self.inner.credentials.read().await.username.clone()
    }

    pub async fn set_username(&self, name: impl Into<String>) {
        self.inner.credentials.write().await.username = Some(name.into());
    }

    pub async fn password_hash(&self) -> Option<String> {
        self.inner.credentials.read().await.password_hash.clone()
    }

    pub(crate) async fn pending_token(&self) -> Option<String> {
        self.inner.credentials.read().await.token.clone()
    }

    pub(crate) async fn clear_pending_token(&self) {
        self.inner.credentials.write().await.token = None;
    }

    /* -------- cache -------- */

    pub async fn is_caching_enabled(&self) -> bool {
        self.inner.cache.read().await.is_some()
    }

    /// Enables response caching.
    ///
    /// With no `path` an ephemeral in-memory store is created; otherwise the file store at
    /// `path` is opened (and created on first write). Replaces any active cache.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing cache file cannot be read.
    pub async fn enable_caching(&self, path: Option<&Path>) -> Result<(), FmError> {
        let backend: Arc<dyn CacheBackend> = match path {
            Some(p) => Arc::new(FileCache::open(p)?),
            None => Arc::new(MemoryCache::new()),
        };
        self.set_cache_backend(backend).await;
        Ok(())
    }

    /// Installs a caller-provided backend.
    pub async fn set_cache_backend(&self, backend: Arc<dyn CacheBackend>) {
        *self.inner.cache.write().await = Some(backend);
    }

    pub async fn disable_caching(&self) {
        *self.inner.cache.write().await = None;
    }

    pub async fn cache_backend(&self) -> Option<Arc<dyn CacheBackend>> {
        self.inner.cache.read().await.clone()
    }

    /* -------- rate limiting -------- */

    pub fn enable_rate_limit(&self) {
        self.inner.rate_limit.store(true, Ordering::Relaxed);
    }

    pub fn disable_rate_limit(&self) {
        self.inner.rate_limit.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.inner.rate_limit.load(Ordering::Relaxed)
    }

    /// Waits until the next dispatch is allowed, then stamps the dispatch time.
    ///
    /// The gate is held while sleeping, so concurrent callers on one network are spaced
    /// out one after another. Uses the monotonic clock.
    pub(crate) async fn throttle(&self) {
        let mut last = self.inner.last_call.lock().await;
        if self.is_rate_limited()
            && let Some(prev) = *last
        {
            let elapsed = prev.elapsed();
            if elapsed < RATE_LIMIT_DELAY {
                #[cfg(feature = "tracing")]
                tracing::debug!(wait_ms = (RATE_LIMIT_DELAY - elapsed).as_millis() as u64, "rate limit");
                tokio::time::sleep(RATE_LIMIT_DELAY - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /* -------- transport -------- */

    pub(crate) async fn http(&self) -> Client {
        self.inner.http.read().await.client.clone()
    }

    /// Routes every subsequent request through `proxy` (e.g. `http://host:3128`).
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the HTTP client cannot be rebuilt.
    pub async fn enable_proxy(&self, proxy: impl Into<String>) -> Result<(), FmError> {
        let proxy = proxy.into();
        let client = build_http(&self.inner.http_config, Some(&proxy))?;
        *self.inner.http.write().await = HttpState {
            client,
            proxy: Some(proxy),
        };
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub async fn disable_proxy(&self) -> Result<(), FmError> {
        let client = build_http(&self.inner.http_config, None)?;
        *self.inner.http.write().await = HttpState {
            client,
            proxy: None,
        };
        Ok(())
    }

    pub async fn is_proxy_enabled(&self) -> bool {
        self.inner.http.read().await.proxy.is_some()
    }
}

fn build_http(cfg: &HttpConfig, proxy: Option<&str>) -> Result<Client, FmError> {
    let mut httpb = Client::builder().user_agent(cfg.user_agent.as_str());

    if let Some(t) = cfg.timeout {
        httpb = httpb.timeout(t);
    }
    if let Some(ct) = cfg.connect_timeout {
        httpb = httpb.connect_timeout(ct);
    }
    httpb = match proxy {
        Some(p) => {
            let proxy = reqwest::Proxy::all(p).map_err(|e| {
                FmError::client_with_source(format!("invalid proxy URL: {p}"), FmError::Transport(e))
            })?;
            httpb.proxy(proxy)
        }
        None => httpb.no_proxy(),
    };

    Ok(httpb.build()?)
}

/* ----------------------- Builder ----------------------- */

enum CacheSetting {
    Off,
    Memory,
    File(PathBuf),
    Custom(Arc<dyn CacheBackend>),
}

pub struct NetworkBuilder {
    name: String,
    homepage: String,
    ws_base: Result<Url, url::ParseError>,
    domains: HashMap<Domain, String>,
    urls: HashMap<UrlKind, String>,

    api_key: String,
    api_secret: String,
    session_key: Option<String>,
    username: Option<String>,
    password_hash: Option<String>,
    token: Option<String>,

    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<String>,
    rate_limit: bool,
    cache: CacheSetting,
    retry: RetryConfig,
}

impl NetworkBuilder {
    fn for_service(service: Service) -> Self {
        match service {
            Service::LastFm => {
                let domains = Domain::ALL
                    .iter()
                    .map(|d| (*d, format!("www.last.fm{}", d.lastfm_suffix())))
                    .collect();
                Self::custom(LASTFM_NAME, LASTFM_HOMEPAGE, LASTFM_WS)
                    .domains(domains)
                    .url_templates(LASTFM_URLS)
            }
            Service::LibreFm => {
                let domains = Domain::ALL.iter().map(|d| (*d, "libre.fm".to_string())).collect();
                Self::custom(LIBREFM_NAME, LIBREFM_HOMEPAGE, LIBREFM_WS)
                    .domains(domains)
                    .url_templates(LIBREFM_URLS)
            }
        }
    }

    /// A builder for a deployment without a preset. `ws_base` is the full webservice URL
    /// (e.g. `https://example.org/2.0/`); a parse error surfaces from [`NetworkBuilder::build`].
    pub fn custom(name: impl Into<String>, homepage: impl Into<String>, ws_base: &str) -> Self {
        Self {
            name: name.into(),
            homepage: homepage.into(),
            ws_base: Url::parse(ws_base),
            domains: HashMap::new(),
            urls: HashMap::new(),
            api_key: String::new(),
            api_secret: String::new(),
            session_key: None,
            username: None,
            password_hash: None,
            token: None,
            user_agent: None,
            timeout: None,
            connect_timeout: None,
            proxy: None,
            rate_limit: false,
            cache: CacheSetting::Off,
            retry: RetryConfig::default(),
        }
    }

    /// Override the webservice URL (handy for tests/mocks).
    pub fn ws_base(mut self, url: Url) -> Self {
        self.ws_base = Ok(url);
        self
    }

    pub fn domains(mut self, domains: HashMap<Domain, String>) -> Self {
        self.domains = domains;
        self
    }

    pub fn url_templates(mut self, templates: &[(UrlKind, &str)]) -> Self {
        self.urls = templates.iter().map(|(k, t)| (*k, (*t).to_string())).collect();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = secret.into();
        self
    }

    /// Use an existing session key; no authentication flow will run.
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    pub fn username(mut self, name: impl Into<String>) -> Self {
        self.username = Some(name.into());
        self
    }

    /// Hex MD5 of the user's password.
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Plain password; only its MD5 is kept.
    pub fn password(mut self, password: &str) -> Self {
        self.password_hash = Some(md5_hex(password));
        self
    }

    /// An already-authorized web token, exchanged for a session key by [`NetworkBuilder::connect`].
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Space dispatches at least 0.2 s apart. Default: off.
    pub fn rate_limit(mut self, yes: bool) -> Self {
        self.rate_limit = yes;
        self
    }

    /// Enable caching in an ephemeral in-memory store.
    pub fn cache_in_memory(mut self) -> Self {
        self.cache = CacheSetting::Memory;
        self
    }

    /// Enable caching in the file store at `path`.
    pub fn cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache = CacheSetting::File(path.into());
        self
    }

    pub fn cache_backend(mut self, backend: Arc<dyn CacheBackend>) -> Self {
        self.cache = CacheSetting::Custom(backend);
        self
    }

    /// Retry policy for paginated collection.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Build the network without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the webservice URL or proxy is invalid, the HTTP client cannot be
    /// created, or the cache file cannot be opened.
    pub fn build(self) -> Result<Network, FmError> {
        let ws_base = self.ws_base?;
        let http_config = HttpConfig {
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        };
        let client = build_http(&http_config, self.proxy.as_deref())?;

        let cache: Option<Arc<dyn CacheBackend>> = match self.cache {
            CacheSetting::Off => None,
            CacheSetting::Memory => Some(Arc::new(MemoryCache::new())),
            CacheSetting::File(p) => Some(Arc::new(FileCache::open(p)?)),
            CacheSetting::Custom(b) => Some(b),
        };

        Ok(Network {
            inner: Arc::new(Inner {
                name: self.name,
                homepage: self.homepage,
                ws_base,
                domains: self.domains,
                urls: self.urls,
                api_key: self.api_key,
                api_secret: self.api_secret,
                http_config,
                http: RwLock::new(HttpState {
                    client,
                    proxy: self.proxy,
                }),
                credentials: RwLock::new(Credentials {
                    session_key: self.session_key,
                    username: self.username,
                    password_hash: self.password_hash,
                    token: self.token,
                }),
                cache: RwLock::new(cache),
                rate_limit: AtomicBool::new(self.rate_limit),
                last_call: Mutex::new(None),
                retry: self.retry,
            }),
        })
    }

    /// Build, then establish a session if a token or username + password hash were given.
    ///
    /// # Errors
    ///
    /// Returns any error from [`NetworkBuilder::build`] or from the authentication call.
    pub async fn connect(self) -> Result<Network, FmError> {
        let network = self.build()?;
        network.authenticate().await?;
        Ok(network)
    }
}
