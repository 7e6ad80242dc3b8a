//! Public client surface + builder.
//! Endpoint defaults live in `constants`.

mod constants;

use crate::core::FsError;
use constants::{DEFAULT_BASE_QUOTE_V7, DEFAULT_BASE_TIMESERIES, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Thin wrapper that holds a configured HTTP client and the Yahoo base URLs.
///
/// Cloning is cheap; the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct FsClient {
    http: Client,
    base_quote_v7: Url,
    base_timeseries: Url,
}

impl FsClient {
    /// Create a new builder.
    pub fn builder() -> FsClientBuilder {
        FsClientBuilder::default()
    }

    /// Build a client with default endpoints and no timeouts.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, FsError> {
        Self::builder().build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_quote_v7(&self) -> &Url {
        &self.base_quote_v7
    }
    pub(crate) fn base_timeseries(&self) -> &Url {
        &self.base_timeseries
    }

    /// Send a request and turn any non-success status into the matching `FsError`.
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response, FsError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(FsError::from_status(status.as_u16(), resp.url()))
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FsClientBuilder {
    user_agent: Option<String>,
    base_quote_v7: Option<Url>,
    base_timeseries: Option<Url>,
    proxy: Option<reqwest::Proxy>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl FsClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the v7 quote API base (e.g., `https://query1.finance.yahoo.com/v7/finance/quote`).
    #[must_use]
    pub fn base_quote_v7(mut self, url: Url) -> Self {
        self.base_quote_v7 = Some(url);
        self
    }

    /// Override the fundamentals timeseries base; must end with `/` since the symbol is joined onto it.
    #[must_use]
    pub fn base_timeseries(mut self, url: Url) -> Self {
        self.base_timeseries = Some(url);
        self
    }

    /// Route every request through the given proxy URL.
    ///
    /// # Errors
    ///
    /// Returns `FsError::Http` if the proxy URL is malformed.
    pub fn try_proxy(mut self, proxy_url: &str) -> Result<Self, FsError> {
        self.proxy = Some(reqwest::Proxy::all(proxy_url)?);
        Ok(self)
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Finish the builder.
    ///
    /// # Errors
    ///
    /// Fails if a default URL cannot be parsed or the HTTP client cannot be built.
    pub fn build(self) -> Result<FsClient, FsError> {
        let base_quote_v7 = match self.base_quote_v7 {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE_V7)?,
        };
        let base_timeseries = match self.base_timeseries {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_TIMESERIES)?,
        };

        let mut httpb =
            Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(p) = self.proxy {
            httpb = httpb.proxy(p);
        }
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(FsClient {
            http: httpb.build()?,
            base_quote_v7,
            base_timeseries,
        })
    }
}
