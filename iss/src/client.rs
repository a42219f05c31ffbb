//! The ISS API client.
//!
//! More information about the API can be obtained on the website:
//! <http://open-notify.org/Open-Notify-API/>
//!
//! A `Client` only holds immutable configuration once built, so one instance can be
//! shared between threads and `get_position()` called concurrently.
//!

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;
use tracing::{debug, trace};

use crate::position::parse_response;
use crate::{
    ClientConfig, ConfigError, IssError, Position, DEFAULT_TIMEOUT, DEFAULT_URL, MAX_TIMEOUT,
};

/// The International Space Station (ISS) client.
///
#[derive(Clone, Debug)]
pub struct Client {
    /// Endpoint we query
    base_url: String,
    /// reqwest blocking client
    client: HttpClient,
}

/// Where the HTTP client will come from.
///
#[derive(Debug)]
enum Transport {
    /// Build one with our timeout
    Default,
    /// Supplied by the caller, used as-is
    Custom(HttpClient),
}

/// Explicit configuration for a `Client`.
///
/// Settings are applied in call order and the first invalid one is remembered and returned
/// by `build()`; later calls are then ignored.
///
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    transport: Transport,
    err: Option<ConfigError>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        ClientBuilder {
            base_url: DEFAULT_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            transport: Transport::Default,
            err: None,
        }
    }
}

impl ClientBuilder {
    /// Record the first error only
    ///
    fn fail(mut self, err: ConfigError) -> Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }

    /// Use a custom ISS URL, must not be empty.
    ///
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if self.err.is_some() {
            return self;
        }
        if url.is_empty() {
            return self.fail(ConfigError::EmptyUrl);
        }
        self.base_url = url;
        self
    }

    /// Use a custom HTTP client.  `None` is an error.
    ///
    /// The custom client keeps its own timeout settings.
    ///
    pub fn http_client(mut self, hc: impl Into<Option<HttpClient>>) -> Self {
        if self.err.is_some() {
            return self;
        }
        match hc.into() {
            Some(hc) => {
                self.transport = Transport::Custom(hc);
                self
            }
            None => self.fail(ConfigError::NilHttpClient),
        }
    }

    /// Request timeout for the default HTTP client, from 1s up to `MAX_TIMEOUT`.
    ///
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if self.err.is_some() {
            return self;
        }
        if timeout.as_secs() == 0 || timeout > MAX_TIMEOUT {
            return self.fail(ConfigError::BadTimeout);
        }
        self.timeout = timeout;
        self
    }

    /// Apply everything from a `ClientConfig`.
    ///
    pub fn config(self, cfg: &ClientConfig) -> Self {
        self.base_url(cfg.base_url.as_str()).timeout(cfg.timeout())
    }

    /// Validate and return the client, or the first configuration error.
    ///
    #[tracing::instrument(skip(self))]
    pub fn build(self) -> Result<Client, ConfigError> {
        if let Some(err) = self.err {
            return Err(err);
        }

        let client = match self.transport {
            Transport::Custom(hc) => hc,
            Transport::Default => HttpClient::builder()
                .timeout(self.timeout)
                .build()
                .map_err(ConfigError::Build)?,
        };
        trace!("client for {} ready", self.base_url);

        Ok(Client {
            base_url: self.base_url,
            client,
        })
    }
}

impl Client {
    /// Start with the defaults: public Open Notify endpoint, 10s timeout.
    ///
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Default client.
    ///
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Client configured from a loaded `ClientConfig`.
    ///
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ConfigError> {
        Self::builder().config(cfg).build()
    }

    /// Configured endpoint
    ///
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the ISS coordinates (latitude/longitude) at the time of the request.
    ///
    #[tracing::instrument(skip(self), fields(url = %self.base_url))]
    pub fn get_position(&self) -> Result<Position, IssError> {
        trace!("fetching position");

        let resp = http_get!(self.client, &self.base_url).map_err(IssError::Transport)?;
        debug!("{:?}", &resp);

        // Check status
        //
        match resp.status() {
            StatusCode::OK => trace!("OK"),
            code => return Err(IssError::Status(code.as_u16())),
        }

        let body = resp.text().map_err(IssError::Transport)?;
        debug!("{} bytes read.", body.len());

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use rust_decimal::Decimal;

    use super::*;

    const PATH: &str = "/iss-now.json";
    const GOOD: &str = r##"{"timestamp": 1638559834, "message": "success", "iss_position": {"latitude": "29.9314", "longitude": "11.3786"}}"##;

    fn setup(server: &MockServer) -> Client {
        Client::builder()
            .base_url(server.url(PATH))
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_defaults() {
        let c = Client::new().unwrap();
        assert_eq!(DEFAULT_URL, c.base_url());
    }

    #[test]
    fn test_client_empty_url() {
        let r = Client::builder().base_url("").build();
        assert!(matches!(r, Err(ConfigError::EmptyUrl)));
    }

    #[test]
    fn test_client_nil_http_client() {
        let r = Client::builder().http_client(None::<HttpClient>).build();
        assert!(matches!(r, Err(ConfigError::NilHttpClient)));
    }

    #[test]
    fn test_client_zero_timeout() {
        let r = Client::builder().timeout(Duration::ZERO).build();
        assert!(matches!(r, Err(ConfigError::BadTimeout)));
    }

    #[test]
    fn test_client_huge_timeout() {
        let r = Client::builder()
            .timeout(Duration::from_secs(u64::MAX))
            .build();
        assert!(matches!(r, Err(ConfigError::BadTimeout)));

        let r = Client::builder()
            .timeout(MAX_TIMEOUT + Duration::from_secs(1))
            .build();
        assert!(matches!(r, Err(ConfigError::BadTimeout)));

        assert!(Client::builder().timeout(MAX_TIMEOUT).build().is_ok());
    }

    #[test]
    fn test_client_first_error_wins() {
        let r = Client::builder()
            .http_client(None::<HttpClient>)
            .base_url("")
            .build();
        assert!(matches!(r, Err(ConfigError::NilHttpClient)));

        let r = Client::builder()
            .base_url("")
            .http_client(None::<HttpClient>)
            .build();
        assert!(matches!(r, Err(ConfigError::EmptyUrl)));
    }

    #[test]
    fn test_client_from_config() {
        let cfg = ClientConfig {
            base_url: "http://localhost/iss".to_string(),
            ..Default::default()
        };
        let c = Client::from_config(&cfg).unwrap();
        assert_eq!("http://localhost/iss", c.base_url());

        let cfg = ClientConfig {
            timeout: 0,
            ..Default::default()
        };
        assert!(matches!(
            Client::from_config(&cfg),
            Err(ConfigError::BadTimeout)
        ));

        let cfg = ClientConfig {
            timeout: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Client::from_config(&cfg),
            Err(ConfigError::BadTimeout)
        ));
    }

    #[test]
    fn test_get_position() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .header("user-agent", crate::version())
                .header("content-type", "application/json")
                .path(PATH);
            then.status(200).body(GOOD);
        });

        let pos = setup(&server).get_position();

        m.assert();
        let pos = pos.unwrap();
        assert_eq!(
            Position {
                lat: Decimal::new(299314, 4),
                long: Decimal::new(113786, 4),
            },
            pos
        );
    }

    #[test]
    fn test_get_position_custom_http_client() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(GOOD);
        });

        let hc = HttpClient::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let client = Client::builder()
            .http_client(hc)
            .base_url(server.url(PATH))
            .build()
            .unwrap();
        let pos = client.get_position();

        m.assert();
        assert!(pos.is_ok());
    }

    #[test]
    fn test_get_position_bad_status() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(503).body(GOOD);
        });

        let r = setup(&server).get_position();

        m.assert();
        assert!(matches!(r, Err(IssError::Status(503))));
    }

    #[test]
    fn test_get_position_empty_body() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body("{}");
        });

        let r = setup(&server).get_position();

        m.assert();
        assert!(matches!(r, Err(IssError::Decode(_))));
    }

    #[test]
    fn test_get_position_bad_latitude() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(
                r##"{"timestamp": 1638559834, "message": "success", "iss_position": {"latitude": "", "longitude": "11.3786"}}"##,
            );
        });

        let r = setup(&server).get_position();
        assert!(matches!(
            r,
            Err(IssError::Conversion {
                field: "latitude",
                ..
            })
        ));
    }

    #[test]
    fn test_get_position_bad_longitude() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(
                r##"{"timestamp": 1638559834, "message": "success", "iss_position": {"latitude": "29.9314", "longitude": ""}}"##,
            );
        });

        let r = setup(&server).get_position();
        assert!(matches!(
            r,
            Err(IssError::Conversion {
                field: "longitude",
                ..
            })
        ));
    }

    #[test]
    fn test_get_position_connection_refused() {
        let client = Client::builder()
            .base_url("http://127.0.0.1:1/iss-now.json")
            .build()
            .unwrap();

        let r = client.get_position();
        assert!(matches!(r, Err(IssError::Transport(_))));
        assert!(r.unwrap_err().to_string().starts_with("calling ISS API"));
    }

    #[test]
    fn test_get_position_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).delay(Duration::from_secs(3)).body(GOOD);
        });

        let client = Client::builder()
            .base_url(server.url(PATH))
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();

        let r = client.get_position();
        assert!(matches!(r, Err(IssError::Transport(_))));
    }

    #[test]
    fn test_get_position_shared_between_threads() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(GOOD);
        });

        let client = &setup(&server);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || client.get_position()))
                .collect();
            for h in handles {
                assert!(h.join().unwrap().is_ok());
            }
        });

        m.assert_hits(4);
    }
}
