//! This is the `ClientConfig` struct.
//!
//! It holds everything a `Client` needs that is not the HTTP client itself: where to send
//! the request and how long to wait for it.  It can be read from an HCL file:
//!
//! ```hcl
//! version = 1
//! base_url = "http://api.open-notify.org/iss-now.json"
//! timeout = 10
//! ```
//!
//! Missing keys take their default value.
//!

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::{ConfigError, DEFAULT_TIMEOUT, DEFAULT_URL};

/// Config filename
const CONFIG: &str = "config.hcl";

/// Directory under `.config`
const TAG: &str = "iss";

/// Current configuration file version
pub const CVERSION: usize = 1;

/// Client configuration, exclusively owned by the `Client` built from it.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Version number for safety
    pub version: usize,
    /// URL of the position endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            version: CVERSION,
            base_url: DEFAULT_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    /// Timeout as a `Duration`
    ///
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Returns the path of the default config file, if we have a home directory
    ///
    pub fn default_file() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let cfg = base.home_dir().join(".config").join(TAG).join(CONFIG);
        debug!("default = {cfg:?}");
        Some(cfg)
    }

    /// Load configuration.
    ///
    /// Use the following search path:
    /// - file specified by the caller, it must exist
    /// - default file in `$HOME/.config/iss/`, if present
    /// - built-in defaults
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Self, ConfigError> {
        let fname = match fname {
            Some(fname) => fname.to_path_buf(),
            None => match Self::default_file() {
                Some(fname) if fname.exists() => fname,
                _ => {
                    trace!("no configuration file, using defaults");
                    return Ok(ClientConfig::default());
                }
            },
        };
        trace!("loading {fname:?}");

        let data = fs::read_to_string(&fname).map_err(|source| ConfigError::Read {
            path: fname.clone(),
            source,
        })?;
        Self::from_hcl(&data)
    }

    /// Parse configuration from an HCL string and check its version.
    ///
    pub fn from_hcl(data: &str) -> Result<Self, ConfigError> {
        let cfg: ClientConfig = hcl::from_str(data)?;
        if cfg.version != CVERSION {
            return Err(ConfigError::BadVersion(cfg.version));
        }
        Ok(cfg)
    }
}
