use crate::error::{Error, Result};
use core::str::FromStr;

/// A storage backend selected from a database URL.
///
/// Only backends with a streaming bulk-load protocol can be constructed.
/// Anything else is rejected with [`Error::UnsupportedBackend`] before a
/// connection is attempted, so no reset or write ever happens for them.
///
/// # Example
/// ```
/// use seedload::store::Backend;
///
/// assert!(matches!(Backend::from_url("memory://").unwrap(), Backend::Memory));
/// assert!(Backend::from_url("sqlite://local.db").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// PostgreSQL through `COPY ... FROM STDIN`.
    Postgres { url: String },
    /// In-process store; useful for dry runs that only measure generation.
    Memory,
}

impl Backend {
    /// Resolves the backend from the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBackend`] for schemes without a bulk-load
    /// protocol, or for `postgres` when the crate was built without the
    /// `postgres` feature.
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url
            .split_once(':')
            .map_or(url, |(scheme, _)| scheme)
            .to_ascii_lowercase();

        match scheme.as_str() {
            "postgres" | "postgresql" if cfg!(feature = "postgres") => Ok(Self::Postgres {
                url: url.to_owned(),
            }),
            "memory" => Ok(Self::Memory),
            _ => Err(Error::UnsupportedBackend { backend: scheme }),
        }
    }

    /// Backend identifier written to the benchmark report.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => POSTGRES_BACKEND,
            Self::Memory => MEMORY_BACKEND,
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_url(s)
    }
}

pub const POSTGRES_BACKEND: &str = "postgresql";
pub const MEMORY_BACKEND: &str = "memory";
