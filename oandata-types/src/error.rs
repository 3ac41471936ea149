use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the oandata workspace.
///
/// This covers argument validation, provider-tagged failures, data and
/// configuration problems, and the terminal failure raised once a sub-range
/// has exhausted its retry budget.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OandataError {
    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The granularity code is not one of the recognized enumerants.
    #[error("invalid granularity: {code:?}")]
    InvalidGranularity {
        /// The code that failed to parse.
        code: String,
    },

    /// An individual provider call failed.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the client's own timeout.
    #[error("provider timed out: {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
    },

    /// Issues with the returned or expected data (missing price quads, bad timestamps).
    #[error("data issue: {0}")]
    Data(String),

    /// Missing or malformed configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing the assembled table failed.
    #[error("output failed: {0}")]
    Output(String),

    /// Every attempt for one sub-range failed; the whole fetch was aborted.
    #[error("fetching {from}..={to} failed after {attempts} attempt(s): {last}")]
    FetchFailed {
        /// First day of the failed sub-range.
        from: NaiveDate,
        /// Last day of the failed sub-range.
        to: NaiveDate,
        /// Number of attempts made before giving up.
        attempts: u32,
        /// The error returned by the final attempt.
        #[source]
        last: Box<OandataError>,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl OandataError {
    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
        }
    }

    /// Helper: build an `InvalidGranularity` error for an unparsable code.
    pub fn invalid_granularity(code: impl Into<String>) -> Self {
        Self::InvalidGranularity { code: code.into() }
    }

    /// Helper: build a `FetchFailed` error wrapping the last attempt's error.
    #[must_use]
    pub fn fetch_failed(from: NaiveDate, to: NaiveDate, attempts: u32, last: Self) -> Self {
        Self::FetchFailed {
            from,
            to,
            attempts,
            last: Box::new(last),
        }
    }

    /// Returns true for errors raised by input validation, before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArg(_) | Self::InvalidGranularity { .. })
    }

    /// Returns true for failures a retry may cure.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. } | Self::ProviderTimeout { .. } | Self::Other(_)
        )
    }

    /// Unwrap nested `FetchFailed` layers down to the provider error that caused them.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::FetchFailed { last, .. } => last.root_cause(),
            other => other,
        }
    }
}
