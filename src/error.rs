//! Unified error type.

use std::net::AddrParseError;

use thiserror::Error;

/// The error type returned by trellis's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// configuration mistakes (a route the matcher rejects, an unparseable
/// address) and infrastructure failures such as binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// The path matcher refused the route: a duplicate (method, path) pair,
    /// a conflicting wildcard, or a malformed parameter.
    #[error("invalid route `{path}`: {source}")]
    Route {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}
