//! Minimal URL parsing for request targets and `Host` headers.
//!
//! Handles `scheme://host:port/path?query`, scheme-less `host:port`, and bare
//! origin-form targets such as `/path?query`. It is deliberately not a full
//! URI-syntax implementation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::http::error::UrlError;
use crate::http::value::Param;

/// Ordered query parameters, keyed by name.
pub type Params = IndexMap<String, Param>;

/// Default port for a known scheme.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// Port of a parsed URL and whether it was written out explicitly.
///
/// When `explicit` is false, `value` is the scheme's default port, or `None`
/// for schemes without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    pub value: Option<u16>,
    pub explicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    protocol: String,
    host: String,
    port: PortInfo,
    path: String,
    params: Params,
}

impl Url {
    /// Parses a raw URL or request target.
    ///
    /// # Example
    ///
    /// ```
    /// # use rawhttp::http::url::Url;
    /// let url = Url::parse("HTTP://example.com:8080/search?q=rust&page=2").unwrap();
    /// assert_eq!(url.protocol(), "http");
    /// assert_eq!(url.host(), "example.com");
    /// assert_eq!(url.port().value, Some(8080));
    /// assert_eq!(url.path(), "/search");
    /// assert_eq!(url.params()["q"], "rust");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        // A scheme marker only counts if it is the first slash in the input.
        let (protocol, rest) = match (raw.find("//"), raw.find('/')) {
            (Some(marker), Some(slash)) if marker == slash => {
                let scheme = &raw[..marker];
                let scheme = scheme.strip_suffix(':').unwrap_or(scheme);
                (scheme.to_ascii_lowercase(), &raw[marker + 2..])
            }
            _ => (String::new(), raw),
        };

        let host_end = rest.find('/').unwrap_or(rest.len());
        let (authority, target) = rest.split_at(host_end);

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let value = port
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| UrlError::InvalidPort(port.to_string()))?;
                (host, PortInfo { value: Some(value), explicit: true })
            }
            None => (
                authority,
                PortInfo { value: default_port(&protocol), explicit: false },
            ),
        };

        let mut pieces = target.split('?');
        let path = pieces.next().unwrap_or_default();
        let query = pieces.next();
        if pieces.next().is_some() {
            return Err(UrlError::UnexpectedQuery);
        }

        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
            path: path.to_string(),
            params: query.map(parse_query).unwrap_or_default(),
        })
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> PortInfo {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_parts(self) -> (String, Params) {
        (self.path, self.params)
    }
}

fn parse_query(query: &str) -> Params {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.to_string(), Param::new(value))
        })
        .collect()
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.protocol.is_empty() {
            write!(f, "{}://", self.protocol)?;
        }

        f.write_str(&self.host)?;

        if self.port.explicit {
            if let Some(port) = self.port.value {
                write!(f, ":{port}")?;
            }
        }

        f.write_str(&self.path)?;

        for (index, (key, value)) in self.params.iter().enumerate() {
            let lead = if index == 0 { '?' } else { '&' };
            write!(f, "{lead}{key}={value}")?;
        }

        Ok(())
    }
}
