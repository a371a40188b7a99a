//! The pinned upstream target and the path/query rewrite policy.

use axum::http::uri::{Authority, InvalidUri, PathAndQuery, Scheme};
use axum::http::Uri;

use crate::config::validation::default_path_and_query;
use crate::config::UpstreamConfig;

/// Immutable, process-wide upstream target.
///
/// Built once from validated configuration and shared behind an `Arc`;
/// there is no way to mutate it after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
    default_endpoint: PathAndQuery,
}

impl UpstreamTarget {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, InvalidUri> {
        Ok(Self {
            scheme: Scheme::try_from(config.scheme.as_str())?,
            authority: config.address.parse()?,
            default_endpoint: default_path_and_query(&config.default_path, &config.default_query)
                .parse()?,
        })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn default_endpoint(&self) -> &PathAndQuery {
        &self.default_endpoint
    }

    /// Compute the outbound URI for an inbound one.
    ///
    /// An empty or bare `/` path is redirected to the default endpoint (its
    /// query replaces any inbound query). Every other path keeps its path and
    /// query verbatim. There is no prefix or partial matching.
    pub fn rewrite(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let path_and_query = match inbound.path() {
            "" | "/" => self.default_endpoint.clone(),
            _ => inbound
                .path_and_query()
                .cloned()
                .unwrap_or_else(|| self.default_endpoint.clone()),
        };

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}

impl std::fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.default_endpoint)
    }
}
