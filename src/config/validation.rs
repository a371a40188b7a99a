//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream target (scheme, authority with port, path)
//! - Validate value ranges (probe timeout > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::uri::{Authority, PathAndQuery};
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.scheme `{0}` must be `http` or `https`")]
    Scheme(String),

    #[error("upstream.address `{0}` must be host:port")]
    Address(String),

    #[error("upstream.default_path `{0}` must start with `/`")]
    DefaultPath(String),

    #[error("upstream default endpoint `{0}` is not a valid path and query")]
    DefaultEndpoint(String),

    #[error("forwarding.marker_header `{0}` is not a valid header name")]
    MarkerHeader(String),

    #[error("forwarding.marker_value `{0}` is not a valid header value")]
    MarkerValue(String),

    #[error("forwarding.forwarded_proto `{0}` is not a valid header value")]
    ForwardedProto(String),

    #[error("timeouts.probe_secs must be greater than zero")]
    ProbeTimeout,

    #[error("observability.log_format `{0}` must be `pretty` or `json`")]
    LogFormat(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),
}

/// Check every semantic rule and collect all failures.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let upstream = &config.upstream;
    if upstream.scheme != "http" && upstream.scheme != "https" {
        errors.push(ValidationError::Scheme(upstream.scheme.clone()));
    }

    match upstream.address.parse::<Authority>() {
        Ok(authority) if authority.port_u16().is_some() && !authority.host().is_empty() => {}
        _ => errors.push(ValidationError::Address(upstream.address.clone())),
    }

    if !upstream.default_path.starts_with('/') {
        errors.push(ValidationError::DefaultPath(upstream.default_path.clone()));
    } else {
        let endpoint = default_path_and_query(&upstream.default_path, &upstream.default_query);
        if endpoint.parse::<PathAndQuery>().is_err() {
            errors.push(ValidationError::DefaultEndpoint(endpoint));
        }
    }

    let forwarding = &config.forwarding;
    if HeaderName::from_bytes(forwarding.marker_header.as_bytes()).is_err() {
        errors.push(ValidationError::MarkerHeader(forwarding.marker_header.clone()));
    }
    if HeaderValue::from_str(&forwarding.marker_value).is_err() {
        errors.push(ValidationError::MarkerValue(forwarding.marker_value.clone()));
    }
    if HeaderValue::from_str(&forwarding.forwarded_proto).is_err() {
        errors.push(ValidationError::ForwardedProto(
            forwarding.forwarded_proto.clone(),
        ));
    }

    if config.timeouts.probe_secs == 0 {
        errors.push(ValidationError::ProbeTimeout);
    }

    let format = config.observability.log_format.as_str();
    if format != "pretty" && format != "json" {
        errors.push(ValidationError::LogFormat(format.to_string()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join a default path and optional query into request-target form.
pub(crate) fn default_path_and_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = GatewayConfig::default();
        config.upstream.scheme = "ftp".into();
        config.upstream.address = "bdtunnel.com".into();
        config.upstream.default_path = "sub".into();
        config.timeouts.probe_secs = 0;
        config.forwarding.marker_header = "bad header".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::Scheme("ftp".into())));
        assert!(errors.contains(&ValidationError::Address("bdtunnel.com".into())));
        assert!(errors.contains(&ValidationError::DefaultPath("sub".into())));
        assert!(errors.contains(&ValidationError::ProbeTimeout));
        assert!(errors.contains(&ValidationError::MarkerHeader("bad header".into())));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let mut config = GatewayConfig::default();
        config.observability.log_format = "xml".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::LogFormat("xml".into())])
        );
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }

    #[test]
    fn joins_default_endpoint() {
        assert_eq!(default_path_and_query("/a", ""), "/a");
        assert_eq!(default_path_and_query("/a", "b=1"), "/a?b=1");
    }
}
