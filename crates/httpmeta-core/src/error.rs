//! Error type shared by every stage of the summary pipeline.
//!
//! A missing `<title>` is not represented here: the fetch stage reports it as
//! [`crate::summary::Outcome::NoTitle`].

use crate::status::reason_phrase;

#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// URL could not be parsed or has no host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Server answered with a status outside 2xx/3xx.
    #[error("HTTP {code} {reason}")]
    Http { code: u32, reason: &'static str },
    /// DNS, TCP or TLS failure.
    #[error("connection failed: {0}")]
    Connection(#[source] curl::Error),
    /// Connect or transfer timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] curl::Error),
    /// Any other curl failure.
    #[error("transfer failed: {0}")]
    Transfer(#[source] curl::Error),
}

impl MetaError {
    pub fn http(code: u32) -> Self {
        MetaError::Http {
            code,
            reason: reason_phrase(code),
        }
    }

    /// Classify a curl error the way the retry classifier splits them.
    pub fn from_curl(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            return MetaError::Timeout(e);
        }
        if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_ssl_connect_error()
            || e.is_peer_failed_verification()
            || e.is_ssl_certproblem()
            || e.is_ssl_cipher()
            || e.is_ssl_cacert()
            || e.is_ssl_cacert_badfile()
            || e.is_ssl_engine_notfound()
            || e.is_ssl_engine_setfailed()
            || e.is_ssl_engine_initfailed()
            || e.is_send_error()
            || e.is_recv_error()
            || e.is_got_nothing()
        {
            return MetaError::Connection(e);
        }
        MetaError::Transfer(e)
    }

    /// Like [`MetaError::from_curl`], but a timeout before the TCP connection
    /// was established is a connection failure.
    pub fn from_transfer_failure(e: curl::Error, connected: bool) -> Self {
        if e.is_operation_timedout() && !connected {
            return MetaError::Connection(e);
        }
        Self::from_curl(e)
    }

    /// One-line text shown in the channel in place of a summary.
    pub fn user_message(&self) -> String {
        match self {
            MetaError::InvalidUrl(_) => "Invalid URL".to_string(),
            MetaError::Http { code, reason } => format!("{} {}", code, reason),
            MetaError::Connection(_) => "Error connecting to server".to_string(),
            MetaError::Timeout(_) => "Request timed out".to_string(),
            MetaError::Transfer(_) => "Error fetching resource".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message() {
        assert_eq!(MetaError::http(404).user_message(), "404 Not Found");
        assert_eq!(
            MetaError::http(503).user_message(),
            "503 Service Unavailable"
        );
    }

    #[test]
    fn invalid_url_message() {
        let e = MetaError::InvalidUrl("nope".into());
        assert_eq!(e.user_message(), "Invalid URL");
        assert_eq!(e.to_string(), "invalid URL: nope");
    }

    #[test]
    fn curl_connect_failure_is_connection() {
        // CURLE_COULDNT_CONNECT = 7
        let e = MetaError::from_curl(curl::Error::new(7));
        assert!(matches!(e, MetaError::Connection(_)));
        assert_eq!(e.user_message(), "Error connecting to server");
    }

    #[test]
    fn curl_tls_failures_are_connection() {
        // CURLE_SSL_CERTPROBLEM = 58, CURLE_SSL_CACERT_BADFILE = 77, CURLE_SSL_ENGINE_NOTFOUND = 53
        for code in [58, 77, 53, 35, 60] {
            let e = MetaError::from_curl(curl::Error::new(code));
            assert!(matches!(e, MetaError::Connection(_)), "code {code}");
        }
    }

    #[test]
    fn timeout_before_connect_is_connection() {
        let e = MetaError::from_transfer_failure(curl::Error::new(28), false);
        assert_eq!(e.user_message(), "Error connecting to server");
        let e = MetaError::from_transfer_failure(curl::Error::new(28), true);
        assert_eq!(e.user_message(), "Request timed out");
    }

    #[test]
    fn curl_timeout_is_timeout() {
        // CURLE_OPERATION_TIMEDOUT = 28
        let e = MetaError::from_curl(curl::Error::new(28));
        assert!(matches!(e, MetaError::Timeout(_)));
    }
}
