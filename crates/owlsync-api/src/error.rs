use thiserror::Error;

/// Top-level error type for the vendor session boundary.
///
/// Covers the three failure kinds the Owlet cloud client reports:
/// rejected credentials, a structured device/API error, and
/// transport-level failures. `owlsync-core` maps these into the two
/// signals the host scheduler understands.
#[derive(Debug, Error)]
pub enum Error {
    /// Stored credentials were rejected by the remote service.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Structured error reported by the device API.
    #[error("Device API error: {message}")]
    Device { message: String },

    /// Transport failure (connection refused, DNS failure, timeout).
    #[error("Connection error: {message}")]
    Connection { message: String },
}

impl Error {
    /// Returns `true` if this error means the account must
    /// re-authenticate before any further refresh can succeed.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying on the
    /// next scheduled tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Device { .. } | Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_classification_is_exhaustive_and_disjoint() {
        let auth = Error::Authentication {
            message: "token rejected".into(),
        };
        let device = Error::Device {
            message: "unexpected payload".into(),
        };
        let connection = Error::Connection {
            message: "connection refused".into(),
        };

        assert!(auth.is_auth());
        assert!(!auth.is_transient());

        assert!(!device.is_auth());
        assert!(device.is_transient());

        assert!(!connection.is_auth());
        assert!(connection.is_transient());
    }

    #[test]
    fn test_display_carries_original_message() {
        let err = Error::Connection {
            message: "socket closed".into(),
        };
        assert_eq!(err.to_string(), "Connection error: socket closed");
    }
}
