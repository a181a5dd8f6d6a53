/// Category of a store error. Lets the service decide how to report
/// a failed fetch (bad config at startup vs. transient backend trouble).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration or missing table; fails startup.
    Config,
    /// Network or gateway error. Transient.
    Io,
    /// The backend answered with something we could not parse.
    Format,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Io => f.write_str("io"),
            ErrorKind::Format => f.write_str("format"),
        }
    }
}

/// Error returned by every `RowStore` method.
///
/// Only fetch-level failures end up here. Cell contents never produce an
/// error: undecodable cells degrade to zero in the decoder.
#[derive(Clone)]
pub struct StoreError {
    kind: ErrorKind,
    message: String,
}

impl StoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Io, message: msg.into() }
    }

    pub fn format_err(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Format, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with context, keeping the kind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self { Self { kind: ErrorKind::Format, message: e.to_string() } }
}

impl From<std::string::FromUtf8Error> for StoreError {
    fn from(e: std::string::FromUtf8Error) -> Self { Self { kind: ErrorKind::Format, message: e.to_string() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind() {
        let err = StoreError::io("connection refused").with_context("GET CA#2020#03");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "GET CA#2020#03: connection refused");
        assert_eq!(format!("{err:?}"), "[io] GET CA#2020#03: connection refused");
    }

    #[test]
    fn json_errors_are_format_errors() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(StoreError::from(e).kind(), ErrorKind::Format);
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let e = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        assert_eq!(StoreError::from(e).kind(), ErrorKind::Format);
    }
}
