/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listening socket failed.
    #[error("bind to {addr} failed: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Querying the bound address failed.
    #[error("local address unavailable: {0}")]
    LocalAddr(#[source] std::io::Error),

    /// Reading from a connection failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Writing to a connection failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// A client sent a line longer than the configured limit.
    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),
}

impl TransportError {
    pub(crate) fn bind(addr: &str, source: std::io::Error) -> Self {
        Self::BindFailed {
            addr: addr.to_string(),
            source,
        }
    }
}
