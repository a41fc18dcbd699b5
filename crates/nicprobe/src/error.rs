//! Error types for ethtool ioctl operations.

use std::io;

/// Result type for ethtool operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying a device.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error outside of command execution (socket creation).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The driver does not implement the command, or refused the
    /// link-settings handshake.
    #[error("operation not supported: {0}")]
    NotSupported(String),

    /// The interface does not exist.
    #[error("no such device: {0}")]
    NoSuchDevice(String),

    /// The kernel response does not fit the structure it should contain.
    #[error("malformed response: expected {expected} bytes, got {actual}")]
    MalformedResponse {
        /// Bytes needed to decode the structure.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A string-set slot did not hold a NUL-terminated ASCII name.
    #[error("invalid string in string set at index {index}")]
    InvalidString {
        /// Position of the offending slot.
        index: usize,
    },

    /// The interface name cannot be bound.
    #[error("invalid interface name: {0}")]
    InvalidName(String),

    /// Any other OS error reported by the ioctl, passed through unchanged.
    #[error("{command} on {ifname}: {source}")]
    Transport {
        /// Command that failed.
        command: &'static str,
        /// Interface the command ran against.
        ifname: String,
        /// The OS error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Map an OS error from a `SIOCETHTOOL` call.
    ///
    /// `EOPNOTSUPP` and `ENODEV` become typed variants carrying the
    /// interface name; everything else is kept as-is.
    pub fn from_os_error(source: io::Error, command: &'static str, ifname: &str) -> Self {
        match source.raw_os_error() {
            Some(libc::EOPNOTSUPP) => Self::NotSupported(ifname.to_string()),
            Some(libc::ENODEV) => Self::NoSuchDevice(ifname.to_string()),
            _ => Self::Transport {
                command,
                ifname: ifname.to_string(),
                source,
            },
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(expected: usize, actual: usize) -> Self {
        Self::MalformedResponse { expected, actual }
    }

    /// Check if the device or driver does not support the operation.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported(_))
    }

    /// Check if this is a "not found" error (ENODEV, ENOENT).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NoSuchDevice(_) => true,
            _ => matches!(self.errno(), Some(libc::ENOENT | libc::ENODEV)),
        }
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.errno(), Some(libc::EPERM | libc::EACCES))
    }

    /// Check if the kernel reported `EADDRNOTAVAIL`.
    ///
    /// Address-retrieval commands treat this as "no address assigned"
    /// rather than a failure.
    pub fn is_address_not_available(&self) -> bool {
        self.errno() == Some(libc::EADDRNOTAVAIL)
    }

    /// Get the errno value if this error carries an OS error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Io(e) | Self::Transport { source: e, .. } => e.raw_os_error(),
            Self::NotSupported(_) => Some(libc::EOPNOTSUPP),
            Self::NoSuchDevice(_) => Some(libc::ENODEV),
            _ => None,
        }
    }
}
