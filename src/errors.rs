use std::{error, fmt, io};

/// Errors reported by a `CanChannel`.
///
/// Every variant carries the detail needed to diagnose the failure without
/// scraping console output; OS-level causes are reachable through
/// `Error::source()`.
#[derive(Debug)]
pub enum ChannelError {
    /// A raw socket of the CAN protocol family could not be acquired.
    SocketCreate(io::Error),

    /// Interface lookup or address bind failed.
    Bind(io::Error),

    /// The interface name is empty or does not fit the platform's
    /// interface-name buffer.
    InvalidName(String),

    /// The channel is not open.
    NotInitialized,

    /// The payload exceeds the 8 bytes a classic CAN frame can carry.
    /// Contains the offending length.
    PayloadTooLarge(usize),

    /// The frame could not be written to the socket, or the write
    /// transferred fewer bytes than one full frame.
    Write(io::Error),

    /// The read returned fewer bytes than one full frame structure.
    IncompleteFrame {
        /// bytes actually read
        read: usize,
        /// bytes in a full frame structure
        expected: usize,
    },

    /// The read from the socket failed.
    Read(io::Error),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChannelError::SocketCreate(ref e) => write!(f, "Socket creation failed: {}", e),
            ChannelError::Bind(ref e) => write!(f, "Socket bind failed: {}", e),
            ChannelError::InvalidName(ref name) => {
                write!(f, "Invalid interface name {:?}", name)
            }
            ChannelError::NotInitialized => write!(f, "Interface not initialized"),
            ChannelError::PayloadTooLarge(len) => {
                write!(f, "Data length code too large: {} bytes", len)
            }
            ChannelError::Write(ref e) => write!(f, "Write to socket failed: {}", e),
            ChannelError::IncompleteFrame { read, expected } => {
                write!(f, "Incomplete frame received: {} of {} bytes", read, expected)
            }
            ChannelError::Read(ref e) => write!(f, "Read from socket failed: {}", e),
        }
    }
}

impl error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ChannelError::SocketCreate(ref e)
            | ChannelError::Bind(ref e)
            | ChannelError::Write(ref e)
            | ChannelError::Read(ref e) => Some(e),
            _ => None,
        }
    }
}
