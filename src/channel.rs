use std::io;
use std::mem::size_of;
use std::os::unix::io::{AsRawFd, RawFd};

use byte_conv::As;
use libc::{c_int, c_short, c_void, sockaddr};
use log::{debug, warn};
use nix::net::if_::if_nametoindex;

use crate::constants::*;
use crate::errors::ChannelError;
use crate::frame::CanFrame;

/// Mirrors the kernel `sockaddr_can` up to the interface index, which is all
/// a raw CAN bind inspects.
#[derive(Debug)]
#[repr(C)]
struct CanAddr {
    _af_can: c_short,
    if_index: c_int,
    rx_id: u32,
    tx_id: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ChannelState {
    /// Fresh channel, never bound.
    Unbound,
    /// Bound to an interface, fd is live.
    Bound,
    /// Torn down. The fd has been released and the channel is inert.
    Shut,
}

/// A channel speaking raw CAN on one network interface.
///
/// The channel owns a single socket descriptor. It is created unbound (or
/// bound immediately via [`CanChannel::open`]), carries exactly one
/// `Unbound -> Bound -> Shut` lifecycle, and releases the descriptor exactly
/// once, on [`close`](CanChannel::close) or on drop. A shut channel stays
/// inert; create a fresh one to reopen.
///
/// `send` and `receive` block the calling thread until the kernel finishes
/// the I/O. There is no internal locking: a channel expects one logical
/// owner, and sharing one across threads needs external mutual exclusion
/// (or one channel per direction).
#[derive(Debug)]
pub struct CanChannel {
    fd: c_int,
    state: ChannelState,
}

impl CanChannel {
    /// A fresh, unbound channel. `send` and `receive` fail with
    /// `NotInitialized` until `bind` succeeds.
    pub fn new() -> CanChannel {
        CanChannel {
            fd: -1,
            state: ChannelState::Unbound,
        }
    }

    /// Open a named CAN device, e.g. "can0" or "vcan0".
    pub fn open(ifname: &str) -> Result<CanChannel, ChannelError> {
        let mut channel = CanChannel::new();
        channel.bind(ifname)?;
        Ok(channel)
    }

    /// Bind the channel to a named CAN interface.
    ///
    /// Binding an already-bound channel is a harmless no-op: the call
    /// returns `Ok(())` without touching the existing socket. This is a
    /// guard against double initialization, not a re-open; a shut channel
    /// fails with `NotInitialized`.
    pub fn bind(&mut self, ifname: &str) -> Result<(), ChannelError> {
        match self.state {
            ChannelState::Bound => {
                debug!("channel already bound, ignoring bind to {}", ifname);
                return Ok(());
            }
            ChannelState::Shut => return Err(ChannelError::NotInitialized),
            ChannelState::Unbound => (),
        }

        // The kernel copies the name into an IF_NAMESIZE buffer; reject
        // anything that cannot fit, including the trailing NUL.
        if ifname.is_empty() || ifname.len() >= libc::IF_NAMESIZE {
            return Err(ChannelError::InvalidName(ifname.to_string()));
        }

        let fd = unsafe { libc::socket(PF_CAN, libc::SOCK_RAW, CAN_RAW) };
        if fd == -1 {
            return Err(ChannelError::SocketCreate(io::Error::last_os_error()));
        }

        // Lookup is part of the bind step; it must not leak the fresh fd.
        let if_index = match if_nametoindex(ifname) {
            Ok(idx) => idx,
            Err(e) => {
                unsafe { libc::close(fd) };
                return Err(ChannelError::Bind(io::Error::from_raw_os_error(e as i32)));
            }
        };

        let addr = CanAddr {
            _af_can: AF_CAN as c_short,
            if_index: if_index as c_int,
            rx_id: 0,
            tx_id: 0,
        };

        let bind_rv = unsafe {
            let sockaddr_ptr = &addr as *const CanAddr;
            libc::bind(
                fd,
                sockaddr_ptr as *const sockaddr,
                size_of::<CanAddr>() as u32,
            )
        };

        if bind_rv == -1 {
            let e = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(ChannelError::Bind(e));
        }

        debug!("bound {} (if_index {}) on fd {}", ifname, if_index, fd);
        self.fd = fd;
        self.state = ChannelState::Bound;
        Ok(())
    }

    /// Whether the channel is bound and usable.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == ChannelState::Bound
    }

    /// Send one classic CAN frame.
    ///
    /// The identifier is transmitted in extended frame format; `data` may
    /// carry up to 8 bytes. Blocks until the kernel accepts the whole frame
    /// structure. A short write is an error, not a retry condition.
    pub fn send(&self, id: u32, data: &[u8]) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::NotInitialized);
        }

        let frame = CanFrame::new(id, data)?;
        let buf = frame.as_bytes();

        let write_rv = unsafe { libc::write(self.fd, buf.as_ptr() as *const c_void, buf.len()) };

        if write_rv < 0 {
            return Err(ChannelError::Write(io::Error::last_os_error()));
        }
        if write_rv as usize != buf.len() {
            return Err(ChannelError::Write(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", write_rv, buf.len()),
            )));
        }

        Ok(())
    }

    /// Receive one frame, blocking until one arrives.
    ///
    /// No filtering is applied: every frame seen on the bound interface is
    /// eligible. A read shorter than one frame structure surfaces as
    /// `IncompleteFrame`.
    pub fn receive(&self) -> Result<CanFrame, ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::NotInitialized);
        }

        let mut buf = [0u8; CAN_MTU];
        let read_rv = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut c_void, buf.len()) };

        if read_rv < 0 {
            return Err(ChannelError::Read(io::Error::last_os_error()));
        }

        CanFrame::from_wire(&buf[..read_rv as usize])
    }

    /// Tear the channel down, releasing the descriptor if one was ever
    /// acquired. Safe to call more than once; afterwards every operation
    /// fails with `NotInitialized`.
    pub fn close(&mut self) -> io::Result<()> {
        let mut result = Ok(());
        if self.state == ChannelState::Bound {
            if unsafe { libc::close(self.fd) } == -1 {
                result = Err(io::Error::last_os_error());
            }
            self.fd = -1;
        }
        self.state = ChannelState::Shut;
        result
    }
}

impl Default for CanChannel {
    fn default() -> CanChannel {
        CanChannel::new()
    }
}

impl AsRawFd for CanChannel {
    /// The underlying descriptor, `-1` unless the channel is open.
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for CanChannel {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to close CAN socket: {}", e);
        }
    }
}
