//! Minimal SocketCAN channel.
//!
//! The Linux kernel exposes CAN-devices through a network-like API
//! (see https://www.kernel.org/doc/Documentation/networking/can.txt). This
//! crate wraps exactly one slice of that API: open a raw CAN socket on a
//! named interface, write one classic frame, read one classic frame. It is
//! deliberately a thin, blocking, synchronous layer with no transport
//! protocol on top — no multi-frame reassembly, no filtering, no retries,
//! no timeouts.
//!
//! # An introduction to CAN
//!
//! The CAN bus was originally designed to let microcontrollers inside a
//! vehicle communicate over a single shared bus. Messages called *frames*
//! are multicast to all devices on the bus; every frame consists of an ID
//! and a payload of up to 8 bytes, and lower IDs win arbitration. The Linux
//! socketcan subsystem makes such a bus available as a regular networking
//! device: an interface can be opened by multiple clients at once and every
//! client sees every frame.
//!
//! # Addressing
//!
//! This crate speaks the 29 bit extended frame format exclusively. Every
//! transmitted frame carries the EFF flag, and received identifiers are
//! masked down to the extended addressing range before they reach the
//! caller. Standard-frame (11 bit) traffic on the bus is returned with its
//! numeric identifier but is not distinguished as such.
//!
//! # Lifecycle
//!
//! A [`CanChannel`] is either freshly created, bound to an interface, or
//! shut. Binding twice is a harmless no-op, shutting releases the socket
//! exactly once (explicitly or on drop), and a shut channel stays inert —
//! reopening means creating a new channel.
//!
//! # RawFd
//!
//! Raw access to the underlying file descriptor is available through the
//! `AsRawFd` implementation.

pub mod channel;
pub mod constants;
pub mod errors;
pub mod frame;

#[cfg(test)]
mod tests;

pub use crate::channel::CanChannel;
pub use crate::errors::ChannelError;
pub use crate::frame::CanFrame;
