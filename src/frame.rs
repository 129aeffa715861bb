use std::{fmt, ptr};

use itertools::Itertools;

use crate::constants::*;
use crate::errors::ChannelError;

/// CanFrame
///
/// Uses the same memory layout as the underlying kernel struct for
/// compatibility with the raw socket read/write calls.
///
/// This crate speaks extended frame format only: every constructed frame has
/// the EFF bit set, and `id()` always masks down to the 29 bit extended
/// addressing range. Standard-frame traffic arriving on the bus is returned
/// with its 11 bit identifier value but is not distinguished further.
#[derive(Debug, Copy, Clone)]
#[repr(C)]
pub struct CanFrame {
    /// 32 bit CAN_ID + EFF/RTR/ERR flags
    _id: u32,
    /// data length. Bytes beyond are not valid
    _data_len: u8,
    /// padding
    _pad: u8,
    /// reserved
    _res0: u8,
    /// reserved
    _res1: u8,
    /// buffer for data
    _data: [u8; CAN_MAX_DLEN],
}

impl CanFrame {
    /// Construct an outgoing frame.
    ///
    /// The identifier is masked to the 29 bit extended range before the EFF
    /// flag is forced on, so caller-supplied flag bits can never reach the
    /// id word. Payloads over 8 bytes are rejected with
    /// `ChannelError::PayloadTooLarge`.
    pub fn new(id: u32, data: &[u8]) -> Result<CanFrame, ChannelError> {
        if data.len() > CAN_MAX_DLEN {
            return Err(ChannelError::PayloadTooLarge(data.len()));
        }

        let mut full_data = [0u8; CAN_MAX_DLEN];
        full_data[..data.len()].copy_from_slice(data);

        Ok(CanFrame {
            _id: (id & EFF_MASK) | EFF_FLAG,
            _data_len: data.len() as u8,
            _pad: 0,
            _res0: 0,
            _res1: 0,
            _data: full_data,
        })
    }

    /// Decode one frame from bytes read off a raw CAN socket.
    ///
    /// A slice shorter than one full frame structure is a truncated read and
    /// is surfaced as `ChannelError::IncompleteFrame` rather than being
    /// padded into a bogus frame.
    pub(crate) fn from_wire(buf: &[u8]) -> Result<CanFrame, ChannelError> {
        if buf.len() < CAN_MTU {
            return Err(ChannelError::IncompleteFrame {
                read: buf.len(),
                expected: CAN_MTU,
            });
        }

        let mut frame = CanFrame::default();
        unsafe {
            ptr::copy_nonoverlapping(buf.as_ptr(), &mut frame as *mut CanFrame as *mut u8, CAN_MTU);
        }
        Ok(frame)
    }

    /// Return the actual CAN ID (without EFF/RTR/ERR flags)
    #[inline]
    pub fn id(&self) -> u32 {
        self._id & EFF_MASK
    }

    /// Data length code: the number of valid payload bytes
    #[inline]
    pub fn dlc(&self) -> u8 {
        self._data_len
    }

    /// Check if frame uses 29 bit extended frame format
    #[inline]
    pub fn is_extended(&self) -> bool {
        self._id & EFF_FLAG != 0
    }

    /// Check if frame is an error message
    #[inline]
    pub fn is_error(&self) -> bool {
        self._id & ERR_FLAG != 0
    }

    /// Check if frame is a remote transmission request
    #[inline]
    pub fn is_rtr(&self) -> bool {
        self._id & RTR_FLAG != 0
    }

    /// A slice into the actual data. Slice will always be <= 8 bytes in length
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self._data[..(self._data_len as usize).min(CAN_MAX_DLEN)]
    }
}

impl Default for CanFrame {
    fn default() -> CanFrame {
        CanFrame {
            _id: 0,
            _data_len: 0,
            _pad: 0,
            _res0: 0,
            _res1: 0,
            _data: [0; CAN_MAX_DLEN],
        }
    }
}

impl fmt::UpperHex for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{:X}#", self.id())?;

        let mut parts = self.data().iter().map(|v| format!("{:02X}", v));

        let sep = if f.alternate() { " " } else { "" };
        write!(f, "{}", parts.join(sep))
    }
}
