// constants stolen from C headers (linux/can.h)

/// CAN address/protocol family, not exported by libc on every target
pub const AF_CAN: libc::c_int = 29;
pub const PF_CAN: libc::c_int = 29;

// Protocol of the PF_CAN family: raw sockets
pub const CAN_RAW: libc::c_int = 1;

/// Special address description flags for the CAN_ID
///
/// EFF/SFF is set in the MSB
pub const EFF_FLAG: u32 = 0x80000000;
/// remote transmission request
pub const RTR_FLAG: u32 = 0x40000000;
/// error message frame
pub const ERR_FLAG: u32 = 0x20000000;

/// valid bits in CAN ID for frame formats
/// standard frame format (SFF)
pub const SFF_MASK: u32 = 0x000007ff;
/// extended frame format (EFF)
pub const EFF_MASK: u32 = 0x1fffffff;

/// maximum payload of a classic (non-FD) CAN frame
pub const CAN_MAX_DLEN: usize = 8;

/// on-wire size of a classic CAN frame structure
pub const CAN_MTU: usize = 16;
