use crate::constants::*;
use crate::errors::ChannelError;
use crate::frame::CanFrame;
use crate::CanChannel;

use byte_conv::As;

#[test]
fn frame_forces_eff_and_strips_caller_flags() {
    // all 32 bits set: the three flag bits must not survive into the id
    let frame = CanFrame::new(0xFFFF_FFFF, &[]).unwrap();
    assert_eq!(frame.id(), EFF_MASK);
    assert!(frame.is_extended());
    assert!(!frame.is_rtr());
    assert!(!frame.is_error());
}

#[test]
fn frame_standard_range_id_is_sent_extended() {
    let frame = CanFrame::new(0x42, &[1, 2]).unwrap();
    assert_eq!(frame.id(), 0x42);
    assert!(frame.is_extended());
}

#[test]
fn frame_rejects_oversize_payload() {
    match CanFrame::new(0x100, &[0u8; 9]) {
        Err(ChannelError::PayloadTooLarge(9)) => (),
        other => panic!("expected PayloadTooLarge(9), got {:?}", other),
    }
}

#[test]
fn frame_payload_copied_and_tail_zeroed() {
    let payload = hex::decode("DEADBEEF").unwrap();
    let frame = CanFrame::new(0x1337, &payload).unwrap();

    assert_eq!(frame.dlc(), 4);
    assert_eq!(frame.data(), &payload[..]);

    // kernel layout: id word, dlc, 3 reserved bytes, then the 8 byte buffer
    let raw = frame.as_bytes();
    assert_eq!(raw.len(), CAN_MTU);
    assert!(raw[12..].iter().all(|&b| b == 0));
}

#[test]
fn frame_survives_wire_encoding() {
    let frame = CanFrame::new(0x18FF50E5, &[0xCA, 0xFE]).unwrap();
    let decoded = CanFrame::from_wire(frame.as_bytes()).unwrap();

    assert_eq!(decoded.id(), 0x18FF50E5);
    assert_eq!(decoded.data(), &[0xCA, 0xFE]);
    assert!(decoded.is_extended());
}

#[test]
fn short_reads_surface_as_incomplete_frame() {
    match CanFrame::from_wire(&[0u8; 10]) {
        Err(ChannelError::IncompleteFrame { read: 10, expected }) => {
            assert_eq!(expected, CAN_MTU)
        }
        other => panic!("expected IncompleteFrame, got {:?}", other),
    }

    assert!(matches!(
        CanFrame::from_wire(&[]),
        Err(ChannelError::IncompleteFrame { read: 0, .. })
    ));
}

#[test]
fn frame_formats_like_candump() {
    let frame = CanFrame::new(0x1337, &hex::decode("DEADBEEF").unwrap()).unwrap();
    assert_eq!(format!("{:X}", frame), "1337#DEADBEEF");
    assert_eq!(format!("{:#X}", frame), "1337#DE AD BE EF");
}

#[test]
fn unbound_channel_refuses_io() {
    let channel = CanChannel::new();
    assert!(!channel.is_open());
    assert!(matches!(
        channel.send(0x100, &[0xAA]),
        Err(ChannelError::NotInitialized)
    ));
    assert!(matches!(channel.receive(), Err(ChannelError::NotInitialized)));
}

#[test]
fn default_channel_is_unbound() {
    assert!(!CanChannel::default().is_open());
}

#[test]
fn empty_interface_name_is_rejected() {
    let mut channel = CanChannel::new();
    match channel.bind("") {
        Err(ChannelError::InvalidName(name)) => assert_eq!(name, ""),
        other => panic!("expected InvalidName, got {:?}", other),
    }
    assert!(!channel.is_open());
}

#[test]
fn overlong_interface_name_is_rejected() {
    // IF_NAMESIZE is 16 including the NUL, so 16 characters cannot fit
    let mut channel = CanChannel::new();
    assert!(matches!(
        channel.bind("anexcessivename0"),
        Err(ChannelError::InvalidName(_))
    ));
    assert!(!channel.is_open());
}

#[test]
fn missing_interface_fails_bind() {
    // SocketCreate is tolerated for hosts without CAN support compiled in
    match CanChannel::open("canmissing0") {
        Err(ChannelError::Bind(_)) | Err(ChannelError::SocketCreate(_)) => (),
        other => panic!("expected Bind or SocketCreate, got {:?}", other),
    }

    let mut channel = CanChannel::new();
    let _ = channel.bind("canmissing0");
    assert!(!channel.is_open());
}

#[test]
fn shut_channel_stays_inert() {
    let mut channel = CanChannel::new();
    channel.close().unwrap();

    assert!(!channel.is_open());
    assert!(matches!(
        channel.send(0x1, &[]),
        Err(ChannelError::NotInitialized)
    ));
    assert!(matches!(channel.receive(), Err(ChannelError::NotInitialized)));
    assert!(matches!(
        channel.bind("vcan0"),
        Err(ChannelError::NotInitialized)
    ));

    // releasing twice is harmless
    channel.close().unwrap();
}

#[test]
fn errors_expose_their_os_cause() {
    use std::error::Error;

    let err = match CanChannel::open("canmissing0") {
        Err(e) => e,
        Ok(_) => return, // a real canmissing0 exists on this host, nothing to assert
    };
    assert!(err.source().is_some());
    assert!(!err.to_string().is_empty());
}

// Tests against a live virtual interface. Set one up with:
//
//   ip link add dev vcan0 type vcan
//   ip link set up vcan0
//
// then run `cargo test --features vcan_tests`.
#[cfg(feature = "vcan_tests")]
mod vcan {
    use super::*;
    use std::os::unix::io::AsRawFd;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn vcan_round_trip() {
        init_logging();
        let rx = CanChannel::open("vcan0").unwrap();
        let tx = CanChannel::open("vcan0").unwrap();

        let cases: &[(u32, &[u8])] = &[
            (0x0, &[]),
            (0x42, &[0xDE, 0xAD, 0xBE]),
            (0x18FF50E5, &[1, 2, 3, 4, 5, 6, 7, 8]),
            (EFF_MASK, &[0xFF]),
        ];

        for &(id, payload) in cases {
            tx.send(id, payload).unwrap();
            let frame = rx.receive().unwrap();
            assert_eq!(frame.id(), id);
            assert_eq!(frame.data(), payload);
            assert!(frame.is_extended());
        }
    }

    #[test]
    fn vcan_double_bind_is_a_noop() {
        init_logging();
        let mut channel = CanChannel::open("vcan0").unwrap();
        let fd = channel.as_raw_fd();

        channel.bind("vcan0").unwrap();

        assert!(channel.is_open());
        assert_eq!(channel.as_raw_fd(), fd);
    }

    #[test]
    fn vcan_oversize_send_fails_before_the_socket() {
        init_logging();
        let channel = CanChannel::open("vcan0").unwrap();
        assert!(matches!(
            channel.send(0x100, &[0u8; 9]),
            Err(ChannelError::PayloadTooLarge(9))
        ));
    }

    #[test]
    fn vcan_close_releases_the_socket() {
        init_logging();
        let mut channel = CanChannel::open("vcan0").unwrap();
        assert!(channel.is_open());

        channel.close().unwrap();

        assert!(!channel.is_open());
        assert!(matches!(channel.receive(), Err(ChannelError::NotInitialized)));
    }
}
