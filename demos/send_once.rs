use simplecan::CanChannel;

use std::env;

fn main() {
    env_logger::init();

    let iface = env::args().nth(1).unwrap_or_else(|| "vcan0".into());
    let bus = CanChannel::open(&iface).unwrap();

    let data: [u8; 4] = [222, 173, 190, 239];
    let id: u32 = 123;
    match bus.send(id, &data) {
        Ok(()) => log::debug!("Frame Send Success"),
        Err(e) => log::debug!("Frame Send Error {}", e),
    }
}
