use simplecan::CanChannel;

use std::env;

fn main() {
    env_logger::init();

    let iface = env::args().nth(1).unwrap_or_else(|| "vcan0".into());
    let bus = CanChannel::open(&iface).unwrap();

    loop {
        match bus.receive() {
            Ok(frame) => log::debug!("{:#X}", frame),
            Err(e) => {
                log::debug!("Error: {}", e);
                break;
            }
        }
    }
}
