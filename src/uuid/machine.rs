//! Secure munged machine address
//!
//! The real hardware address (or a random multicast one when none is
//! usable) XOR-ed with random bytes. It still differs between machines with
//! overwhelming probability but cannot be turned back into the MAC.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use rand::RngCore;
use tracing::debug;

/// Length of a MAC-48 address
pub const ADDRESS_LEN: usize = 6;

const SYS_CLASS_NET: &str = "/sys/class/net";

static MUNGED_ADDRESS: Lazy<[u8; ADDRESS_LEN]> = Lazy::new(|| {
    let mut rng = rand::rng();
    let mut address = match hardware_address() {
        Some(address) => address,
        None => {
            debug!("no usable hardware address, using a random multicast address");
            dummy_multicast_address(&mut rng)
        }
    };

    let mut noise = [0u8; ADDRESS_LEN];
    rng.fill_bytes(&mut noise);
    for (byte, mask) in address.iter_mut().zip(noise) {
        *byte ^= mask;
    }
    address
});

/// The process-wide munged address, computed on first use
pub fn munged_address() -> [u8; ADDRESS_LEN] {
    *MUNGED_ADDRESS
}

/// Random address with the multicast bit set, so it can never collide with
/// a real unicast MAC
pub(crate) fn dummy_multicast_address<R: RngCore>(rng: &mut R) -> [u8; ADDRESS_LEN] {
    let mut address = [0u8; ADDRESS_LEN];
    rng.fill_bytes(&mut address);
    address[0] |= 0x01;
    address
}

/// First valid address of a non-loopback interface, in name order
fn hardware_address() -> Option<[u8; ADDRESS_LEN]> {
    let mut interfaces: Vec<_> = fs::read_dir(SYS_CLASS_NET)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect();
    interfaces.sort();

    interfaces
        .iter()
        .filter(|path| path.file_name().is_some_and(|name| name != "lo"))
        .find_map(|path| read_address(path))
}

fn read_address(interface: &Path) -> Option<[u8; ADDRESS_LEN]> {
    let text = fs::read_to_string(interface.join("address")).ok()?;
    parse_address(text.trim()).filter(is_valid_address)
}

/// Parse a colon-separated MAC-48 address such as `02:42:ac:11:00:02`
pub(crate) fn parse_address(text: &str) -> Option<[u8; ADDRESS_LEN]> {
    let mut address = [0u8; ADDRESS_LEN];
    let mut parts = text.split(':');
    for byte in address.iter_mut() {
        *byte = u8::from_str_radix(parts.next()?, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(address)
}

/// An address is usable unless it is all zeros
pub(crate) fn is_valid_address(address: &[u8; ADDRESS_LEN]) -> bool {
    address.iter().any(|&b| b != 0)
}
