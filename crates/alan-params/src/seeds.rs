//! Seed node tables and their conversion to address-book entries.
//!
//! The raw fixed-seed table is generated data: 16-byte IPv6 addresses
//! (IPv4 entries mapped) plus a port. [`convert_seed_table`] turns it into
//! address entries stamped with a random last-seen time of one to two
//! weeks ago, so addresses learned from live gossip immediately outrank
//! the hardcoded fallbacks.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use chrono::Utc;
use rand::Rng;

/// One week in seconds.
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

/// A raw fixed-seed table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSpec {
    /// IPv6 address bytes; IPv4 seeds are stored IPv4-mapped.
    pub addr: [u8; 16],
    /// P2P port.
    pub port: u16,
}

/// A DNS seed entry: an operator name and the hostname to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

/// An address-book entry produced from a raw seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedAddress {
    /// Socket address; IPv4-mapped entries canonicalize to V4.
    pub addr: SocketAddr,
    /// Last-seen time, Unix seconds.
    pub time: i64,
}

const fn ipv4_mapped(a: u8, b: u8, c: u8, d: u8, port: u16) -> SeedSpec {
    SeedSpec {
        addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d],
        port,
    }
}

/// Mainnet fixed seeds.
pub const MAIN_SEED_TABLE: &[SeedSpec] = &[
    ipv4_mapped(47, 52, 45, 101, 19683),
    ipv4_mapped(47, 91, 211, 14, 19683),
    ipv4_mapped(120, 55, 2, 206, 19683),
    ipv4_mapped(139, 196, 70, 122, 19683),
    ipv4_mapped(104, 172, 24, 79, 19683),
    ipv4_mapped(45, 32, 188, 230, 19683),
];

/// Convert a raw seed table into address-book entries.
///
/// Each entry's last-seen time falls in `[now - 2 weeks, now - 1 week]`,
/// evaluated at call time.
pub fn convert_seed_table(table: &[SeedSpec]) -> Vec<SeedAddress> {
    let now = Utc::now().timestamp();
    let mut rng = rand::thread_rng();
    table
        .iter()
        .map(|seed| {
            let ip = Ipv6Addr::from(seed.addr);
            let addr = match ip.to_ipv4_mapped() {
                Some(v4) => SocketAddr::new(IpAddr::V4(v4), seed.port),
                None => SocketAddr::new(IpAddr::V6(ip), seed.port),
            };
            let time = now - ONE_WEEK - rng.gen_range(0..ONE_WEEK);
            SeedAddress { addr, time }
        })
        .collect()
}
