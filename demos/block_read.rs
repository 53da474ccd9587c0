//! Example: bulk-reading PLC memory
//!
//! Run with: cargo run --example block_read
//!
//! Reads a large block of 32-bit values in one call; the protocol-legal
//! chunking happens inside the client.

use omron_fins_bulk::utils::format_hex32;
use omron_fins_bulk::{Client, ClientConfig};
use std::net::Ipv4Addr;

fn main() -> omron_fins_bulk::Result<()> {
    // Factory default PLC address, local node 1.
    let config = ClientConfig::new(Ipv4Addr::new(192, 168, 1, 250), 1, 0);
    let mut client = Client::new(config);
    client.connect()?;

    // 1000 32-bit values starting at DM0 (three requests on the wire).
    let mut totals = vec![0u32; 1000];
    client.read_u32_block("DM0", &mut totals, 1000)?;
    println!("DM0, first values: {} {}", format_hex32(totals[0]), format_hex32(totals[1]));

    // Signed values share the same decoding.
    let mut deltas = vec![0i32; 10];
    client.read_i32_block("DM2000", &mut deltas, 10)?;
    println!("DM2000 deltas: {:?}", deltas);

    // Counter present values live past the 0x8000 wire offset.
    let mut counters = vec![0u16; 8];
    client.read_u16_block("C0", &mut counters, 8)?;
    println!("C0-C7: {:?}", counters);

    Ok(())
}
