//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
use std::time::Instant;

use huffman::tools::cli::{demo_opts_init, report, Input};
use huffman::{bits_to_bytes, set_allocator, tabulate, CodecHandle, TABLE_SIZE};

use log::{info, warn};
use simplelog::{Config, TermLogger, TerminalMode};
use tikv_jemallocator::Jemalloc;

static JEMALLOC: Jemalloc = Jemalloc;

fn main() -> huffman::Result<()> {
    let opts = demo_opts_init();

    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    )
    .unwrap_or_else(|e| eprintln!("Logger already set: {}", e));
    report(&opts);

    if opts.jemalloc {
        set_allocator(Some(&JEMALLOC));
    }

    let data = match &opts.input {
        Input::Text(text) => text.as_bytes().to_vec(),
        Input::File(path) => std::fs::read(path)?,
    };

    println!("test data length: {}", data.len());
    println!("test data: {}", hex(&data));

    let mut table = [0_u16; TABLE_SIZE];
    if !tabulate(&mut table, &data) {
        warn!("Input overflows the frequency table, using a flat table");
    }

    let timer = Instant::now();
    let codec = CodecHandle::create(Some(&table))?;
    info!(
        "Built codec in {:?}: code lengths {}..={}",
        timer.elapsed(),
        codec.min_bits(),
        codec.max_bits()
    );

    if opts.show_codes {
        for (symbol, code) in codec.codes().iter().enumerate() {
            if data.contains(&(symbol as u8)) {
                println!("{:02x}: {:>2} {}", symbol, code.bit_length, code);
            }
        }
    }

    let timer = Instant::now();
    let mut encoded = vec![0_u8; codec.encode_upper_bound(data.len())];
    let bits = codec.encode(&mut encoded, &data)?;
    info!("Encoded {} bits in {:?}", bits, timer.elapsed());

    println!("huffman encode length: {}", bits_to_bytes(bits));
    println!("huffman encode data: {}", hex(&encoded[..bits_to_bytes(bits)]));

    let timer = Instant::now();
    let mut decoded = vec![0_u8; codec.decode_upper_bound(bits)];
    let len = codec.decode(&mut decoded, &encoded, bits)?;
    info!("Decoded {} bytes in {:?}", len, timer.elapsed());

    println!("huffman decode length: {}", len);
    println!("huffman decode data: {}", hex(&decoded[..len]));

    if decoded[..len] != data[..] {
        warn!("Decoded data does not match the input!");
    }
    codec.destroy();

    info!("Done.\n");
    Ok(())
}

/// Space separated hex dump.
fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
