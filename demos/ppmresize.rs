// SPDX-License-Identifier: MIT
//! Demo: resample a binary PPM (P6) image to a new size, streaming one row
//! at a time.
//!
//! Run: cargo run --example ppmresize -- input.ppm output.ppm --width 640 --height 480

use anyhow::{bail, Context, Result};
use catrom_resample::{Demand, Engine};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
}

struct PpmHeader {
    width: u32,
    height: u32,
    maxval: u32,
}

fn read_ppm_header(r: &mut impl Read) -> Result<PpmHeader> {
    let mut magic = [0u8; 2];
    r.read_exact(&mut magic)?;
    if &magic != b"P6" {
        bail!("only binary PPM (P6) is supported");
    }
    let mut fields = Vec::with_capacity(3);
    let mut token = String::new();
    let mut byte = [0u8; 1];
    while fields.len() < 3 {
        r.read_exact(&mut byte)?;
        let c = byte[0] as char;
        if c == '#' {
            while byte[0] != b'\n' {
                r.read_exact(&mut byte)?;
            }
            continue;
        }
        if c.is_ascii_whitespace() {
            if !token.is_empty() {
                fields.push(token.parse::<u32>().context("malformed PPM header")?);
                token.clear();
            }
        } else {
            token.push(c);
        }
    }
    Ok(PpmHeader { width: fields[0], height: fields[1], maxval: fields[2] })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut input = BufReader::new(File::open(&args.input)?);
    let header = read_ppm_header(&mut input)?;
    if header.maxval != 255 {
        bail!("only 8-bit PPM (maxval 255) is supported");
    }

    let components = 3u8;
    let in_row_len = header.width as usize * components as usize;
    let out_row_len = args.width as usize * components as usize;

    let mut engine = Engine::new(header.width, header.height, args.width, args.height, components)?;

    let mut output = BufWriter::new(File::create(&args.output)?);
    write!(output, "P6\n{} {}\n255\n", args.width, args.height)?;

    let mut out_row = vec![0u8; out_row_len];
    let mut rows_written = 0u32;
    loop {
        match engine.next()? {
            Demand::NeedInput(buf) => {
                debug_assert_eq!(buf.len(), in_row_len);
                input.read_exact(buf)?;
            }
            Demand::Ready => {
                engine.scale_output(&mut out_row, rows_written)?;
                output.write_all(&out_row)?;
                rows_written += 1;
                if rows_written == args.height {
                    break;
                }
            }
        }
    }
    output.flush()?;

    println!(
        "{}x{} -> {}x{} ({} horizontal taps, {} vertical taps)",
        header.width,
        header.height,
        args.width,
        args.height,
        engine.horizontal_taps(),
        engine.vertical_taps(),
    );
    Ok(())
}
