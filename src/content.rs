//! Deterministic file content
//!
//! Content is a pure function of (seed, size, mode). The seed string is hashed with
//! BLAKE3 and the digest keys a ChaCha8 stream, so the bytes are reproducible by any
//! implementation of those two primitives.

use base64::engine::general_purpose::STANDARD as B64_STD;
use base64::Engine as _;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};

/// Bytes drawn per write in binary mode
pub const BINARY_CHUNK: usize = 1024;

/// Raw bytes behind one text line; 24 bytes encode to 32 base64 characters
const TEXT_CHUNK: usize = 24;

/// Encoded characters per text line, newline excluded
const TEXT_CHARS: usize = TEXT_CHUNK / 3 * 4;

/// Characters per full text line, newline included
pub const TEXT_LINE_LEN: u64 = TEXT_CHARS as u64 + 1;

/// Build the generator for `seed`
pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::from_seed(*blake3::hash(seed.as_bytes()).as_bytes())
}

/// Write `nbytes` of content derived from `seed`.
///
/// Binary mode writes raw pseudorandom bytes. Text mode writes base64 lines of
/// [`TEXT_LINE_LEN`] characters; the last line is cut short so that the output,
/// newlines included, is exactly `nbytes` long.
pub fn fill_file<W: Write>(writer: &mut W, nbytes: u64, seed: &str, text: bool) -> io::Result<()> {
    let mut rng = seeded_rng(seed);
    if text {
        fill_text(writer, nbytes, &mut rng)
    } else {
        fill_binary(writer, nbytes, &mut rng)
    }
}

fn fill_binary<W: Write>(writer: &mut W, nbytes: u64, rng: &mut ChaCha8Rng) -> io::Result<()> {
    let mut buf = [0u8; BINARY_CHUNK];
    let chunks = nbytes / BINARY_CHUNK as u64;
    let extra = (nbytes % BINARY_CHUNK as u64) as usize;

    for _ in 0..chunks {
        rng.fill_bytes(&mut buf);
        writer.write_all(&buf)?;
    }

    if extra > 0 {
        rng.fill_bytes(&mut buf[..extra]);
        writer.write_all(&buf[..extra])?;
    }

    Ok(())
}

fn fill_text<W: Write>(writer: &mut W, nbytes: u64, rng: &mut ChaCha8Rng) -> io::Result<()> {
    let mut raw = [0u8; TEXT_CHUNK];
    let mut line = [0u8; TEXT_CHARS + 1];
    line[TEXT_CHARS] = b'\n';

    let lines = nbytes / TEXT_LINE_LEN;
    let extra = (nbytes % TEXT_LINE_LEN) as usize;

    for _ in 0..lines {
        encode_line(rng, &mut raw, &mut line)?;
        writer.write_all(&line)?;
    }

    if extra > 0 {
        encode_line(rng, &mut raw, &mut line)?;
        writer.write_all(&line[..extra - 1])?;
        writer.write_all(b"\n")?;
    }

    Ok(())
}

fn encode_line(
    rng: &mut ChaCha8Rng,
    raw: &mut [u8; TEXT_CHUNK],
    line: &mut [u8; TEXT_CHARS + 1],
) -> io::Result<()> {
    rng.fill_bytes(raw);
    B64_STD
        .encode_slice(&raw[..], &mut line[..TEXT_CHARS])
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(())
}
