use crate::InvalidArgument;

/// Lookup table: ASCII byte → nibble value (255 = invalid).
///
/// Only lowercase digits decode.
const HEX_DECODE: [u8; 256] = {
    let mut table = [255u8; 256];
    let mut i = 0u8;
    loop {
        match i {
            b'0'..=b'9' => table[i as usize] = i - b'0',
            b'a'..=b'f' => table[i as usize] = i - b'a' + 10,
            _ => {}
        }
        if i == 255 {
            break;
        }
        i += 1;
    }
    table
};

const HEX_ENCODE: &[u8; 16] = b"0123456789abcdef";

/// Hex-encode `bytes` to a new lowercase `String`.
pub fn hex_to_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_ENCODE[(b >> 4) as usize] as char);
        out.push(HEX_ENCODE[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode a lowercase hex string into `buf`.
///
/// The hex string length must be exactly `buf.len() * 2`.
pub fn hex_decode(hex: &str, buf: &mut [u8]) -> Result<(), InvalidArgument> {
    let invalid = || InvalidArgument::Sha(hex.to_string());
    let digits = hex.as_bytes();
    if digits.len() != buf.len() * 2 {
        return Err(invalid());
    }
    for (i, pair) in digits.chunks_exact(2).enumerate() {
        let hi = HEX_DECODE[pair[0] as usize];
        let lo = HEX_DECODE[pair[1] as usize];
        if hi == 255 || lo == 255 {
            return Err(invalid());
        }
        buf[i] = (hi << 4) | lo;
    }
    Ok(())
}
