mod aes_gcm;
mod argon2id;
mod envelope;

use rand::{CryptoRng, RngCore};

/// A "random" source that only ever yields zero bytes. Pins salts and
/// nonces so wrapper output can be compared against published vectors.
pub struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

impl CryptoRng for ZeroRng {}
