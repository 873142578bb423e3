//! Salted, stretched SHA-256 password hashes.
//!
//! Stored format: `sha256$<rounds>$<salt>$<digest>` with base64 salt and
//! digest, so the round count can change without invalidating old hashes.

use base64::prelude::*;
use rand::Rng;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SALT_BYTES: usize = 16;
pub const HASH_ROUNDS: u32 = 10_000;

pub fn hash_password(password: &str) -> String {
    let mut rng = rand::thread_rng();
    let salt: Vec<u8> = (0..SALT_BYTES).map(|_| rng.gen::<u8>()).collect();
    encode(&salt, HASH_ROUNDS, password)
}

/// Checks `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, rounds, salt, digest] = parts.as_slice() else {
        return false;
    };
    if *scheme != SCHEME {
        return false;
    }
    let (Ok(rounds), Ok(salt), Ok(expected)) = (
        rounds.parse::<u32>(),
        BASE64_STANDARD.decode(salt),
        BASE64_STANDARD.decode(digest),
    ) else {
        return false;
    };

    let actual = stretch(&salt, rounds, password);
    actual.len() == expected.len() && actual.iter().zip(&expected).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

fn encode(salt: &[u8], rounds: u32, password: &str) -> String {
    let digest = stretch(salt, rounds, password);
    format!(
        "{}${}${}${}",
        SCHEME,
        rounds,
        BASE64_STANDARD.encode(salt),
        BASE64_STANDARD.encode(digest)
    )
}

fn stretch(salt: &[u8], rounds: u32, password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest = hasher.finalize();

    for _ in 1..rounds.max(1) {
        let mut hasher = Sha256::new();
        hasher.update(digest);
        hasher.update(salt);
        digest = hasher.finalize();
    }

    digest.to_vec()
}
