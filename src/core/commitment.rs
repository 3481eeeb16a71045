//! Commit/reveal over a board's ship layout.
//!
//! Before the first shot each side sends a keyed digest of its occupancy
//! vector; after the last shot it reveals the board and the key so the
//! opponent can recompute the digest. The keyed hash is HMAC-SHA1: with
//! a 64-byte key (one SHA-1 block) that is exactly
//! `SHA1((K ^ opad) || SHA1((K ^ ipad) || data))` with ipad `0x36` and
//! opad `0x5c`.
//!
//! The occupancy vector carries presence only, so the digest binds the
//! layout without committing to which ship sits where.

use core::fmt;

use hmac::digest::generic_array::GenericArray;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::Sha1;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::board::Board;
use crate::core::config::{CELL_COUNT, TOTAL_SHIP_CELLS};
use crate::entropy::{EntropyError, EntropySource};

/// Bytes of key material (512 bits, one SHA-1 block).
pub const KEY_LEN: usize = 64;
/// Bytes in a digest (160 bits).
pub const DIGEST_LEN: usize = 20;

type HmacSha1 = Hmac<Sha1>;

/// Secret key binding a board to its commitment. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Draw a fresh key from `entropy`.
    pub fn generate(entropy: &mut dyn EntropySource) -> Result<Self, EntropyError> {
        let mut bytes = [0u8; KEY_LEN];
        entropy.fill(&mut bytes)?;
        let key = Self(bytes);
        bytes.zeroize();
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = String;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| format!("secret key must be {} bytes, got {}", KEY_LEN, bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut bytes = Vec::<u8>::deserialize(deserializer)?;
        let key = Self::try_from(bytes.as_slice()).map_err(serde::de::Error::custom);
        bytes.zeroize();
        key
    }
}

/// A 160-bit commitment digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(self.0))
    }
}

/// One byte per cell, `1` where a ship sits.
pub fn occupancy_bytes(occupancy: &[bool; CELL_COUNT]) -> [u8; CELL_COUNT] {
    core::array::from_fn(|i| occupancy[i] as u8)
}

fn keyed_mac(key: &SecretKey) -> HmacSha1 {
    // KEY_LEN is the SHA-1 block size, the exact key width HMAC expects.
    <HmacSha1 as KeyInit>::new(GenericArray::from_slice(key.as_bytes()))
}

/// Keyed digest of an occupancy vector.
pub fn keyed_digest(key: &SecretKey, occupancy: &[bool; CELL_COUNT]) -> Digest {
    let mut mac = keyed_mac(key);
    mac.update(&occupancy_bytes(occupancy));
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Digest(out)
}

/// Warn when a board does not carry exactly the configured number of ship
/// segments. The check is advisory: the caller proceeds either way.
pub fn check_ship_count(board: &Board) -> bool {
    let pieces = board.ship_cells();
    if pieces != TOTAL_SHIP_CELLS {
        warn!(
            "board of {} has an invalid ship count ({} cells, expected {})",
            board.owner(),
            pieces,
            TOTAL_SHIP_CELLS
        );
        false
    } else {
        true
    }
}

/// Generate a fresh key, store it in `board`, and return the digest of its
/// layout under that key.
pub fn commit(board: &mut Board, entropy: &mut dyn EntropySource) -> Result<Digest, EntropyError> {
    check_ship_count(board);
    let key = SecretKey::generate(entropy)?;
    let digest = keyed_digest(&key, &board.occupancy_vector());
    board.set_key(key);
    debug!("committed to board of {}: {}", board.owner(), digest);
    Ok(digest)
}

/// Recompute the digest of `board` under `key` and compare it with
/// `expected` in constant time.
pub fn verify(board: &Board, key: &SecretKey, expected: &Digest) -> bool {
    check_ship_count(board);
    let mut mac = keyed_mac(key);
    mac.update(&occupancy_bytes(&board.occupancy_vector()));
    mac.verify_slice(expected.as_bytes()).is_ok()
}
