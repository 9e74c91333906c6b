//! Account address derivation and encoding.
//!
//! A MAN address is the Ethereum-style address (last 20 bytes of the
//! Keccak-256 hash of the uncompressed public key body) rendered as
//! `MAN.` plus the Base58 encoding plus one Base58 checksum character
//! covering everything before it, prefix included.

use manapp_common::{ParserError, ADDRESS_BUFFER_LEN, PUBKEY_LEN, RAW_ADDRESS_LEN};
use tiny_keccak::{Hasher, Keccak};

pub const ADDRESS_PREFIX: &[u8; 4] = b"MAN.";

const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// CRC-8, polynomial 0x07, no reflection, init and xor-out zero.
/// Matches the checksum the network uses for address verification.
const CRC8_POLY7: [u8; 256] = [
    0, 7, 14, 9, 28, 27, 18, 21, 56, 63, 54, 49, 36, 35, 42, 45, 112, 119, 126, 121, 108, 107, 98,
    101, 72, 79, 70, 65, 84, 83, 90, 93, 224, 231, 238, 233, 252, 251, 242, 245, 216, 223, 214,
    209, 196, 195, 202, 205, 144, 151, 158, 153, 140, 139, 130, 133, 168, 175, 166, 161, 180, 179,
    186, 189, 199, 192, 201, 206, 219, 220, 213, 210, 255, 248, 241, 246, 227, 228, 237, 234, 183,
    176, 185, 190, 171, 172, 165, 162, 143, 136, 129, 134, 147, 148, 157, 154, 39, 32, 41, 46, 59,
    60, 53, 50, 31, 24, 17, 22, 3, 4, 13, 10, 87, 80, 89, 94, 75, 76, 69, 66, 111, 104, 97, 102,
    115, 116, 125, 122, 137, 142, 135, 128, 149, 146, 155, 156, 177, 182, 191, 184, 173, 170, 163,
    164, 249, 254, 247, 240, 229, 226, 235, 236, 193, 198, 207, 200, 221, 218, 211, 212, 105, 110,
    103, 96, 117, 114, 123, 124, 81, 86, 95, 88, 77, 74, 67, 68, 25, 30, 23, 16, 5, 2, 11, 12, 33,
    38, 47, 40, 61, 58, 51, 52, 78, 73, 64, 71, 82, 85, 92, 91, 118, 113, 120, 127, 106, 109, 100,
    99, 62, 57, 48, 55, 34, 37, 44, 43, 6, 1, 8, 15, 26, 29, 20, 19, 174, 169, 160, 167, 178, 181,
    188, 187, 150, 145, 152, 159, 138, 141, 132, 131, 222, 217, 208, 215, 194, 197, 204, 203, 230,
    225, 232, 239, 250, 253, 244, 243,
];

pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in data {
        crc = CRC8_POLY7[(crc ^ b) as usize];
    }
    crc
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// Raw 20-byte account address from an uncompressed secp256k1 public
/// key. The leading `0x04` prefix byte is excluded from the hash.
pub fn address_from_pubkey(pubkey: &[u8; PUBKEY_LEN]) -> [u8; RAW_ADDRESS_LEN] {
    let hash = keccak256(&pubkey[1..]);
    let mut addr = [0u8; RAW_ADDRESS_LEN];
    addr.copy_from_slice(&hash[32 - RAW_ADDRESS_LEN..]);
    addr
}

/// Writes the checked textual address for `pubkey` into `out` and
/// returns the total length, terminator excluded.
pub fn encode_address(pubkey: &[u8; PUBKEY_LEN], out: &mut [u8]) -> Result<usize, ParserError> {
    let raw = address_from_pubkey(pubkey);
    encode_raw_address(&raw, out)
}

/// Same as [`encode_address`] but from an already-derived raw address.
pub fn encode_raw_address(
    raw: &[u8; RAW_ADDRESS_LEN],
    out: &mut [u8],
) -> Result<usize, ParserError> {
    if out.len() < ADDRESS_BUFFER_LEN {
        return Err(ParserError::BufferTooSmall);
    }
    out.fill(0);
    out[..ADDRESS_PREFIX.len()].copy_from_slice(ADDRESS_PREFIX);

    let encoded_len = bs58::encode(raw)
        .onto(&mut out[ADDRESS_PREFIX.len()..])
        .map_err(|_| ParserError::BufferTooSmall)?;
    let written = ADDRESS_PREFIX.len() + encoded_len;

    // Checksum covers the prefix and the Base58 body.
    let check = crc8(&out[..written]);
    let check_slot = out
        .get_mut(written)
        .ok_or(ParserError::BufferTooSmall)?;
    *check_slot = BASE58_ALPHABET[(check % 58) as usize];
    Ok(written + 1)
}
