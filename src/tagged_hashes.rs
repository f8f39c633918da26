//! Declarations for computing
//! [BIP340](https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki)-style
//! tagged hashes.
//!
//! A tagged hash is a SHA256 hash which has been prefixed with two copies of
//! the SHA256 hash of a given fixed constant byte string. This has the effect
//! of namespacing the hash to reduce the possibility of collisions.
//!
//! Verification only needs the challenge tag, so that is the only hash
//! engine declared here. To produce a tagged hash, clone the lazily
//! allocated engine; this gives an instance of `sha2::Sha256`.
//!
//! ```
//! use schnorr_adaptor::tagged_hashes;
//! use sha2::Sha256;
//! use sha2::Digest as _; // Brings trait methods into scope
//!
//! let hash = tagged_hashes::BIP0340_CHALLENGE_TAG_HASHER
//!     .clone()
//!     .chain_update(b"SomeData")
//!     .finalize();
//!
//! let expected = {
//!     let tag_digest = Sha256::digest("BIP0340/challenge");
//!     Sha256::new()
//!         .chain_update(&tag_digest)
//!         .chain_update(&tag_digest)
//!         .chain_update(b"SomeData")
//!         .finalize()
//! };
//!
//! assert_eq!(hash, expected);
//! ```

use sha2::Sha256;
use std::sync::LazyLock;

use sha2::Digest as _;

fn with_tag_hash_prefix(tag_hash: [u8; 32]) -> Sha256 {
    Sha256::new().chain_update(tag_hash).chain_update(tag_hash)
}

/// sha256(b"BIP0340/challenge")
const BIP0340_CHALLENGE_TAG_DIGEST: [u8; 32] = [
    0x7B, 0xB5, 0x2D, 0x7A, 0x9F, 0xEF, 0x58, 0x32, 0x3E, 0xB1, 0xBF, 0x7A, 0x40, 0x7D, 0xB3, 0x82,
    0xD2, 0xF3, 0xF2, 0xD8, 0x1B, 0xB1, 0x22, 0x4F, 0x49, 0xFE, 0x51, 0x8F, 0x6D, 0x48, 0xD3, 0x7C,
];

/// A `sha2::Sha256` hash engine with its state initialized to:
///
/// ```notrust
/// sha256(b"BIP0340/challenge") || sha256(b"BIP0340/challenge")
/// ```
pub static BIP0340_CHALLENGE_TAG_HASHER: LazyLock<Sha256> =
    LazyLock::new(|| with_tag_hash_prefix(BIP0340_CHALLENGE_TAG_DIGEST));
