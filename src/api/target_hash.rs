//! Content hash newtype for targets.
//!
//! The API transmits digests as hex strings. The CLI shows OSTree hashes
//! base64-encoded, so the raw bytes are kept and re-encoded on demand.

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;
use std::fmt;

/// Raw bytes of a target content digest.
///
/// # Examples
///
/// ```
/// use fioctl_targets::api::TargetHash;
///
/// let hash = TargetHash::try_from("00ff")?;
/// assert_eq!(hash.as_bytes(), &[0x00, 0xff]);
/// assert_eq!(hash.to_base64(), "AP8=");
/// # Ok::<(), hex::FromHexError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TargetHash(Vec<u8>);

impl TargetHash {
    /// Return the digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode the digest with the standard base64 alphabet.
    #[must_use]
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.0)
    }
}

impl TryFrom<&str> for TargetHash {
    type Error = hex::FromHexError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        hex::decode(value).map(Self)
    }
}

impl TryFrom<String> for TargetHash {
    type Error = hex::FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Vec<u8>> for TargetHash {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for TargetHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for TargetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
