//! Codec trait and implementations for serializing/deserializing messages.
//!
//! The relay doesn't care how messages become bytes — it only needs
//! something implementing [`Codec`]. [`JsonCodec`] is the default (and what
//! browser clients speak); a binary codec could be swapped in without
//! touching any other layer.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because the codec is shared by every connection
/// handler task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// This is where the typed-state boundary lives: a `pushState` whose
    /// snapshot doesn't match any game variant fails here, before it can
    /// reach the store.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] using JSON via `serde_json`.
///
/// Human-readable, inspectable in browser devtools, and the format the
/// original clients already speak. Behind the `json` feature (on by
/// default).
///
/// ```rust
/// use parlor_protocol::{Codec, JsonCodec, PlayerId};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&PlayerId::from("p1")).unwrap();
/// let decoded: PlayerId = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, PlayerId::from("p1"));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
