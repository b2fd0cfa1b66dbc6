use crate::ports::ValueCodec;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{Error, Result};

/// JSON value codec. Numbers serialize to their plain ASCII digits, so
/// counters written through this codec stay readable by the store's numeric
/// primitives.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl ValueCodec for JsonCodec {
    fn encode(&self, value: &serde_json::Value) -> Result<Bytes> {
        let raw = serde_json::to_vec(value).map_err(|e| Error::Codec(e.to_string()))?;
        Ok(Bytes::from(raw))
    }

    fn decode(&self, raw: &[u8]) -> Result<serde_json::Value> {
        serde_json::from_slice(raw).map_err(|e| Error::Codec(e.to_string()))
    }
}

pub(crate) fn encode_value<T>(codec: &dyn ValueCodec, value: &T) -> Result<Bytes>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value).map_err(|e| Error::Codec(e.to_string()))?;
    codec.encode(&json)
}

pub(crate) fn encode_values<T: Serialize>(codec: &dyn ValueCodec, values: &[T]) -> Result<Vec<Bytes>> {
    values.iter().map(|v| encode_value(codec, v)).collect()
}

pub(crate) fn decode_value<T: DeserializeOwned>(codec: &dyn ValueCodec, raw: &[u8]) -> Result<T> {
    let json = codec.decode(raw)?;
    serde_json::from_value(json).map_err(|e| Error::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_typed_values() {
        let codec = JsonCodec;
        let raw = encode_value(&codec, "hello").unwrap();
        let back: String = decode_value(&codec, &raw).unwrap();
        assert_eq!(back, "hello");
    }

    #[test]
    fn integers_encode_as_plain_digits() {
        let codec = JsonCodec;
        let raw = encode_value(&codec, &42i64).unwrap();
        assert_eq!(&raw[..], b"42");
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = JsonCodec;
        let err = decode_value::<String>(&codec, b"{not json").unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
    }
}
