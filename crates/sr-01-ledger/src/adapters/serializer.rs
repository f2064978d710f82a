//! Block serializer.

use crate::domain::entities::Block;
use crate::domain::errors::SerializationError;
use crate::ports::outbound::BlockSerializer;

/// Stores blocks in their JSON wire form.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBlockSerializer;

impl BlockSerializer for JsonBlockSerializer {
    fn serialize(&self, block: &Block) -> Result<Vec<u8>, SerializationError> {
        Ok(serde_json::to_vec(block)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Block, SerializationError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BlockBody;

    #[test]
    fn test_serialize_preserves_block() {
        let block = Block::new(0, 42, BlockBody::Note("genesis".into()), String::new()).unwrap();
        let bytes = JsonBlockSerializer.serialize(&block).unwrap();
        let decoded = JsonBlockSerializer.deserialize(&bytes).unwrap();

        assert_eq!(decoded, block);
        assert!(decoded.has_valid_hash());
    }

    #[test]
    fn test_garbage_fails_to_deserialize() {
        assert!(JsonBlockSerializer.deserialize(b"\x00not json").is_err());
        assert!(JsonBlockSerializer.deserialize(br#"{"height":1}"#).is_err());
    }
}
