use crate::SerializationError;

/// A data block that can be stored in a [`MerkleTree`](crate::MerkleTree).
///
/// The tree never keeps the serialized bytes; they are hashed and dropped.
pub trait DataBlock {
    /// Produce the bytes that identify this block.
    fn serialize(&self) -> Result<Vec<u8>, SerializationError>;
}

impl DataBlock for [u8] {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.to_vec())
    }
}

impl DataBlock for Vec<u8> {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.clone())
    }
}

impl<const N: usize> DataBlock for [u8; N] {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.to_vec())
    }
}

impl DataBlock for str {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl DataBlock for String {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(self.as_bytes().to_vec())
    }
}

impl<T: DataBlock + ?Sized> DataBlock for &T {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        (**self).serialize()
    }
}

impl<T: DataBlock + ?Sized> DataBlock for Box<T> {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        (**self).serialize()
    }
}
