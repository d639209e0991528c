//! Node decoding from the Substrate wire format.
//!
//! An encoding starts with a header byte: the variant in the top two bits
//! and the partial key nibble count in the bottom six, saturated counts
//! continuing in follow-up bytes. The nibble-packed partial key comes next;
//! branches follow with a 16-bit little-endian children bitmap, the
//! SCALE-prefixed storage value (branch-with-value only) and one SCALE
//! length-prefixed reference per present child in ascending slot order.
use crate::trie::nibbles;
use crate::trie::nodes::{BranchNode, DigestNode, LeafNode, TrieNode};
use alloy_primitives::{Bytes, B256};
use alloy_trie::Nibbles;
use parity_scale_codec::{Compact, Decode, Input};
use thiserror::Error;

pub(crate) const EMPTY_NODE_HEADER: u8 = 0x00;
pub(crate) const LEAF_VARIANT: u8 = 0b0100_0000;
pub(crate) const BRANCH_VARIANT: u8 = 0b1000_0000;
pub(crate) const BRANCH_WITH_VALUE_VARIANT: u8 = 0b1100_0000;
pub(crate) const PARTIAL_KEY_LEN_MASK: u8 = 0b0011_1111;

const VARIANT_MASK: u8 = 0b1100_0000;
const HASH_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("node variant is unknown: for header byte {0:08b}")]
    VariantUnknown(u8),
    #[error("node encoding is the empty node")]
    EmptyNode,
    #[error("unexpected end of data")]
    UnexpectedEndOfData,
    #[error("partial key padding is not zero: 0x{0:02x}")]
    NonZeroPadding(u8),
    #[error("decoding length prefix: {0}")]
    LengthPrefix(String),
    #[error("child payload of {0} bytes is neither inline nor a hash reference")]
    InvalidChildReference(usize),
    #[error("{0} trailing bytes after the node encoding")]
    TrailingBytes(usize),
    #[error("decoding child at index {index}: {source}")]
    Child { index: usize, source: Box<DecodeError> },
}

/// Cursor over a borrowed encoding. Implements `parity_scale_codec::Input`
/// so SCALE length prefixes decode straight off the slice.
struct ByteSliceInput<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteSliceInput<'a> {
    fn new(data: &'a [u8]) -> Self {
        ByteSliceInput { data, offset: 0 }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        if count > self.data.len() - self.offset {
            return Err(DecodeError::UnexpectedEndOfData);
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.offset).ok_or(DecodeError::UnexpectedEndOfData)?;
        self.offset += 1;
        Ok(byte)
    }

    fn unread(&self) -> usize {
        self.data.len() - self.offset
    }
}

impl Input for ByteSliceInput<'_> {
    fn remaining_len(&mut self) -> Result<Option<usize>, parity_scale_codec::Error> {
        Ok(Some(self.unread()))
    }

    fn read(&mut self, into: &mut [u8]) -> Result<(), parity_scale_codec::Error> {
        let slice = self.take(into.len()).map_err(|_| "out of data")?;
        into.copy_from_slice(slice);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, parity_scale_codec::Error> {
        self.next_byte().map_err(|_| "out of data".into())
    }
}

impl TrieNode {
    /// Decodes a node from its full encoding.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut input = ByteSliceInput::new(data);
        Self::decode_node(&mut input)
    }

    /// Decodes a node that must span the whole buffer, as child payloads do.
    fn decode_exact(data: &[u8]) -> Result<Self, DecodeError> {
        let mut input = ByteSliceInput::new(data);
        let node = Self::decode_node(&mut input)?;
        if input.unread() > 0 {
            return Err(DecodeError::TrailingBytes(input.unread()));
        }
        Ok(node)
    }

    fn decode_node(input: &mut ByteSliceInput<'_>) -> Result<Self, DecodeError> {
        let header = input.next_byte()?;
        if header == EMPTY_NODE_HEADER {
            return Err(DecodeError::EmptyNode);
        }
        let variant = header & VARIANT_MASK;
        if !matches!(variant, LEAF_VARIANT | BRANCH_VARIANT | BRANCH_WITH_VALUE_VARIANT) {
            return Err(DecodeError::VariantUnknown(header));
        }

        let nibble_count = decode_partial_key_len(header, input)?;
        let partial_key = decode_partial_key(input, nibble_count)?;

        if variant == LEAF_VARIANT {
            let value = decode_storage_value(input)?;
            return Ok(TrieNode::Leaf(LeafNode::new(partial_key, value)));
        }

        let bitmap = decode_children_bitmap(input)?;
        let value = if variant == BRANCH_WITH_VALUE_VARIANT {
            Some(decode_storage_value(input)?)
        } else {
            None
        };

        let mut branch = BranchNode::new(partial_key, value);
        for index in 0..16 {
            if bitmap & (1 << index) == 0 {
                continue;
            }
            let payload = decode_length_prefixed(input)?;
            let child = decode_child(payload, index)?;
            branch.insert_child(index, child);
        }
        Ok(TrieNode::Branch(branch))
    }
}

fn decode_partial_key_len(
    header: u8,
    input: &mut ByteSliceInput<'_>,
) -> Result<usize, DecodeError> {
    let mut nibble_count = (header & PARTIAL_KEY_LEN_MASK) as usize;
    if nibble_count == PARTIAL_KEY_LEN_MASK as usize {
        // Saturated header length: continuation bytes each add up to 255
        // nibbles, a byte below 255 ends the count.
        loop {
            let byte = input.next_byte()?;
            nibble_count += byte as usize;
            if byte < 255 {
                break;
            }
        }
    }
    Ok(nibble_count)
}

fn decode_partial_key(
    input: &mut ByteSliceInput<'_>,
    nibble_count: usize,
) -> Result<Nibbles, DecodeError> {
    let key = input.take(nibble_count.div_ceil(2))?;
    if nibble_count % 2 == 1 && key[0] >> 4 != 0 {
        return Err(DecodeError::NonZeroPadding(key[0]));
    }
    Ok(nibbles::key_le_to_nibbles(key, nibble_count))
}

fn decode_children_bitmap(input: &mut ByteSliceInput<'_>) -> Result<u16, DecodeError> {
    let bytes = input.take(2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn decode_storage_value(input: &mut ByteSliceInput<'_>) -> Result<Bytes, DecodeError> {
    let value = decode_length_prefixed(input)?;
    Ok(Bytes::copy_from_slice(value))
}

fn decode_length_prefixed<'a>(input: &mut ByteSliceInput<'a>) -> Result<&'a [u8], DecodeError> {
    let length = Compact::<u32>::decode(input)
        .map_err(|error| DecodeError::LengthPrefix(error.to_string()))?;
    input.take(length.0 as usize)
}

fn decode_child(payload: &[u8], index: usize) -> Result<TrieNode, DecodeError> {
    match payload.len() {
        // A 32-byte payload is normally a hash reference, but a node whose
        // encoding is exactly 32 bytes still sits inline: try that first
        // and keep the digest when the payload does not parse.
        HASH_LENGTH => Ok(TrieNode::decode_exact(payload).unwrap_or_else(|_| {
            TrieNode::Digest(DigestNode { digest: B256::from_slice(payload) })
        })),
        length if length > HASH_LENGTH => Err(DecodeError::Child {
            index,
            source: Box::new(DecodeError::InvalidChildReference(length)),
        }),
        _ => TrieNode::decode_exact(payload)
            .map_err(|source| DecodeError::Child { index, source: Box::new(source) }),
    }
}
