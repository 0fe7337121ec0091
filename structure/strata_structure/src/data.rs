//! Growable byte buffers.
//!
//! A [`Data`] owns at most one backing array whose length is the allocated
//! capacity, always a power of two no smaller than 32. The logical content is
//! the first `size` bytes; everything past that is zero fill and is never
//! observed by equality, ordering, hashing, or encoding.
//!
//! # Sharing
//!
//! [`Data::branch`] shares the backing array and flags the copy `ALIASED`.
//! The first mutation through an aliased (or otherwise shared) handle copies
//! the logical bytes into a fresh array, so a sibling never sees another
//! handle's writes. `IMMUTABLE` handles refuse every mutation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bitflags::bitflags;

use crate::errors::{immutable, index_out_of_bounds, invalid_encoding};
use crate::StructureResult;

bitflags! {
    /// Ownership state of a byte buffer.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DataFlags: u8 {
        /// Backing array may be shared; copy before the first write.
        const ALIASED = 1 << 0;
        /// Committed; every mutation fails.
        const IMMUTABLE = 1 << 1;
    }
}

/// Smallest backing array ever allocated.
const MIN_CAPACITY: usize = 32;

/// Round a requested capacity up to the allocation size actually used.
pub(crate) fn expand(capacity: usize) -> usize {
    capacity.max(MIN_CAPACITY).next_power_of_two()
}

/// A growable, copy-on-write byte buffer.
#[derive(Clone, Default)]
pub struct Data {
    array: Option<Arc<Vec<u8>>>,
    size: usize,
    flags: DataFlags,
}

impl Data {
    pub fn new() -> Self {
        Data::default()
    }

    /// Pre-size the backing array without changing the logical length.
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Data::new();
        }
        Data {
            array: Some(Arc::new(vec![0; expand(capacity)])),
            size: 0,
            flags: DataFlags::empty(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut data = Data::with_capacity(bytes.len());
        data.append_unchecked(bytes);
        data
    }

    /// Decode a base16 string; either letter case is accepted.
    pub fn from_base16(input: &str) -> StructureResult<Self> {
        hex::decode(input)
            .map(|bytes| Data::from_bytes(&bytes))
            .map_err(|error| invalid_encoding("base16", error))
    }

    /// Decode a standard, padded base64 string.
    pub fn from_base64(input: &str) -> StructureResult<Self> {
        STANDARD
            .decode(input)
            .map(|bytes| Data::from_bytes(&bytes))
            .map_err(|error| invalid_encoding("base64", error))
    }

    /// Logical length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated length of the backing array.
    pub fn capacity(&self) -> usize {
        self.array.as_ref().map_or(0, |array| array.len())
    }

    pub fn flags(&self) -> DataFlags {
        self.flags
    }

    pub fn is_aliased(&self) -> bool {
        self.flags.contains(DataFlags::ALIASED)
    }

    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(DataFlags::IMMUTABLE)
    }

    /// The logical bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.array {
            Some(array) => &array[..self.size],
            None => &[],
        }
    }

    /// Borrow the logical bytes, or `None` when there are none.
    ///
    /// The slice is read-only; writes go through the mutators, which copy
    /// first whenever the backing array is shared.
    pub fn as_buffer(&self) -> Option<&[u8]> {
        if self.size == 0 {
            None
        } else {
            Some(self.as_slice())
        }
    }

    /// An owned, exact-length copy of the logical bytes.
    pub fn to_buffer(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    pub fn get_byte(&self, index: usize) -> StructureResult<u8> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or_else(|| index_out_of_bounds(index, self.size))
    }

    pub fn set_byte(&mut self, index: usize, value: u8) -> StructureResult<()> {
        if index >= self.size {
            return Err(index_out_of_bounds(index, self.size));
        }
        let array = self.array_mut(self.size)?;
        array[index] = value;
        Ok(())
    }

    pub fn add_byte(&mut self, value: u8) -> StructureResult<()> {
        let size = self.size;
        let array = self.array_mut(size + 1)?;
        array[size] = value;
        self.size = size + 1;
        Ok(())
    }

    pub fn add_buffer(&mut self, bytes: &[u8]) -> StructureResult<()> {
        if bytes.is_empty() {
            return self.check_mutable();
        }
        let size = self.size;
        let array = self.array_mut(size + bytes.len())?;
        array[size..size + bytes.len()].copy_from_slice(bytes);
        self.size = size + bytes.len();
        Ok(())
    }

    pub fn add_data(&mut self, that: &Data) -> StructureResult<()> {
        self.add_buffer(that.as_slice())
    }

    /// Drop the content and release the backing array.
    pub fn clear(&mut self) -> StructureResult<()> {
        self.check_mutable()?;
        self.array = None;
        self.size = 0;
        self.flags.remove(DataFlags::ALIASED);
        Ok(())
    }

    /// A handle sharing this buffer's bytes that copies on its first write.
    pub fn branch(&self) -> Data {
        Data {
            array: self.array.clone(),
            size: self.size,
            flags: DataFlags::ALIASED,
        }
    }

    /// Freeze the buffer; later mutations fail.
    pub fn commit(&mut self) -> &mut Self {
        self.flags.insert(DataFlags::IMMUTABLE);
        self
    }

    // Encoding

    pub fn write_base16<W: fmt::Write>(&self, output: &mut W) -> fmt::Result {
        output.write_str(&self.to_base16())
    }

    pub fn write_base64<W: fmt::Write>(&self, output: &mut W) -> fmt::Result {
        output.write_str(&self.to_base64())
    }

    /// Uppercase base16 of the logical bytes.
    pub fn to_base16(&self) -> String {
        hex::encode_upper(self.as_slice())
    }

    /// Standard padded base64 of the logical bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_slice())
    }

    fn check_mutable(&self) -> StructureResult<()> {
        if self.is_mutable() {
            Ok(())
        } else {
            Err(immutable("data"))
        }
    }

    /// Exclusive access to a backing array of at least `needed` bytes.
    ///
    /// Copies when the array is shared or flagged aliased, and grows to the
    /// next power of two when it is too small.
    fn array_mut(&mut self, needed: usize) -> StructureResult<&mut Vec<u8>> {
        self.check_mutable()?;
        let shared = self.is_aliased()
            || self
                .array
                .as_ref()
                .is_some_and(|array| Arc::strong_count(array) > 1);
        if shared || needed > self.capacity() {
            let capacity = if needed > self.capacity() {
                expand(needed)
            } else {
                self.capacity()
            };
            let mut fresh = vec![0; capacity];
            fresh[..self.size].copy_from_slice(self.as_slice());
            self.array = Some(Arc::new(fresh));
            self.flags.remove(DataFlags::ALIASED);
        }
        let array = self.array.get_or_insert_with(|| Arc::new(Vec::new()));
        Ok(Arc::make_mut(array))
    }

    fn append_unchecked(&mut self, bytes: &[u8]) {
        if let Some(array) = self.array.as_mut().and_then(Arc::get_mut) {
            array[..bytes.len()].copy_from_slice(bytes);
            self.size = bytes.len();
        }
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Data {}

impl PartialOrd for Data {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Data {
    /// Byte-lexicographic; a strict prefix sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data({})", self.to_base16())
    }
}

impl From<&[u8]> for Data {
    fn from(bytes: &[u8]) -> Self {
        Data::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Data::from_bytes(&bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Data {
    fn from(bytes: [u8; N]) -> Self {
        Data::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests;
