//! # Byte Blocks
//!
//! Optional cross-referencing of symbol addresses against real image
//! contents (a flash dump, the loadable parts of an ELF, ...).
//!
//! The map itself never needs bytes. Callers that have them implement
//! [`ByteSource`], or collect [`DataBlock`]s into [`DataBlocks`], and ask
//! [`MemoryMap::global_bytes`] for the bytes backing a symbol.

use std::fmt;

use crate::error::MapResult;
use crate::map::MemoryMap;
use crate::types::{Address, MapEntry};

/// Provider of image bytes by address
pub trait ByteSource
{
    /// Bytes from `address` to the end of whatever contiguous block holds
    /// it, or `None` if nothing covers `address`
    fn lookup(&self, address: Address) -> Option<&[u8]>;
}

/// Contiguous bytes loaded at a fixed address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock
{
    pub address: Address,
    pub data: Vec<u8>,
}

impl DataBlock
{
    pub fn new(address: Address, data: impl Into<Vec<u8>>) -> Self
    {
        Self {
            address,
            data: data.into(),
        }
    }

    pub fn start(&self) -> Address
    {
        self.address
    }

    /// Exclusive end address
    pub fn end(&self) -> Address
    {
        self.address.saturating_add(self.len() as u64)
    }

    pub fn len(&self) -> usize
    {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.data.is_empty()
    }
}

impl ByteSource for DataBlock
{
    fn lookup(&self, address: Address) -> Option<&[u8]>
    {
        let offset = usize::try_from(address.distance_from(self.address)?).ok()?;
        if offset < self.data.len() {
            Some(&self.data[offset..])
        } else {
            None
        }
    }
}

impl fmt::Display for DataBlock
{
    /// Hex dump, 32 bytes per row, each row prefixed by its address
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for (row, chunk) in self.data.chunks(32).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}:", self.address.saturating_add(row as u64 * 32))?;
            for byte in chunk {
                write!(f, " {byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Ordered set of data blocks; the first block covering an address wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataBlocks
{
    blocks: Vec<DataBlock>,
}

impl DataBlocks
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn push(&mut self, block: DataBlock)
    {
        self.blocks.push(block);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataBlock>
    {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize
    {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.blocks.is_empty()
    }
}

impl FromIterator<DataBlock> for DataBlocks
{
    fn from_iter<I: IntoIterator<Item = DataBlock>>(iter: I) -> Self
    {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl Extend<DataBlock> for DataBlocks
{
    fn extend<I: IntoIterator<Item = DataBlock>>(&mut self, iter: I)
    {
        self.blocks.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DataBlocks
{
    type Item = &'a DataBlock;
    type IntoIter = std::slice::Iter<'a, DataBlock>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.blocks.iter()
    }
}

impl ByteSource for DataBlocks
{
    fn lookup(&self, address: Address) -> Option<&[u8]>
    {
        self.blocks.iter().find_map(|block| block.lookup(address))
    }
}

impl MemoryMap
{
    /// Bytes backing `entry` in `source`
    ///
    /// The slice is truncated to the entry's size; it is shorter when the
    /// block holding the entry ends early. `None` means the source has no
    /// bytes at the entry's start address.
    ///
    /// ## Errors
    ///
    /// [`MapError::InvariantViolation`](crate::MapError::InvariantViolation)
    /// if the entry's size was never resolved.
    pub fn global_bytes<'s, S>(&self, entry: &MapEntry, source: &'s S) -> MapResult<Option<&'s [u8]>>
    where
        S: ByteSource + ?Sized,
    {
        let end = entry.try_end()?;
        let size = end.distance_from(entry.start()).unwrap_or(0);
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        Ok(source
            .lookup(entry.start())
            .map(|bytes| &bytes[..size.min(bytes.len())]))
    }
}
