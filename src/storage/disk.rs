//! Fixed-capacity virtual disk
//!
//! An append-only byte store. Writes land at the cursor, which only ever
//! moves forward; clearing an extent empties its slots without returning
//! them to the allocator.

use tracing::debug;

use crate::error::{Error, Result};

/// A `[start, end)` byte range on the virtual disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// First slot of the range
    pub start: usize,

    /// One past the last slot
    pub end: usize,
}

impl Extent {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Bounded byte store backing file content
#[derive(Debug)]
pub struct VirtualDisk {
    /// Byte slots; `None` means never written or cleared
    slots: Vec<Option<u8>>,

    /// Next slot to write
    cursor: usize,
}

impl VirtualDisk {
    /// Create an empty disk with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left between the cursor and the end of the disk
    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    /// Append `data` at the cursor and return the extent it occupies.
    ///
    /// Fails with `OutOfDisk` before touching any slot if the data does not fit.
    pub fn append(&mut self, data: &[u8]) -> Result<Extent> {
        let end = self
            .cursor
            .checked_add(data.len())
            .filter(|end| *end <= self.capacity())
            .ok_or(Error::OutOfDisk)?;

        let extent = Extent::new(self.cursor, end);
        for (slot, byte) in self.slots[extent.start..extent.end].iter_mut().zip(data) {
            *slot = Some(*byte);
        }
        self.cursor = end;

        debug!("Appended {} bytes at {}..{}", data.len(), extent.start, extent.end);
        Ok(extent)
    }

    /// Read the bytes of an extent
    pub fn read(&self, extent: Extent) -> Result<Vec<u8>> {
        let corrupt = || Error::CorruptExtent {
            start: extent.start,
            end: extent.end,
        };

        self.slots
            .get(extent.start..extent.end)
            .ok_or_else(corrupt)?
            .iter()
            .map(|slot| slot.ok_or_else(corrupt))
            .collect()
    }

    /// Empty the slots of an extent. The cursor is not rewound.
    pub fn clear(&mut self, extent: Extent) {
        let end = extent.end.min(self.capacity());
        if extent.start >= end {
            return;
        }
        for slot in &mut self.slots[extent.start..end] {
            *slot = None;
        }
        debug!("Cleared extent {}..{}", extent.start, end);
    }
}
