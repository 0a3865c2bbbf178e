//! Patch list side channel.
//!
//! The link reserves [`SENTINEL`] (0xFE) on the wire, but a serialized
//! trade block can legitimately contain that value. Before sending, every
//! such byte is replaced by [`PATCH_MARKER`] and its position recorded;
//! the positions travel separately in a fixed 190-byte patch list so the
//! receiver can put the sentinels back.
//!
//! Wire layout of the patch list:
//!
//! ```text
//! page 0 (payload offsets 0x000..0x0FB) : entries, value = offset + 1
//! 0xFF                                  : switch to page 1
//! page 1 (payload offsets 0x0FB..)      : entries, value = offset + 1 - 0xFC
//! 0xFF                                  : end of list
//! 0x00 ...                              : unused, up to 190 bytes
//! ```
//!
//! Pages split on the 1-based position, so offset 0x0FB is the first byte
//! of page 1 and is stored as 0x00 there. With no page-1 entries the switch
//! marker is immediately followed by the end marker, so an empty list
//! starts `FF FF`.

use thiserror::Error;

use crate::wire_types::{PATCH_LIST_LEN, PATCH_MARKER, PATCH_PAGE_SIZE, SENTINEL};

/// Highest payload offset the patch list can address: page 1 values must
/// stay below the marker byte.
pub const MAX_PATCH_OFFSET: usize = PATCH_PAGE_SIZE + (PATCH_MARKER as usize - 2);

/// Errors raised while building or reading a patch list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The offset lies past what page 1 can express.
    #[error("patch offset {offset:#x} is beyond the last patchable byte {max:#x}")]
    OffsetOutOfRange { offset: usize, max: usize },

    /// Too many entries to fit next to the two marker bytes.
    #[error("{count} patch offsets do not fit in a {len}-byte patch list")]
    CapacityExceeded { count: usize, len: usize },

    /// Offsets must be strictly increasing.
    #[error("patch offset {0:#x} does not follow its predecessor")]
    Unordered(usize),

    /// A zero value on page 0 cannot name a position.
    #[error("zero entry at byte {0} of the patch list")]
    ZeroEntry(usize),

    /// Raw patch list with the wrong size.
    #[error("patch list is {0} bytes, expected {}", PATCH_LIST_LEN)]
    WrongLength(usize),
}

/// Ordered positions of sentinel collisions in a serialized payload.
///
/// Offsets are 0-based absolute positions and strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOffsets(Vec<usize>);

impl PatchOffsets {
    pub fn new() -> Self {
        PatchOffsets::default()
    }

    /// Wrap an explicit offset list, checking the ordering.
    pub fn from_offsets(offsets: Vec<usize>) -> Result<Self, PatchError> {
        if let Some(pair) = offsets.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(PatchError::Unordered(pair[1]));
        }
        Ok(PatchOffsets(offsets))
    }

    /// Replace every sentinel in `payload` with the marker byte and record
    /// where they were.
    pub fn neutralize(payload: &mut [u8]) -> Self {
        let mut offsets = Vec::new();

        for (offset, b) in payload.iter_mut().enumerate() {
            if *b == SENTINEL {
                *b = PATCH_MARKER;
                offsets.push(offset);
            }
        }

        PatchOffsets(offsets)
    }

    /// Undo [`neutralize`](Self::neutralize): write the sentinel back at
    /// every recorded offset that falls inside `payload`.
    pub fn restore(&self, payload: &mut [u8]) {
        for &offset in &self.0 {
            if let Some(b) = payload.get_mut(offset) {
                *b = SENTINEL;
            }
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build the 190-byte wire form.
    ///
    /// Overflow is reported, never truncated: a list the receiver could
    /// not reconstruct must not be sent.
    pub fn encode(&self) -> Result<PatchListData, PatchError> {
        if self.0.len() + 2 > PATCH_LIST_LEN {
            return Err(PatchError::CapacityExceeded {
                count: self.0.len(),
                len: PATCH_LIST_LEN,
            });
        }

        let mut data = [0u8; PATCH_LIST_LEN];
        let mut pos = 0;
        let mut base = 0;
        let mut prev: Option<usize> = None;

        for &offset in &self.0 {
            if prev.is_some_and(|p| offset <= p) {
                return Err(PatchError::Unordered(offset));
            }
            if offset > MAX_PATCH_OFFSET {
                return Err(PatchError::OffsetOutOfRange {
                    offset,
                    max: MAX_PATCH_OFFSET,
                });
            }

            let position = offset + 1;
            if base == 0 && position >= PATCH_PAGE_SIZE {
                data[pos] = PATCH_MARKER;
                pos += 1;
                base = PATCH_PAGE_SIZE;
            }

            data[pos] = (position - base) as u8;
            pos += 1;
            prev = Some(offset);
        }

        data[pos] = PATCH_MARKER;
        pos += 1;

        // Still on page 0: page 1 is empty and needs its own end marker.
        if base == 0 {
            data[pos] = PATCH_MARKER;
        }

        Ok(PatchListData(data))
    }
}

/// Patch list in its fixed-size wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchListData([u8; PATCH_LIST_LEN]);

impl PatchListData {
    /// Patch list announcing no collisions on either page.
    pub fn empty() -> Self {
        let mut data = [0u8; PATCH_LIST_LEN];
        data[0] = PATCH_MARKER;
        data[1] = PATCH_MARKER;
        PatchListData(data)
    }

    pub fn from_bytes(data: [u8; PATCH_LIST_LEN]) -> Self {
        PatchListData(data)
    }

    pub fn as_bytes(&self) -> &[u8; PATCH_LIST_LEN] {
        &self.0
    }

    /// Read the offsets back out of the wire form.
    pub fn decode(&self) -> Result<PatchOffsets, PatchError> {
        let mut offsets: Vec<usize> = Vec::new();
        let mut base = 0;

        for (pos, &b) in self.0.iter().enumerate() {
            if b == PATCH_MARKER {
                if base == 0 {
                    base = PATCH_PAGE_SIZE;
                    continue;
                }
                break;
            }

            // Page 1 starts one byte early, so 0x00 is valid there.
            if b == 0 && base == 0 {
                return Err(PatchError::ZeroEntry(pos));
            }

            let offset = base + usize::from(b) - 1;
            if offsets.last().is_some_and(|&last| offset <= last) {
                return Err(PatchError::Unordered(offset));
            }
            offsets.push(offset);
        }

        Ok(PatchOffsets(offsets))
    }
}

impl Default for PatchListData {
    fn default() -> Self {
        PatchListData::empty()
    }
}

impl TryFrom<&[u8]> for PatchListData {
    type Error = PatchError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let data: [u8; PATCH_LIST_LEN] = bytes
            .try_into()
            .map_err(|_| PatchError::WrongLength(bytes.len()))?;
        Ok(PatchListData(data))
    }
}
