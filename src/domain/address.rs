//! Address codec for BCM entry tables.
//!
//! A BCM file is a 16-byte header followed by fixed-size 108-byte entries.
//! Entries reference each other by the file offset of the target entry, so
//! an address is a pure function of the entry's position in the table.

/// File offset of an entry, used as the on-disk inter-entry reference.
pub type Address = u32;

/// Sentinel meaning "no entry" in `parent`, `sibling`, `child` and `root`.
pub const NO_ADDRESS: Address = 0;

/// Size of the BCM file header preceding the entry table.
pub const HEADER_SIZE: u32 = 0x10;

/// Size of one serialized entry.
pub const ENTRY_SIZE: u32 = 0x6C;

/// Address of the entry at pre-order position `index`.
pub fn index_to_address(index: usize) -> Address {
    HEADER_SIZE + ENTRY_SIZE * index as u32
}

/// Pre-order position of the entry at `address`.
///
/// Returns `None` for [`NO_ADDRESS`] and for offsets that do not land on an
/// entry boundary.
pub fn address_to_index(address: Address) -> Option<usize> {
    let offset = address.checked_sub(HEADER_SIZE)?;
    if offset % ENTRY_SIZE != 0 {
        return None;
    }
    Some((offset / ENTRY_SIZE) as usize)
}
