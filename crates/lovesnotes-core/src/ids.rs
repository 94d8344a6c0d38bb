//! Note identifiers.
//!
//! Notes are keyed by UUIDv7, which embeds the creation time in its first
//! 48 bits. Sorting by id therefore follows insertion order, which is the
//! order `list` returns.

use uuid::Uuid;

/// Generate a fresh note id.
#[inline]
pub fn new_note_id() -> Uuid {
    Uuid::now_v7()
}

/// Parse a note id taken from a request path.
///
/// Returns `None` for anything that is not a well-formed UUID. Such a value
/// cannot name a stored note, so callers report it as not found.
pub fn parse_note_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Check if a UUID is version 7.
#[inline]
pub fn is_v7(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 7
}
