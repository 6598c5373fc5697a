use crate::macros::static_assert;

/// The size (in bytes) of a page, both on disk and in a pool frame
pub const PAGE_SIZE: usize = 4096;

/// The number of frames a `Database` buffer pool holds unless told otherwise.
/// More frames cache more pages before the clock starts evicting, at the
/// cost of memory.
pub const DEFAULT_POOL_SIZE: usize = 64;

static_assert!(PAGE_SIZE % 8 == 0);
static_assert!(DEFAULT_POOL_SIZE >= 1);
