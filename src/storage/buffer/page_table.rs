use std::collections::HashMap;
use std::rc::Rc;

use crate::storage::buffer::frame::FrameId;
use crate::storage::PageId;

/// The page index: maps (file identity, page number) to the frame holding
/// that page. Files are keyed by canonical filename, never by handle, so
/// two handles opened on the same path resolve to the same entries.
pub(crate) struct PageTable {
    entries: HashMap<(Rc<str>, PageId), FrameId>,
}

impl PageTable {
    /// The map starts with room for the smallest odd number of entries at
    /// least 1.2x the frame count, which keeps collision chains short.
    pub fn with_pool_size(pool_size: usize) -> Self {
        PageTable {
            entries: HashMap::with_capacity(table_capacity(pool_size)),
        }
    }

    pub fn lookup(&self, file: &Rc<str>, page_no: PageId) -> Option<FrameId> {
        self.entries.get(&(Rc::clone(file), page_no)).copied()
    }

    pub fn insert(&mut self, file: Rc<str>, page_no: PageId, frame_id: FrameId) {
        self.entries.insert((file, page_no), frame_id);
    }

    pub fn remove(&mut self, file: &Rc<str>, page_no: PageId) -> Option<FrameId> {
        self.entries.remove(&(Rc::clone(file), page_no))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn table_capacity(pool_size: usize) -> usize {
    let size = (pool_size * 6 + 4) / 5;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}
