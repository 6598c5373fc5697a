use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::errors::{BufferPoolError, Result};
use crate::storage::buffer::clock::ClockSweep;
use crate::storage::buffer::frame::{Frame, FrameId, FrameState};
use crate::storage::buffer::page_table::PageTable;
use crate::storage::disk::disk_manager::FileHandle;
use crate::storage::PageId;

/// # Design principles
///
/// - The pool owns every frame. Callers address page bytes through the
///   frame id returned by [BufferPool::read_page]/[BufferPool::alloc_page]
///   and `pool[id]`, not through references held across calls.
/// - The pin is the lifetime token: a frame id stays valid until the
///   matching [BufferPool::unpin_page] drops the pin count to zero, after
///   which the frame may be reused for another page at any time.
/// - All operations are synchronous and take `&mut self`; callers
///   serialize access.
pub struct BufferPool {
    frames: Vec<Frame>,
    page_table: PageTable,
    clock: ClockSweep,
}

impl BufferPool {
    /// Creates a buffer pool with the given number of frames.
    pub fn new(pool_size: usize) -> Self {
        assert!(pool_size >= 1, "a buffer pool needs at least one frame");

        BufferPool {
            frames: (0..pool_size).map(Frame::new).collect(),
            page_table: PageTable::with_pool_size(pool_size),
            clock: ClockSweep::new(pool_size),
        }
    }

    /// Pins the named page and returns the frame holding it, reading it
    /// from the file if it is not already resident.
    pub fn read_page(&mut self, file: &FileHandle, page_no: PageId) -> Result<FrameId> {
        let name = file.borrow().filename();

        if let Some(frame_id) = self.resident(&name, page_no)? {
            if let FrameState::Occupied(meta) = self.frames[frame_id].state_mut() {
                meta.pin_count += 1;
                meta.refbit = true;
            }
            return Ok(frame_id);
        }

        let frame_id = self.alloc_frame()?;
        let frame = &mut self.frames[frame_id];
        file.borrow_mut().read_page(page_no, frame.data_mut())?;
        frame.set(Rc::clone(file), page_no);
        self.page_table.insert(Rc::clone(&name), page_no, frame_id);

        log::trace!("page {} of {} loaded into frame {}", page_no, name, frame_id);
        Ok(frame_id)
    }

    /// Allocates a new page in the file and pins it in a fresh frame.
    /// Returns the page number the file assigned along with the frame.
    pub fn alloc_page(&mut self, file: &FileHandle) -> Result<(PageId, FrameId)> {
        let frame_id = self.alloc_frame()?;
        let page_no = file.borrow_mut().allocate_page()?;

        let frame = &mut self.frames[frame_id];
        frame.data_mut().fill(0);
        frame.set(Rc::clone(file), page_no);

        let name = file.borrow().filename();
        self.page_table.insert(name, page_no, frame_id);
        Ok((page_no, frame_id))
    }

    /// Releases one pin on the named page. Unpinning a page that is not
    /// resident is a no-op, so the call is idempotent once the page is
    /// gone. The dirty flag is one-way: `dirty = false` never cleans a
    /// frame that was already marked.
    pub fn unpin_page(&mut self, file: &FileHandle, page_no: PageId, dirty: bool) -> Result<()> {
        let name = file.borrow().filename();

        let frame_id = match self.resident(&name, page_no)? {
            Some(frame_id) => frame_id,
            None => return Ok(()),
        };

        if let FrameState::Occupied(meta) = self.frames[frame_id].state_mut() {
            if meta.pin_count == 0 {
                return Err(BufferPoolError::PageNotPinned {
                    file: name.to_string(),
                    page_no,
                    frame_no: frame_id,
                });
            }
            meta.pin_count -= 1;
            if dirty {
                meta.dirty = true;
            }
        }
        Ok(())
    }

    /// Writes back every dirty resident page of the file, then drops all
    /// of the file's pages from the pool. Fails with [PagePinned] before
    /// touching anything if any of them is still pinned.
    ///
    /// [PagePinned]: BufferPoolError::PagePinned
    pub fn flush_file(&mut self, file: &FileHandle) -> Result<()> {
        let name = file.borrow().filename();

        for frame in self.frames.iter() {
            if let Some(meta) = frame.meta() {
                if meta.filename() == name && meta.pin_count > 0 {
                    return Err(BufferPoolError::PagePinned {
                        file: name.to_string(),
                        page_no: meta.page_no,
                        frame_no: frame.frame_no(),
                    });
                }
            }
        }

        let mut flushed = 0;
        for frame_id in 0..self.frames.len() {
            let page_no = match self.frames[frame_id].meta() {
                Some(meta) if meta.filename() == name => meta.page_no,
                _ => continue,
            };

            self.frames[frame_id].write_back()?;
            if self.page_table.remove(&name, page_no).is_none() {
                return Err(BufferPoolError::BadBuffer { frame_no: frame_id });
            }
            self.frames[frame_id].clear();
            flushed += 1;
        }

        log::debug!("flushed {} pages of {}", flushed, name);
        Ok(())
    }

    /// Removes the page from the pool (without writing it back) and
    /// deletes it from the file. Disposing a page that is not resident,
    /// or was already deleted, is a no-op.
    pub fn dispose_page(&mut self, file: &FileHandle, page_no: PageId) -> Result<()> {
        let name = file.borrow().filename();

        match self.resident(&name, page_no)? {
            Some(frame_id) => {
                self.frames[frame_id].clear();
                self.page_table.remove(&name, page_no);
            }
            None => log::trace!("page {} of {} is not resident", page_no, name),
        }

        file.borrow_mut().delete_page(page_no)?;
        Ok(())
    }

    /// Returns the number of occupied frames in O(n)
    pub fn len(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.meta().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    /// Logs every frame plus the occupied total at debug level. Frame
    /// state is not touched.
    pub fn debug_dump(&self) {
        for frame in self.frames.iter() {
            log::debug!("{}", frame);
        }
        log::debug!("total occupied frames: {}", self.len());
    }

    /// Produces an empty frame, completing the eviction of the clock's
    /// victim if it selected an occupied one: the page is written back if
    /// dirty (that single page only), unmapped, and the frame cleared.
    fn alloc_frame(&mut self) -> Result<FrameId> {
        let frame_id = self.clock.select(&mut self.frames)?;

        let evicted = self.frames[frame_id]
            .meta()
            .map(|meta| (meta.filename(), meta.page_no));
        if let Some((name, page_no)) = evicted {
            self.frames[frame_id].write_back()?;
            self.page_table.remove(&name, page_no);
            self.frames[frame_id].clear();
            log::debug!("evicted page {} of {} from frame {}", page_no, name, frame_id);
        }

        Ok(frame_id)
    }

    /// Resolves a page through the page table, cross-checking that the
    /// frame it names actually holds the page.
    fn resident(&self, name: &Rc<str>, page_no: PageId) -> Result<Option<FrameId>> {
        let frame_id = match self.page_table.lookup(name, page_no) {
            Some(frame_id) => frame_id,
            None => return Ok(None),
        };

        match self.frames[frame_id].meta() {
            Some(meta) if meta.filename() == *name && meta.page_no == page_no => {
                Ok(Some(frame_id))
            }
            _ => Err(BufferPoolError::BadBuffer { frame_no: frame_id }),
        }
    }
}

impl Index<FrameId> for BufferPool {
    type Output = [u8];

    fn index(&self, frame_id: FrameId) -> &[u8] {
        self.frames[frame_id].data()
    }
}

impl IndexMut<FrameId> for BufferPool {
    fn index_mut(&mut self, frame_id: FrameId) -> &mut [u8] {
        self.frames[frame_id].data_mut()
    }
}
