use std::error::Error;

use crate::storage::buffer::frame::FrameId;
use crate::storage::PageId;

/// Result type for buffer pool operations that can fail with [BufferPoolError]
pub type Result<T> = std::result::Result<T, BufferPoolError>;

#[derive(Debug)]
pub enum BufferPoolError {
    /// The clock sweep found every frame pinned; nothing can be evicted.
    BufferExceeded,
    /// An unpin was requested for a resident page with no outstanding pins.
    PageNotPinned {
        file: String,
        page_no: PageId,
        frame_no: FrameId,
    },
    /// A file flush was requested while one of its pages is still pinned.
    PagePinned {
        file: String,
        page_no: PageId,
        frame_no: FrameId,
    },
    /// The page table and the frame table disagree. This means the pool's
    /// internal state is corrupted.
    BadBuffer { frame_no: FrameId },
    /// Derived error from the underlying paged file
    Io(std::io::Error),
}

impl std::fmt::Display for BufferPoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferPoolError::BufferExceeded => {
                write!(f, "Buffer pool exceeded: all frames are pinned")
            }
            BufferPoolError::PageNotPinned {
                file,
                page_no,
                frame_no,
            } => write!(
                f,
                "Page {} of {} (frame {}) is not pinned",
                page_no, file, frame_no
            ),
            BufferPoolError::PagePinned {
                file,
                page_no,
                frame_no,
            } => write!(
                f,
                "Page {} of {} (frame {}) is still pinned",
                page_no, file, frame_no
            ),
            BufferPoolError::BadBuffer { frame_no } => {
                write!(f, "Frame {} does not match the page table", frame_no)
            }
            BufferPoolError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::convert::From<std::io::Error> for BufferPoolError {
    fn from(err: std::io::Error) -> Self {
        BufferPoolError::Io(err)
    }
}

impl Error for BufferPoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BufferPoolError::Io(err) => Some(err),
            _ => None,
        }
    }
}
