use crate::errors::{BufferPoolError, Result};
use crate::storage::buffer::frame::{Frame, FrameId, FrameState};

/// The clock replacement cursor.
///
/// The hand starts on the last frame so that its first advance lands on
/// frame 0, and it is left on each selected frame so the next search
/// starts just past it.
pub(crate) struct ClockSweep {
    hand: FrameId,
}

impl ClockSweep {
    pub fn new(pool_size: usize) -> Self {
        ClockSweep {
            hand: pool_size - 1,
        }
    }

    /// Advances the hand until it lands on a frame that can receive a new
    /// page: an empty frame, or an unpinned occupied frame that is out of
    /// second chances. Reference bits are cleared as the hand passes, so
    /// one full sweep degrades every frame to its pin count; if a second
    /// sweep still finds nothing, every frame is pinned.
    ///
    /// A selected occupied frame keeps its page, dirty bit, and index
    /// entry. The caller completes the eviction.
    pub fn select(&mut self, frames: &mut [Frame]) -> Result<FrameId> {
        for _ in 0..2 * frames.len() {
            self.hand = (self.hand + 1) % frames.len();

            match frames[self.hand].state_mut() {
                FrameState::Empty => return Ok(self.hand),
                FrameState::Occupied(meta) => {
                    if meta.refbit {
                        meta.refbit = false;
                    } else if meta.pin_count == 0 {
                        return Ok(self.hand);
                    }
                }
            }
        }

        Err(BufferPoolError::BufferExceeded)
    }
}
