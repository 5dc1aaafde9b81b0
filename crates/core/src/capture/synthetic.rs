use crate::capture::{CaptureError, Frame, FrameSource};
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

const SYNTHETIC_WIDTH: u32 = 64;
const SYNTHETIC_HEIGHT: u32 = 48;

/// Stand-in for the webcam: emits small generated frames, optionally
/// reporting "nothing ready" every `not_ready_every`-th pull so callers can
/// exercise the skip path.
#[derive(Clone, Debug)]
pub struct SyntheticFrameSource {
    counter: Arc<AtomicU64>,
    not_ready_every: Option<u64>,
}

impl SyntheticFrameSource {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(0)),
            not_ready_every: None,
        }
    }

    pub fn with_not_ready_every(mut self, every: u64) -> Self {
        self.not_ready_every = Some(every);
        self
    }

    fn make_frame(sequence: u64) -> Frame {
        let shade = (sequence % 256) as u8;
        let len = (SYNTHETIC_WIDTH * SYNTHETIC_HEIGHT * 3) as usize;
        Frame {
            sequence,
            captured_at: SystemTime::now(),
            width: SYNTHETIC_WIDTH,
            height: SYNTHETIC_HEIGHT,
            data: Bytes::from(vec![shade; len]),
        }
    }
}

impl Default for SyntheticFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticFrameSource {
    fn next_frame(&self) -> BoxFuture<'_, Result<Option<Frame>, CaptureError>> {
        async move {
            let pull = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(every) = self.not_ready_every {
                if every > 0 && pull % every == 0 {
                    return Ok(None);
                }
            }
            Ok(Some(Self::make_frame(pull)))
        }
        .boxed()
    }
}
