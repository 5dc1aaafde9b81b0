mod synthetic;

use bytes::Bytes;
use futures::future::BoxFuture;
use std::time::SystemTime;

pub use synthetic::SyntheticFrameSource;

/// One captured camera image. The core never looks at the pixels; the payload
/// is handed through to the classifier untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub sequence: u64,
    pub captured_at: SystemTime,
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("camera unavailable: {details}")]
    CameraUnavailable { details: String },
}

pub trait FrameSource: Send + Sync {
    /// Latest frame if one is ready, `Ok(None)` when the camera has nothing
    /// yet. Callable at arbitrary cadence.
    fn next_frame(&self) -> BoxFuture<'_, Result<Option<Frame>, CaptureError>>;
}
