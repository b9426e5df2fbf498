use crate::Result;

/// Coarse states reported by an embedded video surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Unstarted,
    Cued,
    Buffering,
    Playing,
    Paused,
    Ended,
}

/// Remote playback capability the session controls.
///
/// Loading is asynchronous on real surfaces: duration metadata only becomes
/// available some time after [`load`](PlaybackSurface::load), which is why
/// the session waits out a warm-up delay before asking for it. Errors arrive
/// out of band through [`SurfaceError`] codes.
pub trait PlaybackSurface {
    fn load(&mut self, video_id: &str);
    fn mute(&mut self);
    fn unmute(&mut self);
    fn seek_to(&mut self, secs: u32);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Total duration of the loaded video, once known.
    fn duration_secs(&self) -> Option<u32>;
    fn state(&self) -> SurfaceState;
}

/// Camera-backed scan input. Decoded payloads are delivered by the host to
/// the session; this trait only covers the start/stop lifecycle.
pub trait ScanInput {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
}

/// Error reported by the playback surface, keyed by its numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// Code 100: the referenced video no longer exists.
    #[error("video is unavailable")]
    ContentUnavailable,
    /// Codes 101 and 150: the owner disallows embedded playback.
    #[error("embedding disabled by the video owner")]
    EmbeddingDisabled,
    #[error("playback surface error code {0}")]
    Unknown(u16),
}

impl SurfaceError {
    pub fn from_code(code: u16) -> Self {
        match code {
            100 => SurfaceError::ContentUnavailable,
            101 | 150 => SurfaceError::EmbeddingDisabled,
            other => SurfaceError::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_error_codes() {
        assert_eq!(SurfaceError::from_code(100), SurfaceError::ContentUnavailable);
        assert_eq!(SurfaceError::from_code(101), SurfaceError::EmbeddingDisabled);
        assert_eq!(SurfaceError::from_code(150), SurfaceError::EmbeddingDisabled);
        assert_eq!(SurfaceError::from_code(2), SurfaceError::Unknown(2));
    }
}
