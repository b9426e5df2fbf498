use crate::surface::SurfaceError;

/// Result alias that carries the custom [`GameError`] type.
pub type Result<T> = std::result::Result<T, GameError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The song catalog could not be read or failed validation. Fatal to
    /// session start; the game cannot run without the catalog.
    #[error("invalid song catalog: {0}")]
    InvalidCatalog(String),
    /// Camera access failed while entering the scanning phase.
    #[error("camera error: {0}")]
    Camera(String),
    /// A decoded payload carried no usable song identifier.
    #[error("no song id in scanned payload `{0}`")]
    UnreadablePayload(String),
    /// The decoded identifier is not present in the catalog.
    #[error("song id {0} not found")]
    SongNotFound(u32),
    /// Error reported by the embedded playback surface.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around catalog deserialization errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        assert_eq!(
            GameError::SongNotFound(9).to_string(),
            "song id 9 not found"
        );
        assert_eq!(
            GameError::Surface(SurfaceError::from_code(100)).to_string(),
            "video is unavailable"
        );
    }

    #[test]
    fn io_and_json_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "songs.json");
        assert!(matches!(GameError::from(io), GameError::Io(_)));

        let json = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        assert!(matches!(GameError::from(json), GameError::Json(_)));
    }
}
