//! Core library for the QR song-quiz party game.
//!
//! The crate is built around a single component: the game session
//! controller in [`session`], a finite-state machine over the scan → load →
//! play → reveal round lifecycle. The remaining modules are its
//! collaborators: the song [`catalog`], the clip-offset policy in [`clip`],
//! answer formatting in [`reveal`], orientation capability handling, the
//! playback-surface abstraction and the offline asset cache.

pub mod cache;
pub mod catalog;
pub mod clip;
pub mod config;
pub mod error;
pub mod events;
pub mod orientation;
pub mod reveal;
pub mod session;
pub mod surface;

pub use cache::{AssetCache, AssetFetcher, DEFAULT_MANIFEST};
pub use catalog::{parse_scan_payload, Catalog, CatalogIssue, Song};
pub use clip::choose_start_offset;
pub use config::{ClipConfig, GameConfig, RevealMode, TimingConfig, TriggerMode};
pub use error::{GameError, Result};
pub use events::{EventCallback, GameEvent, TimerKind, TimerToken};
pub use orientation::{is_face_down, probe_support, OrientationSupport, PermissionGate};
pub use reveal::{split_release_date, RevealCard};
pub use session::{GameSession, Phase};
pub use surface::{PlaybackSurface, ScanInput, SurfaceError, SurfaceState};
