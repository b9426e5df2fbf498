use serde::{Deserialize, Serialize};

/// Top-level configuration structure for a game session.
///
/// The observed deployments of the game disagree on the exact timing
/// constants and on whether the reveal is automatic, so all of those knobs
/// live here rather than being baked into the session controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub clip: ClipConfig,
    pub timing: TimingConfig,
    pub trigger: TriggerMode,
    pub reveal: RevealMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clip: ClipConfig::default(),
            timing: TimingConfig::default(),
            trigger: TriggerMode::Flip,
            reveal: RevealMode::Auto,
        }
    }
}

/// Policy for picking the clip window inside a song.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Songs at or below this duration always play from the start.
    pub min_duration_secs: u32,
    /// Lower bound for a randomized start offset.
    pub min_start_secs: u32,
    /// Seconds kept free at the end of the song so the clip never runs out.
    pub tail_margin_secs: u32,
    /// Length of the playback window armed on every trigger and replay.
    pub clip_secs: u32,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: 90,
            min_start_secs: 30,
            tail_margin_secs: 60,
            clip_secs: 30,
        }
    }
}

/// Delays used to let the playback surface settle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Muted warm-up window after loading a video, so duration metadata is
    /// available before the clip offset is drawn.
    pub warmup_delay_ms: u64,
    /// Delay between playback starting and the automatic reveal.
    pub reveal_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warmup_delay_ms: 500,
            reveal_delay_ms: 1000,
        }
    }
}

/// How playback is triggered once a song has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Flipping the device face down starts the clip.
    Flip,
    /// An explicit user action starts the clip.
    Button,
}

/// Whether the answer is revealed automatically after the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealMode {
    Auto,
    Manual,
}
