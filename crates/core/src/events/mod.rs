use crate::reveal::RevealCard;
use crate::session::Phase;

/// Identifies a pending timer handed to the host. Tokens are issued by the
/// session in increasing order; the session ignores tokens that no longer
/// match a pending slot, so a timer that was replaced or cancelled can never
/// fire twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Muted settling window after loading a video.
    Warmup,
    /// Delay before the automatic reveal.
    Reveal,
    /// The fixed playback window.
    Stop,
}

/// Events the session emits towards the host (data always owned so
/// listeners never fight lifetimes).
#[derive(Debug, Clone)]
pub enum GameEvent {
    PhaseChanged(Phase),
    /// User-facing status line, replacing whatever was shown before.
    Status(String),
    /// The host should schedule a one-shot timer and deliver the token back
    /// through `GameSession::on_timer` once it elapses.
    TimerArmed {
        token: TimerToken,
        kind: TimerKind,
        millis: u64,
    },
    /// A previously armed timer is void; the host may drop it.
    TimerCancelled(TimerToken),
    /// Short vibration cue, on devices that have a motor.
    HapticPulse { millis: u64 },
    /// The answer for the current round.
    Revealed(RevealCard),
    /// User-facing failure notice.
    Error(String),
}

/// Signature of a registered listener: receives each event by reference.
pub type EventCallback = Box<dyn FnMut(&GameEvent)>;
