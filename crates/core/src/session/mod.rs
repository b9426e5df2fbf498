use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{parse_scan_payload, Catalog, Song};
use crate::clip::choose_start_offset;
use crate::config::{GameConfig, RevealMode, TriggerMode};
use crate::events::{EventCallback, GameEvent, TimerKind, TimerToken};
use crate::orientation::is_face_down;
use crate::reveal::RevealCard;
use crate::surface::{PlaybackSurface, ScanInput, SurfaceError, SurfaceState};
use crate::{GameError, Result};

/// Phase of the game session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scanning,
    /// A song is loaded and the session waits for the trigger.
    Loaded,
    Playing,
    Revealed,
}

pub const STATUS_READY: &str = "Ready to Play";
pub const STATUS_SCAN: &str = "Scan a QR Code";
pub const STATUS_FLIP: &str = "Flip Phone Face Down to Play!";
pub const STATUS_PRESS: &str = "Press Play When Ready";
pub const STATUS_PLAYING: &str = "Playing...";
pub const STATUS_REPLAYING: &str = "Replaying...";
pub const STATUS_FINISHED: &str = "Finished";

const HAPTIC_PULSE_MS: u64 = 200;

/// The one mutable domain object of the game: a single-writer controller
/// over the scan → load → play → reveal lifecycle.
///
/// The session owns its collaborators but no wall-clock timers. Timers are
/// requested through [`GameEvent::TimerArmed`] and delivered back via
/// [`on_timer`](GameSession::on_timer); tokens that were replaced or
/// cancelled in the meantime are ignored, so at most one stop timer is ever
/// live.
pub struct GameSession<S, P> {
    config: GameConfig,
    scanner: S,
    surface: P,
    phase: Phase,
    song: Option<Song>,
    clip_start: Option<u32>,
    warmup_timer: Option<TimerToken>,
    reveal_timer: Option<TimerToken>,
    stop_timer: Option<TimerToken>,
    next_token: u64,
    revealed: bool,
    rng: StdRng,
    listeners: Vec<EventCallback>,
}

impl<S: ScanInput, P: PlaybackSurface> GameSession<S, P> {
    pub fn new(config: GameConfig, scanner: S, surface: P) -> Self {
        Self::with_rng(config, scanner, surface, StdRng::from_os_rng())
    }

    /// Deterministic constructor for tests and reproducible demo runs.
    pub fn with_seed(config: GameConfig, scanner: S, surface: P, seed: u64) -> Self {
        Self::with_rng(config, scanner, surface, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, scanner: S, surface: P, rng: StdRng) -> Self {
        Self {
            config,
            scanner,
            surface,
            phase: Phase::Idle,
            song: None,
            clip_start: None,
            warmup_timer: None,
            reveal_timer: None,
            stop_timer: None,
            next_token: 0,
            revealed: false,
            rng,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for everything the session emits.
    pub fn subscribe(&mut self, listener: EventCallback) {
        self.listeners.push(listener);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Clip start offset for the current song, once computed.
    pub fn clip_start(&self) -> Option<u32> {
        self.clip_start
    }

    /// Starts a new scan cycle: resets the session, then acquires the
    /// camera. A camera failure releases it again, surfaces the error and
    /// leaves the session Idle.
    pub fn begin_scan(&mut self) -> Result<()> {
        self.reset();
        self.set_phase(Phase::Scanning);
        self.emit_status(STATUS_SCAN);

        if let Err(err) = self.scanner.start() {
            self.scanner.stop();
            self.emit(GameEvent::Error(err.to_string()));
            self.reset();
            return Err(err);
        }
        Ok(())
    }

    /// Handles a decoded payload from the scan input. Only meaningful while
    /// Scanning; stray late callbacks are ignored. The camera is released
    /// before anything else happens, on every path.
    pub fn on_scan_result(&mut self, text: &str, catalog: &Catalog) -> Result<()> {
        if self.phase != Phase::Scanning {
            return Ok(());
        }
        self.scanner.stop();

        let Some(id) = parse_scan_payload(text) else {
            return self.fail_scan(GameError::UnreadablePayload(text.to_string()));
        };
        let Some(song) = catalog.get(id).cloned() else {
            return self.fail_scan(GameError::SongNotFound(id));
        };

        let video_id = song.video_id.clone();
        self.song = Some(song);
        self.set_phase(Phase::Loaded);
        self.emit_status(match self.config.trigger {
            TriggerMode::Flip => STATUS_FLIP,
            TriggerMode::Button => STATUS_PRESS,
        });

        // Warm the surface up muted so duration metadata is ready before the
        // clip offset gets drawn.
        self.surface.mute();
        self.surface.load(&video_id);
        let warmup = self.arm(TimerKind::Warmup, self.config.timing.warmup_delay_ms);
        self.warmup_timer = Some(warmup);
        Ok(())
    }

    fn fail_scan(&mut self, err: GameError) -> Result<()> {
        self.emit(GameEvent::Error(err.to_string()));
        self.reset();
        Err(err)
    }

    /// Delivers an expired timer. Stale tokens fall through silently.
    pub fn on_timer(&mut self, token: TimerToken) {
        if self.warmup_timer == Some(token) {
            self.warmup_timer = None;
            self.finish_warmup();
        } else if self.reveal_timer == Some(token) {
            self.reveal_timer = None;
            self.reveal();
        } else if self.stop_timer == Some(token) {
            self.stop_timer = None;
            self.finish_clip();
        }
    }

    fn finish_warmup(&mut self) {
        if self.phase != Phase::Loaded {
            return;
        }
        self.surface.pause();
        self.surface.unmute();
        self.ensure_clip_start();
    }

    /// Computes the clip start offset exactly once per scanned song.
    fn ensure_clip_start(&mut self) -> u32 {
        if let Some(offset) = self.clip_start {
            return offset;
        }
        let duration = self.surface.duration_secs().unwrap_or(0);
        let offset = choose_start_offset(duration, &self.config.clip, &mut self.rng);
        self.clip_start = Some(offset);
        offset
    }

    /// Feeds a device-orientation sample. Ignored unless the session is
    /// waiting for a flip trigger.
    pub fn on_orientation(&mut self, beta_degrees: f64) {
        if self.phase != Phase::Loaded || self.config.trigger != TriggerMode::Flip {
            return;
        }
        if is_face_down(beta_degrees) {
            self.trigger_playback();
        }
    }

    /// Starts the clip: unmute, seek to the stored offset, play, haptic cue,
    /// arm the stop timer. Idempotent against repeated trigger signals while
    /// already playing.
    pub fn trigger_playback(&mut self) {
        if self.phase != Phase::Loaded {
            return;
        }

        let offset = self.ensure_clip_start();
        self.emit_status(STATUS_PLAYING);
        self.emit(GameEvent::HapticPulse {
            millis: HAPTIC_PULSE_MS,
        });

        self.surface.unmute();
        self.surface.seek_to(offset);
        self.surface.play();
        self.arm_stop_timer();

        if self.config.reveal == RevealMode::Auto {
            let token = self.arm(TimerKind::Reveal, self.config.timing.reveal_delay_ms);
            self.reveal_timer = Some(token);
        }

        self.set_phase(Phase::Playing);
    }

    /// Surfaces the answer for the current round. Idempotent; only valid
    /// once playback has started.
    pub fn reveal(&mut self) {
        if self.revealed || self.phase != Phase::Playing {
            return;
        }
        let Some(song) = self.song.as_ref() else {
            return;
        };

        let card = RevealCard::for_song(song);
        self.revealed = true;
        self.set_phase(Phase::Revealed);
        self.emit(GameEvent::Revealed(card));
    }

    /// Plays the same clip again from the stored offset with a fresh stop
    /// timer. Never re-randomizes.
    pub fn replay(&mut self) {
        if !matches!(self.phase, Phase::Playing | Phase::Revealed) {
            return;
        }
        let Some(offset) = self.clip_start else {
            return;
        };

        self.emit_status(STATUS_REPLAYING);
        self.surface.seek_to(offset);
        self.surface.play();
        self.arm_stop_timer();
        self.set_phase(Phase::Playing);
    }

    fn arm_stop_timer(&mut self) {
        if let Some(previous) = self.stop_timer.take() {
            self.emit(GameEvent::TimerCancelled(previous));
        }
        let millis = u64::from(self.config.clip.clip_secs) * 1000;
        let token = self.arm(TimerKind::Stop, millis);
        self.stop_timer = Some(token);
    }

    fn finish_clip(&mut self) {
        // The surface may have run out on its own before the window closed.
        if self.surface.state() == SurfaceState::Playing {
            self.surface.stop();
        }
        // Leave the status alone once the answer is up.
        if !self.revealed {
            self.emit_status(STATUS_FINISHED);
        }
    }

    /// Handles an asynchronous error code from the playback surface. Both
    /// known failure modes force a full reset.
    pub fn on_surface_error(&mut self, code: u16) {
        let err = SurfaceError::from_code(code);
        self.emit(GameEvent::Error(err.to_string()));
        self.reset();
    }

    /// Returns the session to its Idle baseline: timers cancelled, playback
    /// stopped, song cleared.
    pub fn reset(&mut self) {
        for token in [
            self.warmup_timer.take(),
            self.reveal_timer.take(),
            self.stop_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.emit(GameEvent::TimerCancelled(token));
        }

        if self.song.is_some() {
            self.surface.stop();
        }
        self.song = None;
        self.clip_start = None;
        self.revealed = false;
        self.set_phase(Phase::Idle);
        self.emit_status(STATUS_READY);
    }

    fn arm(&mut self, kind: TimerKind, millis: u64) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.emit(GameEvent::TimerArmed {
            token,
            kind,
            millis,
        });
        token
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    fn emit_status(&mut self, text: &str) {
        self.emit(GameEvent::Status(text.to_string()));
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
