//! Interactive driver that stands in for the browser host: a fake camera, a
//! fake embedded player and a real-time timer queue, wired to a
//! [`GameSession`] through its event stream.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use song_quiz_core::{
    probe_support, Catalog, GameConfig, GameEvent, GameSession, OrientationSupport, Phase,
    PlaybackSurface, Result, ScanInput, SurfaceState, TimerToken,
};

const HELP: &str = "commands: scan <payload> | flip [beta] | play | reveal | replay | reset | wait | quit";

pub fn run(catalog: Catalog, config: GameConfig, seed: Option<u64>) -> Result<()> {
    match probe_support(true, None) {
        OrientationSupport::Supported => tracing::debug!("orientation events available"),
        support => tracing::warn!(?support, "flip trigger will not work"),
    }

    let timers = Rc::new(RefCell::new(TimerQueue::default()));
    let mut session = match seed {
        Some(seed) => GameSession::with_seed(config, SimScanner::default(), SimSurface::default(), seed),
        None => GameSession::new(config, SimScanner::default(), SimSurface::default()),
    };

    let queue = timers.clone();
    session.subscribe(Box::new(move |event| match event {
        GameEvent::TimerArmed { token, kind, millis } => {
            tracing::debug!(?kind, millis, "timer armed");
            queue.borrow_mut().arm(*token, Duration::from_millis(*millis));
        }
        GameEvent::TimerCancelled(token) => queue.borrow_mut().cancel(*token),
        GameEvent::PhaseChanged(phase) => tracing::debug!(?phase, "phase changed"),
        GameEvent::Status(text) => println!("[{text}]"),
        GameEvent::HapticPulse { millis } => tracing::debug!(millis, "haptic pulse"),
        GameEvent::Revealed(card) => {
            println!(">> {} - {} ({} {})", card.artist, card.title, card.month, card.year);
        }
        GameEvent::Error(message) => println!("!! {message}"),
    }));

    println!("{HELP}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let due = timers.borrow_mut().take_due(Instant::now());
        for token in due {
            session.on_timer(token);
        }

        print!("{}> ", prompt(session.phase()));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("scan") => match parts.next() {
                Some(payload) => {
                    if session.begin_scan().is_ok() {
                        let _ = session.on_scan_result(payload, &catalog);
                    }
                }
                None => println!("usage: scan <payload>, e.g. `scan Id=7`"),
            },
            Some("flip") => {
                let beta = parts
                    .next()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(180.0);
                session.on_orientation(beta);
            }
            Some("play") => session.trigger_playback(),
            Some("reveal") => session.reveal(),
            Some("replay") => session.replay(),
            Some("reset") => session.reset(),
            Some("wait") => {
                let deadline = timers.borrow().next_deadline();
                match deadline {
                    Some(deadline) => {
                        let now = Instant::now();
                        if deadline > now {
                            std::thread::sleep(deadline - now);
                        }
                    }
                    None => println!("nothing pending"),
                }
            }
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command `{other}`; {HELP}"),
            None => {}
        }
    }

    Ok(())
}

fn prompt(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Scanning => "scanning",
        Phase::Loaded => "loaded",
        Phase::Playing => "playing",
        Phase::Revealed => "revealed",
    }
}

/// One-shot timers keyed by session tokens, fired when their deadline passes.
#[derive(Debug, Default)]
struct TimerQueue {
    pending: Vec<(Instant, TimerToken)>,
}

impl TimerQueue {
    fn arm(&mut self, token: TimerToken, delay: Duration) {
        self.pending.push((Instant::now() + delay, token));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|(_, pending)| *pending != token);
    }

    fn take_due(&mut self, now: Instant) -> Vec<TimerToken> {
        let mut due: Vec<(Instant, TimerToken)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, token)| token).collect()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }
}

/// Camera stand-in: always grants access, logs its lifecycle.
#[derive(Debug, Default)]
struct SimScanner {
    active: bool,
}

impl ScanInput for SimScanner {
    fn start(&mut self) -> Result<()> {
        self.active = true;
        tracing::info!("camera running, enter `scan <payload>` to decode a card");
        Ok(())
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            tracing::debug!("camera stopped");
        }
    }
}

/// Embedded-player stand-in with deterministic pseudo-durations so clip
/// offsets behave like they would against real videos.
#[derive(Debug, Default)]
struct SimSurface {
    video: Option<String>,
    muted: bool,
    position: u32,
    state: SurfaceState,
}

impl PlaybackSurface for SimSurface {
    fn load(&mut self, video_id: &str) {
        self.video = Some(video_id.to_string());
        self.position = 0;
        self.state = SurfaceState::Cued;
        tracing::info!(video_id, "video cued");
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn seek_to(&mut self, secs: u32) {
        self.position = secs;
        tracing::info!(secs, "seek");
    }

    fn play(&mut self) {
        self.state = SurfaceState::Playing;
        tracing::info!(position = self.position, muted = self.muted, "playing");
    }

    fn pause(&mut self) {
        self.state = SurfaceState::Paused;
        tracing::debug!("paused");
    }

    fn stop(&mut self) {
        if self.state == SurfaceState::Playing {
            tracing::info!("stopped");
        }
        self.state = SurfaceState::Ended;
    }

    fn duration_secs(&self) -> Option<u32> {
        self.video.as_deref().map(pseudo_duration)
    }

    fn state(&self) -> SurfaceState {
        self.state
    }
}

/// Stable fake duration in `[90, 300)` derived from the video reference.
fn pseudo_duration(video_id: &str) -> u32 {
    90 + video_id.bytes().map(u32::from).sum::<u32>() % 210
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_queue_fires_in_deadline_order() {
        let mut queue = TimerQueue::default();
        let now = Instant::now();
        queue.pending.push((now, TimerToken(2)));
        queue.pending.push((now - Duration::from_millis(5), TimerToken(1)));
        queue.pending.push((now + Duration::from_secs(60), TimerToken(3)));

        let due = queue.take_due(now);
        assert_eq!(due, vec![TimerToken(1), TimerToken(2)]);
        assert_eq!(queue.next_deadline(), Some(now + Duration::from_secs(60)));
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut queue = TimerQueue::default();
        queue.arm(TimerToken(1), Duration::ZERO);
        queue.cancel(TimerToken(1));
        assert!(queue
            .take_due(Instant::now() + Duration::from_secs(1))
            .is_empty());
    }

    #[test]
    fn pseudo_durations_are_stable() {
        assert_eq!(pseudo_duration("abc"), pseudo_duration("abc"));
        let duration = pseudo_duration("FTQbiNvZqaY");
        assert!((90..300).contains(&duration));
    }
}
