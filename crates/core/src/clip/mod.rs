use rand::Rng;

use crate::config::ClipConfig;

/// Picks the start offset, in seconds, for a freshly scanned song.
///
/// Short songs play from the beginning. Anything longer than the configured
/// minimum gets a uniform random offset inside
/// `[min_start_secs, duration - tail_margin_secs]`, so the clip never starts
/// in the intro and never runs past the end of the song. The caller stores
/// the result; replays reuse it rather than drawing again.
pub fn choose_start_offset<R: Rng + ?Sized>(
    duration_secs: u32,
    config: &ClipConfig,
    rng: &mut R,
) -> u32 {
    if duration_secs <= config.min_duration_secs {
        return 0;
    }

    let max_start = duration_secs.saturating_sub(config.tail_margin_secs);
    if max_start < config.min_start_secs {
        return 0;
    }

    rng.random_range(config.min_start_secs..=max_start)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn short_songs_start_at_zero() {
        let config = ClipConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        for duration in [0, 10, 45, 89, 90] {
            assert_eq!(choose_start_offset(duration, &config, &mut rng), 0);
        }
    }

    #[test]
    fn long_songs_stay_inside_the_window() {
        let config = ClipConfig::default();
        let mut rng = StdRng::seed_from_u64(2);

        for duration in [91, 120, 187, 240, 600] {
            for _ in 0..200 {
                let offset = choose_start_offset(duration, &config, &mut rng);
                assert!(offset >= config.min_start_secs, "offset {offset} too low");
                assert!(
                    offset <= duration - config.tail_margin_secs,
                    "offset {offset} too high for duration {duration}"
                );
            }
        }
    }

    #[test]
    fn degenerate_window_falls_back_to_zero() {
        // A threshold lower than min_start + tail_margin can produce an empty
        // window for durations just over the threshold.
        let config = ClipConfig {
            min_duration_secs: 70,
            min_start_secs: 30,
            tail_margin_secs: 60,
            clip_secs: 30,
        };
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(choose_start_offset(75, &config, &mut rng), 0);
    }

    #[test]
    fn variant_threshold_is_respected() {
        let config = ClipConfig {
            min_duration_secs: 110,
            min_start_secs: 50,
            tail_margin_secs: 60,
            clip_secs: 30,
        };
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(choose_start_offset(110, &config, &mut rng), 0);
        let offset = choose_start_offset(180, &config, &mut rng);
        assert!((50..=120).contains(&offset));
    }
}
