// =============================================================================
// throttle.rs — THE COURTESY DELAY
// =============================================================================
//
// A random pause before every network call. This is not a correctness
// mechanism, a scheduler, or a token bucket — it's table manners. We are
// unauthenticated guests on public directory websites, and guests who knock
// at machine-precise intervals tend to get the door closed on them.
//
// The pause is uniform over a configured [min, max] window. Randomized
// because a jittered visitor reads as a human on a slow afternoon; a
// metronome reads as exactly what we are.
// =============================================================================

use rand::Rng;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;

/// Sleep for a random interval inside the configured courtesy window.
pub async fn courtesy_pause(config: &Config) {
    let delay = pick_delay(config.delay_min, config.delay_max);
    debug!(millis = delay.as_millis() as u64, "courtesy pause before request");
    tokio::time::sleep(delay).await;
}

/// Choose a uniformly random duration in [min, max]. A misconfigured
/// window (min > max) collapses to min rather than panicking mid-run.
pub fn pick_delay(min: Duration, max: Duration) -> Duration {
    let lo = min.as_millis() as u64;
    let hi = max.as_millis() as u64;
    if lo >= hi {
        return min;
    }
    Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_inside_the_window() {
        let min = Duration::from_millis(200);
        let max = Duration::from_millis(900);
        for _ in 0..100 {
            let d = pick_delay(min, max);
            assert!(d >= min && d <= max, "picked {:?}", d);
        }
    }

    #[test]
    fn degenerate_window_collapses_to_min() {
        let d = pick_delay(Duration::from_secs(3), Duration::from_secs(3));
        assert_eq!(d, Duration::from_secs(3));

        let d = pick_delay(Duration::from_secs(5), Duration::from_secs(2));
        assert_eq!(d, Duration::from_secs(5));
    }
}
