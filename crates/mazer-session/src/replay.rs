//! Timed playback of a finished search.
//!
//! A [`Replay`] turns a [`Search`] into a timeline of [`ReplayStep`]s: the
//! explored cells first, half a base delay apart, then the path cells one
//! base delay apart. The caller drives it with elapsed time and applies the
//! events it hands back.

use std::time::Duration;

use mazer_core::{MAX_SPEED, MIN_SPEED, Point};
use mazer_paths::Search;

/// Something that becomes due during a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "at", rename_all = "snake_case"))]
pub enum ReplayEvent {
    /// Explored cell; marked Visited if it is still Empty.
    Visit(Point),
    /// Cell on the final path.
    Path(Point),
    /// The search failed.
    NotFound,
}

/// An event and the offset from the start of the replay when it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStep {
    pub at: Duration,
    pub event: ReplayEvent,
}

/// Delay unit for a speed in `MIN_SPEED..=MAX_SPEED`: `101 - speed`
/// milliseconds, so faster speeds give shorter delays.
pub fn base_delay(speed: u8) -> Duration {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    Duration::from_millis(u64::from(MAX_SPEED + 1 - speed))
}

/// A search result laid out in time.
#[derive(Debug, Clone)]
pub struct Replay {
    steps: Vec<ReplayStep>,
    next: usize,
    elapsed: Duration,
}

impl Replay {
    /// Lay out `search` at `speed`.
    pub fn new(search: &Search, speed: u8) -> Self {
        let base = base_delay(speed);
        let half = base / 2;
        let mut steps = Vec::with_capacity(search.explored.len() + search.path.len());

        for (i, &p) in search.explored.iter().enumerate() {
            steps.push(ReplayStep {
                at: half * i as u32,
                event: ReplayEvent::Visit(p),
            });
        }

        let path_start = half * search.explored.len() as u32;
        if search.found() {
            // Path cells keep their index along the full path, endpoints
            // included, but the endpoints themselves are not replayed.
            let last = search.path.len() - 1;
            for (j, &p) in search.path.iter().enumerate() {
                if j == 0 || j == last {
                    continue;
                }
                steps.push(ReplayStep {
                    at: path_start + base * j as u32,
                    event: ReplayEvent::Path(p),
                });
            }
        } else {
            steps.push(ReplayStep {
                at: path_start,
                event: ReplayEvent::NotFound,
            });
        }

        Self {
            steps,
            next: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Every step in due order.
    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    /// Time played so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Offset of the last step.
    pub fn duration(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |s| s.at)
    }

    /// Steps not yet handed out.
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    /// Move the clock forward by `dt` and return the steps that fell due,
    /// including any due at time zero on the first call.
    pub fn advance(&mut self, dt: Duration) -> &[ReplayStep] {
        self.elapsed += dt;
        let from = self.next;
        while self.next < self.steps.len() && self.steps[self.next].at <= self.elapsed {
            self.next += 1;
        }
        &self.steps[from..self.next]
    }

    /// Return every remaining step at once.
    pub fn finish(&mut self) -> &[ReplayStep] {
        let from = self.next;
        self.next = self.steps.len();
        self.elapsed = self.elapsed.max(self.duration());
        &self.steps[from..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    fn found() -> Search {
        Search {
            path: pts(&[(1, 1), (2, 1), (3, 1), (3, 2)]),
            explored: pts(&[(2, 1), (1, 2), (3, 1)]),
        }
    }

    #[test]
    fn base_delay_inverts_speed() {
        assert_eq!(base_delay(100), Duration::from_millis(1));
        assert_eq!(base_delay(50), Duration::from_millis(51));
        assert_eq!(base_delay(1), Duration::from_millis(100));
        assert_eq!(base_delay(0), Duration::from_millis(100));
    }

    #[test]
    fn timeline_offsets() {
        // speed 1: base 100ms, half 50ms
        let r = Replay::new(&found(), 1);
        let at: Vec<u64> = r.steps().iter().map(|s| s.at.as_millis() as u64).collect();
        // explored at 0, 50, 100; path phase starts at 150;
        // path indices 1 and 2 at 150 + 100 and 150 + 200.
        assert_eq!(at, vec![0, 50, 100, 250, 350]);
        assert_eq!(r.steps()[3].event, ReplayEvent::Path(Point::new(2, 1)));
        assert_eq!(r.steps()[4].event, ReplayEvent::Path(Point::new(3, 1)));
        assert_eq!(r.duration(), Duration::from_millis(350));
    }

    #[test]
    fn odd_base_keeps_half_steps() {
        // speed 50: base 51ms, half 25.5ms
        let r = Replay::new(&found(), 50);
        assert_eq!(r.steps()[1].at, Duration::from_micros(25_500));
        assert_eq!(r.steps()[3].at, Duration::from_micros(76_500 + 51_000));
    }

    #[test]
    fn failed_search_ends_with_not_found() {
        let s = Search {
            path: Vec::new(),
            explored: pts(&[(2, 1), (3, 1)]),
        };
        let r = Replay::new(&s, 1);
        let last = r.steps().last().unwrap();
        assert_eq!(last.event, ReplayEvent::NotFound);
        assert_eq!(last.at, Duration::from_millis(100));
    }

    #[test]
    fn trivial_path_replays_nothing() {
        let s = Search {
            path: pts(&[(1, 1)]),
            explored: Vec::new(),
        };
        let mut r = Replay::new(&s, 50);
        assert!(r.steps().is_empty());
        assert!(r.is_finished());
        assert!(r.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn advance_hands_out_due_steps_once() {
        let mut r = Replay::new(&found(), 1);
        assert_eq!(r.advance(Duration::ZERO).len(), 1);
        assert_eq!(r.advance(Duration::from_millis(49)).len(), 0);
        assert_eq!(r.advance(Duration::from_millis(1)).len(), 1);
        assert_eq!(r.advance(Duration::from_millis(200)).len(), 2);
        assert_eq!(r.elapsed(), Duration::from_millis(250));
        assert_eq!(r.remaining(), 1);
        assert!(!r.is_finished());
        assert_eq!(r.finish().len(), 1);
        assert!(r.is_finished());
        assert_eq!(r.elapsed(), r.duration());
        assert!(r.finish().is_empty());
    }
}
