use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::config::LandingConfig;
use crate::dom;
use crate::error::Result;
use crate::reveal::{ObserveMode, ObserverOptions, ViewportObserver};

pub const COUNTER_SELECTOR: &str = ".stat-number, .stat-value";
pub const TARGET_ATTRIBUTE: &str = "data-target";

/// Count-up state for a single statistic. Each `tick` is one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
    frame_ms: u32,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = if frame_ms == 0 {
            1.0
        } else {
            (duration_ms as f64 / frame_ms as f64).max(1.0)
        };
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            finished: false,
            frame_ms,
        }
    }

    /// Advances one frame and returns the integer to display.
    pub fn tick(&mut self) -> i64 {
        if self.finished {
            return self.target;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.current = self.target as f64;
            self.finished = true;
            return self.target;
        }
        self.current.floor() as i64
    }

    /// Display value once `elapsed_ms` have passed since the animation started,
    /// without needing a real timer. Before the first frame the display is zero.
    pub fn display_at(&self, elapsed_ms: u64) -> i64 {
        let frames = elapsed_ms / u64::from(self.frame_ms.max(1));
        let mut replay = Self::new(self.target, 0, 1);
        replay.increment = self.increment;
        let mut shown = 0;
        for _ in 0..frames {
            shown = replay.tick();
            if replay.finished {
                break;
            }
        }
        shown
    }
}

/// Parses a `data-target` value the way `parseInt` does: leading whitespace,
/// an optional sign, then as many digits as follow. Trailing text is ignored.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    // Too many digits for an i64 clamps instead of failing.
    let value = rest[..digits_end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Runs the count-up on `element`, redrawing from the elapsed frame time on
/// every interval tick. The interval is released once the target is shown.
pub fn animate_counter(element: HtmlElement, target: i64, duration_ms: u32, frame_ms: u32) {
    let counter = CounterAnimation::new(target, duration_ms, frame_ms);
    let elapsed_ms = Cell::new(0u64);
    let interval_handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let interval_handle_clone = interval_handle.clone();

    let interval = Interval::new(frame_ms, move || {
        elapsed_ms.set(elapsed_ms.get() + u64::from(frame_ms.max(1)));
        let shown = counter.display_at(elapsed_ms.get());
        element.set_text_content(Some(&shown.to_string()));
        if shown == target {
            if let Some(interval) = interval_handle_clone.borrow_mut().take() {
                // Can't drop the interval from inside its own callback.
                spawn_local(async move {
                    drop(interval);
                });
            }
        }
    });

    *interval_handle.borrow_mut() = Some(interval);
}

/// Observes every statistic and starts its count-up the first time it is
/// mostly on screen. Returns how many counters are being watched.
pub fn init_counters(document: &Document, config: &LandingConfig) -> Result<usize> {
    let counters = dom::select_all(document, COUNTER_SELECTOR)?;
    if counters.is_empty() {
        return Ok(0);
    }

    let duration_ms = config.counter_duration_ms;
    let frame_ms = config.counter_frame_ms;
    let observer = ViewportObserver::new(
        &ObserverOptions::from(&config.counters),
        ObserveMode::Once,
        move |element: HtmlElement| {
            let raw = element.get_attribute(TARGET_ATTRIBUTE).unwrap_or_default();
            match parse_target(&raw) {
                Some(target) => animate_counter(element, target, duration_ms, frame_ms),
                None => log::warn!("Counter has no numeric {}: {:?}", TARGET_ATTRIBUTE, raw),
            }
        },
    )?;

    for counter in &counters {
        observer.observe(counter);
    }
    Ok(counters.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: i64) -> Vec<i64> {
        let mut counter = CounterAnimation::new(target, 2000, 16);
        let mut shown = Vec::new();
        loop {
            let value = counter.tick();
            shown.push(value);
            if value == target {
                return shown;
            }
            assert!(shown.len() <= 200, "counter for {} never finished", target);
        }
    }

    #[test]
    fn counts_up_monotonically_and_stops_at_target() {
        for target in [0, 1, 7, 99, 125, 1500, 98_765, 10_000_000] {
            let shown = run_to_end(target);
            assert_eq!(*shown.last().unwrap(), target);
            assert!(shown.windows(2).all(|w| w[0] <= w[1]), "not monotonic for {}", target);
            assert!(shown.iter().all(|v| *v <= target && *v >= 0));
        }
    }

    #[test]
    fn finishes_in_about_two_seconds() {
        let frames = run_to_end(1500).len();
        // 2000 / 16 = 125 frames, plus at most one for float rounding.
        assert!((125..=126).contains(&frames), "took {} frames", frames);
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        let counter = CounterAnimation::new(0, 2000, 16);
        assert_eq!(counter.display_at(16), 0);
        assert_eq!(run_to_end(0), vec![0]);
    }

    #[test]
    fn ticks_after_completion_hold_target() {
        let mut counter = CounterAnimation::new(10, 32, 16);
        assert_eq!(counter.tick(), 5);
        assert_eq!(counter.tick(), 10);
        assert_eq!(counter.tick(), 10);
        assert_eq!(counter.tick(), 10);
    }

    #[test]
    fn display_at_follows_elapsed_time() {
        let counter = CounterAnimation::new(1250, 2000, 16);
        assert_eq!(counter.display_at(0), 0);
        assert_eq!(counter.display_at(15), 0);
        assert_eq!(counter.display_at(16), 10);
        assert_eq!(counter.display_at(160), 100);
        assert_eq!(counter.display_at(2016), 1250);
        assert_eq!(counter.display_at(60_000), 1250);

        let mut last = 0;
        for ms in (0..2500).step_by(7) {
            let shown = counter.display_at(ms);
            assert!(shown >= last && shown <= 1250);
            last = shown;
        }
    }

    #[test]
    fn display_at_matches_ticking() {
        let counter = CounterAnimation::new(777, 2000, 16);
        let mut ticking = counter.clone();
        for frame in 1..=130u64 {
            assert_eq!(ticking.tick(), counter.display_at(frame * 16));
        }
    }

    #[test]
    fn elapsed_frames_reach_target_when_ticking_does() {
        for target in [-3, 0, 1, 1250, 98_765] {
            let counter = CounterAnimation::new(target, 2000, 16);
            let frames = (1u64..)
                .find(|frame| counter.display_at(frame * 16) == target)
                .unwrap();
            assert_eq!(frames as usize, run_to_end(target).len(), "target {}", target);
        }
    }

    #[test]
    fn parses_targets_like_parse_int() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target("  42"), Some(42));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target("+7"), Some(7));
        assert_eq!(parse_target("-3"), Some(-3));
        assert_eq!(parse_target("1,500"), Some(1));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn oversized_targets_saturate() {
        assert_eq!(parse_target("100000000000000000000"), Some(i64::MAX));
        assert_eq!(parse_target("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_target("-100000000000000000000"), Some(-i64::MAX));

        let counter = CounterAnimation::new(i64::MAX, 2000, 16);
        assert_eq!(counter.display_at(60_000), i64::MAX);
    }
}
