//! Count-up animation for score displays.
//!
//! A counter climbs from 0 to its target one step per tick, finishing in
//! roughly 1.5 s regardless of the target. Changing the target aborts the
//! running animation and starts again from 0.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

/// Total time a count-up is spread over.
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(1500);
/// Floor on the tick period so large targets don't spin.
pub const MIN_TICK: Duration = Duration::from_millis(10);

/// Tick period for a count-up to `target`, or `None` when there is nothing
/// to animate (`target <= 0`).
pub fn tick_interval(target: i64) -> Option<Duration> {
    if target <= 0 {
        return None;
    }
    let steps = u32::try_from(target).unwrap_or(u32::MAX);
    Some((COUNT_UP_DURATION / steps).max(MIN_TICK))
}

/// A restartable count-up whose current display value is published on a
/// `watch` channel.
pub struct AnimatedCounter {
    display: Arc<watch::Sender<i64>>,
    target: Option<i64>,
    task: Option<JoinHandle<()>>,
}

impl Default for AnimatedCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedCounter {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            display: Arc::new(tx),
            target: None,
            task: None,
        }
    }

    /// Value currently on display.
    pub fn value(&self) -> i64 {
        *self.display.borrow()
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.display.subscribe()
    }

    /// True while a tick task is still counting.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Point the counter at a new target.
    ///
    /// Setting the same target again is a no-op. Any other value cancels the
    /// in-flight animation and restarts from 0. Must be called inside a tokio
    /// runtime when `target > 0`.
    pub fn set_target(&mut self, target: i64) {
        if self.target == Some(target) {
            return;
        }
        self.cancel();
        self.target = Some(target);
        self.display.send_replace(0);

        let Some(period) = tick_interval(target) else {
            return;
        };
        let display = Arc::clone(&self.display);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            let mut current = 0;
            while current < target {
                ticker.tick().await;
                current += 1;
                display.send_replace(current);
            }
        }));
    }

    /// Stop the animation where it is.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for AnimatedCounter {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_tick_interval_non_positive_schedules_nothing() {
        assert_eq!(tick_interval(0), None);
        assert_eq!(tick_interval(-5), None);
    }

    #[test]
    fn test_tick_interval_spreads_over_duration() {
        assert_eq!(tick_interval(50), Some(Duration::from_millis(30)));
        assert_eq!(tick_interval(100), Some(Duration::from_millis(15)));
        assert_eq!(tick_interval(1), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_tick_interval_keeps_fractional_millis() {
        // 1500 / 7 = 214.28... ms
        let period = tick_interval(7).unwrap();
        assert!(period > Duration::from_millis(214));
        assert!(period < Duration::from_millis(215));
    }

    #[test]
    fn test_tick_interval_floors_at_ten_millis() {
        assert_eq!(tick_interval(150), Some(MIN_TICK));
        assert_eq!(tick_interval(1000), Some(MIN_TICK));
        assert_eq!(tick_interval(i64::MAX), Some(MIN_TICK));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_target_shows_zero_without_timer() {
        let mut counter = AnimatedCounter::new();
        counter.set_target(0);
        assert_eq!(counter.value(), 0);
        assert!(!counter.is_running());
        assert!(counter.task.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_up_to_target_and_stops() {
        let mut counter = AnimatedCounter::new();
        counter.set_target(50);
        assert_eq!(counter.value(), 0);

        sleep(Duration::from_millis(765)).await;
        assert_eq!(counter.value(), 25);

        sleep(Duration::from_millis(800)).await;
        assert_eq!(counter.value(), 50);
        assert!(!counter.is_running());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.value(), 50, "counter must not overshoot");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_target_restarts_from_zero() {
        let mut counter = AnimatedCounter::new();
        counter.set_target(50);
        sleep(Duration::from_millis(315)).await;
        assert_eq!(counter.value(), 10);

        counter.set_target(20);
        assert_eq!(counter.value(), 0);

        sleep(Duration::from_millis(1600)).await;
        assert_eq!(counter.value(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_target_does_not_restart() {
        let mut counter = AnimatedCounter::new();
        counter.set_target(10);
        sleep(Duration::from_millis(460)).await;
        assert_eq!(counter.value(), 3);
        counter.set_target(10);
        assert_eq!(counter.value(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_final_value() {
        let mut counter = AnimatedCounter::new();
        let rx = counter.subscribe();
        counter.set_target(5);
        sleep(Duration::from_millis(1600)).await;
        assert_eq!(*rx.borrow(), 5);
    }
}
