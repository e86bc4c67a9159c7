//! Timed rotation through display pages.
//!
//! [`PageRotator`] is the bare state machine. [`Carousel`] drives it from a background
//! tokio task and publishes the current index over a watch channel. The task is aborted
//! whenever the page set is replaced and when the carousel is dropped, so a carousel
//! never outlives the view it belongs to. A generation counter keeps a superseded timer
//! from publishing after the reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Current page index over a fixed number of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRotator {
    page_count: usize,
    current: usize,
}

impl PageRotator {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Rotation only happens with two or more pages.
    pub fn rotates(&self) -> bool {
        self.page_count > 1
    }

    /// Move to the next page, wrapping around. Returns the new index.
    pub fn advance(&mut self) -> usize {
        if self.rotates() {
            self.current = (self.current + 1) % self.page_count;
        }
        self.current
    }

    /// Swap in a new page set and start again from the first page.
    pub fn reset(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.current = 0;
    }
}

/// Background page rotation bound to the lifetime of this handle.
pub struct Carousel {
    index: Arc<watch::Sender<usize>>,
    /// Bumped on every restart; a timer only publishes while its generation is current.
    generation: Arc<AtomicU64>,
    period: Duration,
    page_count: usize,
    min_to_tick: usize,
    task: Option<JoinHandle<()>>,
}

impl Carousel {
    /// Start rotating `page_count` pages every `period`. Must be called inside a tokio runtime.
    pub fn start(page_count: usize, period: Duration) -> Self {
        Self::with_threshold(page_count, period, 2)
    }

    /// Like [`Carousel::start`], but a single entry keeps ticking too, republishing index 0.
    pub fn start_slider(count: usize, period: Duration) -> Self {
        Self::with_threshold(count, period, 1)
    }

    fn with_threshold(page_count: usize, period: Duration, min_to_tick: usize) -> Self {
        let (tx, _rx) = watch::channel(0);
        let mut carousel = Self {
            index: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            period: period.max(Duration::from_millis(1)),
            page_count,
            min_to_tick,
            task: None,
        };
        carousel.spawn_timer();
        carousel
    }

    pub fn current(&self) -> usize {
        *self.index.borrow()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Whether a rotation timer is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Receive every index change. The current index is available immediately.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.subscribe()
    }

    /// Replace the page set: cancel the running timer, go back to page 0, restart.
    pub fn replace_pages(&mut self, page_count: usize) {
        self.stop();
        self.page_count = page_count;
        self.index.send_replace(0);
        self.spawn_timer();
    }

    /// Cancel the rotation timer, keeping the current index.
    pub fn stop(&mut self) {
        // An aborted task may still be mid-poll on another worker.
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn_timer(&mut self) {
        if self.page_count == 0 || self.page_count < self.min_to_tick {
            return;
        }

        let mut rotator = PageRotator::new(self.page_count);
        let index = Arc::clone(&self.index);
        let generation = Arc::clone(&self.generation);
        let own_generation = generation.load(Ordering::SeqCst);
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !publish_if_current(&index, &generation, own_generation, &mut rotator) {
                    return;
                }
            }
        }));
    }
}

/// Advance and publish under the channel lock, unless the timer has been superseded.
fn publish_if_current(
    index: &watch::Sender<usize>,
    generation: &AtomicU64,
    expected: u64,
    rotator: &mut PageRotator,
) -> bool {
    index.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) != expected {
            return false;
        }
        *current = rotator.advance();
        true
    })
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.stop();
    }
}
