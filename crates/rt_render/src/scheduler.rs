//! Per-pixel work scheduling.
//!
//! A scheduler walks the image in row-major order and runs one work unit per
//! pixel. Each unit gets the mutable bytes of its own pixel and nothing else,
//! so concurrent units never touch the same memory and no lock guards the
//! image.
//!
//! [`Serial`] runs the units on the calling thread. [`Parallel`] runs them on
//! a rayon pool, with a counting gate bounding how many are in flight:
//! submission blocks until a permit is free instead of polling.

use crate::{Image, RenderResult};
use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Shades pixel `(x, y)` and returns its encoded channels.
pub type ShadeFn<'a> = dyn Fn(u32, u32) -> [u8; 3] + Sync + 'a;

/// Bookkeeping from a finished render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Name of the scheduler that ran the units
    pub scheduler: &'static str,
    /// Work units submitted, one per pixel
    pub units_submitted: usize,
    /// Largest number of units running at once
    pub peak_in_flight: usize,
    /// Wall time from first submission to drain
    pub elapsed: Duration,
}

/// Drives one work unit per pixel of an image.
pub trait Scheduler {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run `shade` once for every pixel and store the result in `image`.
    ///
    /// Returns only after every unit has completed.
    fn run(&self, image: &mut Image, shade: &ShadeFn<'_>) -> RenderResult<RenderStats>;
}

/// Row-major, single-threaded scheduler. Baseline for determinism checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl Scheduler for Serial {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn run(&self, image: &mut Image, shade: &ShadeFn<'_>) -> RenderResult<RenderStats> {
        let width = image.width;
        let height = image.height;
        let start = Instant::now();
        let mut submitted = 0;

        for y in 0..height {
            log::trace!("Scanlines remaining: {}", height - y);
            for x in 0..width {
                image.set_pixel(x, y, shade(x, y));
                submitted += 1;
            }
        }

        Ok(RenderStats {
            scheduler: self.name(),
            units_submitted: submitted,
            peak_in_flight: usize::from(submitted > 0),
            elapsed: start.elapsed(),
        })
    }
}

/// Bounded concurrent scheduler.
///
/// At most `threads` units are in flight. The submitting thread blocks on
/// the gate when the bound is reached and resumes as soon as a unit finishes.
#[derive(Debug, Clone, Copy)]
pub struct Parallel {
    threads: usize,
}

impl Parallel {
    /// Scheduler with an explicit concurrency bound (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Scheduler bounded by the hardware concurrency.
    pub fn available() -> Self {
        let threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(threads)
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::available()
    }
}

impl Scheduler for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn run(&self, image: &mut Image, shade: &ShadeFn<'_>) -> RenderResult<RenderStats> {
        let width = image.width;
        let height = image.height;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("rt-worker-{}", i))
            .build()?;
        let gate = Gate::new(self.threads);

        log::info!("Concurrent ray tracing with ({}) threads", self.threads);

        let start = Instant::now();
        let mut submitted = 0;
        let pixels = image.pixels_mut();

        // The scope returns once every spawned unit has finished
        pool.in_place_scope(|scope| {
            for (index, pixel) in pixels.enumerate() {
                let (x, y) = coords(index, width);
                if x == 0 {
                    log::trace!("Scanlines remaining: {}", height - y);
                }

                let permit = gate.acquire();
                scope.spawn(move |_| {
                    let _permit = permit;
                    pixel.copy_from_slice(&shade(x, y));
                });
                submitted += 1;
            }
        });

        Ok(RenderStats {
            scheduler: self.name(),
            units_submitted: submitted,
            peak_in_flight: gate.peak(),
            elapsed: start.elapsed(),
        })
    }
}

/// Pixel coordinates of the `index`-th pixel in row-major order.
#[inline]
fn coords(index: usize, width: u32) -> (u32, u32) {
    let width = width as usize;
    ((index % width) as u32, (index / width) as u32)
}

#[derive(Debug, Default)]
struct GateState {
    in_flight: usize,
    peak: usize,
}

/// Counting semaphore bounding the number of in-flight work units.
#[derive(Debug)]
pub(crate) struct Gate {
    capacity: usize,
    state: Mutex<GateState>,
    freed: Condvar,
}

impl Gate {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(GateState::default()),
            freed: Condvar::new(),
        }
    }

    /// Block until a slot is free, then take it.
    pub(crate) fn acquire(&self) -> Permit<'_> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.in_flight >= self.capacity {
            state = self
                .freed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.in_flight += 1;
        state.peak = state.peak.max(state.in_flight);
        Permit { gate: self }
    }

    fn release(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight -= 1;
        drop(state);
        self.freed.notify_one();
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight
    }

    pub(crate) fn peak(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).peak
    }
}

/// A taken gate slot; released on drop, including when the unit panics.
pub(crate) struct Permit<'a> {
    gate: &'a Gate,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
