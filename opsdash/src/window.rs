//! Bounded series windows and the synthetic feeds that fill them.

use std::collections::VecDeque;

use rand::Rng;

/// Fixed-capacity sliding window. Appending at capacity evicts exactly the
/// oldest element, so `len() <= capacity` always holds.
#[derive(Debug, Clone)]
pub struct SeriesWindow<T> {
    buf: VecDeque<T>,
    cap: usize,
}

impl<T> SeriesWindow<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Build a window pre-populated with `seed`, keeping only the newest
    /// `cap` values when the seed is longer.
    pub fn with_seed(cap: usize, seed: impl IntoIterator<Item = T>) -> Self {
        let mut w = Self::new(cap);
        for v in seed {
            w.push(v);
        }
        w
    }

    pub fn push(&mut self, v: T) {
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(v);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn last(&self) -> Option<&T> {
        self.buf.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }
}

impl SeriesWindow<f64> {
    /// Oldest-first copy for the chart normalizer.
    pub fn samples(&self) -> Vec<f64> {
        self.buf.iter().copied().collect()
    }
}

/// Bounded random walk used to simulate a metric absent a real feed. Each
/// step perturbs the previous value by a uniform draw in
/// `[-amplitude, +amplitude]` and clamps to `[lo, hi]`, so consecutive
/// samples stay correlated instead of jumping like independent noise.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    last: f64,
    amplitude: f64,
    lo: f64,
    hi: f64,
}

impl RandomWalk {
    pub fn new(start: f64, amplitude: f64, lo: f64, hi: f64) -> Self {
        Self {
            last: start.clamp(lo, hi),
            amplitude,
            lo,
            hi,
        }
    }

    pub fn step(&mut self, rng: &mut impl Rng) -> f64 {
        let jitter = rng.gen_range(-self.amplitude..=self.amplitude);
        self.last = (self.last + jitter).clamp(self.lo, self.hi);
        self.last
    }

    pub fn last(&self) -> f64 {
        self.last
    }
}

/// Initial population for a synthetic chart: a gentle sine wave around
/// `start` with a little jitter, so the first frame already looks alive.
pub fn seeded_wave(len: usize, start: f64, amp: f64, rng: &mut impl Rng) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let wave = (i as f64 / 4.0).sin() * amp;
            let jitter = rng.gen_range(-amp / 3.0..=amp / 3.0);
            start + wave + jitter
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn push_under_capacity_keeps_everything() {
        let mut w = SeriesWindow::new(5);
        for i in 0..3 {
            w.push(i);
        }
        assert_eq!(w.len(), 3);
        assert_eq!(w.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn push_beyond_capacity_evicts_oldest_in_order() {
        let cap = 4;
        let mut w = SeriesWindow::new(cap);
        for i in 0..10 {
            w.push(i);
            assert!(w.len() <= cap);
        }
        // Last `cap` appended values, oldest first.
        assert_eq!(w.iter().copied().collect::<Vec<_>>(), vec![6, 7, 8, 9]);
    }

    #[test]
    fn seed_longer_than_capacity_keeps_newest() {
        let w = SeriesWindow::with_seed(3, 0..8);
        assert_eq!(w.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7]);
    }

    #[test]
    fn walk_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut walk = RandomWalk::new(50.0, 8.0, 5.0, 98.0);
        for _ in 0..1000 {
            let v = walk.step(&mut rng);
            assert!((5.0..=98.0).contains(&v));
        }
    }

    #[test]
    fn walk_steps_are_correlated() {
        // Consecutive samples never differ by more than the amplitude.
        let mut rng = StdRng::seed_from_u64(42);
        let mut walk = RandomWalk::new(40.0, 2.5, 0.0, 100.0);
        let mut prev = walk.last();
        for _ in 0..500 {
            let v = walk.step(&mut rng);
            assert!((v - prev).abs() <= 2.5 + 1e-9);
            prev = v;
        }
    }

    #[test]
    fn seeded_wave_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(seeded_wave(60, 50.0, 8.0, &mut rng).len(), 60);
    }
}
