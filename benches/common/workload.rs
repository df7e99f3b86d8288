//! Seeded key streams for LFU benchmarks.

use lfukit::traits::CoreCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform keys in `[0, universe)`.
    Uniform,
    /// `hot_prob` of accesses land on the first `hot_fraction` of the universe.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Repeating sequential scan.
    Scan,
    /// Skewed popularity; `theta` near 1.0 is heavily skewed.
    Zipfian { theta: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> KeyStream {
        KeyStream::new(self)
    }
}

#[derive(Debug, Clone)]
pub struct KeyStream {
    universe: u64,
    workload: Workload,
    rng: StdRng,
    scan_pos: u64,
    zipf_cdf: Vec<f64>,
}

impl KeyStream {
    fn new(spec: WorkloadSpec) -> Self {
        let universe = spec.universe.max(1);
        let zipf_cdf = match spec.workload {
            Workload::Zipfian { theta } => zipf_cdf(universe, theta),
            _ => Vec::new(),
        };
        Self {
            universe,
            workload: spec.workload,
            rng: StdRng::seed_from_u64(spec.seed),
            scan_pos: 0,
            zipf_cdf,
        }
    }

    pub fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.gen_range(0..self.universe),
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot = ((self.universe as f64 * hot_fraction.clamp(0.0, 1.0)) as u64)
                    .clamp(1, self.universe);
                if hot == self.universe || self.rng.gen_bool(hot_prob.clamp(0.0, 1.0)) {
                    self.rng.gen_range(0..hot)
                } else {
                    self.rng.gen_range(hot..self.universe)
                }
            },
            Workload::Scan => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                key
            },
            Workload::Zipfian { .. } => {
                let u: f64 = self.rng.r#gen();
                let rank = self.zipf_cdf.partition_point(|&p| p < u);
                rank.min(self.zipf_cdf.len() - 1) as u64
            },
        }
    }

    pub fn take_keys(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next_key()).collect()
    }
}

/// Cumulative probabilities for ranks `0..n`.
fn zipf_cdf(n: u64, theta: f64) -> Vec<f64> {
    let weights: Vec<f64> = (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).collect();
    let total: f64 = weights.iter().sum();
    let mut acc = 0.0;
    weights
        .into_iter()
        .map(|w| {
            acc += w / total;
            acc
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HitRate {
    pub hits: u64,
    pub misses: u64,
}

impl HitRate {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Get, and insert on miss.
pub fn run_hit_rate<C>(cache: &mut C, keys: &[u64]) -> HitRate
where
    C: CoreCache<u64, u64>,
{
    let mut rate = HitRate::default();
    for &key in keys {
        if cache.get(&key).is_some() {
            rate.hits += 1;
        } else {
            rate.misses += 1;
            cache.insert(key, key);
        }
    }
    rate
}
