// Synthetic workload generation

use crate::models::Distribution;
use rand::distributions::{Distribution as RandDistribution, Uniform, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parameters for a synthetic key trace
#[derive(Debug, Clone)]
pub struct WorkloadSpec {
    /// Number of requests to generate
    pub requests: usize,
    /// Number of distinct objects
    pub objects: usize,
    /// Shape of the popularity distribution
    pub distribution: Distribution,
    /// Zipf exponent (used by `Distribution::Zipf`)
    pub zipf_exponent: f64,
    /// Fraction of traffic aimed at the hot set (used by `Distribution::HotSet`)
    pub hot_traffic: f64,
    /// Fraction of objects in the hot set (used by `Distribution::HotSet`)
    pub hot_objects: f64,
    /// RNG seed for reproducible traces
    pub seed: u64,
}

impl WorkloadSpec {
    /// Generates the key trace described by this spec.
    ///
    /// Keys are `obj-N` strings so traces read naturally in discard logs.
    pub fn generate(&self) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices = match self.distribution {
            Distribution::Uniform => self.generate_uniform(&mut rng),
            Distribution::Zipf => self.generate_zipf(&mut rng),
            Distribution::HotSet => self.generate_hot_set(&mut rng),
        };
        indices.into_iter().map(|i| format!("obj-{i}")).collect()
    }

    fn generate_uniform(&self, rng: &mut StdRng) -> Vec<usize> {
        let between = Uniform::from(0..self.objects);
        (0..self.requests).map(|_| between.sample(rng)).collect()
    }

    fn generate_zipf(&self, rng: &mut StdRng) -> Vec<usize> {
        // Weighted sampling over rank weights 1/rank^s. WeightedIndex
        // precomputes the cumulative table once, so sampling is O(log n).
        let weights: Vec<f64> = (1..=self.objects)
            .map(|rank| 1.0 / (rank as f64).powf(self.zipf_exponent))
            .collect();
        let index = WeightedIndex::new(&weights).expect("object count is nonzero");
        (0..self.requests).map(|_| index.sample(rng)).collect()
    }

    fn generate_hot_set(&self, rng: &mut StdRng) -> Vec<usize> {
        let hot_count = ((self.objects as f64 * self.hot_objects) as usize).max(1);
        let cold_count = (self.objects - hot_count).max(1);
        let hot = Uniform::from(0..hot_count);
        let cold = Uniform::from(hot_count..hot_count + cold_count);
        (0..self.requests)
            .map(|_| {
                if rng.gen_bool(self.hot_traffic) {
                    hot.sample(rng)
                } else {
                    cold.sample(rng)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(distribution: Distribution) -> WorkloadSpec {
        WorkloadSpec {
            requests: 10_000,
            objects: 100,
            distribution,
            zipf_exponent: 1.0,
            hot_traffic: 0.8,
            hot_objects: 0.2,
            seed: 42,
        }
    }

    #[test]
    fn test_trace_length_and_key_space() {
        for distribution in [Distribution::Uniform, Distribution::Zipf, Distribution::HotSet] {
            let trace = spec(distribution).generate();
            assert_eq!(trace.len(), 10_000);
            assert!(trace.iter().all(|key| key.starts_with("obj-")));
        }
    }

    #[test]
    fn test_same_seed_same_trace() {
        let a = spec(Distribution::Zipf).generate();
        let b = spec(Distribution::Zipf).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zipf_head_is_heavier_than_tail() {
        let trace = spec(Distribution::Zipf).generate();
        let head = trace.iter().filter(|key| key.as_str() == "obj-0").count();
        let tail = trace.iter().filter(|key| key.as_str() == "obj-99").count();
        assert!(head > tail);
    }

    #[test]
    fn test_hot_set_takes_most_traffic() {
        let trace = spec(Distribution::HotSet).generate();
        let hot_hits = trace
            .iter()
            .filter(|key| {
                let index: usize = key.trim_start_matches("obj-").parse().unwrap();
                index < 20
            })
            .count();
        assert!(hot_hits as f64 > 0.7 * trace.len() as f64);
    }
}
