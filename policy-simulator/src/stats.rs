// Statistics collection and reporting for policy simulation

use crate::models::{CachePolicy, CsvResultRow, Distribution, PolicyStats};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Collects per-policy outcomes and renders the final report
pub struct SimulationReport {
    stats: BTreeMap<CachePolicy, PolicyStats>,
    distribution: Distribution,
    capacity: usize,
    objects: usize,
    requests: u64,
}

impl SimulationReport {
    pub fn new(
        distribution: Distribution,
        capacity: usize,
        objects: usize,
        requests: u64,
    ) -> Self {
        Self {
            stats: BTreeMap::new(),
            distribution,
            capacity,
            objects,
            requests,
        }
    }

    pub fn record(&mut self, policy: CachePolicy, stats: PolicyStats) {
        self.stats.insert(policy, stats);
    }

    /// Prints the side-by-side comparison table.
    pub fn print_summary(&self) {
        println!();
        println!(
            "Workload: {} requests over {} objects ({} distribution), capacity {}",
            self.requests, self.objects, self.distribution, self.capacity
        );
        println!();
        println!(
            "{:<18} {:>10} {:>10} {:>9} {:>11} {:>9}",
            "Policy", "Hits", "Misses", "Hit Rate", "Evictions", "Time(ms)"
        );
        println!("{}", "-".repeat(72));
        for (policy, stats) in &self.stats {
            println!(
                "{:<18} {:>10} {:>10} {:>8.2}% {:>11} {:>9}",
                policy.as_str(),
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0,
                stats.evictions,
                stats.simulation_time_ms
            );
        }
        println!();
    }

    /// Writes one CSV row per policy to `path`.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for (policy, stats) in &self.stats {
            writer.serialize(CsvResultRow {
                policy: policy.as_str().to_string(),
                distribution: self.distribution.as_str().to_string(),
                capacity: self.capacity,
                objects: self.objects,
                requests: stats.hits + stats.misses,
                hits: stats.hits,
                misses: stats.misses,
                hit_rate: stats.hit_rate(),
                evictions: stats.evictions,
                simulation_time_ms: stats.simulation_time_ms,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_shape() {
        let mut report = SimulationReport::new(Distribution::Zipf, 50, 200, 1000);
        report.record(
            CachePolicy::Fifo,
            PolicyStats {
                hits: 600,
                misses: 400,
                evictions: 350,
                discard_notifications: 350,
                simulation_time_ms: 3,
            },
        );
        let dir = std::env::temp_dir().join("policy-simulator-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");
        report.write_csv(&path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let mut lines = body.lines();
        assert_eq!(
            lines.next().unwrap(),
            "policy,distribution,capacity,objects,requests,hits,misses,hit_rate,evictions,simulation_time_ms"
        );
        assert!(lines.next().unwrap().starts_with("FIFO,zipf,50,200,1000,600,400,0.6,350"));
        std::fs::remove_file(&path).ok();
    }
}
