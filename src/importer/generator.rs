// ==========================================
// 设备风险感知排产系统 - 合成数据生成器
// ==========================================
// 职责: 生成可复现的设备遥测 + 作业数据集
// 红线: 同一 seed 必须生成完全相同的数据集
// ==========================================

use crate::domain::machine::{Dataset, Job, Machine};
use crate::domain::types::STANDARD_MACHINE_TYPES;
use crate::engine::predictor::stress_index;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

pub const DEFAULT_MACHINE_COUNT: usize = 10;
pub const DEFAULT_JOB_COUNT: usize = 50;

/// 故障标签阈值: 压力指数 (截断到 1.0) 超过该值记为故障
const FAILURE_LABEL_THRESHOLD: f64 = 0.6;

pub struct DatasetGenerator {
    seed: u64,
    machine_count: usize,
    job_count: usize,
}

impl DatasetGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            machine_count: DEFAULT_MACHINE_COUNT,
            job_count: DEFAULT_JOB_COUNT,
        }
    }

    pub fn with_counts(mut self, machine_count: usize, job_count: usize) -> Self {
        self.machine_count = machine_count;
        self.job_count = job_count;
        self
    }

    pub fn generate(&self) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let machines: Vec<Machine> = (1..=self.machine_count)
            .map(|i| Self::random_machine(&mut rng, i))
            .collect();
        let jobs: Vec<Job> = (1..=self.job_count)
            .map(|j| Self::random_job(&mut rng, j))
            .collect();

        info!(
            seed = self.seed,
            machines = machines.len(),
            jobs = jobs.len(),
            "合成数据集已生成"
        );
        Dataset::new(machines, jobs)
    }

    fn random_type(rng: &mut StdRng) -> String {
        STANDARD_MACHINE_TYPES
            .choose(rng)
            .copied()
            .unwrap_or(STANDARD_MACHINE_TYPES[0])
            .to_string()
    }

    fn random_machine(rng: &mut StdRng, index: usize) -> Machine {
        let machine_age = rng.random_range(1..=10) as f64;
        let avg_vibration = round2(rng.random_range(0.5..=5.0));
        let avg_temperature = round2(rng.random_range(40.0..=95.0));

        let mut machine = Machine {
            machine_id: format!("M{}", index),
            machine_type: Self::random_type(rng),
            installation_year: 2015 + rng.random_range(0..=8),
            machine_age,
            total_run_hours: rng.random_range(2000..=20000) as f64,
            avg_load_percentage: rng.random_range(40..=95) as f64,
            daily_operating_hours: rng.random_range(8..=24) as f64,
            capacity_per_hour: rng.random_range(5..=20) as f64,
            avg_temperature,
            avg_vibration,
            energy_consumption_rate: round2(rng.random_range(10.0..=50.0)),
            last_maintenance_days: rng.random_range(1..=180),
            failure_history_count: rng.random_range(0..=5),
            downtime_hours_last_year: rng.random_range(10..=200) as f64,
            maintenance_cost_last_year: rng.random_range(1000..=10000) as f64,
            failure_label: None,
        };

        let index_value = stress_index(&machine).min(1.0);
        machine.failure_label = Some(index_value > FAILURE_LABEL_THRESHOLD);
        machine
    }

    fn random_job(rng: &mut StdRng, index: usize) -> Job {
        Job {
            job_id: format!("J{}", index),
            required_machine_type: Self::random_type(rng),
            processing_time_hours: rng.random_range(1..=10) as f64,
            load_requirement_percentage: rng.random_range(30..=90) as f64,
            priority_level: rng.random_range(1..=5),
            deadline_hours: rng.random_range(12..=120) as f64,
            revenue_per_job: rng.random_range(500..=5000) as f64,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let dataset = DatasetGenerator::new(42).generate();
        assert_eq!(dataset.machines.len(), DEFAULT_MACHINE_COUNT);
        assert_eq!(dataset.jobs.len(), DEFAULT_JOB_COUNT);
        assert_eq!(dataset.machines[0].machine_id, "M1");
        assert_eq!(dataset.jobs[49].job_id, "J50");
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = DatasetGenerator::new(42).generate();
        let b = DatasetGenerator::new(42).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_ranges() {
        let dataset = DatasetGenerator::new(9).with_counts(40, 200).generate();

        for m in &dataset.machines {
            assert!(STANDARD_MACHINE_TYPES.contains(&m.machine_type.as_str()));
            assert!((1.0..=10.0).contains(&m.machine_age));
            assert!((0.5..=5.0).contains(&m.avg_vibration));
            assert!((40.0..=95.0).contains(&m.avg_temperature));
            let expected = stress_index(m).min(1.0) > FAILURE_LABEL_THRESHOLD;
            assert_eq!(m.failure_label, Some(expected));
        }
        for j in &dataset.jobs {
            assert!((1.0..=10.0).contains(&j.processing_time_hours));
            assert!((1..=5).contains(&j.priority_level));
            assert!((12.0..=120.0).contains(&j.deadline_hours));
            assert!((500.0..=5000.0).contains(&j.revenue_per_job));
        }
    }
}
