// ==========================================
// 设备风险感知排产系统 - 健康评分引擎
// ==========================================
// 职责: 故障概率 + 传感器压力 → 0~100 健康评分
// 输入: failure_probability, vibration, temperature
// 输出: health_score (越高越健康)
// ==========================================

use crate::engine::error::{ensure_finite, ensure_in_range, EngineError, EngineResult};

// 评分构成 (合计 100 分)
const RISK_WEIGHT: f64 = 60.0;
const VIBRATION_WEIGHT: f64 = 20.0;
const VIBRATION_SATURATION: f64 = 5.0;
const TEMPERATURE_WEIGHT: f64 = 20.0;
const TEMPERATURE_BASELINE: f64 = 40.0;
const TEMPERATURE_SPAN: f64 = 60.0;

pub const MAX_HEALTH: f64 = 100.0;
pub const MIN_HEALTH: f64 = 0.0;

// ==========================================
// HealthScorer - 健康评分引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthScorer {
    // 无状态引擎
}

impl HealthScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算健康评分
    ///
    /// health = 100 - (risk + vib + temp)
    /// - risk = p × 60
    /// - vib = min(vibration / 5, 1) × 20
    /// - temp = min(max(temperature - 40, 0) / 60, 1) × 20
    ///
    /// 低于基线温度不抵扣压力;结果截断到 [0, 100]
    ///
    /// # 错误
    /// - p 不在 [0,1]、振动为负或任一输入非有限时返回 InvalidInput
    pub fn score(
        &self,
        failure_probability: f64,
        vibration: f64,
        temperature: f64,
    ) -> EngineResult<f64> {
        ensure_in_range("failure_probability", failure_probability, 0.0, 1.0)?;
        ensure_finite("vibration", vibration)?;
        if vibration < 0.0 {
            return Err(EngineError::invalid(
                "vibration",
                format!("振动不能为负: {}", vibration),
            ));
        }
        ensure_finite("temperature", temperature)?;

        let risk_component = failure_probability * RISK_WEIGHT;
        let vib_component = (vibration / VIBRATION_SATURATION).min(1.0) * VIBRATION_WEIGHT;
        let temp_component = ((temperature - TEMPERATURE_BASELINE).max(0.0) / TEMPERATURE_SPAN)
            .min(1.0)
            * TEMPERATURE_WEIGHT;

        let health = MAX_HEALTH - (risk_component + vib_component + temp_component);
        Ok(health.clamp(MIN_HEALTH, MAX_HEALTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_zero_stress_baseline_is_full_health() {
        let scorer = HealthScorer::new();
        assert_eq!(scorer.score(0.0, 0.0, 40.0).unwrap(), 100.0);
    }

    #[test]
    fn test_max_stress_saturates_at_floor() {
        let scorer = HealthScorer::new();
        assert_eq!(scorer.score(1.0, 5.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_sub_baseline_temperature_does_not_inflate_health() {
        let scorer = HealthScorer::new();
        let cold = scorer.score(0.5, 2.0, -20.0).unwrap();
        let baseline = scorer.score(0.5, 2.0, 40.0).unwrap();
        assert_eq!(cold, baseline);
    }

    #[test]
    fn test_vibration_saturates() {
        let scorer = HealthScorer::new();
        let at_cap = scorer.score(0.2, 5.0, 50.0).unwrap();
        let over_cap = scorer.score(0.2, 50.0, 50.0).unwrap();
        assert_eq!(at_cap, over_cap);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let scorer = HealthScorer::new();
        assert!(scorer.score(1.2, 1.0, 50.0).is_err());
        assert!(scorer.score(-0.1, 1.0, 50.0).is_err());
        assert!(scorer.score(0.5, -1.0, 50.0).is_err());
        assert!(scorer.score(f64::NAN, 1.0, 50.0).is_err());
        assert!(scorer.score(0.5, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_score_always_in_range_random_sampling() {
        let scorer = HealthScorer::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..5_000 {
            let p = rng.random_range(0.0..=1.0);
            let vib = rng.random_range(0.0..50.0);
            let temp = rng.random_range(-100.0..300.0);
            let health = scorer.score(p, vib, temp).unwrap();
            assert!((MIN_HEALTH..=MAX_HEALTH).contains(&health), "health={}", health);
        }
    }

    #[test]
    fn test_score_monotonic_non_increasing() {
        let scorer = HealthScorer::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2_000 {
            let p = rng.random_range(0.0..=1.0);
            let vib = rng.random_range(0.0..10.0);
            let temp = rng.random_range(0.0..150.0);
            let base = scorer.score(p, vib, temp).unwrap();

            let p_up = (p + rng.random_range(0.0..0.5)).min(1.0);
            assert!(scorer.score(p_up, vib, temp).unwrap() <= base);

            let vib_up = vib + rng.random_range(0.0..5.0);
            assert!(scorer.score(p, vib_up, temp).unwrap() <= base);

            let temp_up = temp + rng.random_range(0.0..50.0);
            assert!(scorer.score(p, vib, temp_up).unwrap() <= base);
        }
    }
}
