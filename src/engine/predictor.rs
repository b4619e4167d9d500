// ==========================================
// 设备风险感知排产系统 - 故障概率预测器
// ==========================================
// 职责: 设备遥测 → 故障概率 [0,1]
// 说明: 预测器是可插拔能力,任何实现 FailurePredictor 的组件均可接入
// ==========================================

use crate::config::engine_params::PredictorParams;
use crate::domain::machine::Machine;
use crate::engine::error::{ensure_finite, EngineResult};

// 压力指数系数
const AGE_COEF: f64 = 0.05;
const VIBRATION_COEF: f64 = 0.08;
const TEMPERATURE_COEF: f64 = 0.01;
const TEMPERATURE_BASELINE: f64 = 40.0;

// ==========================================
// Trait: FailurePredictor
// ==========================================
pub trait FailurePredictor: Send + Sync {
    /// 预测器名称 (用于日志与训练报告)
    fn name(&self) -> &str;

    /// 预测单台设备的故障概率
    fn predict(&self, machine: &Machine) -> EngineResult<f64>;
}

/// 设备压力指数
///
/// 年限、振动、超温三项线性叠加;合成数据的故障标签也由此指数判定
pub fn stress_index(machine: &Machine) -> f64 {
    machine.machine_age * AGE_COEF
        + machine.avg_vibration * VIBRATION_COEF
        + (machine.avg_temperature - TEMPERATURE_BASELINE) * TEMPERATURE_COEF
}

// ==========================================
// StressIndexPredictor - 压力指数预测器
// ==========================================
// p = 1 / (1 + exp(-k × (index - threshold)))
#[derive(Debug, Clone, Default)]
pub struct StressIndexPredictor {
    params: PredictorParams,
}

impl StressIndexPredictor {
    pub fn new(params: PredictorParams) -> Self {
        Self { params }
    }
}

impl FailurePredictor for StressIndexPredictor {
    fn name(&self) -> &str {
        "stress_index_logistic"
    }

    fn predict(&self, machine: &Machine) -> EngineResult<f64> {
        ensure_finite("machine_age", machine.machine_age)?;
        ensure_finite("avg_vibration", machine.avg_vibration)?;
        ensure_finite("avg_temperature", machine.avg_temperature)?;

        let index = stress_index(machine);
        let z = self.params.steepness * (index - self.params.stress_threshold);
        let probability = 1.0 / (1.0 + (-z).exp());

        Ok(probability.clamp(0.0, 1.0))
    }
}
