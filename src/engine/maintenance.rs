// ==========================================
// 设备风险感知排产系统 - 维护策略模拟引擎
// ==========================================
// 职责: 立即预防性维护 vs 延后维护 (运行至故障) 的期望影响对比
// 输入: 每台设备的故障概率
// 输出: 每台设备两种情景的 {费用, 停机, 产量损失}
// ==========================================
// 注: 只给出对比,不给出推荐;取舍由驾驶舱决定
// ==========================================

use crate::config::engine_params::MaintenanceParams;
use crate::domain::maintenance::{MaintenanceComparison, ScenarioOutcome};
use crate::domain::prediction::Prediction;
use crate::engine::error::{ensure_in_range, EngineResult};
use tracing::debug;

// ==========================================
// MaintenanceSimulator - 维护策略模拟引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MaintenanceSimulator {
    params: MaintenanceParams,
}

impl MaintenanceSimulator {
    pub fn new(params: MaintenanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MaintenanceParams {
        &self.params
    }

    /// 批量模拟
    ///
    /// 空输入返回空结果 (不是错误);
    /// 故障概率越界返回 InvalidInput
    pub fn simulate(&self, predictions: &[Prediction]) -> EngineResult<Vec<MaintenanceComparison>> {
        let mut results = Vec::with_capacity(predictions.len());

        for prediction in predictions {
            results.push(self.simulate_machine(
                &prediction.machine_id,
                prediction.failure_probability,
            )?);
        }

        debug!(machines = results.len(), "维护策略模拟完成");
        Ok(results)
    }

    /// 单台设备模拟
    pub fn simulate_machine(
        &self,
        machine_id: &str,
        failure_probability: f64,
    ) -> EngineResult<MaintenanceComparison> {
        ensure_in_range("failure_probability", failure_probability, 0.0, 1.0)?;

        Ok(MaintenanceComparison {
            machine_id: machine_id.to_string(),
            immediate: self.immediate_scenario(),
            delayed: self.delayed_scenario(failure_probability),
        })
    }

    /// 情景 A: 立即维护
    ///
    /// 计划停机的费用与故障概率无关
    fn immediate_scenario(&self) -> ScenarioOutcome {
        let p = &self.params;
        let downtime = p.immediate_downtime_hours;
        let cost = p.preventive_cost + downtime * p.downtime_cost_per_hour;
        let production_loss = downtime * p.immediate_throughput_loss_rate;

        ScenarioOutcome {
            cost: round2(cost),
            downtime: round2(downtime),
            production_loss: round2(production_loss),
        }
    }

    /// 情景 B: 延后维护
    ///
    /// 停机与修复费用按故障概率取期望值
    fn delayed_scenario(&self, failure_probability: f64) -> ScenarioOutcome {
        let p = &self.params;
        let downtime = p.delayed_downtime_hours_if_failure * failure_probability;
        let cost = failure_probability * p.corrective_cost + downtime * p.downtime_cost_per_hour;
        let production_loss = downtime * p.delayed_throughput_loss_rate;

        ScenarioOutcome {
            cost: round2(cost),
            downtime: round2(downtime),
            production_loss: round2(production_loss),
        }
    }
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
