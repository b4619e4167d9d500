// ==========================================
// 设备风险感知排产系统 - 风险分档
// ==========================================
// 职责: 健康评分 → 业务风险标签 (Healthy / Warning / High Risk)
// ==========================================

use crate::config::engine_params::RiskBandThresholds;
use crate::domain::prediction::{MachineRiskView, Prediction};
use crate::domain::types::RiskLevel;

#[derive(Debug, Clone, Default)]
pub struct RiskBandClassifier {
    thresholds: RiskBandThresholds,
}

impl RiskBandClassifier {
    pub fn new(thresholds: RiskBandThresholds) -> Self {
        Self { thresholds }
    }

    /// 单个健康评分分档
    pub fn classify(&self, health_score: f64) -> RiskLevel {
        if health_score >= self.thresholds.healthy_min {
            RiskLevel::Healthy
        } else if health_score >= self.thresholds.warning_min {
            RiskLevel::Warning
        } else {
            RiskLevel::HighRisk
        }
    }

    /// 预测列表分档 (保持输入顺序)
    pub fn classify_predictions(&self, predictions: &[Prediction]) -> Vec<MachineRiskView> {
        predictions
            .iter()
            .map(|p| MachineRiskView {
                machine_id: p.machine_id.clone(),
                failure_probability: p.failure_probability,
                health_score: p.health_score,
                risk_level: self.classify(p.health_score),
            })
            .collect()
    }
}
