// ==========================================
// 设备风险感知排产系统 - 风险预测领域模型
// ==========================================
// 用途: 预测器输出 → 运营层 (维护模拟 / 排产) → 驾驶舱
// ==========================================

use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// Prediction - 单台设备的当前风险预测
// ==========================================
// 不变量: failure_probability ∈ [0,1], health_score ∈ [0,100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub machine_id: String,
    pub failure_probability: f64,
    pub health_score: f64,
}

impl Prediction {
    pub fn new(machine_id: impl Into<String>, failure_probability: f64, health_score: f64) -> Self {
        Self {
            machine_id: machine_id.into(),
            failure_probability,
            health_score,
        }
    }
}

// ==========================================
// MachineRiskView - 驾驶舱风险分档视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRiskView {
    pub machine_id: String,
    pub failure_probability: f64,
    pub health_score: f64,
    pub risk_level: RiskLevel,
}
