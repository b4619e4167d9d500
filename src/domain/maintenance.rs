// ==========================================
// 设备风险感知排产系统 - 维护策略对比模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 单一维护情景的影响 (均保留两位小数)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub cost: f64,            // 费用
    pub downtime: f64,        // 停机小时
    pub production_loss: f64, // 产量损失 (件)
}

/// 单台设备的维护策略对比
///
/// - immediate: 立即预防性维护
/// - delayed: 延后维护 (运行至故障),按故障概率取期望
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceComparison {
    pub machine_id: String,
    pub immediate: ScenarioOutcome,
    pub delayed: ScenarioOutcome,
}
