// ==========================================
// 设备风险感知排产系统 - 引擎参数
// ==========================================
// 职责: 各引擎可调参数及默认值
// 存储: config_kv 表 (由 ConfigManager 读取,缺失时使用默认值)
// ==========================================

use serde::{Deserialize, Serialize};

/// 排产多目标权重
///
/// 不要求权重之和为 1,由调用方负责取值含义。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleWeights {
    /// 收入 (吞吐) 权重
    pub w_throughput: f64,
    /// 设备健康 (风险) 权重
    pub w_risk: f64,
    /// 延期成本权重
    pub w_cost: f64,
}

impl ScheduleWeights {
    pub fn new(w_throughput: f64, w_risk: f64, w_cost: f64) -> Self {
        Self {
            w_throughput,
            w_risk,
            w_cost,
        }
    }
}

impl Default for ScheduleWeights {
    fn default() -> Self {
        Self::new(0.4, 0.3, 0.3)
    }
}

/// 维护模拟成本参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceParams {
    /// 预防性维护费用
    pub preventive_cost: f64,
    /// 故障后修复费用
    pub corrective_cost: f64,
    /// 每停机小时损失
    pub downtime_cost_per_hour: f64,
    /// 立即维护的计划停机小时
    pub immediate_downtime_hours: f64,
    /// 故障发生时的停机小时
    pub delayed_downtime_hours_if_failure: f64,
    /// 计划停机期间产量损失 (件/小时)
    pub immediate_throughput_loss_rate: f64,
    /// 故障停机期间产量损失 (件/小时)
    pub delayed_throughput_loss_rate: f64,
}

impl Default for MaintenanceParams {
    fn default() -> Self {
        Self {
            preventive_cost: 500.0,
            corrective_cost: 2000.0,
            downtime_cost_per_hour: 100.0,
            immediate_downtime_hours: 2.0,
            delayed_downtime_hours_if_failure: 6.0,
            immediate_throughput_loss_rate: 50.0,
            delayed_throughput_loss_rate: 80.0,
        }
    }
}

/// 排产优化器参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerParams {
    /// 缺少预测时的中性健康评分
    pub default_health: f64,
    /// 延期小时的惩罚放大系数
    pub lateness_penalty_factor: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            default_health: 50.0,
            lateness_penalty_factor: 10.0,
        }
    }
}

/// 风险分档阈值 (健康评分)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBandThresholds {
    /// health >= healthy_min → Healthy
    pub healthy_min: f64,
    /// health >= warning_min → Warning, 否则 High Risk
    pub warning_min: f64,
}

impl Default for RiskBandThresholds {
    fn default() -> Self {
        Self {
            healthy_min: 80.0,
            warning_min: 50.0,
        }
    }
}

/// 压力指数预测器参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictorParams {
    /// 压力指数的故障判定阈值
    pub stress_threshold: f64,
    /// logistic 曲线陡度
    pub steepness: f64,
}

impl Default for PredictorParams {
    fn default() -> Self {
        Self {
            stress_threshold: 0.6,
            steepness: 10.0,
        }
    }
}
