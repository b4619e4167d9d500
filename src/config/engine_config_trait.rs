// ==========================================
// 设备风险感知排产系统 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义各引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_params::{
    MaintenanceParams, OptimizerParams, PredictorParams, RiskBandThresholds, ScheduleWeights,
};
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
// 约定: 配置缺失时返回默认值;配置值无法解析时返回错误
#[async_trait]
pub trait EngineConfigReader: Send + Sync {
    /// 排产多目标权重
    ///
    /// # 默认值
    /// - w_throughput=0.4, w_risk=0.3, w_cost=0.3
    async fn get_schedule_weights(&self) -> Result<ScheduleWeights, Box<dyn Error>>;

    /// 维护模拟成本参数
    async fn get_maintenance_params(&self) -> Result<MaintenanceParams, Box<dyn Error>>;

    /// 排产优化器参数
    ///
    /// # 默认值
    /// - default_health=50, lateness_penalty_factor=10
    async fn get_optimizer_params(&self) -> Result<OptimizerParams, Box<dyn Error>>;

    /// 风险分档阈值
    ///
    /// # 默认值
    /// - healthy_min=80, warning_min=50
    async fn get_risk_band_thresholds(&self) -> Result<RiskBandThresholds, Box<dyn Error>>;

    /// 压力指数预测器参数
    async fn get_predictor_params(&self) -> Result<PredictorParams, Box<dyn Error>>;
}
