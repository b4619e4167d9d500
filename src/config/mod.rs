// ==========================================
// 设备风险感知排产系统 - 配置层
// ==========================================
// 职责: 引擎参数的默认值、持久化与读取
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config_trait;
pub mod engine_params;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config_trait::EngineConfigReader;
pub use engine_params::{
    MaintenanceParams, OptimizerParams, PredictorParams, RiskBandThresholds, ScheduleWeights,
};
