// ==========================================
// 设备风险感知排产系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行入口调用
// ==========================================

pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod training_api;

// 重导出核心类型
pub use config_api::{ConfigApi, EffectiveConfig};
pub use dashboard_api::{DashboardApi, ScheduleReport};
pub use error::{ApiError, ApiResult};
pub use training_api::{TrainingApi, TrainingReport};
