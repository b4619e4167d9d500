// ==========================================
// 设备风险感知排产系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod prediction_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use prediction_repo::{PredictionRepository, PredictionRun};
