// ==========================================
// 设备风险感知排产系统 - 引擎层
// ==========================================
// 职责: 纯计算的业务规则引擎 (无 I/O,无跨调用状态)
// 红线: Engine 不拼 SQL
// ==========================================

pub mod error;
pub mod health;
pub mod maintenance;
pub mod metrics;
pub mod optimizer;
pub mod orchestrator;
pub mod predictor;
pub mod risk_band;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use health::HealthScorer;
pub use maintenance::MaintenanceSimulator;
pub use metrics::ClassificationMetrics;
pub use optimizer::{ScheduleKpi, ScheduleOptimizer};
pub use orchestrator::{RiskAssessment, RiskPipeline};
pub use predictor::{stress_index, FailurePredictor, StressIndexPredictor};
pub use risk_band::RiskBandClassifier;
