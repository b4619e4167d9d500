// ==========================================
// 设备风险感知排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod machine;
pub mod maintenance;
pub mod prediction;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use machine::{Dataset, Job, Machine};
pub use maintenance::{MaintenanceComparison, ScenarioOutcome};
pub use prediction::{MachineRiskView, Prediction};
pub use schedule::{MachineScheduleState, ScheduleResult, ScheduledJob};
pub use types::{RiskLevel, STANDARD_MACHINE_TYPES};
