// ==========================================
// 设备风险感知排产系统 - 核心库
// ==========================================
// 组成: 健康评分 / 维护策略模拟 / 风险感知多目标排产
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (只给出对比与建议排程,不自动执行)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 数据集读写与合成数据
pub mod importer;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Dataset, Job, Machine, MachineRiskView, MaintenanceComparison, Prediction, RiskLevel,
    ScheduleResult,
};

// 引擎
pub use engine::{
    HealthScorer, MaintenanceSimulator, RiskBandClassifier, RiskPipeline, ScheduleKpi,
    ScheduleOptimizer,
};

// API
pub use api::{ConfigApi, DashboardApi, TrainingApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设备风险感知排产系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
