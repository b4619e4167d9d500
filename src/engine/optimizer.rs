// ==========================================
// 设备风险感知排产系统 - 多目标排产优化引擎
// ==========================================
// 红线: 能力类型匹配为硬约束
// 红线: 单次贪心分配,不回溯、不交换 (无最优性保证)
// ==========================================
// 职责: 作业 → 设备 的风险感知分配
// 输入: 设备 + 作业 + 健康预测 + 多目标权重
// 输出: 每台设备的作业时间线 + 未分配作业
// ==========================================

mod greedy;
mod kpi;
mod scoring;


pub use greedy::ScheduleOptimizer;
pub use kpi::ScheduleKpi;
pub use scoring::{assignment_score, deadline_penalty};
