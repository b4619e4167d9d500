// ==========================================
// 设备风险感知排产系统 - 数据质量校验器
// ==========================================
// 职责: 设备/作业数据集的 DQ 校验 + 汇总
// 级别: Error 阻断导入;Warning 仅记录
// ==========================================

use crate::domain::machine::{Job, Machine};
use crate::domain::types::STANDARD_MACHINE_TYPES;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,
    Warning,
}

/// 单条违规记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,         // 数据行号 (从 1 开始)
    pub record_id: Option<String>, // machine_id / job_id
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

/// DQ 汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub error: usize,
    pub warning: usize,
}

impl DqSummary {
    pub fn from_violations(total_rows: usize, violations: &[DqViolation]) -> Self {
        let error = violations.iter().filter(|v| v.level == DqLevel::Error).count();
        Self {
            total_rows,
            error,
            warning: violations.len() - error,
        }
    }
}

/// 按位置编号 (从 1 开始),用于没有源文件行号的记录
pub fn numbered<T>(records: &[T]) -> impl Iterator<Item = (usize, &T)> {
    records.iter().enumerate().map(|(idx, r)| (idx + 1, r))
}

pub struct DqValidator;

impl DqValidator {
    /// 校验设备列表
    ///
    /// 每条记录携带其数据行号,违规按该行号报告
    pub fn validate_machines<'a>(
        &self,
        machines: impl IntoIterator<Item = (usize, &'a Machine)>,
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();

        for (row, m) in machines {
            let mut push = |level: DqLevel, field: &str, message: String| {
                violations.push(DqViolation {
                    row_number: row,
                    record_id: Some(m.machine_id.clone()),
                    level,
                    field: field.to_string(),
                    message,
                });
            };

            if m.machine_id.trim().is_empty() {
                push(DqLevel::Error, "machine_id", "主键缺失".to_string());
            } else if !seen_ids.insert(m.machine_id.as_str()) {
                push(DqLevel::Error, "machine_id", "重复设备ID".to_string());
            }

            if m.machine_type.trim().is_empty() {
                push(DqLevel::Error, "machine_type", "能力类型为空".to_string());
            } else if !STANDARD_MACHINE_TYPES.contains(&m.machine_type.as_str()) {
                push(
                    DqLevel::Warning,
                    "machine_type",
                    format!("非标准能力类型: {}", m.machine_type),
                );
            }

            // 温度可低于 0,只要求有限
            if !m.avg_temperature.is_finite() {
                push(
                    DqLevel::Error,
                    "avg_temperature",
                    format!("数值非有限: {}", m.avg_temperature),
                );
            }

            // 其余遥测数值: 有限且非负
            let telemetry = [
                ("machine_age", m.machine_age),
                ("total_run_hours", m.total_run_hours),
                ("avg_load_percentage", m.avg_load_percentage),
                ("daily_operating_hours", m.daily_operating_hours),
                ("capacity_per_hour", m.capacity_per_hour),
                ("avg_vibration", m.avg_vibration),
                ("energy_consumption_rate", m.energy_consumption_rate),
                ("downtime_hours_last_year", m.downtime_hours_last_year),
                ("maintenance_cost_last_year", m.maintenance_cost_last_year),
            ];
            for (field, value) in telemetry {
                if !value.is_finite() {
                    push(DqLevel::Error, field, format!("数值非有限: {}", value));
                } else if value < 0.0 {
                    push(DqLevel::Error, field, format!("数值为负: {}", value));
                }
            }

            if m.failure_history_count < 0 {
                push(
                    DqLevel::Error,
                    "failure_history_count",
                    format!("故障次数为负: {}", m.failure_history_count),
                );
            }
            if m.last_maintenance_days < 0 {
                push(
                    DqLevel::Warning,
                    "last_maintenance_days",
                    format!("距上次维护天数为负: {}", m.last_maintenance_days),
                );
            }
        }

        violations
    }

    /// 校验作业列表
    ///
    /// machine_types 为数据集中出现的能力类型,用于提示必然无法分配的作业
    pub fn validate_jobs<'a>(
        &self,
        jobs: impl IntoIterator<Item = (usize, &'a Job)>,
        machine_types: &HashSet<&str>,
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_ids = HashSet::new();

        for (row, j) in jobs {
            let mut push = |level: DqLevel, field: &str, message: String| {
                violations.push(DqViolation {
                    row_number: row,
                    record_id: Some(j.job_id.clone()),
                    level,
                    field: field.to_string(),
                    message,
                });
            };

            if j.job_id.trim().is_empty() {
                push(DqLevel::Error, "job_id", "主键缺失".to_string());
            } else if !seen_ids.insert(j.job_id.as_str()) {
                push(DqLevel::Error, "job_id", "重复作业ID".to_string());
            }

            if j.required_machine_type.trim().is_empty() {
                push(DqLevel::Error, "required_machine_type", "所需能力类型为空".to_string());
            } else if !machine_types.contains(j.required_machine_type.as_str()) {
                push(
                    DqLevel::Warning,
                    "required_machine_type",
                    format!("无匹配设备,作业将无法分配: {}", j.required_machine_type),
                );
            }

            if !j.processing_time_hours.is_finite() || j.processing_time_hours <= 0.0 {
                push(
                    DqLevel::Error,
                    "processing_time_hours",
                    format!("加工时长必须为正: {}", j.processing_time_hours),
                );
            }
            if !j.revenue_per_job.is_finite() || j.revenue_per_job < 0.0 {
                push(
                    DqLevel::Error,
                    "revenue_per_job",
                    format!("收入不能为负: {}", j.revenue_per_job),
                );
            }
            if !j.deadline_hours.is_finite() || j.deadline_hours < 0.0 {
                push(
                    DqLevel::Error,
                    "deadline_hours",
                    format!("交期不能为负: {}", j.deadline_hours),
                );
            }
        }

        violations
    }
}
