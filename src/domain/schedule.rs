// ==========================================
// 设备风险感知排产系统 - 排产结果模型
// ==========================================
// MachineScheduleState 仅在单次优化调用内创建和修改,不落库
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 已分配的作业区间 [start, end)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub job_id: String,
    pub start: f64,
    pub end: f64,
}

/// 单台设备的排产状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineScheduleState {
    pub machine_type: String,
    pub available_time: f64,
    pub schedule: Vec<ScheduledJob>,
}

impl MachineScheduleState {
    pub fn new(machine_type: impl Into<String>) -> Self {
        Self {
            machine_type: machine_type.into(),
            available_time: 0.0,
            schedule: Vec::new(),
        }
    }

    /// 追加作业并推进可用时间
    pub fn assign(&mut self, job_id: &str, duration_hours: f64) -> &ScheduledJob {
        let start = self.available_time;
        let end = start + duration_hours;
        self.schedule.push(ScheduledJob {
            job_id: job_id.to_string(),
            start,
            end,
        });
        self.available_time = end;
        &self.schedule[self.schedule.len() - 1]
    }

    /// 已占用小时数
    pub fn busy_hours(&self) -> f64 {
        self.schedule.iter().map(|s| s.end - s.start).sum()
    }
}

/// 排产优化结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub machine_schedules: BTreeMap<String, MachineScheduleState>,
    pub unassigned_jobs: Vec<String>,
}

impl ScheduleResult {
    /// 已分配作业数
    pub fn assigned_count(&self) -> usize {
        self.machine_schedules
            .values()
            .map(|state| state.schedule.len())
            .sum()
    }

    /// 查找作业所在设备及区间
    pub fn find_assignment(&self, job_id: &str) -> Option<(&str, &ScheduledJob)> {
        self.machine_schedules.iter().find_map(|(machine_id, state)| {
            state
                .schedule
                .iter()
                .find(|s| s.job_id == job_id)
                .map(|s| (machine_id.as_str(), s))
        })
    }
}
