use crate::domain::machine::Job;
use crate::domain::schedule::ScheduleResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 排产结果指标
///
/// 时间单位均为小时
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    pub assigned_jobs: usize,
    pub unassigned_jobs: usize,
    /// 已分配作业的收入合计
    pub assigned_revenue: f64,
    /// 最晚完工时间
    pub makespan_hours: f64,
    /// 延期小时合计
    pub total_tardiness_hours: f64,
    /// 单个作业最大延期
    pub max_tardiness_hours: f64,
    /// 准时完工比例 (无已分配作业时为 1.0)
    pub on_time_rate: f64,
    /// 每台设备的占用小时
    pub busy_hours_by_machine: BTreeMap<String, f64>,
}

impl ScheduleKpi {
    pub fn calculate(result: &ScheduleResult, jobs: &[Job]) -> Self {
        let job_by_id: HashMap<&str, &Job> = jobs.iter().map(|j| (j.job_id.as_str(), j)).collect();

        let mut assigned_jobs = 0usize;
        let mut assigned_revenue = 0.0;
        let mut makespan_hours: f64 = 0.0;
        let mut total_tardiness_hours = 0.0;
        let mut max_tardiness_hours: f64 = 0.0;
        let mut on_time = 0usize;
        let mut busy_hours_by_machine = BTreeMap::new();

        for (machine_id, state) in &result.machine_schedules {
            busy_hours_by_machine.insert(machine_id.clone(), state.busy_hours());

            for slot in &state.schedule {
                assigned_jobs += 1;
                makespan_hours = makespan_hours.max(slot.end);

                let Some(job) = job_by_id.get(slot.job_id.as_str()) else {
                    continue;
                };
                assigned_revenue += job.revenue_per_job;

                let tardiness = (slot.end - job.deadline_hours).max(0.0);
                if tardiness > 0.0 {
                    total_tardiness_hours += tardiness;
                    max_tardiness_hours = max_tardiness_hours.max(tardiness);
                } else {
                    on_time += 1;
                }
            }
        }

        let on_time_rate = if assigned_jobs == 0 {
            1.0
        } else {
            on_time as f64 / assigned_jobs as f64
        };

        Self {
            assigned_jobs,
            unassigned_jobs: result.unassigned_jobs.len(),
            assigned_revenue,
            makespan_hours,
            total_tardiness_hours,
            max_tardiness_hours,
            on_time_rate,
            busy_hours_by_machine,
        }
    }
}
