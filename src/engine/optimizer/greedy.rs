use super::scoring::{assignment_score, deadline_penalty};
use crate::config::engine_params::{OptimizerParams, ScheduleWeights};
use crate::domain::machine::{Job, Machine};
use crate::domain::prediction::Prediction;
use crate::domain::schedule::{MachineScheduleState, ScheduleResult};
use crate::engine::error::{ensure_finite, ensure_in_range, EngineError, EngineResult};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// ScheduleOptimizer - 多目标贪心排产引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptimizer {
    params: OptimizerParams,
}

/// 单台设备的运行态 (按输入顺序保存,保证枚举顺序稳定)
struct MachineSlot<'a> {
    machine_id: &'a str,
    state: MachineScheduleState,
}

impl ScheduleOptimizer {
    pub fn new(params: OptimizerParams) -> Self {
        Self { params }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行排产
    ///
    /// 流程:
    /// 1) 每台设备初始化 available_time=0
    /// 2) 构建 machine_id → health 查表 (重复记录以最后一条为准)
    /// 3) 作业排序: 优先级降序, 交期升序, 其余保持输入顺序
    /// 4) 逐个作业遍历设备 (输入顺序),跳过类型不匹配,取评分严格最高者
    /// 5) 无匹配设备 → 记入未分配;否则追加区间并推进可用时间
    ///
    /// # 错误
    /// - 设备/作业/预测任一为空: InsufficientInput
    /// - 重复ID、非法数值: InvalidInput
    #[instrument(skip(self, machines, jobs, predictions), fields(
        machines_count = machines.len(),
        jobs_count = jobs.len(),
        predictions_count = predictions.len(),
    ))]
    pub fn optimize(
        &self,
        machines: &[Machine],
        jobs: &[Job],
        predictions: &[Prediction],
        weights: ScheduleWeights,
    ) -> EngineResult<ScheduleResult> {
        self.validate(machines, jobs, predictions, &weights)?;

        // 1. 设备状态
        let mut slots: Vec<MachineSlot> = machines
            .iter()
            .map(|m| MachineSlot {
                machine_id: m.machine_id.as_str(),
                state: MachineScheduleState::new(&m.machine_type),
            })
            .collect();

        // 2. 健康查表
        let health_by_machine = build_health_lookup(predictions);

        // 3. 作业排序
        let sorted_jobs = sort_jobs(jobs);

        // 4. 贪心分配
        let mut unassigned = Vec::new();

        for job in sorted_jobs {
            let mut best: Option<(usize, f64)> = None;

            for (idx, slot) in slots.iter().enumerate() {
                // 硬约束: 能力类型匹配
                if slot.state.machine_type != job.required_machine_type {
                    continue;
                }

                let start = slot.state.available_time;
                let finish = start + job.processing_time_hours;
                let penalty = deadline_penalty(finish, job.deadline_hours);
                let health = health_by_machine
                    .get(slot.machine_id)
                    .copied()
                    .unwrap_or(self.params.default_health);

                let score = assignment_score(
                    &weights,
                    job.revenue_per_job,
                    health,
                    penalty,
                    self.params.lateness_penalty_factor,
                );
                if !score.is_finite() {
                    return Err(EngineError::invalid(
                        "assignment_score",
                        format!(
                            "作业 {} 在设备 {} 上的评分非有限: {}",
                            job.job_id, slot.machine_id, score
                        ),
                    ));
                }

                // 同分保留先遍历到的设备
                let better = match best {
                    None => true,
                    Some((_, best_score)) => score > best_score,
                };
                if better {
                    best = Some((idx, score));
                }
            }

            match best {
                None => {
                    debug!(job_id = %job.job_id, required = %job.required_machine_type, "无匹配设备,作业未分配");
                    unassigned.push(job.job_id.clone());
                }
                Some((idx, score)) => {
                    let slot = &mut slots[idx];
                    let assigned = slot.state.assign(&job.job_id, job.processing_time_hours);
                    debug!(
                        job_id = %job.job_id,
                        machine_id = slot.machine_id,
                        start = assigned.start,
                        end = assigned.end,
                        score,
                        "作业已分配"
                    );
                }
            }
        }

        let machine_schedules = slots
            .into_iter()
            .map(|slot| (slot.machine_id.to_string(), slot.state))
            .collect();

        let result = ScheduleResult {
            machine_schedules,
            unassigned_jobs: unassigned,
        };

        info!(
            assigned = result.assigned_count(),
            unassigned = result.unassigned_jobs.len(),
            "排产完成"
        );

        Ok(result)
    }

    // ==========================================
    // 输入校验
    // ==========================================

    fn validate(
        &self,
        machines: &[Machine],
        jobs: &[Job],
        predictions: &[Prediction],
        weights: &ScheduleWeights,
    ) -> EngineResult<()> {
        if machines.is_empty() {
            return Err(EngineError::InsufficientInput("设备列表为空".to_string()));
        }
        if jobs.is_empty() {
            return Err(EngineError::InsufficientInput("作业列表为空".to_string()));
        }
        if predictions.is_empty() {
            return Err(EngineError::InsufficientInput("风险预测为空".to_string()));
        }

        ensure_in_range("default_health", self.params.default_health, 0.0, 100.0)?;
        ensure_in_range(
            "lateness_penalty_factor",
            self.params.lateness_penalty_factor,
            0.0,
            f64::MAX,
        )?;

        ensure_finite("w_throughput", weights.w_throughput)?;
        ensure_finite("w_risk", weights.w_risk)?;
        ensure_finite("w_cost", weights.w_cost)?;

        let mut machine_ids = HashSet::with_capacity(machines.len());
        for machine in machines {
            if !machine_ids.insert(machine.machine_id.as_str()) {
                return Err(EngineError::invalid(
                    "machine_id",
                    format!("重复设备ID: {}", machine.machine_id),
                ));
            }
        }

        let mut job_ids = HashSet::with_capacity(jobs.len());
        let mut total_processing_hours = 0.0;
        for job in jobs {
            if !job_ids.insert(job.job_id.as_str()) {
                return Err(EngineError::invalid(
                    "job_id",
                    format!("重复作业ID: {}", job.job_id),
                ));
            }
            ensure_finite("processing_time_hours", job.processing_time_hours)?;
            if job.processing_time_hours <= 0.0 {
                return Err(EngineError::invalid(
                    "processing_time_hours",
                    format!("作业 {} 加工时长必须为正: {}", job.job_id, job.processing_time_hours),
                ));
            }
            total_processing_hours += job.processing_time_hours;
            ensure_finite("deadline_hours", job.deadline_hours)?;
            ensure_finite("revenue_per_job", job.revenue_per_job)?;
            if job.revenue_per_job < 0.0 {
                return Err(EngineError::invalid(
                    "revenue_per_job",
                    format!("作业 {} 收入不能为负: {}", job.job_id, job.revenue_per_job),
                ));
            }
        }

        // 任一设备的完工时刻不超过全部作业时长之和
        if !total_processing_hours.is_finite() {
            return Err(EngineError::invalid(
                "processing_time_hours",
                format!("作业总加工时长溢出: {}", total_processing_hours),
            ));
        }

        for prediction in predictions {
            ensure_in_range("health_score", prediction.health_score, 0.0, 100.0)?;
        }

        Ok(())
    }
}

/// machine_id → health_score
///
/// 同一设备出现多条预测时以最后一条为准
fn build_health_lookup(predictions: &[Prediction]) -> HashMap<&str, f64> {
    let mut lookup = HashMap::with_capacity(predictions.len());
    for prediction in predictions {
        if let Some(previous) = lookup.insert(prediction.machine_id.as_str(), prediction.health_score) {
            debug!(
                machine_id = %prediction.machine_id,
                previous,
                latest = prediction.health_score,
                "重复预测记录,采用最新一条"
            );
        }
    }
    lookup
}

/// 作业排序: priority_level 降序, deadline_hours 升序 (稳定排序)
fn sort_jobs(jobs: &[Job]) -> Vec<&Job> {
    let mut sorted: Vec<&Job> = jobs.iter().collect();
    sorted.sort_by(|a, b| match b.priority_level.cmp(&a.priority_level) {
        Ordering::Equal => a.deadline_hours.total_cmp(&b.deadline_hours),
        other => other,
    });
    sorted
}
