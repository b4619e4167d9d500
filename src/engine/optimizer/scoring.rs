use crate::config::engine_params::ScheduleWeights;

/// 延期惩罚: 完工晚于交期的小时数 (提前或准时为 0)
pub fn deadline_penalty(finish_time: f64, deadline_hours: f64) -> f64 {
    (finish_time - deadline_hours).max(0.0)
}

/// 多目标评分 (越高越好)
///
/// score = w_throughput × revenue + w_risk × health − w_cost × penalty × factor
///
/// 延期项乘以 factor (默认 10),使 w_cost 不可忽略时延期主导决策
pub fn assignment_score(
    weights: &ScheduleWeights,
    revenue: f64,
    health: f64,
    deadline_penalty: f64,
    lateness_penalty_factor: f64,
) -> f64 {
    weights.w_throughput * revenue + weights.w_risk * health
        - weights.w_cost * deadline_penalty * lateness_penalty_factor
}
