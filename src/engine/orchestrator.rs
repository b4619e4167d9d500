// ==========================================
// 设备风险感知排产系统 - 风险评估流水线
// ==========================================
// 职责: 设备遥测 → 预测器 → 故障概率 → 健康评分
// 输入: 设备列表
// 输出: 每台设备的 Prediction + 预测质量指标
// ==========================================

use crate::domain::machine::Machine;
use crate::domain::prediction::Prediction;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::health::HealthScorer;
use crate::engine::metrics::ClassificationMetrics;
use crate::engine::predictor::FailurePredictor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// 风险评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub predictor: String,
    pub predictions: Vec<Prediction>,
    pub metrics: ClassificationMetrics,
}

// ==========================================
// RiskPipeline - 风险评估流水线
// ==========================================
pub struct RiskPipeline {
    predictor: Arc<dyn FailurePredictor>,
    scorer: HealthScorer,
}

impl RiskPipeline {
    pub fn new(predictor: Arc<dyn FailurePredictor>) -> Self {
        Self {
            predictor,
            scorer: HealthScorer::new(),
        }
    }

    /// 评估所有设备 (保持输入顺序)
    ///
    /// # 错误
    /// - 设备列表为空: InsufficientInput
    /// - 预测器输出越界或遥测数据非法: InvalidInput
    #[instrument(skip(self, machines), fields(
        predictor = self.predictor.name(),
        machines_count = machines.len(),
    ))]
    pub fn assess(&self, machines: &[Machine]) -> EngineResult<RiskAssessment> {
        if machines.is_empty() {
            return Err(EngineError::InsufficientInput("设备列表为空".to_string()));
        }

        let mut predictions = Vec::with_capacity(machines.len());
        let mut samples = Vec::with_capacity(machines.len());

        for machine in machines {
            let probability = self.predictor.predict(machine)?;
            if !(0.0..=1.0).contains(&probability) {
                return Err(EngineError::invalid(
                    "failure_probability",
                    format!(
                        "预测器 {} 对设备 {} 输出越界: {}",
                        self.predictor.name(),
                        machine.machine_id,
                        probability
                    ),
                ));
            }

            let health = self
                .scorer
                .score(probability, machine.avg_vibration, machine.avg_temperature)?;

            debug!(
                machine_id = %machine.machine_id,
                failure_probability = probability,
                health_score = health,
                "设备风险评估"
            );

            predictions.push(Prediction::new(&machine.machine_id, probability, health));
            samples.push((probability, machine.failure_label));
        }

        let metrics = ClassificationMetrics::calculate(samples);
        info!(
            evaluated = metrics.evaluated,
            accuracy = metrics.accuracy,
            f1_score = metrics.f1_score,
            "风险评估完成"
        );

        Ok(RiskAssessment {
            predictor: self.predictor.name().to_string(),
            predictions,
            metrics,
        })
    }
}
