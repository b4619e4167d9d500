// ==========================================
// 设备风险感知排产系统 - 训练 API
// ==========================================
// 职责: 对数据集运行风险评估流水线,并以新批次覆盖已存预测
// 红线: 每次训练全量替换,不保留旧批次
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::config::EngineConfigReader;
use crate::domain::machine::Dataset;
use crate::domain::prediction::Prediction;
use crate::engine::{ClassificationMetrics, RiskPipeline, StressIndexPredictor};
use crate::perf::PerfGuard;
use crate::repository::PredictionRepository;

/// 训练结果中返回的预测预览条数
pub const PREVIEW_SIZE: usize = 5;

/// 训练报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub run_id: String,
    pub predictor: String,
    pub metrics: ClassificationMetrics,
    /// 写入的预测总数
    pub total: usize,
    /// 前 PREVIEW_SIZE 条预测
    pub preview: Vec<Prediction>,
}

// ==========================================
// TrainingApi - 训练 API
// ==========================================
pub struct TrainingApi {
    prediction_repo: Arc<PredictionRepository>,
    config: Arc<dyn EngineConfigReader>,
}

impl TrainingApi {
    pub fn new(
        prediction_repo: Arc<PredictionRepository>,
        config: Arc<dyn EngineConfigReader>,
    ) -> Self {
        Self {
            prediction_repo,
            config,
        }
    }

    /// 训练: 评估所有设备并替换已存预测
    ///
    /// # 返回
    /// - Err(InsufficientInput): 数据集无设备
    /// - Err(InvalidInput): 遥测数据非法 (不写库)
    #[instrument(skip(self, dataset), fields(machines_count = dataset.machines.len()))]
    pub async fn train(&self, dataset: &Dataset) -> ApiResult<TrainingReport> {
        let _perf = PerfGuard::new("api.train");

        if dataset.machines.is_empty() {
            return Err(ApiError::InsufficientInput("请先生成数据".to_string()));
        }

        let params = self
            .config
            .get_predictor_params()
            .await
            .map_err(config_error)?;
        let pipeline = RiskPipeline::new(Arc::new(StressIndexPredictor::new(params)));
        let assessment = pipeline.assess(&dataset.machines)?;

        let run_id = Uuid::new_v4().to_string();
        let total = self
            .prediction_repo
            .replace_all(&run_id, &assessment.predictions)?;

        info!(
            run_id = %run_id,
            total,
            accuracy = assessment.metrics.accuracy,
            f1_score = assessment.metrics.f1_score,
            "训练完成"
        );

        let preview = assessment
            .predictions
            .iter()
            .take(PREVIEW_SIZE)
            .cloned()
            .collect();

        Ok(TrainingReport {
            run_id,
            predictor: assessment.predictor,
            metrics: assessment.metrics,
            total,
            preview,
        })
    }
}
