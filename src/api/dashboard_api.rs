// ==========================================
// 设备风险感知排产系统 - 驾驶舱 API
// ==========================================
// 职责: 风险分档查询、维护策略对比、多目标排产
// 输入: 已存预测 (训练产出) + 当前数据集
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::config::{EngineConfigReader, ScheduleWeights};
use crate::domain::machine::Dataset;
use crate::domain::maintenance::MaintenanceComparison;
use crate::domain::prediction::{MachineRiskView, Prediction};
use crate::domain::schedule::ScheduleResult;
use crate::engine::{MaintenanceSimulator, RiskBandClassifier, ScheduleKpi, ScheduleOptimizer};
use crate::perf::PerfGuard;
use crate::repository::PredictionRepository;

/// 排产报告: 排产结果 + KPI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub weights: ScheduleWeights,
    pub result: ScheduleResult,
    pub kpi: ScheduleKpi,
}

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    prediction_repo: Arc<PredictionRepository>,
    config: Arc<dyn EngineConfigReader>,
}

impl DashboardApi {
    pub fn new(
        prediction_repo: Arc<PredictionRepository>,
        config: Arc<dyn EngineConfigReader>,
    ) -> Self {
        Self {
            prediction_repo,
            config,
        }
    }

    /// 查询设备风险分档
    ///
    /// 尚未训练时返回空列表
    pub async fn list_machine_risks(&self) -> ApiResult<Vec<MachineRiskView>> {
        let _perf = PerfGuard::new("api.list_machine_risks");

        let thresholds = self
            .config
            .get_risk_band_thresholds()
            .await
            .map_err(config_error)?;
        let predictions = self.prediction_repo.find_all()?;

        Ok(RiskBandClassifier::new(thresholds).classify_predictions(&predictions))
    }

    /// 立即维护 vs 延后维护对比
    ///
    /// # 返回
    /// - Err(InsufficientInput): 尚无预测
    pub async fn simulate_maintenance(&self) -> ApiResult<Vec<MaintenanceComparison>> {
        let _perf = PerfGuard::new("api.simulate_maintenance");

        let predictions = self.load_predictions()?;
        let params = self
            .config
            .get_maintenance_params()
            .await
            .map_err(config_error)?;

        let results = MaintenanceSimulator::new(params).simulate(&predictions)?;
        info!(machines = results.len(), "维护策略对比完成");
        Ok(results)
    }

    /// 多目标排产
    ///
    /// # 参数
    /// - weights: None 时使用已配置权重
    ///
    /// # 返回
    /// - Err(InsufficientInput): 缺少设备/作业 (请先生成数据) 或缺少预测 (请先运行训练)
    #[instrument(skip(self, dataset, weights), fields(
        machines_count = dataset.machines.len(),
        jobs_count = dataset.jobs.len(),
    ))]
    pub async fn optimize_schedule(
        &self,
        dataset: &Dataset,
        weights: Option<ScheduleWeights>,
    ) -> ApiResult<ScheduleReport> {
        let _perf = PerfGuard::new("api.optimize_schedule");

        if dataset.is_incomplete() {
            return Err(ApiError::InsufficientInput("请先生成数据".to_string()));
        }
        let predictions = self.load_predictions()?;

        let weights = match weights {
            Some(w) => w,
            None => self
                .config
                .get_schedule_weights()
                .await
                .map_err(config_error)?,
        };
        let params = self
            .config
            .get_optimizer_params()
            .await
            .map_err(config_error)?;

        let result = ScheduleOptimizer::new(params).optimize(
            &dataset.machines,
            &dataset.jobs,
            &predictions,
            weights,
        )?;
        let kpi = ScheduleKpi::calculate(&result, &dataset.jobs);

        info!(
            assigned = kpi.assigned_jobs,
            unassigned = kpi.unassigned_jobs,
            makespan_hours = kpi.makespan_hours,
            "排产完成"
        );

        Ok(ScheduleReport {
            weights,
            result,
            kpi,
        })
    }

    /// 读取已存预测;为空时提示先训练
    fn load_predictions(&self) -> ApiResult<Vec<Prediction>> {
        let predictions = self.prediction_repo.find_all()?;
        if predictions.is_empty() {
            return Err(ApiError::InsufficientInput("请先运行训练".to_string()));
        }
        Ok(predictions)
    }
}
