// ==========================================
// 设备风险感知排产系统 - 配置管理 API
// ==========================================
// 职责: 生效配置查询 (覆写值 + 默认值)、单项配置更新
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::config::{
    config_keys, ConfigManager, EngineConfigReader, MaintenanceParams, OptimizerParams,
    PredictorParams, RiskBandThresholds, ScheduleWeights,
};

/// 生效配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub schedule_weights: ScheduleWeights,
    pub optimizer: OptimizerParams,
    pub maintenance: MaintenanceParams,
    pub risk_bands: RiskBandThresholds,
    pub predictor: PredictorParams,
    /// config_kv 中显式覆写的键值
    pub overrides: BTreeMap<String, String>,
}

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询生效配置
    pub async fn show(&self) -> ApiResult<EffectiveConfig> {
        let cm = self.config_manager.as_ref();

        let snapshot = cm.get_config_snapshot().map_err(config_error)?;
        let overrides: BTreeMap<String, String> = serde_json::from_str(&snapshot)
            .map_err(|e| ApiError::InternalError(format!("配置快照解析失败: {}", e)))?;

        Ok(EffectiveConfig {
            schedule_weights: cm.get_schedule_weights().await.map_err(config_error)?,
            optimizer: cm.get_optimizer_params().await.map_err(config_error)?,
            maintenance: cm.get_maintenance_params().await.map_err(config_error)?,
            risk_bands: cm.get_risk_band_thresholds().await.map_err(config_error)?,
            predictor: cm.get_predictor_params().await.map_err(config_error)?,
            overrides,
        })
    }

    /// 更新单项配置
    ///
    /// # 返回
    /// - Err(InvalidInput): 未知键、非数值或超出取值范围
    pub fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        if !config_keys::ALL.contains(&key) {
            return Err(ApiError::InvalidInput(format!(
                "未知配置键: {} (可用: {})",
                key,
                config_keys::ALL.join(", ")
            )));
        }

        self.config_manager
            .set_config_value(key, value)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))
    }
}
