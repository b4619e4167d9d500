// ==========================================
// 设备风险感知排产系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ConfigApi, DashboardApi, TrainingApi};
use crate::config::{ConfigManager, EngineConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::PredictionRepository;

/// 应用状态
///
/// 所有 API 共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 训练API
    pub training_api: Arc<TrainingApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 预测仓储
    pub prediction_repo: Arc<PredictionRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开数据库并初始化 schema（幂等）
    /// 2. 初始化 Repository / ConfigManager
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState,数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("schema 初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let prediction_repo = Arc::new(PredictionRepository::from_connection(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn EngineConfigReader> = config_manager.clone();

        let training_api = Arc::new(TrainingApi::new(
            prediction_repo.clone(),
            config_reader.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(prediction_repo.clone(), config_reader));
        let config_api = Arc::new(ConfigApi::new(config_manager));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            training_api,
            dashboard_api,
            config_api,
            prediction_repo,
        })
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 MACHINE_RISK_APS_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("MACHINE_RISK_APS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./machine_risk_aps.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("machine-risk-aps");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("machine_risk_aps.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_app_state_initializes_schema() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let state = AppState::new(db_path.clone()).unwrap();

        assert_eq!(state.db_path, db_path);
        assert_eq!(state.prediction_repo.count().unwrap(), 0);
    }
}
