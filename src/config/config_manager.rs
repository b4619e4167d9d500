// ==========================================
// 设备风险感知排产系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::engine_config_trait::EngineConfigReader;
use crate::config::engine_params::{
    MaintenanceParams, OptimizerParams, PredictorParams, RiskBandThresholds, ScheduleWeights,
};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 会对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT）
    ///
    /// 只接受 config_keys 中登记的键,且值必须可解析为数值并位于该键的取值范围内
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if !config_keys::ALL.contains(&key) {
            return Err(format!("未知配置键: {}", key).into());
        }
        parse_f64(key, value)?;

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value.trim()],
        )?;

        tracing::info!(key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// 此方法会覆盖现有的同名 global 配置
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3",
                params![GLOBAL_SCOPE, key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 读取数值配置,缺失时使用默认值
    fn get_f64_or_default(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => parse_f64(key, &raw),
            None => Ok(default),
        }
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64, Box<dyn Error>> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("配置值格式错误 (key: {}, value: {}): {}", key, raw, e))?;
    if !value.is_finite() {
        return Err(format!("配置值非有限数值 (key: {}, value: {})", key, raw).into());
    }
    let (min, max) = config_keys::bounds(key);
    if value < min || value > max {
        return Err(format!(
            "配置值超出范围 (key: {}, value: {}): 允许 [{}, {}]",
            key, raw, min, max
        )
        .into());
    }
    Ok(value)
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
#[async_trait]
impl EngineConfigReader for ConfigManager {
    async fn get_schedule_weights(&self) -> Result<ScheduleWeights, Box<dyn Error>> {
        let d = ScheduleWeights::default();
        Ok(ScheduleWeights {
            w_throughput: self.get_f64_or_default(config_keys::W_THROUGHPUT, d.w_throughput)?,
            w_risk: self.get_f64_or_default(config_keys::W_RISK, d.w_risk)?,
            w_cost: self.get_f64_or_default(config_keys::W_COST, d.w_cost)?,
        })
    }

    async fn get_maintenance_params(&self) -> Result<MaintenanceParams, Box<dyn Error>> {
        let d = MaintenanceParams::default();
        Ok(MaintenanceParams {
            preventive_cost: self.get_f64_or_default(config_keys::PREVENTIVE_COST, d.preventive_cost)?,
            corrective_cost: self.get_f64_or_default(config_keys::CORRECTIVE_COST, d.corrective_cost)?,
            downtime_cost_per_hour: self
                .get_f64_or_default(config_keys::DOWNTIME_COST_PER_HOUR, d.downtime_cost_per_hour)?,
            immediate_downtime_hours: self
                .get_f64_or_default(config_keys::IMMEDIATE_DOWNTIME_HOURS, d.immediate_downtime_hours)?,
            delayed_downtime_hours_if_failure: self.get_f64_or_default(
                config_keys::DELAYED_DOWNTIME_HOURS,
                d.delayed_downtime_hours_if_failure,
            )?,
            immediate_throughput_loss_rate: self.get_f64_or_default(
                config_keys::IMMEDIATE_LOSS_RATE,
                d.immediate_throughput_loss_rate,
            )?,
            delayed_throughput_loss_rate: self
                .get_f64_or_default(config_keys::DELAYED_LOSS_RATE, d.delayed_throughput_loss_rate)?,
        })
    }

    async fn get_optimizer_params(&self) -> Result<OptimizerParams, Box<dyn Error>> {
        let d = OptimizerParams::default();
        Ok(OptimizerParams {
            default_health: self.get_f64_or_default(config_keys::DEFAULT_HEALTH, d.default_health)?,
            lateness_penalty_factor: self
                .get_f64_or_default(config_keys::LATENESS_PENALTY_FACTOR, d.lateness_penalty_factor)?,
        })
    }

    async fn get_risk_band_thresholds(&self) -> Result<RiskBandThresholds, Box<dyn Error>> {
        let d = RiskBandThresholds::default();
        let thresholds = RiskBandThresholds {
            healthy_min: self.get_f64_or_default(config_keys::HEALTHY_MIN, d.healthy_min)?,
            warning_min: self.get_f64_or_default(config_keys::WARNING_MIN, d.warning_min)?,
        };
        if thresholds.warning_min > thresholds.healthy_min {
            return Err(format!(
                "风险分档阈值无效: warning_min={} > healthy_min={}",
                thresholds.warning_min, thresholds.healthy_min
            )
            .into());
        }
        Ok(thresholds)
    }

    async fn get_predictor_params(&self) -> Result<PredictorParams, Box<dyn Error>> {
        let d = PredictorParams::default();
        Ok(PredictorParams {
            stress_threshold: self.get_f64_or_default(config_keys::STRESS_THRESHOLD, d.stress_threshold)?,
            steepness: self.get_f64_or_default(config_keys::PREDICTOR_STEEPNESS, d.steepness)?,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 排产权重
    pub const W_THROUGHPUT: &str = "w_throughput";
    pub const W_RISK: &str = "w_risk";
    pub const W_COST: &str = "w_cost";

    // 排产优化器
    pub const DEFAULT_HEALTH: &str = "default_health";
    pub const LATENESS_PENALTY_FACTOR: &str = "lateness_penalty_factor";

    // 维护模拟
    pub const PREVENTIVE_COST: &str = "preventive_cost";
    pub const CORRECTIVE_COST: &str = "corrective_cost";
    pub const DOWNTIME_COST_PER_HOUR: &str = "downtime_cost_per_hour";
    pub const IMMEDIATE_DOWNTIME_HOURS: &str = "immediate_downtime_hours";
    pub const DELAYED_DOWNTIME_HOURS: &str = "delayed_downtime_hours_if_failure";
    pub const IMMEDIATE_LOSS_RATE: &str = "immediate_throughput_loss_rate";
    pub const DELAYED_LOSS_RATE: &str = "delayed_throughput_loss_rate";

    // 风险分档
    pub const HEALTHY_MIN: &str = "risk_band_healthy_min";
    pub const WARNING_MIN: &str = "risk_band_warning_min";

    // 预测器
    pub const STRESS_THRESHOLD: &str = "predictor_stress_threshold";
    pub const PREDICTOR_STEEPNESS: &str = "predictor_steepness";

    /// 各键的闭区间取值范围
    ///
    /// 健康相关阈值限定在 [0,100];成本、时长、速率与惩罚系数不得为负;
    /// 权重与压力阈值只要求有限
    pub fn bounds(key: &str) -> (f64, f64) {
        match key {
            DEFAULT_HEALTH | HEALTHY_MIN | WARNING_MIN => (0.0, 100.0),
            LATENESS_PENALTY_FACTOR
            | PREVENTIVE_COST
            | CORRECTIVE_COST
            | DOWNTIME_COST_PER_HOUR
            | IMMEDIATE_DOWNTIME_HOURS
            | DELAYED_DOWNTIME_HOURS
            | IMMEDIATE_LOSS_RATE
            | DELAYED_LOSS_RATE
            | PREDICTOR_STEEPNESS => (0.0, f64::MAX),
            _ => (f64::MIN, f64::MAX),
        }
    }

    pub const ALL: &[&str] = &[
        W_THROUGHPUT,
        W_RISK,
        W_COST,
        DEFAULT_HEALTH,
        LATENESS_PENALTY_FACTOR,
        PREVENTIVE_COST,
        CORRECTIVE_COST,
        DOWNTIME_COST_PER_HOUR,
        IMMEDIATE_DOWNTIME_HOURS,
        DELAYED_DOWNTIME_HOURS,
        IMMEDIATE_LOSS_RATE,
        DELAYED_LOSS_RATE,
        HEALTHY_MIN,
        WARNING_MIN,
        STRESS_THRESHOLD,
        PREDICTOR_STEEPNESS,
    ];
}
