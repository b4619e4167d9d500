// ==========================================
// 设备风险感知排产系统 - 风险预测数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: machine_prediction
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::prediction::Prediction;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::info;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// 最近一次训练批次信息
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRun {
    pub run_id: String,
    pub created_at: NaiveDateTime,
    pub count: usize,
}

// ==========================================
// PredictionRepository - 风险预测仓储
// ==========================================
/// 职责: 管理 machine_prediction 表
/// 用途: 训练写入;维护模拟 / 排产 / 驾驶舱读取
pub struct PredictionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PredictionRepository {
    /// 创建新的 PredictionRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 替换全部预测（清空上一批次后写入新批次）
    ///
    /// # 说明
    /// - 单事务完成,读方要么看到旧批次、要么看到新批次
    /// - 写入顺序即 find_all 的返回顺序
    pub fn replace_all(&self, run_id: &str, predictions: &[Prediction]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let removed = tx.execute("DELETE FROM machine_prediction", [])?;

        let created_at = Utc::now().naive_utc().format(DATETIME_FMT).to_string();
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO machine_prediction (
                    run_id, machine_id, failure_probability, health_score, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for p in predictions {
                stmt.execute(params![
                    run_id,
                    p.machine_id,
                    p.failure_probability,
                    p.health_score,
                    created_at,
                ])?;
                count += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(run_id, removed, inserted = count, "风险预测已替换");
        Ok(count)
    }

    /// 查询全部预测（按写入顺序）
    pub fn find_all(&self) -> RepositoryResult<Vec<Prediction>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT machine_id, failure_probability, health_score
            FROM machine_prediction
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], map_prediction_row)?;
        let mut predictions = Vec::new();
        for row in rows {
            predictions.push(row?);
        }
        Ok(predictions)
    }

    /// 按设备查询最新预测
    pub fn find_by_machine_id(&self, machine_id: &str) -> RepositoryResult<Option<Prediction>> {
        let conn = self.get_conn()?;
        let result = conn
            .query_row(
                r#"
                SELECT machine_id, failure_probability, health_score
                FROM machine_prediction
                WHERE machine_id = ?1
                ORDER BY id DESC
                LIMIT 1
                "#,
                params![machine_id],
                map_prediction_row,
            )
            .optional()?;
        Ok(result)
    }

    /// 预测记录数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM machine_prediction", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// 最近一次训练批次（无数据时为 None）
    pub fn latest_run(&self) -> RepositoryResult<Option<PredictionRun>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT run_id, created_at, COUNT(*)
                FROM machine_prediction
                GROUP BY run_id, created_at
                ORDER BY MAX(id) DESC
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((run_id, created_at, count)) => {
                let created_at = NaiveDateTime::parse_from_str(&created_at, DATETIME_FMT).map_err(|e| {
                    RepositoryError::FieldValueError {
                        field: "created_at".to_string(),
                        message: e.to_string(),
                    }
                })?;
                Ok(Some(PredictionRun {
                    run_id,
                    created_at,
                    count: count as usize,
                }))
            }
        }
    }
}

fn map_prediction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prediction> {
    Ok(Prediction {
        machine_id: row.get(0)?,
        failure_probability: row.get(1)?,
        health_score: row.get(2)?,
    })
}
