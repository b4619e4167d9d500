// ==========================================
// 设备风险感知排产系统 - 性能观测
// ==========================================
// 职责: API 调用耗时 + SQL 语句计数 + 慢 SQL 告警
// 开关:
// - MACHINE_RISK_APS_PERF_SQL=1 开启 SQL 统计 (Debug 默认开启)
// - MACHINE_RISK_APS_SLOW_SQL_MS=50 慢 SQL 阈值 (毫秒)
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const PERF_SQL_ENV: &str = "MACHINE_RISK_APS_PERF_SQL";
const SLOW_SQL_ENV: &str = "MACHINE_RISK_APS_SLOW_SQL_MS";

static SQL_STATS_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static SQL_COUNT: Cell<u64> = const { Cell::new(0) };
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// 为连接安装 trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag(PERF_SQL_ENV).unwrap_or(cfg!(debug_assertions));
    SQL_STATS_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var(SLOW_SQL_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(50);
    SLOW_SQL_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(on_sql_statement));
    conn.profile(Some(on_sql_profile));
}

fn on_sql_statement(_sql: &str) {
    if SQL_STATS_ENABLED.load(Ordering::Relaxed) {
        SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

fn on_sql_profile(sql: &str, duration: Duration) {
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    let ms = duration.as_millis() as u64;
    if threshold > 0 && ms >= threshold {
        let sql_short: String = sql.trim().replace('\n', " ").chars().take(300).collect();
        tracing::warn!(target: "slow_sql", duration_ms = ms, sql = %sql_short, "slow sql");
    }
}

/// 作用域耗时统计
///
/// ```ignore
/// let _perf = machine_risk_aps::perf::PerfGuard::new("api.optimize_schedule");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start);
        tracing::info!(target: "perf", op = self.op, elapsed_ms, sql_count, "done");
    }
}
