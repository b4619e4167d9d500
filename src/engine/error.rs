// ==========================================
// 设备风险感知排产系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 引擎为纯计算,不存在重试语义;错误只分两类:
/// 前置条件不满足 / 输入数据违规
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 缺少设备、作业或预测数据
    #[error("输入不足: {0}")]
    InsufficientInput(String),

    /// 数值越界、重复ID等数据质量问题
    #[error("无效输入 (field={field}): {message}")]
    InvalidInput { field: String, message: String },
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

// ==========================================
// 通用校验辅助
// ==========================================

/// 校验数值有限
pub(crate) fn ensure_finite(field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, format!("数值非有限: {}", value)));
    }
    Ok(())
}

/// 校验数值位于闭区间 [min, max]
pub(crate) fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> EngineResult<()> {
    ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(EngineError::invalid(
            field,
            format!("值 {} 超出范围 [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}
