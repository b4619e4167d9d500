// ==========================================
// 设备风险感知排产系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,将下层错误转换为用户可读的错误消息
// 约定: 所有错误信息必须包含显式原因
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 前置条件错误
    // ==========================================
    /// 缺少数据集或预测 (如: 请先生成数据 / 请先运行训练)
    #[error("前置条件不满足: {0}")]
    InsufficientInput(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 导入/配置错误
    // ==========================================
    #[error("数据集读写失败: {0}")]
    ImportError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }

            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InsufficientInput(msg) => ApiError::InsufficientInput(msg),
            EngineError::InvalidInput { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => {
                ApiError::InsufficientInput(format!("请先生成数据 (文件不存在: {})", path))
            }
            ImportError::DataQualityError { .. } => ApiError::ValidationError(err.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 配置读取错误 → ApiError
pub(crate) fn config_error(err: Box<dyn std::error::Error>) -> ApiError {
    ApiError::ConfigError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        match ApiError::from(RepositoryError::LockError("poisoned".to_string())) {
            ApiError::DatabaseConnectionError(msg) => assert!(msg.contains("poisoned")),
            other => panic!("Expected DatabaseConnectionError, got {:?}", other),
        }

        let err = ApiError::from(RepositoryError::FieldValueError {
            field: "risk_level".to_string(),
            message: "未知风险等级".to_string(),
        });
        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("risk_level")));

        let err = ApiError::from(RepositoryError::UniqueConstraintViolation("machine_id".to_string()));
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }

    #[test]
    fn test_import_error_mapping() {
        let err = ApiError::from(ImportError::FileNotFound("jobs.csv".to_string()));
        assert!(matches!(err, ApiError::InsufficientInput(_)));

        let err = ApiError::from(ImportError::DataQualityError {
            errors: 2,
            first: "行 3 字段 job_id: 重复作业ID".to_string(),
        });
        assert!(matches!(err, ApiError::ValidationError(ref msg) if msg.contains("行 3")));

        let err = ApiError::from(ImportError::CsvParseError("bad quote".to_string()));
        assert!(matches!(err, ApiError::ImportError(_)));
    }
}
