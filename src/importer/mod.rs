// ==========================================
// 设备风险感知排产系统 - 数据集导入/导出
// ==========================================
// 文件: <data_dir>/machines.csv + <data_dir>/jobs.csv
// 流程: CSV 解析 → 字段映射 → DQ 校验 → Dataset
// ==========================================

pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod generator;

pub use dq_validator::{numbered, DqLevel, DqSummary, DqValidator, DqViolation};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, CsvWriter};
pub use generator::DatasetGenerator;

use crate::domain::machine::Dataset;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const MACHINES_FILE: &str = "machines.csv";
pub const JOBS_FILE: &str = "jobs.csv";

/// 导入结果: 数据集 + DQ 明细
#[derive(Debug, Clone)]
pub struct DatasetImport {
    pub dataset: Dataset,
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

// ==========================================
// DatasetImporter - 数据目录读写门面
// ==========================================
pub struct DatasetImporter {
    data_dir: PathBuf,
}

impl DatasetImporter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn machines_path(&self) -> PathBuf {
        self.data_dir.join(MACHINES_FILE)
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data_dir.join(JOBS_FILE)
    }

    /// 两个数据文件是否都存在
    pub fn exists(&self) -> bool {
        self.machines_path().exists() && self.jobs_path().exists()
    }

    /// 读取数据集
    ///
    /// # 返回
    /// - Err(DataQualityError): 存在 Error 级违规
    /// - Ok: Warning 级违规随结果返回
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub fn load(&self) -> ImportResult<DatasetImport> {
        let mapper = FieldMapper;

        let machine_rows = CsvParser.parse_to_raw_records(&self.machines_path())?;
        let machines = machine_rows
            .iter()
            .map(|(row_number, row)| mapper.map_to_machine(row, *row_number))
            .collect::<ImportResult<Vec<_>>>()?;

        let job_rows = CsvParser.parse_to_raw_records(&self.jobs_path())?;
        let jobs = job_rows
            .iter()
            .map(|(row_number, row)| mapper.map_to_job(row, *row_number))
            .collect::<ImportResult<Vec<_>>>()?;

        // DQ 违规沿用解析阶段的源文件行号
        let machine_types: HashSet<&str> =
            machines.iter().map(|m| m.machine_type.as_str()).collect();
        let mut violations = DqValidator
            .validate_machines(machine_rows.iter().map(|(n, _)| *n).zip(machines.iter()));
        violations.extend(DqValidator.validate_jobs(
            job_rows.iter().map(|(n, _)| *n).zip(jobs.iter()),
            &machine_types,
        ));

        let summary = DqSummary::from_violations(machines.len() + jobs.len(), &violations);
        if summary.error > 0 {
            let first = violations
                .iter()
                .find(|v| v.level == DqLevel::Error)
                .map(|v| format!("行 {} 字段 {}: {}", v.row_number, v.field, v.message))
                .unwrap_or_default();
            return Err(ImportError::DataQualityError {
                errors: summary.error,
                first,
            });
        }

        for v in &violations {
            warn!(
                row = v.row_number,
                record_id = v.record_id.as_deref().unwrap_or(""),
                field = %v.field,
                "{}",
                v.message
            );
        }

        info!(
            machines = machines.len(),
            jobs = jobs.len(),
            warnings = summary.warning,
            "数据集加载完成"
        );

        Ok(DatasetImport {
            dataset: Dataset::new(machines, jobs),
            summary,
            violations,
        })
    }

    /// 覆盖写入数据集（目录不存在时创建）
    pub fn save(&self, dataset: &Dataset) -> ImportResult<()> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", self.data_dir.display(), e)))?;

        CsvWriter.write_records(&self.machines_path(), &dataset.machines)?;
        CsvWriter.write_records(&self.jobs_path(), &dataset.jobs)?;

        info!(
            data_dir = %self.data_dir.display(),
            machines = dataset.machines.len(),
            jobs = dataset.jobs.len(),
            "数据集已写入"
        );
        Ok(())
    }
}
