// ==========================================
// 设备风险感知排产系统 - 字段映射器
// ==========================================
// 职责: 原始行 → Machine / Job + 类型转换
// 表头: snake_case,与领域字段同名
// ==========================================

use crate::domain::machine::{Job, Machine};
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use std::str::FromStr;

pub struct FieldMapper;

impl FieldMapper {
    pub fn map_to_machine(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<Machine> {
        Ok(Machine {
            machine_id: self.require_string(row, "machine_id", row_number)?,
            machine_type: self.require_string(row, "machine_type", row_number)?,

            installation_year: self.parse_required(row, "installation_year", row_number)?,
            machine_age: self.parse_required(row, "machine_age", row_number)?,
            total_run_hours: self.parse_required(row, "total_run_hours", row_number)?,
            avg_load_percentage: self.parse_required(row, "avg_load_percentage", row_number)?,
            daily_operating_hours: self.parse_required(row, "daily_operating_hours", row_number)?,
            capacity_per_hour: self.parse_required(row, "capacity_per_hour", row_number)?,

            avg_temperature: self.parse_required(row, "avg_temperature", row_number)?,
            avg_vibration: self.parse_required(row, "avg_vibration", row_number)?,
            energy_consumption_rate: self.parse_required(row, "energy_consumption_rate", row_number)?,

            last_maintenance_days: self.parse_required(row, "last_maintenance_days", row_number)?,
            failure_history_count: self.parse_required(row, "failure_history_count", row_number)?,
            downtime_hours_last_year: self.parse_required(row, "downtime_hours_last_year", row_number)?,
            maintenance_cost_last_year: self
                .parse_required(row, "maintenance_cost_last_year", row_number)?,

            failure_label: self.parse_flag(row, "failure_label", row_number)?,
        })
    }

    pub fn map_to_job(&self, row: &HashMap<String, String>, row_number: usize) -> ImportResult<Job> {
        Ok(Job {
            job_id: self.require_string(row, "job_id", row_number)?,
            required_machine_type: self.require_string(row, "required_machine_type", row_number)?,
            processing_time_hours: self.parse_required(row, "processing_time_hours", row_number)?,
            load_requirement_percentage: self
                .parse_required(row, "load_requirement_percentage", row_number)?,
            priority_level: self.parse_required(row, "priority_level", row_number)?,
            deadline_hours: self.parse_required(row, "deadline_hours", row_number)?,
            revenue_per_job: self.parse_required(row, "revenue_per_job", row_number)?,
        })
    }

    /// 提取非空字符串
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require_string(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    fn parse_required<T>(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.require_string(row, key, row_number)?;
        value.parse::<T>().map_err(|e| ImportError::TypeConversionError {
            row: row_number,
            field: key.to_string(),
            message: format!("无法解析 '{}': {}", value, e),
        })
    }

    /// 解析布尔标记 (true/false/1/0),空值视为缺失
    fn parse_flag(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<bool>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(Some(true)),
                "0" | "false" | "no" => Ok(Some(false)),
                _ => Err(ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析布尔值 '{}'", value),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_row() -> HashMap<String, String> {
        [
            ("job_id", "J1"),
            ("required_machine_type", "CNC"),
            ("processing_time_hours", "3"),
            ("load_requirement_percentage", "60"),
            ("priority_level", "4"),
            ("deadline_hours", "24.5"),
            ("revenue_per_job", "1200"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_map_job() {
        let job = FieldMapper.map_to_job(&job_row(), 1).unwrap();
        assert_eq!(job.job_id, "J1");
        assert_eq!(job.priority_level, 4);
        assert_eq!(job.deadline_hours, 24.5);
    }

    #[test]
    fn test_map_job_missing_field_reports_row() {
        let mut row = job_row();
        row.insert("revenue_per_job".to_string(), " ".to_string());

        match FieldMapper.map_to_job(&row, 7) {
            Err(ImportError::MissingField { row, field }) => {
                assert_eq!(row, 7);
                assert_eq!(field, "revenue_per_job");
            }
            other => panic!("期望 MissingField,实际 {:?}", other),
        }
    }

    #[test]
    fn test_map_job_bad_number_reports_field() {
        let mut row = job_row();
        row.insert("priority_level".to_string(), "high".to_string());

        let err = FieldMapper.map_to_job(&row, 3).unwrap_err();
        assert!(matches!(
            err,
            ImportError::TypeConversionError { row: 3, ref field, .. } if field == "priority_level"
        ));
    }

    #[test]
    fn test_parse_flag_variants() {
        let mut row = HashMap::new();
        let mapper = FieldMapper;

        assert_eq!(mapper.parse_flag(&row, "failure_label", 1).unwrap(), None);
        row.insert("failure_label".to_string(), "1".to_string());
        assert_eq!(mapper.parse_flag(&row, "failure_label", 1).unwrap(), Some(true));
        row.insert("failure_label".to_string(), "False".to_string());
        assert_eq!(mapper.parse_flag(&row, "failure_label", 1).unwrap(), Some(false));
        row.insert("failure_label".to_string(), "maybe".to_string());
        assert!(mapper.parse_flag(&row, "failure_label", 1).is_err());
    }
}
