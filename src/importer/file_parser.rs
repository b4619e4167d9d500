// ==========================================
// 设备风险感知排产系统 - CSV 文件读写
// ==========================================
// 读取: 表头 + 数据行 → 原始行 (列名 → 字符串)
// 写入: 领域对象 serde 序列化为 CSV (snake_case 表头)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行: (数据行号, 列名 → 去空白后的值)
///
/// 行号从 1 开始计数,不含表头
pub type RawRow = (usize, HashMap<String, String>);

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push((row_idx + 1, row_map));
        }

        Ok(records)
    }
}

// ==========================================
// CSV Writer
// ==========================================
pub struct CsvWriter;

impl CsvWriter {
    /// 覆盖写入 CSV 文件（表头取自结构体字段名）
    pub fn write_records<T: Serialize>(&self, file_path: &Path, records: &[T]) -> ImportResult<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(true)
            .from_path(file_path)
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", file_path.display(), e)))?;

        for record in records {
            writer.serialize(record)?;
        }

        writer
            .flush()
            .map_err(|e| ImportError::FileWriteError(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn csv_file(contents: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in contents {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["job_id,processing_time_hours", "J1,2.5", "J2, 3 "]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[0].1.get("job_id"), Some(&"J1".to_string()));
        assert_eq!(records[1].1.get("processing_time_hours"), Some(&"3".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_rejects_other_extensions() {
        let temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let result = CsvParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["job_id,revenue_per_job", "J1,100", ",", "J2,200"]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        // 行号保留原始位置
        assert_eq!(records[1].0, 3);
    }

    #[derive(Serialize)]
    struct Row {
        id: String,
        value: Option<f64>,
    }

    #[test]
    fn test_csv_writer_then_parser() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = vec![
            Row { id: "A".to_string(), value: Some(1.5) },
            Row { id: "B".to_string(), value: None },
        ];

        CsvWriter.write_records(&path, &rows).unwrap();
        let records = CsvParser.parse_to_raw_records(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1.get("value"), Some(&"1.5".to_string()));
        assert_eq!(records[1].1.get("value"), Some(&"".to_string()));
    }
}
