// ==========================================
// 数据集导入/导出集成测试
// ==========================================
// 测试目标: 数据目录读写、缺失文件、DQ 阻断
// ==========================================

use machine_risk_aps::importer::{
    DatasetGenerator, DatasetImporter, DqLevel, ImportError, JOBS_FILE, MACHINES_FILE,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_then_load_generated_dataset() {
    let dir = TempDir::new().unwrap();
    let importer = DatasetImporter::new(dir.path().join("data"));
    let dataset = DatasetGenerator::new(2024).generate();

    assert!(!importer.exists());
    importer.save(&dataset).unwrap();
    assert!(importer.exists());

    let import = importer.load().unwrap();
    assert_eq!(import.dataset, dataset);
    assert_eq!(import.summary.total_rows, 60);
    assert_eq!(import.summary.error, 0);
}

#[test]
fn test_load_missing_files() {
    let dir = TempDir::new().unwrap();
    let importer = DatasetImporter::new(dir.path());

    let result = importer.load();
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_load_blocks_on_duplicate_job_ids() {
    let dir = TempDir::new().unwrap();
    let importer = DatasetImporter::new(dir.path());
    let mut dataset = DatasetGenerator::new(5).with_counts(3, 4).generate();
    dataset.jobs[3].job_id = dataset.jobs[0].job_id.clone();
    importer.save(&dataset).unwrap();

    match importer.load() {
        Err(ImportError::DataQualityError { errors, first }) => {
            assert_eq!(errors, 1);
            assert!(first.contains("job_id"));
        }
        other => panic!("期望 DataQualityError,实际 {:?}", other.map(|i| i.summary)),
    }
}

#[test]
fn test_load_reports_row_of_bad_value() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(MACHINES_FILE),
        "machine_id,machine_type,installation_year,machine_age,total_run_hours,avg_load_percentage,\
daily_operating_hours,capacity_per_hour,avg_temperature,avg_vibration,energy_consumption_rate,\
last_maintenance_days,failure_history_count,downtime_hours_last_year,maintenance_cost_last_year,failure_label\n\
M1,CNC,2019,5,9000,70,16,12,60,2.5,30,20,1,50,4000,false\n\
M2,CNC,2019,5,9000,70,16,12,hot,2.5,30,20,1,50,4000,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(JOBS_FILE),
        "job_id,required_machine_type,processing_time_hours,load_requirement_percentage,priority_level,deadline_hours,revenue_per_job\n\
J1,CNC,3,50,2,24,1000\n",
    )
    .unwrap();

    let result = DatasetImporter::new(dir.path()).load();
    match result {
        Err(ImportError::TypeConversionError { row, field, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "avg_temperature");
        }
        other => panic!("期望 TypeConversionError,实际 {:?}", other.map(|i| i.summary)),
    }
}

#[test]
fn test_warnings_do_not_block_load() {
    let dir = TempDir::new().unwrap();
    let importer = DatasetImporter::new(dir.path());
    let mut dataset = DatasetGenerator::new(8).with_counts(2, 2).generate();
    dataset.machines[0].machine_type = "CNC".to_string();
    dataset.machines[1].machine_type = "CNC".to_string();
    dataset.jobs[0].required_machine_type = "Laser".to_string();
    importer.save(&dataset).unwrap();

    let import = importer.load().unwrap();
    assert_eq!(import.summary.error, 0);
    assert!(import
        .violations
        .iter()
        .any(|v| v.level == DqLevel::Warning && v.field == "required_machine_type"));
}

#[test]
fn test_dq_errors_keep_source_row_numbers() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(MACHINES_FILE),
        "machine_id,machine_type,installation_year,machine_age,total_run_hours,avg_load_percentage,\
daily_operating_hours,capacity_per_hour,avg_temperature,avg_vibration,energy_consumption_rate,\
last_maintenance_days,failure_history_count,downtime_hours_last_year,maintenance_cost_last_year,failure_label\n\
M1,CNC,2019,5,9000,70,16,12,-5,2.5,30,20,1,50,4000,false\n",
    )
    .unwrap();
    // 第 2 行全空被跳过,重复 ID 位于源文件第 3 行
    fs::write(
        dir.path().join(JOBS_FILE),
        "job_id,required_machine_type,processing_time_hours,load_requirement_percentage,priority_level,deadline_hours,revenue_per_job\n\
J1,CNC,3,50,2,24,1000\n\
,,,,,,\n\
J1,CNC,4,60,1,48,800\n",
    )
    .unwrap();

    match DatasetImporter::new(dir.path()).load() {
        Err(ImportError::DataQualityError { errors, first }) => {
            assert_eq!(errors, 1, "低于 0 °C 的温度不应计为错误");
            assert!(first.starts_with("行 3 "), "实际: {}", first);
            assert!(first.contains("job_id"));
        }
        other => panic!("期望 DataQualityError,实际 {:?}", other.map(|i| i.summary)),
    }
}
