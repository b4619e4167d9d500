// ==========================================
// PredictionRepository 集成测试
// ==========================================
// 测试目标: 批次替换语义、查询顺序、最新批次
// ==========================================


use machine_risk_aps::repository::PredictionRepository;
use test_helpers::{create_test_db, create_test_prediction, open_shared_connection};

#[test]
fn test_empty_repository() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = PredictionRepository::new(&db_path).unwrap();

    assert_eq!(repo.count().unwrap(), 0);
    assert!(repo.find_all().unwrap().is_empty());
    assert!(repo.latest_run().unwrap().is_none());
    assert!(repo.find_by_machine_id("M1").unwrap().is_none());
}

#[test]
fn test_replace_all_keeps_insertion_order() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = PredictionRepository::new(&db_path).unwrap();

    let predictions = vec![
        create_test_prediction("M3", 0.9, 20.0),
        create_test_prediction("M1", 0.1, 85.0),
        create_test_prediction("M2", 0.5, 55.0),
    ];
    let inserted = repo.replace_all("run-1", &predictions).unwrap();

    assert_eq!(inserted, 3);
    assert_eq!(repo.find_all().unwrap(), predictions);
}

#[test]
fn test_replace_all_discards_previous_run() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = PredictionRepository::new(&db_path).unwrap();

    repo.replace_all(
        "run-1",
        &[
            create_test_prediction("M1", 0.2, 80.0),
            create_test_prediction("M2", 0.3, 70.0),
        ],
    )
    .unwrap();
    repo.replace_all("run-2", &[create_test_prediction("M1", 0.6, 40.0)])
        .unwrap();

    assert_eq!(repo.count().unwrap(), 1);
    assert!(repo.find_by_machine_id("M2").unwrap().is_none());

    let m1 = repo.find_by_machine_id("M1").unwrap().unwrap();
    assert_eq!(m1.failure_probability, 0.6);
    assert_eq!(m1.health_score, 40.0);

    let run = repo.latest_run().unwrap().unwrap();
    assert_eq!(run.run_id, "run-2");
    assert_eq!(run.count, 1);
}

#[test]
fn test_replace_with_empty_clears_store() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = PredictionRepository::new(&db_path).unwrap();

    repo.replace_all("run-1", &[create_test_prediction("M1", 0.2, 80.0)])
        .unwrap();
    assert_eq!(repo.replace_all("run-2", &[]).unwrap(), 0);
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn test_shared_connection_sees_writes() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_shared_connection(&db_path).unwrap();

    let writer = PredictionRepository::from_connection(conn.clone());
    let reader = PredictionRepository::from_connection(conn);

    writer
        .replace_all("run-1", &[create_test_prediction("M7", 0.4, 66.0)])
        .unwrap();

    assert_eq!(reader.find_all().unwrap().len(), 1);
}
