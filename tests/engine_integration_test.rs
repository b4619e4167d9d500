// ==========================================
// 引擎层集成测试
// ==========================================
// 流程: RiskPipeline → MaintenanceSimulator / RiskBandClassifier → ScheduleOptimizer
// 不依赖数据库
// ==========================================


use std::sync::Arc;

use machine_risk_aps::config::{MaintenanceParams, OptimizerParams, ScheduleWeights};
use machine_risk_aps::domain::{Machine, RiskLevel};
use machine_risk_aps::engine::{
    EngineError, EngineResult, FailurePredictor, HealthScorer, MaintenanceSimulator,
    RiskBandClassifier, RiskPipeline, ScheduleKpi, ScheduleOptimizer, StressIndexPredictor,
};
use test_helpers::{create_test_job, create_test_machine};

/// 固定概率预测器 (按设备ID查表)
struct FixedPredictor;

impl FailurePredictor for FixedPredictor {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, machine: &Machine) -> EngineResult<f64> {
        Ok(match machine.machine_id.as_str() {
            "M1" => 0.0,
            "M2" => 1.0,
            _ => 0.5,
        })
    }
}

fn sample_machines() -> Vec<Machine> {
    vec![
        create_test_machine("M1", "CNC", 2.0, 0.0, 40.0),
        create_test_machine("M2", "CNC", 9.0, 5.0, 100.0),
        create_test_machine("M3", "Lathe", 5.0, 2.5, 70.0),
    ]
}

#[test]
fn test_pipeline_with_custom_predictor() {
    let pipeline = RiskPipeline::new(Arc::new(FixedPredictor));
    let assessment = pipeline.assess(&sample_machines()).unwrap();

    assert_eq!(assessment.predictor, "fixed");
    let health: Vec<f64> = assessment.predictions.iter().map(|p| p.health_score).collect();
    assert_eq!(health[0], 100.0);
    assert_eq!(health[1], 0.0);
    assert_eq!(
        health[2],
        HealthScorer::new().score(0.5, 2.5, 70.0).unwrap()
    );

    // 无标签: 不参与评估
    assert_eq!(assessment.metrics.evaluated, 0);
    assert_eq!(assessment.metrics.accuracy, 0.0);

    let views = RiskBandClassifier::default().classify_predictions(&assessment.predictions);
    assert_eq!(views[0].risk_level, RiskLevel::Healthy);
    assert_eq!(views[1].risk_level, RiskLevel::HighRisk);
}

#[test]
fn test_pipeline_feeds_simulator() {
    let pipeline = RiskPipeline::new(Arc::new(FixedPredictor));
    let assessment = pipeline.assess(&sample_machines()).unwrap();

    let results = MaintenanceSimulator::new(MaintenanceParams::default())
        .simulate(&assessment.predictions)
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].machine_id, "M1");
    assert_eq!(results[0].delayed.cost, 0.0);
    assert_eq!(results[0].delayed.downtime, 0.0);
    assert_eq!(results[1].delayed.cost, 2600.0);
    assert_eq!(results[1].delayed.downtime, 6.0);
    assert_eq!(results[2].delayed.cost, 1300.0);
    assert_eq!(results[2].delayed.production_loss, 240.0);
}

#[test]
fn test_pipeline_feeds_optimizer() {
    let machines = sample_machines();
    let jobs = vec![
        create_test_job("J1", "CNC", 3.0, 5, 10.0, 1000.0),
        create_test_job("J2", "CNC", 4.0, 5, 20.0, 1000.0),
        create_test_job("J3", "Lathe", 2.0, 1, 5.0, 800.0),
        create_test_job("J4", "Drill", 1.0, 3, 5.0, 800.0),
    ];

    let assessment = RiskPipeline::new(Arc::new(FixedPredictor))
        .assess(&machines)
        .unwrap();

    // 只看风险: 所有 CNC 作业都落在健康的 M1
    let optimizer = ScheduleOptimizer::new(OptimizerParams::default());
    let result = optimizer
        .optimize(
            &machines,
            &jobs,
            &assessment.predictions,
            ScheduleWeights::new(0.0, 1.0, 0.0),
        )
        .unwrap();

    let m1 = &result.machine_schedules["M1"];
    let spans: Vec<(f64, f64)> = m1.schedule.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(0.0, 3.0), (3.0, 7.0)]);
    assert!(result.machine_schedules["M2"].schedule.is_empty());
    assert_eq!(result.machine_schedules["M3"].schedule.len(), 1);
    assert_eq!(result.unassigned_jobs, vec!["J4".to_string()]);

    let kpi = ScheduleKpi::calculate(&result, &jobs);
    assert_eq!(kpi.assigned_jobs, 3);
    assert_eq!(kpi.unassigned_jobs, 1);
    assert_eq!(kpi.makespan_hours, 7.0);
    assert_eq!(kpi.total_tardiness_hours, 0.0);
}

#[test]
fn test_default_predictor_end_to_end_is_deterministic() {
    let machines = sample_machines();
    let jobs: Vec<_> = (1..=12)
        .map(|i| {
            create_test_job(
                &format!("J{}", i),
                if i % 3 == 0 { "Lathe" } else { "CNC" },
                (i % 4 + 1) as f64,
                (i % 5 + 1) as i32,
                (i * 6) as f64,
                500.0 + (i * 250) as f64,
            )
        })
        .collect();

    let run = || {
        let assessment = RiskPipeline::new(Arc::new(StressIndexPredictor::default()))
            .assess(&machines)
            .unwrap();
        ScheduleOptimizer::default()
            .optimize(&machines, &jobs, &assessment.predictions, ScheduleWeights::default())
            .unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.assigned_count(), 12);
}

#[test]
fn test_empty_inputs_are_insufficient() {
    let pipeline = RiskPipeline::new(Arc::new(FixedPredictor));
    assert!(matches!(
        pipeline.assess(&[]),
        Err(EngineError::InsufficientInput(_))
    ));

    let result = ScheduleOptimizer::default().optimize(
        &sample_machines(),
        &[create_test_job("J1", "CNC", 1.0, 1, 1.0, 1.0)],
        &[],
        ScheduleWeights::default(),
    );
    assert!(matches!(result, Err(EngineError::InsufficientInput(_))));
}
