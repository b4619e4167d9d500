// ==========================================
// 设备风险感知排产系统 - 命令行主入口
// ==========================================
// 流程: 解析参数 → 初始化 AppState → 执行子命令 → JSON 输出
// ==========================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::json;

use machine_risk_aps::api::ApiError;
use machine_risk_aps::app::{get_default_db_path, AppState};
use machine_risk_aps::config::ScheduleWeights;
use machine_risk_aps::domain::Dataset;
use machine_risk_aps::importer::{DatasetGenerator, DatasetImporter};

use crate::cli::{CliArgs, Command, ConfigCommand};

#[tokio::main]
async fn main() -> Result<()> {
    machine_risk_aps::logging::init();

    let args = CliArgs::parse();

    tracing::info!("设备风险感知排产系统 v{}", machine_risk_aps::VERSION);

    let db_path = args.db.clone().unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    let importer = DatasetImporter::new(&args.data_dir);

    match args.command {
        Command::Generate {
            seed,
            machines,
            jobs,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let dataset = DatasetGenerator::new(seed)
                .with_counts(machines, jobs)
                .generate();
            importer
                .save(&dataset)
                .with_context(|| format!("写入数据集失败: {}", importer.data_dir().display()))?;

            print_json(&json!({
                "message": "Synthetic data generated",
                "seed": seed,
                "data_dir": importer.data_dir().display().to_string(),
                "machines": dataset.machines.len(),
                "jobs": dataset.jobs.len(),
            }))?;
        }
        Command::Train => {
            let dataset = load_dataset(&importer)?;
            let report = state.training_api.train(&dataset).await?;
            print_json(&report)?;
        }
        Command::Risk => {
            let risks = state.dashboard_api.list_machine_risks().await?;
            print_json(&risks)?;
        }
        Command::Simulate => {
            let results = state.dashboard_api.simulate_maintenance().await?;
            print_json(&results)?;
        }
        Command::Optimize {
            w_throughput,
            w_risk,
            w_cost,
        } => {
            let dataset = load_dataset(&importer)?;

            let weights = if w_throughput.is_none() && w_risk.is_none() && w_cost.is_none() {
                None
            } else {
                let configured = state.config_api.show().await?.schedule_weights;
                Some(ScheduleWeights::new(
                    w_throughput.unwrap_or(configured.w_throughput),
                    w_risk.unwrap_or(configured.w_risk),
                    w_cost.unwrap_or(configured.w_cost),
                ))
            };

            let report = state
                .dashboard_api
                .optimize_schedule(&dataset, weights)
                .await?;
            print_json(&report)?;
        }
        Command::Config { action } => match action {
            ConfigCommand::Show => {
                let config = state.config_api.show().await?;
                print_json(&config)?;
            }
            ConfigCommand::Set { key, value } => {
                state.config_api.set(&key, &value)?;
                print_json(&json!({ "key": key, "value": value, "status": "updated" }))?;
            }
        },
    }

    Ok(())
}

/// 从数据目录读取数据集;缺失时提示先生成数据
fn load_dataset(importer: &DatasetImporter) -> Result<Dataset, ApiError> {
    if !importer.exists() {
        return Err(ApiError::InsufficientInput(format!(
            "请先生成数据 (数据目录: {})",
            importer.data_dir().display()
        )));
    }
    Ok(importer.load()?.dataset)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
