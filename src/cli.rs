// ==========================================
// 设备风险感知排产系统 - 命令行参数
// ==========================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 设备风险感知排产系统
///
/// 健康评分、维护策略对比与多目标排产;结果以 JSON 输出到 stdout
#[derive(Parser, Debug)]
#[command(name = "machine-risk-aps", version, about = "Risk-aware machine scheduling and maintenance decision support")]
pub struct CliArgs {
    /// SQLite 数据库路径 (默认: 用户数据目录)
    #[arg(long, global = true, env = "MACHINE_RISK_APS_DB_PATH")]
    pub db: Option<String>,

    /// 数据集目录 (machines.csv / jobs.csv)
    #[arg(long, global = true, default_value = "./data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 生成合成数据集并写入数据目录
    Generate {
        /// 随机种子 (不指定时随机)
        #[arg(long)]
        seed: Option<u64>,

        /// 设备数量
        #[arg(long, default_value_t = 10)]
        machines: usize,

        /// 作业数量
        #[arg(long, default_value_t = 50)]
        jobs: usize,
    },

    /// 运行风险评估并替换已存预测
    Train,

    /// 查询设备风险分档
    Risk,

    /// 立即维护 vs 延后维护对比
    Simulate,

    /// 多目标排产 (未指定的权重取配置值)
    Optimize {
        #[arg(long)]
        w_throughput: Option<f64>,

        #[arg(long)]
        w_risk: Option<f64>,

        #[arg(long)]
        w_cost: Option<f64>,
    },

    /// 配置管理
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 显示生效配置
    Show,

    /// 覆写单项配置
    Set { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optimize_with_weights() {
        let args = CliArgs::try_parse_from([
            "machine-risk-aps",
            "--db",
            "test.db",
            "optimize",
            "--w-risk",
            "0.9",
        ])
        .unwrap();

        assert_eq!(args.db.as_deref(), Some("test.db"));
        assert_eq!(args.data_dir, PathBuf::from("./data"));
        match args.command {
            Command::Optimize {
                w_throughput,
                w_risk,
                w_cost,
            } => {
                assert_eq!(w_throughput, None);
                assert_eq!(w_risk, Some(0.9));
                assert_eq!(w_cost, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let args = CliArgs::try_parse_from(["machine-risk-aps", "config", "set", "w_cost", "0.5"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Config { action: ConfigCommand::Set { ref key, ref value } }
                if key == "w_cost" && value == "0.5"
        ));
    }

    #[test]
    fn test_generate_defaults() {
        let args = CliArgs::try_parse_from(["machine-risk-aps", "generate"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Generate { seed: None, machines: 10, jobs: 50 }
        ));
    }
}
