// ==========================================
// 设备风险感知排产系统 - 设备与作业领域模型
// ==========================================
// 职责: 设备遥测、生产作业、数据集上下文
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Machine - 设备
// ==========================================
// 静态属性主要供故障预测器使用;
// 健康评分只直接读取 avg_vibration / avg_temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub machine_id: String,   // 设备ID (唯一)
    pub machine_type: String, // 能力类型 (CNC / Lathe / ...)

    // ===== 设备档案 =====
    pub installation_year: i32,     // 投产年份
    pub machine_age: f64,           // 设备年限 (年)
    pub total_run_hours: f64,       // 累计运行小时
    pub avg_load_percentage: f64,   // 平均负载 (%)
    pub daily_operating_hours: f64, // 日运行小时
    pub capacity_per_hour: f64,     // 小时产能 (件/小时)

    // ===== 传感器指标 =====
    pub avg_temperature: f64,         // 平均温度 (°C)
    pub avg_vibration: f64,           // 平均振动 (mm/s)
    pub energy_consumption_rate: f64, // 能耗 (kW)

    // ===== 维护历史 =====
    pub last_maintenance_days: i32,        // 距上次维护天数
    pub failure_history_count: i32,        // 历史故障次数
    pub downtime_hours_last_year: f64,     // 去年停机小时
    pub maintenance_cost_last_year: f64,   // 去年维护费用

    // ===== 监督标签 =====
    #[serde(default)]
    pub failure_label: Option<bool>, // 真实故障标签 (可缺失)
}

// ==========================================
// Job - 生产作业
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,                // 作业ID (唯一)
    pub required_machine_type: String, // 所需设备能力类型
    pub processing_time_hours: f64,    // 加工时长 (小时, >0)
    pub load_requirement_percentage: f64, // 负载需求 (%)
    pub priority_level: i32,           // 优先级 (越大越重要)
    pub deadline_hours: f64,           // 交期 (距排产起点小时数)
    pub revenue_per_job: f64,          // 作业收入 (>=0)
}

// ==========================================
// Dataset - 当前会话的数据集
// ==========================================
// 显式传递给各操作,不使用进程级全局状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub machines: Vec<Machine>,
    pub jobs: Vec<Job>,
}

impl Dataset {
    pub fn new(machines: Vec<Machine>, jobs: Vec<Job>) -> Self {
        Self { machines, jobs }
    }

    /// 是否缺少设备或作业 (排产前置条件不满足)
    pub fn is_incomplete(&self) -> bool {
        self.machines.is_empty() || self.jobs.is_empty()
    }
}
