// ==========================================
// 设备风险感知排产系统 - 领域类型定义
// ==========================================
// 职责: 跨模块共享的枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 由健康评分分档得到,供驾驶舱展示
// 排序: Healthy < Warning < HighRisk (越大越危险)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Healthy")]
    Healthy, // 健康
    #[serde(rename = "Warning")]
    Warning, // 预警
    #[serde(rename = "High Risk")]
    HighRisk, // 高风险
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Healthy => "Healthy",
            RiskLevel::Warning => "Warning",
            RiskLevel::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "healthy" => Ok(RiskLevel::Healthy),
            "warning" => Ok(RiskLevel::Warning),
            "high risk" | "highrisk" => Ok(RiskLevel::HighRisk),
            other => Err(format!("未知风险等级: {}", other)),
        }
    }
}

// ==========================================
// 设备类型 (Machine Type)
// ==========================================
// 合成数据使用的标准能力类型;导入数据可以使用任意字符串类型
pub const STANDARD_MACHINE_TYPES: [&str; 4] = ["CNC", "Lathe", "Milling", "Drill"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serde_uses_dashboard_labels() {
        let json = serde_json::to_string(&RiskLevel::HighRisk).unwrap();
        assert_eq!(json, "\"High Risk\"");

        let parsed: RiskLevel = serde_json::from_str("\"Warning\"").unwrap();
        assert_eq!(parsed, RiskLevel::Warning);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::HighRisk > RiskLevel::Warning);
        assert!(RiskLevel::Warning > RiskLevel::Healthy);
    }

    #[test]
    fn test_risk_level_from_str() {
        assert_eq!("high_risk".parse::<RiskLevel>().unwrap(), RiskLevel::HighRisk);
        assert_eq!("Healthy".parse::<RiskLevel>().unwrap(), RiskLevel::Healthy);
        assert!("unknown".parse::<RiskLevel>().is_err());
    }
}
