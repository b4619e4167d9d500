// ==========================================
// 设备风险感知排产系统 - 预测质量指标
// ==========================================
// 职责: 以真实故障标签评估预测器 (accuracy / F1)
// 判定阈值: p >= 0.5 视为预测故障
// ==========================================

use serde::{Deserialize, Serialize};

pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// 参与评估的样本数 (有标签的设备)
    pub evaluated: usize,
    pub accuracy: f64,
    pub f1_score: f64,
}

impl ClassificationMetrics {
    /// 计算指标
    ///
    /// 输入为 (预测概率, 真实标签);无标签样本跳过。
    /// 分母为 0 时指标取 0
    pub fn calculate<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (f64, Option<bool>)>,
    {
        let mut tp = 0usize;
        let mut tn = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;

        for (probability, label) in samples {
            let Some(actual) = label else {
                continue;
            };
            let predicted = probability >= DECISION_THRESHOLD;
            match (predicted, actual) {
                (true, true) => tp += 1,
                (false, false) => tn += 1,
                (true, false) => fp += 1,
                (false, true) => fn_ += 1,
            }
        }

        let evaluated = tp + tn + fp + fn_;
        let accuracy = if evaluated == 0 {
            0.0
        } else {
            (tp + tn) as f64 / evaluated as f64
        };

        let f1_denominator = 2 * tp + fp + fn_;
        let f1_score = if f1_denominator == 0 {
            0.0
        } else {
            (2 * tp) as f64 / f1_denominator as f64
        };

        Self {
            evaluated,
            accuracy,
            f1_score,
        }
    }
}
