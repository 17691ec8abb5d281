// ==========================================
// ABC 货位系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 职责: 结构性/配置性错误,整次调用立即中止
// 单行货位失败不走错误通道,见 domain::warehouse::Location
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 空行集、字段缺失/非数值、几何或巷道配置非法
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 分类尚未执行就查询派生结果（调用顺序错误）
    #[error("尚未执行 ABC 分析: 请先调用 perform")]
    NoAnalysisYet,
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
