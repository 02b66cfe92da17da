//! 请求 DTO 定义
//!
//! REST API 的请求参数结构。创建/更新的请求体以原始 JSON 文档接收，
//! 由校验门负责字段级检查，因此没有对应的类型化 DTO。

use serde::Deserialize;

/// 列表分页查询参数
///
/// page 和 limit 以原始字符串接收：缺失或无法解析为数字时回退到
/// 默认值（page=1, limit=10），而不是拒绝请求。
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// limit 上限，防止单次查询拖垮数据库
const MAX_LIMIT: i64 = 100;

impl PageQuery {
    /// 当前页码（从 1 开始）
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// 每页条数（1-100）
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|l| *l >= 1)
            .unwrap_or(10)
            .min(MAX_LIMIT)
    }

    /// 计算数据库查询的 offset
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}
