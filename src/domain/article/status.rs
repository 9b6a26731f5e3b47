//! Article Context - 文章状态

use serde::{Deserialize, Serialize};

/// 文章状态
///
/// 数值编码与对外 API 保持一致:
/// - 1 = 已上线
/// - 2 = 待发布
/// - 3 = 已删除
///
/// DTO 层不限制状态跳转，{1,2,3} 之间任意切换均被接受；
/// 状态与发布时间的矛盾只作为业务规则提示，不做硬拦截。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleStatus {
    /// 已上线
    Active,
    /// 待发布
    Pending,
    /// 已删除
    Deleted,
}

impl ArticleStatus {
    pub fn as_i32(&self) -> i32 {
        match self {
            ArticleStatus::Active => 1,
            ArticleStatus::Pending => 2,
            ArticleStatus::Deleted => 3,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(ArticleStatus::Active),
            2 => Some(ArticleStatus::Pending),
            3 => Some(ArticleStatus::Deleted),
            _ => None,
        }
    }

    /// 展示用状态文案
    pub fn description(&self) -> &'static str {
        match self {
            ArticleStatus::Active => "已上线",
            ArticleStatus::Pending => "待发布",
            ArticleStatus::Deleted => "已删除",
        }
    }
}

impl Default for ArticleStatus {
    fn default() -> Self {
        ArticleStatus::Pending
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for code in 1..=3 {
            let status = ArticleStatus::from_i32(code).unwrap();
            assert_eq!(status.as_i32(), code);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(ArticleStatus::from_i32(0).is_none());
        assert!(ArticleStatus::from_i32(4).is_none());
        assert!(ArticleStatus::from_i32(-1).is_none());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ArticleStatus::default(), ArticleStatus::Pending);
    }
}
