//! Pagination - 分页计算
//!
//! 三个输入（页码 / 每页大小 / 总数）在入口处收敛到合法区间，
//! 所有派生值都是输入的纯函数，按需计算，不缓存中间状态。

use serde::Serialize;

/// 每页大小上限
pub const MAX_PER_PAGE: u64 = 100;

/// 默认每页大小
pub const DEFAULT_PER_PAGE: u64 = 20;

/// 分页状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u64,
    per_page: u64,
    total_items: u64,
}

impl Pagination {
    /// 由原始入参构造，入参可为任意整数，构造时收敛:
    /// - `current_page` >= 1
    /// - `per_page` ∈ [1, 100]
    /// - `total_items` >= 0
    pub fn compute(current_page: i64, per_page: i64, total_items: i64) -> Self {
        Self {
            current_page: current_page.max(1) as u64,
            per_page: per_page.clamp(1, MAX_PER_PAGE as i64) as u64,
            total_items: total_items.max(0) as u64,
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// 修改页码，重新收敛
    pub fn set_page(&mut self, page: i64) {
        self.current_page = page.max(1) as u64;
    }

    /// 修改每页大小，重新收敛
    pub fn set_per_page(&mut self, per_page: i64) {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE as i64) as u64;
    }

    /// 修改总数，重新收敛
    pub fn set_total_items(&mut self, total_items: i64) {
        self.total_items = total_items.max(0) as u64;
    }

    /// 总页数 = ceil(total / per_page)
    pub fn total_pages(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            (self.total_items + self.per_page - 1) / self.per_page
        }
    }

    /// 查询偏移量 = (page - 1) * per_page
    pub fn offset(&self) -> u64 {
        (self.current_page - 1) * self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn prev_page(&self) -> Option<u64> {
        if self.has_prev() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    pub fn next_page(&self) -> Option<u64> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    /// 当前页第一条的展示序号（1 起），无数据时为 0
    pub fn from(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// 当前页最后一条的展示序号，无数据时为 0
    pub fn to(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            (self.offset() + self.per_page).min(self.total_items)
        }
    }

    /// 页码是否在有效区间 [1, total_pages]
    pub fn is_valid_page(&self, page: i64) -> bool {
        page >= 1 && (page as u64) <= self.total_pages()
    }

    /// 以当前页为中心、半径 radius 的页码窗口（含端点）
    ///
    /// 无任何页时返回空
    pub fn page_range(&self, radius: u64) -> Vec<u64> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return Vec::new();
        }
        let start = self.current_page.saturating_sub(radius).max(1);
        let end = (self.current_page + radius).min(total_pages);
        if start > end {
            return Vec::new();
        }
        (start..=end).collect()
    }

    /// 紧凑元数据形式
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total_items,
            last_page: self.total_pages(),
            from: self.from(),
            to: self.to(),
        }
    }

    /// 链接形式，URL 由调用方的 `url_for` 生成
    pub fn links<F>(&self, url_for: F) -> PageLinks
    where
        F: Fn(u64) -> String,
    {
        let total_pages = self.total_pages();
        PageLinks {
            first: (total_pages > 0).then(|| url_for(1)),
            prev: self.prev_page().map(&url_for),
            next: self.next_page().map(&url_for),
            last: (total_pages > 0).then(|| url_for(total_pages)),
        }
    }
}

/// 分页元数据（紧凑形式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    pub from: u64,
    pub to: u64,
}

/// 分页链接（first/prev/next/last）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}
