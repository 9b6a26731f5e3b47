//! Account Queries

/// 获取账号详情查询
#[derive(Debug, Clone)]
pub struct GetAccount {
    pub account_id: i64,
}

/// 列出所有账号查询
#[derive(Debug, Clone)]
pub struct ListAccounts;
