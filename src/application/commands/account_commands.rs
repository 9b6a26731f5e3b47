//! Account Commands

/// 创建公众号账号命令
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub name: String,
    pub app_id: String,
    pub app_secret: String,
    pub token: Option<String>,
    pub encoding_aes_key: Option<String>,
    pub description: Option<String>,
}

/// 更新公众号账号命令（None 字段保持原值）
#[derive(Debug, Clone)]
pub struct UpdateAccount {
    pub account_id: i64,
    pub name: Option<String>,
    pub app_secret: Option<String>,
    pub token: Option<String>,
    pub encoding_aes_key: Option<String>,
    pub description: Option<String>,
}

/// 删除公众号账号命令
#[derive(Debug, Clone)]
pub struct DeleteAccount {
    pub account_id: i64,
}
