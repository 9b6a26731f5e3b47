//! Read Log DTOs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{clean_opt, rule, RuleErrors};
use crate::application::commands::{CleanupReadLogs, RecordReadLog};
use crate::application::ports::ReadLogRecord;

/// 单次阅读时长上限（一天）
const MAX_DURATION_SECS: i64 = 86_400;

/// 清理保留天数下限
const MIN_KEEP_DAYS: i64 = 7;

fn default_keep_days() -> i64 {
    90
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

// ============================================================================
// 记录阅读日志
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RecordReadLogRequest {
    pub article_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub duration_seconds: i64,
    #[serde(default)]
    pub is_completed: bool,
    /// 缺省时取服务端当前时间
    #[serde(default)]
    pub read_time: Option<DateTime<Utc>>,
}

impl RecordReadLogRequest {
    pub fn sanitize(mut self) -> Self {
        self.session_id = clean_opt(self.session_id);
        self.ip_address = clean_opt(self.ip_address);
        self
    }

    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();
        let now = Utc::now();

        if self.article_id <= 0 {
            rule(&mut errors, "article_id", "文章 ID 必须为正数");
        }

        if self.duration_seconds < 0 {
            rule(&mut errors, "duration", "阅读时长不能为负数");
        } else if self.is_completed && self.duration_seconds == 0 {
            rule(&mut errors, "duration", "读完的记录阅读时长不能为 0");
        } else if self.duration_seconds > MAX_DURATION_SECS {
            rule(&mut errors, "duration", "阅读时长不能超过一天");
        }

        // 至少要有一种身份来源
        let has_identity =
            self.user_id > 0 || self.session_id.is_some() || self.ip_address.is_some();
        if !has_identity {
            rule(
                &mut errors,
                "identity",
                "user_id / session_id / ip_address 至少提供一项",
            );
        }

        if let Some(read_time) = self.read_time {
            if read_time > now + Duration::days(1) {
                rule(&mut errors, "read_time", "阅读时间不能超前一天以上");
            }
            if read_time < now - Duration::days(365) {
                rule(&mut errors, "read_time", "阅读时间不能早于一年前");
            }
        }

        errors
    }

    pub fn into_command(self) -> RecordReadLog {
        let read_time = self.read_time.unwrap_or_else(Utc::now);
        RecordReadLog {
            article_id: self.article_id,
            user_id: self.user_id,
            session_id: self.session_id,
            ip_address: self.ip_address,
            duration_seconds: self.duration_seconds,
            is_completed: self.is_completed,
            read_time,
        }
    }
}

// ============================================================================
// 清理历史日志
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupRequest {
    /// 保留最近多少天，默认 90
    #[serde(default = "default_keep_days")]
    pub keep_days: i64,
    /// 直接指定截止时刻，优先于 keep_days
    #[serde(default)]
    pub before: Option<DateTime<Utc>>,
    #[serde(default)]
    pub force: bool,
    /// 只统计不删除
    #[serde(default)]
    pub dry_run: bool,
}

impl CleanupRequest {
    pub fn validate_business_rules(&self) -> RuleErrors {
        let mut errors = RuleErrors::new();
        let now = Utc::now();

        if self.keep_days < MIN_KEEP_DAYS && !self.force {
            rule(
                &mut errors,
                "keep_days",
                format!("保留天数不能小于 {} 天", MIN_KEEP_DAYS),
            );
        }
        if let Some(before) = self.before {
            if before > now {
                rule(&mut errors, "before", "截止时刻不能在未来");
            }
        }

        errors
    }

    pub fn into_command(self) -> CleanupReadLogs {
        let cutoff = self
            .before
            .unwrap_or_else(|| Utc::now() - Duration::days(self.keep_days.max(0)));
        CleanupReadLogs {
            cutoff,
            dry_run: self.dry_run,
        }
    }
}

// ============================================================================
// 列表查询参数
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ReadLogListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    #[serde(default)]
    pub article_id: Option<i64>,
}

// ============================================================================
// 展示投影
// ============================================================================

/// 阅读日志展示投影，duration_text 为派生展示字段
#[derive(Debug, Clone, Serialize)]
pub struct ReadLogView {
    pub id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub duration_seconds: i64,
    pub duration_text: String,
    pub is_completed: bool,
    pub read_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 秒数转 `HH:MM:SS`
fn format_duration(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

impl From<ReadLogRecord> for ReadLogView {
    fn from(record: ReadLogRecord) -> Self {
        Self {
            id: record.id,
            article_id: record.article_id,
            user_id: record.user_id,
            session_id: record.session_id,
            ip_address: record.ip_address,
            duration_text: format_duration(record.duration_seconds),
            duration_seconds: record.duration_seconds,
            is_completed: record.is_completed,
            read_time: record.read_time,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecordReadLogRequest {
        RecordReadLogRequest {
            article_id: 1,
            user_id: 42,
            session_id: None,
            ip_address: None,
            duration_seconds: 30,
            is_completed: false,
            read_time: None,
        }
    }

    #[test]
    fn test_valid_log() {
        assert!(request().validate_business_rules().is_empty());
    }

    #[test]
    fn test_completed_with_zero_duration() {
        let mut req = request();
        req.is_completed = true;
        req.duration_seconds = 0;
        assert!(req.validate_business_rules().contains_key("duration"));
    }

    #[test]
    fn test_duration_over_one_day() {
        let mut req = request();
        req.duration_seconds = MAX_DURATION_SECS + 1;
        assert!(req.validate_business_rules().contains_key("duration"));
    }

    #[test]
    fn test_negative_duration() {
        let mut req = request();
        req.duration_seconds = -1;
        assert!(req.validate_business_rules().contains_key("duration"));
    }

    #[test]
    fn test_identity_required() {
        let mut req = request();
        req.user_id = 0;
        assert!(req.validate_business_rules().contains_key("identity"));

        req.session_id = Some("sess-1".to_string());
        assert!(req.validate_business_rules().is_empty());

        req.session_id = None;
        req.ip_address = Some("10.0.0.1".to_string());
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_blank_session_does_not_count_as_identity() {
        let mut req = request();
        req.user_id = 0;
        req.session_id = Some("   ".to_string());
        let req = req.sanitize();
        assert!(req.validate_business_rules().contains_key("identity"));
    }

    #[test]
    fn test_read_time_window() {
        let mut req = request();
        req.read_time = Some(Utc::now() + Duration::days(2));
        assert!(req.validate_business_rules().contains_key("read_time"));

        req.read_time = Some(Utc::now() - Duration::days(400));
        assert!(req.validate_business_rules().contains_key("read_time"));

        req.read_time = Some(Utc::now() - Duration::days(30));
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_cleanup_keep_days_floor() {
        let req = CleanupRequest {
            keep_days: 3,
            before: None,
            force: false,
            dry_run: false,
        };
        assert!(req.validate_business_rules().contains_key("keep_days"));

        let req = CleanupRequest {
            keep_days: 3,
            before: None,
            force: true,
            dry_run: false,
        };
        assert!(req.validate_business_rules().is_empty());
    }

    #[test]
    fn test_cleanup_before_in_future() {
        let req = CleanupRequest {
            keep_days: 90,
            before: Some(Utc::now() + Duration::days(1)),
            force: false,
            dry_run: false,
        };
        assert!(req.validate_business_rules().contains_key("before"));
    }

    #[test]
    fn test_cleanup_cutoff_prefers_before() {
        let before = Utc::now() - Duration::days(10);
        let req = CleanupRequest {
            keep_days: 90,
            before: Some(before),
            force: false,
            dry_run: true,
        };
        let command = req.into_command();
        assert_eq!(command.cutoff, before);
        assert!(command.dry_run);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(61), "00:01:01");
        assert_eq!(format_duration(5025), "01:23:45");
        assert_eq!(format_duration(-5), "00:00:00");
    }
}
