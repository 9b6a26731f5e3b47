//! Article Context - 文章限界上下文
//!
//! 职责:
//! - 文章状态机（上线/待发布/删除）
//! - 标题与封面地址值对象

mod errors;
mod status;
mod value_objects;

pub use errors::ArticleError;
pub use status::ArticleStatus;
pub use value_objects::{ArticleTitle, CoverUrl};
