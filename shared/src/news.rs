//! 新闻条目模型

use serde::{Deserialize, Serialize};

/// 单次请求最多保留的新闻条数
pub const MAX_ARTICLES: usize = 6;

/// 单条新闻
///
/// 字段命名直接对齐新闻服务的返回结构，客户端反序列化后原样保留；
/// 序列内顺序即服务端返回的相关度顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
    #[serde(rename = "url")]
    pub source_url: String,
}
