//! 新闻服务客户端
//!
//! 新闻是次要的尽力而为功能：任何失败（传输、解析、空负载）
//! 都被就地吸收为空序列，绝不升级为用户可见错误，
//! 也绝不影响天气主视图。

use serde::Deserialize;

use skycast_shared::{MAX_ARTICLES, NewsArticle};

use crate::web::HttpClient;

const NEWS_BASE_URL: &str = "https://gnews.io/api/v4";
const NEWS_API_KEY: &str = "35a484a05ed62eabefa7ae1777eb3ab9";
const NEWS_LANG: &str = "en";

#[derive(Deserialize)]
struct HeadlinesPayload {
    /// 缺失或空数组都是合法的非错误响应
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

/// 新闻服务客户端（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsService;

impl NewsService {
    fn endpoint(category: &str, region: &str, query: &str) -> String {
        let query = String::from(js_sys::encode_uri_component(query));
        format!(
            "{NEWS_BASE_URL}/top-headlines?lang={NEWS_LANG}&country={region}&topic={category}\
             &q={query}&max={MAX_ARTICLES}&apikey={NEWS_API_KEY}"
        )
    }

    /// 按主题/地区/检索词获取头条
    ///
    /// 返回序列长度不超过 `MAX_ARTICLES`，顺序即服务端的相关度顺序。
    pub async fn fetch_articles(category: &str, region: &str, query: &str) -> Vec<NewsArticle> {
        match Self::fetch_inner(category, region, query).await {
            Ok(articles) => articles,
            Err(e) => {
                web_sys::console::warn_1(&format!("[News] Degraded: {}", e).into());
                Vec::new()
            }
        }
    }

    async fn fetch_inner(
        category: &str,
        region: &str,
        query: &str,
    ) -> Result<Vec<NewsArticle>, String> {
        let res = HttpClient::get(&Self::endpoint(category, region, query))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.ok() {
            return Err(format!("HTTP {}", res.status()));
        }

        let payload: HeadlinesPayload = res.json().await.map_err(|e| e.to_string())?;
        let mut articles = payload.articles;
        articles.truncate(MAX_ARTICLES);
        Ok(articles)
    }
}
