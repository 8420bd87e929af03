//! SessionStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的会话级存储接口。
//! 选用 sessionStorage 而非 localStorage：会话令牌只在
//! 当前浏览器会话内有效，关闭标签页即丢弃，不做跨会话持久化。

/// 会话级存储操作封装
pub struct SessionStorage;

impl SessionStorage {
    /// 获取 SessionStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值
    ///
    /// # 返回
    /// - `true` 如果操作成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对
    ///
    /// # 返回
    /// - `true` 如果操作成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
