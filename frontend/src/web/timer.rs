//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 替代 `gloo-timers`。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    closure: Option<Closure<dyn Fn()>>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # 参数
    /// - `millis`: 间隔时间（毫秒）
    /// - `callback`: 每次间隔触发的回调函数
    ///
    /// # Panics
    /// 如果无法获取 window 对象或设置定时器失败
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window().expect("无法获取 window 对象");

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .expect("设置定时器失败");

        Self {
            handle,
            closure: Some(closure),
        }
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }

    /// 放弃所有权，让定时器存活至页面卸载
    ///
    /// 用于应用级监视任务（如会话吊销监视），这类任务只在
    /// 应用初始化时创建一次。
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
        // self 随后被 drop，但 closure 已被取走，不会触发 cancel
        std::mem::forget(self);
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
