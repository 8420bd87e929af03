//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 注册页面
    Signup,
    /// 天气仪表盘 (需要认证)
    Dashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/signin" => Self::Login,
            "/signup" => Self::Signup,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 定义已认证用户是否应该离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 计算导航守卫的重定向结果
    ///
    /// 返回 `Some(目标)` 表示必须重定向，`None` 表示放行。
    pub fn guard(&self, is_authenticated: bool) -> Option<Self> {
        if self.requires_auth() && !is_authenticated {
            return Some(Self::Login);
        }
        if self.should_redirect_when_authenticated() && is_authenticated {
            return Some(Self::Dashboard);
        }
        None
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        for route in [AppRoute::Login, AppRoute::Signup, AppRoute::Dashboard] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/signin"), AppRoute::Login);
    }

    #[test]
    fn guard_blocks_dashboard_without_auth() {
        assert_eq!(
            AppRoute::Dashboard.guard(false),
            Some(AppRoute::Login)
        );
        assert_eq!(AppRoute::Dashboard.guard(true), None);
    }

    #[test]
    fn guard_bounces_authenticated_users_off_entry_pages() {
        assert_eq!(AppRoute::Login.guard(true), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::Signup.guard(true), Some(AppRoute::Dashboard));
        assert_eq!(AppRoute::Login.guard(false), None);
    }
}
