//! 会话守卫模块
//!
//! 管理用户会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态；会话丢失时的
//! 强制导航由路由服务的认证重定向监听自动完成。

use leptos::prelude::*;

use crate::api::identity::{IdentityApi, Session};
use crate::web::{Interval, SessionStorage};

const STORAGE_SESSION_KEY: &str = "skycast_session";
/// 会话吊销监视的轮询间隔（毫秒）
const SESSION_WATCH_MS: u32 = 30_000;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 提供方签发的会话（仅在认证成功后存在）
    pub session: Option<Session>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否正在加载
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
/// 会话状态的唯一写入口是本模块的函数。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

fn adopt_session(ctx: &AuthContext, session: Session) {
    if let Ok(raw) = serde_json::to_string(&session) {
        SessionStorage::set(STORAGE_SESSION_KEY, &raw);
    }
    ctx.set_state.update(|state| {
        state.session = Some(session);
        state.is_authenticated = true;
        state.is_loading = false;
    });
}

fn discard_session(set_state: WriteSignal<AuthState>) {
    SessionStorage::delete(STORAGE_SESSION_KEY);
    set_state.update(|state| {
        state.session = None;
        state.is_authenticated = false;
        state.is_loading = false;
    });
}

/// 初始化认证状态
///
/// 1. 从 SessionStorage 恢复未过期的会话（仅当前浏览器会话内）；
/// 2. 启动吊销监视：周期检查令牌有效期，过期即视为提供方
///    在外部吊销了会话，本地状态立刻清除并触发强制导航。
///
/// 整个应用生命周期内只订阅一次。
pub fn init_auth(ctx: &AuthContext) {
    let restored = SessionStorage::get(STORAGE_SESSION_KEY)
        .and_then(|raw| serde_json::from_str::<Session>(&raw).ok())
        .filter(|s| !s.is_expired(js_sys::Date::now() as i64));

    match restored {
        Some(session) => adopt_session(ctx, session),
        None => discard_session(ctx.set_state),
    }

    let state = ctx.state;
    let set_state = ctx.set_state;
    Interval::new(SESSION_WATCH_MS, move || {
        let expired = state
            .get_untracked()
            .session
            .as_ref()
            .is_some_and(|s| s.is_expired(js_sys::Date::now() as i64));
        if expired {
            web_sys::console::warn_1(&"[Auth] Session expired, revoking locally.".into());
            discard_session(set_state);
        }
    })
    .forget();
}

/// 邮箱 + 密码登录
///
/// 成功后路由服务会监听到认证状态变化并自动跳转仪表盘。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    let session = IdentityApi::sign_in(&email, &password)
        .await
        .map_err(|e| e.to_string())?;
    adopt_session(ctx, session);
    Ok(())
}

/// 注册新账号，成功即进入已登录状态
pub async fn signup(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    let session = IdentityApi::sign_up(&email, &password)
        .await
        .map_err(|e| e.to_string())?;
    adopt_session(ctx, session);
    Ok(())
}

/// 注销并清除状态
///
/// 本地会话无条件清除：即使远端吊销失败也不把用户困在
/// 失效会话后面；远端失败通过返回值上报，由调用方提示。
/// 导航由路由服务的认证状态监听自动处理。
pub async fn logout(ctx: &AuthContext) -> Result<(), String> {
    let session = ctx.state.get_untracked().session;
    discard_session(ctx.set_state);

    if let Some(session) = session {
        IdentityApi::sign_out(&session)
            .await
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}
