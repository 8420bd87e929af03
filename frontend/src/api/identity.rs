//! 身份提供方客户端
//!
//! 对外部身份服务（Identity Toolkit 形态的 REST 接口）的封装。
//! 本应用只消费三种操作：登录、注册、登出（吊销）。
//! 会话令牌由提供方签发并带有有效期，过期即视为外部吊销。

use serde::{Deserialize, Serialize};

use crate::web::HttpClient;

const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
// 演示用 Web API Key，与原生 Web 客户端一样随应用分发
const IDENTITY_API_KEY: &str = "AIzaSyD-skycast-demo-web-key";

/// 身份提供方签发的会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id_token: String,
    pub email: String,
    /// 令牌失效时刻（epoch 毫秒）
    pub expires_at_ms: i64,
}

impl Session {
    /// 令牌是否已过期
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms <= now_ms
    }
}

/// 身份服务错误
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityError {
    /// 提供方拒绝（凭据错误、账号已存在等），携带提供方的错误码
    Rejected(String),
    /// 传输或解析失败
    Network(String),
}

impl core::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IdentityError::Rejected(code) => write!(f, "身份验证被拒绝: {}", code),
            IdentityError::Network(msg) => write!(f, "身份服务不可用: {}", msg),
        }
    }
}

// =========================================================
// 请求/响应负载（私有，不外泄）
// =========================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsPayload<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPayload {
    id_token: String,
    email: String,
    /// 提供方以字符串返回的秒数，如 "3600"
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// 身份服务客户端
pub struct IdentityApi;

impl IdentityApi {
    fn endpoint(action: &str) -> String {
        format!("{IDENTITY_BASE_URL}/accounts:{action}?key={IDENTITY_API_KEY}")
    }

    async fn credential_exchange(
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        let payload = CredentialsPayload {
            email,
            password,
            return_secure_token: true,
        };

        let res = HttpClient::post(&Self::endpoint(action))
            .json(&payload)
            .map_err(|e| IdentityError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        let ok = res.ok();
        let body = res
            .text()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if !ok {
            // 提供方的错误码（如 EMAIL_NOT_FOUND）原样上抛
            let code = serde_json::from_str::<ErrorPayload>(&body)
                .map(|p| p.error.message)
                .unwrap_or_else(|_| body.clone());
            return Err(IdentityError::Rejected(code));
        }

        let token: TokenPayload = serde_json::from_str(&body)
            .map_err(|e| IdentityError::Network(e.to_string()))?;
        let ttl_secs: i64 = token.expires_in.parse().unwrap_or(3600);

        Ok(Session {
            id_token: token.id_token,
            email: token.email,
            expires_at_ms: js_sys::Date::now() as i64 + ttl_secs * 1000,
        })
    }

    /// 邮箱 + 密码登录
    pub async fn sign_in(email: &str, password: &str) -> Result<Session, IdentityError> {
        Self::credential_exchange("signInWithPassword", email, password).await
    }

    /// 注册新账号，成功即返回已登录的会话
    pub async fn sign_up(email: &str, password: &str) -> Result<Session, IdentityError> {
        Self::credential_exchange("signUp", email, password).await
    }

    /// 向提供方吊销令牌
    ///
    /// 尽力而为：调用失败由调用方决定如何提示，
    /// 但本地登出从不因此被阻塞。
    pub async fn sign_out(session: &Session) -> Result<(), IdentityError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RevokePayload<'a> {
            id_token: &'a str,
        }

        let res = HttpClient::post(&Self::endpoint("revoke"))
            .json(&RevokePayload {
                id_token: &session.id_token,
            })
            .map_err(|e| IdentityError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        if res.ok() {
            Ok(())
        } else {
            Err(IdentityError::Rejected(format!("HTTP {}", res.status())))
        }
    }
}
