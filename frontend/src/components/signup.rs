//! 注册页面

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{signup, use_auth};
use crate::components::icons::UserPlus;
use crate::web::router::use_router;

/// 提供方对密码长度的最低要求
const MIN_PASSWORD_LEN: usize = 6;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // 本地表单校验，不触发网络请求
        if email.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请填写所有字段".to_string()));
            return;
        }
        if password.get().len() < MIN_PASSWORD_LEN {
            set_error_msg.set(Some(format!("密码至少 {} 位", MIN_PASSWORD_LEN)));
            return;
        }
        if password.get() != confirm.get() {
            set_error_msg.set(Some("两次输入的密码不一致".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 注册成功即已登录，跳转由路由服务自动完成
            if let Err(e) = signup(&auth, email.get_untracked(), password.get_untracked()).await {
                set_error_msg.set(Some(e));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserPlus attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"创建账号"</h1>
                        <p class="text-base-content/70">"注册后即可使用天气仪表盘"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm">
                                <span class="label-text">"确认密码"</span>
                            </label>
                            <input
                                id="confirm"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                prop:value=confirm
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "注册中..."
                                        }
                                            .into_any()
                                    } else {
                                        "注册".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <button
                            type="button"
                            class="btn btn-link btn-sm"
                            on:click=move |_| router.navigate("/")
                        >
                            "已有账号？登录"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
