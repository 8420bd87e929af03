//! 仪表盘页面
//!
//! 持有 `DashboardCore` 状态机并驱动查询周期；主题、地图视口、
//! 新闻种子词都是状态提交后的派生值。

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use skycast_shared::{ThemeIcon, is_daytime, select_theme};

use crate::api::weather::WeatherService;
use crate::auth::{logout, use_auth};
use crate::components::city_map::CityMap;
use crate::components::icons::*;
use crate::components::news::NewsPanel;
use crate::orchestrator::{DashboardCore, run_cycle};
use crate::web::Interval;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let (core, set_core) = signal(DashboardCore::new());
    let (city_input, set_city_input) = signal(String::new());
    let (notification, set_notification) = signal(Option::<String>::None);
    let (now_ms, set_now_ms) = signal(js_sys::Date::now());

    // 秒级时钟：只驱动时间显示与昼夜重算，纯装饰性
    let _clock = StoredValue::new_local(Interval::new(1_000, move || {
        set_now_ms.set(js_sys::Date::now());
    }));

    // 派生视图状态，全部来自 DashboardCore 提交后的结果
    let weather = Memo::new(move |_| core.with(|c| c.state().weather.clone()));
    let forecast = Memo::new(move |_| core.with(|c| c.state().forecast.clone()));
    let error_msg = Memo::new(move |_| core.with(|c| c.state().error.clone()));
    let viewport = Memo::new(move |_| core.with(|c| c.state().viewport));
    let resolved_city =
        Memo::new(move |_| weather.with(|w| w.as_ref().map(|w| w.resolved_name())).unwrap_or_default());

    let daytime = Memo::new(move |_| {
        let now_secs = (now_ms.get() / 1000.0) as i64;
        weather.with(|w| is_daytime(w.as_ref(), now_secs))
    });
    let theme = Memo::new(move |_| {
        let main = weather.with(|w| {
            w.as_ref().map(|w| w.condition_main.clone()).unwrap_or_default()
        });
        select_theme(&main, daytime.get())
    });

    // 提交一次查询周期；过期周期的结果在 commit 处被丢弃
    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = city_input.get_untracked();

        let mut issued = None;
        set_core.update(|c| issued = c.submit(&raw));
        let Some(cycle) = issued else { return };

        let city = core.with_untracked(|c| c.state().query.clone());
        spawn_local(async move {
            match run_cycle(&WeatherService, &city).await {
                Ok((snapshot, entries)) => {
                    set_core.update(|c| {
                        c.commit_success(cycle, snapshot, entries);
                    });
                }
                Err(e) => {
                    let message = e.to_string();
                    set_core.update(|c| {
                        c.commit_failure(cycle, message);
                    });
                }
            }
        });
    };

    let on_logout = move |_| {
        spawn_local(async move {
            // 本地登出总是生效；只有远端吊销失败才提示
            if let Err(e) = logout(&auth).await {
                set_notification.set(Some(format!("远端注销失败: {}", e)));
            }
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let clock_text = move || {
        let date = js_sys::Date::new(&now_ms.get().into());
        format!(
            "{} | {}",
            String::from(date.to_locale_date_string("zh-CN", &JsValue::UNDEFINED)),
            String::from(date.to_locale_time_string("zh-CN"))
        )
    };

    let overlay_icon = move || {
        theme.get().icon.map(|icon| match icon {
            ThemeIcon::Rain => view! {
                <CloudRain attr:class="absolute top-5 left-5 w-10 h-10 animate-bounce text-blue-500" />
            }
            .into_any(),
            ThemeIcon::Snow => view! {
                <CloudSnow attr:class="absolute top-5 left-5 w-10 h-10 animate-bounce text-white" />
            }
            .into_any(),
            ThemeIcon::Cloud => view! {
                <Cloud attr:class="absolute top-5 left-5 w-12 h-12 animate-bounce text-gray-400" />
            }
            .into_any(),
            ThemeIcon::Sun => view! {
                <Sun attr:class="absolute top-5 left-5 w-12 h-12 animate-spin-slow text-yellow-400" />
            }
            .into_any(),
            ThemeIcon::Moon => view! {
                <Moon attr:class="absolute top-5 left-5 w-10 h-10 animate-spin-slow text-gray-300" />
            }
            .into_any(),
        })
    };

    view! {
        <div class=move || {
            format!(
                "min-h-screen flex flex-col items-center justify-start relative transition-colors duration-1000 {}",
                theme.get().background,
            )
        }>
            {overlay_icon}

            // 通知提示框（远端注销失败等瞬态消息）
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class="alert alert-warning shadow-lg">
                        <span>{move || notification.get().unwrap_or_default()}</span>
                    </div>
                </div>
            </Show>

            <div class="w-full max-w-3xl card bg-base-100 shadow-xl p-5 relative z-10 mt-6 mb-4">
                <div class="flex justify-between items-center mb-3">
                    <h1 class="text-xl font-bold">"天气仪表盘"</h1>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "退出登录"
                    </button>
                </div>

                // 时间
                <p class="text-xs text-base-content/60 mb-2">{clock_text}</p>

                // 查询输入
                <form class="flex gap-2 mb-3 items-center" on:submit=on_search>
                    <MapPin attr:class="w-4 h-4 text-base-content/50" />
                    <input
                        type="text"
                        prop:value=city_input
                        on:input=move |ev| set_city_input.set(event_target_value(&ev))
                        placeholder="输入城市名"
                        class="input input-bordered flex-1 input-sm"
                    />
                    <button type="submit" class="btn btn-primary btn-sm gap-1">
                        <Search attr:class="w-4 h-4" /> "搜索"
                    </button>
                </form>

                <Show when=move || error_msg.get().is_some()>
                    <p class="text-error text-sm mb-2">{move || error_msg.get().unwrap_or_default()}</p>
                </Show>

                // 当前天气
                {move || {
                    weather
                        .get()
                        .map(|w| {
                            let icon_url = format!(
                                "https://openweathermap.org/img/wn/{}@2x.png",
                                w.icon_code,
                            );
                            view! {
                                <div class="text-center mb-3">
                                    <h2 class="text-lg font-bold mb-1">{w.resolved_name()}</h2>
                                    <img
                                        src=icon_url
                                        alt=w.condition_description.clone()
                                        class="mx-auto w-16 h-16"
                                    />
                                    <p class="text-2xl font-bold my-1 flex items-center justify-center gap-1">
                                        <Thermometer attr:class="w-5 h-5 text-red-500" />
                                        {format!("{:.1}°C", w.temperature_c)}
                                    </p>
                                    <p class="capitalize text-sm">{w.condition_description}</p>
                                    <div class="flex justify-around mt-1 text-xs text-base-content/70">
                                        <p class="flex items-center gap-1">
                                            <Droplet attr:class="w-3 h-3" />
                                            {format!("湿度: {}%", w.humidity_pct)}
                                        </p>
                                        <p class="flex items-center gap-1">
                                            <Wind attr:class="w-3 h-3" />
                                            {format!("风速: {} m/s", w.wind_speed_mps)}
                                        </p>
                                    </div>
                                </div>
                            }
                        })
                }}

                // 逐日预报
                <Show when=move || forecast.with(|f| !f.is_empty())>
                    <div class="grid grid-cols-5 gap-1 mt-2 text-center text-xs">
                        <For
                            each=move || forecast.get()
                            key=|f| f.timestamp_text.clone()
                            children=move |f| {
                                let icon_url = format!(
                                    "https://openweathermap.org/img/wn/{}.png",
                                    f.icon_code,
                                );
                                view! {
                                    <div class="bg-base-200 rounded p-1 flex flex-col items-center">
                                        <p class="font-bold">{f.day_label}</p>
                                        <img
                                            src=icon_url
                                            alt=f.condition_description.clone()
                                            class="w-8 h-8"
                                        />
                                        <p class="font-bold flex items-center gap-1">
                                            <Thermometer attr:class="w-3 h-3 text-red-500" />
                                            {format!("{:.0}°C", f.temperature_c)}
                                        </p>
                                        <p class="capitalize">{f.condition_description}</p>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>

                // 城市地图：编排器视口的纯接收端
                <div class="mt-4">
                    <CityMap viewport=viewport />
                </div>
            </div>

            // 新闻区
            <div class="w-full max-w-5xl px-4 mb-8">
                <NewsPanel seed_query=resolved_city />
            </div>
        </div>
    }
}
