//! 新闻面板组件
//!
//! 主题/地区/检索词任一变化都触发重新取数；取数失败静默
//! 降级为空列表，绝不打扰天气主视图。

use leptos::prelude::*;
use leptos::task::spawn_local;

use skycast_shared::NewsArticle;

use crate::api::news::NewsService;
use crate::components::icons::Newspaper;

const CATEGORIES: &[(&str, &str)] = &[
    ("综合", "general"),
    ("商业", "business"),
    ("科技", "technology"),
    ("体育", "sports"),
    ("娱乐", "entertainment"),
    ("科学", "science"),
    ("健康", "health"),
];

const REGIONS: &[(&str, &str)] = &[
    ("美国", "us"),
    ("肯尼亚", "ke"),
    ("英国", "gb"),
    ("印度", "in"),
    ("南非", "za"),
    ("加拿大", "ca"),
];

#[component]
pub fn NewsPanel(
    /// 天气解析出的规范城市名，作为检索词的种子
    #[prop(into)] seed_query: Signal<String>,
) -> impl IntoView {
    let (articles, set_articles) = signal(Vec::<NewsArticle>::new());
    let (loading, set_loading) = signal(true);
    let (category, set_category) = signal("general".to_string());
    let (region, set_region) = signal("us".to_string());
    let (search, set_search) = signal(String::new());

    // 城市解析结果注入检索词；用户之后仍可手动改写
    Effect::new(move |_| {
        let seed = seed_query.get();
        if !seed.is_empty() {
            set_search.set(seed);
        }
    });

    // 三个输入任一变化都重新取数
    Effect::new(move |_| {
        let category = category.get();
        let region = region.get();
        let query = search.get();
        set_loading.set(true);
        spawn_local(async move {
            let list = NewsService::fetch_articles(&category, &region, &query).await;
            set_articles.set(list);
            set_loading.set(false);
        });
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title justify-center gap-2">
                    <Newspaper attr:class="h-6 w-6" /> "最新新闻"
                </h2>

                // 检索词 + 地区
                <div class="flex flex-col md:flex-row items-center justify-center gap-4 mb-2">
                    <input
                        type="text"
                        placeholder="搜索新闻..."
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="input input-bordered w-full md:w-1/3"
                    />
                    <select
                        prop:value=region
                        on:change=move |ev| set_region.set(event_target_value(&ev))
                        class="select select-bordered w-full md:w-1/4"
                    >
                        {REGIONS
                            .iter()
                            .map(|(name, value)| view! { <option value=*value>{*name}</option> })
                            .collect_view()}
                    </select>
                </div>

                // 主题按钮
                <div class="flex flex-wrap justify-center gap-2 mb-4">
                    {CATEGORIES
                        .iter()
                        .map(|(name, value)| {
                            let value = *value;
                            view! {
                                <button
                                    on:click=move |_| set_category.set(value.to_string())
                                    class=move || {
                                        if category.get() == value {
                                            "btn btn-sm btn-primary rounded-full"
                                        } else {
                                            "btn btn-sm btn-ghost rounded-full"
                                        }
                                    }
                                >
                                    {*name}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| {
                        view! {
                            <div class="flex items-center justify-center py-10">
                                <span class="loading loading-spinner loading-md"></span>
                                <p class="ml-2 text-base-content/60">"新闻加载中..."</p>
                            </div>
                        }
                    }
                >
                    <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                        <Show when=move || articles.with(|a| a.is_empty())>
                            <p class="text-base-content/50 col-span-full text-center py-6">
                                "暂无新闻。"
                            </p>
                        </Show>
                        <For
                            each=move || articles.get()
                            key=|article| article.source_url.clone()
                            children=move |article| {
                                view! {
                                    <div class="card bg-base-200 shadow hover:shadow-lg transition overflow-hidden">
                                        {article
                                            .image_url
                                            .map(|src| {
                                                view! {
                                                    <figure>
                                                        <img
                                                            src=src
                                                            alt=article.title.clone()
                                                            class="w-full h-40 object-cover"
                                                        />
                                                    </figure>
                                                }
                                            })}
                                        <div class="card-body p-4">
                                            <h3 class="font-semibold">{article.title}</h3>
                                            <p class="text-sm text-base-content/70">
                                                {article
                                                    .description
                                                    .unwrap_or_else(|| "暂无摘要。".to_string())}
                                            </p>
                                            <a
                                                href=article.source_url
                                                target="_blank"
                                                rel="noopener noreferrer"
                                                class="link link-primary text-sm font-medium"
                                            >
                                                "阅读全文 →"
                                            </a>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}
