//! 城市地图组件
//!
//! 地图是编排器视口的纯接收端：只消费编排器提交后的视口值，
//! 自身不持有任何天气派生状态。`Memo` 去重加上渲染器命令本身
//! 的幂等性，保证重复提交相同视口是安全的。

use leptos::prelude::*;

use skycast_shared::MapViewport;

use crate::web::map::LeafletMap;

const MAP_CONTAINER_ID: &str = "city-map";

#[component]
pub fn CityMap(
    /// 编排器提交的当前视口
    viewport: Memo<MapViewport>,
) -> impl IntoView {
    let map_handle: StoredValue<Option<LeafletMap>, LocalStorage> = StoredValue::new_local(None);

    // Effect 在组件挂载后运行：首次就地初始化渲染器，
    // 之后只把视口变化转发为 set_viewport 命令。
    Effect::new(move |_| {
        let vp = viewport.get();
        map_handle.update_value(|slot| match slot {
            Some(map) => map.set_viewport(&vp),
            None => *slot = Some(LeafletMap::mount(MAP_CONTAINER_ID, &vp)),
        });
    });

    view! { <div id=MAP_CONTAINER_ID class="h-72 w-full rounded-box overflow-hidden z-0"></div> }
}
