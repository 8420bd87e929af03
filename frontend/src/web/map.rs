//! Leaflet 地图封装模块
//!
//! 通过 `wasm_bindgen(inline_js)` 桥接页面内加载的 Leaflet 全局对象 `L`，
//! 对外只暴露一个命令式接口：把相机移动到指定视口。
//! 此封装不持有任何天气派生状态，是仪表盘编排器的纯接收端。

use skycast_shared::MapViewport;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(inline_js = "
export function skycast_map_mount(id, lat, lon, zoom) {
    const map = L.map(id).setView([lat, lon], zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png', {
        attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);
    const marker = L.marker([lat, lon]).addTo(map);
    return { map, marker };
}
export function skycast_map_set_view(handle, lat, lon, zoom) {
    handle.map.setView([lat, lon], zoom, { animate: true });
    handle.marker.setLatLng([lat, lon]);
}
")]
extern "C" {
    fn skycast_map_mount(id: &str, lat: f64, lon: f64, zoom: f64) -> JsValue;
    fn skycast_map_set_view(handle: &JsValue, lat: f64, lon: f64, zoom: f64);
}

/// Leaflet 地图句柄
pub struct LeafletMap {
    #[cfg(target_arch = "wasm32")]
    handle: JsValue,
}

impl LeafletMap {
    /// 在指定容器元素上挂载地图并定位到初始视口
    ///
    /// 容器元素必须已经存在于 DOM 中。
    pub fn mount(container_id: &str, viewport: &MapViewport) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let handle = skycast_map_mount(
                container_id,
                viewport.center.lat,
                viewport.center.lon,
                viewport.zoom as f64,
            );
            Self { handle }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (container_id, viewport);
            Self {}
        }
    }

    /// 把相机移动到指定视口
    ///
    /// 幂等操作：用相同参数重复调用是安全的。
    pub fn set_viewport(&self, viewport: &MapViewport) {
        #[cfg(target_arch = "wasm32")]
        skycast_map_set_view(
            &self.handle,
            viewport.center.lat,
            viewport.center.lon,
            viewport.zoom as f64,
        );

        #[cfg(not(target_arch = "wasm32"))]
        let _ = viewport;
    }
}
