//! 坐标与地图视口模块

use serde::{Deserialize, Serialize};

/// 城市查询成功后地图采用的固定缩放级别
pub const CITY_ZOOM: u8 = 10;

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// 地图相机视口
///
/// 只有仪表盘编排器在天气取数成功后才会改写视口；
/// 取数失败时保持上一次的值，不做重置。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl MapViewport {
    /// 以固定城市缩放级别对准给定坐标
    pub fn centered_on(center: Coordinates) -> Self {
        Self {
            center,
            zoom: CITY_ZOOM,
        }
    }
}

impl Default for MapViewport {
    /// 首次成功查询之前的默认视口（内罗毕）
    fn default() -> Self {
        Self {
            center: Coordinates {
                lat: 1.2921,
                lon: 36.8219,
            },
            zoom: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_on_uses_city_zoom() {
        let vp = MapViewport::centered_on(Coordinates {
            lat: 51.51,
            lon: -0.13,
        });
        assert_eq!(vp.zoom, CITY_ZOOM);
        assert_eq!(vp.center.lat, 51.51);
        assert_eq!(vp.center.lon, -0.13);
    }

    #[test]
    fn default_viewport_is_not_city_zoom() {
        assert_ne!(MapViewport::default().zoom, CITY_ZOOM);
    }
}
