//! 天气服务客户端
//!
//! 对天气服务两个端点（当前天气、5 天/3 小时预报）的无状态封装。
//! 上游原始负载在本模块内就地归一化为领域类型，不向外泄露。
//!
//! 两个操作的失败语义不同：当前天气失败对整屏是致命的，
//! 预报失败只是降级（返回空序列），这是刻意的不对称。

use async_trait::async_trait;
use serde::Deserialize;

use skycast_shared::{Coordinates, ForecastEntry, WeatherSnapshot, day_label, midday_entries};

use crate::orchestrator::WeatherApi;
use crate::web::HttpClient;

const WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const WEATHER_API_KEY: &str = "b6907d289e10d714a6e88b30761fae22";
/// 摄氏温标
const WEATHER_UNITS: &str = "metric";

/// 天气取数错误
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherError {
    /// 上游报告城市未知；携带服务端的人类可读消息，原样展示
    NotFound(String),
    /// 传输或解析失败
    Network(String),
}

impl core::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WeatherError::NotFound(msg) => write!(f, "{}", msg),
            WeatherError::Network(msg) => write!(f, "天气数据获取失败: {}", msg),
        }
    }
}

// =========================================================
// 上游原始负载（私有，不外泄）
// =========================================================

#[derive(Deserialize)]
struct CurrentPayload {
    name: String,
    sys: SysPayload,
    main: MainPayload,
    weather: Vec<ConditionPayload>,
    wind: WindPayload,
    coord: CoordPayload,
}

#[derive(Deserialize)]
struct SysPayload {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Deserialize)]
struct MainPayload {
    temp: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct ConditionPayload {
    main: String,
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct WindPayload {
    speed: f64,
}

#[derive(Deserialize)]
struct CoordPayload {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastItemPayload>,
}

#[derive(Deserialize)]
struct ForecastItemPayload {
    dt_txt: String,
    main: MainPayload,
    weather: Vec<ConditionPayload>,
}

/// 非 2xx 响应携带的人类可读消息
#[derive(Deserialize)]
struct UpstreamErrorPayload {
    message: String,
}

// =========================================================
// 客户端
// =========================================================

/// 天气服务客户端（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherService;

impl WeatherService {
    fn endpoint(path: &str, city: &str) -> String {
        let city = String::from(js_sys::encode_uri_component(city));
        format!("{WEATHER_BASE_URL}/{path}?q={city}&appid={WEATHER_API_KEY}&units={WEATHER_UNITS}")
    }

    async fn fetch_current_inner(city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let res = HttpClient::get(&Self::endpoint("weather", city))
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = res.status();
        let ok = res.ok();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        if !ok {
            let message = serde_json::from_str::<UpstreamErrorPayload>(&body)
                .map(|p| p.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return if status == 404 {
                Err(WeatherError::NotFound(message))
            } else {
                Err(WeatherError::Network(message))
            };
        }

        let payload: CurrentPayload = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Network(e.to_string()))?;
        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Network("响应缺少天气条件".to_string()))?;

        Ok(WeatherSnapshot {
            city: payload.name,
            country: payload.sys.country,
            temperature_c: payload.main.temp,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
            humidity_pct: payload.main.humidity,
            wind_speed_mps: payload.wind.speed,
            sunrise_epoch: payload.sys.sunrise,
            sunset_epoch: payload.sys.sunset,
            coordinates: Coordinates {
                lat: payload.coord.lat,
                lon: payload.coord.lon,
            },
        })
    }

    async fn fetch_forecast_inner(city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let res = HttpClient::get(&Self::endpoint("forecast", city))
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(WeatherError::Network(format!("HTTP {}", res.status())));
        }

        let payload: ForecastPayload = res
            .json()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let entries = payload
            .list
            .into_iter()
            .filter_map(|item| {
                let condition = item.weather.into_iter().next()?;
                Some(ForecastEntry {
                    day_label: day_label(&item.dt_txt),
                    timestamp_text: item.dt_txt,
                    temperature_c: item.main.temp,
                    condition_description: condition.description,
                    icon_code: condition.icon,
                })
            })
            .collect();

        // 归一化：每个自然日只保留正午一条
        Ok(midday_entries(entries))
    }
}

#[async_trait(?Send)]
impl WeatherApi for WeatherService {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        Self::fetch_current_inner(city).await
    }

    async fn fetch_forecast(&self, city: &str) -> Vec<ForecastEntry> {
        match Self::fetch_forecast_inner(city).await {
            Ok(entries) => entries,
            Err(e) => {
                // 预报失败只降级不报错，界面继续展示当前天气
                web_sys::console::warn_1(&format!("[Weather] Forecast degraded: {}", e).into());
                Vec::new()
            }
        }
    }
}
