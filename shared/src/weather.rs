//! 天气快照与预报归一化模块
//!
//! 提供两类数据：
//! - `WeatherSnapshot`: 一次成功取数得到的完整当前天气，整体写入、从不部分更新
//! - `ForecastEntry`: 预报时间序列中被保留的单条记录（每个自然日一条）

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Coordinates;

/// 预报时间序列中作为"当日代表"保留的本地时刻
pub const MIDDAY_MARKER: &str = "12:00:00";

/// 预报时间戳的上游文本格式
pub const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 当前天气快照
///
/// 由一次成功的天气取数原子产出，上游原始负载不保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// 服务端解析出的规范城市名
    pub city: String,
    /// ISO 国家代码
    pub country: String,
    pub temperature_c: f64,
    /// 天气条件主类别（如 "Clear" / "Rain"）
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
    pub coordinates: Coordinates,
}

impl WeatherSnapshot {
    /// 规范 "城市, 国家" 显示名，也用作新闻检索的种子词
    pub fn resolved_name(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// 单条预报记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// 上游文本时间戳，如 "2026-08-25 12:00:00"
    pub timestamp_text: String,
    /// 短格式星期标签，如 "Mon"
    pub day_label: String,
    pub temperature_c: f64,
    pub condition_description: String,
    pub icon_code: String,
}

/// 判断当前是否为白天
///
/// 没有快照时默认白天；否则以当前墙钟时间（epoch 秒）与
/// 被查询城市的日出/日落区间 `[sunrise, sunset)` 比较。
/// 两侧都是 epoch 秒，与时区无关。
pub fn is_daytime(snapshot: Option<&WeatherSnapshot>, now_secs: i64) -> bool {
    match snapshot {
        None => true,
        Some(w) => now_secs >= w.sunrise_epoch && now_secs < w.sunset_epoch,
    }
}

/// 预报归一化过滤：只保留本地正午的记录
///
/// 上游返回固定三小时步长的时间序列；本过滤器保留时刻等于正午的
/// 记录，因此每个自然日最多一条，输入的时间顺序被原样保留。
pub fn midday_entries(entries: Vec<ForecastEntry>) -> Vec<ForecastEntry> {
    entries
        .into_iter()
        .filter(|e| e.timestamp_text.contains(MIDDAY_MARKER))
        .collect()
}

/// 从上游文本时间戳计算短格式星期标签
///
/// 解析失败时返回空字符串（展示层按空白处理）。
pub fn day_label(timestamp_text: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp_text, FORECAST_TIMESTAMP_FORMAT)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp_text: ts.to_string(),
            day_label: day_label(ts),
            temperature_c: 20.0,
            condition_description: "clear sky".to_string(),
            icon_code: "01d".to_string(),
        }
    }

    fn snapshot(sunrise: i64, sunset: i64) -> WeatherSnapshot {
        WeatherSnapshot {
            city: "London".to_string(),
            country: "GB".to_string(),
            temperature_c: 18.0,
            condition_main: "Clouds".to_string(),
            condition_description: "broken clouds".to_string(),
            icon_code: "04d".to_string(),
            humidity_pct: 70,
            wind_speed_mps: 3.5,
            sunrise_epoch: sunrise,
            sunset_epoch: sunset,
            coordinates: Coordinates::default(),
        }
    }

    #[test]
    fn midday_filter_keeps_one_entry_per_day_in_order() {
        // 五天、三小时步长的完整序列
        let mut series = Vec::new();
        for day in 15..20 {
            for hour in (0..24).step_by(3) {
                series.push(entry(&format!("2024-01-{day:02} {hour:02}:00:00")));
            }
        }

        let daily = midday_entries(series);

        assert_eq!(daily.len(), 5);
        for (i, e) in daily.iter().enumerate() {
            assert_eq!(
                e.timestamp_text,
                format!("2024-01-{:02} 12:00:00", 15 + i)
            );
        }
    }

    #[test]
    fn midday_filter_on_empty_series() {
        assert!(midday_entries(Vec::new()).is_empty());
    }

    #[test]
    fn day_label_from_timestamp() {
        // 2024-01-15 是星期一
        assert_eq!(day_label("2024-01-15 12:00:00"), "Mon");
        assert_eq!(day_label("2024-01-16 12:00:00"), "Tue");
    }

    #[test]
    fn day_label_on_garbage_is_empty() {
        assert_eq!(day_label("not a timestamp"), "");
    }

    #[test]
    fn daytime_defaults_to_true_without_snapshot() {
        assert!(is_daytime(None, 0));
    }

    #[test]
    fn daytime_interval_is_half_open() {
        let w = snapshot(1_000, 2_000);
        assert!(!is_daytime(Some(&w), 999));
        assert!(is_daytime(Some(&w), 1_000));
        assert!(is_daytime(Some(&w), 1_999));
        assert!(!is_daytime(Some(&w), 2_000));
    }

    #[test]
    fn resolved_name_joins_city_and_country() {
        assert_eq!(snapshot(0, 1).resolved_name(), "London, GB");
    }
}
