//! 主题选择模块
//!
//! 纯函数：(天气条件, 白天/黑夜) -> (背景渐变, 图标)。
//! 条件匹配为大小写不敏感的子串匹配，多类别可命中时按
//! 毛毛雨/雨 > 雪 > 云 > 晴 的优先级取第一个。

/// 主题图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
    Cloud,
    Rain,
    Snow,
}

/// 背景渐变 + 图标的成对主题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Tailwind 渐变类名
    pub background: &'static str,
    /// 未识别条件没有专属图标
    pub icon: Option<ThemeIcon>,
}

/// 根据天气条件与昼夜标志选择主题
pub fn select_theme(condition_main: &str, is_daytime: bool) -> Theme {
    let main = condition_main.to_lowercase();

    if main.contains("rain") || main.contains("drizzle") {
        return Theme {
            background: if is_daytime {
                "bg-gradient-to-b from-blue-600 to-blue-400"
            } else {
                "bg-gradient-to-b from-blue-900 to-blue-700"
            },
            icon: Some(ThemeIcon::Rain),
        };
    }
    if main.contains("snow") {
        return Theme {
            background: if is_daytime {
                "bg-gradient-to-b from-white to-gray-200"
            } else {
                "bg-gradient-to-b from-gray-200 to-gray-500"
            },
            icon: Some(ThemeIcon::Snow),
        };
    }
    if main.contains("cloud") {
        return Theme {
            background: if is_daytime {
                "bg-gradient-to-b from-gray-400 to-gray-200"
            } else {
                "bg-gradient-to-b from-gray-700 to-gray-900"
            },
            icon: Some(ThemeIcon::Cloud),
        };
    }
    if main.contains("clear") {
        return if is_daytime {
            Theme {
                background: "bg-gradient-to-b from-yellow-300 to-orange-200",
                icon: Some(ThemeIcon::Sun),
            }
        } else {
            Theme {
                background: "bg-gradient-to-b from-indigo-800 to-black",
                icon: Some(ThemeIcon::Moon),
            }
        };
    }

    // 兜底中性主题
    Theme {
        background: if is_daytime {
            "bg-gradient-to-b from-blue-300 to-blue-100"
        } else {
            "bg-gradient-to-b from-indigo-900 to-gray-800"
        },
        icon: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_rain_by_day_is_day_rain_theme() {
        let theme = select_theme("light rain", true);
        assert_eq!(theme.icon, Some(ThemeIcon::Rain));
        assert!(theme.background.contains("from-blue-600"));
    }

    #[test]
    fn drizzle_maps_to_rain_category() {
        assert_eq!(select_theme("Drizzle", false).icon, Some(ThemeIcon::Rain));
    }

    #[test]
    fn clear_at_night_is_night_clear_theme() {
        let theme = select_theme("Clear", false);
        assert_eq!(theme.icon, Some(ThemeIcon::Moon));
        assert!(theme.background.contains("from-indigo-800"));
    }

    #[test]
    fn clear_by_day_uses_sun() {
        assert_eq!(select_theme("Clear", true).icon, Some(ThemeIcon::Sun));
    }

    #[test]
    fn snow_beats_cloud_in_priority() {
        // 同时命中多类别时取更高优先级的类别
        assert_eq!(
            select_theme("snowy clouds", true).icon,
            Some(ThemeIcon::Snow)
        );
    }

    #[test]
    fn unrecognized_condition_falls_back_regardless_of_time() {
        for day in [true, false] {
            let theme = select_theme("Tornado", day);
            assert_eq!(theme.icon, None);
        }
    }

    #[test]
    fn day_and_night_variants_differ_per_category() {
        for main in ["Rain", "Snow", "Clouds", "Clear", "Mist"] {
            assert_ne!(
                select_theme(main, true).background,
                select_theme(main, false).background
            );
        }
    }
}
