//! SkyCast 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys：
//! - `weather`: 天气快照与预报归一化
//! - `theme`: 天气条件 -> 主题的纯函数映射
//! - `geo`: 坐标与地图视口
//! - `news`: 新闻条目模型

mod geo;
mod news;
mod theme;
mod weather;

pub use geo::*;
pub use news::*;
pub use theme::*;
pub use weather::*;
