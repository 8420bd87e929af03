//! 仪表盘编排器 - 查询周期状态机
//!
//! 单一写者：`DashboardCore` 是仪表盘状态唯一的变更入口，
//! UI 组件持有它、地图与主题只读取它提交后的结果。
//!
//! 并发模型：所有网络续体都运行在同一逻辑线程上，唯一的竞态来源
//! 是乱序完成：用户在上一次取数未返回时提交了新查询。每个查询
//! 周期因此携带一个单调递增的代号（generation），结果提交时与最新
//! 代号比对，过期周期的结果被整体丢弃（last-submitted-wins）。
//! 不需要取消在途请求，丢弃即足够。

use async_trait::async_trait;

use skycast_shared::{ForecastEntry, MapViewport, WeatherSnapshot};

use crate::api::weather::WeatherError;

/// 空白查询的本地校验消息（不触发网络请求）
pub const BLANK_QUERY_MESSAGE: &str = "请输入城市名称";

/// 查询周期阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Fetching,
    Success,
    Failed,
}

/// 仪表盘状态 - 唯一事实来源
///
/// 不变式：
/// - `weather` 与 `error` 互斥；
/// - `forecast` 非空时 `weather` 必然存在且属于同一城市；
/// - `viewport` 只在成功提交时改写，失败时保持旧值。
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// 最近一次提交的（已裁剪的）查询词
    pub query: String,
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub error: Option<String>,
    pub viewport: MapViewport,
    pub phase: QueryPhase,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            query: String::new(),
            weather: None,
            forecast: Vec::new(),
            error: None,
            viewport: MapViewport::default(),
            phase: QueryPhase::Idle,
        }
    }
}

/// 代号标记的查询周期凭据
///
/// 由 `submit` 签发，提交结果时交回核验。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCycle {
    generation: u64,
}

/// 仪表盘状态机核心
#[derive(Debug, Clone, Default)]
pub struct DashboardCore {
    state: DashboardState,
    latest_generation: u64,
}

impl DashboardCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// 提交一次查询
    ///
    /// 空白输入直接进入 `Failed` 并给出本地校验消息，
    /// 返回 `None` 表示不应发起任何网络请求。
    /// 非空输入签发新一代查询周期并进入 `Fetching`；
    /// 旧周期不被取消，其结果将在提交时因代号过期而被丢弃。
    pub fn submit(&mut self, raw: &str) -> Option<QueryCycle> {
        let city = raw.trim();
        if city.is_empty() {
            self.state.error = Some(BLANK_QUERY_MESSAGE.to_string());
            self.state.weather = None;
            self.state.forecast.clear();
            self.state.phase = QueryPhase::Failed;
            return None;
        }

        self.latest_generation += 1;
        self.state.query = city.to_string();
        self.state.phase = QueryPhase::Fetching;
        Some(QueryCycle {
            generation: self.latest_generation,
        })
    }

    fn is_current(&self, cycle: QueryCycle) -> bool {
        cycle.generation == self.latest_generation
    }

    /// 提交成功结果
    ///
    /// 过期周期返回 `false`，状态不被触碰。当前周期则原子地
    /// 写入天气与预报、清除错误，并把视口对准快照坐标，
    /// 视口严格在天气数据落定之后更新。
    pub fn commit_success(
        &mut self,
        cycle: QueryCycle,
        snapshot: WeatherSnapshot,
        forecast: Vec<ForecastEntry>,
    ) -> bool {
        if !self.is_current(cycle) {
            return false;
        }

        self.state.viewport = MapViewport::centered_on(snapshot.coordinates);
        self.state.weather = Some(snapshot);
        self.state.forecast = forecast;
        self.state.error = None;
        self.state.phase = QueryPhase::Success;
        true
    }

    /// 提交失败结果
    ///
    /// 过期周期返回 `false`。当前周期则写入错误并清空天气与预报；
    /// 视口保持原值，宁可停留在旧位置也不跳向未定义坐标。
    pub fn commit_failure(&mut self, cycle: QueryCycle, message: String) -> bool {
        if !self.is_current(cycle) {
            return false;
        }

        self.state.error = Some(message);
        self.state.weather = None;
        self.state.forecast.clear();
        self.state.phase = QueryPhase::Failed;
        true
    }
}

/// 天气服务访问接口
///
/// 抽出 trait 以便测试注入受控时序的 mock。
#[async_trait(?Send)]
pub trait WeatherApi {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// 实现方必须把失败吸收为空序列（降级而非报错）
    async fn fetch_forecast(&self, city: &str) -> Vec<ForecastEntry>;
}

/// 单个查询周期的取数流程
///
/// 先取当前天气；只有成功后才发起预报请求，预报失败已被
/// 客户端降级为空序列。当前天气失败则整个周期失败。
pub async fn run_cycle<A: WeatherApi>(
    api: &A,
    city: &str,
) -> Result<(WeatherSnapshot, Vec<ForecastEntry>), WeatherError> {
    let snapshot = api.fetch_current(city).await?;
    let forecast = api.fetch_forecast(city).await;
    Ok((snapshot, forecast))
}

#[cfg(test)]
mod tests;
