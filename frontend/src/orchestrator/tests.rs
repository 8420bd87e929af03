use super::*;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::join;

use skycast_shared::{CITY_ZOOM, Coordinates};

// =========================================================
// 辅助函数
// =========================================================

fn snapshot(city: &str, lat: f64, lon: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.to_string(),
        country: "XX".to_string(),
        temperature_c: 21.0,
        condition_main: "Clear".to_string(),
        condition_description: "clear sky".to_string(),
        icon_code: "01d".to_string(),
        humidity_pct: 55,
        wind_speed_mps: 2.0,
        sunrise_epoch: 1_000,
        sunset_epoch: 2_000,
        coordinates: Coordinates { lat, lon },
    }
}

fn entry(ts: &str) -> ForecastEntry {
    ForecastEntry {
        timestamp_text: ts.to_string(),
        day_label: "Mon".to_string(),
        temperature_c: 19.0,
        condition_description: "few clouds".to_string(),
        icon_code: "02d".to_string(),
    }
}

/// 受控时序的天气服务 mock
///
/// 通过 oneshot 闸门把指定城市的当前天气请求挂起，
/// 用于确定性地复现乱序完成。
#[derive(Default)]
struct MockWeatherApi {
    current: HashMap<String, Result<WeatherSnapshot, WeatherError>>,
    forecast: HashMap<String, Vec<ForecastEntry>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    forecast_calls: Cell<usize>,
}

impl MockWeatherApi {
    fn new() -> Self {
        Self::default()
    }

    fn script_current(&mut self, city: &str, result: Result<WeatherSnapshot, WeatherError>) {
        self.current.insert(city.to_string(), result);
    }

    fn script_forecast(&mut self, city: &str, entries: Vec<ForecastEntry>) {
        self.forecast.insert(city.to_string(), entries);
    }

    /// 挂起该城市的当前天气请求，返回放行端
    fn gate(&mut self, city: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(city.to_string(), rx);
        tx
    }
}

#[async_trait(?Send)]
impl WeatherApi for MockWeatherApi {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let gate = self.gates.borrow_mut().remove(city);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.current
            .get(city)
            .cloned()
            .unwrap_or_else(|| Err(WeatherError::Network("unscripted city".to_string())))
    }

    async fn fetch_forecast(&self, city: &str) -> Vec<ForecastEntry> {
        self.forecast_calls.set(self.forecast_calls.get() + 1);
        self.forecast.get(city).cloned().unwrap_or_default()
    }
}

// =========================================================
// 本地校验
// =========================================================

#[test]
fn blank_query_fails_locally_without_cycle() {
    let mut core = DashboardCore::new();

    for raw in ["", "   ", "\t\n"] {
        assert!(core.submit(raw).is_none());
        assert_eq!(core.state().phase, QueryPhase::Failed);
        assert_eq!(core.state().error.as_deref(), Some(BLANK_QUERY_MESSAGE));
        assert!(core.state().weather.is_none());
        assert!(core.state().forecast.is_empty());
    }
}

#[test]
fn blank_query_clears_previous_weather() {
    let mut core = DashboardCore::new();
    let cycle = core.submit("Nairobi").unwrap();
    assert!(core.commit_success(cycle, snapshot("Nairobi", -1.3, 36.8), vec![entry("x")]));

    assert!(core.submit("   ").is_none());
    assert!(core.state().weather.is_none());
    assert!(core.state().forecast.is_empty());
    // 视口不随失败重置
    assert_eq!(core.state().viewport.center.lat, -1.3);
}

#[test]
fn query_is_trimmed_on_submit() {
    let mut core = DashboardCore::new();
    core.submit("  Oslo  ").unwrap();
    assert_eq!(core.state().query, "Oslo");
    assert_eq!(core.state().phase, QueryPhase::Fetching);
}

// =========================================================
// 提交语义
// =========================================================

#[test]
fn success_commit_sets_weather_and_viewport_atomically() {
    let mut core = DashboardCore::new();
    let cycle = core.submit("London").unwrap();

    assert!(core.commit_success(
        cycle,
        snapshot("London", 51.5, -0.1),
        vec![entry("2024-01-15 12:00:00")],
    ));

    let state = core.state();
    assert_eq!(state.phase, QueryPhase::Success);
    assert_eq!(state.weather.as_ref().unwrap().city, "London");
    assert_eq!(state.forecast.len(), 1);
    assert!(state.error.is_none());
    assert_eq!(state.viewport.center.lat, 51.5);
    assert_eq!(state.viewport.center.lon, -0.1);
    assert_eq!(state.viewport.zoom, CITY_ZOOM);
}

#[test]
fn success_clears_prior_error() {
    let mut core = DashboardCore::new();
    let failed = core.submit("Atlantis").unwrap();
    assert!(core.commit_failure(failed, "city not found".to_string()));

    let cycle = core.submit("London").unwrap();
    assert!(core.commit_success(cycle, snapshot("London", 51.5, -0.1), Vec::new()));
    assert!(core.state().error.is_none());
}

#[test]
fn failure_commit_clears_weather_but_not_viewport() {
    let mut core = DashboardCore::new();
    let first = core.submit("London").unwrap();
    assert!(core.commit_success(first, snapshot("London", 51.5, -0.1), vec![entry("x")]));

    let second = core.submit("Atlantis").unwrap();
    assert!(core.commit_failure(second, "city not found".to_string()));

    let state = core.state();
    assert_eq!(state.phase, QueryPhase::Failed);
    assert!(state.weather.is_none());
    assert!(state.forecast.is_empty());
    assert_eq!(state.error.as_deref(), Some("city not found"));
    // 视口停留在上一个成功位置
    assert_eq!(state.viewport.center.lat, 51.5);
    assert_eq!(state.viewport.zoom, CITY_ZOOM);
}

#[test]
fn stale_commits_are_discarded() {
    let mut core = DashboardCore::new();
    let cycle_a = core.submit("London").unwrap();
    let cycle_b = core.submit("Tokyo").unwrap();

    // B 先完成并胜出
    assert!(core.commit_success(cycle_b, snapshot("Tokyo", 35.7, 139.7), Vec::new()));

    // A 随后完成：结果与失败都必须被整体丢弃
    assert!(!core.commit_success(cycle_a, snapshot("London", 51.5, -0.1), Vec::new()));
    assert!(!core.commit_failure(cycle_a, "late failure".to_string()));

    let state = core.state();
    assert_eq!(state.weather.as_ref().unwrap().city, "Tokyo");
    assert!(state.error.is_none());
    assert_eq!(state.viewport.center.lon, 139.7);
}

// =========================================================
// 取数流程
// =========================================================

#[tokio::test]
async fn run_cycle_returns_snapshot_with_forecast() {
    let mut api = MockWeatherApi::new();
    api.script_current("London", Ok(snapshot("London", 51.5, -0.1)));
    api.script_forecast("London", vec![entry("2024-01-15 12:00:00")]);

    let (snap, forecast) = run_cycle(&api, "London").await.unwrap();
    assert_eq!(snap.city, "London");
    assert_eq!(forecast.len(), 1);
}

#[tokio::test]
async fn degraded_forecast_yields_weather_without_error() {
    let mut api = MockWeatherApi::new();
    api.script_current("London", Ok(snapshot("London", 51.5, -0.1)));
    // 未脚本化预报：mock 返回空序列，等价于客户端降级

    let mut core = DashboardCore::new();
    let cycle = core.submit("London").unwrap();
    let (snap, forecast) = run_cycle(&api, "London").await.unwrap();
    assert!(core.commit_success(cycle, snap, forecast));

    let state = core.state();
    assert!(state.weather.is_some());
    assert!(state.forecast.is_empty());
    assert!(state.error.is_none());
    assert_eq!(state.phase, QueryPhase::Success);
}

#[tokio::test]
async fn forecast_is_not_requested_when_current_fails() {
    let mut api = MockWeatherApi::new();
    api.script_current(
        "Atlantis",
        Err(WeatherError::NotFound("city not found".to_string())),
    );

    let err = run_cycle(&api, "Atlantis").await.unwrap_err();
    // 上游消息原样透出
    assert_eq!(err.to_string(), "city not found");
    assert_eq!(api.forecast_calls.get(), 0);
}

#[tokio::test]
async fn out_of_order_completion_keeps_latest_submission() {
    let mut api = MockWeatherApi::new();
    api.script_current("London", Ok(snapshot("London", 51.5, -0.1)));
    api.script_current("Tokyo", Ok(snapshot("Tokyo", 35.7, 139.7)));
    api.script_forecast("London", vec![entry("2024-01-15 12:00:00")]);
    let release_london = api.gate("London");

    let core = Rc::new(RefCell::new(DashboardCore::new()));
    let cycle_a = core.borrow_mut().submit("London").unwrap();
    let cycle_b = core.borrow_mut().submit("Tokyo").unwrap();

    // A 在途时 B 已提交；B 先完成，A 在 B 之后才被放行
    let slow_a = {
        let core = Rc::clone(&core);
        let api = &api;
        async move {
            let (snap, forecast) = run_cycle(api, "London").await.unwrap();
            assert!(!core.borrow_mut().commit_success(cycle_a, snap, forecast));
        }
    };
    let fast_b = {
        let core = Rc::clone(&core);
        let api = &api;
        async move {
            let (snap, forecast) = run_cycle(api, "Tokyo").await.unwrap();
            assert!(core.borrow_mut().commit_success(cycle_b, snap, forecast));
            let _ = release_london.send(());
        }
    };
    join!(slow_a, fast_b);

    let core = core.borrow();
    let state = core.state();
    assert_eq!(state.weather.as_ref().unwrap().city, "Tokyo");
    assert_eq!(state.query, "Tokyo");
    assert_eq!(state.viewport.center.lon, 139.7);
    assert_eq!(state.phase, QueryPhase::Success);
}
