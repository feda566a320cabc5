//! Controller behavior tests against a stub API.
//!
//! These cover the defensive paths that make the dashboard usable when the
//! remote API misbehaves: fallback train options, validation before any
//! network call, all-or-nothing modal composition, and the alert/log split
//! between user-initiated and background failures.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use fleetboard::api::types::{
    Analysis, OptimizationResult, RankedTrain, Schedule, Train,
};
use fleetboard::api::{FleetApi, ScheduleRequest};
use fleetboard::controller::{
    ActiveTab, Controller, Intent, Notice, Region, ScheduleForm,
};

// ---------------------------------------------------------------------------
// Stub API
// ---------------------------------------------------------------------------

type Calls = Rc<RefCell<Vec<&'static str>>>;

/// Stub [`FleetApi`]: each operation returns a canned value or fails, and
/// records that it was called.
#[derive(Default)]
struct StubApi {
    trains: Option<Vec<Train>>,
    schedules: Option<Vec<Schedule>>,
    created: Option<Schedule>,
    optimization: Option<OptimizationResult>,
    details: Option<Train>,
    analysis: Option<Analysis>,
    calls: Calls,
}

impl StubApi {
    fn respond<T: Clone>(&self, op: &'static str, value: &Option<T>) -> Result<T> {
        self.calls.borrow_mut().push(op);
        value
            .clone()
            .ok_or_else(|| anyhow!("connection refused ({op})"))
    }
}

impl FleetApi for StubApi {
    fn list_trains(&self) -> Result<Vec<Train>> {
        self.respond("list_trains", &self.trains)
    }

    fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.respond("list_schedules", &self.schedules)
    }

    fn create_schedule(&self, _request: &ScheduleRequest) -> Result<Schedule> {
        self.respond("create_schedule", &self.created)
    }

    fn optimize(&self, _date: &str) -> Result<OptimizationResult> {
        self.respond("optimize", &self.optimization)
    }

    fn train_details(&self, _train_id: &str) -> Result<Train> {
        self.respond("train_details", &self.details)
    }

    fn compute_analysis(&self, _train_id: &str) -> Result<Analysis> {
        self.respond("compute_analysis", &self.analysis)
    }

    fn rank_trains(&self) -> Result<Vec<RankedTrain>> {
        self.calls.borrow_mut().push("rank_trains");
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn train(id: &str, in_ibl: bool) -> Train {
    serde_json::from_value(serde_json::json!({
        "trainId": id, "inIBL": in_ibl,
        "fitnessCerts": {"rolling": "2024-12-25", "signalling": "2024-12-20"},
        "openJobCards": 1, "lastCleaning": "2024-12-15", "stablingBay": "A1",
        "lastMileage": 1200, "mileageTarget": 1500,
        "brandingContract": {"advertiser": "Coca-Cola"}
    }))
    .unwrap()
}

fn schedule(score: u8) -> Schedule {
    serde_json::from_value(serde_json::json!({
        "trainId": "KMTR-045", "station": "Aluva", "route": "Blue Line",
        "date": "2024-12-20", "time": "06:00",
        "score": score, "recommendation": "READY - Good candidate for induction",
        "breakdown": {"fitness": 100, "jobcard": 80},
        "conflicts": []
    }))
    .unwrap()
}

fn analysis(score: u8) -> Analysis {
    serde_json::from_value(serde_json::json!({
        "score": score, "recommendation": "PRIORITY - Optimal for immediate induction",
        "breakdown": {"fitness": 100, "mileage": 80},
        "conflicts": []
    }))
    .unwrap()
}

fn complete_form() -> ScheduleForm {
    ScheduleForm {
        train_id: "KMTR-045".into(),
        station: "Aluva".into(),
        route: "Blue Line".into(),
        date: "2024-12-20".into(),
        time: "06:00".into(),
    }
}

fn controller(api: StubApi) -> (Controller<StubApi>, Calls) {
    let calls = Rc::clone(&api.calls);
    (Controller::new(api), calls)
}

// ---------------------------------------------------------------------------
// Form validation
// ---------------------------------------------------------------------------

#[test]
fn incomplete_form_never_reaches_the_network() {
    let mut form = complete_form();
    form.station.clear();

    let (mut controller, calls) = controller(StubApi::default());
    let update = controller.dispatch(Intent::SubmitSchedule(form));

    assert!(calls.borrow().is_empty());
    assert!(update.html.is_none());
    assert_eq!(
        update.notice,
        Some(Notice::Alert("Please fill all required fields!".into()))
    );
}

#[test]
fn complete_form_submits_and_renders_result_card() {
    let api = StubApi {
        created: Some(schedule(85)),
        ..Default::default()
    };
    let (mut controller, calls) = controller(api);
    let update = controller.dispatch(Intent::SubmitSchedule(complete_form()));

    assert_eq!(calls.borrow().as_slice(), &["create_schedule"]);
    let html = update.html.expect("result card fragment");
    assert!(html.contains("AI Score: 85%"));
    assert!(html.contains("status-optimal"));
    assert!(html.contains("No conflicts detected"));
}

#[test]
fn server_rejection_surfaces_as_alert() {
    let (mut controller, _) = controller(StubApi::default());
    let update = controller.dispatch(Intent::SubmitSchedule(complete_form()));

    assert!(update.html.is_none());
    match update.notice {
        Some(Notice::Alert(message)) => {
            assert!(message.contains("Failed to create schedule"));
        }
        other => panic!("expected alert, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Train selector fallback
// ---------------------------------------------------------------------------

#[test]
fn train_list_failure_falls_back_to_five_options() {
    let (mut controller, _) = controller(StubApi::default());
    let update = controller.dispatch(Intent::LoadTrains);

    let html = update.html.expect("fallback options");
    // Placeholder plus exactly five selectable trains.
    assert_eq!(html.matches("<option").count(), 6);
    assert_eq!(html.matches(r#"value="KMTR-"#).count(), 5);
    assert!(matches!(update.notice, Some(Notice::Log(_))));
}

#[test]
fn train_list_success_renders_live_options() {
    let api = StubApi {
        trains: Some(vec![train("KMTR-102", false), train("KMTR-310", true)]),
        ..Default::default()
    };
    let (mut controller, _) = controller(api);
    let update = controller.dispatch(Intent::LoadTrains);

    let html = update.html.unwrap();
    assert!(html.starts_with(r#"<option value="">Select Train</option>"#));
    assert!(html.contains(">KMTR-102<"));
    assert!(html.contains(">KMTR-310 (IBL)<"));
    assert!(update.notice.is_none());
}

// ---------------------------------------------------------------------------
// Background loads log, user actions alert
// ---------------------------------------------------------------------------

#[test]
fn background_failures_are_logged_not_alerted() {
    let (mut controller, _) = controller(StubApi::default());

    for intent in [Intent::LoadSchedules, Intent::LoadAnalytics] {
        let update = controller.dispatch(intent);
        assert!(update.html.is_none());
        assert!(
            matches!(update.notice, Some(Notice::Log(_))),
            "background loads must not alert"
        );
    }
}

#[test]
fn optimize_without_date_never_reaches_the_network() {
    let (mut controller, calls) = controller(StubApi::default());
    let update = controller.dispatch(Intent::Optimize {
        date: "  ".into(),
    });

    assert!(calls.borrow().is_empty());
    assert_eq!(
        update.notice,
        Some(Notice::Alert("Please select a target date".into()))
    );
}

#[test]
fn optimize_failure_alerts() {
    let (mut controller, _) = controller(StubApi::default());
    let update = controller.dispatch(Intent::Optimize {
        date: "2024-12-20".into(),
    });

    match update.notice {
        Some(Notice::Alert(message)) => assert!(message.contains("Optimization failed")),
        other => panic!("expected alert, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Detail modal composition
// ---------------------------------------------------------------------------

#[test]
fn modal_opens_only_when_both_fetches_succeed() {
    let api = StubApi {
        details: Some(train("KMTR-045", false)),
        analysis: Some(analysis(91)),
        ..Default::default()
    };
    let (mut controller, calls) = controller(api);
    let update = controller.dispatch(Intent::ViewDetails {
        train_id: "KMTR-045".into(),
    });

    assert_eq!(
        calls.borrow().as_slice(),
        &["train_details", "compute_analysis"]
    );
    let html = update.html.expect("modal fragment");
    assert!(html.contains("KMTR-045"));
    assert!(html.contains("AI Score: 91%"));
    assert!(html.contains("rolling: 2024-12-25"));
}

#[test]
fn failed_detail_fetch_aborts_before_analysis() {
    let api = StubApi {
        analysis: Some(analysis(91)),
        ..Default::default()
    };
    let (mut controller, calls) = controller(api);
    let update = controller.dispatch(Intent::ViewDetails {
        train_id: "KMTR-045".into(),
    });

    // The second fetch never happens, and the modal stays hidden.
    assert_eq!(calls.borrow().as_slice(), &["train_details"]);
    assert!(update.html.is_none());
    assert!(matches!(update.notice, Some(Notice::Alert(_))));
}

#[test]
fn failed_analysis_fetch_keeps_modal_hidden() {
    let api = StubApi {
        details: Some(train("KMTR-045", false)),
        ..Default::default()
    };
    let (mut controller, _) = controller(api);
    let update = controller.dispatch(Intent::ViewDetails {
        train_id: "KMTR-045".into(),
    });

    assert!(update.html.is_none());
    match update.notice {
        Some(Notice::Alert(message)) => {
            assert!(message.contains("Failed to load train details"));
        }
        other => panic!("expected alert, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Tabs and analytics
// ---------------------------------------------------------------------------

#[test]
fn switching_tabs_is_mutually_exclusive() {
    let (mut controller, _) = controller(StubApi::default());
    assert!(controller.state().is_active(ActiveTab::Scheduling));

    let update = controller.dispatch(Intent::SwitchTab(ActiveTab::Analytics));
    assert_eq!(update.region, Region::TabBar);
    assert_eq!(update.html.as_deref(), Some("analytics"));
    assert!(controller.state().is_active(ActiveTab::Analytics));
    assert!(!controller.state().is_active(ActiveTab::Scheduling));
}

#[test]
fn analytics_panel_aggregates_both_record_sets() {
    let mut trains: Vec<Train> = (0..7).map(|i| train(&format!("T-{i}"), false)).collect();
    trains.extend((7..10).map(|i| train(&format!("T-{i}"), true)));

    let api = StubApi {
        trains: Some(trains),
        schedules: Some(vec![schedule(90), schedule(70), schedule(50)]),
        ..Default::default()
    };
    let (mut controller, _) = controller(api);
    let update = controller.dispatch(Intent::LoadAnalytics);

    let html = update.html.expect("analytics fragment");
    assert!(html.contains("Utilization: <strong>70%</strong>"));
    assert!(html.contains("Avg AI Score: <strong>70%</strong>"));
    assert!(html.contains("Conflict Rate: <strong>0%</strong>"));
}

#[test]
fn analytics_with_no_schedules_shows_placeholder_and_zero_rate() {
    let api = StubApi {
        trains: Some(vec![train("KMTR-045", false)]),
        schedules: Some(Vec::new()),
        ..Default::default()
    };
    let (mut controller, _) = controller(api);
    let update = controller.dispatch(Intent::LoadAnalytics);

    let html = update.html.unwrap();
    assert!(html.contains("No schedules yet"));
    assert!(html.contains("Conflict Rate: <strong>0%</strong>"));
}
