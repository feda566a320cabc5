//! Interaction controller: maps user intents to API calls and renderer
//! output.
//!
//! Every user action on either surface becomes an [`Intent`]. Dispatching
//! an intent performs the needed API round trips and returns an [`Update`]:
//! which page [`Region`] changes, the fragment to put there, and an
//! optional [`Notice`]. Renderers stay pure; all failure policy lives here.
//!
//! Failure policy follows the action's origin: user-initiated intents
//! (submit, optimize, details) produce alert notices, background loads
//! produce log notices. The train selector additionally falls back to a
//! fixed option list so the form stays usable when the API is down.

use crate::api::{FleetApi, ScheduleRequest};
use crate::metrics::{AiMetrics, ConflictMetrics, FleetMetrics};
use crate::render;

// ---------------------------------------------------------------------------
// Tab state machine
// ---------------------------------------------------------------------------

/// The dashboard's two tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Scheduling,
    Analytics,
}

impl ActiveTab {
    /// DOM id of the tab's content panel.
    pub fn panel_id(self) -> &'static str {
        match self {
            Self::Scheduling => "scheduling",
            Self::Analytics => "analytics",
        }
    }

    pub fn from_panel_id(id: &str) -> Option<Self> {
        match id {
            "scheduling" => Some(Self::Scheduling),
            "analytics" => Some(Self::Analytics),
            _ => None,
        }
    }
}

/// UI state owned by the controller. Exactly one tab is active at a time;
/// [`DashboardState::set_active`] is the only way to change it.
#[derive(Debug)]
pub struct DashboardState {
    active: ActiveTab,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            active: ActiveTab::Scheduling,
        }
    }

    /// Activate `tab`, deactivating the other.
    pub fn set_active(&mut self, tab: ActiveTab) {
        self.active = tab;
    }

    pub fn active(&self) -> ActiveTab {
        self.active
    }

    pub fn is_active(&self, tab: ActiveTab) -> bool {
        self.active == tab
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Intents and updates
// ---------------------------------------------------------------------------

/// One user action (or startup load) on the dashboard.
#[derive(Debug, Clone)]
pub enum Intent {
    LoadTrains,
    LoadSchedules,
    LoadAnalytics,
    SubmitSchedule(ScheduleForm),
    Optimize { date: String },
    ViewDetails { train_id: String },
    SwitchTab(ActiveTab),
}

/// Page region an [`Update`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    TrainSelector,
    ScheduleTable,
    ScheduleResult,
    OptimizationResults,
    AnalyticsPanel,
    TrainModal,
    TabBar,
}

/// How a failure is surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking, user-visible message for user-initiated actions.
    Alert(String),
    /// Background failure; logged, never shown as a dialog.
    Log(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Alert(message) | Self::Log(message) => message,
        }
    }
}

/// The outcome of dispatching one intent.
///
/// `html: None` means the region keeps whatever it was showing — in
/// particular, a failed modal load leaves the modal hidden.
#[derive(Debug)]
pub struct Update {
    pub region: Region,
    pub html: Option<String>,
    pub notice: Option<Notice>,
}

impl Update {
    fn fragment(region: Region, html: String) -> Self {
        Self {
            region,
            html: Some(html),
            notice: None,
        }
    }

    fn failed(region: Region, notice: Notice) -> Self {
        Self {
            region,
            html: None,
            notice: Some(notice),
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule form
// ---------------------------------------------------------------------------

/// Raw values from the five schedule form fields.
#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub train_id: String,
    pub station: String,
    pub route: String,
    pub date: String,
    pub time: String,
}

impl ScheduleForm {
    /// All five fields are required. Runs before any network call is made.
    pub fn validate(&self) -> Result<(), String> {
        let complete = [
            &self.train_id,
            &self.station,
            &self.route,
            &self.date,
            &self.time,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());

        if complete {
            Ok(())
        } else {
            Err("Please fill all required fields!".to_string())
        }
    }

    pub fn to_request(&self) -> ScheduleRequest {
        ScheduleRequest {
            train_id: self.train_id.clone(),
            station: self.station.clone(),
            route: self.route.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Dispatches intents against a [`FleetApi`] implementation.
pub struct Controller<A: FleetApi> {
    api: A,
    state: DashboardState,
}

impl<A: FleetApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn dispatch(&mut self, intent: Intent) -> Update {
        match intent {
            Intent::LoadTrains => self.load_trains(),
            Intent::LoadSchedules => self.load_schedules(),
            Intent::LoadAnalytics => self.load_analytics(),
            Intent::SubmitSchedule(form) => self.submit_schedule(&form),
            Intent::Optimize { date } => self.optimize(&date),
            Intent::ViewDetails { train_id } => self.view_details(&train_id),
            Intent::SwitchTab(tab) => self.switch_tab(tab),
        }
    }

    /// Populate the train selector, keeping the form usable when the API is
    /// down: a failure swaps in the fixed fallback options instead of
    /// leaving the selector empty.
    fn load_trains(&mut self) -> Update {
        match self.api.list_trains() {
            Ok(trains) => Update::fragment(Region::TrainSelector, render::train_options(&trains)),
            Err(err) => Update {
                region: Region::TrainSelector,
                html: Some(render::fallback_train_options()),
                notice: Some(Notice::Log(format!(
                    "failed to load trains, keeping fallback options: {err:#}"
                ))),
            },
        }
    }

    fn load_schedules(&mut self) -> Update {
        match self.api.list_schedules() {
            Ok(schedules) => {
                Update::fragment(Region::ScheduleTable, render::schedule_table(&schedules))
            }
            Err(err) => Update::failed(
                Region::ScheduleTable,
                Notice::Log(format!("failed to load schedules: {err:#}")),
            ),
        }
    }

    /// Analytics needs both record sets; either load failing degrades the
    /// whole panel (and nothing else).
    fn load_analytics(&mut self) -> Update {
        let loaded = self
            .api
            .list_trains()
            .and_then(|trains| self.api.list_schedules().map(|schedules| (trains, schedules)));

        match loaded {
            Ok((trains, schedules)) => {
                let fleet = FleetMetrics::from_trains(&trains);
                let ai = AiMetrics::from_schedules(&schedules);
                let conflicts = ConflictMetrics::from_schedules(&schedules);
                Update::fragment(
                    Region::AnalyticsPanel,
                    render::analytics_panel(&fleet, ai.as_ref(), &conflicts),
                )
            }
            Err(err) => Update::failed(
                Region::AnalyticsPanel,
                Notice::Log(format!("failed to load analytics: {err:#}")),
            ),
        }
    }

    fn submit_schedule(&mut self, form: &ScheduleForm) -> Update {
        if let Err(message) = form.validate() {
            return Update::failed(Region::ScheduleResult, Notice::Alert(message));
        }

        match self.api.create_schedule(&form.to_request()) {
            Ok(schedule) => {
                Update::fragment(Region::ScheduleResult, render::schedule_result(&schedule))
            }
            Err(err) => Update::failed(
                Region::ScheduleResult,
                Notice::Alert(format!("Failed to create schedule: {err:#}")),
            ),
        }
    }

    fn optimize(&mut self, date: &str) -> Update {
        if date.trim().is_empty() {
            return Update::failed(
                Region::OptimizationResults,
                Notice::Alert("Please select a target date".to_string()),
            );
        }

        match self.api.optimize(date) {
            Ok(result) => Update::fragment(
                Region::OptimizationResults,
                render::optimization_results(&result),
            ),
            Err(err) => Update::failed(
                Region::OptimizationResults,
                Notice::Alert(format!("Optimization failed: {err:#}")),
            ),
        }
    }

    /// The modal needs the train record and its analysis; it opens only
    /// after both round trips succeed.
    fn view_details(&mut self, train_id: &str) -> Update {
        let loaded = self.api.train_details(train_id).and_then(|train| {
            self.api
                .compute_analysis(train_id)
                .map(|analysis| (train, analysis))
        });

        match loaded {
            Ok((train, analysis)) => Update::fragment(
                Region::TrainModal,
                render::train_detail_modal(&train, &analysis),
            ),
            Err(err) => Update::failed(
                Region::TrainModal,
                Notice::Alert(format!("Failed to load train details: {err:#}")),
            ),
        }
    }

    fn switch_tab(&mut self, tab: ActiveTab) -> Update {
        self.state.set_active(tab);
        Update::fragment(Region::TabBar, tab.panel_id().to_string())
    }
}

/// Today's date in the `YYYY-MM-DD` form the date fields and the API use.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
