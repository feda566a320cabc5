//! Embedded web dashboard for fleetboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page dashboard (two tabs, schedule form, detail modal)
//! - Fragment endpoints whose HTML is produced by the pure renderers
//! - Action endpoints for form submission, optimization, and tab switching
//!
//! Every fragment/action handler turns the request into an [`Intent`] and
//! hands it to the [`Controller`]; the remote fleet API does all the actual
//! work. Requests are handled sequentially — one in flight at a time, which
//! is sufficient for a local single-user dashboard.

mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Deserialize;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::ApiClient;
use crate::config::{ApiConfig, Environment, FleetboardConfig};
use crate::controller::{ActiveTab, Controller, Intent, Notice, ScheduleForm, Update};

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server.
///
/// Resolves the API base from the configured host (the environment
/// resolution step), builds the client and controller once, and blocks the
/// current thread serving requests. Errors are handled per-request without
/// crashing the server.
pub fn serve(config: &FleetboardConfig) -> Result<()> {
    let addr = config.web.addr();
    let api_config = config.resolve_api(&config.web.host);
    log::info!(
        "resolved {} API base: {}",
        Environment::detect(&config.web.host),
        api_config.base_url
    );

    let client = ApiClient::new(&api_config);
    let mut controller = Controller::new(client);

    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("fleetboard dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    // Try to open in default browser (best-effort)
    let url = format!("http://{addr}");
    let _ = open_browser(&url);

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Post | Method::Put | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let result = dispatch(&mut controller, &api_config, &method, &url, body.as_deref());

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let _ = request.respond(json_error(500, &e.to_string()));
            }
        }

        log::debug!("{method} {url}");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    controller: &mut Controller<ApiClient>,
    api_config: &ApiConfig,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // Fragments — background loads, failures logged
        (&Method::Get, "/fragment/trains") => {
            Ok(fragment_response(controller.dispatch(Intent::LoadTrains)))
        }
        (&Method::Get, "/fragment/schedules") => {
            Ok(fragment_response(controller.dispatch(Intent::LoadSchedules)))
        }
        (&Method::Get, "/fragment/analytics") => {
            Ok(fragment_response(controller.dispatch(Intent::LoadAnalytics)))
        }

        // Fragments — user-initiated modal open
        (&Method::Get, _) if path.starts_with("/fragment/train/") => {
            let train_id = path.trim_start_matches("/fragment/train/").to_string();
            Ok(action_response(
                controller.dispatch(Intent::ViewDetails { train_id }),
            ))
        }

        // Actions
        (&Method::Post, "/action/schedule") => {
            let form: ScheduleFormBody =
                serde_json::from_str(body.unwrap_or("{}")).context("malformed form body")?;
            Ok(action_response(
                controller.dispatch(Intent::SubmitSchedule(form.into())),
            ))
        }
        (&Method::Post, "/action/optimize") => {
            let body: OptimizeBody =
                serde_json::from_str(body.unwrap_or("{}")).context("malformed optimize body")?;
            Ok(action_response(controller.dispatch(Intent::Optimize {
                date: body.date.unwrap_or_default(),
            })))
        }
        (&Method::Post, "/action/tab") => {
            let body: TabBody =
                serde_json::from_str(body.unwrap_or("{}")).context("malformed tab body")?;
            match ActiveTab::from_panel_id(&body.tab) {
                Some(tab) => {
                    let update = controller.dispatch(Intent::SwitchTab(tab));
                    let active = update.html.unwrap_or_default();
                    Ok(json_response(&serde_json::json!({ "active": active })))
                }
                None => Ok(json_error(400, "unknown tab")),
            }
        }

        // Health
        (&Method::Get, "/api/health") => Ok(health(api_config)),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// JSON body of `POST /action/schedule` — the five form fields, camelCase
/// like the remote API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ScheduleFormBody {
    train_id: String,
    station: String,
    route: String,
    date: String,
    time: String,
}

impl From<ScheduleFormBody> for ScheduleForm {
    fn from(body: ScheduleFormBody) -> Self {
        Self {
            train_id: body.train_id,
            station: body.station,
            route: body.route,
            date: body.date,
            time: body.time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OptimizeBody {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TabBody {
    tab: String,
}

// ---------------------------------------------------------------------------
// Update → HTTP response
// ---------------------------------------------------------------------------

/// Response for background fragment loads: the fragment on success, a JSON
/// error on failure. Failure notices are logged here — the page just leaves
/// the region as it was.
fn fragment_response(update: Update) -> Response<Cursor<Vec<u8>>> {
    log_notice(&update);
    match update.html {
        Some(html) => html_response(&html),
        None => json_error(502, notice_message(&update)),
    }
}

/// Response for user-initiated actions: the fragment on success, a JSON
/// error the page surfaces as an alert on failure.
fn action_response(update: Update) -> Response<Cursor<Vec<u8>>> {
    log_notice(&update);
    match update.html {
        Some(html) => html_response(&html),
        None => json_error(400, notice_message(&update)),
    }
}

fn log_notice(update: &Update) {
    match &update.notice {
        Some(Notice::Log(message)) => log::warn!("{message}"),
        Some(Notice::Alert(message)) => log::debug!("alert: {message}"),
        None => {}
    }
}

fn notice_message(update: &Update) -> &str {
    update
        .notice
        .as_ref()
        .map(Notice::message)
        .unwrap_or("request failed")
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

/// Health endpoint: resolved base plus a live reachability probe.
fn health(api_config: &ApiConfig) -> Response<Cursor<Vec<u8>>> {
    let client = ApiClient::new(api_config);
    json_response(&serde_json::json!({
        "apiBase": client.base_url(),
        "reachable": client.is_reachable(),
    }))
}

fn html_response(html: &str) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(html.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn json_response(value: &serde_json::Value) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(value.to_string().into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200))
}

fn json_error(code: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(code))
}

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    json_error(404, "not found")
}

/// JSON content type header.
fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
