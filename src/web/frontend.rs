//! Embedded HTML/CSS/JS frontend for the fleetboard dashboard.
//!
//! The entire page is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.
//!
//! The page itself carries no data logic: dynamic regions are filled by
//! fetching `/fragment/*` endpoints, and user actions post to `/action/*`.
//! The train selector ships with the fallback options already in place, so
//! the form is usable before (or without) the first successful train-list
//! fetch.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>fleetboard</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --cyan: #39d2c0;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1100px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: baseline;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

/* Tabs */
nav { display: flex; gap: 4px; margin-bottom: 24px; background: var(--surface);
      border-radius: var(--radius); padding: 4px; border: 1px solid var(--border); }
nav button.tab-btn {
  flex: 1; padding: 8px 16px; border: none; border-radius: 6px;
  background: transparent; color: var(--text-muted); font-size: 13px;
  font-weight: 500; cursor: pointer;
}
nav button.tab-btn:hover { color: var(--text); }
nav button.tab-btn.active { background: var(--accent); color: #fff; }
.tab-content { display: none; }
.tab-content.active { display: block; }

/* Cards and forms */
.card { background: var(--surface); border: 1px solid var(--border);
        border-radius: var(--radius); padding: 16px; margin-bottom: 20px; }
.card h2 { font-size: 16px; margin-bottom: 12px; }
form .row { display: flex; gap: 10px; flex-wrap: wrap; margin-bottom: 10px; }
input, select {
  background: var(--bg); color: var(--text); border: 1px solid var(--border);
  border-radius: 6px; padding: 7px 10px; font-size: 13px;
}
button.btn, button.btn-small {
  background: var(--accent); color: #fff; border: none; border-radius: 6px;
  padding: 8px 14px; font-size: 13px; cursor: pointer;
}
button.btn-small { padding: 3px 10px; font-size: 12px; }

/* Schedule table */
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 7px 10px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; font-size: 12px; }

/* Status tiers */
.status-optimal { color: var(--green); }
.status-good { color: var(--cyan); }
.status-caution { color: var(--yellow); }
.status-avoid { color: var(--red); }
.conflict-badge {
  background: var(--red); color: #fff; border-radius: 10px;
  padding: 1px 8px; font-size: 11px; margin-left: 6px;
}

/* Result card */
.result-card { border: 1px solid var(--border); border-radius: var(--radius);
               padding: 14px; margin-top: 12px; }
.result-header { display: flex; justify-content: space-between; align-items: center; }
.ai-score { font-weight: 600; }
.breakdown { margin-top: 8px; }
.breakdown-item { display: inline-block; background: var(--bg); border: 1px solid var(--border);
                  border-radius: 10px; padding: 2px 10px; margin: 2px 4px 2px 0; font-size: 12px; }
.conflicts-section { margin-top: 10px; color: var(--yellow); }
.conflicts-section ul { margin: 4px 0 0 20px; }
.no-conflicts { margin-top: 10px; color: var(--green); }

/* Optimization results */
.optimization-summary { margin-top: 12px; }
.summary-stats { display: flex; gap: 18px; margin-top: 8px; }
.stat { text-align: center; }
.stat-number { display: block; font-size: 20px; font-weight: 600; }
.stat-label { color: var(--text-muted); font-size: 12px; }
.recommendations { margin-top: 12px; }
.recommendation-item { display: flex; gap: 12px; align-items: baseline; flex-wrap: wrap;
                       padding: 8px 10px; border-bottom: 1px solid var(--border); }
.recommendation-item .rank { color: var(--text-muted); width: 34px; }
.recommendation-item .conflicts { width: 100%; color: var(--yellow); font-size: 12px; }

/* Analytics */
#analyticsPanel { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px; }
.metric-card { background: var(--surface); border: 1px solid var(--border);
               border-radius: var(--radius); padding: 16px; }
.metric-card h3 { font-size: 14px; margin-bottom: 10px; }
.metric { padding: 3px 0; color: var(--text-muted); }
.metric strong { color: var(--text); }

/* Train detail modal */
.modal { display: none; position: fixed; inset: 0; background: rgba(0,0,0,0.6); }
.modal-content {
  background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius);
  max-width: 720px; margin: 60px auto; padding: 20px; max-height: 80vh; overflow-y: auto;
}
.modal-content .close { float: right; cursor: pointer; color: var(--text-muted); font-size: 20px; }
.train-overview { display: flex; justify-content: space-between; align-items: center;
                  margin-bottom: 14px; }
.details-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 14px; }
.detail-section h4 { font-size: 13px; margin-bottom: 6px; }
.detail-section ul { margin-left: 18px; }
.ai-breakdown { margin-top: 14px; }
.breakdown-bar { display: flex; align-items: center; gap: 8px; padding: 3px 0; }
.breakdown-bar span:first-child { width: 90px; color: var(--text-muted); }
.breakdown-bar .bar { flex: 1; height: 8px; background: var(--bg); border-radius: 4px; }
.breakdown-bar .fill { height: 8px; background: var(--accent); border-radius: 4px; }
.recommendation { margin-top: 14px; }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1>fleetboard</h1>
    <span class="subtitle">train fleet induction dashboard</span>
  </header>

  <nav>
    <button class="tab-btn active" data-tab="scheduling">Scheduling</button>
    <button class="tab-btn" data-tab="analytics">Analytics</button>
  </nav>

  <div id="scheduling" class="tab-content active">
    <div class="card">
      <h2>Create Schedule</h2>
      <form id="scheduleForm">
        <div class="row">
          <select id="trainId">
            <!-- fallback options; reconciled once the train list loads -->
            <option value="">Select Train</option>
            <option value="KMTR-045">KMTR-045</option>
            <option value="KMTR-102">KMTR-102</option>
            <option value="KMTR-221">KMTR-221</option>
            <option value="KMTR-310">KMTR-310 (IBL)</option>
            <option value="KMTR-412">KMTR-412</option>
          </select>
          <input id="station" type="text" placeholder="Station">
          <input id="route" type="text" placeholder="Route">
          <input id="date" type="date">
          <input id="time" type="time">
          <button class="btn" type="submit">Schedule</button>
        </div>
      </form>
      <div id="aiOutput" style="display:none"><div id="result"></div></div>
    </div>

    <div class="card">
      <h2>AI Fleet Optimization</h2>
      <div class="row" style="display:flex; gap:10px">
        <input id="optimizeDate" type="date">
        <button class="btn" id="optimizeBtn" type="button">Optimize Fleet</button>
      </div>
      <div id="optimizationResults"></div>
    </div>

    <div class="card">
      <h2>Schedules</h2>
      <table id="scheduleTable">
        <thead>
          <tr><th>Train</th><th>Station</th><th>Route</th><th>Date</th><th>Time</th>
              <th>Score</th><th>Status</th><th></th></tr>
        </thead>
        <tbody></tbody>
      </table>
    </div>
  </div>

  <div id="analytics" class="tab-content">
    <div id="analyticsPanel"></div>
  </div>
</div>

<div id="trainModal" class="modal">
  <div class="modal-content">
    <span class="close">&times;</span>
    <div id="trainDetails"></div>
  </div>
</div>

<script>
const $ = (sel) => document.querySelector(sel);

window.addEventListener('DOMContentLoaded', () => {
  setDefaultDates();
  loadTrains();
  loadSchedules();
  loadAnalytics();
  setupTabs();
  setupForm();
  setupOptimize();
  setupModal();
});

function setDefaultDates() {
  const today = new Date().toISOString().split('T')[0];
  $('#date').value = today;
  $('#optimizeDate').value = today;
}

// Tab switching: exactly one active at a time, mirrored to the server's
// tab state.
function setupTabs() {
  document.querySelectorAll('.tab-btn').forEach((btn) => {
    btn.addEventListener('click', () => {
      const tab = btn.dataset.tab;
      document.querySelectorAll('.tab-btn').forEach((b) => b.classList.remove('active'));
      document.querySelectorAll('.tab-content').forEach((t) => t.classList.remove('active'));
      btn.classList.add('active');
      document.getElementById(tab).classList.add('active');
      fetch('/action/tab', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ tab })
      }).catch((err) => console.log('tab sync failed:', err));
    });
  });
}

// The selector already holds fallback options; a successful fetch replaces
// them, a failed one leaves them in place.
async function loadTrains() {
  try {
    const response = await fetch('/fragment/trains');
    if (!response.ok) throw new Error('HTTP ' + response.status);
    $('#trainId').innerHTML = await response.text();
  } catch (err) {
    console.log('train list unavailable, keeping fallback options:', err);
  }
}

async function loadSchedules() {
  try {
    const response = await fetch('/fragment/schedules');
    if (!response.ok) throw new Error('HTTP ' + response.status);
    $('#scheduleTable tbody').innerHTML = await response.text();
  } catch (err) {
    console.log('failed to load schedules:', err);
  }
}

async function loadAnalytics() {
  try {
    const response = await fetch('/fragment/analytics');
    if (!response.ok) throw new Error('HTTP ' + response.status);
    $('#analyticsPanel').innerHTML = await response.text();
  } catch (err) {
    console.log('failed to load analytics:', err);
  }
}

function setupForm() {
  $('#scheduleForm').addEventListener('submit', async (e) => {
    e.preventDefault();

    const form = {
      trainId: $('#trainId').value,
      station: $('#station').value,
      route: $('#route').value,
      date: $('#date').value,
      time: $('#time').value
    };

    // Required-field check happens before any network call.
    if (!form.trainId || !form.station || !form.route || !form.date || !form.time) {
      alert('Please fill all required fields!');
      return;
    }

    try {
      const response = await fetch('/action/schedule', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(form)
      });

      if (response.ok) {
        $('#result').innerHTML = await response.text();
        $('#aiOutput').style.display = 'block';
        await loadSchedules();
        e.target.reset();
        setDefaultDates();
      } else {
        const body = await response.json();
        alert('Error: ' + body.error);
      }
    } catch (err) {
      alert('Failed to create schedule: ' + err.message);
    }
  });
}

function setupOptimize() {
  $('#optimizeBtn').addEventListener('click', async () => {
    const date = $('#optimizeDate').value;
    if (!date) {
      alert('Please select a target date');
      return;
    }

    try {
      const response = await fetch('/action/optimize', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ date })
      });

      if (response.ok) {
        $('#optimizationResults').innerHTML = await response.text();
      } else {
        const body = await response.json();
        alert('Optimization failed: ' + body.error);
      }
    } catch (err) {
      alert('Optimization failed: ' + err.message);
    }
  });
}

// Details buttons are injected with the table rows; delegate from the tbody.
document.addEventListener('click', (event) => {
  const btn = event.target.closest('button[data-train]');
  if (btn) viewTrainDetails(btn.dataset.train);
});

// The modal opens only once the composed fragment (details + analysis)
// arrives; a failed fetch leaves it hidden.
async function viewTrainDetails(trainId) {
  try {
    const response = await fetch('/fragment/train/' + encodeURIComponent(trainId));
    if (!response.ok) {
      const body = await response.json();
      alert(body.error);
      return;
    }
    $('#trainDetails').innerHTML = await response.text();
    $('#trainModal').style.display = 'block';
  } catch (err) {
    alert('Failed to load train details: ' + err.message);
  }
}

function setupModal() {
  const modal = $('#trainModal');
  modal.querySelector('.close').addEventListener('click', () => {
    modal.style.display = 'none';
  });
  // Backdrop click dismisses; clicks inside .modal-content land on inner
  // elements and never match the modal itself.
  window.addEventListener('click', (event) => {
    if (event.target === modal) {
      modal.style.display = 'none';
    }
  });
}
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_carries_fallback_options() {
        for id in ["KMTR-045", "KMTR-102", "KMTR-221", "KMTR-310", "KMTR-412"] {
            assert!(INDEX_HTML.contains(&format!(r#"<option value="{id}">"#)));
        }
        assert!(INDEX_HTML.contains("KMTR-310 (IBL)"));
    }

    #[test]
    fn page_has_both_tab_panels_and_modal() {
        assert!(INDEX_HTML.contains(r#"id="scheduling""#));
        assert!(INDEX_HTML.contains(r#"id="analytics""#));
        assert!(INDEX_HTML.contains(r#"id="trainModal""#));
        assert!(INDEX_HTML.contains("event.target === modal"));
    }
}
