//! Page shell and stylesheet for the server-rendered dashboard.
//!
//! Everything is compiled into the binary. No external assets, no build
//! tools, no CDN dependencies.

/// Wrap rendered sidebar and content in the full HTML document.
pub fn layout(title: &str, sidebar: &str, content: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="app">
<aside class="sidebar">
{sidebar}
</aside>
<main class="content">
{content}
<footer>{footer}</footer>
</main>
</div>
</body>
</html>"#
    )
}

/// Dashboard stylesheet.
pub const STYLE: &str = r#"
:root {
  --primary: #0c4a6e;
  --primary-2: #145374;
  --primary-3: #1e729f;
  --bg: #f5f7fa;
  --surface: #ffffff;
  --border: #d9e2ec;
  --text: #1f2933;
  --text-muted: #66788a;
  --green: #28a745;
  --yellow: #ffc107;
  --red: #dc3545;
  --blue: #1f77b4;
  --radius: 10px;
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

/* Layout */
.app { display: flex; min-height: 100vh; }
.sidebar {
  width: 280px;
  flex-shrink: 0;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 20px 16px;
}
.content { flex: 1; padding: 24px 32px; max-width: 1280px; }

/* Sidebar */
.brand {
  background: linear-gradient(135deg, var(--primary) 0%, var(--primary-2) 100%);
  color: #fff;
  text-align: center;
  padding: 1rem;
  border-radius: var(--radius);
  margin-bottom: 1.5rem;
  font-size: 18px;
}
.nav-group h3 {
  font-size: 13px;
  color: var(--text-muted);
  margin: 16px 0 8px;
}
.nav-buttons { display: grid; grid-template-columns: 1fr 1fr; gap: 6px; }
.nav-buttons.single { grid-template-columns: 1fr; }
.nav-buttons form { display: contents; }
.nav-buttons button {
  width: 100%;
  padding: 8px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--surface);
  color: var(--text);
  font-size: 13px;
  cursor: pointer;
  transition: all 0.15s;
}
.nav-buttons button:hover { border-color: var(--primary-3); }
.nav-buttons button.active { background: var(--primary); border-color: var(--primary); color: #fff; }

/* Headers */
.main-header {
  background: linear-gradient(90deg, var(--primary) 0%, var(--primary-2) 100%);
  padding: 1rem;
  border-radius: var(--radius);
  color: #fff;
  text-align: center;
  margin-bottom: 2rem;
}
h2.subheader { font-size: 18px; margin: 24px 0 12px; }

/* Metrics */
.metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; }
.metric-card {
  background: linear-gradient(135deg, #e8f0fc 0%, #cce0ff 100%);
  padding: 1.5rem;
  border-radius: var(--radius);
  border-left: 4px solid var(--primary);
}
.metric-card h3 { font-size: 14px; font-weight: 500; }
.metric-card .value { font-size: 26px; font-weight: 700; }

/* Tables */
table { width: 100%; border-collapse: collapse; background: var(--surface); border-radius: var(--radius); overflow: hidden; }
th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); }
th { background: #eef2f7; font-weight: 600; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }

/* Charts */
.chart { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 12px; margin-bottom: 16px; }
.chart h4 { font-size: 14px; margin-bottom: 8px; }
.chart svg { width: 100%; height: auto; }
.chart text { font-size: 11px; fill: var(--text-muted); }

/* Forms */
.form-container {
  background: var(--surface);
  padding: 2rem;
  border-radius: var(--radius);
  box-shadow: 0 2px 10px rgba(0,0,0,0.1);
  margin: 1rem 0;
}
fieldset { border: none; margin-bottom: 1.5rem; display: grid; grid-template-columns: 1fr 1fr; gap: 12px 24px; }
legend { font-size: 18px; font-weight: 600; margin-bottom: 12px; }
.field label { display: block; font-size: 13px; margin-bottom: 4px; }
.field input[type=text], .field input[type=number], .field input[type=date], .field select, .field textarea {
  width: 100%;
  padding: 6px 8px;
  border: 1px solid var(--border);
  border-radius: 6px;
  font: inherit;
}
.field textarea { min-height: 80px; }
.field.checkbox label { display: flex; gap: 8px; align-items: center; }
.slider { display: flex; gap: 12px; }
button.primary {
  background: linear-gradient(90deg, var(--primary) 0%, var(--primary-2) 100%);
  color: #fff;
  border: none;
  border-radius: 5px;
  padding: 0.5rem 1rem;
  font-weight: 600;
  cursor: pointer;
}
button.primary:hover { background: linear-gradient(90deg, var(--primary-2) 0%, var(--primary-3) 100%); }

/* Notices */
.notice { padding: 12px 16px; border-radius: 6px; margin: 8px 0; }
.notice.success { background: #e6f4ea; color: #1e6b34; }
.notice.info { background: #e7f1fb; color: #124a80; }
.notice.error { background: #fdecea; color: #8a1c1c; }

footer { border-top: 1px solid var(--border); margin-top: 32px; padding: 1rem; text-align: center; color: #666; }
"#;
