use actix_web::{HttpResponse, Responder, get};

macros_utils::routes! {
    route dashboard_route,
}

/// Single static page; all data comes from `/status`, polled client-side.
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Service Health</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem; background: #f5f5f5; color: #222; }
    .target { background: #fff; padding: 1rem; margin: .5rem 0; border-radius: 4px; border-left: 5px solid #999; }
    .up { border-left-color: #2e7d32; }
    .down { border-left-color: #c62828; }
    .url, .meta { color: #666; font-size: .9rem; }
    .error { color: #c62828; }
  </style>
</head>
<body>
  <h1>Service Health</h1>
  <p><button id="refresh">Refresh</button> <strong id="overall"></strong></p>
  <div id="targets"></div>
  <p class="meta"><a href="/status">/status</a> &middot; <a href="/metrics">/metrics</a> &middot; <a href="/health">/health</a></p>
  <script>
    function line(cls, text) {
      const div = document.createElement('div');
      div.className = cls;
      div.textContent = text;
      return div;
    }

    async function refresh() {
      const response = await fetch('/status');
      const data = await response.json();
      const container = document.getElementById('targets');
      container.replaceChildren();

      for (const status of Object.values(data.services)) {
        const card = line('target ' + (status.healthy ? 'up' : 'down'), '');
        card.append(line('name', status.name));
        card.append(line('url', status.url));
        card.append(line('meta', status.healthy ? 'Healthy' : 'Unhealthy'));
        card.append(line('meta', 'Response time: ' + status.response_time_ms + 'ms'));
        card.append(line('meta', 'Last checked: ' +
          (status.last_checked ? new Date(status.last_checked).toLocaleString() : 'never')));
        if (status.error) card.append(line('error', status.error));
        container.append(card);
      }

      document.getElementById('overall').textContent =
        data.healthy ? 'All services healthy' : 'Some services down';
    }

    document.getElementById('refresh').addEventListener('click', refresh);
    setInterval(refresh, 5000);
    refresh();
  </script>
</body>
</html>
"#;

#[get("/")]
pub async fn dashboard_route() -> impl Responder {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(DASHBOARD_HTML)
}
