use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Nursing Resume Assistant</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 52rem; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input[type=text] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    .turn { margin-bottom: 1rem; white-space: pre-wrap; }
    .turn strong { display: block; }
    .notice { padding: 0.5rem; border-radius: 4px; margin-top: 0.5rem; }
    .notice.error { background: #fdecea; color: #8a1c12; }
    .notice.info { background: #eef6fc; color: #0b4a6f; }
    .muted { color: #777; }
  </style>
</head>
<body>
  <h1>Nursing Resume Assistant</h1>
  <p class="muted"><span id="docCount">0</span> document(s) loaded</p>

  <div class="card">
    <label for="fileInput">Upload your documents</label>
    <input id="fileInput" type="file" accept=".pdf,.docx,.txt" multiple />
    <button id="uploadBtn">Upload</button>
  </div>

  <div class="card">
    <label for="queryInput">Enter your query related to the uploaded document:</label>
    <input id="queryInput" type="text" />
    <button id="askBtn">Get AI Response</button>
  </div>

  <div id="notices"></div>
  <div class="card" id="history"></div>

  <script>
    const fileInput = document.getElementById('fileInput');
    const queryInput = document.getElementById('queryInput');
    const askBtn = document.getElementById('askBtn');
    const uploadBtn = document.getElementById('uploadBtn');

    function render(model) {
      document.getElementById('docCount').textContent = model.document_count;
      queryInput.value = model.input;

      const notices = document.getElementById('notices');
      notices.replaceChildren(...model.notices.map(n => {
        const div = document.createElement('div');
        div.className = 'notice ' + n.kind;
        div.textContent = n.message;
        return div;
      }));

      const history = document.getElementById('history');
      history.replaceChildren(...model.turns.map(t => {
        const div = document.createElement('div');
        div.className = 'turn';
        const label = document.createElement('strong');
        label.textContent = t.speaker === 'user' ? 'User:' : 'AI:';
        div.append(label, document.createTextNode(t.text));
        return div;
      }));
    }

    function showError(message) {
      const div = document.createElement('div');
      div.className = 'notice error';
      div.textContent = message;
      document.getElementById('notices').replaceChildren(div);
    }

    uploadBtn.addEventListener('click', async () => {
      if (!fileInput.files.length) {
        showError('Select at least one file first.');
        return;
      }
      const formData = new FormData();
      for (const file of fileInput.files) {
        formData.append('file', file);
      }
      uploadBtn.disabled = true;
      try {
        const res = await fetch('/api/files', { method: 'POST', body: formData });
        if (!res.ok) { showError('Upload failed (' + res.status + ')'); return; }
        render(await res.json());
        fileInput.value = '';
      } finally {
        uploadBtn.disabled = false;
      }
    });

    askBtn.addEventListener('click', async () => {
      const query = queryInput.value;
      if (!query.trim()) {
        showError('Type a question first.');
        return;
      }
      askBtn.disabled = true;
      try {
        const res = await fetch('/api/query', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ query })
        });
        if (!res.ok) { showError('Request failed (' + res.status + ')'); return; }
        render(await res.json());
      } finally {
        askBtn.disabled = false;
      }
    });

    queryInput.addEventListener('keydown', e => { if (e.key === 'Enter') askBtn.click(); });

    fetch('/api/session').then(r => r.json()).then(render);
  </script>
</body>
</html>"#)
}
