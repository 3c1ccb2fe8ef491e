use crate::commands::{BOUND_KEYS, Command};
use crate::display::sign_class;
use crate::models::{CounterView, HistoryLine};

pub const EMPTY_HISTORY_LABEL: &str = "No actions yet";

pub fn render_index(view: &CounterView) -> String {
    let bound_keys = serde_json::to_string(&BOUND_KEYS).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML
        .replace("{{COUNT}}", &view.count.to_string())
        .replace("{{COUNT_CLASS}}", sign_class(view.sign))
        .replace("{{UNDO_DISABLED}}", if view.undo_available { "" } else { "disabled" })
        .replace("{{HISTORY}}", &render_history(&view.history))
        .replace("{{BOUND_KEYS}}", &bound_keys)
        .replace("{{CMD_INCREMENT}}", Command::Increment.name())
        .replace("{{CMD_DECREMENT}}", Command::Decrement.name())
        .replace("{{CMD_NEUTRAL}}", Command::MarkNeutral.name())
        .replace("{{CMD_RESET}}", Command::Reset.name())
        .replace("{{CMD_UNDO}}", Command::Undo.name())
}

/// Server-side twin of the page's `renderHistory`.
pub fn render_history(lines: &[HistoryLine]) -> String {
    if lines.is_empty() {
        return format!(r#"<div class="history-empty">{EMPTY_HISTORY_LABEL}</div>"#);
    }

    lines
        .iter()
        .map(|line| {
            format!(
                r#"<div class="history-item"><div><span class="history-action {}">{}</span> <span class="history-count">{}</span></div><div class="history-time">{}</div></div>"#,
                line.action_class, line.action, line.total, line.time
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no" />
  <title>Tally Counter</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --plus: #2d7a4b;
      --minus: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
      touch-action: manipulation;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
      text-align: center;
    }

    .count-card {
      background: white;
      border-radius: 22px;
      padding: 24px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      text-align: center;
    }

    .count-value {
      font-size: clamp(4rem, 18vw, 6.5rem);
      font-weight: 600;
      color: var(--accent-2);
      transition: transform 150ms ease, color 150ms ease;
    }

    .count-value.positive {
      color: var(--plus);
    }

    .count-value.negative {
      color: var(--minus);
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .manage {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 12px;
    }

    form {
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      width: 100%;
      padding: 18px 12px;
      font-size: 1.3rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      transition: transform 100ms ease, box-shadow 150ms ease, opacity 150ms ease;
      -webkit-tap-highlight-color: transparent;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    .btn-plus {
      background: var(--plus);
      box-shadow: 0 10px 24px rgba(45, 122, 75, 0.3);
    }

    .btn-minus {
      background: var(--minus);
      box-shadow: 0 10px 24px rgba(198, 59, 43, 0.3);
    }

    .btn-neutral {
      background: #8b857d;
    }

    .btn-reset {
      background: var(--accent);
      font-size: 1rem;
    }

    .btn-undo {
      background: var(--accent-2);
      font-size: 1rem;
    }

    .history {
      background: white;
      border-radius: 20px;
      padding: 12px 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      max-height: 280px;
      overflow-y: auto;
    }

    .history h2 {
      margin: 4px 0 8px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .history-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 8px 0;
      border-top: 1px solid rgba(47, 72, 88, 0.06);
    }

    .history-action {
      font-weight: 600;
      display: inline-block;
      min-width: 3.2em;
    }

    .history-action.plus {
      color: var(--plus);
    }

    .history-action.minus {
      color: var(--minus);
    }

    .history-action.neutral {
      color: #8b857d;
    }

    .history-action.reset {
      color: var(--accent);
    }

    .history-count,
    .history-time,
    .history-empty {
      color: #6f6a65;
      font-size: 0.9rem;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.85rem;
      text-align: center;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Tally Counter</h1>

    <section class="count-card">
      <div id="count-value" class="count-value {{COUNT_CLASS}}">{{COUNT}}</div>
    </section>

    <section class="controls">
      <form method="post" action="/command/{{CMD_DECREMENT}}">
        <button class="btn-minus" id="minus-btn" type="submit" data-command="{{CMD_DECREMENT}}">-1</button>
      </form>
      <form method="post" action="/command/{{CMD_NEUTRAL}}">
        <button class="btn-neutral" id="neutral-btn" type="submit" data-command="{{CMD_NEUTRAL}}">0</button>
      </form>
      <form method="post" action="/command/{{CMD_INCREMENT}}">
        <button class="btn-plus" id="plus-btn" type="submit" data-command="{{CMD_INCREMENT}}">+1</button>
      </form>
    </section>

    <section class="manage">
      <form method="post" action="/command/{{CMD_RESET}}">
        <button class="btn-reset" id="reset-btn" type="submit" data-command="{{CMD_RESET}}">Reset</button>
      </form>
      <form method="post" action="/command/{{CMD_UNDO}}">
        <button class="btn-undo" id="undo-btn" type="submit" {{UNDO_DISABLED}} data-command="{{CMD_UNDO}}">Undo</button>
      </form>
    </section>

    <section class="history">
      <h2>History</h2>
      <div id="history-list">{{HISTORY}}</div>
    </section>

    <p class="hint">Keys: + / = count up, - count down, 0 marker, R reset, Ctrl+Z or Backspace undo.</p>
  </main>

  <script>
    const BOUND_KEYS = {{BOUND_KEYS}};
    const countEl = document.getElementById('count-value');
    const historyEl = document.getElementById('history-list');
    const undoBtn = document.getElementById('undo-btn');
    const buttons = Array.from(document.querySelectorAll('button[data-command]'));

    const vibrate = (pattern) => {
      if (navigator.vibrate) {
        navigator.vibrate(pattern);
      }
    };

    const animateCount = () => {
      countEl.style.transform = 'scale(1.1)';
      setTimeout(() => {
        countEl.style.transform = 'scale(1)';
      }, 150);
    };

    const renderHistory = (lines) => {
      if (lines.length === 0) {
        historyEl.innerHTML = '<div class="history-empty">No actions yet</div>';
        return;
      }
      historyEl.innerHTML = lines
        .map((line) => `<div class="history-item"><div><span class="history-action ${line.action_class}">${line.action}</span> <span class="history-count">${line.total}</span></div><div class="history-time">${line.time}</div></div>`)
        .join('');
      historyEl.parentElement.scrollTop = 0;
    };

    const updateUI = (view) => {
      countEl.textContent = view.count;
      countEl.classList.remove('positive', 'negative');
      if (view.sign !== 'neutral') {
        countEl.classList.add(view.sign);
      }
      undoBtn.disabled = !view.undo_available;
      renderHistory(view.history);
    };

    const afterCommand = (data) => {
      updateUI(data.view);
      if (data.outcome === 'applied') {
        animateCount();
      }
    };

    const send = async (command) => {
      const res = await fetch('/api/command', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ command })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      const data = await res.json();
      afterCommand(data);
      if (command === '{{CMD_UNDO}}' && data.outcome === 'applied') {
        vibrate([50, 50, 50]);
      }
    };

    const sendKey = async (event) => {
      const res = await fetch('/api/key', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          key: event.key,
          ctrl_key: event.ctrlKey,
          meta_key: event.metaKey,
          target_tag: event.target && event.target.tagName ? event.target.tagName : null
        })
      });
      if (!res.ok) {
        throw new Error('Key request failed');
      }
      const data = await res.json();
      if (data.handled) {
        afterCommand(data);
      }
    };

    const refresh = async () => {
      const res = await fetch('/api/state');
      if (!res.ok) {
        throw new Error('Unable to load counter');
      }
      updateUI(await res.json());
    };

    const addTouchFeedback = (button) => {
      let touchTimeout;
      button.addEventListener('touchstart', (event) => {
        event.preventDefault();
        button.style.transform = 'scale(0.95)';
        vibrate(10);
      });
      button.addEventListener('touchend', (event) => {
        event.preventDefault();
        touchTimeout = setTimeout(() => {
          button.style.transform = '';
        }, 100);
        button.click();
      });
      button.addEventListener('touchcancel', () => {
        button.style.transform = '';
        if (touchTimeout) {
          clearTimeout(touchTimeout);
        }
      });
    };

    buttons.forEach((button) => {
      button.form.addEventListener('submit', (event) => {
        event.preventDefault();
        if (button.disabled) {
          return;
        }
        send(button.dataset.command).catch((err) => console.error(err));
      });
      addTouchFeedback(button);
    });

    document.addEventListener('keydown', (event) => {
      const tag = event.target && event.target.tagName;
      if (tag === 'INPUT' || tag === 'TEXTAREA') {
        return;
      }
      const isUndoChord = (event.key === 'z' || event.key === 'Z') && (event.ctrlKey || event.metaKey);
      if (!isUndoChord && !BOUND_KEYS.includes(event.key)) {
        return;
      }
      event.preventDefault();
      sendKey(event).catch((err) => console.error(err));
    });

    let lastTouchEnd = 0;
    document.addEventListener('touchend', (event) => {
      const now = Date.now();
      if (now - lastTouchEnd <= 300) {
        event.preventDefault();
      }
      lastTouchEnd = now;
    }, false);

    if ('wakeLock' in navigator) {
      let wakeLock = null;
      const requestWakeLock = async () => {
        try {
          wakeLock = await navigator.wakeLock.request('screen');
        } catch (err) {
          console.log('Wake lock unavailable:', err);
        }
      };
      requestWakeLock();
      document.addEventListener('visibilitychange', () => {
        if (wakeLock !== null && document.visibilityState === 'visible') {
          requestWakeLock();
        }
      });
    }

    setInterval(() => {
      refresh().catch((err) => console.error(err));
    }, 15000);

    document.body.classList.add('app-ready');
  </script>
</body>
</html>
"#;
