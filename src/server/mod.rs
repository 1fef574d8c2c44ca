//! Web front end for the inference engine.
//!
//! A single-page form: text area, Analyze, Reset, a result panel, and a
//! technical-analysis section embedding the training report images. The
//! engine is loaded once at startup; when loading fails the service stays
//! up in a diagnostic state that blocks inference and tells the operator
//! what to run, instead of crashing on the first request.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::infer::InferenceEngine;
use crate::label::Label;
use crate::report::{CONFUSION_MATRIX_FILE, METRICS_CHART_FILE};

/// Engine availability for the process lifetime.
#[derive(Debug)]
pub enum EngineState {
    /// Artifacts loaded; inference is available.
    Ready(Arc<InferenceEngine>),
    /// Artifacts missing or invalid; inference is blocked.
    Unavailable(String),
}

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Loaded engine or the reason it could not be loaded.
    pub engine: EngineState,
    /// Directory holding artifacts and report images.
    pub model_dir: PathBuf,
}

/// Load the engine once and build the shared state.
///
/// A load failure is recorded, not propagated: the server starts anyway and
/// serves a setup diagnostic.
pub fn build_state(model_dir: PathBuf) -> Arc<AppState> {
    let engine = match InferenceEngine::load(&model_dir) {
        Ok(engine) => EngineState::Ready(Arc::new(engine)),
        Err(e) => {
            warn!(error = %e, "inference engine unavailable");
            EngineState::Unavailable(e.to_string())
        }
    };
    Arc::new(AppState { engine, model_dir })
}

/// Build the axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/reports/{name}", get(report_handler))
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(addr: &str, model_dir: PathBuf) -> Result<()> {
    let state = build_state(model_dir);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "veritas web server listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::VeritasError::other(format!("server error: {e}")))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    text: String,
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state, "", None))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    let engine = match &state.engine {
        EngineState::Ready(engine) => engine,
        EngineState::Unavailable(_) => {
            return Html(render_page(&state, &form.text, None));
        }
    };

    if form.text.trim().is_empty() {
        let warning = PanelKind::Warning("Please enter some text to analyze.".to_string());
        return Html(render_page(&state, &form.text, Some(warning)));
    }

    let panel = match engine.analyze(&form.text) {
        Ok(verdict) => PanelKind::Verdict {
            label: verdict.label,
            explanation: verdict.explanation,
        },
        Err(e) => PanelKind::Warning(e.to_string()),
    };
    Html(render_page(&state, &form.text, Some(panel)))
}

async fn report_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    // Only the two report images are served; anything else is unknown.
    if name != CONFUSION_MATRIX_FILE && name != METRICS_CHART_FILE {
        return (StatusCode::NOT_FOUND, "unknown report").into_response();
    }

    match std::fs::read(state.model_dir.join(&name)) {
        Ok(bytes) => ([("content-type", "image/svg+xml")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "graph unavailable").into_response(),
    }
}

enum PanelKind {
    Verdict { label: Label, explanation: String },
    Warning(String),
}

fn render_page(state: &AppState, input: &str, panel: Option<PanelKind>) -> String {
    let diagnostic = match &state.engine {
        EngineState::Ready(_) => String::new(),
        EngineState::Unavailable(reason) => format!(
            r#"<div class="panel warning"><strong>Setup required:</strong> {}. Run <code>veritas train</code> and restart.</div>"#,
            escape_html(reason)
        ),
    };

    let result = match panel {
        Some(PanelKind::Verdict { label, explanation }) => {
            let class = match label {
                Label::Real => "real",
                Label::Fake => "fake",
            };
            let headline = match label {
                Label::Real => "LIKELY REAL",
                Label::Fake => "LIKELY FAKE",
            };
            format!(
                r#"<div class="panel {class}">{headline}</div><p class="analysis">Analysis: <strong>{}</strong></p>"#,
                escape_html(&explanation)
            )
        }
        Some(PanelKind::Warning(message)) => format!(
            r#"<div class="panel warning">{}</div>"#,
            escape_html(&message)
        ),
        None => String::new(),
    };

    let graph = |file: &str, caption: &str| {
        if state.model_dir.join(file).exists() {
            format!(r#"<figure><img src="/reports/{file}" alt="{caption}"/><figcaption>{caption}</figcaption></figure>"#)
        } else {
            format!(r#"<p class="unavailable">{caption}: graph unavailable</p>"#)
        }
    };
    let graphs = format!(
        "{}{}",
        graph(CONFUSION_MATRIX_FILE, "Confusion Matrix"),
        graph(METRICS_CHART_FILE, "Performance Metrics")
    );

    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8"/>
<title>News Veracity Detector</title>
<style>
body {{ font-family: sans-serif; max-width: 720px; margin: 2em auto; color: #333; }}
textarea {{ width: 100%; height: 10em; border: 1px solid #e0e0e0; border-radius: 8px; }}
button {{ height: 3em; border: none; border-radius: 5px; padding: 0 2em; }}
button[type=submit] {{ background: #007bff; color: white; }}
.panel {{ padding: 20px; border-radius: 10px; margin-top: 20px; text-align: center; font-size: 24px; font-weight: bold; }}
.panel.real {{ background: #d4edda; color: #155724; }}
.panel.fake {{ background: #f8d7da; color: #721c24; }}
.panel.warning {{ background: #fff3cd; color: #856404; font-size: 16px; font-weight: normal; }}
.analysis {{ text-align: center; color: #666; }}
.unavailable {{ color: #999; }}
</style>
</head>
<body>
<h1>News Veracity Detector</h1>
<p>Enter a news headline or article below to analyze its authenticity.</p>
{diagnostic}
<form method="post" action="/analyze">
<textarea name="text" placeholder="Paste the news text here...">{input}</textarea>
<p>
<button type="submit">Analyze News</button>
<button type="reset">Reset</button>
</p>
</form>
{result}
<hr/>
<details>
<summary>View Technical Analysis</summary>
{graphs}
</details>
</body>
</html>
"#,
        input = escape_html(input),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
