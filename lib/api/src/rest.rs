use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use reception_core::equalization::{self, CourseCatalog, EqualizationRequest};
use reception_core::{Error, RecordStore, Resolver, Utterance};
use serde::{Deserialize, Serialize};
use std::io;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Largest `/ask` body read; anything bigger is answered as a blank question
pub const ASK_BODY_LIMIT: usize = 1024 * 1024;

/// Canned replies used when no stored answer applies
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyConfig {
    /// Sent when nothing matched
    pub fallback: String,
    /// Sent for blank questions; the fallback is used when unset
    pub empty_input: Option<String>,
    /// Sent when resolution itself failed
    pub server_error: String,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            fallback: "Sorry, I don't know the answer to that.".to_string(),
            empty_input: None,
            server_error: "Server error. Try again later.".to_string(),
        }
    }
}

impl ReplyConfig {
    pub fn empty_input(&self) -> &str {
        self.empty_input.as_deref().unwrap_or(&self.fallback)
    }
}

/// Everything a request handler needs, shared across workers
pub struct AppState {
    resolver: Resolver,
    store: Arc<dyn RecordStore>,
    replies: ReplyConfig,
    catalog: CourseCatalog,
}

impl AppState {
    pub fn new(resolver: Resolver, store: Arc<dyn RecordStore>, replies: ReplyConfig) -> Self {
        Self {
            resolver,
            store,
            replies,
            catalog: CourseCatalog::default(),
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CourseCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

#[derive(Deserialize, Default)]
struct AskRequest {
    #[serde(default)]
    question: Option<serde_json::Value>,
}

impl AskRequest {
    /// Strings pass through, other scalars are stringified, null is empty
    fn question_text(&self) -> String {
        match &self.question {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Serialize)]
struct TablesResponse {
    tables: Vec<String>,
}

pub struct RestApi;

impl RestApi {
    /// Register the JSON routes. Static files are mounted by [`RestApi::start`].
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::resource("/ask")
                .app_data(web::PayloadConfig::new(ASK_BODY_LIMIT))
                .route(web::post().to(ask)),
        )
        .route("/_tables", web::get().to(list_tables))
            .route("/health", web::get().to(health))
            .route("/equalization/courses", web::get().to(list_courses))
            .route("/equalization/evaluate", web::post().to(evaluate_equalization));
    }

    pub async fn start(
        state: Arc<AppState>,
        public_dir: Option<PathBuf>,
        listener: TcpListener,
    ) -> io::Result<()> {
        let state = web::Data::from(state);
        let public_dir = public_dir.filter(|dir| dir.is_dir());
        if let Some(dir) = &public_dir {
            info!("Serving static files from {:?}", dir);
        }

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            let app = App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(RestApi::configure);

            match &public_dir {
                Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
                None => app,
            }
        })
        .listen(listener)?
        .run()
        .await
    }

    /// Bind `host:port`, moving to the next port while the current one is
    /// taken, for at most `attempts` ports. Other bind errors are returned
    /// immediately.
    pub fn bind_with_retry(host: &str, port: u16, attempts: u16) -> io::Result<TcpListener> {
        let mut last_err = None;
        let mut candidate = Some(port);

        for _ in 0..attempts.max(1) {
            let Some(current) = candidate else { break };
            match TcpListener::bind((host, current)) {
                Ok(listener) => return Ok(listener),
                Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                    candidate = current.checked_add(1);
                    warn!("Port {} busy, trying next", current);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::AddrInUse, "no free port in range")
        }))
    }
}

async fn ask(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> ActixResult<HttpResponse> {
    // Unreadable or malformed bodies are treated like a missing question
    let req: AskRequest = match body {
        Ok(body) => serde_json::from_slice(&body).unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "unreadable /ask body");
            AskRequest::default()
        }
    };
    let utterance = Utterance::new(&req.question_text());

    if utterance.is_empty() {
        return Ok(HttpResponse::Ok().json(AskResponse {
            answer: state.replies.empty_input().to_string(),
        }));
    }

    let worker = state.clone();
    let outcome = web::block(move || worker.resolver.resolve_detailed(&utterance, worker.store.as_ref())).await;

    let answer = match outcome {
        Ok(Some(hit)) => {
            debug!(category = %hit.category, score = hit.score, "answered");
            hit.answer
        }
        Ok(None) => state.replies.fallback.clone(),
        Err(e) => {
            error!(error = %e, "resolution failed");
            state.replies.server_error.clone()
        }
    };

    Ok(HttpResponse::Ok().json(AskResponse { answer }))
}

async fn list_tables(
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(TablesResponse {
        tables: state.resolver.order().names(),
    }))
}

async fn health(
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "categories": state.resolver.order().len(),
    })))
}

async fn list_courses(
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.catalog.courses()
    })))
}

async fn evaluate_equalization(
    state: web::Data<AppState>,
    req: web::Json<EqualizationRequest>,
) -> ActixResult<HttpResponse> {
    match equalization::evaluate(&req, &state.catalog) {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": evaluation
        }))),
        Err(e @ Error::MissingField(_)) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
        Err(e) => {
            error!(error = %e, "equalization failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Server error. Try again later."
            })))
        }
    }
}
