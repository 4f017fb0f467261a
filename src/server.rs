use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Employee, EmployeeUpdate, NewEmployee};

/// Shared server state. SQLite connections are not Sync, so the
/// handle lives behind a mutex; every statement is short-lived.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    fn db(&self) -> Result<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| Error::Database("database lock poisoned".to_string()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/employees", get(list).post(create))
        .route(
            "/api/employees/{id}",
            get(get_by_id).put(update).delete(delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(bind: &str, db: Database) -> anyhow::Result<()> {
    let app = router(AppState::new(db));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("roster API listening on {bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// List all employees. First call bootstraps the table if the
/// database is fresh.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    let employees = state.db()?.list()?;
    Ok(Json(employees))
}

async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Employee>> {
    let employee = state.db()?.get(id)?;
    Ok(Json(employee))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> Result<Json<Employee>> {
    let employee = state.db()?.create(&payload)?;
    info!(id = employee.id, "employee created");
    Ok(Json(employee))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> Result<Json<Employee>> {
    let employee = state.db()?.update(id, &payload)?;
    info!(id, "employee updated");
    Ok(Json(employee))
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    message: &'static str,
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.db()?.delete(id)?;
    info!(id, "employee deleted");
    Ok(Json(DeleteResponse {
        message: "Delete Successfully",
    }))
}
