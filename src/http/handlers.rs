//! Route handlers.
//!
//! Each handler is stateless: it normalizes its input, makes exactly one
//! downstream call (store or catalog) and maps the outcome to a view or an
//! [`AppError`].

use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::Html;
use chrono::Local;

use crate::domain::{normalize_name, normalize_record_input, LookupForm, RecordForm, ValidationError};
use crate::http::error::{AppError, StoreOp};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::http::table::render_table;
use crate::http::views::{render, View};
use crate::observability::metrics;

/// Render `view` or fail the request with a 500.
fn page(view: View) -> Result<Html<String>, AppError> {
    render(&view).map(Html).map_err(|source| {
        let err = AppError::Render {
            template: view.template_name(),
            source,
        };
        tracing::error!(error = %err, "Render error");
        err
    })
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(View::Index {
        base_url: state.base_url(),
    })
}

pub async fn add_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(View::AddForm {
        action_url: state.url_for("/processAdd"),
        base_url: state.base_url(),
    })
}

pub async fn retrieve_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(View::RetrieveForm {
        action_url: state.url_for("/processRetrieve"),
        base_url: state.base_url(),
    })
}

pub async fn lookup_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    page(View::LookupForm {
        action_url: state.url_for("/processApi"),
        base_url: state.base_url(),
    })
}

/// Normalize a submitted record and store it.
pub async fn process_add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RecordForm>,
) -> Result<Html<String>, AppError> {
    let request_id = request_id(&headers);

    let record = normalize_record_input(form, Local::now().date_naive()).map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Rejected record submission");
        AppError::from(e)
    })?;

    let result = state.store.insert_one(&record).await;
    metrics::record_store_op(StoreOp::Insert.as_str(), result.is_ok());
    if let Err(source) = result {
        let err = AppError::Storage {
            op: StoreOp::Insert,
            source,
        };
        tracing::error!(request_id = %request_id, error = %err, "Insert error");
        return Err(err);
    }

    tracing::info!(request_id = %request_id, name = %record.name, "Record stored");
    page(View::AddConfirmation {
        record,
        base_url: state.base_url(),
    })
}

/// List every stored record as a table.
pub async fn process_retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let request_id = request_id(&headers);

    let result = state.store.list_all().await;
    metrics::record_store_op(StoreOp::List.as_str(), result.is_ok());
    let records = result.map_err(|source| {
        let err = AppError::Storage {
            op: StoreOp::List,
            source,
        };
        tracing::error!(request_id = %request_id, error = %err, "Query error");
        err
    })?;

    tracing::debug!(request_id = %request_id, count = records.len(), "Records listed");
    page(View::RetrieveResult {
        table: render_table(&records),
        base_url: state.base_url(),
    })
}

/// Look up display data for a name in the remote catalog.
pub async fn process_lookup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LookupForm>,
) -> Result<Html<String>, AppError> {
    let request_id = request_id(&headers);

    let raw_name = form.name.ok_or(ValidationError::MissingField("name"))?;
    let name = normalize_name(&raw_name);

    match state.catalog.lookup(&name).await {
        Ok(entry) => page(View::LookupResult {
            entry,
            base_url: state.base_url(),
        }),
        Err(e) => {
            tracing::warn!(request_id = %request_id, name = %name, error = %e, "API error");
            Err(AppError::NotFound {
                message: e.to_string(),
                base_url: state.base_url(),
            })
        }
    }
}
