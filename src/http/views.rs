//! View-models and the page renderer.
//!
//! Pages are minijinja templates compiled into the binary. Template names end
//! in `.html`, so every interpolated value is HTML-escaped; the record table
//! is already markup and is marked `safe` in its template.

use std::sync::OnceLock;

use minijinja::Environment;
use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::domain::Record;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("add.html", include_str!("../../templates/add.html")),
    ("added.html", include_str!("../../templates/added.html")),
    ("retrieve.html", include_str!("../../templates/retrieve.html")),
    ("entries.html", include_str!("../../templates/entries.html")),
    ("lookup.html", include_str!("../../templates/lookup.html")),
    ("lookup_result.html", include_str!("../../templates/lookup_result.html")),
    ("lookup_error.html", include_str!("../../templates/lookup_error.html")),
];

/// Data payload for one rendered page; serialized as the template context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View {
    Index {
        base_url: String,
    },
    AddForm {
        action_url: String,
        base_url: String,
    },
    AddConfirmation {
        record: Record,
        base_url: String,
    },
    RetrieveForm {
        action_url: String,
        base_url: String,
    },
    RetrieveResult {
        table: String,
        base_url: String,
    },
    LookupForm {
        action_url: String,
        base_url: String,
    },
    LookupResult {
        entry: CatalogEntry,
        base_url: String,
    },
    LookupError {
        message: String,
        base_url: String,
    },
}

impl View {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::Index { .. } => "index.html",
            View::AddForm { .. } => "add.html",
            View::AddConfirmation { .. } => "added.html",
            View::RetrieveForm { .. } => "retrieve.html",
            View::RetrieveResult { .. } => "entries.html",
            View::LookupForm { .. } => "lookup.html",
            View::LookupResult { .. } => "lookup_result.html",
            View::LookupError { .. } => "lookup_error.html",
        }
    }
}

fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            // A template that fails to compile surfaces as a render error.
            if let Err(e) = env.add_template(name, source) {
                tracing::error!(template = %name, error = %e, "Template failed to compile");
            }
        }
        env
    })
}

/// Render a view to a complete HTML document.
pub fn render(view: &View) -> Result<String, minijinja::Error> {
    environment().get_template(view.template_name())?.render(view)
}
