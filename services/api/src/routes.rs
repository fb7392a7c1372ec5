use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use funding_diagnosis::balance_import::{BalanceSheetImporter, ImportedBalances};
use funding_diagnosis::diagnosis::{
    max_financing_for_code, BalanceField, CompanyProfile, Diagnosis, DiagnosisReport, FormData,
    Rating,
};
use funding_diagnosis::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::debug;

/// Caller-chosen financing inputs; omitted fields use the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FinancingOverrides {
    #[serde(default)]
    pub(crate) rating: Option<Rating>,
    #[serde(default)]
    pub(crate) profile: Option<CompanyProfile>,
    #[serde(default)]
    pub(crate) capital: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiagnosisRequest {
    pub(crate) form: FormData,
    #[serde(default)]
    pub(crate) financing: Option<FinancingOverrides>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) balance_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DiagnosisResponse {
    #[serde(flatten)]
    pub(crate) report: DiagnosisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) imported_fields: Option<Vec<BalanceField>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FinancingQuery {
    pub(crate) capital: f64,
    pub(crate) rating: String,
    #[serde(default)]
    pub(crate) profile: Option<CompanyProfile>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct FinancingAnswer {
    pub(crate) rating: String,
    pub(crate) profile: CompanyProfile,
    pub(crate) capital: f64,
    pub(crate) amount: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceImportRequest {
    pub(crate) csv: String,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/diagnosis", post(diagnosis_endpoint))
        .route("/api/v1/financing", post(financing_endpoint))
        .route("/api/v1/balance/import", post(balance_import_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn diagnosis_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DiagnosisRequest>,
) -> Result<Json<DiagnosisResponse>, AppError> {
    let DiagnosisRequest {
        form,
        financing,
        today,
        balance_csv,
    } = payload;

    let (form, imported_fields) = match balance_csv {
        Some(csv) => {
            let imported = import_csv(csv)?;
            let fields = imported.fields.clone();
            (
                form.with_balances(imported.year_minus_1, imported.year_minus_2),
                Some(fields),
            )
        }
        None => (form, None),
    };

    let overrides = financing.unwrap_or_default();
    let request =
        state
            .diagnosis
            .financing_request(overrides.rating, overrides.profile, overrides.capital);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let report = Diagnosis::run(&form, &request, today);

    Ok(Json(DiagnosisResponse {
        report,
        imported_fields,
    }))
}

pub(crate) async fn financing_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<FinancingQuery>,
) -> Json<FinancingAnswer> {
    let profile = payload.profile.unwrap_or(state.diagnosis.default_profile);
    let amount = max_financing_for_code(payload.capital, &payload.rating, profile);
    debug!(rating = payload.rating.as_str(), amount, "financing computed");

    Json(FinancingAnswer {
        rating: payload.rating,
        profile,
        capital: payload.capital,
        amount,
    })
}

pub(crate) async fn balance_import_endpoint(
    Json(payload): Json<BalanceImportRequest>,
) -> Result<Json<ImportedBalances>, AppError> {
    Ok(Json(import_csv(payload.csv)?))
}

fn import_csv(csv: String) -> Result<ImportedBalances, AppError> {
    let reader = Cursor::new(csv.into_bytes());
    Ok(BalanceSheetImporter::from_reader(reader)?)
}
