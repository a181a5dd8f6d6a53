use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use quake_api::{FIELDS, LookupOutcome, LookupQuery, QuakeRecord, lookup};

use super::AppState;
use crate::error::ApiError;

// ═══════════════════════════════════════════════════════════════
//  REST: GET /api/health, GET /api/fields
// ═══════════════════════════════════════════════════════════════

pub(crate) async fn handle_health() -> &'static str {
    "ok"
}

pub(crate) async fn handle_list_fields() -> impl IntoResponse {
    axum::Json(FIELDS)
}

// ═══════════════════════════════════════════════════════════════
//  REST: GET /api/quake?region=CA&year=2020&month=3
// ═══════════════════════════════════════════════════════════════

#[derive(Deserialize)]
pub(crate) struct LookupParams {
    #[serde(alias = "state")]
    region: Option<String>,
    year: Option<String>,
    month: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum LookupResponse {
    Found {
        record: QuakeRecord,
        quake_occurred: &'static str,
        pred_prob_percent: String,
    },
    NotFound {
        region: String,
        year: i32,
        month: u32,
        message: String,
    },
}

impl LookupResponse {
    fn new(query: &LookupQuery, outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found(record) => LookupResponse::Found {
                quake_occurred: if record.label_quake_ge4() == 1 { "Yes" } else { "No" },
                pred_prob_percent: format!("{:.2} %", record.pred_prob_ge4() * 100.0),
                record,
            },
            LookupOutcome::NotFound => LookupResponse::NotFound {
                region: query.region().to_owned(),
                year: query.year(),
                month: query.month(),
                message: format!(
                    "{} was not included in the historical dataset for {}-{:02}, so no predictions were generated",
                    query.region(),
                    query.year(),
                    query.month()
                ),
            },
        }
    }
}

fn required<'a>(name: &'static str, value: &'a Option<String>) -> Result<&'a str, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::MissingParam(name)),
    }
}

fn parse_query(params: &LookupParams) -> Result<LookupQuery, ApiError> {
    let region = required("region", &params.region)?;
    let year = required("year", &params.year)?;
    let month = required("month", &params.month)?;

    let year: i32 = year
        .parse()
        .map_err(|_| ApiError::InvalidParam { name: "year", value: year.to_owned() })?;
    let month: u32 = month
        .parse()
        .map_err(|_| ApiError::InvalidParam { name: "month", value: month.to_owned() })?;
    if !(1..=12).contains(&month) {
        return Err(ApiError::MonthOutOfRange(month));
    }
    Ok(LookupQuery::new(region, year, month))
}

pub(crate) async fn handle_lookup(
    State(state): State<AppState>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let query = parse_query(&params)?;
    if !state.regions.allows(query.region()) {
        return Err(ApiError::UnsupportedRegion(query.region().to_owned()));
    }

    let outcome = lookup(state.store.as_ref(), &query).await?;
    tracing::info!(row_key = %query.row_key(), found = outcome.is_found(), "lookup");
    Ok(axum::Json(LookupResponse::new(&query, outcome)))
}
