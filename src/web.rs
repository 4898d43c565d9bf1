use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::availability::{parse_all_respondents, TutorAvailability, Weekday};
use crate::grid::{GridLayout, ShiftRegion};
use crate::parser::parse_survey_csv;

pub struct UploadedSurvey {
    pub tutors: Vec<TutorAvailability>,
    pub uploaded_at: DateTime<Utc>,
}

pub struct AppState {
    pub layout: GridLayout,
    pub survey: Mutex<Option<UploadedSurvey>>,
    pub admin_password: String,
}

impl AppState {
    pub fn new(layout: GridLayout, admin_password: String) -> Self {
        Self {
            layout,
            survey: Mutex::new(None),
            admin_password,
        }
    }
}

#[derive(Serialize)]
pub struct GridResponse {
    days: Vec<String>,
    shifts: Vec<String>,
    regions: Vec<RegionEntry>,
}

#[derive(Serialize)]
pub struct RegionEntry {
    day: String,
    time: String,
    range: String,
    rows: u32,
}

impl From<ShiftRegion> for RegionEntry {
    fn from(region: ShiftRegion) -> Self {
        Self {
            range: region.cell_range.to_string(),
            rows: region.cell_range.row_count(),
            day: region.day,
            time: region.time,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    tutor_count: usize,
    uploaded_at: String,
    /// day -> shift label -> number of tutors available
    shift_availability: BTreeMap<Weekday, BTreeMap<String, u32>>,
}

fn internal_error<E: std::fmt::Display>(e: E) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError(e.to_string())
}

/// Counts available tutors per day and shift label
pub fn shift_availability(tutors: &[TutorAvailability]) -> BTreeMap<Weekday, BTreeMap<String, u32>> {
    let mut counts: BTreeMap<Weekday, BTreeMap<String, u32>> = BTreeMap::new();
    for day in Weekday::ALL {
        counts.entry(day).or_default();
    }
    for tutor in tutors {
        for (day, shifts) in tutor.shifts.iter() {
            let day_counts = counts.entry(day).or_default();
            for shift in shifts {
                *day_counts.entry(shift.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}

// Admin survey upload endpoint
async fn upload_survey(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        warn!("Rejected survey upload with wrong password");
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    match parse_survey_csv(body.as_ref()) {
        Ok(rows) => {
            let tutors = parse_all_respondents(&rows);
            let uploaded_at = Utc::now();
            let count = tutors.len();

            *state.survey.lock().map_err(internal_error)? = Some(UploadedSurvey { tutors, uploaded_at });
            info!(count, "Survey uploaded");

            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "tutors": count,
                "uploaded_at": uploaded_at.to_rfc3339(),
            })))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        }))),
    }
}

async fn get_grid(state: web::Data<AppState>) -> Result<HttpResponse> {
    let config = state.layout.config();
    Ok(HttpResponse::Ok().json(GridResponse {
        days: config.days.clone(),
        shifts: config.shifts.clone(),
        regions: state
            .layout
            .generate_all_shift_regions()
            .into_iter()
            .map(RegionEntry::from)
            .collect(),
    }))
}

async fn get_tutors(state: web::Data<AppState>) -> Result<HttpResponse> {
    let survey = state.survey.lock().map_err(internal_error)?;
    match *survey {
        Some(ref survey) => Ok(HttpResponse::Ok().json(&survey.tutors)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No survey uploaded"}))),
    }
}

async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let survey = state.survey.lock().map_err(internal_error)?;
    match *survey {
        Some(ref survey) => Ok(HttpResponse::Ok().json(StatsResponse {
            tutor_count: survey.tutors.len(),
            uploaded_at: survey.uploaded_at.to_rfc3339(),
            shift_availability: shift_availability(&survey.tutors),
        })),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"}))),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/upload", web::post().to(upload_survey))
        .route("/api/grid", web::get().to(get_grid))
        .route("/api/tutors", web::get().to(get_tutors))
        .route("/api/stats", web::get().to(get_stats));
}

pub async fn start_server(port: u16, layout: GridLayout, admin_password: String) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(layout, admin_password));

    info!(port, "Starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
