//! HTTP route handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::{ConversionId, ConversionOutput, CsvSource, Dataset};
use crate::http::error::AppError;
use crate::http::page::INDEX_HTML;
use crate::http::state::SharedState;

const UPLOAD_FIELD: &str = "file";
const DOWNLOAD_FILE_NAME: &str = "converted.json";

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ---------------------------------------------------------------------------
// POST /upload-preview
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Number of rows to return (default: configured preview size).
    rows: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    preview: Dataset,
    columns: Vec<String>,
    total_rows: usize,
}

pub async fn preview_handler(
    State(state): State<SharedState>,
    query: Result<Query<PreviewParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreviewResponse>, AppError> {
    let Query(params) = query?;
    let upload = read_upload(multipart?).await?;
    let preview = state.service.preview_upload(upload, params.rows).await?;

    Ok(Json(PreviewResponse {
        columns: preview.dataset.columns().to_vec(),
        total_rows: preview.total_rows,
        preview: preview.dataset,
    }))
}

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    message: &'static str,
    conversion_id: ConversionId,
    download_url: String,
    row_count: usize,
    rows: Dataset,
}

pub async fn upload_handler(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_upload(multipart?).await?;
    let output = state.service.convert_upload(upload).await?;

    Ok(Json(UploadResponse {
        message: "CSV converted to JSON!",
        download_url: download_url(&output),
        conversion_id: output.id,
        row_count: output.dataset.len(),
        rows: output.dataset,
    }))
}

// ---------------------------------------------------------------------------
// GET /convert
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    message: &'static str,
    conversion_id: ConversionId,
    download_url: String,
    converted_data: Dataset,
}

pub async fn convert_default_handler(
    State(state): State<SharedState>,
) -> Result<Json<ConvertResponse>, AppError> {
    let output = state.service.convert_default().await?;

    Ok(Json(ConvertResponse {
        message: "Converted",
        download_url: download_url(&output),
        conversion_id: output.id,
        converted_data: output.dataset,
    }))
}

// ---------------------------------------------------------------------------
// GET /download, GET /download/{id}
// ---------------------------------------------------------------------------

pub async fn download_latest_handler(
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    let bytes = state.service.download(None).await?;
    Ok(json_attachment(bytes))
}

pub async fn download_handler(
    State(state): State<SharedState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(raw_id) = path?;
    let id = ConversionId::parse(&raw_id)
        .ok_or_else(|| AppError::bad_request(format!("Invalid conversion id: {}", raw_id)))?;
    let bytes = state.service.download(Some(&id)).await?;
    Ok(json_attachment(bytes))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_s: f64,
    last_conversion: Option<ConversionId>,
}

pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_s: state.started_at.elapsed().as_secs_f64(),
        last_conversion: state.service.last_conversion().await,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn read_upload(mut multipart: Multipart) -> Result<CsvSource, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        tracing::debug!("Received upload '{}' ({} bytes)", file_name, bytes.len());
        return Ok(CsvSource::new(file_name, bytes.to_vec()));
    }

    Err(AppError::bad_request(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}

fn download_url(output: &ConversionOutput) -> String {
    format!("/download/{}", output.id)
}

fn json_attachment(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        bytes,
    )
        .into_response()
}
