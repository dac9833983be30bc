use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::BatchUploadError;
use crate::domain::{BatchJob, BatchJobId};
use crate::presentation::handlers::error::error_response;
use crate::presentation::state::AppState;

const ACCEPTED_MIME_TYPES: [&str; 3] = ["text/csv", "text/plain", "application/vnd.ms-excel"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResponse {
    pub job_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchJobResponse {
    pub id: String,
    pub file_name: String,
    pub status: String,
    pub total_records: u32,
    pub processed_records: u32,
    pub failed_records: u32,
    pub error_message: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<BatchJob> for BatchJobResponse {
    fn from(job: BatchJob) -> Self {
        Self {
            id: job.id.as_uuid().to_string(),
            file_name: job.file_name,
            status: job.status.as_str().to_string(),
            total_records: job.total_records,
            processed_records: job.processed_records,
            failed_records: job.failed_records,
            error_message: job.error_message,
            created_at: job.created_at.to_rfc3339(),
            completed_at: job.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Accepts a delimited-text upload as the first file field and queues it.
#[tracing::instrument(skip(state, multipart))]
pub async fn batch_upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.file_name().is_some() => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Batch request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!(error = %e, limit = state.max_upload_bytes, "Upload exceeded size limit");
                return upload_too_large(state.max_upload_bytes);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        }
    };

    let file_name = field.file_name().unwrap_or("upload.csv").to_string();
    let content_type = field.content_type().map(str::to_string);

    tracing::debug!(file_name = %file_name, content_type = ?content_type, "Processing batch upload");

    if !is_delimited_text(content_type.as_deref(), &file_name) {
        tracing::warn!(content_type = ?content_type, file_name = %file_name, "Unsupported upload type");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Only CSV files are allowed",
        );
    }

    let too_large = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&too_large);
    let stream = field.map(move |chunk| {
        chunk.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                flag.store(true, Ordering::Relaxed);
            }
            io::Error::other(e.body_text())
        })
    });

    match state.batch_service.submit(&file_name, Box::pin(stream)).await {
        Ok(job) => (
            StatusCode::ACCEPTED,
            Json(BatchUploadResponse {
                job_id: job.id.as_uuid().to_string(),
                message: "Batch processing started".to_string(),
            }),
        )
            .into_response(),
        Err(BatchUploadError::Staging(e)) if too_large.load(Ordering::Relaxed) => {
            tracing::warn!(error = %e, limit = state.max_upload_bytes, "Upload exceeded size limit");
            upload_too_large(state.max_upload_bytes)
        }
        Err(BatchUploadError::QueueUnavailable) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Batch queue full or worker unavailable",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to accept batch upload");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to start batch job: {}", e),
            )
        }
    }
}

fn upload_too_large(limit: usize) -> Response {
    error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        format!("File exceeds the {} byte upload limit", limit),
    )
}

#[tracing::instrument(skip(state))]
pub async fn batch_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid job ID: {}", job_id));
        }
    };

    match state.batch_service.status(BatchJobId::from_uuid(uuid)).await {
        Ok(Some(job)) => (StatusCode::OK, Json(BatchJobResponse::from(job))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch batch job");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch job: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn batch_list_handler(State(state): State<AppState>) -> Response {
    match state.batch_service.list().await {
        Ok(jobs) => {
            let body: Vec<BatchJobResponse> =
                jobs.into_iter().map(BatchJobResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list batch jobs");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list jobs: {}", e),
            )
        }
    }
}

fn is_delimited_text(content_type: Option<&str>, file_name: &str) -> bool {
    let by_name = file_name.to_ascii_lowercase().ends_with(".csv");
    let by_mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            ACCEPTED_MIME_TYPES.contains(&mime.as_str())
        })
        .unwrap_or(false);

    by_name || by_mime
}
