use std::path::PathBuf;

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::page::{self, EditorView};
use super::{AppState, PageError};
use crate::export::waypoints_to_csv;
use crate::loaders::ros2::load_map_files;
use crate::loaders::waypoints::load_waypoints_lenient;
use crate::types::{EXPORT_FILE_NAME, EditorError, Waypoint};
use crate::visualization::{RenderStyle, encode_png_base64, render_waypoints};

const EDITOR_SCRIPT: &str = include_str!("../../assets/interactive_map.js");
const STYLESHEET: &str = include_str!("../../assets/style.css");

pub async fn index() -> Html<String> {
    Html(page::render(None, None))
}

pub async fn editor_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        EDITOR_SCRIPT,
    )
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

struct UploadedFile {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    pgm: Option<UploadedFile>,
    yaml: Option<UploadedFile>,
    csv: Option<UploadedFile>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, EditorError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| EditorError::Upload(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            // A file input left empty still sends a part, with an empty file name.
            let file_name = match field.file_name() {
                Some(file_name) if !file_name.is_empty() => file_name.to_string(),
                _ => continue,
            };
            let bytes = field
                .bytes()
                .await
                .map_err(|e| EditorError::Upload(e.body_text()))?;
            let file = UploadedFile { file_name, bytes };

            match name.as_str() {
                "pgm_file" => form.pgm = Some(file),
                "yaml_file" => form.yaml = Some(file),
                "csv_file" => form.csv = Some(file),
                other => debug!("ignoring form field {other:?}"),
            }
        }
        Ok(form)
    }
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, PageError> {
    let multipart = multipart.map_err(|rejection| {
        warn!("Upload rejected: {}", rejection.body_text());
        EditorError::MissingUpload("expected a multipart/form-data body")
    })?;
    let form = UploadForm::read(multipart).await?;
    let (Some(pgm), Some(yaml), Some(csv)) = (form.pgm, form.yaml, form.csv) else {
        warn!("Upload rejected: not all three files were provided");
        return Err(EditorError::MissingUpload("pgm_file, yaml_file and csv_file are required").into());
    };

    let pgm_path = state.uploads.save(&pgm.file_name, &pgm.bytes).await?;
    let yaml_path = state.uploads.save(&yaml.file_name, &yaml.bytes).await?;
    let csv_path = state.uploads.save(&csv.file_name, &csv.bytes).await?;
    info!(
        "Received map {} / {} with waypoints {}",
        pgm.file_name, yaml.file_name, csv.file_name
    );

    let style = state.style.clone();
    let view = tokio::task::spawn_blocking(move || {
        build_editor_view(pgm_path, yaml_path, csv_path, &style)
    })
    .await
    .map_err(|e| EditorError::Io(std::io::Error::other(e)))??;

    Ok(Html(page::render(None, Some(&view))))
}

fn build_editor_view(
    pgm_path: PathBuf,
    yaml_path: PathBuf,
    csv_path: PathBuf,
    style: &RenderStyle,
) -> Result<EditorView, EditorError> {
    let map = load_map_files(&pgm_path, &yaml_path).inspect_err(|e| {
        warn!("Error loading map data: {}", e);
    })?;
    let waypoints = load_waypoints_lenient(&csv_path);
    info!(
        "Rendering {} waypoints on {}x{} map",
        waypoints.len(),
        map.width(),
        map.height()
    );

    let off_map = waypoints
        .iter()
        .filter(|wp| !map.info().contains_world(wp.position()))
        .count();
    if off_map > 0 {
        warn!("{off_map} waypoints fall outside the map");
    }

    let image = render_waypoints(&map, &waypoints, style);
    let image_base64 = encode_png_base64(&image)?;

    let metadata_json = serde_json::to_string(&map.info().client_metadata())
        .map_err(|e| EditorError::Io(e.into()))?;
    let waypoints_json =
        serde_json::to_string(&waypoints).map_err(|e| EditorError::Io(e.into()))?;

    Ok(EditorView {
        image_base64,
        metadata_json,
        waypoints_json,
    })
}

/// A missing or `null` waypoint list counts as empty.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub waypoints: Option<Vec<Waypoint>>,
}

pub async fn export_csv(Json(request): Json<ExportRequest>) -> Result<Response, EditorError> {
    let waypoints = request.waypoints.unwrap_or_default();
    let csv = waypoints_to_csv(&waypoints)?;
    info!("Exporting {} waypoints", waypoints.len());

    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
