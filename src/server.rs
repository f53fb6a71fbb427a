//! HTTP export endpoint.
//!
//! `POST /export` accepts either a content brief (`{ deckRequest: ... }` or
//! bare brief fields) routed through the content generator, or a direct
//! `{ layout | layouts | slides, theme, ... }` payload routed straight to the
//! assembler. The response is the binary artifact with an attachment header,
//! or a JSON `{error}` body: 400 for validation problems, 500 for generation
//! failures. `GET /preview` serves the interactive screen rendering of the
//! same request shape.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::assemble::{DeckAssembler, DeckOptions};
use crate::compose::format_layout_name;
use crate::content::{extract_deck_request_from_payload, generate_deck_from_request};
use crate::errors::DeckError;
use crate::models::{SlideConfig, TitleSlideInfo};
use crate::registry::registry;

const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Runs the export server until shutdown.
pub async fn run(port: u16) -> std::io::Result<()> {
    info!("Starting export server at http://127.0.0.1:{port}");
    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .route("/export", web::post().to(export))
            .route("/preview", web::get().to(preview))
            .route("/layouts", web::get().to(list_layouts))
            .route("/themes", web::get().to(list_themes))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message.into() }))
}

fn internal_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": message.into() }))
}

/// Builds assembler options from an export payload.
/// Returns a ready error response for payloads that fail validation.
fn build_options(payload: &Value) -> Result<(DeckOptions, String), HttpResponse> {
    let filename = payload
        .get("filename")
        .and_then(Value::as_str)
        .unwrap_or("deck.pptx")
        .to_string();
    let mut theme = payload
        .get("theme")
        .and_then(Value::as_str)
        .map(str::to_string);
    let mut title_slide: Option<TitleSlideInfo> = payload
        .get("titleSlide")
        .and_then(|value| serde_json::from_value(value.clone()).ok());
    let mut assets_base_path = payload
        .get("assetsBasePath")
        .and_then(Value::as_str)
        .map(PathBuf::from);

    let mut slides: Option<Vec<SlideConfig>> = None;

    if let Some(request) = extract_deck_request_from_payload(payload) {
        let deck = match generate_deck_from_request(request) {
            Ok(deck) => deck,
            Err(DeckError::Validation { errors, .. }) => {
                return Err(bad_request(errors.join("\n")));
            }
            Err(other) => return Err(internal_error(other.to_string())),
        };
        for warning in &deck.warnings {
            warn!("{warning}");
        }
        if theme.is_none() {
            theme = deck.theme.clone();
        }
        if title_slide.is_none() {
            title_slide = deck.title_slide.clone();
        }
        if assets_base_path.is_none() {
            assets_base_path = deck.assets_base_path.as_deref().map(PathBuf::from);
        }
        slides = Some(deck.slides);
    }

    let slides = match slides {
        Some(slides) => slides,
        None => {
            if let Some(explicit) = payload.get("slides").and_then(Value::as_array) {
                match serde_json::from_value::<Vec<SlideConfig>>(Value::Array(explicit.clone())) {
                    Ok(parsed) if !parsed.is_empty() => parsed,
                    Ok(_) => {
                        return Err(bad_request(
                            "Either layout/layouts or deckRequest data is required",
                        ))
                    }
                    Err(e) => return Err(bad_request(format!("Invalid slides payload: {e}"))),
                }
            } else if let Some(layouts) = payload.get("layouts").and_then(Value::as_array) {
                layouts
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|layout| {
                        SlideConfig::new(layout).with_title(format_layout_name(layout))
                    })
                    .collect()
            } else if let Some(layout) = payload.get("layout").and_then(Value::as_str) {
                vec![SlideConfig::new(layout).with_title(format_layout_name(layout))]
            } else {
                return Err(bad_request(
                    "Either layout/layouts or deckRequest data is required",
                ));
            }
        }
    };

    let Some(theme) = theme else {
        return Err(bad_request(
            "Theme is required (provide via request.theme or deckRequest.theme)",
        ));
    };

    Ok((
        DeckOptions {
            theme,
            layout: None,
            slides,
            title_slide,
            assets_base_path,
        },
        filename,
    ))
}

/// Per-request-unique path under the OS temp directory, so concurrent
/// exports never collide.
fn unique_temp_path() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("deck-{stamp}-{count}.pptx"))
}

async fn export(body: web::Json<Value>) -> HttpResponse {
    let payload = body.into_inner();
    let (options, filename) = match build_options(&payload) {
        Ok(built) => built,
        Err(response) => return response,
    };

    let assembler = match DeckAssembler::new(options) {
        Ok(assembler) => assembler,
        Err(e @ DeckError::InvalidRequest(_)) => return bad_request(e.to_string()),
        Err(e) => {
            error!("Export error: {e}");
            return internal_error(e.to_string());
        }
    };

    let temp_path = unique_temp_path();
    let result = assembler
        .write_pptx(&temp_path)
        .and_then(|()| Ok(std::fs::read(&temp_path)?));
    // The temp file is gone before the response leaves, error path included.
    std::fs::remove_file(&temp_path).ok();

    match result {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(PPTX_MIME)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ))
            .body(bytes),
        Err(e) => {
            error!("Export error: {e}");
            internal_error(e.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreviewQuery {
    layout: Option<String>,
    layouts: Option<String>,
    theme: Option<String>,
}

async fn preview(query: web::Query<PreviewQuery>) -> HttpResponse {
    let query = query.into_inner();
    let slides: Vec<SlideConfig> = match &query.layouts {
        Some(layouts) => layouts
            .split(',')
            .map(str::trim)
            .filter(|layout| !layout.is_empty())
            .map(|layout| SlideConfig::new(layout).with_title(format_layout_name(layout)))
            .collect(),
        None => Vec::new(),
    };

    let options = DeckOptions {
        theme: query
            .theme
            .unwrap_or_else(|| "metallic-earth".to_string()),
        layout: query.layout,
        slides,
        title_slide: None,
        assets_base_path: None,
    };

    let assembler = match DeckAssembler::new(options) {
        Ok(assembler) => assembler,
        Err(e @ DeckError::InvalidRequest(_)) => return bad_request(e.to_string()),
        Err(e) => return internal_error(e.to_string()),
    };

    match assembler.render_html() {
        Ok(html) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html),
        Err(e) => internal_error(e.to_string()),
    }
}

async fn list_layouts() -> HttpResponse {
    let layouts: Vec<Value> = registry()
        .layout_names()
        .map(|(key, description)| json!({ "key": key, "description": description }))
        .collect();
    HttpResponse::Ok().json(json!({ "layouts": layouts }))
}

async fn list_themes() -> HttpResponse {
    let themes: Vec<Value> = registry()
        .theme_names()
        .map(|(key, name)| json!({ "key": key, "name": name }))
        .collect();
    HttpResponse::Ok().json(json!({ "themes": themes }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test};

    async fn call_export(payload: Value) -> (u16, Vec<u8>) {
        let app =
            test::init_service(App::new().route("/export", web::post().to(export))).await;
        let request = test::TestRequest::post()
            .uri("/export")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, bytes.to_vec())
    }

    #[actix_web::test]
    async fn direct_layout_export_returns_pptx_bytes() {
        let (status, bytes) = call_export(json!({
            "layout": "data-grid-dashboard",
            "theme": "metallic-earth"
        }))
        .await;
        assert_eq!(status, 200);
        // ZIP local file header magic.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[actix_web::test]
    async fn missing_theme_is_a_400() {
        let (status, bytes) = call_export(json!({ "layout": "data-grid-dashboard" })).await;
        assert_eq!(status, 400);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Theme"));
    }

    #[actix_web::test]
    async fn invalid_brief_is_a_400_with_joined_errors() {
        let (status, bytes) = call_export(json!({
            "deckRequest": { "subtitle": "no topic here" },
            "theme": "metallic-earth"
        }))
        .await;
        assert_eq!(status, 400);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("Topic"));
    }

    #[actix_web::test]
    async fn unknown_theme_is_a_500_generation_failure() {
        let (status, _) = call_export(json!({
            "layout": "data-grid-dashboard",
            "theme": "no-such-theme"
        }))
        .await;
        assert_eq!(status, 500);
    }

    #[actix_web::test]
    async fn brief_payload_generates_a_deck() {
        let (status, bytes) = call_export(json!({
            "topic": "Q4 Review",
            "metrics": [ { "label": "Revenue", "value": 2500000 } ],
            "theme": "corporate-blue"
        }))
        .await;
        assert_eq!(status, 200);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[actix_web::test]
    async fn preview_returns_html() {
        let app =
            test::init_service(App::new().route("/preview", web::get().to(preview))).await;
        let request = test::TestRequest::get()
            .uri("/preview?layout=chart-showcase&theme=tech-purple")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Chart Showcase"));
    }
}
