use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use validator::Validate;

use crate::models::{ErrorResponse, KeyRequest, SubmitRequest};
use crate::panel::{render_dialog, shortcut_hint, KeyInput, Modifiers, UiEvent};
use crate::AppState;

pub async fn panel_snapshot(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.current()))
}

pub async fn panel_html(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse> {
    let platform = http_req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let snapshot = state.current();
    let markup = render_dialog(
        snapshot.dialog_visible,
        &snapshot.input,
        shortcut_hint(platform),
        &snapshot.html,
    );

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string()))
}

pub async fn open_panel(state: web::Data<AppState>) -> Result<HttpResponse> {
    dispatch(&state, UiEvent::TriggerClicked).await
}

pub async fn close_panel(state: web::Data<AppState>) -> Result<HttpResponse> {
    dispatch(&state, UiEvent::DialogHidden).await
}

pub async fn submit_query(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    dispatch(&state, UiEvent::Submitted(req.into_inner().query)).await
}

pub async fn press_key(
    state: web::Data<AppState>,
    req: web::Json<KeyRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid request",
            format!("Validation error: {}", e),
        )));
    }

    let req = req.into_inner();
    let modifiers = Modifiers {
        ctrl: req.ctrl,
        shift: req.shift,
        alt: req.alt,
        meta: req.meta,
    };
    dispatch(&state, UiEvent::Key(KeyInput::new(req.key, modifiers))).await
}

async fn dispatch(state: &AppState, event: UiEvent) -> Result<HttpResponse> {
    match state.panel.dispatch(event).await {
        Ok(()) => Ok(HttpResponse::Ok().json(state.current())),
        Err(e) => {
            tracing::error!("Panel dispatch error: {:?}", e);
            Ok(HttpResponse::ServiceUnavailable().json(ErrorResponse::with_details(
                "Search panel unavailable",
                e.to_string(),
            )))
        }
    }
}
