use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::AppState;
use crate::auth::require_user;
use crate::constants::{BANNER_WINDOW, ERR_DEBT_NOT_FOUND};
use crate::detail::{self, DebtDetail, DebtView};
use crate::error::AppError;
use crate::form::{DebtDraft, DebtForm};
use crate::models::{BannerResponse, CreatedDebtResponse, DebtPageQuery, ListDebtsResponse};
use crate::qr;
use crate::utils::{share_link, today_utc};

#[derive(Serialize, Debug)]
pub struct DebtPageResponse {
    #[serde(flatten)]
    pub detail: DebtDetail,
    pub banner: Vec<&'static str>,
}

#[derive(Serialize, Debug)]
pub struct NotFoundPage {
    pub title: &'static str,
    pub message: &'static str,
}

pub const NOT_FOUND_PAGE: NotFoundPage = NotFoundPage {
    title: ERR_DEBT_NOT_FOUND,
    message: "Parece que esta cobrança não existe ou foi removida.",
};

pub async fn root() -> Html<&'static str> {
    Html("<h1>💰 CobraAmigo</h1><p>Cobre seus amigos com estilo e humor!</p>")
}

pub async fn list_debts(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<ListDebtsResponse>), AppError> {
    let user = require_user(&session).await?;

    let debts = state.cache.get_or_load(&state.store, &user.id).await?;
    let summary = detail::summarize(&debts, today_utc());

    Ok((StatusCode::OK, Json(ListDebtsResponse { debts, summary })))
}

pub async fn create_debt(
    State(state): State<AppState>,
    session: Session,
    Json(draft): Json<DebtDraft>,
) -> Result<(StatusCode, Json<CreatedDebtResponse>), AppError> {
    let user = require_user(&session).await?;

    let mut form = DebtForm::with_draft(draft);
    let debt = form.submit(&state.store, &user.id, &state.cache).await?;
    let share_link = share_link(&state.config.public_base_url, &debt.id);

    Ok((StatusCode::CREATED, Json(CreatedDebtResponse { debt, share_link })))
}

pub async fn delete_debt(
    State(state): State<AppState>,
    session: Session,
    Path(debt_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = require_user(&session).await?;

    state.store.delete_by_id(&user.id, &debt_id).await?;
    state.cache.remove(&user.id, &debt_id).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Public debt page. Reachable by anyone holding the id.
pub async fn debt_page(
    State(state): State<AppState>,
    Query(query): Query<DebtPageQuery>,
) -> Result<Response, AppError> {
    let view = detail::resolve(&state.store, query.debt_id.as_deref(), today_utc()).await?;

    Ok(match view {
        DebtView::NotFound => (StatusCode::NOT_FOUND, Json(NOT_FOUND_PAGE)).into_response(),
        DebtView::Found(detail) => {
            let banner = state.ticker.read().await.window(BANNER_WINDOW);
            (
                StatusCode::OK,
                Json(DebtPageResponse {
                    detail: *detail,
                    banner,
                }),
            )
                .into_response()
        }
    })
}

pub async fn debt_qr(
    State(state): State<AppState>,
    Query(query): Query<DebtPageQuery>,
) -> Result<Response, AppError> {
    let view = detail::resolve(&state.store, query.debt_id.as_deref(), today_utc()).await?;

    let DebtView::Found(detail) = view else {
        return Err(AppError::NotFound(ERR_DEBT_NOT_FOUND.to_string()));
    };
    let svg = qr::render_svg(&detail.pix_payload)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub async fn banner(State(state): State<AppState>) -> Json<BannerResponse> {
    let messages = state.ticker.read().await.window(BANNER_WINDOW);
    Json(BannerResponse { messages })
}
