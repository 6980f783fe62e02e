use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use margin_sdk::join::{parse_window, parse_window_lenient};
use margin_sdk::{MarginResult, ProductDetail};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Optional inclusive date window, given as both-or-neither.
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    #[serde(rename = "dataInicio")]
    pub data_inicio: Option<String>,
    #[serde(rename = "dataFim")]
    pub data_fim: Option<String>,
}

/// GET /produtos?dataInicio=01.06.2025&dataFim=30.06.2025
///
/// Margins for every product. Without a window the latest purchase and sale
/// are used; with one, the mean over rows dated inside it.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WindowParams>,
) -> Result<Json<Vec<MarginResult>>, AppError> {
    let window = parse_window(params.data_inicio.as_deref(), params.data_fim.as_deref())?;
    let rows = state.sdk.margins(window).await?;
    debug!("GET /produtos window={:?} -> {} rows", window, rows.len());
    Ok(Json(rows))
}

/// GET /produtos/:cod_produto
///
/// Margin for a single product, same window rules as the list.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(cod_produto): Path<String>,
    Query(params): Query<WindowParams>,
) -> Result<Json<MarginResult>, AppError> {
    let window = parse_window(params.data_inicio.as_deref(), params.data_fim.as_deref())?;
    let row = state.sdk.margin(&cod_produto, window).await?;
    Ok(Json(row))
}

/// GET /produtos/:cod_produto/detalhes?dataInicio=2025-06-01&dataFim=2025-06-30
///
/// Margin summary plus the purchase invoices (`notasFiscais`) and sales
/// behind it, newest first. The mobile detail screen sends ISO dates, so
/// this endpoint also accepts `YYYY-MM-DD` bounds.
pub async fn get_product_details(
    State(state): State<Arc<AppState>>,
    Path(cod_produto): Path<String>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ProductDetail>, AppError> {
    let window =
        parse_window_lenient(params.data_inicio.as_deref(), params.data_fim.as_deref())?;
    let detail = state.sdk.detail(&cod_produto, window).await?;
    Ok(Json(detail))
}
