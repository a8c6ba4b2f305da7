use crate::api::export::result_to_csv;
use crate::db::PgLookup;
use crate::models::AggregationResult;
use crate::service::AggregationService;
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// 响应体
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<AggregationResult>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 最终发票聚合接口
///
/// 查不到不算错误 (返回 200 + 全零结果, found 标志位为 false),
/// 只有存储层故障才返回 500。
pub async fn aggregate_final(
    State(service): State<Arc<AggregationService<PgLookup>>>,
    Path(invoice_number): Path<String>,
) -> Response {
    match service
        .aggregate_from_reimbursement_number(&invoice_number)
        .await
    {
        Ok(result) => {
            let response = AggregateResponse {
                success: true,
                message: format!("Aggregated {}", invoice_number),
                data: Some(result),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let response = AggregateResponse {
                success: false,
                message: format!("Error: {}", e),
                data: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 最终发票 CSV 导出接口
pub async fn export_final_csv(
    State(service): State<Arc<AggregationService<PgLookup>>>,
    Path(invoice_number): Path<String>,
) -> Response {
    let result = match service
        .aggregate_from_reimbursement_number(&invoice_number)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: {}", e),
            )
                .into_response()
        }
    };

    match result_to_csv(&result) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            bytes,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", e),
        )
            .into_response(),
    }
}
