use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 报销单主表 (invoice_reimbursement)
///
/// `invoice_number` 是业务主键; `no_invoice` 指向关联的正式发票 (可空),
/// `bl_number` 是提单号, 用于关联预付款 (可空)。
/// 软删除的行 (`deleted_at` 非空) 永远不会被查询端口返回。
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Reimbursement {
    pub id: i64,
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_city: String,
    pub bl_number: Option<String>,
    pub no_invoice: Option<String>,
    pub total_amount: BigDecimal,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Reimbursement {
    /// 关联发票号 (去空格后非空才算存在)
    pub fn linked_invoice_number(&self) -> Option<&str> {
        self.no_invoice
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 提单号 (去空格后非空才算存在)
    pub fn linked_bl_number(&self) -> Option<&str> {
        self.bl_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
