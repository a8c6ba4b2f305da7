use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 正式发票主表 (invoice)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub no_invoice: String, // 业务主键, 与 Reimbursement.no_invoice 匹配
    pub total_amount: BigDecimal,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 发票/报销单明细行
///
/// 描述去空格后为空的行不参与汇总 (上游允许保存空行)。
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: i64,
    pub description: String,
    pub amount: BigDecimal,
}

impl InvoiceLineItem {
    /// 是否计入汇总
    pub fn is_countable(&self) -> bool {
        !self.description.trim().is_empty()
    }
}
