use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 预付款状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DpStatus {
    Draft,
    Sent,
    Paid,
    Canceled,
}

impl DpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DpStatus::Draft => "draft",
            DpStatus::Sent => "sent",
            DpStatus::Paid => "paid",
            DpStatus::Canceled => "canceled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => DpStatus::Sent,
            "paid" => DpStatus::Paid,
            "canceled" => DpStatus::Canceled,
            _ => DpStatus::Draft,
        }
    }
}

/// 预付款记录 (invoice_down_payment)
///
/// `bl_number` 关联报销单的提单号; `part_number` 定义期数顺序 (升序)。
/// 只有非 draft 状态的记录才参与汇总。
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DownPayment {
    pub id: i64,
    pub bl_number: String,
    pub part_number: i32,
    pub total_amount: BigDecimal,
    pub invoice_date: Option<NaiveDate>,
    pub status: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl DownPayment {
    /// 是否参与汇总 (draft 不算)
    pub fn is_eligible(&self) -> bool {
        DpStatus::from_string(&self.status) != DpStatus::Draft
    }
}
