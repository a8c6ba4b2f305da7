use crate::models::{DownPayment, Invoice, InvoiceLineItem, Reimbursement};
use async_trait::async_trait;
use thiserror::Error;

/// 查询端口错误
///
/// 注意: "查不到" 不是错误, 端口用 `Ok(None)` / 空 Vec 表达,
/// 这里只描述存储层本身的故障, 出现时整次聚合直接中止。
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// 查询端口 (由持久层实现: PgLookup 走 Postgres, MemoryLookup 用于测试)
///
/// 约定:
/// - 所有查询排除软删除行 (`deleted_at` 非空)
/// - 主键查询至多一条结果
/// - 明细按创建顺序 (id 升序) 返回
/// - 预付款排除 draft 状态, 按 part_number 升序返回
#[async_trait]
pub trait InvoiceLookup: Send + Sync {
    /// 按业务主键查报销单
    async fn find_reimbursement_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Reimbursement>, LookupError>;

    /// 按 no_invoice 查正式发票
    async fn find_invoice_by_no_invoice(
        &self,
        number: &str,
    ) -> Result<Option<Invoice>, LookupError>;

    /// 报销单明细列表
    async fn find_reimbursement_line_items(
        &self,
        reimbursement_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError>;

    /// 发票明细列表
    async fn find_invoice_line_items(
        &self,
        invoice_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError>;

    /// 按提单号查预付款 (已过滤、已排序)
    async fn find_down_payments_by_bl_number(
        &self,
        bl_number: &str,
    ) -> Result<Vec<DownPayment>, LookupError>;
}
