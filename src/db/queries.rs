use crate::models::{DownPayment, Invoice, InvoiceLineItem, Reimbursement};
use crate::service::lookup::{InvoiceLookup, LookupError};
use async_trait::async_trait;
use sqlx::PgPool;

/// 按业务主键查报销单 (排除软删除)
pub async fn find_reimbursement_by_invoice_number(
    pool: &PgPool,
    invoice_number: &str,
) -> Result<Option<Reimbursement>, sqlx::Error> {
    sqlx::query_as::<_, Reimbursement>(
        r#"
        SELECT id, invoice_number, customer_name, customer_address, customer_city,
               bl_number, no_invoice, total_amount, deleted_at
        FROM invoice_reimbursement
        WHERE invoice_number = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(invoice_number)
    .fetch_optional(pool)
    .await
}

/// 按 no_invoice 查正式发票 (排除软删除)
pub async fn find_invoice_by_no_invoice(
    pool: &PgPool,
    no_invoice: &str,
) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        r#"
        SELECT id, no_invoice, total_amount, deleted_at
        FROM invoice
        WHERE no_invoice = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(no_invoice)
    .fetch_optional(pool)
    .await
}

/// 报销单明细列表 (按创建顺序)
pub async fn find_reimbursement_line_items(
    pool: &PgPool,
    reimbursement_id: i64,
) -> Result<Vec<InvoiceLineItem>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceLineItem>(
        r#"
        SELECT id, description, amount
        FROM invoice_reimbursement_item
        WHERE reimbursement_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(reimbursement_id)
    .fetch_all(pool)
    .await
}

/// 发票明细列表 (按创建顺序)
pub async fn find_invoice_line_items(
    pool: &PgPool,
    invoice_id: i64,
) -> Result<Vec<InvoiceLineItem>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceLineItem>(
        r#"
        SELECT id, description, amount
        FROM invoice_item
        WHERE invoice_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(invoice_id)
    .fetch_all(pool)
    .await
}

/// 按提单号查预付款 (排除 draft/软删除, 按期数升序)
pub async fn find_down_payments_by_bl_number(
    pool: &PgPool,
    bl_number: &str,
) -> Result<Vec<DownPayment>, sqlx::Error> {
    sqlx::query_as::<_, DownPayment>(
        r#"
        SELECT id, bl_number, part_number, total_amount, invoice_date, status, deleted_at
        FROM invoice_down_payment
        WHERE bl_number = $1
          AND status <> 'draft'
          AND deleted_at IS NULL
        ORDER BY part_number ASC
        "#,
    )
    .bind(bl_number)
    .fetch_all(pool)
    .await
}

/// Postgres 查询端口实现
#[derive(Clone)]
pub struct PgLookup {
    pool: PgPool,
}

impl PgLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceLookup for PgLookup {
    async fn find_reimbursement_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Reimbursement>, LookupError> {
        Ok(find_reimbursement_by_invoice_number(&self.pool, number).await?)
    }

    async fn find_invoice_by_no_invoice(
        &self,
        number: &str,
    ) -> Result<Option<Invoice>, LookupError> {
        Ok(find_invoice_by_no_invoice(&self.pool, number).await?)
    }

    async fn find_reimbursement_line_items(
        &self,
        reimbursement_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        Ok(find_reimbursement_line_items(&self.pool, reimbursement_id).await?)
    }

    async fn find_invoice_line_items(
        &self,
        invoice_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        Ok(find_invoice_line_items(&self.pool, invoice_id).await?)
    }

    async fn find_down_payments_by_bl_number(
        &self,
        bl_number: &str,
    ) -> Result<Vec<DownPayment>, LookupError> {
        Ok(find_down_payments_by_bl_number(&self.pool, bl_number).await?)
    }
}
