use crate::models::{DownPayment, Invoice, InvoiceLineItem, Reimbursement};
use crate::service::lookup::{InvoiceLookup, LookupError};
use async_trait::async_trait;

/// 内存版查询端口
///
/// 测试和本地演示用, 和 PgLookup 遵守同一套契约:
/// 排除软删除行、预付款排除 draft 并按 part_number 升序、明细按创建顺序。
#[derive(Debug, Default)]
pub struct MemoryLookup {
    reimbursements: Vec<Reimbursement>,
    invoices: Vec<Invoice>,
    // (parent_id, 明细)
    reimbursement_items: Vec<(i64, InvoiceLineItem)>,
    invoice_items: Vec<(i64, InvoiceLineItem)>,
    down_payments: Vec<DownPayment>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reimbursement(&mut self, r: Reimbursement) {
        self.reimbursements.push(r);
    }

    pub fn add_invoice(&mut self, inv: Invoice) {
        self.invoices.push(inv);
    }

    pub fn add_reimbursement_item(&mut self, reimbursement_id: i64, item: InvoiceLineItem) {
        self.reimbursement_items.push((reimbursement_id, item));
    }

    pub fn add_invoice_item(&mut self, invoice_id: i64, item: InvoiceLineItem) {
        self.invoice_items.push((invoice_id, item));
    }

    pub fn add_down_payment(&mut self, dp: DownPayment) {
        self.down_payments.push(dp);
    }
}

#[async_trait]
impl InvoiceLookup for MemoryLookup {
    async fn find_reimbursement_by_invoice_number(
        &self,
        number: &str,
    ) -> Result<Option<Reimbursement>, LookupError> {
        Ok(self
            .reimbursements
            .iter()
            .find(|r| r.invoice_number == number && r.deleted_at.is_none())
            .cloned())
    }

    async fn find_invoice_by_no_invoice(
        &self,
        number: &str,
    ) -> Result<Option<Invoice>, LookupError> {
        Ok(self
            .invoices
            .iter()
            .find(|inv| inv.no_invoice == number && inv.deleted_at.is_none())
            .cloned())
    }

    async fn find_reimbursement_line_items(
        &self,
        reimbursement_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        let mut items: Vec<InvoiceLineItem> = self
            .reimbursement_items
            .iter()
            .filter(|(parent, _)| *parent == reimbursement_id)
            .map(|(_, li)| li.clone())
            .collect();
        items.sort_by_key(|li| li.id);
        Ok(items)
    }

    async fn find_invoice_line_items(
        &self,
        invoice_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        let mut items: Vec<InvoiceLineItem> = self
            .invoice_items
            .iter()
            .filter(|(parent, _)| *parent == invoice_id)
            .map(|(_, li)| li.clone())
            .collect();
        items.sort_by_key(|li| li.id);
        Ok(items)
    }

    async fn find_down_payments_by_bl_number(
        &self,
        bl_number: &str,
    ) -> Result<Vec<DownPayment>, LookupError> {
        let mut dps: Vec<DownPayment> = self
            .down_payments
            .iter()
            .filter(|dp| {
                dp.bl_number == bl_number && dp.deleted_at.is_none() && dp.is_eligible()
            })
            .cloned()
            .collect();
        dps.sort_by_key(|dp| dp.part_number);
        Ok(dps)
    }
}

/// 测试用的故障端口: 所有查询都返回存储层错误
#[derive(Debug, Default)]
pub struct FailingLookup;

impl FailingLookup {
    fn storage_down() -> LookupError {
        LookupError::Unavailable("storage down".to_string())
    }
}

#[async_trait]
impl InvoiceLookup for FailingLookup {
    async fn find_reimbursement_by_invoice_number(
        &self,
        _number: &str,
    ) -> Result<Option<Reimbursement>, LookupError> {
        Err(Self::storage_down())
    }

    async fn find_invoice_by_no_invoice(
        &self,
        _number: &str,
    ) -> Result<Option<Invoice>, LookupError> {
        Err(Self::storage_down())
    }

    async fn find_reimbursement_line_items(
        &self,
        _reimbursement_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        Err(Self::storage_down())
    }

    async fn find_invoice_line_items(
        &self,
        _invoice_id: i64,
    ) -> Result<Vec<InvoiceLineItem>, LookupError> {
        Err(Self::storage_down())
    }

    async fn find_down_payments_by_bl_number(
        &self,
        _bl_number: &str,
    ) -> Result<Vec<DownPayment>, LookupError> {
        Err(Self::storage_down())
    }
}
