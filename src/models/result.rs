use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

/// 合并明细行的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemSource {
    Reimbursement,
    Invoice,
}

impl LineItemSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemSource::Reimbursement => "reimbursement",
            LineItemSource::Invoice => "invoice",
        }
    }
}

/// 合并后的明细行 (报销单 + 正式发票)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedLineItem {
    pub description: String,
    pub amount: BigDecimal,
    pub source: LineItemSource,
}

/// 预付款展示行, label 按过滤后的位置编号 ("DP 1"...), 与 part_number 的数值无关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DpItem {
    pub label: String,
    pub amount: BigDecimal,
    pub date: Option<String>,
}

/// 最终发票聚合结果
///
/// 每次调用现算现返, 不落库。remaining_amount 允许为负 (多收/挂账),
/// 展示层自行决定如何呈现, 这里不做截断。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    pub reimbursement_found: bool,
    pub invoice_found: bool,
    pub dp_found: bool,

    // 从报销单带出的表头字段 (仅展示用)
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_city: String,
    pub bl_number: Option<String>,

    pub reimbursement_amount: BigDecimal,
    pub invoice_amount: BigDecimal,
    pub dp_count: usize,

    pub combined_line_items: Vec<CombinedLineItem>,
    pub dp_items: Vec<DpItem>,

    pub subtotal: BigDecimal,
    pub down_payment_total: BigDecimal,
    pub remaining_amount: BigDecimal,
}

impl AggregationResult {
    /// 全零结果 (输入过短或报销单不存在时返回)
    pub fn empty() -> Self {
        Self {
            reimbursement_found: false,
            invoice_found: false,
            dp_found: false,
            invoice_number: String::new(),
            customer_name: String::new(),
            customer_address: String::new(),
            customer_city: String::new(),
            bl_number: None,
            reimbursement_amount: BigDecimal::zero(),
            invoice_amount: BigDecimal::zero(),
            dp_count: 0,
            combined_line_items: Vec::new(),
            dp_items: Vec::new(),
            subtotal: BigDecimal::zero(),
            down_payment_total: BigDecimal::zero(),
            remaining_amount: BigDecimal::zero(),
        }
    }
}
