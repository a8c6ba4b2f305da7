use crate::models::{AggregationResult, CombinedLineItem, DpItem, LineItemSource};
use crate::money;
use crate::service::lookup::{InvoiceLookup, LookupError};

/// 业务主键最短长度, 低于该长度直接返回全零结果 (前端边输边查, 不报错)
const MIN_KEY_LEN: usize = 3;

/// 预付款日期的展示格式 (打印版发票同款)
const DP_DATE_FMT: &str = "%d/%m/%Y";

/// 最终发票聚合服务
///
/// 把报销单、关联正式发票、预付款三类记录拉通成一张 "Invoice Final" 视图:
/// 合并明细、小计、预付款合计、剩余应收。只读不写, 每次调用独立。
pub struct AggregationService<L: InvoiceLookup> {
    lookup: L,
}

impl<L: InvoiceLookup> AggregationService<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// 按报销单号聚合 (完全复刻源系统 Invoice Final 页面的取数逻辑)
    pub async fn aggregate_from_reimbursement_number(
        &self,
        input: &str,
    ) -> Result<AggregationResult, LookupError> {
        // 0. 输入过短直接返回全零结果, 不触发任何查询
        let key = input.trim();
        if key.len() < MIN_KEY_LEN {
            return Ok(AggregationResult::empty());
        }

        // 1. 查报销单主表
        let reimbursement = self
            .lookup
            .find_reimbursement_by_invoice_number(key)
            .await?;
        let Some(reimbursement) = reimbursement else {
            tracing::info!("Reimbursement {} not found", key);
            return Ok(AggregationResult::empty());
        };

        let mut result = AggregationResult::empty();
        result.reimbursement_found = true;
        result.reimbursement_amount = reimbursement.total_amount.clone();

        // 2. 带出表头字段 (仅展示用)
        result.invoice_number = reimbursement.invoice_number.clone();
        result.customer_name = reimbursement.customer_name.clone();
        result.customer_address = reimbursement.customer_address.clone();
        result.customer_city = reimbursement.customer_city.clone();
        result.bl_number = reimbursement
            .linked_bl_number()
            .map(|s| s.to_string());

        // 3. 报销单明细 -> 合并明细 (空明细时合成一条整额行)
        let items = self
            .lookup
            .find_reimbursement_line_items(reimbursement.id)
            .await?;
        let countable: Vec<_> = items.into_iter().filter(|li| li.is_countable()).collect();
        if countable.is_empty() {
            result.combined_line_items.push(CombinedLineItem {
                description: "Invoice Reimbursement".to_string(),
                amount: reimbursement.total_amount.clone(),
                source: LineItemSource::Reimbursement,
            });
        } else {
            for li in countable {
                result.combined_line_items.push(CombinedLineItem {
                    description: format!("Reimbursement - {}", li.description),
                    amount: li.amount,
                    source: LineItemSource::Reimbursement,
                });
            }
        }

        // 4. 关联正式发票 (no_invoice 为空或查不到都不算错, 报销单可以独立存在)
        if let Some(no_invoice) = reimbursement.linked_invoice_number() {
            match self.lookup.find_invoice_by_no_invoice(no_invoice).await? {
                Some(invoice) => {
                    result.invoice_found = true;
                    result.invoice_amount = invoice.total_amount.clone();

                    let items = self.lookup.find_invoice_line_items(invoice.id).await?;
                    let countable: Vec<_> =
                        items.into_iter().filter(|li| li.is_countable()).collect();
                    if countable.is_empty() {
                        result.combined_line_items.push(CombinedLineItem {
                            description: "Invoice".to_string(),
                            amount: invoice.total_amount,
                            source: LineItemSource::Invoice,
                        });
                    } else {
                        for li in countable {
                            result.combined_line_items.push(CombinedLineItem {
                                description: format!("Invoice - {}", li.description),
                                amount: li.amount,
                                source: LineItemSource::Invoice,
                            });
                        }
                    }
                }
                None => {
                    tracing::info!("Linked invoice {} not found, skipping", no_invoice);
                }
            }
        }

        // 5. 预付款 (端口已过滤 draft/软删除并按 part_number 升序,
        //    label 按位置编号, part_number 有跳号也不影响)
        if let Some(bl_number) = reimbursement.linked_bl_number() {
            let dps = self
                .lookup
                .find_down_payments_by_bl_number(bl_number)
                .await?;
            if !dps.is_empty() {
                result.dp_found = true;
                result.dp_count = dps.len();
                for (idx, dp) in dps.into_iter().enumerate() {
                    result.dp_items.push(DpItem {
                        label: format!("DP {}", idx + 1),
                        amount: dp.total_amount,
                        date: dp.invoice_date.map(|d| d.format(DP_DATE_FMT).to_string()),
                    });
                }
            }
        }

        // 6. 汇总: 小计 - 预付款合计 = 剩余应收 (允许为负)
        result.subtotal = money::sum(result.combined_line_items.iter().map(|li| &li.amount));
        result.down_payment_total = money::sum(result.dp_items.iter().map(|dp| &dp.amount));
        result.remaining_amount = &result.subtotal - &result.down_payment_total;

        tracing::info!(
            "聚合完成: {} 明细 {} 条, DP {} 条, 小计 {}, 剩余 {}",
            key,
            result.combined_line_items.len(),
            result.dp_count,
            result.subtotal,
            result.remaining_amount
        );

        Ok(result)
    }
}
