use crate::models::AggregationResult;
use crate::money;

/// 把聚合结果导出为 CSV (给财务下载到表格软件用)
///
/// 行布局和打印版一致: 先合并明细, 再预付款, 最后三行汇总。
pub fn result_to_csv(
    result: &AggregationResult,
) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    use csv::Writer;

    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(["description", "amount", "source"])?;

    for li in &result.combined_line_items {
        let amount = li.amount.to_string();
        writer.write_record([li.description.as_str(), amount.as_str(), li.source.as_str()])?;
    }

    for dp in &result.dp_items {
        let amount = dp.amount.to_string();
        writer.write_record([
            dp.label.as_str(),
            amount.as_str(),
            dp.date.as_deref().unwrap_or_default(),
        ])?;
    }

    let subtotal = result.subtotal.to_string();
    let remaining = result.remaining_amount.to_string();
    writer.write_record(["Subtotal", subtotal.as_str(), ""])?;
    // 没有预付款时打印版不出这一行
    if money::is_positive(&result.down_payment_total) {
        let dp_total = result.down_payment_total.to_string();
        writer.write_record(["Down Payment", dp_total.as_str(), ""])?;
    }
    writer.write_record(["Remaining", remaining.as_str(), ""])?;

    writer.flush()?;
    Ok(writer.into_inner()?)
}
