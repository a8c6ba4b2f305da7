//! Invoice Final 聚合逻辑的集成测试 (内存端口驱动, 不依赖数据库)

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use invoice_final_rust::db::FailingLookup;
use invoice_final_rust::models::{
    DownPayment, Invoice, InvoiceLineItem, LineItemSource, Reimbursement,
};
use invoice_final_rust::{AggregationService, LookupError, MemoryLookup};

fn dec(v: i64) -> BigDecimal {
    BigDecimal::from(v)
}

fn reimbursement(id: i64, invoice_number: &str, total: i64) -> Reimbursement {
    Reimbursement {
        id,
        invoice_number: invoice_number.to_string(),
        customer_name: "PT Mitra Sejahtera".to_string(),
        customer_address: "Jl. Pelabuhan Raya No. 8".to_string(),
        customer_city: "Jakarta Utara".to_string(),
        bl_number: None,
        no_invoice: None,
        total_amount: dec(total),
        deleted_at: None,
    }
}

fn invoice(id: i64, no_invoice: &str, total: i64) -> Invoice {
    Invoice {
        id,
        no_invoice: no_invoice.to_string(),
        total_amount: dec(total),
        deleted_at: None,
    }
}

fn item(id: i64, description: &str, amount: i64) -> InvoiceLineItem {
    InvoiceLineItem {
        id,
        description: description.to_string(),
        amount: dec(amount),
    }
}

fn down_payment(id: i64, bl: &str, part: i32, total: i64, status: &str) -> DownPayment {
    DownPayment {
        id,
        bl_number: bl.to_string(),
        part_number: part,
        total_amount: dec(total),
        invoice_date: NaiveDate::from_ymd_opt(2026, 2, part as u32),
        status: status.to_string(),
        deleted_at: None,
    }
}

#[tokio::test]
async fn short_input_returns_zeroed_result_without_touching_the_port() {
    // FailingLookup 的任何查询都会报错, 能返回 Ok 就说明没有发起查询
    let service = AggregationService::new(FailingLookup);

    let result = service
        .aggregate_from_reimbursement_number("ab")
        .await
        .unwrap();

    assert!(!result.reimbursement_found);
    assert!(!result.invoice_found);
    assert!(!result.dp_found);
    assert_eq!(result.subtotal, dec(0));
    assert_eq!(result.remaining_amount, dec(0));
    assert!(result.combined_line_items.is_empty());
}

#[tokio::test]
async fn whitespace_padding_does_not_bypass_the_length_guard() {
    let service = AggregationService::new(FailingLookup);

    let result = service
        .aggregate_from_reimbursement_number("  ab  ")
        .await
        .unwrap();
    assert!(!result.reimbursement_found);
}

#[tokio::test]
async fn unknown_reimbursement_number_is_a_soft_miss() {
    let service = AggregationService::new(MemoryLookup::new());

    let result = service
        .aggregate_from_reimbursement_number("INV/0404/2026")
        .await
        .unwrap();

    assert!(!result.reimbursement_found);
    assert_eq!(result.reimbursement_amount, dec(0));
    assert!(result.dp_items.is_empty());
}

#[tokio::test]
async fn reimbursement_without_items_gets_a_whole_amount_fallback_row() {
    let mut lookup = MemoryLookup::new();
    lookup.add_reimbursement(reimbursement(1, "INV/0001/2026", 500_000));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0001/2026")
        .await
        .unwrap();

    assert!(result.reimbursement_found);
    assert_eq!(result.combined_line_items.len(), 1);
    let row = &result.combined_line_items[0];
    assert_eq!(row.description, "Invoice Reimbursement");
    assert_eq!(row.amount, dec(500_000));
    assert_eq!(row.source, LineItemSource::Reimbursement);
    assert_eq!(result.subtotal, dec(500_000));
}

#[tokio::test]
async fn blank_description_rows_do_not_count_as_itemization() {
    let mut lookup = MemoryLookup::new();
    lookup.add_reimbursement(reimbursement(1, "INV/0002/2026", 250_000));
    lookup.add_reimbursement_item(1, item(1, "   ", 250_000));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0002/2026")
        .await
        .unwrap();

    // 全是空行等同于没有明细, 走整额兜底行
    assert_eq!(result.combined_line_items.len(), 1);
    assert_eq!(result.combined_line_items[0].description, "Invoice Reimbursement");
}

#[tokio::test]
async fn cross_link_pulls_invoice_items_with_prefixes() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0003/2026", 800_000);
    r.no_invoice = Some("INV-100".to_string());
    lookup.add_reimbursement(r);
    lookup.add_reimbursement_item(1, item(1, "Jasa Reimbursement", 800_000));
    lookup.add_invoice(invoice(10, "INV-100", 200_000));
    lookup.add_invoice_item(10, item(1, "Trucking", 120_000));
    lookup.add_invoice_item(10, item(2, "Materai", 80_000));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0003/2026")
        .await
        .unwrap();

    assert!(result.invoice_found);
    assert_eq!(result.invoice_amount, dec(200_000));

    let descriptions: Vec<&str> = result
        .combined_line_items
        .iter()
        .map(|li| li.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Reimbursement - Jasa Reimbursement",
            "Invoice - Trucking",
            "Invoice - Materai",
        ]
    );
    assert!(result
        .combined_line_items
        .iter()
        .skip(1)
        .all(|li| li.source == LineItemSource::Invoice));
}

#[tokio::test]
async fn invoice_without_items_gets_its_own_fallback_row() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0004/2026", 300_000);
    r.no_invoice = Some("INV-200".to_string());
    lookup.add_reimbursement(r);
    lookup.add_invoice(invoice(20, "INV-200", 150_000));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0004/2026")
        .await
        .unwrap();

    let invoice_rows: Vec<_> = result
        .combined_line_items
        .iter()
        .filter(|li| li.source == LineItemSource::Invoice)
        .collect();
    assert_eq!(invoice_rows.len(), 1);
    assert_eq!(invoice_rows[0].description, "Invoice");
    assert_eq!(invoice_rows[0].amount, dec(150_000));
}

#[tokio::test]
async fn missing_linked_invoice_is_not_an_error() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0005/2026", 300_000);
    r.no_invoice = Some("INV-999".to_string()); // 不存在
    lookup.add_reimbursement(r);
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0005/2026")
        .await
        .unwrap();

    assert!(result.reimbursement_found);
    assert!(!result.invoice_found);
    assert_eq!(result.invoice_amount, dec(0));
    assert_eq!(result.combined_line_items.len(), 1); // 只有报销单兜底行
}

#[tokio::test]
async fn dp_labels_are_positional_regardless_of_part_number_gaps() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0006/2026", 1_000_000);
    r.bl_number = Some("BL777".to_string());
    lookup.add_reimbursement(r);
    // part_number 乱序插入且有跳号, label 仍按位置 1..n
    lookup.add_down_payment(down_payment(1, "BL777", 7, 100_000, "paid"));
    lookup.add_down_payment(down_payment(2, "BL777", 2, 200_000, "sent"));
    lookup.add_down_payment(down_payment(3, "BL777", 5, 300_000, "paid"));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0006/2026")
        .await
        .unwrap();

    assert!(result.dp_found);
    assert_eq!(result.dp_count, 3);
    let labels: Vec<&str> = result.dp_items.iter().map(|dp| dp.label.as_str()).collect();
    assert_eq!(labels, vec!["DP 1", "DP 2", "DP 3"]);
    // 金额按 part_number 升序: 2, 5, 7
    let amounts: Vec<&BigDecimal> = result.dp_items.iter().map(|dp| &dp.amount).collect();
    assert_eq!(amounts, vec![&dec(200_000), &dec(300_000), &dec(100_000)]);
}

#[tokio::test]
async fn draft_down_payments_are_invisible() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0007/2026", 400_000);
    r.bl_number = Some("BL555".to_string());
    lookup.add_reimbursement(r);
    lookup.add_down_payment(down_payment(1, "BL555", 1, 100_000, "paid"));
    lookup.add_down_payment(down_payment(2, "BL555", 2, 999_999, "draft"));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0007/2026")
        .await
        .unwrap();

    assert_eq!(result.dp_count, 1);
    assert_eq!(result.down_payment_total, dec(100_000));
}

#[tokio::test]
async fn negative_remaining_amount_is_preserved() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/0008/2026", 100_000);
    r.bl_number = Some("BL111".to_string());
    lookup.add_reimbursement(r);
    lookup.add_down_payment(down_payment(1, "BL111", 1, 150_000, "paid"));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/0008/2026")
        .await
        .unwrap();

    // 多收不截断为 0, 负数表示挂账
    assert_eq!(result.remaining_amount, dec(-50_000));
}

#[tokio::test]
async fn end_to_end_scenario_matches_the_printed_invoice() {
    let mut lookup = MemoryLookup::new();
    let mut r = reimbursement(1, "INV/MITRA/0001/2026", 800_000);
    r.bl_number = Some("BL123".to_string());
    r.no_invoice = Some("INV-900".to_string());
    lookup.add_reimbursement(r);
    lookup.add_reimbursement_item(1, item(1, "Jasa Reimbursement", 800_000));
    lookup.add_invoice(invoice(9, "INV-900", 1_200_000));
    lookup.add_invoice_item(9, item(1, "Trucking", 700_000));
    lookup.add_invoice_item(9, item(2, "Materai", 500_000));
    lookup.add_down_payment(down_payment(1, "BL123", 1, 300_000, "paid"));
    lookup.add_down_payment(down_payment(2, "BL123", 2, 200_000, "sent"));
    let service = AggregationService::new(lookup);

    let result = service
        .aggregate_from_reimbursement_number("INV/MITRA/0001/2026")
        .await
        .unwrap();

    assert!(result.reimbursement_found);
    assert!(result.invoice_found);
    assert!(result.dp_found);
    assert_eq!(result.reimbursement_amount, dec(800_000));
    assert_eq!(result.invoice_amount, dec(1_200_000));
    assert_eq!(result.dp_count, 2);
    assert_eq!(result.subtotal, dec(2_000_000));
    assert_eq!(result.down_payment_total, dec(500_000));
    assert_eq!(result.remaining_amount, dec(1_500_000));

    // 表头字段原样带出
    assert_eq!(result.invoice_number, "INV/MITRA/0001/2026");
    assert_eq!(result.customer_name, "PT Mitra Sejahtera");
    assert_eq!(result.bl_number.as_deref(), Some("BL123"));
}

#[tokio::test]
async fn storage_failure_aborts_the_whole_aggregation() {
    let service = AggregationService::new(FailingLookup);

    let err = service
        .aggregate_from_reimbursement_number("INV/0010/2026")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Unavailable(_)));
}
