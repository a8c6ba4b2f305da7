use bigdecimal::{BigDecimal, Zero};

/// 精确求和 (空序列返回 0, 不走浮点数)
pub fn sum<'a, I>(amounts: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a BigDecimal>,
{
    amounts
        .into_iter()
        .fold(BigDecimal::zero(), |acc, a| acc + a)
}

/// 严格大于零 (用于判断可选金额是否需要展示)
pub fn is_positive(amount: &BigDecimal) -> bool {
    *amount > BigDecimal::zero()
}

/// 单张发票预览用的余额计算:
/// 明细合计 + 报销余额 - 预付款合计 (允许为负, 负数表示多收/挂账)
pub fn compute_remaining(
    line_items_total: &BigDecimal,
    down_payments: &[BigDecimal],
    reimbursement_remaining: &BigDecimal,
) -> BigDecimal {
    line_items_total + reimbursement_remaining - sum(down_payments)
}
