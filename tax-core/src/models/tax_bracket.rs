use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal band of a progressive income-tax schedule.
///
/// A band covers `(min_income, max_income]`. `max_income` is `None` for the
/// open-ended top band. `base_tax` is the tax already owed at `min_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }

    /// Whether `income` falls at or below this band's upper bound.
    pub fn covers(
        &self,
        income: Decimal,
    ) -> bool {
        self.max_income.is_none_or(|max| income <= max)
    }

    /// Tax owed on `income` under this band, without rounding.
    pub fn tax_for(
        &self,
        income: Decimal,
    ) -> Decimal {
        let marginal_income = income - self.min_income;
        self.base_tax
            .saturating_add(marginal_income.saturating_mul(self.tax_rate))
    }
}
