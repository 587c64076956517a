use serde::{Deserialize, Serialize};

const MASK_SHORT: &str = "••••••";
const MASK_LONG: &str = "••••••••";

/// A single currency holding shown on the wallet overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyBalance {
    pub code: String,
    pub symbol: String,
    pub balance: f64,
    /// 24h movement in percent; negative means the holding lost value.
    pub change_pct: f64,
    pub flag: String,
}

impl CurrencyBalance {
    /// Rendered balance, masked when the user has hidden balances.
    pub fn display_balance(&self, visible: bool) -> String {
        if visible {
            format!("{}{}", self.symbol, format_amount(self.balance))
        } else {
            MASK_SHORT.to_string()
        }
    }
}

/// A payment card shown in the cards carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub kind: String,
    pub masked_number: String,
    pub balance: f64,
    pub currency: String,
}

impl PaymentCard {
    pub fn display_balance(&self, visible: bool) -> String {
        if visible {
            format!("{} {}", self.currency, format_amount(self.balance))
        } else {
            MASK_LONG.to_string()
        }
    }
}

/// A label/value pair on the profile screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStat {
    pub label: String,
    pub value: String,
}

/// Rendered total across currency balances, masked when hidden.
pub fn display_total(total: f64, visible: bool) -> String {
    if visible {
        format!("${}", format_amount(total))
    } else {
        MASK_LONG.to_string()
    }
}

/// Formats an amount with thousands separators; whole amounts drop the
/// fractional digits, everything else keeps two.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let (whole, fraction) = (cents / 100, cents % 100);
    let mut digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    while digits.len() > 3 {
        let rest = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            rest
        } else {
            format!("{rest},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };

    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(12847.32), "12,847.32");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(0.5), "0.50");
    }

    #[test]
    fn balances_mask_when_hidden() {
        let usd = CurrencyBalance {
            code: "USD".into(),
            symbol: "$".into(),
            balance: 12847.32,
            change_pct: 2.34,
            flag: "🇺🇸".into(),
        };
        assert_eq!(usd.display_balance(true), "$12,847.32");
        assert_eq!(usd.display_balance(false), "••••••");

        let card = PaymentCard {
            kind: "Platinum".into(),
            masked_number: "**** **** **** 4532".into(),
            balance: 12847.32,
            currency: "USD".into(),
        };
        assert_eq!(card.display_balance(true), "USD 12,847.32");
        assert_eq!(card.display_balance(false), "••••••••");
    }

    #[test]
    fn total_masks_when_hidden() {
        assert_eq!(display_total(28203.91, true), "$28,203.91");
        assert_eq!(display_total(28203.91, false), "••••••••");
    }
}
