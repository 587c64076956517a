//! Demo portfolio snapshot backing the wallet, cards, and profile views.
//! Static data; no balance computation happens anywhere in the app.

use finhub_types::{CurrencyBalance, PaymentCard, ProfileStat};

/// Headline total shown on the wallet overview card.
pub const DEMO_TOTAL_BALANCE: f64 = 28_203.91;

pub fn demo_currencies() -> Vec<CurrencyBalance> {
    vec![
        CurrencyBalance {
            code: "USD".into(),
            symbol: "$".into(),
            balance: 12_847.32,
            change_pct: 2.34,
            flag: "🇺🇸".into(),
        },
        CurrencyBalance {
            code: "EUR".into(),
            symbol: "€".into(),
            balance: 8_923.41,
            change_pct: -1.12,
            flag: "🇪🇺".into(),
        },
        CurrencyBalance {
            code: "GBP".into(),
            symbol: "£".into(),
            balance: 6_432.18,
            change_pct: 0.89,
            flag: "🇬🇧".into(),
        },
        CurrencyBalance {
            code: "JPY".into(),
            symbol: "¥".into(),
            balance: 1_234_567.0,
            change_pct: -0.45,
            flag: "🇯🇵".into(),
        },
    ]
}

pub fn demo_cards() -> Vec<PaymentCard> {
    vec![
        PaymentCard {
            kind: "Platinum".into(),
            masked_number: "**** **** **** 4532".into(),
            balance: 12_847.32,
            currency: "USD".into(),
        },
        PaymentCard {
            kind: "Business".into(),
            masked_number: "**** **** **** 8901".into(),
            balance: 8_923.41,
            currency: "EUR".into(),
        },
    ]
}

pub fn demo_profile_stats() -> Vec<ProfileStat> {
    vec![
        ProfileStat {
            label: "Total Transactions".into(),
            value: "1,247".into(),
        },
        ProfileStat {
            label: "Countries Visited".into(),
            value: "23".into(),
        },
        ProfileStat {
            label: "Member Since".into(),
            value: "2021".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use finhub_types::portfolio::display_total;

    #[test]
    fn demo_data_has_the_expected_shape() {
        assert_eq!(demo_currencies().len(), 4);
        assert_eq!(demo_cards().len(), 2);
        assert_eq!(demo_profile_stats().len(), 3);
    }

    #[test]
    fn headline_total_renders_masked_and_unmasked() {
        assert_eq!(display_total(DEMO_TOTAL_BALANCE, true), "$28,203.91");
        assert_eq!(display_total(DEMO_TOTAL_BALANCE, false), "••••••••");
    }
}
