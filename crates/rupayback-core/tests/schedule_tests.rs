use pretty_assertions::assert_eq;
use rupayback_core::payment_math::{self, income_driven_monthly_payment};
use rupayback_core::repayment::schedule::{build_schedule, LoanTerms};
use rupayback_core::{EngineConfig, LoanError, PaymentFrequency, RepaymentPlan};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(
    principal: Decimal,
    rate: Decimal,
    term_years: u32,
    frequency: PaymentFrequency,
    plan: RepaymentPlan,
) -> LoanTerms {
    LoanTerms {
        principal,
        annual_rate_percent: rate,
        term_years,
        frequency,
        plan,
        adjusted_gross_income: dec!(50000),
        start_date: None,
    }
}

// ===========================================================================
// Known-answer scenarios
// ===========================================================================

#[test]
fn test_ten_year_standard_monthly() {
    let terms = loan(
        dec!(10000),
        dec!(5),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::Standard,
    );
    let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
    let s = &result.result;

    assert_eq!(s.nominal_periods, 120);
    assert_eq!(s.payment.round_dp(2), dec!(106.07));
    assert_eq!(s.periods.last().unwrap().remaining_balance, dec!(0.00));
    // 120 * 106.0655 - 10,000 ≈ 2,727.86
    assert!(
        (s.total_interest_paid - dec!(2727.86)).abs() < dec!(0.01),
        "total interest {}",
        s.total_interest_paid
    );
}

#[test]
fn test_income_driven_monthly_known_payment() {
    let terms = loan(
        dec!(10000),
        dec!(5),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::IncomeDriven,
    );
    let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
    let s = &result.result;

    // 0.10 * (50,000 - 1.5 * 14,580) / 12 = 234.4166...
    assert_eq!(s.payment.round_dp(2), dec!(234.42));
    assert_eq!(s.nominal_periods, 240);
    assert_eq!(s.term_years, 20);
}

#[test]
fn test_zero_rate_weekly() {
    let terms = loan(
        dec!(10000),
        Decimal::ZERO,
        5,
        PaymentFrequency::Weekly,
        RepaymentPlan::Standard,
    );
    let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
    let s = &result.result;

    assert_eq!(s.nominal_periods, 260);
    assert_eq!(s.payment, dec!(10000) / dec!(260));
    assert_eq!(s.payment.round_dp(2), dec!(38.46));
    assert_eq!(s.total_interest_paid, Decimal::ZERO);
    assert!(s.periods.iter().all(|p| p.interest_paid.is_zero()));
    assert_eq!(
        s.periods.last().unwrap().accumulated_principal_paid,
        dec!(10000.00)
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_zero_rate_payment_is_principal_over_periods() {
    for (freq, years) in [
        (PaymentFrequency::Weekly, 3),
        (PaymentFrequency::BiWeekly, 7),
        (PaymentFrequency::Monthly, 15),
    ] {
        let nper = payment_math::period_count(freq, years).unwrap();
        let pmt = payment_math::fixed_annuity_payment(Decimal::ZERO, nper, dec!(25000)).unwrap();
        assert_eq!(pmt, dec!(25000) / Decimal::from(nper));
    }
}

#[test]
fn test_standard_balance_non_increasing() {
    for (rate, years, freq) in [
        (dec!(6.8), 10, PaymentFrequency::Monthly),
        (dec!(4.5), 25, PaymentFrequency::BiWeekly),
        (dec!(12), 5, PaymentFrequency::Weekly),
    ] {
        let terms = loan(dec!(35000), rate, years, freq, RepaymentPlan::Standard);
        let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
        let rows = &result.result.periods;
        assert!(rows[0].remaining_balance < dec!(35000));
        for pair in rows.windows(2) {
            assert!(
                pair[1].remaining_balance <= pair[0].remaining_balance,
                "balance rose at period {}",
                pair[1].period
            );
        }
    }
}

#[test]
fn test_elapsed_never_exceeds_nominal() {
    let cfg = EngineConfig::default();
    for plan in [RepaymentPlan::Standard, RepaymentPlan::IncomeDriven] {
        for freq in [
            PaymentFrequency::Weekly,
            PaymentFrequency::BiWeekly,
            PaymentFrequency::Monthly,
        ] {
            let terms = loan(dec!(20000), dec!(6), 10, freq, plan);
            let s = build_schedule(&terms, &cfg).unwrap().result;
            assert!(s.elapsed_periods <= s.nominal_periods);
            assert_eq!(s.periods.len() as u32, s.elapsed_periods);
            if s.elapsed_periods < s.nominal_periods {
                assert_eq!(s.periods.last().unwrap().remaining_balance, Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_early_termination_only_on_payoff() {
    // Income-driven payment of ~234/month clears 10,000 well inside 240 months
    let terms = loan(
        dec!(10000),
        dec!(5),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::IncomeDriven,
    );
    let s = build_schedule(&terms, &EngineConfig::default()).unwrap().result;
    assert!(s.elapsed_periods < s.nominal_periods);
    assert_eq!(s.periods.last().unwrap().remaining_balance, Decimal::ZERO);
    let before_last = &s.periods[s.periods.len() - 2];
    assert!(before_last.remaining_balance > Decimal::ZERO);
}

#[test]
fn test_income_driven_term_override_ignores_input() {
    let cfg = EngineConfig::default();
    let expected = income_driven_monthly_payment(dec!(50000), cfg.poverty_line);
    for requested in [1, 10, 30] {
        for (freq, nper) in [
            (PaymentFrequency::Weekly, 1040),
            (PaymentFrequency::BiWeekly, 520),
            (PaymentFrequency::Monthly, 240),
        ] {
            let terms = loan(dec!(90000), dec!(6), requested, freq, RepaymentPlan::IncomeDriven);
            let s = build_schedule(&terms, &cfg).unwrap().result;
            assert_eq!(s.term_years, 20);
            assert_eq!(s.nominal_periods, nper);
            assert_eq!(s.payment, expected);
        }
    }
}

#[test]
fn test_cumulative_totals_reconcile_with_payments() {
    let terms = loan(
        dec!(18000),
        dec!(7.25),
        12,
        PaymentFrequency::BiWeekly,
        RepaymentPlan::Standard,
    );
    let s = build_schedule(&terms, &EngineConfig::default()).unwrap().result;
    for row in &s.periods {
        let paid = s.payment * Decimal::from(row.period);
        let reconciled = row.accumulated_principal_paid + row.accumulated_interest_paid;
        assert!(
            (reconciled - paid).abs() <= dec!(0.011),
            "period {}: {} vs {}",
            row.period,
            reconciled,
            paid
        );
    }
}

#[test]
fn test_negative_amortization_is_warning_not_error() {
    let mut terms = loan(
        dec!(80000),
        dec!(8),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::IncomeDriven,
    );
    terms.adjusted_gross_income = dec!(40000);
    let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
    let s = &result.result;
    // ~151/month against ~533 of monthly interest
    assert_eq!(s.elapsed_periods, 240);
    assert!(s.periods.last().unwrap().remaining_balance > dec!(80000));
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_configured_poverty_line_changes_payment() {
    let terms = loan(
        dec!(10000),
        dec!(5),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::IncomeDriven,
    );
    let cfg = EngineConfig::default().with_poverty_line(dec!(20000));
    let s = build_schedule(&terms, &cfg).unwrap().result;
    // 0.10 * (50,000 - 30,000) / 12
    assert_eq!(s.payment, dec!(2000) / dec!(12));
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_validation_errors_name_the_field() {
    let cfg = EngineConfig::default();
    let base = loan(
        dec!(10000),
        dec!(5),
        10,
        PaymentFrequency::Monthly,
        RepaymentPlan::Standard,
    );

    let mut t = base.clone();
    t.principal = dec!(-1);
    let err = build_schedule(&t, &cfg).unwrap_err();
    assert!(matches!(err, LoanError::InvalidPrincipal { .. }));

    let mut t = base.clone();
    t.annual_rate_percent = dec!(-2);
    let err = build_schedule(&t, &cfg).unwrap_err();
    assert!(err.to_string().contains("annual_rate_percent"));

    let mut t = base.clone();
    t.term_years = 0;
    let err = build_schedule(&t, &cfg).unwrap_err();
    assert!(matches!(err, LoanError::InvalidTerm { .. }));
    assert!(err.to_string().contains("term_years"));
}

#[test]
fn test_unrealistic_term_rejected_before_iterating() {
    let terms = loan(
        dec!(10000),
        dec!(5),
        300_000_000,
        PaymentFrequency::Monthly,
        RepaymentPlan::Standard,
    );
    let err = build_schedule(&terms, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, LoanError::InvalidTerm { .. }));

    let terms = loan(
        dec!(10000),
        dec!(5),
        payment_math::MAX_TERM_YEARS,
        PaymentFrequency::Weekly,
        RepaymentPlan::Standard,
    );
    let result = build_schedule(&terms, &EngineConfig::default()).unwrap();
    assert_eq!(result.result.nominal_periods, 5200);
}

#[test]
fn test_high_rate_standard_loans_amortize() {
    for (principal, rate, years) in [
        (dec!(10000), dec!(60), 100),
        (dec!(1000000), dec!(300), 30),
    ] {
        let terms = loan(
            principal,
            rate,
            years,
            PaymentFrequency::Monthly,
            RepaymentPlan::Standard,
        );
        let schedule = build_schedule(&terms, &EngineConfig::default())
            .unwrap()
            .result;
        assert!(schedule.payment > Decimal::ZERO);
        assert!(schedule.elapsed_periods <= schedule.nominal_periods);
        for pair in schedule.periods.windows(2) {
            assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        }
    }
}

#[test]
fn test_unknown_frequency_rejected_at_boundary() {
    let json = r#"{
        "principal": 10000,
        "annual_rate_percent": 5,
        "term_years": 10,
        "frequency": "Quarterly",
        "plan": "Standard"
    }"#;
    let err = serde_json::from_str::<LoanTerms>(json).unwrap_err();
    assert!(err.to_string().contains("Quarterly"));
}

#[test]
fn test_terms_deserialize_with_labels() {
    let json = r#"{
        "principal": "10000",
        "annual_rate_percent": "5",
        "term_years": 10,
        "frequency": "Bi-weekly",
        "plan": "Income-driven",
        "adjusted_gross_income": "50000",
        "start_date": "2025-09-01"
    }"#;
    let terms: LoanTerms = serde_json::from_str(json).unwrap();
    assert_eq!(terms.frequency, PaymentFrequency::BiWeekly);
    assert_eq!(terms.plan, RepaymentPlan::IncomeDriven);
    assert!(terms.start_date.is_some());
}
