//! Tests for the invoice preview builder.

use rstest::rstest;

use super::rules::{
    ADD_ON, BASE_PRICE, CARD_FEE, CONNECT, CROSS_BORDER, LineRule, PAYOUT, PROCESSING, SHIELD,
    TABLE_SERVICE, TAX, TRACKING,
};
use super::{
    DeliverableLinesContext, FEE_CASCADE_UNDER, PreviewConfig, Pricing, ProcessorFees, Product,
    ServicePlan, TipLinesContext, build_preview_lines, deliverable_lines, invoice_lines,
    tip_fee_lines,
};
use crate::line::{Account, Category, LineItem, LineType};
use crate::reckoning::{ReckonError, reckon};

fn plan(name: &str, tracking: &str, shield_static: &str, shield_percentage: &str) -> ServicePlan {
    ServicePlan {
        id: 1,
        name: name.to_string(),
        connection_fee_waived: false,
        per_deliverable_price: tracking.to_string(),
        shield_static_price: shield_static.to_string(),
        shield_percentage_price: shield_percentage.to_string(),
        max_simultaneous_orders: 5,
        waitlisting: false,
        paypal_invoicing: false,
    }
}

fn processor_fees() -> ProcessorFees {
    ProcessorFees {
        card_percentage: "2.9".into(),
        card_static: "0.30".into(),
        cross_border_percentage: "1.5".into(),
        connect_monthly_fee: "2.00".into(),
        payout_static: "0.25".into(),
        payout_percentage: "0.25".into(),
    }
}

/// "Basic" shields at 0.50 + 4% and tracks for free. "Landscape" tracks at
/// 1.00 per deliverable and has its connect fee waived.
fn schedule() -> Pricing {
    Pricing {
        plans: vec![
            plan("Basic", "0", "0.50", "4"),
            ServicePlan {
                id: 2,
                connection_fee_waived: true,
                ..plan("Landscape", "1.00", "0.75", "3")
            },
        ],
        minimum_price: "1.00".into(),
        table_percentage: "10".into(),
        table_static: "0.50".into(),
        table_tax: "8.25".into(),
        international_conversion_percentage: "1".into(),
        processing_percentage: "2".into(),
        processing_static: "0.10".into(),
        preferred_plan: "Landscape".into(),
        processor_fees: None,
    }
}

fn config(value: &str) -> PreviewConfig {
    PreviewConfig {
        plan_name: Some("Basic".into()),
        pricing: Some(schedule()),
        value: value.to_string(),
        product: None,
        escrow_enabled: true,
        international: false,
        cascade: false,
        user_id: Some(7),
        quantization: 2,
    }
}

fn product(base_price: &str, table_product: bool) -> Product {
    Product {
        id: 3,
        name: "Reference sheet".into(),
        base_price: base_price.to_string(),
        table_product,
        escrow_upgradable: true,
        escrow_enabled: true,
    }
}

fn ids(lines: &[LineItem]) -> Vec<i32> {
    lines.iter().map(|line| line.id).collect()
}

fn line(lines: &[LineItem], id: i32) -> &LineItem {
    lines.iter().find(|line| line.id == id).unwrap()
}

// ============================================================================
// Rules table
// ============================================================================

#[rstest]
#[case(BASE_PRICE, -1, 0, LineType::BasePrice, Account::Escrow)]
#[case(ADD_ON, -2, 100, LineType::AddOn, Account::Escrow)]
#[case(TABLE_SERVICE, -3, 400, LineType::TableService, Account::Reserve)]
#[case(TAX, -4, 700, LineType::Tax, Account::MoneyHoleStage)]
#[case(SHIELD, -5, 300, LineType::Shield, Account::Fund)]
#[case(TRACKING, -6, 300, LineType::DeliverableTracking, Account::Fund)]
#[case(CARD_FEE, -7, 350, LineType::CardFee, Account::Fund)]
#[case(CROSS_BORDER, -8, 325, LineType::CrossBorderTransferFee, Account::Fund)]
#[case(PAYOUT, -9, 325, LineType::PayoutFee, Account::Fund)]
#[case(CONNECT, -10, 325, LineType::ConnectFee, Account::Fund)]
#[case(PROCESSING, -11, 300, LineType::Processing, Account::Fund)]
fn test_rules_table(
    #[case] rule: LineRule,
    #[case] id: i32,
    #[case] priority: i16,
    #[case] kind: LineType,
    #[case] account: Account,
) {
    assert_eq!(rule.id, id);
    assert_eq!(rule.priority, priority);
    assert_eq!(rule.kind, kind);
    assert_eq!(rule.account, account);
}

#[test]
fn test_fee_lines_only_draw_from_base_and_add_ons() {
    let fee = SHIELD.fee("0.50".into(), "4".into(), true, false);
    assert_eq!(fee.cascade_under, Some(FEE_CASCADE_UNDER));
    assert!(fee.cascade_amount && fee.cascade_percentage);
    assert!(!fee.back_into_percentage);
    assert_eq!(fee.category, Some(Category::ShieldFee));
    assert_eq!(fee.destination_user, None);
    assert!(ADD_ON.priority < FEE_CASCADE_UNDER);
    assert!(SHIELD.priority > FEE_CASCADE_UNDER);
}

// ============================================================================
// Degradation
// ============================================================================

#[rstest]
#[case::no_plan(PreviewConfig { plan_name: None, ..config("25") })]
#[case::unknown_plan(PreviewConfig { plan_name: Some("Gold".into()), ..config("25") })]
#[case::no_pricing(PreviewConfig { pricing: None, ..config("25") })]
#[case::empty_value(config(""))]
#[case::non_numeric_value(config("twenty"))]
#[case::non_numeric_product_price(PreviewConfig { product: Some(product("soon", false)), ..config("25") })]
fn test_preview_unavailable(#[case] config: PreviewConfig) {
    assert!(build_preview_lines(&config).is_empty());
    assert!(matches!(
        invoice_lines(&config),
        Err(ReckonError::PreviewUnavailable(_))
    ));
}

#[test]
fn test_malformed_schedule_gives_no_preview() {
    let mut pricing = schedule();
    pricing.plans[0].shield_percentage_price = "four".into();
    let config = PreviewConfig {
        pricing: Some(pricing),
        ..config("25")
    };

    assert!(build_preview_lines(&config).is_empty());
    assert_eq!(
        invoice_lines(&config).unwrap_err(),
        ReckonError::InvalidPricing {
            field: "shield_percentage_price".into(),
            value: "four".into(),
        }
    );
}

#[test]
fn test_malformed_processor_fee_gives_no_preview() {
    let mut pricing = schedule();
    pricing.processor_fees = Some(ProcessorFees {
        card_static: String::new(),
        ..processor_fees()
    });
    let config = PreviewConfig {
        pricing: Some(pricing),
        ..config("25")
    };

    assert!(build_preview_lines(&config).is_empty());
    assert!(matches!(
        invoice_lines(&config),
        Err(ReckonError::InvalidPricing { field, .. }) if field == "card_static"
    ));
}

// ============================================================================
// Shield
// ============================================================================

#[test]
fn test_shield_added_on_top() {
    let lines = build_preview_lines(&config("25"));
    assert_eq!(ids(&lines), vec![-1, -5]);

    let base = line(&lines, -1);
    assert_eq!(base.amount, "25.00");
    assert_eq!(base.destination_account, Some(Account::Escrow));
    assert_eq!(base.destination_user, Some(7));
    assert!(!base.cascade_amount && !base.cascade_percentage);

    let shield = line(&lines, -5);
    assert_eq!(shield.amount, "0.50");
    assert_eq!(shield.percentage, "4");
    assert!(shield.back_into_percentage);
    assert!(!shield.cascade_amount && !shield.cascade_percentage);

    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "26.56");
    assert_eq!(calc.subtotals[&-1], "25.00");
    assert_eq!(calc.subtotals[&-5], "1.56");
}

#[test]
fn test_shield_taken_out_of_price() {
    let lines = build_preview_lines(&PreviewConfig {
        cascade: true,
        ..config("25")
    });
    let shield = line(&lines, -5);
    assert!(shield.cascade_amount && shield.cascade_percentage);
    assert!(!shield.back_into_percentage);

    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "25.00");
    assert_eq!(calc.subtotals[&-1], "23.50");
    assert_eq!(calc.subtotals[&-5], "1.50");
}

#[test]
fn test_international_surcharge_on_shield() {
    let lines = build_preview_lines(&PreviewConfig {
        international: true,
        ..config("25")
    });
    assert_eq!(line(&lines, -5).percentage, "5");
}

#[test]
fn test_zero_price_disables_shield() {
    let lines = build_preview_lines(&config("0"));
    assert_eq!(ids(&lines), vec![-1]);
    assert_eq!(line(&lines, -1).amount, "0.00");
}

// ============================================================================
// Products
// ============================================================================

#[test]
fn test_add_on_above_product_price() {
    let lines = build_preview_lines(&PreviewConfig {
        product: Some(product("20.00", false)),
        ..config("25")
    });
    assert_eq!(ids(&lines), vec![-1, -2, -5]);
    assert_eq!(line(&lines, -1).amount, "20.00");

    let add_on = line(&lines, -2);
    assert_eq!(add_on.amount, "5.00");
    assert_eq!(add_on.destination_account, Some(Account::Escrow));
    assert_eq!(add_on.destination_user, Some(7));
}

#[test]
fn test_no_add_on_below_product_price() {
    let lines = build_preview_lines(&PreviewConfig {
        product: Some(product("30.00", false)),
        ..config("25")
    });
    assert_eq!(ids(&lines), vec![-1, -5]);
    assert_eq!(line(&lines, -1).amount, "30.00");
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_table_product(#[case] cascade: bool) {
    let lines = build_preview_lines(&PreviewConfig {
        product: Some(product("10.00", true)),
        cascade,
        ..config("10")
    });
    assert_eq!(ids(&lines), vec![-1, -3, -4]);

    let service = line(&lines, -3);
    assert_eq!(service.amount, "0.50");
    assert_eq!(service.percentage, "10");
    assert_eq!(service.cascade_amount, cascade);
    assert_eq!(service.back_into_percentage, !cascade);
    assert_eq!(service.destination_account, Some(Account::Reserve));

    let tax = line(&lines, -4);
    assert_eq!(tax.percentage, "8.25");
    assert!(tax.back_into_percentage);
    assert_eq!(tax.cascade_percentage, cascade);
    assert_eq!(tax.destination_account, Some(Account::MoneyHoleStage));
}

// ============================================================================
// Tracking
// ============================================================================

#[test]
fn test_tracking_without_escrow() {
    let lines = build_preview_lines(&PreviewConfig {
        plan_name: Some("Landscape".into()),
        escrow_enabled: false,
        ..config("25")
    });
    assert_eq!(ids(&lines), vec![-1, -6]);

    let tracking = line(&lines, -6);
    assert_eq!(tracking.amount, "1.00");
    assert_eq!(tracking.category, Some(Category::SubscriptionDues));

    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "26.00");
}

#[test]
fn test_free_tracking_adds_nothing() {
    let lines = build_preview_lines(&PreviewConfig {
        escrow_enabled: false,
        ..config("25")
    });
    assert_eq!(ids(&lines), vec![-1]);
}

// ============================================================================
// Processor fees
// ============================================================================

fn with_processor_fees(config: PreviewConfig) -> PreviewConfig {
    let mut pricing = schedule();
    pricing.processor_fees = Some(processor_fees());
    PreviewConfig {
        pricing: Some(pricing),
        ..config
    }
}

#[rstest]
#[case::domestic("Basic", false, vec![-1, -5, -7, -9, -10])]
#[case::international("Basic", true, vec![-1, -5, -7, -9, -8, -10])]
#[case::connect_waived("Landscape", false, vec![-1, -5, -7, -9])]
fn test_processor_lines_with_escrow(
    #[case] plan_name: &str,
    #[case] international: bool,
    #[case] expected: Vec<i32>,
) {
    let lines = build_preview_lines(&with_processor_fees(PreviewConfig {
        plan_name: Some(plan_name.into()),
        international,
        ..config("25")
    }));
    assert_eq!(ids(&lines), expected);

    let card = line(&lines, -7);
    assert_eq!(card.amount, "0.30");
    assert_eq!(card.percentage, "2.9");
    assert!(!card.back_into_percentage);
    assert_eq!(card.category, Some(Category::ThirdPartyFee));
}

#[test]
fn test_no_processor_lines_without_escrow() {
    let lines = build_preview_lines(&with_processor_fees(PreviewConfig {
        escrow_enabled: false,
        ..config("25")
    }));
    assert_eq!(ids(&lines), vec![-1]);
}

#[test]
fn test_cascading_processor_lines_keep_total() {
    let lines = build_preview_lines(&with_processor_fees(PreviewConfig {
        cascade: true,
        ..config("25")
    }));
    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "25.00");
}

// ============================================================================
// Deliverable lines
// ============================================================================

fn deliverable(base_price: &str, extra_lines: Vec<LineItem>) -> DeliverableLinesContext {
    DeliverableLinesContext {
        base_price: base_price.to_string(),
        table_product: false,
        escrow_enabled: true,
        international: false,
        cascade: false,
        extra_lines,
        plan_name: Some("Basic".into()),
        pricing: Some(schedule()),
        user_id: Some(7),
        quantization: 2,
    }
}

#[test]
fn test_existing_base_price_suppresses_synthetic_one() {
    let existing = LineItem::new(12, LineType::BasePrice, 0).with_amount("30.00");
    let lines = deliverable_lines(&deliverable("not read", vec![existing])).unwrap();
    assert_eq!(ids(&lines), vec![12, -5]);
}

#[test]
fn test_extras_follow_synthetic_base() {
    let extra = LineItem::new(40, LineType::Extra, 100).with_amount("5.00");
    let lines = deliverable_lines(&deliverable("20.00", vec![extra])).unwrap();
    assert_eq!(ids(&lines), vec![-1, 40, -5]);

    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "26.56");
}

#[test]
fn test_non_numeric_deliverable_base() {
    assert!(matches!(
        deliverable_lines(&deliverable("TBD", Vec::new())),
        Err(ReckonError::PreviewUnavailable(_))
    ));
}

#[test]
fn test_invalid_extra_line_is_reported() {
    let extra = LineItem::new(40, LineType::Extra, 100).with_amount("5,00");
    assert!(matches!(
        deliverable_lines(&deliverable("20.00", vec![extra])),
        Err(ReckonError::InvalidDecimal { .. })
    ));
}

// ============================================================================
// Tips
// ============================================================================

#[test]
fn test_tip_without_schedule() {
    let context = TipLinesContext {
        pricing: None,
        international: false,
    };
    assert!(matches!(
        tip_fee_lines(&context),
        Err(ReckonError::PreviewUnavailable(_))
    ));
}

#[test]
fn test_tip_processing_comes_out_of_tip() {
    let fees = tip_fee_lines(&TipLinesContext {
        pricing: Some(schedule()),
        international: false,
    })
    .unwrap();
    assert_eq!(ids(&fees), vec![-11]);

    let processing = &fees[0];
    assert_eq!(processing.amount, "0.10");
    assert_eq!(processing.percentage, "2");
    assert!(processing.cascade_amount && processing.cascade_percentage);
    assert_eq!(processing.category, Some(Category::ProcessingFee));

    let mut lines = vec![LineItem::new(1, LineType::Tip, 0).with_amount("10.00")];
    lines.extend(fees);
    let calc = reckon(&lines, 2).unwrap();
    assert_eq!(calc.total, "10.00");
    assert_eq!(calc.subtotals[&1], "9.70");
    assert_eq!(calc.subtotals[&-11], "0.30");
}

#[test]
fn test_international_tip_with_processor_fees() {
    let mut pricing = schedule();
    pricing.processor_fees = Some(processor_fees());
    let fees = tip_fee_lines(&TipLinesContext {
        pricing: Some(pricing),
        international: true,
    })
    .unwrap();
    assert_eq!(ids(&fees), vec![-11, -7, -9, -8]);
    assert_eq!(fees[0].percentage, "3");
    assert!(fees.iter().all(|fee| fee.cascade_amount));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_preview_config_from_json() {
    let config: PreviewConfig = serde_json::from_str(
        r#"{
            "plan_name": "Basic",
            "value": "25",
            "escrow_enabled": true,
            "pricing": {"plans": [{"name": "Basic", "shield_static_price": "0.50", "shield_percentage_price": "4"}]}
        }"#,
    )
    .unwrap();
    assert_eq!(config.quantization, 2);
    assert!(!config.cascade);

    let calc = reckon(&build_preview_lines(&config), 2).unwrap();
    assert_eq!(calc.total, "26.56");
}
