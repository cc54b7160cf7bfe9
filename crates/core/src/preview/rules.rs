//! Placement and routing of every synthesised line.

use super::pricing::{ProcessorFees, schedule_text};
use crate::line::{Account, Category, LineItem, LineType};
use crate::reckoning::ReckonError;

/// Fee lines only draw from lines below this priority: the base price and
/// add-ons.
pub const FEE_CASCADE_UNDER: i16 = 201;

/// Where a synthesised line sits and where its money goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineRule {
    pub id: i32,
    pub priority: i16,
    pub kind: LineType,
    pub category: Category,
    pub account: Account,
}

macro_rules! rule {
    ($name:ident, $id:literal, $priority:literal, $kind:ident, $category:ident, $account:ident) => {
        pub(crate) const $name: LineRule = LineRule {
            id: $id,
            priority: $priority,
            kind: LineType::$kind,
            category: Category::$category,
            account: Account::$account,
        };
    };
}

rule!(BASE_PRICE, -1, 0, BasePrice, EscrowHold, Escrow);
rule!(ADD_ON, -2, 100, AddOn, EscrowHold, Escrow);
rule!(TABLE_SERVICE, -3, 400, TableService, TableHandling, Reserve);
rule!(TAX, -4, 700, Tax, Taxes, MoneyHoleStage);
rule!(SHIELD, -5, 300, Shield, ShieldFee, Fund);
rule!(TRACKING, -6, 300, DeliverableTracking, SubscriptionDues, Fund);
rule!(CARD_FEE, -7, 350, CardFee, ThirdPartyFee, Fund);
rule!(CROSS_BORDER, -8, 325, CrossBorderTransferFee, ThirdPartyFee, Fund);
rule!(PAYOUT, -9, 325, PayoutFee, ThirdPartyFee, Fund);
rule!(CONNECT, -10, 325, ConnectFee, ThirdPartyFee, Fund);
rule!(PROCESSING, -11, 300, Processing, ProcessingFee, Fund);

impl LineRule {
    /// A plain line owned by `user`.
    pub(crate) fn priced(self, amount: String, user: Option<i64>) -> LineItem {
        LineItem::new(self.id, self.kind, self.priority)
            .with_amount(amount)
            .routed_to(self.account, user)
            .categorized(self.category)
    }

    /// A platform fee line drawing only from the base price and add-ons.
    pub(crate) fn fee(
        self,
        amount: String,
        percentage: String,
        cascade: bool,
        back_into: bool,
    ) -> LineItem {
        self.priced(amount, None)
            .with_percentage(percentage)
            .cascading(cascade)
            .backing_into(back_into)
            .cascading_under(FEE_CASCADE_UNDER)
    }
}

/// Lines for what the card processor takes on a handled payment.
pub(crate) fn processor_lines(
    fees: &ProcessorFees,
    international: bool,
    charge_connect_fee: bool,
    cascade: bool,
) -> Result<Vec<LineItem>, ReckonError> {
    let mut lines = vec![
        CARD_FEE.fee(
            schedule_text("card_static", &fees.card_static)?,
            schedule_text("card_percentage", &fees.card_percentage)?,
            cascade,
            false,
        ),
        PAYOUT.fee(
            schedule_text("payout_static", &fees.payout_static)?,
            schedule_text("payout_percentage", &fees.payout_percentage)?,
            cascade,
            false,
        ),
    ];
    if international {
        lines.push(CROSS_BORDER.fee(
            "0".to_string(),
            schedule_text("cross_border_percentage", &fees.cross_border_percentage)?,
            cascade,
            false,
        ));
    }
    if charge_connect_fee {
        lines.push(CONNECT.fee(
            schedule_text("connect_monthly_fee", &fees.connect_monthly_fee)?,
            "0".to_string(),
            cascade,
            false,
        ));
    }
    Ok(lines)
}
