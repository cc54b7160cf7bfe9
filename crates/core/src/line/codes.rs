//! Integer-coded enums carried on line items.
//!
//! Every enum here travels as a bare `u16` on the wire. Codes this build does
//! not recognise deserialise into `Unknown(code)` and serialise back to the
//! same code, so newer producers never break older consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to generate integer-coded enums with a forward-compatible catch-all.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "u16", into = "u16")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A code this build does not know.
            Unknown(u16),
        }

        impl $name {
            /// Returns the wire code.
            #[must_use]
            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => code,
                }
            }

            /// Returns the human-readable label. Unknown codes read as "Other".
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unknown(_) => "Other",
                }
            }

            /// Returns true if the code is not one this build knows.
            #[must_use]
            pub const fn is_unknown(self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl From<u16> for $name {
            fn from(code: u16) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

coded_enum! {
    /// What a line item is for.
    LineType {
        /// Price of the product or deliverable itself.
        BasePrice = 0 => "Base Price",
        /// Add-on, or a discount when negative.
        AddOn = 1 => "Add-on",
        /// Escrow service fee.
        Shield = 2 => "Shield",
        /// Legacy subscriber bonus.
        Bonus = 3 => "Bonus",
        /// Tip to the artist.
        Tip = 4 => "Tip",
        /// Fee for sales run through the virtual table.
        TableService = 5 => "Table Service",
        /// Tax.
        Tax = 6 => "Tax",
        /// Merchandise sold alongside a table commission.
        Extra = 7 => "Extra",
        /// Premium subscription dues.
        PremiumSubscription = 8 => "Premium Subscription",
        /// Any uncategorised fee.
        OtherFee = 9 => "Other Fee",
        /// Fee for tracking an order without escrow.
        DeliverableTracking = 10 => "Deliverable Tracking",
        /// Light processing fee, e.g. on tips.
        Processing = 11 => "Processing",
        /// Discrepancy against an externally managed invoice.
        Reconciliation = 12 => "Reconciliation",
        /// Expected card processor charge.
        CardFee = 13 => "Card Fee",
        /// Processor charge for paying out across borders.
        CrossBorderTransferFee = 14 => "Cross-Border Transfer Fee",
        /// Processor charge for sending a payout.
        PayoutFee = 15 => "Payout Fee",
        /// Monthly processor charge for an active connected account.
        ConnectFee = 16 => "Connect Fee",
    }
}

coded_enum! {
    /// Bookkeeping category used when the line is later turned into
    /// transactions.
    Category {
        /// Escrow service fee.
        ShieldFee = 400 => "Shield Fee",
        /// Money held in escrow.
        EscrowHold = 401 => "Escrow Hold",
        /// Money released from escrow.
        EscrowRelease = 402 => "Escrow Release",
        /// Money returned to the buyer from escrow.
        EscrowRefund = 403 => "Escrow Refund",
        /// Subscription dues.
        SubscriptionDues = 404 => "Subscription Dues",
        /// Refunded subscription dues.
        SubscriptionRefund = 405 => "Subscription Refund",
        /// Payout.
        CashWithdrawal = 406 => "Cash Withdrawal",
        /// Fee charged by a third-party provider.
        ThirdPartyFee = 408 => "Third Party Fee",
        /// Legacy premium bonus.
        PremiumBonus = 409 => "Premium Bonus",
        /// Transfer between internal accounts.
        InternalTransfer = 410 => "Internal Transfer",
        /// Refund from a third-party provider.
        ThirdPartyRefunds = 411 => "Third Party Refunds",
        /// Manual correction.
        Correction = 412 => "Correction",
        /// Table handling fee.
        TableHandling = 413 => "Table Handling",
        /// Taxes.
        Taxes = 414 => "Taxes",
        /// Extra item sold at a table.
        ExtraItem = 415 => "Extra Item",
        /// Payment to a vendor.
        VendorPayment = 416 => "Vendor Payment",
        /// Reversed payout.
        PayoutReversal = 417 => "Payout Reversal",
        /// Light processing fee.
        ProcessingFee = 418 => "Processing Fee",
        /// Tip.
        TipSend = 419 => "Tip Send",
        /// Incoming payment before it is split.
        Payment = 420 => "Payment",
        /// Top-up covering otherwise unaccounted fees.
        TopUp = 421 => "Top Up",
    }
}

coded_enum! {
    /// Account a line item's money settles into.
    Account {
        /// Buyer's card.
        Card = 300 => "Card",
        /// Seller's payout account.
        PayoutAccount = 301 => "Payout Account",
        /// Escrow holdings for a user.
        Escrow = 302 => "Escrow",
        /// Finalised earnings.
        Holdings = 303 => "Holdings",
        /// Reserve.
        Reserve = 304 => "Reserve",
        /// Legacy unprocessed earnings.
        UnprocessedEarnings = 305 => "Unprocessed Earnings",
        /// Card transaction fees paid out.
        CardTransactionFees = 306 => "Card Transaction Fees",
        /// Card fees not tied to a transaction.
        CardMiscFees = 307 => "Card Misc Fees",
        /// Bank transfer fees.
        BankTransferFees = 308 => "Bank Transfer Fees",
        /// Other bank fees.
        BankMiscFees = 309 => "Bank Misc Fees",
        /// Tax held until the order is finalised.
        MoneyHoleStage = 310 => "Money Hole Stage",
        /// Remitted taxes.
        MoneyHole = 311 => "Money Hole",
        /// Unrecoverable losses.
        FraudLoss = 312 => "Fraud Loss",
        /// Staging account for an incoming charge before it is split.
        Fund = 313 => "Fund",
        /// Money on its way out through a payout.
        PayoutExtract = 314 => "Payout Extract",
        /// Cash handed over in person.
        CashDeposit = 407 => "Cash Deposit",
        /// Source side of payout currency mirroring.
        PayoutMirrorSource = 500 => "Payout Mirror Source",
        /// Destination side of payout currency mirroring.
        PayoutMirrorDestination = 501 => "Payout Mirror Destination",
    }
}
