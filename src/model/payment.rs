use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// How an attendee pays for a priced ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    MobileMoney,
    CreditCard,
    BankTransfer,
}

impl PaymentMethod {
    /// Methods in the order the payment step offers them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::MobileMoney,
        PaymentMethod::CreditCard,
        PaymentMethod::BankTransfer,
    ];

    /// Stable id, matching the serde representation.
    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    /// Name recorded on the issued ticket.
    pub fn name(self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "Mobile Money",
            PaymentMethod::CreditCard => "Credit/Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    /// One-line blurb shown next to the method on the payment step.
    pub fn description(self) -> &'static str {
        match self {
            PaymentMethod::MobileMoney => "Pay with MTN Mobile Money or Airtel Money",
            PaymentMethod::CreditCard => "Pay with Visa, Mastercard, or local cards",
            PaymentMethod::BankTransfer => "Direct bank transfer",
        }
    }

    /// Fields the details step shows for this method.
    pub fn detail_fields(self) -> &'static [PaymentField] {
        match self {
            PaymentMethod::MobileMoney => &[PaymentField::PhoneNumber],
            PaymentMethod::CreditCard => &[
                PaymentField::CardholderName,
                PaymentField::CardNumber,
                PaymentField::ExpiryDate,
                PaymentField::Cvv,
            ],
            PaymentMethod::BankTransfer => &[PaymentField::BankAccount],
        }
    }

    /// Notice shown under the details form, if any.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            PaymentMethod::MobileMoney => Some(
                "You will receive a payment prompt on your phone to complete the transaction.",
            ),
            PaymentMethod::CreditCard => None,
            PaymentMethod::BankTransfer => {
                Some("Bank transfer payments may take 1-3 business days to process.")
            }
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An input on the payment details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentField {
    CardholderName,
    CardNumber,
    ExpiryDate,
    Cvv,
    PhoneNumber,
    BankAccount,
}

/// Values typed into the details form, keyed by field.
///
/// Values are stored verbatim. Nothing here checks that a phone number looks like one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields(BTreeMap<PaymentField, String>);

impl FormFields {
    pub fn set(&mut self, field: PaymentField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: PaymentField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
