//! Payment history models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::temporal::TemporalRecord;

/// Money flow relative to the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    Received,
    Sent,
}

/// A payment history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: String,
    /// Patient or vendor name
    pub counterparty: String,
    pub date: String,
    pub amount: f64,
    pub direction: PaymentDirection,
}

impl Payment {
    /// Amount with a direction sign, e.g. `+$150` or `-$12.50`.
    pub fn signed_label(&self) -> String {
        let sign = match self.direction {
            PaymentDirection::Received => '+',
            PaymentDirection::Sent => '-',
        };
        if self.amount.fract() == 0.0 {
            format!("{sign}${:.0}", self.amount)
        } else {
            format!("{sign}${:.2}", self.amount)
        }
    }
}

impl TemporalRecord for Payment {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.date
    }
}

/// Filter tabs on the payment history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentFilter {
    #[default]
    All,
    Received,
    Sent,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Received => payment.direction == PaymentDirection::Received,
            PaymentFilter::Sent => payment.direction == PaymentDirection::Sent,
        }
    }
}

impl fmt::Display for PaymentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentFilter::All => "All",
            PaymentFilter::Received => "Received",
            PaymentFilter::Sent => "Sent",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(PaymentFilter::All),
            "received" => Ok(PaymentFilter::Received),
            "sent" => Ok(PaymentFilter::Sent),
            _ => Err(ModelError::UnknownValue {
                kind: "payment filter",
                value: s.to_string(),
            }),
        }
    }
}

/// Keep payments matching the selected tab, in input order.
pub fn filter_payments(payments: &[Payment], filter: PaymentFilter) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(id: &str, amount: f64, direction: PaymentDirection) -> Payment {
        Payment {
            id: id.into(),
            counterparty: "John Doe".into(),
            date: "2024-07-10".into(),
            amount,
            direction,
        }
    }

    #[test]
    fn test_signed_label() {
        assert_eq!(payment("1", 150.0, PaymentDirection::Received).signed_label(), "+$150");
        assert_eq!(payment("2", 500.0, PaymentDirection::Sent).signed_label(), "-$500");
        assert_eq!(payment("3", 12.5, PaymentDirection::Sent).signed_label(), "-$12.50");
    }

    #[test]
    fn test_filter_payments() {
        let payments = vec![
            payment("1", 150.0, PaymentDirection::Received),
            payment("2", 500.0, PaymentDirection::Sent),
            payment("3", 175.0, PaymentDirection::Received),
        ];

        assert_eq!(filter_payments(&payments, PaymentFilter::All).len(), 3);

        let received: Vec<_> = filter_payments(&payments, PaymentFilter::Received)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(received, ["1", "3"]);

        let sent = filter_payments(&payments, PaymentFilter::Sent);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, "2");
    }

    #[test]
    fn test_parse_filter_tab_labels() {
        assert_eq!("All".parse::<PaymentFilter>().unwrap(), PaymentFilter::All);
        assert_eq!("Received".parse::<PaymentFilter>().unwrap(), PaymentFilter::Received);
        assert_eq!("sent".parse::<PaymentFilter>().unwrap(), PaymentFilter::Sent);
        assert_eq!(
            "refunded".parse::<PaymentFilter>(),
            Err(ModelError::UnknownValue {
                kind: "payment filter",
                value: "refunded".into()
            })
        );
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&PaymentDirection::Received).unwrap();
        assert_eq!(json, "\"received\"");
    }
}
