use crate::domain::money::{Amount, Balance};
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Card,
    Wallet,
}

/// A payment method with a balance invariant.
///
/// The two variants share one operation set; adding an instrument kind means
/// adding a variant here, not branching elsewhere. `charge` and `credit` are
/// the only balance mutators, and a charge either moves the full amount or
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentInstrument {
    Card { number: String, balance: Balance },
    Wallet { email: String, balance: Balance },
}

fn validate_opening_balance(balance: Decimal) -> Result<Balance> {
    if balance < Decimal::ZERO {
        return Err(ShopError::Validation(
            "opening balance cannot be negative".to_string(),
        ));
    }
    Ok(Balance::new(balance))
}

/// Minimal `local@domain.tld` shape check.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

impl PaymentInstrument {
    pub fn card(number: impl Into<String>, balance: Decimal) -> Result<Self> {
        let number = number.into();
        if number.len() != 16 || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ShopError::InvalidInstrument(
                "card number must be exactly 16 digits".to_string(),
            ));
        }
        Ok(Self::Card {
            number,
            balance: validate_opening_balance(balance)?,
        })
    }

    pub fn wallet(email: impl Into<String>, balance: Decimal) -> Result<Self> {
        let email = email.into();
        if !is_valid_email(&email) {
            return Err(ShopError::InvalidInstrument(
                "wallet email must look like local@domain.tld".to_string(),
            ));
        }
        Ok(Self::Wallet {
            email,
            balance: validate_opening_balance(balance)?,
        })
    }

    pub fn kind(&self) -> InstrumentKind {
        match self {
            Self::Card { .. } => InstrumentKind::Card,
            Self::Wallet { .. } => InstrumentKind::Wallet,
        }
    }

    /// Masked, display-safe descriptor.
    pub fn describe(&self) -> String {
        match self {
            Self::Card { number, .. } => {
                format!("credit card ending in {}", &number[number.len() - 4..])
            }
            Self::Wallet { email, .. } => format!("wallet {email}"),
        }
    }

    pub fn balance(&self) -> Balance {
        match self {
            Self::Card { balance, .. } | Self::Wallet { balance, .. } => *balance,
        }
    }

    /// Debits `amount`, failing without mutation when funds are short.
    pub fn charge(&mut self, amount: Amount) -> Result<()> {
        if self.balance() < Balance::from(amount) {
            return Err(ShopError::InsufficientFunds {
                instrument: self.describe(),
            });
        }
        match self {
            Self::Card { balance, .. } | Self::Wallet { balance, .. } => {
                *balance -= Balance::from(amount);
            }
        }
        Ok(())
    }

    /// Credits `amount`. Positivity is enforced by the [`Amount`] type.
    pub fn credit(&mut self, amount: Amount) {
        match self {
            Self::Card { balance, .. } | Self::Wallet { balance, .. } => {
                *balance += Balance::from(amount);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_card_number_validation() {
        assert!(PaymentInstrument::card("1234567890123456", dec!(100.0)).is_ok());
        assert!(matches!(
            PaymentInstrument::card("12345", dec!(100.0)),
            Err(ShopError::InvalidInstrument(_))
        ));
        assert!(matches!(
            PaymentInstrument::card("1234567890abcdef", dec!(100.0)),
            Err(ShopError::InvalidInstrument(_))
        ));
    }

    #[test]
    fn test_wallet_email_validation() {
        assert!(PaymentInstrument::wallet("user@example.com", dec!(50.0)).is_ok());
        for bad in ["user", "@example.com", "user@example", "user@.com", "a@b@c.com"] {
            assert!(
                matches!(
                    PaymentInstrument::wallet(bad, dec!(50.0)),
                    Err(ShopError::InvalidInstrument(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_negative_opening_balance() {
        assert!(matches!(
            PaymentInstrument::card("1234567890123456", dec!(-0.01)),
            Err(ShopError::Validation(_))
        ));
    }

    #[test]
    fn test_charge_and_credit() {
        let mut card = PaymentInstrument::card("1234567890123456", dec!(100.0)).unwrap();
        card.charge(Amount::new(dec!(40.0)).unwrap()).unwrap();
        assert_eq!(card.balance(), Balance::new(dec!(60.0)));

        card.credit(Amount::new(dec!(15.5)).unwrap());
        assert_eq!(card.balance(), Balance::new(dec!(75.5)));
    }

    #[test]
    fn test_charge_insufficient_funds() {
        let mut wallet = PaymentInstrument::wallet("user@example.com", dec!(50.0)).unwrap();
        let result = wallet.charge(Amount::new(dec!(200.0)).unwrap());
        assert!(matches!(result, Err(ShopError::InsufficientFunds { .. })));
        // no partial debit
        assert_eq!(wallet.balance(), Balance::new(dec!(50.0)));
    }

    #[test]
    fn test_describe_masks_card() {
        let card = PaymentInstrument::card("1234567890123456", dec!(0.0)).unwrap();
        assert_eq!(card.describe(), "credit card ending in 3456");
        assert_eq!(card.kind(), InstrumentKind::Card);
    }
}
