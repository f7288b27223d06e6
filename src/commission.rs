use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Payment channels and their commission rules.
///
/// Unknown identifiers parse to [`Channel::Unspecified`], which charges nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    CajaLocal,
    BankSmall,
    BankPercent,
    RegionalBank,
    CardGateway,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::CajaLocal,
        Channel::BankSmall,
        Channel::BankPercent,
        Channel::RegionalBank,
        Channel::CardGateway,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Channel::CajaLocal => "caja_local",
            Channel::BankSmall => "bank_small",
            Channel::BankPercent => "bank_percent",
            Channel::RegionalBank => "regional_bank",
            Channel::CardGateway => "card_gateway",
            Channel::Unspecified => "",
        }
    }

    /// Label for the channel picker.
    pub fn label(self) -> &'static str {
        match self {
            Channel::CajaLocal => "Caja de la institución",
            Channel::BankSmall => "Agente bancario (hasta S/ 144)",
            Channel::BankPercent => "Ventanilla bancaria (más de S/ 144)",
            Channel::RegionalBank => "Caja regional",
            Channel::CardGateway => "Pago con tarjeta en línea",
            Channel::Unspecified => "Sin canal",
        }
    }

    /// Unrounded surcharge for `base`.
    pub fn commission(self, base: Decimal) -> Decimal {
        match self {
            Channel::CajaLocal if base >= Decimal::from(20) => Decimal::ONE,
            Channel::BankSmall if base > Decimal::ZERO && base <= Decimal::from(144) => {
                Decimal::new(180, 2)
            }
            Channel::BankPercent if base > Decimal::from(144) => base * Decimal::new(125, 4),
            Channel::RegionalBank => Decimal::ONE,
            Channel::CardGateway => base * Decimal::new(58, 3),
            _ => Decimal::ZERO,
        }
    }
}

impl From<&str> for Channel {
    fn from(id: &str) -> Self {
        let id = id.trim();
        Channel::ALL
            .into_iter()
            .find(|channel| channel.id().eq_ignore_ascii_case(id))
            .unwrap_or(Channel::Unspecified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub commission: Decimal,
    pub total: Decimal,
}

/// Rounds to cents, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn estimate(base: Decimal, channel: Channel) -> Estimate {
    let commission = round_money(channel.commission(base));
    Estimate {
        commission,
        total: round_money(base + commission),
    }
}
