//! Disclosure trade-size ranges.

/// Range a disclosed trade amount falls into. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSizeBucket {
    Less1K,
    From1Kto15K,
    From15Kto50K,
    From50Kto100K,
    From100Kto250K,
    From250Kto500K,
    From500Kto1M,
    From1Mto5M,
    From5Mto25M,
    From25Mto50M,
    Over50M,
    /// Amount missing or not a finite number.
    Unknown,
}

impl TradeSizeBucket {
    pub fn from_amount(amount: Option<f64>) -> Self {
        let amount = match amount {
            Some(a) if a.is_finite() => a,
            _ => return Self::Unknown,
        };
        if amount < 1_000.0 {
            Self::Less1K
        } else if amount < 15_000.0 {
            Self::From1Kto15K
        } else if amount < 50_000.0 {
            Self::From15Kto50K
        } else if amount < 100_000.0 {
            Self::From50Kto100K
        } else if amount < 250_000.0 {
            Self::From100Kto250K
        } else if amount < 500_000.0 {
            Self::From250Kto500K
        } else if amount < 1_000_000.0 {
            Self::From500Kto1M
        } else if amount < 5_000_000.0 {
            Self::From1Mto5M
        } else if amount < 25_000_000.0 {
            Self::From5Mto25M
        } else if amount < 50_000_000.0 {
            Self::From25Mto50M
        } else {
            Self::Over50M
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Less1K => "< 1K",
            Self::From1Kto15K => "1K–15K",
            Self::From15Kto50K => "15K–50K",
            Self::From50Kto100K => "50K–100K",
            Self::From100Kto250K => "100K–250K",
            Self::From250Kto500K => "250K–500K",
            Self::From500Kto1M => "500K–1M",
            Self::From1Mto5M => "1M–5M",
            Self::From5Mto25M => "5M–25M",
            Self::From25Mto50M => "25M–50M",
            Self::Over50M => "50M+",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TradeSizeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_lower_inclusive() {
        assert_eq!(TradeSizeBucket::from_amount(Some(999.99)), TradeSizeBucket::Less1K);
        assert_eq!(TradeSizeBucket::from_amount(Some(1_000.0)), TradeSizeBucket::From1Kto15K);
        assert_eq!(TradeSizeBucket::from_amount(Some(15_000.0)), TradeSizeBucket::From15Kto50K);
        assert_eq!(TradeSizeBucket::from_amount(Some(1_000_000.0)), TradeSizeBucket::From1Mto5M);
        assert_eq!(TradeSizeBucket::from_amount(Some(49_999_999.0)), TradeSizeBucket::From25Mto50M);
        assert_eq!(TradeSizeBucket::from_amount(Some(50_000_000.0)), TradeSizeBucket::Over50M);
    }

    #[test]
    fn missing_or_non_finite_is_unknown() {
        assert_eq!(TradeSizeBucket::from_amount(None), TradeSizeBucket::Unknown);
        assert_eq!(TradeSizeBucket::from_amount(Some(f64::NAN)), TradeSizeBucket::Unknown);
        assert_eq!(TradeSizeBucket::from_amount(Some(f64::INFINITY)), TradeSizeBucket::Unknown);
    }

    #[test]
    fn labels() {
        assert_eq!(TradeSizeBucket::Less1K.to_string(), "< 1K");
        assert_eq!(TradeSizeBucket::From15Kto50K.to_string(), "15K–50K");
        assert_eq!(TradeSizeBucket::Over50M.to_string(), "50M+");
        assert_eq!(TradeSizeBucket::Unknown.to_string(), "Unknown");
    }
}
