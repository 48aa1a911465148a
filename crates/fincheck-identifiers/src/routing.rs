//! ABA routing symbol classification
//!
//! The first two digits of a routing transit number name the kind of
//! institution it was assigned to. This is informational: an unassigned
//! prefix does not make an otherwise checksum-valid number invalid.

use serde::{Deserialize, Serialize};

use crate::family::IdentifierFamily;
use crate::validators::Identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum RoutingSymbol {
    /// 00
    UsGovernment,
    /// 01–12, one of the twelve Federal Reserve districts
    FederalReserve,
    /// 21–32, thrift institutions
    Thrift,
    /// 61–72, electronic transactions
    Electronic,
    /// 80, traveler's cheques
    TravelersCheque,
}

impl RoutingSymbol {
    /// Classify a two-digit routing prefix
    pub fn classify(prefix: u8) -> Option<Self> {
        match prefix {
            0 => Some(RoutingSymbol::UsGovernment),
            1..=12 => Some(RoutingSymbol::FederalReserve),
            21..=32 => Some(RoutingSymbol::Thrift),
            61..=72 => Some(RoutingSymbol::Electronic),
            80 => Some(RoutingSymbol::TravelersCheque),
            _ => None,
        }
    }

    /// Federal Reserve district (1–12) served by a routing prefix
    ///
    /// Thrift and electronic prefixes are offset by 20 and 60 from the
    /// district they belong to.
    pub fn district(prefix: u8) -> Option<u8> {
        match Self::classify(prefix)? {
            RoutingSymbol::FederalReserve => Some(prefix),
            RoutingSymbol::Thrift => Some(prefix - 20),
            RoutingSymbol::Electronic => Some(prefix - 60),
            RoutingSymbol::UsGovernment | RoutingSymbol::TravelersCheque => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RoutingSymbol::UsGovernment => "US Government",
            RoutingSymbol::FederalReserve => "Federal Reserve bank",
            RoutingSymbol::Thrift => "Thrift institution",
            RoutingSymbol::Electronic => "Electronic transaction",
            RoutingSymbol::TravelersCheque => "Traveler's cheque",
        }
    }
}

/// Two-digit prefix of a validated ABA number
pub fn routing_prefix(id: &Identifier) -> Option<u8> {
    if id.family() != IdentifierFamily::Aba {
        return None;
    }
    id.as_str().get(..2)?.parse().ok()
}

/// Routing symbol class of a validated ABA number; `None` for other families
/// and for unassigned prefixes
pub fn routing_symbol(id: &Identifier) -> Option<RoutingSymbol> {
    routing_prefix(id).and_then(RoutingSymbol::classify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{validate_aba, validate_cusip};

    #[test]
    fn test_classify_ranges() {
        assert_eq!(RoutingSymbol::classify(0), Some(RoutingSymbol::UsGovernment));
        assert_eq!(RoutingSymbol::classify(1), Some(RoutingSymbol::FederalReserve));
        assert_eq!(RoutingSymbol::classify(12), Some(RoutingSymbol::FederalReserve));
        assert_eq!(RoutingSymbol::classify(13), None);
        assert_eq!(RoutingSymbol::classify(21), Some(RoutingSymbol::Thrift));
        assert_eq!(RoutingSymbol::classify(32), Some(RoutingSymbol::Thrift));
        assert_eq!(RoutingSymbol::classify(61), Some(RoutingSymbol::Electronic));
        assert_eq!(RoutingSymbol::classify(72), Some(RoutingSymbol::Electronic));
        assert_eq!(RoutingSymbol::classify(80), Some(RoutingSymbol::TravelersCheque));
        assert_eq!(RoutingSymbol::classify(99), None);
    }

    #[test]
    fn test_district() {
        assert_eq!(RoutingSymbol::district(2), Some(2));
        assert_eq!(RoutingSymbol::district(32), Some(12));
        assert_eq!(RoutingSymbol::district(61), Some(1));
        assert_eq!(RoutingSymbol::district(80), None);
        assert_eq!(RoutingSymbol::district(50), None);
    }

    #[test]
    fn test_routing_symbol_of_identifier() {
        let boston_fed = validate_aba("011000015").unwrap();
        assert_eq!(routing_symbol(&boston_fed), Some(RoutingSymbol::FederalReserve));

        let thrift = validate_aba("322070093").unwrap();
        assert_eq!(routing_symbol(&thrift), Some(RoutingSymbol::Thrift));
    }

    #[test]
    fn test_routing_symbol_other_family() {
        let cusip = validate_cusip("037833100").unwrap();
        assert_eq!(routing_symbol(&cusip), None);
    }
}
