use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::XmlSearchError;

/// Region codes accepted by the `lr` parameter.
///
/// See <https://yandex.ru/dev/xml/doc/dg/reference/regions.html>
pub const AVAILABLE_REGIONS: [u32; 65] = [
    225, 187, 149, 159, 20, 1092, 37, 30, 197, 47, 4, 65, 77, 66, 191, 10, 24, 48, 75, 49, 33, 50,
    192, 25, 38, 39, 21, 11, 193, 51, 1106, 2, 54, 42, 5, 12, 63, 239, 41, 36, 43, 973, 22, 13,
    64, 14, 7, 67, 35, 15, 62, 195, 53, 172, 8, 76, 9, 45, 28, 56, 1, 1104, 213, 16, 23,
];

static REGION_SET: Lazy<HashSet<u32>> = Lazy::new(|| AVAILABLE_REGIONS.iter().copied().collect());

/// Check whether a region id is on the allow-list
pub fn is_valid_region(id: u32) -> bool {
    REGION_SET.contains(&id)
}

/// Generates `as_str`, `Display`, `FromStr` and serde impls for a wire-coded enum.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Value sent to the API
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = XmlSearchError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(XmlSearchError::InvalidArgument(format!(
                        "unknown {}: '{}'",
                        $what, other
                    ))),
                }
            }
        }
    };
}

wire_enum! {
    /// Search domain, selects the endpoint host suffix
    Domain, "domain" {
        /// yandex.ru
        Ru => "ru",
        /// yandex.com.tr
        ComTr => "com.tr",
        /// yandex.com
        Com => "com",
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::Ru
    }
}

wire_enum! {
    /// Response language (`l10n`)
    Language, "response language" {
        Ru => "ru",
        Uk => "uk",
        Be => "be",
        Kk => "kk",
        /// Only available on `Domain::ComTr`
        Tr => "tr",
        /// Only available on `Domain::Com`
        En => "en",
    }
}

impl Language {
    /// Whether this language may be requested on the given domain
    pub fn is_allowed_on(&self, domain: Domain) -> bool {
        match self {
            Self::Tr => domain == Domain::ComTr,
            Self::En => domain == Domain::Com,
            _ => true,
        }
    }
}

wire_enum! {
    /// Sorting type
    SortType, "sort type" {
        /// Relevance
        Rlv => "rlv",
        /// Time of modification
        Tm => "tm",
    }
}

wire_enum! {
    /// Sorting direction, only meaningful for `SortType::Tm`
    SortDirection, "sort direction" {
        Ascending => "ascending",
        Descending => "descending",
    }
}

wire_enum! {
    /// Family filter level
    FilterLevel, "filter level" {
        Strict => "strict",
        Moderate => "moderate",
        None => "none",
    }
}

wire_enum! {
    /// Result grouping mode
    GroupMode, "group mode" {
        Flat => "flat",
        Deep => "deep",
    }
}

wire_enum! {
    /// Non-search actions
    Action, "action" {
        /// Day and hour request limits
        LimitsInfo => "limits-info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_table() {
        assert_eq!(REGION_SET.len(), AVAILABLE_REGIONS.len());
        assert!(is_valid_region(213));
        assert!(is_valid_region(1106));
        assert!(!is_valid_region(0));
        assert!(!is_valid_region(214));
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(Domain::ComTr.as_str(), "com.tr");
        assert_eq!(Action::LimitsInfo.to_string(), "limits-info");
        assert_eq!("descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!("none".parse::<FilterLevel>().unwrap(), FilterLevel::None);
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert!(matches!(
            "de".parse::<Language>(),
            Err(XmlSearchError::InvalidArgument(_))
        ));
        assert!("desc".parse::<SortDirection>().is_err());
        assert!("RU".parse::<Domain>().is_err());
        assert!("relevance".parse::<SortType>().is_err());
        assert!("off".parse::<FilterLevel>().is_err());
        assert!("tree".parse::<GroupMode>().is_err());
    }

    #[test]
    fn test_language_domain_rules() {
        assert!(Language::Tr.is_allowed_on(Domain::ComTr));
        assert!(!Language::Tr.is_allowed_on(Domain::Com));
        assert!(Language::En.is_allowed_on(Domain::Com));
        assert!(!Language::En.is_allowed_on(Domain::Ru));
        assert!(Language::Kk.is_allowed_on(Domain::Ru));
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        let domain: Domain = serde_json::from_str("\"com.tr\"").unwrap();
        assert_eq!(domain, Domain::ComTr);
        assert_eq!(serde_json::to_string(&GroupMode::Deep).unwrap(), "\"deep\"");
    }
}
