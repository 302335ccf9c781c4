//! Static consent catalog keyed by location code.

use consent_core::{ConsentOption, LocationCode};

pub const PERSONALIZED_RECOMMENDATIONS: ConsentOption = ConsentOption {
    key: "personalizedRecommendations",
    description: "Allow data collection for personalized recommendations",
};

pub const PERSONALIZED_RECOMMENDATIONS_EXTRA: ConsentOption = ConsentOption {
    key: "personalizedRecommendationsEXTRA",
    description: "Allow data collection for personalized recommendations",
};

pub const DATA_SHARING_WITH_THIRD_PARTIES: ConsentOption = ConsentOption {
    key: "dataSharingWithThirdParties",
    description: "Allow data sharing with third parties",
};

pub const DATA_SHARING_WITH_THIRD_PARTIES_EXTRA: ConsentOption = ConsentOption {
    key: "dataSharingWithThirdPartiesEXTRA",
    description: "Allow data sharing with third parties",
};

/// Options offered in every location without special rules.
pub const DEFAULT_OPTIONS: &[ConsentOption] =
    &[PERSONALIZED_RECOMMENDATIONS, DATA_SHARING_WITH_THIRD_PARTIES];

/// Extended options for locations with their own privacy rules.
pub const SPECIAL_OPTIONS: &[ConsentOption] = &[
    PERSONALIZED_RECOMMENDATIONS,
    PERSONALIZED_RECOMMENDATIONS_EXTRA,
    DATA_SHARING_WITH_THIRD_PARTIES,
    DATA_SHARING_WITH_THIRD_PARTIES_EXTRA,
];

/// Locations receiving [`SPECIAL_OPTIONS`]: Florida, Georgia, California,
/// Colorado, Utah.
pub const SPECIAL_LOCATIONS: &[&str] = &["FL", "GA", "CA", "CO", "UT"];

/// Ordered consent options applicable to `location`. Never empty; unknown
/// codes fall back to [`DEFAULT_OPTIONS`].
pub fn options_for(location: &LocationCode) -> &'static [ConsentOption] {
    if SPECIAL_LOCATIONS.contains(&location.as_str()) {
        SPECIAL_OPTIONS
    } else {
        DEFAULT_OPTIONS
    }
}

/// Options applicable to a user whose location may not be recorded yet.
pub fn options_for_opt(location: Option<&LocationCode>) -> &'static [ConsentOption] {
    location.map(options_for).unwrap_or(DEFAULT_OPTIONS)
}

/// Look up an option by key within `options`.
pub fn find_option(options: &[ConsentOption], key: &str) -> Option<ConsentOption> {
    options.iter().find(|o| o.key == key).copied()
}
