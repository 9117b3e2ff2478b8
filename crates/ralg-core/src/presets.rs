//! # Preset Radical Sets
//!
//! Ready-made radical sets for well-known groupings.

use crate::error::ValidationError;
use crate::oracle::IdeographOracle;
use crate::radical::RadicalSet;

/// Name of the Five Elements set.
pub const WU_XING_NAME: &str = "五行";

/// The Five Elements in traditional order: metal, wood, water, fire, earth.
pub const WU_XING_RADICALS: [char; 5] = ['金', '木', '水', '火', '土'];

/// The Five Elements (五行) radical set.
pub fn wu_xing(oracle: &dyn IdeographOracle) -> Result<RadicalSet, ValidationError> {
    RadicalSet::from_chars(WU_XING_NAME, WU_XING_RADICALS, oracle)
}

/// Look up a preset by its CLI name.
pub fn by_name(
    name: &str,
    oracle: &dyn IdeographOracle,
) -> Option<Result<RadicalSet, ValidationError>> {
    match name {
        "wu-xing" | "wuxing" | "五行" => Some(wu_xing(oracle)),
        _ => None,
    }
}
