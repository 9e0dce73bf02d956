//! Fragmentation reactions and trailer-supplied precursor values.

use serde::Serialize;

/// Trailer label carrying the refined monoisotopic m/z.
pub const MONOISOTOPIC_MZ_LABEL: &str = "Monoisotopic M/Z:";
/// Trailer label carrying the precursor charge state.
pub const CHARGE_STATE_LABEL: &str = "Charge State:";
/// Trailer label carrying the scan number of the precursor scan.
pub const MASTER_SCAN_LABEL: &str = "Master Scan Number:";

/// Trailer label carrying the isolation width used for an MSn scan of `ms_level`.
pub fn isolation_width_label(ms_level: u8) -> String {
    format!("MS{} Isolation Width:", ms_level)
}

/// A fragmentation event recorded for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reaction {
    /// Recorded precursor m/z
    pub precursor_mass: f64,
    /// Full isolation width in m/z; zero when the instrument did not record one
    pub isolation_width: f64,
    /// MS level of the scan produced by this reaction
    pub ms_order: u8,
}

impl Reaction {
    /// Create a reaction.
    pub fn new(precursor_mass: f64, isolation_width: f64, ms_order: u8) -> Self {
        Self {
            precursor_mass,
            isolation_width,
            ms_order,
        }
    }
}

/// Refined precursor values read from a scan's trailer metadata.
///
/// Any field may be missing. Zero values are kept as-is; consumers treat
/// them as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrailerValues {
    /// Monoisotopic m/z determined by the instrument
    pub monoisotopic_mz: Option<f64>,
    /// Full isolation width in m/z
    pub isolation_width: Option<f64>,
    /// Precursor charge state
    pub charge: Option<i32>,
    /// Scan number of the precursor (master) scan
    pub master_scan: Option<u32>,
}

impl TrailerValues {
    /// Extract precursor values from `(label, value)` trailer pairs of a scan at `ms_level`.
    ///
    /// Unknown labels are ignored, as are values that do not parse. A charge of 0
    /// and a non-positive master scan number are treated as absent.
    pub fn from_labels<'a, I>(pairs: I, ms_level: u8) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let width_label = isolation_width_label(ms_level);
        let mut values = Self::default();

        for (label, value) in pairs {
            let label = label.trim();
            let value = value.trim();
            if label == MONOISOTOPIC_MZ_LABEL {
                values.monoisotopic_mz = value.parse().ok();
            } else if label == width_label {
                values.isolation_width = value.parse().ok();
            } else if label == CHARGE_STATE_LABEL {
                values.charge = value.parse().ok().filter(|z: &i32| *z != 0);
            } else if label == MASTER_SCAN_LABEL {
                values.master_scan = value
                    .parse::<i64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .and_then(|s| u32::try_from(s).ok());
            }
        }

        values
    }
}
