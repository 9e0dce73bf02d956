//! Selected-ion m/z resolution.
//!
//! The instrument records a precursor m/z per reaction and, separately, a refined
//! monoisotopic m/z in the trailer. The refined value is reported only when it
//! plausibly belongs to the isolated ion.

use super::Reaction;

/// Values at or below this are treated as "not provided".
pub const ZERO_EPSILON: f64 = 1e-4;

/// Minimum difference for the monoisotopic m/z to count as a different value.
pub const MONOISOTOPIC_TOLERANCE: f64 = 1e-4;

/// Half widths up to this use the fixed narrow-window bounds below.
pub const NARROW_HALF_WIDTH: f64 = 2.0;

/// How far below the recorded precursor a narrow-window candidate may sit.
pub const NARROW_LOWER_OFFSET: f64 = 2.0 * 1.5;

/// How far above the recorded precursor a narrow-window candidate may sit.
pub const NARROW_UPPER_OFFSET: f64 = 2.5;

/// Effective half isolation width: the supplied width unless it is absent or
/// negligible, then the reaction's own width, halved.
pub fn effective_half_width(reaction: &Reaction, isolation_width: Option<f64>) -> f64 {
    let width = match isolation_width {
        Some(width) if width >= ZERO_EPSILON => width,
        _ => reaction.isolation_width,
    };
    width / 2.0
}

/// Compute the selected-ion m/z to report for a spectrum.
///
/// `monoisotopic_mz` and `isolation_width` are the trailer values for the scan,
/// if any. The monoisotopic value replaces `reaction.precursor_mass` when it is
/// set, differs from the recorded mass and lies inside the acceptance window:
///
/// - half width `<= 2.0`: `[precursor - 3.0, precursor + 2.5]`, independent of the width
/// - otherwise: `[precursor - half_width, precursor + half_width]`
///
/// # Example
///
/// ```
/// use mzextract::precursor::{resolve_selected_ion_mz, Reaction};
///
/// let reaction = Reaction::new(500.0, 2.0, 2);
/// assert_eq!(resolve_selected_ion_mz(&reaction, Some(497.0), None), 497.0);
/// assert_eq!(resolve_selected_ion_mz(&reaction, Some(496.9), None), 500.0);
/// ```
pub fn resolve_selected_ion_mz(
    reaction: &Reaction,
    monoisotopic_mz: Option<f64>,
    isolation_width: Option<f64>,
) -> f64 {
    let precursor = reaction.precursor_mass;
    let half_width = effective_half_width(reaction, isolation_width);

    let candidate = match monoisotopic_mz {
        Some(mono) if mono > ZERO_EPSILON && (mono - precursor).abs() > MONOISOTOPIC_TOLERANCE => {
            mono
        }
        _ => return precursor,
    };

    let (lower, upper) = if half_width <= NARROW_HALF_WIDTH {
        (precursor - NARROW_LOWER_OFFSET, precursor + NARROW_UPPER_OFFSET)
    } else {
        (precursor - half_width, precursor + half_width)
    };

    if candidate < lower || candidate > upper {
        precursor
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_monoisotopic_value() {
        let reaction = Reaction::new(500.0, 2.0, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, None, None), 500.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(0.0), None), 500.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(0.00005), None), 500.0);
    }

    #[test]
    fn test_monoisotopic_within_tolerance() {
        let reaction = Reaction::new(500.0, 2.0, 2);
        assert_eq!(
            resolve_selected_ion_mz(&reaction, Some(500.00005), None),
            500.0
        );
    }

    #[test]
    fn test_narrow_lower_bound_inclusive() {
        let reaction = Reaction::new(500.0, 2.0, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(497.0), None), 497.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(496.9), None), 500.0);
    }

    #[test]
    fn test_narrow_upper_bound() {
        let reaction = Reaction::new(500.0, 2.0, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(502.5), None), 502.5);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(502.6), None), 500.0);
    }

    #[test]
    fn test_narrow_bounds_ignore_actual_width() {
        // Half width 0.2 still accepts candidates up to 3.0 below.
        let reaction = Reaction::new(500.0, 0.4, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(497.5), None), 497.5);
    }

    #[test]
    fn test_half_width_two_is_narrow() {
        let reaction = Reaction::new(500.0, 4.0, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(497.2), None), 497.2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(502.6), None), 500.0);
    }

    #[test]
    fn test_wide_window() {
        let reaction = Reaction::new(500.0, 10.0, 2);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(504.0), None), 504.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(495.0), None), 495.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(505.5), None), 500.0);
        assert_eq!(resolve_selected_ion_mz(&reaction, Some(494.0), None), 500.0);
    }

    #[test]
    fn test_trailer_width_overrides_reaction() {
        let reaction = Reaction::new(500.0, 2.0, 2);
        // Trailer width 10 makes the window wide: 504 is accepted.
        assert_eq!(
            resolve_selected_ion_mz(&reaction, Some(504.0), Some(10.0)),
            504.0
        );
        // Negligible trailer width falls back to the reaction's 2.0.
        assert_eq!(
            resolve_selected_ion_mz(&reaction, Some(504.0), Some(0.00001)),
            500.0
        );
    }

    #[test]
    fn test_effective_half_width() {
        let reaction = Reaction::new(500.0, 3.0, 2);
        assert_eq!(effective_half_width(&reaction, None), 1.5);
        assert_eq!(effective_half_width(&reaction, Some(0.0)), 1.5);
        assert_eq!(effective_half_width(&reaction, Some(8.0)), 4.0);
    }
}
