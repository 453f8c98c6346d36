//! Size arithmetic for split directives.
//!
//! Two notions of size are involved:
//! - a child's *share*: its fraction of the parent group, as written in
//!   the layout (or filled in for children that gave none)
//! - the *host fraction*: what the host's split command expects, namely the
//!   part of the currently focused pane that goes to the new pane

use wt_layout_config::HostConfig;

/// Slack allowed when checking that explicit sibling sizes fit in 1.
pub(crate) const SIZE_TOLERANCE: f64 = 1e-9;

/// Smallest share handed to a child whose siblings already claim everything.
pub const MIN_SHARE: f64 = 1e-3;

/// Fill in missing shares: each child without a size gets an equal part of
/// whatever its siblings left over, but never less than [`MIN_SHARE`].
pub fn distribute(sizes: &[Option<f64>]) -> Vec<f64> {
    let specified: f64 = sizes.iter().flatten().sum();
    let unspecified = sizes.iter().filter(|s| s.is_none()).count();

    let mut fill = if unspecified == 0 {
        0.0
    } else {
        (1.0 - specified) / unspecified as f64
    };
    if unspecified > 0 && fill < MIN_SHARE {
        log::debug!(
            "Siblings claim {specified} of the parent; clamping unsized children to {MIN_SHARE}"
        );
        fill = MIN_SHARE;
    }

    sizes.iter().map(|s| s.unwrap_or(fill)).collect()
}

/// Host fraction for the split that creates child `index` (`index >= 1`).
///
/// Children are created first to last, each by splitting the pane created
/// just before it, which at that point still holds the space of every
/// remaining child.
pub fn host_fraction(shares: &[f64], index: usize) -> f64 {
    debug_assert!(index >= 1 && index < shares.len());
    let remaining: f64 = shares[index..].iter().sum();
    let focused: f64 = shares[index - 1..].iter().sum();
    remaining / focused
}

/// Round to `precision` decimals and keep the value strictly inside (0, 1),
/// which is the only range the host accepts.
///
/// `precision` is held to [`HostConfig::PRECISION_RANGE`]; outside it the
/// bounds would cross (0 places) or stop being finite.
pub fn round_fraction(value: f64, precision: u32) -> f64 {
    let range = HostConfig::PRECISION_RANGE;
    let precision = precision.clamp(*range.start(), *range.end());
    let scale = 10f64.powi(precision as i32);
    let lowest = 1.0 / scale;
    let highest = (scale - 1.0) / scale;
    let rounded = (value * scale).round() / scale;
    if rounded < lowest || rounded > highest {
        log::debug!("Split fraction {value} clamped into [{lowest}, {highest}]");
    }
    rounded.clamp(lowest, highest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_even() {
        let shares = distribute(&[None, None, None, None]);
        assert_eq!(shares, vec![0.25; 4]);
    }

    #[test]
    fn test_distribute_fills_remainder() {
        let shares = distribute(&[None, Some(0.3)]);
        assert!((shares[0] - 0.7).abs() < 1e-12);
        assert_eq!(shares[1], 0.3);
    }

    #[test]
    fn test_distribute_clamps_when_oversubscribed() {
        let shares = distribute(&[Some(0.5), Some(0.5), None]);
        assert_eq!(shares[2], MIN_SHARE);
        assert!(shares.iter().all(|s| *s > 0.0));
    }

    #[test]
    fn test_distribute_keeps_explicit_sizes_under_one() {
        let shares = distribute(&[Some(0.2), Some(0.3)]);
        assert_eq!(shares, vec![0.2, 0.3]);
    }

    #[test]
    fn test_round_fraction_holds_precision_in_range() {
        assert_eq!(round_fraction(0.5, 0), 0.5);
        assert_eq!(round_fraction(0.0, 0), 0.1);
        assert_eq!(round_fraction(0.33, 0), 0.3);
        let fine = round_fraction(1.0 / 3.0, u32::MAX);
        assert!(fine > 0.0 && fine < 1.0);
        assert_eq!(fine, round_fraction(1.0 / 3.0, 8));
    }

    #[test]
    fn test_host_fraction_two_children() {
        let shares = distribute(&[None, Some(0.3)]);
        let fraction = round_fraction(host_fraction(&shares, 1), 4);
        assert_eq!(fraction, 0.3);
    }

    #[test]
    fn test_host_fraction_even_thirds() {
        let shares = distribute(&[None, None, None]);
        assert_eq!(round_fraction(host_fraction(&shares, 1), 4), 0.6667);
        assert_eq!(round_fraction(host_fraction(&shares, 2), 4), 0.5);
    }

    #[test]
    fn test_host_fraction_normalizes_partial_sizes() {
        // 0.2 and 0.3 are read as 2:3 of the parent
        let shares = distribute(&[Some(0.2), Some(0.3)]);
        assert_eq!(round_fraction(host_fraction(&shares, 1), 4), 0.6);
    }

    #[test]
    fn test_round_fraction_stays_open_interval() {
        assert_eq!(round_fraction(0.999_99, 4), 0.9999);
        assert_eq!(round_fraction(0.000_01, 4), 0.0001);
        assert_eq!(round_fraction(0.5, 2), 0.5);
    }
}
