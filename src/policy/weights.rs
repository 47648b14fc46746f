//! Priority weighting
//!
//! Maps a 1–5 priority to the weight used when several categories share a
//! budget pool. A higher weight means a larger proportional share.

/// Weight per priority, most essential first
pub const PRIORITY_WEIGHTS: &[(u8, f64)] = &[(1, 1.0), (2, 0.8), (3, 0.6), (4, 0.4), (5, 0.2)];

/// Weight for priorities outside 1–5
pub const DEFAULT_WEIGHT: f64 = 0.2;

pub fn weight_for(priority: u8) -> f64 {
    PRIORITY_WEIGHTS
        .iter()
        .find(|(p, _)| *p == priority)
        .map(|(_, w)| *w)
        .unwrap_or(DEFAULT_WEIGHT)
}

/// Split `pool` in proportion to `weights`
///
/// Returns all zeros when the pool is not positive or the weights sum to zero.
pub fn distribute_by_weight(pool: f64, weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if pool <= 0.0 || total <= 0.0 {
        return vec![0.0; weights.len()];
    }

    weights.iter().map(|w| pool * w / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_table() {
        assert_eq!(weight_for(1), 1.0);
        assert_eq!(weight_for(2), 0.8);
        assert_eq!(weight_for(3), 0.6);
        assert_eq!(weight_for(4), 0.4);
        assert_eq!(weight_for(5), 0.2);
    }

    #[test]
    fn test_unknown_priority_defaults() {
        assert_eq!(weight_for(0), DEFAULT_WEIGHT);
        assert_eq!(weight_for(9), 0.2);
    }

    #[test]
    fn test_distribute_by_weight() {
        let shares = distribute_by_weight(300.0, &[1.0, 0.5]);
        assert!((shares[0] - 200.0).abs() < 1e-9);
        assert!((shares[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_degenerate_inputs() {
        assert_eq!(distribute_by_weight(100.0, &[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(distribute_by_weight(-5.0, &[1.0]), vec![0.0]);
        assert!(distribute_by_weight(100.0, &[]).is_empty());
    }
}
