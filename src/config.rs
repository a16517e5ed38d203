//! Tree configuration

/// Balance factor magnitude tolerated before the rebalance hook fires
pub const DEFAULT_BALANCE_THRESHOLD: usize = 2;

/// Configuration parameters for a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// A node whose `|balance|` exceeds this is handed to the rebalancer
    pub balance_threshold: usize,
}

impl TreeConfig {
    /// Set the balance threshold
    pub fn with_balance_threshold(mut self, threshold: usize) -> Self {
        self.balance_threshold = threshold;
        self
    }

    /// Whether `balance` lies outside the tolerated interval
    #[inline]
    pub fn is_unbalanced(&self, balance: isize) -> bool {
        balance.unsigned_abs() > self.balance_threshold
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            balance_threshold: DEFAULT_BALANCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let config = TreeConfig::default();
        assert!(!config.is_unbalanced(2));
        assert!(!config.is_unbalanced(-2));
        assert!(config.is_unbalanced(3));
        assert!(config.is_unbalanced(-3));
    }

    #[test]
    fn test_builder() {
        let config = TreeConfig::default().with_balance_threshold(0);
        assert!(config.is_unbalanced(1));
        assert!(!config.is_unbalanced(0));
    }
}
