/// Result tiers for the end-of-round message
///
/// Tier thresholds are percentages of the maximum score, inclusive at the
/// lower bound of each tier.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    /// 100%
    Perfect,

    /// [80%, 100%)
    Great,

    /// [60%, 80%)
    Decent,

    /// below 60%
    Rough,
}

impl ResultTier {
    /// Pick the tier for a final score out of `max_score`
    pub fn for_score(score: u32, max_score: u32) -> Self {
        debug_assert!(max_score > 0, "a round always has at least one question");
        let percentage = (score as f64 / max_score as f64) * 100.0;

        if percentage >= 100.0 {
            ResultTier::Perfect
        } else if percentage >= 80.0 {
            ResultTier::Great
        } else if percentage >= 60.0 {
            ResultTier::Decent
        } else {
            ResultTier::Rough
        }
    }

    /// The message shown on the results screen
    pub fn message(&self) -> &'static str {
        match self {
            ResultTier::Perfect => "Holy! bro definitely knows his cars!",
            ResultTier::Great => "That was pretty good, you definitely like your cars!",
            ResultTier::Decent => "Not too shabby but you still have lots to learn!",
            ResultTier::Rough => {
                "Yeah you gotta pick up another hobby sorry man. Unless you want to try again LOL"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_requires_full_score() {
        assert_eq!(ResultTier::for_score(5, 5), ResultTier::Perfect);
        assert_eq!(ResultTier::for_score(4, 5), ResultTier::Great);
    }

    #[test]
    fn test_lower_bounds_are_inclusive() {
        // Exactly 80%
        assert_eq!(ResultTier::for_score(4, 5), ResultTier::Great);
        // Exactly 60%
        assert_eq!(ResultTier::for_score(3, 5), ResultTier::Decent);
    }

    #[test]
    fn test_three_of_five_is_decent() {
        let tier = ResultTier::for_score(3, 5);
        assert_eq!(tier, ResultTier::Decent);
        assert!(tier.message().starts_with("Not too shabby"));
    }

    #[test]
    fn test_below_sixty_is_rough() {
        assert_eq!(ResultTier::for_score(2, 5), ResultTier::Rough);
        assert_eq!(ResultTier::for_score(0, 5), ResultTier::Rough);
    }

    #[test]
    fn test_odd_bank_sizes() {
        // 7/8 = 87.5%
        assert_eq!(ResultTier::for_score(7, 8), ResultTier::Great);
        // 5/8 = 62.5%
        assert_eq!(ResultTier::for_score(5, 8), ResultTier::Decent);
        // 1/1 = 100%
        assert_eq!(ResultTier::for_score(1, 1), ResultTier::Perfect);
    }
}
