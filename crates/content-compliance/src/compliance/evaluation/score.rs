use super::{RuleResult, RuleStatus};

/// Point totals accumulated over one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ScoreCard {
    pub(crate) earned: u64,
    pub(crate) max: u64,
    pub(crate) applicable_max: u64,
}

impl ScoreCard {
    pub(crate) fn tally<'a>(results: impl IntoIterator<Item = &'a RuleResult>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut card, result| {
                let weight = u64::from(result.weight);
                card.max += weight;
                if result.status != RuleStatus::NotApplicable {
                    card.applicable_max += weight;
                }
                card.earned += u64::from(result.points);
                card
            })
    }

    /// Share of every rule's weight that was earned.
    pub(crate) fn raw_score(&self) -> u8 {
        percent(self.earned, self.max)
    }

    /// Share of applicable weight that was earned; 100 when nothing applies.
    pub(crate) fn applicable_score(&self) -> u8 {
        percent(self.earned, self.applicable_max)
    }
}

/// `round(part / whole * 100)`, rounding halves up.
fn percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 100;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
