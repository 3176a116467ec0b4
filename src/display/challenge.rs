//! Weekly challenge formatting

use super::progress_bar;
use crate::models::{Challenge, ChallengeOutcome, ChallengeProgress, ChallengeStatus, WeekReport};

/// Format the active challenge with its progress and standing
pub fn format_challenge_progress(
    challenge: &Challenge,
    progress: &ChallengeProgress,
    symbol: &str,
) -> String {
    let standing = match progress.status() {
        ChallengeStatus::OnTrack => "You're on track! Keep going to beat the challenge.",
        ChallengeStatus::LimitExceeded => {
            "You've exceeded your challenge limit! Better luck next week."
        }
    };

    format!(
        "Challenge: spend at most {} on {} this week.\n{} {} / {}\n{}",
        challenge.limit.format_with_symbol(symbol),
        challenge.category,
        progress_bar(progress.ratio, 20),
        progress.spent.format_with_symbol(symbol),
        progress.limit.format_with_symbol(symbol),
        standing
    )
}

/// Format the result of closing a challenge week
pub fn format_week_report(report: &WeekReport, symbol: &str) -> String {
    let headline = match report.outcome {
        ChallengeOutcome::Succeeded => {
            "Challenge completed! Congratulations on managing your spending!"
        }
        ChallengeOutcome::Failed => "Challenge failed. You went over your limit.",
    };

    format!(
        "{}\nSpent {} of {} on {}. Weekly spending has been reset.",
        headline,
        report.spent.format_with_symbol(symbol),
        report.challenge.limit.format_with_symbol(symbol),
        report.challenge.category
    )
}
