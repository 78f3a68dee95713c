//! Longest-match selection over the rule catalogue
//!
//! Every rule is consulted at the current position. The proposal consuming
//! the most characters wins; among equal lengths the rule declared first
//! wins. Failure proposals compete on the same terms, so `3.x` fails as a
//! malformed number rather than lexing `3` and moving on.

use super::cursor::Cursor;
use super::rules::{Proposal, Rule, RULES};

/// The winning proposal and the rule that made it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub proposal: Proposal,
    pub priority: usize,
    pub rule_name: &'static str,
}

/// Pick the longest non-empty proposal. Lower priority values are earlier
/// declarations and win ties.
pub fn longest<I>(proposals: I) -> Option<(usize, Proposal)>
where
    I: IntoIterator<Item = (usize, Proposal)>,
{
    let mut best: Option<(usize, Proposal)> = None;

    for (priority, proposal) in proposals {
        if proposal.len() == 0 {
            continue;
        }
        let replaces = match best {
            None => true,
            Some((best_priority, best_proposal)) => {
                proposal.len() > best_proposal.len()
                    || (proposal.len() == best_proposal.len() && priority < best_priority)
            }
        };
        if replaces {
            best = Some((priority, proposal));
        }
    }

    best
}

/// Every proposal the catalogue makes at the cursor, tagged with priority
pub fn candidates(cursor: &Cursor<'_>) -> Vec<(usize, Proposal)> {
    candidates_with(RULES, cursor)
}

fn candidates_with(rules: &[Rule], cursor: &Cursor<'_>) -> Vec<(usize, Proposal)> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(priority, rule)| (rule.matcher)(cursor).map(|p| (priority, p)))
        .collect()
}

pub fn select(cursor: &Cursor<'_>) -> Option<Selection> {
    select_with(RULES, cursor)
}

/// Select among an explicit rule list. `None` means no rule recognises the
/// next character.
pub fn select_with(rules: &[Rule], cursor: &Cursor<'_>) -> Option<Selection> {
    let (priority, proposal) = longest(candidates_with(rules, cursor))?;
    Some(Selection {
        proposal,
        priority,
        rule_name: rules[priority].name,
    })
}
