//! Reviewer selection logic
//!
//! Pure decision functions: which team members may review a pull request,
//! and which one to pick when a slot must be filled.

use crate::models::{PullRequest, Team, User, MAX_REVIEWERS};
use crate::random::RandomSource;
use crate::{Error, Result};

/// Whether `user` may be assigned as a reviewer of `pr`
pub fn is_eligible(user: &User, pr: &PullRequest) -> bool {
    user.is_active && user.id != pr.author_id && !pr.has_reviewer(&user.id)
}

/// Team members eligible to review `pr`
pub fn select_candidates<'t>(team: &'t Team, pr: &PullRequest) -> Vec<&'t User> {
    team.members.iter().filter(|m| is_eligible(m, pr)).collect()
}

/// Draw one candidate uniformly at random
///
/// Returns `None` when there are no candidates.
pub fn pick_one<'a>(candidates: &[&'a User], rng: &dyn RandomSource) -> Option<&'a User> {
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.pick_index(candidates.len())])
}

/// Fill empty reviewer slots from the team until both are taken or nobody
/// eligible is left
pub fn fill_reviewers(pr: &mut PullRequest, team: &Team, rng: &dyn RandomSource) {
    while pr.reviewers.len() < MAX_REVIEWERS {
        let candidates = select_candidates(team, pr);
        let Some(reviewer) = pick_one(&candidates, rng) else {
            break;
        };
        tracing::debug!(
            pr = %pr.id,
            reviewer = %reviewer.id,
            candidates = candidates.len(),
            "Assigned reviewer"
        );
        let id = reviewer.id.clone();
        pr.reviewers.push(id);
    }
}

/// Overwrite `old_id`'s slot with `new_id`, keeping the other slot in place
pub fn replace_reviewer(pr: &mut PullRequest, old_id: &str, new_id: &str) -> Result<()> {
    let slot = pr
        .reviewers
        .iter()
        .position(|r| r == old_id)
        .ok_or_else(|| Error::NotAssigned {
            pr: pr.id.clone(),
            reviewer: old_id.to_string(),
        })?;
    pr.reviewers[slot] = new_id.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, ThreadRandom};

    fn team(members: &[(&str, bool)]) -> Team {
        members.iter().fold(Team::new("backend"), |t, (id, active)| {
            t.with_member(User::new(*id, id.to_uppercase(), "backend").with_active(*active))
        })
    }

    fn ids(users: &[&User]) -> Vec<String> {
        let mut ids: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_candidates_exclude_author_reviewers_and_inactive() {
        let team = team(&[("author", true), ("r1", true), ("r2", false), ("r3", true)]);
        let mut pr = PullRequest::new("pr-1", "Title", "author");
        pr.reviewers.push("r1".into());

        let candidates = select_candidates(&team, &pr);
        assert_eq!(ids(&candidates), vec!["r3"]);
    }

    #[test]
    fn test_pick_one_empty() {
        assert!(pick_one(&[], &ThreadRandom).is_none());
    }

    #[test]
    fn test_pick_one_uses_random_index() {
        let team = team(&[("a", true), ("b", true), ("c", true)]);
        let members: Vec<&User> = team.members.iter().collect();
        let rng = SequenceRandom::new([2, 0]);
        assert_eq!(pick_one(&members, &rng).unwrap().id, "c");
        assert_eq!(pick_one(&members, &rng).unwrap().id, "a");
    }

    #[test]
    fn test_pick_one_covers_every_candidate() {
        let team = team(&[("a", true), ("b", true), ("c", true)]);
        let members: Vec<&User> = team.members.iter().collect();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(pick_one(&members, &ThreadRandom).unwrap().id.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_fill_assigns_two_distinct_reviewers() {
        let team = team(&[("author", true), ("r1", true), ("r2", true), ("r3", true)]);
        for _ in 0..50 {
            let mut pr = PullRequest::new("pr-1", "Title", "author");
            fill_reviewers(&mut pr, &team, &ThreadRandom);
            assert_eq!(pr.reviewers.len(), MAX_REVIEWERS);
            assert_ne!(pr.reviewers[0], pr.reviewers[1]);
            assert!(!pr.has_reviewer("author"));
        }
    }

    #[test]
    fn test_fill_small_team() {
        let solo = team(&[("author", true)]);
        let mut pr = PullRequest::new("pr-1", "Title", "author");
        fill_reviewers(&mut pr, &solo, &ThreadRandom);
        assert!(pr.reviewers.is_empty());

        let pair = team(&[("author", true), ("r1", true), ("r2", false)]);
        let mut pr = PullRequest::new("pr-2", "Title", "author");
        fill_reviewers(&mut pr, &pair, &ThreadRandom);
        assert_eq!(pr.reviewers, vec!["r1"]);
    }

    #[test]
    fn test_fill_keeps_existing_reviewers() {
        let team = team(&[("author", true), ("r1", true), ("r2", true)]);
        let mut pr = PullRequest::new("pr-1", "Title", "author");
        pr.reviewers.push("r2".into());
        fill_reviewers(&mut pr, &team, &ThreadRandom);
        assert_eq!(pr.reviewers, vec!["r2", "r1"]);
    }

    #[test]
    fn test_replace_is_positional() {
        let mut pr = PullRequest::new("pr-1", "Title", "author");
        pr.reviewers = vec!["r1".into(), "r2".into()];

        replace_reviewer(&mut pr, "r1", "r4").unwrap();
        assert_eq!(pr.reviewers, vec!["r4", "r2"]);

        replace_reviewer(&mut pr, "r2", "r5").unwrap();
        assert_eq!(pr.reviewers, vec!["r4", "r5"]);
    }

    #[test]
    fn test_replace_unassigned_reviewer() {
        let mut pr = PullRequest::new("pr-1", "Title", "author");
        pr.reviewers = vec!["r1".into()];

        let err = replace_reviewer(&mut pr, "r9", "r4").unwrap_err();
        assert!(matches!(err, Error::NotAssigned { ref reviewer, .. } if reviewer == "r9"));
        assert_eq!(pr.reviewers, vec!["r1"]);
    }
}
