//! Pluggable match-point rule sets.

use crate::models::{MatchPoint, MatchRecord, ParticipantId, PointId};
use chrono::Utc;
use std::collections::HashMap;

/// Sport-specific scoring rules for a match record. Implementations decide
/// which point codes exist, when a match is decided, and how penalties
/// escalate. Invalid additions/removals are ordinary `false` returns, not
/// errors: they represent expected user-input rejections.
pub trait MatchPointHandler {
    /// Add a point. Rejected (false) if the match is already decided or the
    /// code is unrecognized. Updates the record's winner/finalization state.
    fn add_point(&self, record: &mut MatchRecord, point: MatchPoint) -> bool;

    /// Remove a point and every point whose causation chain roots at it.
    /// Removing an absent point is a successful no-op.
    fn remove_point(&self, record: &mut MatchRecord, point: PointId) -> bool;

    /// First side to satisfy the decision condition, in point order.
    fn winner(&self, record: &MatchRecord) -> Option<ParticipantId>;

    /// Currently active (not yet escalated) penalties per participant.
    fn active_penalties<'a>(
        &self,
        points: &'a [MatchPoint],
    ) -> HashMap<ParticipantId, Vec<&'a MatchPoint>>;

    /// True if the code is a penalty under this rule set.
    fn is_penalty(&self, code: char) -> bool;

    /// True if the code exists under this rule set.
    fn recognizes(&self, code: char) -> bool;
}

/// Kendo shiai scoring: M (men), K (kote), D (do), T (tsuki) and I (ippon)
/// score; H (hansoku) is a penalty. Two points win; every second penalty
/// against one side gives the opponent an automatic ippon, linked through
/// the causation id so removing the penalty removes the ippon too.
#[derive(Clone, Debug)]
pub struct KendoMatchPointHandler {
    pub point_threshold: u32,
    pub penalty_threshold: u32,
}

impl Default for KendoMatchPointHandler {
    fn default() -> Self {
        Self {
            point_threshold: 2,
            penalty_threshold: 2,
        }
    }
}

const KENDO_SCORING: [char; 5] = ['M', 'K', 'D', 'T', 'I'];
const KENDO_PENALTY: char = 'H';
const KENDO_AUTO_POINT: char = 'I';

impl KendoMatchPointHandler {
    fn refresh_decision(&self, record: &mut MatchRecord) {
        let winner = self.winner_of(record);
        record.winner = winner;
        record.finalized_at = match winner {
            Some(_) if record.finalized_at.is_none() => Some(Utc::now()),
            Some(_) => record.finalized_at,
            None => None,
        };
    }

    fn winner_of(&self, record: &MatchRecord) -> Option<ParticipantId> {
        // Tie-break matches are decided by the first real point.
        let threshold = if record.tie_break {
            1
        } else {
            self.point_threshold
        };
        let mut tally: HashMap<ParticipantId, u32> = HashMap::new();
        for p in &record.points {
            if self.is_penalty(p.code) {
                continue;
            }
            let count = tally.entry(p.participant).or_insert(0);
            *count += 1;
            if *count >= threshold {
                return Some(p.participant);
            }
        }
        None
    }
}

impl MatchPointHandler for KendoMatchPointHandler {
    fn add_point(&self, record: &mut MatchRecord, point: MatchPoint) -> bool {
        if self.winner_of(record).is_some() {
            return false;
        }
        if !self.recognizes(point.code) || !record.involves(point.participant) {
            return false;
        }
        let against = point.participant;
        let point_id = point.id;
        let is_penalty = self.is_penalty(point.code);
        record.points.push(point);

        if is_penalty {
            let penalties = record
                .points
                .iter()
                .filter(|p| p.participant == against && self.is_penalty(p.code))
                .count() as u32;
            if penalties % self.penalty_threshold == 0 {
                // opponent_of cannot fail: `involves` was checked above
                if let Some(opponent) = record.opponent_of(against) {
                    record
                        .points
                        .push(MatchPoint::caused(opponent, KENDO_AUTO_POINT, point_id));
                }
            }
        }
        self.refresh_decision(record);
        true
    }

    fn remove_point(&self, record: &mut MatchRecord, point: PointId) -> bool {
        let mut doomed = record.cascade_of(point);
        doomed.push(point);
        record.points.retain(|p| !doomed.contains(&p.id));
        self.refresh_decision(record);
        true
    }

    fn winner(&self, record: &MatchRecord) -> Option<ParticipantId> {
        self.winner_of(record)
    }

    fn active_penalties<'a>(
        &self,
        points: &'a [MatchPoint],
    ) -> HashMap<ParticipantId, Vec<&'a MatchPoint>> {
        let mut active: HashMap<ParticipantId, Vec<&'a MatchPoint>> = HashMap::new();
        for p in points {
            if !self.is_penalty(p.code) {
                continue;
            }
            let list = active.entry(p.participant).or_default();
            list.push(p);
            // A full set of penalties has escalated into an automatic point;
            // the visible count starts over.
            if list.len() as u32 >= self.penalty_threshold {
                list.clear();
            }
        }
        active
    }

    fn is_penalty(&self, code: char) -> bool {
        code == KENDO_PENALTY
    }

    fn recognizes(&self, code: char) -> bool {
        code == KENDO_PENALTY || KENDO_SCORING.contains(&code)
    }
}
