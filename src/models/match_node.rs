//! MatchNode: an atomic contest between two slots.

use crate::models::area::AreaId;
use crate::models::participant::Participant;
use crate::models::record::MatchRecord;
use crate::models::slot::{MatchSlot, Side};
use crate::models::structure::TournamentError;
use serde::{Deserialize, Serialize};

/// A single match: a stable name, two distinct slots and optional result
/// state. Bracket nodes additionally live inside a [`Bracket`] arena.
///
/// [`Bracket`]: crate::models::bracket::Bracket
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchNode {
    pub name: String,
    pub red: MatchSlot,
    pub white: MatchSlot,
    pub area: Option<AreaId>,
    pub record: Option<MatchRecord>,
    /// Set once a parent match has consumed this match's winner; result
    /// edits are rejected from then on.
    pub frozen: bool,
    /// Pool decision match: a drawn outcome is disallowed.
    pub tie_break: bool,
}

impl MatchNode {
    /// Create a match. The two slots must be distinct; handing the same slot
    /// to both sides is a contract violation.
    pub fn new(
        name: impl Into<String>,
        red: MatchSlot,
        white: MatchSlot,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        if red == white {
            return Err(TournamentError::DuplicateSlot(name));
        }
        Ok(Self {
            name,
            red,
            white,
            area: None,
            record: None,
            frozen: false,
            tie_break: false,
        })
    }

    pub fn slot(&self, side: Side) -> &MatchSlot {
        match side {
            Side::Red => &self.red,
            Side::White => &self.white,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut MatchSlot {
        match side {
            Side::Red => &mut self.red,
            Side::White => &mut self.white,
        }
    }

    /// True if either side is a bye (no contest will be fought).
    pub fn has_bye(&self) -> bool {
        self.red.is_bye() || self.white.is_bye()
    }

    /// Attach a result record. Both sides must already hold the concrete
    /// participants named by the record, the match must not be frozen, and
    /// the record's tie-break flag must agree with the match's.
    ///
    /// Callers resolve winner-reference slots into `resolved` before calling;
    /// for plain participant slots that is just [`MatchSlot::participant`].
    pub fn attach_record(
        &mut self,
        resolved: (Option<&Participant>, Option<&Participant>),
        record: MatchRecord,
    ) -> Result<(), TournamentError> {
        if self.frozen {
            return Err(TournamentError::MatchFrozen(self.name.clone()));
        }
        let (red, white) = match resolved {
            (Some(r), Some(w)) => (r, w),
            _ => return Err(TournamentError::RecordOnByeMatch(self.name.clone())),
        };
        let pair_matches = (record.red == red.id && record.white == white.id)
            || (record.red == white.id && record.white == red.id);
        if !pair_matches {
            return Err(TournamentError::RecordParticipantMismatch(self.name.clone()));
        }
        if let Some(winner) = record.winner {
            if !record.involves(winner) {
                return Err(TournamentError::RecordParticipantMismatch(self.name.clone()));
            }
        }
        if record.tie_break != self.tie_break {
            return Err(TournamentError::RecordTieBreakMismatch(self.name.clone()));
        }
        self.record = Some(record);
        Ok(())
    }
}
