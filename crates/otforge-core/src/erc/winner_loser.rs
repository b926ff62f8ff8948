//! ERCs derived from a winner and a loser candidate.

use std::fmt;
use std::sync::Arc;

use super::{Erc, ErcLike};
use crate::candidate::Candidate;
use crate::constraint::{same_list, ConstraintList};
use crate::error::{OtError, Result};

/// An ERC derived by comparing a hypothetical winner with a loser.
///
/// For each constraint: W if the winner has fewer violations, L if it has
/// more, `e` if the counts are equal. The values are fixed at construction.
///
/// # Example
///
/// ```
/// use otforge_core::{Candidate, Constraint, ConstraintKind, ConstraintList, ErcLike, ErcValue, WinnerLoserPair};
///
/// let list = ConstraintList::shared(vec![
///     Constraint::new("NoCoda", "NoC", ConstraintKind::Markedness),
///     Constraint::new("Max", "Max", ConstraintKind::Faithfulness),
/// ]).unwrap();
///
/// let faithful = Candidate::with_violations("pat", "pat", list.clone(), &[1, 0]).unwrap();
/// let deleted = Candidate::with_violations("pat", "pa", list.clone(), &[0, 1]).unwrap();
///
/// let pair = WinnerLoserPair::new(&deleted, &faithful).unwrap();
/// assert_eq!(pair.erc().values(), vec![ErcValue::W, ErcValue::L]);
/// ```
#[derive(Clone)]
pub struct WinnerLoserPair {
    erc: Erc,
    winner: Candidate,
    loser: Candidate,
}

impl WinnerLoserPair {
    /// Derives the pair.
    ///
    /// # Errors
    ///
    /// - [`OtError::InputMismatch`] if the candidates have different inputs
    /// - [`OtError::ConstraintSetMismatch`] if their constraint lists differ
    /// - [`OtError::UnassignedViolation`] if a count is missing on either side
    pub fn new(winner: &Candidate, loser: &Candidate) -> Result<Self> {
        if winner.input() != loser.input() {
            return Err(OtError::InputMismatch {
                first: winner.input().to_string(),
                second: loser.input().to_string(),
            });
        }
        if !same_list(winner.constraints(), loser.constraints()) {
            return Err(OtError::ConstraintSetMismatch(format!(
                "winner {} and loser {} use different constraint lists",
                winner, loser
            )));
        }

        let label = format!(
            "{}: {} > {}",
            winner.input(),
            winner.outputs().join("|"),
            loser.outputs().join("|")
        );
        let mut erc = Erc::new(Arc::clone(winner.constraints())).with_label(label);
        for id in winner.constraints().ids() {
            let w = winner.try_count(id)?;
            let l = loser.try_count(id)?;
            if w < l {
                erc.set_w(id);
            } else if w > l {
                erc.set_l(id);
            }
        }

        Ok(Self {
            erc,
            winner: winner.clone(),
            loser: loser.clone(),
        })
    }

    pub fn winner(&self) -> &Candidate {
        &self.winner
    }

    pub fn loser(&self) -> &Candidate {
        &self.loser
    }

    pub fn label(&self) -> Option<&str> {
        self.erc.label()
    }

    /// Returns the derived ERC as a plain, mutable ERC.
    pub fn into_erc(self) -> Erc {
        self.erc
    }
}

impl ErcLike for WinnerLoserPair {
    fn erc(&self) -> &Erc {
        &self.erc
    }

    fn reindexed(&self, target: &Arc<ConstraintList>) -> Result<Self> {
        Ok(Self {
            erc: self.erc.reindexed(target)?,
            winner: self.winner.clone(),
            loser: self.loser.clone(),
        })
    }
}

impl AsRef<Erc> for WinnerLoserPair {
    fn as_ref(&self) -> &Erc {
        &self.erc
    }
}

impl From<WinnerLoserPair> for Erc {
    fn from(pair: WinnerLoserPair) -> Self {
        pair.erc
    }
}

impl PartialEq for WinnerLoserPair {
    fn eq(&self, other: &Self) -> bool {
        self.erc == other.erc
    }
}

impl Eq for WinnerLoserPair {}

impl fmt::Debug for WinnerLoserPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinnerLoserPair")
            .field("winner", &self.winner.to_string())
            .field("loser", &self.loser.to_string())
            .field("erc", &self.erc)
            .finish()
    }
}

impl fmt::Display for WinnerLoserPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.erc)
    }
}
