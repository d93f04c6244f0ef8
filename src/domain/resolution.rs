//! Turn resolution: placing every committed card onto the rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rows::{cheapest_row, eligible_row, Row};
use crate::domain::rules::ROW_COUNT;
use crate::domain::state::ParticipantId;

/// What happened to one committed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PlacementFate {
    /// Appended to an eligible row. No penalty.
    Appended,
    /// The eligible row already held five cards; the placer swept it and
    /// the row restarted from the placed card.
    Busted { penalty: u32 },
    /// No row's last card was lower; the placer swept the cheapest row.
    TookRow { penalty: u32 },
}

impl PlacementFate {
    pub fn penalty(&self) -> u32 {
        match self {
            PlacementFate::Appended => 0,
            PlacementFate::Busted { penalty } | PlacementFate::TookRow { penalty } => *penalty,
        }
    }
}

/// One step of a resolved round, in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub participant_id: ParticipantId,
    pub card: Card,
    /// Row index, 0..=3.
    pub row: usize,
    pub fate: PlacementFate,
}

/// Pure outcome of resolving one round of commitments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    /// The rows after every placement.
    pub rows: [Row; ROW_COUNT],
    /// Penalty taken this round per committer. Zero entries are present,
    /// so the key set is exactly the set of committers.
    pub deltas: BTreeMap<ParticipantId, u32>,
    /// Every placement in the order it was applied.
    pub placements: Vec<Placement>,
    /// Cards swept off rows by busts and row takes, in sweep order.
    pub swept: Vec<Card>,
}

/// A fully resolved round: inputs plus outcome, for replay and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub game_no: u32,
    pub round: u32,
    pub rows_before: [Row; ROW_COUNT],
    pub plays: Vec<(ParticipantId, Card)>,
    pub outcome: RoundOutcome,
}

/// Resolve one round: place every committed card in ascending card order.
///
/// Pure function of its inputs; the session applies the outcome afterwards.
/// Card values are globally unique, so the ascending order is total and the
/// result does not depend on commit arrival order. Each placement sees the
/// rows as the previous placements left them.
pub fn resolve_round(rows: &[Row; ROW_COUNT], plays: &[(ParticipantId, Card)]) -> RoundOutcome {
    let mut rows = rows.clone();
    let mut ordered = plays.to_vec();
    ordered.sort_by_key(|(_, card)| *card);

    let mut deltas: BTreeMap<ParticipantId, u32> = BTreeMap::new();
    let mut placements = Vec::with_capacity(ordered.len());
    let mut swept = Vec::new();

    for (who, card) in ordered {
        let (row, fate) = match eligible_row(&rows, card) {
            Some(idx) if rows[idx].is_full() => {
                let penalty = rows[idx].penalty();
                swept.extend(rows[idx].restart(card));
                (idx, PlacementFate::Busted { penalty })
            }
            Some(idx) => {
                rows[idx].append(card);
                (idx, PlacementFate::Appended)
            }
            None => {
                let idx = cheapest_row(&rows);
                let penalty = rows[idx].penalty();
                swept.extend(rows[idx].restart(card));
                (idx, PlacementFate::TookRow { penalty })
            }
        };

        *deltas.entry(who.clone()).or_insert(0) += fate.penalty();
        placements.push(Placement {
            participant_id: who,
            card,
            row,
            fate,
        });
    }

    RoundOutcome {
        rows,
        deltas,
        placements,
        swept,
    }
}

/// Human-readable round summary, one line per placement. Row numbers are
/// shown 1-based.
pub fn render_summary(
    outcome: &RoundOutcome,
    name_of: impl Fn(&ParticipantId) -> String,
) -> String {
    let mut lines = Vec::with_capacity(outcome.placements.len());
    for placement in &outcome.placements {
        let who = name_of(&placement.participant_id);
        let row = placement.row + 1;
        let card = placement.card;
        let line = match placement.fate {
            PlacementFate::Appended => format!("{who} placed {card} on row {row}."),
            PlacementFate::Busted { penalty } => {
                format!("{who} busted row {row} with {card} and takes {penalty} points.")
            }
            PlacementFate::TookRow { penalty } => {
                format!("{who} could not place {card} and takes row {row} for {penalty} points.")
            }
        };
        lines.push(line);
    }
    lines.join("\n")
}
