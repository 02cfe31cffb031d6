// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Permission criteria
//!
//! A [`Criterion`] is a boolean expression over content items that a query layer can push down
//! as a filter (for example, as a `where` clause). The permission resolver produces a
//! [`PermissionCriterion`], which is either a definitive answer (`Allowed`/`Denied`) or a
//! residual `Filtered` criterion that still has to be evaluated against each content item.

mod evaluate;
mod predicate;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub use evaluate::{ContentInfo, LocationInfo};
pub use predicate::{CriterionTarget, CriterionValue, InvalidCriterionError, Operator, Predicate};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Predicate(Predicate),
    /// All children must match. An empty list matches everything.
    LogicalAnd(Vec<Criterion>),
    /// Any child must match. An empty list matches nothing.
    LogicalOr(Vec<Criterion>),
    MatchAll,
    MatchNone,
}

impl Criterion {
    pub fn predicate(
        target: CriterionTarget,
        operator: Operator,
        value: CriterionValue,
    ) -> Result<Self, InvalidCriterionError> {
        Predicate::new(target, operator, value).map(Criterion::Predicate)
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Criterion::MatchAll)
    }

    pub fn is_match_none(&self) -> bool {
        matches!(self, Criterion::MatchNone)
    }

    /// Reduce the criterion to a simpler, logically equivalent form.
    ///
    /// `MatchAll`/`MatchNone` are absorbed or propagated, nested groups of the same kind are
    /// flattened, duplicate operands are removed and single-operand groups are collapsed.
    pub fn simplify(self) -> Criterion {
        match self {
            Criterion::LogicalAnd(operands) => {
                simplify_group(operands, Criterion::MatchAll, Criterion::MatchNone, |c| {
                    match c {
                        Criterion::LogicalAnd(nested) => Ok(nested),
                        other => Err(other),
                    }
                })
                .unwrap_or_else(|operands| collapse(operands, Criterion::LogicalAnd))
            }
            Criterion::LogicalOr(operands) => {
                simplify_group(operands, Criterion::MatchNone, Criterion::MatchAll, |c| {
                    match c {
                        Criterion::LogicalOr(nested) => Ok(nested),
                        other => Err(other),
                    }
                })
                .unwrap_or_else(|operands| collapse(operands, Criterion::LogicalOr))
            }
            leaf => leaf,
        }
    }
}

/// Simplify the operands of a group.
///
/// `identity` is the element that doesn't affect the group (`MatchAll` for AND) and `absorbing`
/// the one that decides it (`MatchNone` for AND). Returns `Ok` with the absorbing element if it
/// was found, otherwise `Err` with the remaining operands.
fn simplify_group(
    operands: Vec<Criterion>,
    identity: Criterion,
    absorbing: Criterion,
    same_kind: impl Fn(Criterion) -> Result<Vec<Criterion>, Criterion>,
) -> Result<Criterion, Vec<Criterion>> {
    let mut simplified: Vec<Criterion> = Vec::with_capacity(operands.len());

    for operand in operands {
        let operand = operand.simplify();

        if operand == absorbing {
            return Ok(absorbing);
        }
        if operand == identity {
            continue;
        }

        // Simplified nested groups of the same kind contain neither identity nor absorbing
        // elements, so their operands can be spliced in directly
        let spliced = match same_kind(operand) {
            Ok(nested) => nested,
            Err(other) => vec![other],
        };

        for criterion in spliced {
            if !simplified.contains(&criterion) {
                simplified.push(criterion);
            }
        }
    }

    if simplified.is_empty() {
        Ok(identity)
    } else {
        Err(simplified)
    }
}

fn collapse(mut operands: Vec<Criterion>, group: fn(Vec<Criterion>) -> Criterion) -> Criterion {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        group(operands)
    }
}

/// Outcome of resolving permissions for a module/function.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCriterion {
    /// Unconditional access; no filtering needed.
    Allowed,
    /// No access at all. Callers should produce an empty result, not an error.
    Denied,
    /// Access limited to content matching the criterion.
    Filtered(Criterion),
}

impl PermissionCriterion {
    /// The criterion form, suitable for direct use by a query layer.
    pub fn into_criterion(self) -> Criterion {
        match self {
            PermissionCriterion::Allowed => Criterion::MatchAll,
            PermissionCriterion::Denied => Criterion::MatchNone,
            PermissionCriterion::Filtered(criterion) => criterion,
        }
    }

    /// Simplify a filter, turning it into a definitive answer where possible.
    pub fn simplify(self) -> PermissionCriterion {
        match self {
            PermissionCriterion::Filtered(criterion) => {
                let criterion = criterion.simplify();

                if criterion.is_match_all() {
                    PermissionCriterion::Allowed
                } else if criterion.is_match_none() {
                    PermissionCriterion::Denied
                } else {
                    PermissionCriterion::Filtered(criterion)
                }
            }
            decided => decided,
        }
    }
}

impl From<bool> for PermissionCriterion {
    fn from(allowed: bool) -> Self {
        if allowed {
            PermissionCriterion::Allowed
        } else {
            PermissionCriterion::Denied
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn group(f: &mut fmt::Formatter<'_>, name: &str, operands: &[Criterion]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (index, operand) in operands.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{operand}")?;
            }
            f.write_str(")")
        }

        match self {
            Criterion::Predicate(predicate) => write!(f, "{predicate}"),
            Criterion::LogicalAnd(operands) => group(f, "AND", operands),
            Criterion::LogicalOr(operands) => group(f, "OR", operands),
            Criterion::MatchAll => f.write_str("MATCH_ALL"),
            Criterion::MatchNone => f.write_str("MATCH_NONE"),
        }
    }
}

impl Display for PermissionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionCriterion::Allowed => f.write_str("allowed"),
            PermissionCriterion::Denied => f.write_str("denied"),
            PermissionCriterion::Filtered(criterion) => write!(f, "filtered by {criterion}"),
        }
    }
}
