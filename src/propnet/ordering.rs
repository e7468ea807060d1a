//! Evaluation order for dependent components.
//!
//! Independent components (init marker, base and input propositions) are
//! assigned from outside. Every other component is ordered after all of its
//! inputs by repeated passes over the not-yet-ordered set. A pass that adds
//! nothing means the remaining components sit on a cycle.

use tracing::debug;

use crate::error::{Error, Result};

use super::component::ComponentId;
use super::net::PropNet;

/// Compute an evaluation order for every dependent component.
///
/// Components that become ready in the same pass keep their id order, so
/// the result is deterministic.
pub fn order(net: &PropNet) -> Result<Vec<ComponentId>> {
    let independent = net.independent_mask();
    let mut ready = independent.clone();
    let mut pending: Vec<ComponentId> = independent
        .iter()
        .enumerate()
        .filter(|(_, &ind)| !ind)
        .map(|(i, _)| ComponentId(i as u32))
        .collect();
    let mut ordered = Vec::with_capacity(pending.len());
    let mut passes = 0usize;

    while !pending.is_empty() {
        passes += 1;
        let before = ordered.len();

        pending.retain(|&id| {
            let satisfied = net
                .component(id)
                .is_some_and(|c| c.inputs.iter().all(|i| ready[i.index()]));
            if satisfied {
                ready[id.index()] = true;
                ordered.push(id);
            }
            !satisfied
        });

        if ordered.len() == before {
            let first = net.label(pending[0]);
            debug!(passes, unordered = pending.len(), %first, "ordering stalled");
            return Err(Error::CyclicDependency {
                unordered: pending.len(),
                first,
            });
        }
    }

    debug!(passes, ordered = ordered.len(), "ordered components");
    Ok(ordered)
}

/// Check that `order` lists every dependent component exactly once, each
/// after all of its inputs.
#[must_use]
pub fn verify_order(net: &PropNet, order: &[ComponentId]) -> bool {
    let independent = net.independent_mask();
    let mut position = vec![None; net.len()];
    for (pos, id) in order.iter().enumerate() {
        if independent.get(id.index()).copied().unwrap_or(true) {
            return false;
        }
        match position.get_mut(id.index()) {
            Some(slot) if slot.is_none() => *slot = Some(pos),
            _ => return false,
        }
    }

    let dependent = independent.iter().filter(|&&ind| !ind).count();
    if dependent != order.len() {
        return false;
    }

    order.iter().enumerate().all(|(pos, id)| {
        net.component(*id).is_some_and(|c| {
            c.inputs.iter().all(|input| {
                independent[input.index()]
                    || position[input.index()].is_some_and(|p: usize| p < pos)
            })
        })
    })
}
