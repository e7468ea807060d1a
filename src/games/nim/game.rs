//! Subtraction game compiled to a propnet.

use crate::core::RoleId;
use crate::error::Result;
use crate::propnet::{ComponentId, PropNet, PropNetBuilder, PropNetStateMachine};

const WHITE: RoleId = RoleId::new(0);
const BLACK: RoleId = RoleId::new(1);

/// Builder for the subtraction game.
#[derive(Clone, Debug)]
pub struct NimBuilder {
    count: usize,
}

impl Default for NimBuilder {
    fn default() -> Self {
        Self { count: 5 }
    }
}

struct Control {
    own: ComponentId,
    other: ComponentId,
}

impl NimBuilder {
    /// Start with `count` objects on the pile.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Build the compiled graph.
    pub fn build_net(&self) -> Result<PropNet> {
        let n = self.count;
        let mut b = PropNetBuilder::new(["white", "black"]);
        let init = b.init();

        let counts: Vec<ComponentId> = (0..=n).map(|k| b.base(format!("count_{k}"))).collect();
        let control_white = b.base("control_white");
        let control_black = b.base("control_black");

        let mut take1 = Vec::new();
        let mut take2 = Vec::new();
        for role in [WHITE, BLACK] {
            take1.push(b.input(role, "take1"));
            take2.push(b.input(role, "take2"));
        }
        let took1 = b.or(&take1);
        let took2 = b.or(&take2);
        let not_took1 = b.not(took1);
        let not_took2 = b.not(took2);

        // Pile size.
        for k in 0..=n {
            let mut sources = Vec::new();
            if k == n {
                sources.push(init);
            }
            if k < n {
                sources.push(b.and(&[counts[k + 1], took1]));
            }
            if k + 2 <= n {
                sources.push(b.and(&[counts[k + 2], took2]));
            }
            sources.push(b.and(&[counts[k], not_took1, not_took2]));
            let next = b.or(&sources);
            b.next(counts[k], next);
        }

        // Turn order.
        let white_next = b.or(&[init, control_black]);
        b.next(control_white, white_next);
        b.next(control_black, control_white);

        let empty = counts[0];
        let not_empty = b.not(empty);
        let at_least_two: Option<ComponentId> = (n >= 2).then(|| b.or(&counts[2..]));

        for (role, control) in [
            (
                WHITE,
                Control {
                    own: control_white,
                    other: control_black,
                },
            ),
            (
                BLACK,
                Control {
                    own: control_black,
                    other: control_white,
                },
            ),
        ] {
            let legal1 = b.legal(role, "take1");
            let can1 = b.and(&[control.own, not_empty]);
            b.wire(can1, legal1);

            // Never legal on a pile of one.
            let legal2 = b.legal(role, "take2");
            if let Some(two) = at_least_two {
                let can2 = b.and(&[control.own, two]);
                b.wire(can2, legal2);
            }

            let wait = b.legal(role, "noop");
            let must_wait = b.and(&[control.other, not_empty]);
            b.wire(must_wait, wait);

            // Whoever took the last object hands control to the other role.
            let won = b.and(&[empty, control.other]);
            let win = b.goal(role, 100);
            b.wire(won, win);
            let lost = b.not(won);
            let lose = b.goal(role, 0);
            b.wire(lost, lose);
        }

        let terminal = b.terminal();
        b.wire(empty, terminal);

        b.build()
    }

    /// Build the graph and wrap it in a state machine.
    pub fn build(&self) -> Result<PropNetStateMachine> {
        PropNetStateMachine::new(self.build_net()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{JointMove, Move};
    use crate::rules::StateMachine;

    fn play(machine: &PropNetStateMachine, moves: &[(&str, &str)]) -> crate::core::GameState {
        let mut state = machine.initial_state();
        for (w, b) in moves {
            let joint = JointMove::new([Move::new(*w), Move::new(*b)]);
            state = machine.next_state(&state, &joint).unwrap();
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let machine = NimBuilder::new(4).build().unwrap();
        let state = machine.initial_state();

        assert_eq!(
            machine.net().describe(&state),
            "{count_4, control_white}"
        );
        assert!(!machine.is_terminal(&state));
        assert_eq!(machine.goals(&state).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_legal_moves_follow_control() {
        let machine = NimBuilder::new(4).build().unwrap();
        let state = machine.initial_state();

        assert_eq!(
            machine.legal_moves(&state, WHITE).unwrap(),
            vec![Move::new("take1"), Move::new("take2")]
        );
        assert_eq!(machine.legal_moves(&state, BLACK).unwrap(), vec![Move::noop()]);

        let after = play(&machine, &[("take2", "noop")]);
        assert_eq!(machine.net().describe(&after), "{count_2, control_black}");
        assert_eq!(machine.legal_moves(&after, WHITE).unwrap(), vec![Move::noop()]);
    }

    #[test]
    fn test_take2_not_legal_on_one() {
        let machine = NimBuilder::new(3).build().unwrap();
        let state = play(&machine, &[("take2", "noop")]);

        assert_eq!(machine.net().describe(&state), "{count_1, control_black}");
        assert_eq!(
            machine.legal_moves(&state, BLACK).unwrap(),
            vec![Move::new("take1")]
        );
    }

    #[test]
    fn test_last_take_wins() {
        let machine = NimBuilder::new(3).build().unwrap();
        let state = play(&machine, &[("take1", "noop"), ("noop", "take2")]);

        assert!(machine.is_terminal(&state));
        assert_eq!(machine.goals(&state).unwrap(), vec![0, 100]);
        assert!(machine.legal_moves(&state, WHITE).unwrap().is_empty());
        assert!(machine.legal_moves(&state, BLACK).unwrap().is_empty());
    }

    #[test]
    fn test_small_piles_build() {
        for n in 0..3 {
            let machine = NimBuilder::new(n).build().unwrap();
            assert_eq!(machine.is_terminal(&machine.initial_state()), n == 0);
        }
    }
}
