//! State machine trait for game evaluators.
//!
//! Search strategies query a game exclusively through `StateMachine`:
//! - Which states are terminal and what each role scores
//! - What moves are legal for a role
//! - How a joint move transforms a state

use crate::core::{GameRng, GameState, JointMove, Move, Role, RoleId};
use crate::error::{Error, Result};

/// Game evaluator trait.
///
/// ## Implementation Notes
///
/// - Every query must be a pure function of its arguments: asking twice
///   gives the same answer
/// - `goal`: Return `Error::GoalDefinition` unless exactly one goal holds
/// - `legal_moves`: Return moves in a stable order; searches break ties
///   by that order
/// - `next_state`: Expects one move per role, in role order
pub trait StateMachine {
    /// The ordered role list.
    fn roles(&self) -> &[Role];

    /// The memoized initial state.
    fn initial_state(&self) -> GameState;

    /// Check if the game is over in `state`.
    fn is_terminal(&self, state: &GameState) -> bool;

    /// A role's goal value in 0..=100.
    fn goal(&self, state: &GameState, role: RoleId) -> Result<u8>;

    /// Legal moves of a role, in declaration order.
    fn legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>>;

    /// Successor of `state` under `joint`.
    fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState>;

    // === Convenience Methods ===

    fn role_count(&self) -> usize {
        self.roles().len()
    }

    /// Look up a role by name.
    fn role_index(&self, name: &str) -> Option<RoleId> {
        self.roles()
            .iter()
            .position(|r| r.name() == name)
            .map(|i| RoleId(i as u8))
    }

    /// Goal values of every role, in role order.
    fn goals(&self, state: &GameState) -> Result<Vec<u8>> {
        RoleId::all(self.role_count())
            .map(|role| self.goal(state, role))
            .collect()
    }

    /// Every legal joint move in `state`.
    ///
    /// Enumerated with the first role varying slowest.
    fn legal_joint_moves(&self, state: &GameState) -> Result<Vec<JointMove>> {
        let per_role = RoleId::all(self.role_count())
            .map(|role| self.nonempty_legal_moves(state, role))
            .collect::<Result<Vec<_>>>()?;
        Ok(cartesian(&per_role))
    }

    /// Every legal joint move in which `role` plays `mv`.
    fn legal_joint_moves_for(
        &self,
        state: &GameState,
        role: RoleId,
        mv: &Move,
    ) -> Result<Vec<JointMove>> {
        let per_role = RoleId::all(self.role_count())
            .map(|r| {
                if r == role {
                    Ok(vec![mv.clone()])
                } else {
                    self.nonempty_legal_moves(state, r)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(cartesian(&per_role))
    }

    /// Legal moves of a role, treating an empty set as an error.
    fn nonempty_legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>> {
        let moves = self.legal_moves(state, role)?;
        if moves.is_empty() {
            return Err(Error::NoLegalMoves { role });
        }
        Ok(moves)
    }

    /// A uniformly random legal joint move.
    fn random_joint_move(&self, state: &GameState, rng: &mut GameRng) -> Result<JointMove> {
        let mut moves = Vec::with_capacity(self.role_count());
        for role in RoleId::all(self.role_count()) {
            let legal = self.nonempty_legal_moves(state, role)?;
            let idx = rng.gen_range_usize(0..legal.len());
            moves.push(legal[idx].clone());
        }
        Ok(JointMove::new(moves))
    }

    /// A random legal joint move in which `role` plays `mv`.
    fn random_joint_move_for(
        &self,
        state: &GameState,
        role: RoleId,
        mv: &Move,
        rng: &mut GameRng,
    ) -> Result<JointMove> {
        let mut moves = Vec::with_capacity(self.role_count());
        for r in RoleId::all(self.role_count()) {
            if r == role {
                moves.push(mv.clone());
                continue;
            }
            let legal = self.nonempty_legal_moves(state, r)?;
            let idx = rng.gen_range_usize(0..legal.len());
            moves.push(legal[idx].clone());
        }
        Ok(JointMove::new(moves))
    }

    /// Successor under a random legal joint move.
    fn random_next_state(&self, state: &GameState, rng: &mut GameRng) -> Result<GameState> {
        let joint = self.random_joint_move(state, rng)?;
        self.next_state(state, &joint)
    }

    /// Play random joint moves until the game ends.
    ///
    /// Returns the terminal state and the number of moves played.
    fn perform_depth_charge(
        &self,
        state: &GameState,
        rng: &mut GameRng,
    ) -> Result<(GameState, usize)> {
        let mut current = state.clone();
        let mut depth = 0;
        while !self.is_terminal(&current) {
            current = self.random_next_state(&current, rng)?;
            depth += 1;
        }
        Ok((current, depth))
    }
}

/// Cartesian product of per-role move lists, first role slowest.
fn cartesian(per_role: &[Vec<Move>]) -> Vec<JointMove> {
    let total: usize = per_role.iter().map(Vec::len).product();
    let mut out = Vec::with_capacity(total);
    if total == 0 {
        return out;
    }

    let mut indices = vec![0usize; per_role.len()];
    loop {
        out.push(JointMove::new(
            indices
                .iter()
                .zip(per_role)
                .map(|(&i, moves)| moves[i].clone()),
        ));

        // Advance like an odometer, last role fastest.
        let mut pos = per_role.len();
        loop {
            if pos == 0 {
                return out;
            }
            pos -= 1;
            indices[pos] += 1;
            if indices[pos] < per_role[pos].len() {
                break;
            }
            indices[pos] = 0;
        }
    }
}
