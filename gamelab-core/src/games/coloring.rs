//! Graph coloring game
//!
//! Two players alternate coloring vertices with one of `k` colors. A vertex
//! may take a color only if no neighbor already has it. Player 1 wants the
//! graph fully colored; Player 2 wins as soon as some uncolored vertex has
//! no color left.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{CoreError, Result};
use crate::graph::{Graph, Vertex};
use crate::ruleset::{Ruleset, Seat};
use crate::strategy::{Evolvable, Strategy, Traits};

/// Trait key for the vertex visiting order
pub const VERTICES: &str = "vertices";
/// Trait key for the color preference order
pub const COLORS: &str = "colors";

/// Color `vertex` with `color` (colors are 1-based)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColoringMove {
    pub vertex: usize,
    pub color: u32,
}

/// Coloring ruleset over a fixed graph with `colors` colors
#[derive(Clone, Debug)]
pub struct Coloring {
    graph: Graph,
    colors: u32,
}

impl Coloring {
    pub fn new(graph: Graph, colors: u32) -> Result<Self> {
        if colors == 0 {
            return Err(CoreError::NoColors);
        }
        Ok(Self { graph, colors })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn colors(&self) -> u32 {
        self.colors
    }

    /// Colors a preference order needs: no vertex can use more than
    /// `max_degree + 1`
    pub fn useful_colors(&self) -> u32 {
        let cap = u32::try_from(self.graph.max_degree()).map_or(u32::MAX, |d| d.saturating_add(1));
        self.colors.min(cap)
    }
}

/// Distinct colors in `1..=colors` used by neighbors of `vertex`, ascending
pub fn taken_colors(state: &[Vertex], vertex: usize, colors: u32) -> Vec<u32> {
    let mut taken: Vec<u32> = state[vertex]
        .adjacent
        .iter()
        .filter_map(|&n| state[n].color)
        .filter(|c| (1..=colors).contains(c))
        .collect();
    taken.sort_unstable();
    taken.dedup();
    taken
}

pub fn is_fully_colored(state: &[Vertex]) -> bool {
    state.iter().all(|v| v.color.is_some())
}

/// Some uncolored vertex has every color taken by a neighbor
pub fn has_stuck_vertex(state: &[Vertex], colors: u32) -> bool {
    (0..state.len()).any(|v| {
        state[v].color.is_none()
            && state[v].adjacent.len() >= colors as usize
            && taken_colors(state, v, colors).len() == colors as usize
    })
}

/// The `n`-th (0-based) color of `1..` not in `taken`, which must be ascending
fn nth_free_color(taken: &[u32], n: u32) -> u32 {
    let mut color = n + 1;
    for &t in taken {
        if t <= color {
            color += 1;
        } else {
            break;
        }
    }
    color
}

impl Ruleset for Coloring {
    type State = Vec<Vertex>;
    type Move = ColoringMove;
    type Bounds = u32;

    fn name(&self) -> &str {
        "graph-coloring"
    }

    fn initial_state(&self) -> Vec<Vertex> {
        self.graph.to_vertices()
    }

    fn bounds(&self) -> u32 {
        self.colors
    }

    fn is_legal(&self, board: &Board<Self>, proposed: Option<&ColoringMove>) -> bool {
        let Some(mv) = proposed else {
            return false;
        };
        let state = board.state();
        let colors = *board.bounds();

        let Some(vertex) = state.get(mv.vertex) else {
            return false;
        };
        if vertex.color.is_some() || mv.color == 0 || mv.color > colors {
            return false;
        }
        vertex
            .adjacent
            .iter()
            .all(|&n| state[n].color != Some(mv.color))
    }

    fn is_game_over(&self, board: &Board<Self>) -> bool {
        let state = board.state();
        is_fully_colored(state) || has_stuck_vertex(state, *board.bounds())
    }

    fn update_board(&self, board: &mut Board<Self>, actor: &str, mv: ColoringMove) {
        let fingerprint = self.fingerprint(board.state());
        board.log_move(fingerprint, actor, mv);
        board.state_mut()[mv.vertex].color = Some(mv.color);
    }

    fn declare_winner(&self, board: &Board<Self>, _to_move: Seat) -> Seat {
        if is_fully_colored(board.state()) {
            Seat::First
        } else {
            Seat::Second
        }
    }

    fn fingerprint(&self, state: &Vec<Vertex>) -> String {
        state
            .iter()
            .map(|v| match v.color {
                Some(c) => c.to_string(),
                None => "-".to_string(),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Random vertex, random color. Often illegal; relies on the referee to retry.
#[derive(Clone, Debug)]
pub struct RandomColoring {
    rng: ChaCha8Rng,
}

impl RandomColoring {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy<Coloring> for RandomColoring {
    fn name(&self) -> &str {
        "random"
    }

    fn propose(&mut self, board: &Board<Coloring>) -> Option<ColoringMove> {
        let len = board.state().len();
        let colors = *board.bounds();
        if len == 0 || colors == 0 {
            return None;
        }
        Some(ColoringMove {
            vertex: self.rng.gen_range(0..len),
            color: self.rng.gen_range(1..=colors),
        })
    }
}

/// Lowest-index uncolored vertex that still has a legal color, colored
/// with a random legal color. Never proposes an illegal move.
#[derive(Clone, Debug)]
pub struct GreedyColoring {
    rng: ChaCha8Rng,
}

impl GreedyColoring {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy<Coloring> for GreedyColoring {
    fn name(&self) -> &str {
        "greedy"
    }

    fn propose(&mut self, board: &Board<Coloring>) -> Option<ColoringMove> {
        let state = board.state();
        let colors = *board.bounds();
        for vertex in 0..state.len() {
            if state[vertex].color.is_some() {
                continue;
            }
            let taken = taken_colors(state, vertex, colors);
            let free = colors - taken.len() as u32;
            if free > 0 {
                let color = nth_free_color(&taken, self.rng.gen_range(0..free));
                return Some(ColoringMove { vertex, color });
            }
        }
        None
    }
}

/// Follows a fixed vertex visiting order and color preference order.
///
/// The first uncolored vertex in visiting order is colored with the first
/// preferred color none of its neighbors use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedColoring {
    name: String,
    traits: Traits,
}

impl OrderedColoring {
    pub fn new(name: &str, vertex_order: Vec<u32>, color_order: Vec<u32>) -> Self {
        let mut traits = Traits::new();
        traits.insert(VERTICES.to_string(), vertex_order);
        traits.insert(COLORS.to_string(), color_order);
        Self {
            name: name.to_string(),
            traits,
        }
    }

    /// Identity orders: vertices `0..n`, colors `1..=k`
    pub fn baseline(name: &str, vertices: usize, colors: u32) -> Self {
        Self::new(name, (0..vertices as u32).collect(), (1..=colors).collect())
    }

    /// Orders shuffled once here and fixed afterwards
    pub fn random_init<R: Rng>(name: &str, vertices: usize, colors: u32, rng: &mut R) -> Self {
        let mut vertex_order: Vec<u32> = (0..vertices as u32).collect();
        let mut color_order: Vec<u32> = (1..=colors).collect();
        vertex_order.shuffle(rng);
        color_order.shuffle(rng);
        Self::new(name, vertex_order, color_order)
    }

    pub fn vertex_order(&self) -> &[u32] {
        self.traits.get(VERTICES).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn color_order(&self) -> &[u32] {
        self.traits.get(COLORS).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Strategy<Coloring> for OrderedColoring {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose(&mut self, board: &Board<Coloring>) -> Option<ColoringMove> {
        let state = board.state();
        for &vertex in self.vertex_order() {
            let vertex = vertex as usize;
            match state.get(vertex) {
                Some(v) if v.color.is_none() => {}
                _ => continue,
            }
            let taken: Vec<u32> = state[vertex]
                .adjacent
                .iter()
                .filter_map(|&n| state[n].color)
                .collect();
            if let Some(&color) = self.color_order().iter().find(|c| !taken.contains(c)) {
                return Some(ColoringMove { vertex, color });
            }
        }
        None
    }
}

impl Evolvable for OrderedColoring {
    fn traits(&self) -> &Traits {
        &self.traits
    }

    fn with_traits(&self, name: &str, traits: Traits) -> Self {
        Self {
            name: name.to_string(),
            traits,
        }
    }
}
