//! Construction errors for games, graphs and rulesets

/// Configuration errors. Illegal moves are never errors; only a
/// malformed setup is.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("players in one game need distinct names, both are called {0:?}")]
    DuplicatePlayerName(String),

    #[error("graph coloring needs at least one color")]
    NoColors,

    #[error("vertex {vertex} lists neighbor {neighbor}, but the graph has {len} vertices")]
    DanglingEdge {
        vertex: usize,
        neighbor: usize,
        len: usize,
    },

    #[error("vertex {0} is adjacent to itself")]
    SelfLoop(usize),

    #[error("{vertices} vertices hold at most {max} distinct edges, asked for {edges}")]
    TooManyEdges { vertices: usize, edges: usize, max: usize },

    #[error("takeaway limit must be at least 1")]
    ZeroTakeLimit,

    #[error("rook board must leave at least one tile to travel")]
    EmptyRookBoard,

    #[error("failed to read graph definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse graph definition: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
