//! Play command - repeated games between two stock strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_takeaway(), play_rook(), play_coloring(), report_results()
//! - Level 3: strategy construction
//! - Level 4: argument types, formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use gamelab_core::games::{
    Coloring, GreedyColoring, OrderedColoring, RandomColoring, Rook, RookStrategy, Takeaway, TakeawayStrategy,
};
use gamelab_core::{Graph, Player, Referee, RefereeConfig, Ruleset, Strategy};
use gamelab_tournament::{play_match, MatchResult};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Subcommand)]
pub enum PlayCommand {
    /// Toothpick takeaway: take 1..=K from a pile, last take wins
    Takeaway(TakeawayArgs),
    /// Unbalanced rook: move down or right, reaching the corner wins
    Rook(RookArgs),
    /// Graph coloring: first player wants a full proper coloring
    Coloring(ColoringArgs),
}

/// Options shared by every game
#[derive(Args, Clone, Debug)]
pub struct MatchOptions {
    /// Number of games to play (first player always moves first)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Proposals a player may make per turn before forfeiting
    #[arg(long, default_value = "16")]
    pub max_attempts: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TakeawayArgs {
    /// Toothpicks in the starting pile
    #[arg(long, default_value = "10")]
    pub toothpicks: u32,

    /// Most toothpicks one move may take
    #[arg(long, default_value = "2")]
    pub max_take: u32,

    #[arg(long, value_enum, default_value = "random")]
    pub first: TakeawayKind,

    #[arg(long, value_enum, default_value = "random")]
    pub second: TakeawayKind,

    #[command(flatten)]
    pub options: MatchOptions,
}

#[derive(Args)]
pub struct RookArgs {
    /// Tiles the rook can travel down
    #[arg(long, default_value = "10")]
    pub rows: u32,

    /// Tiles the rook can travel right
    #[arg(long, default_value = "10")]
    pub cols: u32,

    #[arg(long, value_enum, default_value = "random")]
    pub first: RookKind,

    #[arg(long, value_enum, default_value = "diagonal")]
    pub second: RookKind,

    #[command(flatten)]
    pub options: MatchOptions,
}

#[derive(Args)]
pub struct ColoringArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of colors
    #[arg(long, default_value = "3")]
    pub colors: u32,

    #[arg(long, value_enum, default_value = "greedy")]
    pub first: ColoringKind,

    #[arg(long, value_enum, default_value = "random")]
    pub second: ColoringKind,

    #[command(flatten)]
    pub options: MatchOptions,
}

/// Graph for the coloring game
#[derive(Args, Clone, Debug)]
pub struct GraphArgs {
    #[command(flatten)]
    pub source: GraphSource,

    /// Edge count for --random
    #[arg(long, value_name = "M", requires = "random")]
    pub edges: Option<usize>,
}

/// Graph source: a JSON file or a generated family
#[derive(Args, Clone, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct GraphSource {
    /// Graph definition JSON file
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Path on N vertices
    #[arg(long, value_name = "N")]
    pub path: Option<usize>,

    /// Cycle on N vertices
    #[arg(long, value_name = "N")]
    pub cycle: Option<usize>,

    /// Complete graph on N vertices
    #[arg(long, value_name = "N")]
    pub complete: Option<usize>,

    /// Random graph on N vertices with --edges distinct edges
    #[arg(long, value_name = "N", requires = "edges")]
    pub random: Option<usize>,
}

impl GraphArgs {
    pub fn load<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        let source = &self.source;
        if let Some(path) = &source.graph {
            return Graph::load(path).with_context(|| format!("Failed to load graph: {}", path.display()));
        }
        if let Some(n) = source.path {
            return Ok(Graph::path(n));
        }
        if let Some(n) = source.cycle {
            return Ok(Graph::cycle(n));
        }
        if let Some(n) = source.complete {
            return Ok(Graph::complete(n));
        }
        if let Some(n) = source.random {
            let edges = self.edges.context("--random needs --edges")?;
            return Ok(Graph::random(n, edges, rng)?);
        }
        anyhow::bail!("one of --graph, --path, --cycle, --complete or --random is required")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TakeawayKind {
    Random,
    TakeOne,
    TakeTwo,
    /// Always leave a multiple of max-take + 1
    Optimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RookKind {
    Random,
    Diagonal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColoringKind {
    Random,
    Greedy,
    /// Random vertex and color orders, fixed at construction
    Ordered,
}

/// Match report for display
#[derive(Clone, Debug, Serialize)]
struct MatchReport {
    game: String,
    first: String,
    second: String,
    #[serde(flatten)]
    result: MatchResult,
    first_win_rate: f32,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(command: PlayCommand, seed: Option<u64>) -> Result<()> {
    let mut rng = create_rng(seed);

    let (report, options) = match command {
        PlayCommand::Takeaway(args) => (play_takeaway(&args, &mut rng)?, args.options),
        PlayCommand::Rook(args) => (play_rook(&args, &mut rng)?, args.options),
        PlayCommand::Coloring(args) => (play_coloring(&args, &mut rng)?, args.options),
    };

    report_results(&report, &options)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_takeaway(args: &TakeawayArgs, rng: &mut ChaCha8Rng) -> Result<MatchReport> {
    let rules = Takeaway::new(args.toothpicks, args.max_take)?;
    let first = takeaway_strategy(args.first, args, rng);
    let second = takeaway_strategy(args.second, args, rng);
    play(rules, first, second, &args.options)
}

fn play_rook(args: &RookArgs, rng: &mut ChaCha8Rng) -> Result<MatchReport> {
    let rules = Rook::new(args.rows, args.cols)?;
    let first = rook_strategy(args.first, rng);
    let second = rook_strategy(args.second, rng);
    play(rules, first, second, &args.options)
}

fn play_coloring(args: &ColoringArgs, rng: &mut ChaCha8Rng) -> Result<MatchReport> {
    let graph = args.graph.load(rng)?;
    tracing::info!("Loaded graph: {} vertices, {} edges", graph.len(), graph.edge_count());

    let vertices = graph.len();
    let rules = Coloring::new(graph, args.colors)?;
    let colors = rules.useful_colors();
    let first = coloring_strategy(args.first, vertices, colors, rng);
    let second = coloring_strategy(args.second, vertices, colors, rng);
    play(rules, first, second, &args.options)
}

/// Play the match and build a report
fn play<G, A, B>(rules: G, first: A, second: B, options: &MatchOptions) -> Result<MatchReport>
where
    G: Ruleset,
    A: Strategy<G>,
    B: Strategy<G>,
{
    let game = rules.name().to_string();
    let referee = Referee::with_config(rules, RefereeConfig::default().with_max_attempts(options.max_attempts));
    let mut board = referee.new_board();
    let mut first = Player::new(format!("first ({})", first.name()), first);
    let mut second = Player::new(format!("second ({})", second.name()), second);

    tracing::info!("Starting match: {} vs {} ({} games of {})", first.name, second.name, options.games, game);

    let result = play_match(&referee, &mut board, &mut first, &mut second, options.games)?;

    Ok(MatchReport {
        game,
        first: first.name,
        second: second.name,
        first_win_rate: result.first_win_rate(),
        avg_turns: result.avg_turns(),
        result,
    })
}

fn report_results(report: &MatchReport, options: &MatchOptions) -> Result<()> {
    if options.json {
        print_json_results(report)
    } else {
        print_text_results(report);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn takeaway_strategy(kind: TakeawayKind, args: &TakeawayArgs, rng: &mut ChaCha8Rng) -> TakeawayStrategy {
    match kind {
        TakeawayKind::Random => TakeawayStrategy::random(rng.gen()),
        TakeawayKind::TakeOne => TakeawayStrategy::TakeOne,
        TakeawayKind::TakeTwo => TakeawayStrategy::TakeTwo,
        TakeawayKind::Optimal => TakeawayStrategy::optimal(args.max_take, args.toothpicks),
    }
}

fn rook_strategy(kind: RookKind, rng: &mut ChaCha8Rng) -> RookStrategy {
    match kind {
        RookKind::Random => RookStrategy::random(rng.gen()),
        RookKind::Diagonal => RookStrategy::Diagonal,
    }
}

fn coloring_strategy(
    kind: ColoringKind,
    vertices: usize,
    colors: u32,
    rng: &mut ChaCha8Rng,
) -> Box<dyn Strategy<Coloring>> {
    match kind {
        ColoringKind::Random => Box::new(RandomColoring::new(rng.gen())),
        ColoringKind::Greedy => Box::new(GreedyColoring::new(rng.gen())),
        ColoringKind::Ordered => Box::new(OrderedColoring::random_init("ordered", vertices, colors, rng)),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(report: &MatchReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn print_text_results(report: &MatchReport) {
    let result = &report.result;

    println!("\n=== {} ===", report.game);
    println!("{} vs {}", report.first, report.second);
    println!("Total games: {}", result.games_played);
    println!(
        "First wins:  {} ({:.1}%)",
        result.first_wins,
        result.first_win_rate() * 100.0
    );
    println!(
        "Second wins: {} ({:.1}%)",
        result.second_wins,
        result.second_win_rate() * 100.0
    );
    println!("Forfeits:    {}", result.forfeits);
    println!("Avg length:  {:.1} moves", result.avg_turns());
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
