//! Evolution command - breed graph-coloring strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: setup_evolution(), run_evolution(), report_results()
//! - Level 3: build_evolution_config(), progress bar
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use gamelab_core::games::{Coloring, OrderedColoring};
use gamelab_core::{Player, RefereeConfig};
use gamelab_evolve::{EvolutionConfig, EvolutionResult, GenerationStats, GeneticAlgorithm};

use rand_chacha::ChaCha8Rng;

use crate::match_cmd::{create_rng, GraphArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct EvolveArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Number of colors
    #[arg(long, default_value = "3")]
    pub colors: u32,

    /// Population size per seat
    #[arg(long, default_value = "100")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub generations: usize,

    /// Opponents each player meets per tournament
    #[arg(long, default_value = "10")]
    pub games_per_player: usize,

    /// Chance of a swap mutation per trait per child (0.0-1.0)
    #[arg(long, default_value = "0.025")]
    pub mutation_rate: f32,

    /// Survival threshold for the first generation
    #[arg(long, default_value = "0.5")]
    pub fitness: f32,

    /// Ceiling for the survival threshold
    #[arg(long, default_value = "0.9")]
    pub max_fitness: f32,

    /// Threshold increase per generation
    #[arg(long, default_value = "0.025")]
    pub fitness_increment: f32,

    /// Proposals a player may make per turn before forfeiting
    #[arg(long, default_value = "16")]
    pub max_attempts: usize,

    /// Clear win/loss records before every tournament
    #[arg(long)]
    pub reset_records: bool,

    /// Players per seat to show in the summary
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One player in the report
#[derive(Clone, Debug, Serialize)]
struct PlayerSummary {
    name: String,
    generation: u32,
    wins: u32,
    losses: u32,
    fitness: f32,
    vertex_order: Vec<u32>,
    color_order: Vec<u32>,
}

impl From<&Player<OrderedColoring>> for PlayerSummary {
    fn from(player: &Player<OrderedColoring>) -> Self {
        Self {
            name: player.name.clone(),
            generation: player.generation,
            wins: player.wins,
            losses: player.losses,
            fitness: player.fitness(),
            vertex_order: player.strategy.vertex_order().to_vec(),
            color_order: player.strategy.color_order().to_vec(),
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evolution command
///
/// 1. Build the ruleset and genetic algorithm
/// 2. Run the evolution loop with a progress bar
/// 3. Report results
pub fn run(args: EvolveArgs, seed: Option<u64>) -> Result<()> {
    let mut rng = create_rng(seed);
    let ga = setup_evolution(&args, &mut rng)?;

    tracing::info!(
        "Starting evolution: pop={}, gen={}, games={}, fitness={}..{}",
        args.population,
        args.generations,
        args.games_per_player,
        args.fitness,
        args.max_fitness
    );

    let result = run_evolution(&ga, &args, &mut rng)?;

    report_results(&result, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn setup_evolution(args: &EvolveArgs, rng: &mut ChaCha8Rng) -> Result<GeneticAlgorithm<Coloring, OrderedColoring>> {
    let graph = args.graph.load(rng)?;
    tracing::info!("Loaded graph: {} vertices, {} edges", graph.len(), graph.edge_count());

    let vertices = graph.len();
    let rules = Coloring::new(graph, args.colors)?;
    let baseline = OrderedColoring::baseline("baseline", vertices, rules.useful_colors());
    let ga = GeneticAlgorithm::new(rules, baseline, build_evolution_config(args))?;
    Ok(ga)
}

fn run_evolution(
    ga: &GeneticAlgorithm<Coloring, OrderedColoring>,
    args: &EvolveArgs,
    rng: &mut ChaCha8Rng,
) -> Result<EvolutionResult<OrderedColoring>> {
    let progress = create_progress_bar(args);

    let result = ga.evolve_with_callback(rng, |stats: &GenerationStats| {
        progress.set_message(format!(
            "threshold {:.3}, survivors {}/{}",
            stats.threshold, stats.first_survivors, stats.second_survivors
        ));
        progress.inc(1);
    });

    progress.finish_and_clear();
    Ok(result?)
}

fn report_results(result: &EvolutionResult<OrderedColoring>, args: &EvolveArgs) -> Result<()> {
    if args.json {
        print_json_results(result, args.top)
    } else {
        print_summary(result, args.top);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn build_evolution_config(args: &EvolveArgs) -> EvolutionConfig {
    EvolutionConfig {
        population_size: args.population,
        generations: args.generations,
        games_per_player: args.games_per_player,
        fitness: args.fitness,
        max_fitness: args.max_fitness,
        fitness_increment: args.fitness_increment,
        mutation_rate: args.mutation_rate,
        reset_records: args.reset_records,
        referee: RefereeConfig::default().with_max_attempts(args.max_attempts),
    }
}

fn create_progress_bar(args: &EvolveArgs) -> ProgressBar {
    if args.json {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(args.generations as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} generations {msg} ({eta})") {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(result: &EvolutionResult<OrderedColoring>, top: usize) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        generations_run: usize,
        history: &'a [GenerationStats],
        first: Vec<PlayerSummary>,
        second: Vec<PlayerSummary>,
    }

    let output = JsonOutput {
        generations_run: result.history.len(),
        history: &result.history,
        first: result.first.iter().take(top).map(PlayerSummary::from).collect(),
        second: result.second.iter().take(top).map(PlayerSummary::from).collect(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);
    Ok(())
}

fn print_summary(result: &EvolutionResult<OrderedColoring>, top: usize) {
    println!("\n=== Evolution Complete ===");
    println!("Generations: {}", result.history.len());
    if let Some(last) = result.history.last() {
        println!(
            "Final threshold: {:.3} (survivors {} / {})",
            last.threshold, last.first_survivors, last.second_survivors
        );
    }

    for (label, players) in [("Player 1", &result.first), ("Player 2", &result.second)] {
        println!("\n{} top {}:", label, top.min(players.len()));
        for player in players.iter().take(top) {
            println!(
                "  {:<20} gen {:>3}  {:>4}W/{:<4}L  fitness {:.3}  vertices {:?}  colors {:?}",
                player.name,
                player.generation,
                player.wins,
                player.losses,
                player.fitness(),
                player.strategy.vertex_order(),
                player.strategy.color_order()
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
