//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, 2-opt sweeps, DP solves)
//! - **DEBUG**: Applied moves and new DP bests
//! - **TRACE**: Individual 2-opt candidates
//!
//! Warnings and errors from any TourForge crate are printed with their
//! message and fields, whether or not they carry an `event` name.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_FILTER: &str =
    "tourforge_solver=info,tourforge_cli=info,tourforge_core=warn,tourforge_tsplib=warn";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the TourForge banner and sets up tracing. `RUST_LOG` overrides
/// the default filter: solver and CLI events at `info`, core and TSPLIB
/// warnings.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____                 _____
|_   _|__  _   _ _ __ |  ___|__  _ __ __ _  ___
  | |/ _ \| | | | '__|| |_ / _ \| '__/ _` |/ _ \
  | | (_) | |_| | |   |  _| (_) | | | (_| |  __/
  |_|\___/ \__,_|_|   |_|  \___/|_|  \__, |\___|
                                     |___/
"#;

    let version_line = format!("           v{} - TSP & GTSP Local Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let output = render_event(event);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

// Console line for a TourForge event; empty when it is not shown.
fn render_event(event: &Event<'_>) -> String {
    let metadata = event.metadata();
    if !metadata.target().starts_with("tourforge") {
        return String::new();
    }

    let mut visitor = EventVisitor::default();
    event.record(&mut visitor);
    format_line(metadata.level(), &visitor)
}

fn format_line(level: &Level, v: &EventVisitor) -> String {
    let output = format_event(v);
    if output.is_empty() && *level <= Level::WARN {
        return format_warning(level, v);
    }
    output
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    vertices: Option<u64>,
    clusters: Option<u64>,
    max_sweeps: Option<u64>,
    sweep: Option<u64>,
    sweeps: Option<u64>,
    moves: Option<u64>,
    round: Option<u64>,
    rounds: Option<u64>,
    cut_cluster: Option<u64>,
    duration_ms: Option<u64>,
    two_optimal: Option<bool>,
    mode: Option<String>,
    improvement: Option<String>,
    cost: Option<String>,
    initial_cost: Option<String>,
    output: Option<String>,
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl EventVisitor {
    fn remember(&mut self, field: &Field, value: String) {
        if field.name() != "message" {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.remember(field, s.clone());
        match field.name() {
            "message" => self.message = Some(s),
            "output" => self.output = Some(s),
            "event" => self.event = Some(s),
            "mode" => self.mode = Some(s),
            "improvement" => self.improvement = Some(s),
            "cost" => self.cost = Some(s),
            "initial_cost" => self.initial_cost = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.remember(field, value.to_string());
        match field.name() {
            "vertices" => self.vertices = Some(value),
            "clusters" => self.clusters = Some(value),
            "max_sweeps" => self.max_sweeps = Some(value),
            "sweep" => self.sweep = Some(value),
            "sweeps" => self.sweeps = Some(value),
            "moves" => self.moves = Some(value),
            "round" => self.round = Some(value),
            "rounds" => self.rounds = Some(value),
            "cut_cluster" => self.cut_cluster = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if value < 0 {
            self.remember(field, value.to_string());
        } else {
            self.record_u64(field, value as u64);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.remember(field, value.to_string());
        if field.name() == "two_optimal" {
            self.two_optimal = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "tsp_start" => format_solve_start(v, "TSP", v.vertices, "vertices"),
        "gtsp_start" => format_solve_start(v, "GTSP", v.clusters, "clusters"),
        "tsp_end" | "gtsp_end" => format_solve_end(v),
        "two_opt_start" => format_two_opt_start(v),
        "sweep_end" => format_sweep_end(v),
        "two_opt_end" => format_two_opt_end(v),
        "dp_solved" => format_dp_solved(v),
        "gtsp_round" => format_gtsp_round(v),
        "tour_written" => format_tour_written(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor, kind: &str, size: Option<u64>, unit: &str) -> String {
    mark_solve_start();
    format!(
        "{} {} Solving {} │ {} {} │ initial cost {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        kind.white().bold(),
        format_count(size.unwrap_or(0)).bright_yellow(),
        unit,
        v.initial_cost.as_deref().unwrap_or("N/A").bright_yellow()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let initial = v.initial_cost.as_deref().unwrap_or("N/A");
    let cost = v.cost.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving complete │ {} │ cost {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        cost.bright_green().bold()
    );

    output.push_str("\n\n");
    output.push_str(&box_rule('╔', '╗'));
    output.push_str(&box_row("Initial Cost:", initial));
    output.push_str(&box_row("Final Cost:", cost));
    if let Some(rounds) = v.rounds {
        output.push_str(&box_row("Rounds:", &format_count(rounds)));
    }
    if let Some(moves) = v.moves {
        output.push_str(&box_row("2-opt Moves:", &format_count(moves)));
    }
    output.push_str(&box_rule('╚', '╝'));

    output
}

fn box_rule(left: char, right: char) -> String {
    format!("{left}{}{right}\n", "═".repeat(58))
        .bright_cyan()
        .to_string()
}

fn box_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}\n",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_two_opt_start(v: &EventVisitor) -> String {
    format!(
        "{} {} 2-opt started │ {} vertices │ {} sweeps max │ {} improvement",
        format_elapsed(),
        "▶".bright_blue(),
        format_count(v.vertices.unwrap_or(0)).white(),
        format_count(v.max_sweeps.unwrap_or(0)).white(),
        v.mode.as_deref().unwrap_or("First").bright_magenta()
    )
}

fn format_sweep_end(v: &EventVisitor) -> String {
    let moves = v.moves.unwrap_or(0);
    let icon = if moves > 0 {
        "✓".bright_green().to_string()
    } else {
        "○".bright_black().to_string()
    };

    format!(
        "{} {} Sweep {:>6} │ {:>8} moves │ improvement {}",
        format_elapsed(),
        icon,
        format_count(v.sweep.unwrap_or(0)).bright_black(),
        format_count(moves).white(),
        v.improvement.as_deref().unwrap_or("0").bright_green()
    )
}

fn format_two_opt_end(v: &EventVisitor) -> String {
    let status = if v.two_optimal.unwrap_or(false) {
        "2-optimal".bright_green().bold().to_string()
    } else {
        "sweep limit".yellow().bold().to_string()
    };

    format!(
        "{} {} 2-opt ended │ {} │ {} sweeps │ {} moves │ improvement {} │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_count(v.sweeps.unwrap_or(0)).white(),
        format_count(v.moves.unwrap_or(0)).bright_magenta().bold(),
        v.improvement.as_deref().unwrap_or("0").bright_green(),
        status
    )
}

fn format_dp_solved(v: &EventVisitor) -> String {
    format!(
        "{} {} Cluster optimization │ {} clusters │ cut {} │ cost {}",
        format_elapsed(),
        "◆".bright_magenta(),
        format_count(v.clusters.unwrap_or(0)).white(),
        format_count(v.cut_cluster.unwrap_or(0)).white(),
        v.cost.as_deref().unwrap_or("N/A").bright_yellow()
    )
}

fn format_gtsp_round(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {:>4} │ cost {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_count(v.round.unwrap_or(0)).white(),
        v.cost.as_deref().unwrap_or("N/A").bright_yellow()
    )
}

fn format_tour_written(v: &EventVisitor) -> String {
    format!(
        "{} {} Tour written │ {} │ cost {}",
        format_elapsed(),
        "✎".bright_green(),
        v.output.as_deref().unwrap_or("N/A").white(),
        v.cost.as_deref().unwrap_or("N/A").bright_yellow()
    )
}

fn format_warning(level: &Level, v: &EventVisitor) -> String {
    let label = if *level == Level::ERROR {
        "ERROR".bright_red().bold().to_string()
    } else {
        "WARN".yellow().bold().to_string()
    };
    let mut line = format!(
        "{} {} {}",
        format_elapsed(),
        label,
        v.message.as_deref().unwrap_or("")
    );
    for (name, value) in &v.fields {
        line.push_str(&format!(" {}={}", name.bright_black(), value));
    }
    line
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
