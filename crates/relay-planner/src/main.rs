//! Relay constellation planning CLI
//!
//! Computes what a satellite's antenna loadout can reach and which orbits
//! to park the constellation in.
//!
//! Usage:
//!   plan-relays --target-body mun --parts 2:HG5
//!   plan-relays --target-body kerbin --parts 1:RA2,2:HG5 --min-strength 95%

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use orbital_mechanics::suggest::recommended_orbits;
use relay_planner::format::pretty_distance;
use relay_planner::report::{self, PlanReport};
use relay_planner::{
    format, loader, signal, GameData, PlannerError, SelectedPart, DEFAULT_MAX_QUANTITY,
    DEFAULT_SUGGESTIONS,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "plan-relays",
    about = "Plan a comm relay constellation around a celestial body",
    after_help = "examples:\n  plan-relays -b kerbin -p 2:HG5\n  plan-relays -b mun -p 1:RA2,2:HG5 -s 95%"
)]
struct Args {
    /// Celestial body the relay array will orbit
    #[arg(short = 'b', long, required_unless_present = "show_options")]
    target_body: Option<String>,

    /// Antenna loadout per satellite, "QTY:ALIAS" entries separated by
    /// commas (aliases, not full part names)
    #[arg(
        short = 'p',
        long = "parts",
        value_parser = parse_loadout,
        required_unless_present = "show_options"
    )]
    parts: Option<Loadout>,

    /// Minimum signal strength for anything inside the relay's SOI,
    /// as a percentage
    #[arg(short = 's', long, default_value = "80%", value_parser = parse_percent)]
    min_strength: f64,

    /// Number of recommended orbits to compute
    #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
    suggestions: usize,

    /// Largest per-part quantity column in the distance table
    #[arg(long, default_value_t = DEFAULT_MAX_QUANTITY)]
    max_quantity: u32,

    /// Path to the game data file
    #[arg(long, default_value = "data/gamedata.json")]
    gamedata: PathBuf,

    /// Also write the computed report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List all bodies and communication parts, then exit
    #[arg(long)]
    show_options: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parsed `--parts` value: (quantity, alias) in the order given.
#[derive(Debug, Clone)]
struct Loadout(Vec<(u32, String)>);

fn parse_loadout(value: &str) -> Result<Loadout, String> {
    // One trailing comma is tolerated, matching common shell habits.
    let trimmed = value.strip_suffix(',').unwrap_or(value);

    let mut entries: Vec<(u32, String)> = Vec::new();
    for item in trimmed.split(',') {
        let (quantity, alias) = item
            .split_once(':')
            .ok_or_else(|| format!("\"{item}\" is not QTY:ALIAS"))?;
        let quantity: u32 = quantity
            .parse()
            .map_err(|_| format!("\"{quantity}\" is not a valid quantity"))?;
        if quantity == 0 {
            return Err(format!("quantity for \"{alias}\" must be positive"));
        }
        if alias.is_empty()
            || !alias
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!("\"{alias}\" is not a valid alias"));
        }
        if entries.iter().any(|(_, existing)| existing == alias) {
            return Err(format!("alias \"{alias}\" given more than once"));
        }
        entries.push((quantity, alias.to_string()));
    }

    Ok(Loadout(entries))
}

fn parse_percent(value: &str) -> Result<f64, String> {
    let digits = value.strip_suffix('%').unwrap_or(value);
    if digits.is_empty() || digits.len() > 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("\"{value}\" is not a percentage"));
    }
    let percent: u32 = digits
        .parse()
        .map_err(|_| format!("\"{value}\" is not a percentage"))?;
    if percent > 100 {
        return Err("signal strength cannot exceed 100%".to_string());
    }
    Ok(f64::from(percent) / 100.0)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data = loader::load_game_data(&args.gamedata)
        .with_context(|| format!("failed to load game data from {:?}", args.gamedata))?;

    if args.show_options {
        print_options(&data)?;
        return Ok(());
    }

    let (Some(target_body), Some(loadout)) = (args.target_body, args.parts) else {
        bail!("--target-body and --parts are required");
    };
    ensure!(args.suggestions > 0, "--suggestions must be positive");
    ensure!(args.max_quantity > 0, "--max-quantity must be positive");

    let body = data
        .body(&target_body)
        .context("use --show-options for the full list of bodies")?;

    let mut selection = Vec::new();
    for (quantity, alias) in &loadout.0 {
        let part = data
            .part_by_alias(alias)
            .context("use --show-options for the full list of antennas")?;
        if !part.relay {
            return Err(PlannerError::NotRelay(part.full_name.clone()).into());
        }
        selection.push(SelectedPart::new(part, *quantity));
    }

    let relay_power = signal::combined_power(&selection)?;
    let minimum_orbit = body.radius;
    let strength_pct = (args.min_strength * 100.0).round() as u32;

    let ranges = report::part_ranges(relay_power, args.min_strength, args.max_quantity, &data)?;
    let sweep = recommended_orbits(body, minimum_orbit, args.suggestions);

    println!("  Target body: {}", body.name);
    println!("  Target radius: {}", pretty_distance(body.radius, None));
    println!("  Each satellite equipped with:");
    for selected in &selection {
        println!(
            "      {} {}{}",
            selected.quantity,
            selected.part.full_name,
            if selected.quantity > 1 { "s" } else { "" }
        );
    }
    println!();
    println!("  Minimum signal strength for vessels inside relay SOI: {strength_pct}%");
    println!(
        "  Combined power of all antennas on satellite: {}",
        pretty_distance(relay_power, None)
    );
    println!("  Minimum viable orbit: {}", pretty_distance(minimum_orbit, None));
    println!();

    println!(
        "  Minimum distance for {strength_pct}% signal strength with a given quantity of the part."
    );
    let part_table = report::render_report_tables(&report::part_distance_matrix(&ranges))?;
    println!("{part_table}");
    println!();
    println!("  These values can be considered the maximum orbits for a given use case.");
    println!("  When using these values as orbits remember to factor in the radius of the target body.");
    println!();

    let orbit_table = report::render_report_tables(&report::orbit_matrix(&sweep))?;
    let table_width = orbit_table.lines().next().map_or(0, |line| line.len());
    println!("{}", report::centered_banner("Recommended Orbits", table_width, ""));
    println!("{orbit_table}");
    if !sweep.quota_met {
        println!();
        println!(
            "  Only {} of {} requested orbits fit inside the sphere of influence.",
            sweep.orbits.len(),
            args.suggestions
        );
    }

    if let Some(path) = &args.output {
        info!("Writing report to {:?}", path);
        let plan = PlanReport {
            target_body: body.name.clone(),
            min_strength: args.min_strength,
            combined_power: relay_power,
            minimum_orbit,
            part_ranges: ranges,
            orbits: sweep.orbits.clone(),
            quota_met: sweep.quota_met,
        };
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &plan)?;
    }

    Ok(())
}

fn print_options(data: &GameData) -> Result<()> {
    println!("Available celestial bodies:");
    for root in data.root_bodies() {
        print_body_tree(data, &root.name, 1);
    }

    println!();
    println!("Available communication parts:");
    let mut parts: Vec<_> = data.parts().collect();
    parts.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    let mut matrix = vec![vec!["Communication Part".to_string(), "Alias".to_string()]];
    for part in parts {
        matrix.push(vec![part.full_name.clone(), part.alias.clone()]);
    }
    println!("{}", format::render_table(&matrix, "  ", true)?);

    println!();
    println!("For modded bodies or parts extend the game data file.");
    Ok(())
}

fn print_body_tree(data: &GameData, name: &str, depth: usize) {
    println!("{}{name}", "  ".repeat(depth));
    for child in data.children_of(name) {
        print_body_tree(data, &child.name, depth + 1);
    }
}
