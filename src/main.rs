//! Verdant - Entry Point
//!
//! Interactive driver for the placement engine: a small command loop that
//! places, drags, and pins plants on a simulated canvas, printing the
//! engine's derived state after each action. Real frontends embed the
//! library and register their own observers; this binary is the reference
//! wiring.

use clap::Parser;

use verdant::catalog::{self, PlantSpec};
use verdant::conditions::SimulatedConditions;
use verdant::core::config::EngineConfig;
use verdant::core::error::Result;
use verdant::core::types::PlantId;
use verdant::engine::events::LoggingObserver;
use verdant::engine::{design, scatter, search, suitability, PlacementStore};

use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "verdant", about = "Interactive native-planting design engine")]
struct Args {
    /// Canvas width in world units
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height in world units
    #[arg(long)]
    height: Option<f32>,

    /// Snap finalized positions to the grid
    #[arg(long)]
    snap: bool,

    /// Path to a TOML engine config
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Path to a JSON plant catalog (defaults to the built-in set)
    #[arg(long)]
    catalog: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("verdant=debug")
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    if args.snap {
        config.snap_to_grid = true;
    }
    config
        .validate()
        .map_err(verdant::core::error::VerdantError::InvalidConfig)?;

    let specs = match &args.catalog {
        Some(path) => catalog::load_json(&std::fs::read_to_string(path)?)?,
        None => catalog::builtin(),
    };

    tracing::info!(
        "Verdant starting on a {}x{} canvas with {} specs",
        config.canvas_width,
        config.canvas_height,
        specs.len()
    );

    let provider = SimulatedConditions::new(config.canvas_width, config.canvas_height);
    let mut store = PlacementStore::new(config, Box::new(provider.clone()));
    store.subscribe(Box::new(LoggingObserver));

    println!("\n=== VERDANT ===");
    println!("Interactive planting-design canvas");
    println!();
    println!("Commands:");
    println!("  catalog / c               - List available plant specs");
    println!("  place <name> <x> <y>      - Place and commit a plant");
    println!("  move <n> <x> <y>          - Drag plant n (no recompute)");
    println!("  drop <n>                  - Commit plant n's position");
    println!("  fix <n>                   - Toggle plant n's fixed status");
    println!("  remove <n>                - Remove plant n");
    println!("  pick <x> <y>              - Hit-test a point");
    println!("  suggest <n>               - Suggest a spot for plant n");
    println!("  scatter <name> <count>    - Randomly place several plants");
    println!("  design / auto             - Generate a full design from the catalog");
    println!("  score <name> <x> <y>      - Suitability of a spec at a point");
    println!("  status / s                - Show canvas state");
    println!("  quit / q                  - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "quit" | "q" => break,
            "status" | "s" => display_status(&store),
            "catalog" | "c" => display_catalog(&specs),
            "place" => {
                if let Some((spec, x, y)) = parse_spec_and_point(&specs, &tokens[1..]) {
                    let plant = store.add(spec, x, y, false);
                    store.finalize(plant.id);
                } else {
                    println!("usage: place <name> <x> <y>");
                }
            }
            "move" => match parse_index_and_point(&store, &tokens[1..]) {
                Some((id, x, y)) => store.move_to(id, x, y),
                None => println!("usage: move <n> <x> <y>"),
            },
            "drop" => match parse_index(&store, &tokens[1..]) {
                Some(id) => store.finalize(id),
                None => println!("usage: drop <n>"),
            },
            "fix" => match parse_index(&store, &tokens[1..]) {
                Some(id) => store.toggle_fixed(id),
                None => println!("usage: fix <n>"),
            },
            "remove" | "rm" => match parse_index(&store, &tokens[1..]) {
                Some(id) => store.remove(id),
                None => println!("usage: remove <n>"),
            },
            "pick" => match parse_point(&tokens[1..]) {
                Some((x, y)) => match store.pick(x, y) {
                    Some(plant) => {
                        println!("hit: {} at ({:.1}, {:.1})", plant.name, plant.position.x, plant.position.y);
                        store.bring_to_front(plant.id);
                    }
                    None => println!("nothing there"),
                },
                None => println!("usage: pick <x> <y>"),
            },
            "suggest" => match parse_index(&store, &tokens[1..]) {
                Some(id) => {
                    if let Some(plant) = store.plant(id) {
                        match search::suggest_location(&plant.requirements, store.config(), &provider)
                        {
                            Some(cell) => println!(
                                "best spot for {}: ({:.0}, {:.0})",
                                plant.name, cell.x, cell.y
                            ),
                            None => println!("canvas too small to search"),
                        }
                    }
                }
                None => println!("usage: suggest <n>"),
            },
            "scatter" => {
                let (name_tokens, count_token) = match tokens[1..].split_last() {
                    Some((last, rest)) if !rest.is_empty() => (rest, *last),
                    _ => {
                        println!("usage: scatter <name> <count>");
                        continue;
                    }
                };
                let name = name_tokens.join(" ");
                match (catalog::require_spec(&specs, &name), count_token.parse::<usize>()) {
                    (Ok(spec), Ok(count)) => {
                        let spec = spec.clone();
                        let placed =
                            scatter::scatter(&mut store, &spec, count, &mut rand::thread_rng());
                        println!("placed {} x {}", placed.len(), spec.name);
                    }
                    (Err(err), _) => println!("{}", err),
                    _ => println!("usage: scatter <name> <count>"),
                }
            }
            "design" | "auto" => {
                let summary = design::generate(
                    &mut store,
                    &specs,
                    &provider,
                    &design::DesignParams::default(),
                    &mut rand::thread_rng(),
                );
                display_design(&summary);
            }
            "score" => {
                if let Some((spec, x, y)) = parse_spec_and_point(&specs, &tokens[1..]) {
                    let assessment = suitability::assess(spec, x, y, &provider);
                    println!(
                        "{} at ({:.0}, {:.0}): {}/100 (zone {} soil {} sun {} water {})",
                        spec.name,
                        x,
                        y,
                        assessment.score,
                        assessment.zone_compatible,
                        assessment.soil_compatible,
                        assessment.sun_compatible,
                        assessment.water_compatible
                    );
                } else {
                    println!("usage: score <name> <x> <y>");
                }
            }
            other => println!("unknown command: {}", other),
        }
    }

    tracing::info!("Verdant shutting down");
    Ok(())
}

/// Parse `<name...> <x> <y>`, where the name may contain spaces
fn parse_spec_and_point<'a>(
    specs: &'a [PlantSpec],
    tokens: &[&str],
) -> Option<(&'a PlantSpec, f32, f32)> {
    if tokens.len() < 3 {
        return None;
    }
    let name = tokens[..tokens.len() - 2].join(" ");
    let x = tokens[tokens.len() - 2].parse().ok()?;
    let y = tokens[tokens.len() - 1].parse().ok()?;
    let spec = catalog::find_spec(specs, &name)?;
    Some((spec, x, y))
}

fn parse_point(tokens: &[&str]) -> Option<(f32, f32)> {
    if tokens.len() != 2 {
        return None;
    }
    Some((tokens[0].parse().ok()?, tokens[1].parse().ok()?))
}

/// Resolve a 1-based plant index from `status` output to an id
fn parse_index(store: &PlacementStore, tokens: &[&str]) -> Option<PlantId> {
    let index: usize = tokens.first()?.parse().ok()?;
    store.all().get(index.checked_sub(1)?).map(|plant| plant.id)
}

fn parse_index_and_point(store: &PlacementStore, tokens: &[&str]) -> Option<(PlantId, f32, f32)> {
    if tokens.len() != 3 {
        return None;
    }
    let id = parse_index(store, &tokens[..1])?;
    let x = tokens[1].parse().ok()?;
    let y = tokens[2].parse().ok()?;
    Some((id, x, y))
}

fn display_catalog(specs: &[PlantSpec]) {
    println!("--- Catalog ({} specs) ---", specs.len());
    for spec in specs {
        println!(
            "  {} ({}) - {:?}, size {:.0}",
            spec.name, spec.species, spec.kind, spec.size
        );
    }
}

fn display_design(summary: &design::DesignSummary) {
    println!("--- Generated design ---");
    for selection in &summary.selections {
        println!(
            "  zone {}: {} x {} (score {})",
            selection.zone + 1,
            selection.quantity,
            selection.name,
            selection.score
        );
    }
    let stats = &summary.statistics;
    println!(
        "  {} plants, {} specs, biodiversity {}/100, mean suitability {}/100",
        stats.total_plants, stats.distinct_specs, stats.biodiversity_score, stats.mean_suitability
    );
}

fn display_status(store: &PlacementStore) {
    let plants = store.all();
    println!("--- Canvas: {} plants ---", plants.len());
    for (index, plant) in plants.iter().enumerate() {
        let marker = if store.is_fixed(plant.id) { " [fixed]" } else { "" };
        println!(
            "  {}. {} at ({:.1}, {:.1}) size {:.0}{}",
            index + 1,
            plant.name,
            plant.position.x,
            plant.position.y,
            plant.size,
            marker
        );
    }

    let violations = store.violations();
    if violations.is_empty() {
        println!("  no environmental violations");
    } else {
        for violation in &violations {
            let plant_name = store
                .plant(violation.plant_id)
                .map(|plant| plant.name)
                .unwrap_or_else(|| "?".into());
            println!(
                "  VIOLATION: {} needs {} {} but has {}",
                plant_name, violation.requirement, violation.expected, violation.actual
            );
        }
    }

    let recommendations = store.recommendations();
    if !recommendations.is_empty() {
        println!("  companions to consider: {}", recommendations.join(", "));
    }
}
