//! menagerie: build a creature scenario, run it and print the message log

mod logger;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strum::IntoEnumIterator;
use thiserror::Error;

use mg_core::world::{ConfigError, Message};
use mg_core::{CreatureFactory, CreatureKind, EngineOptions, LevelId, World};
use mg_save::SaveError;

use scenario::{Scenario, ScenarioError};

#[derive(Parser, Debug)]
#[command(name = "menagerie")]
#[command(author, version, about = "Run a creature scenario and print what happened", long_about = None)]
struct Args {
    /// Scenario to build
    #[arg(value_enum, default_value_t = Scenario::Kraken)]
    scenario: Scenario,

    /// Options file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the options file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks to simulate, overrides the options file
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Extra creature to place, by id (e.g. GNOME_CHIEF); repeatable
    #[arg(long, value_name = "ID")]
    spawn: Vec<String>,

    /// Continue a saved world instead of building the scenario
    #[arg(long, value_name = "FILE", conflicts_with = "scenario")]
    load: Option<PathBuf>,

    /// Save the final world under this name
    #[arg(long, value_name = "NAME")]
    save: Option<String>,

    /// List creature ids and exit
    #[arg(long)]
    list_kinds: bool,

    /// List saved worlds and exit
    #[arg(long)]
    list_saves: bool,

    /// Do not print the message log
    #[arg(short, long)]
    quiet: bool,

    /// Log more (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(logger::level_for(args.verbose));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("menagerie: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Options file first, then command-line overrides
fn options(args: &Args) -> Result<EngineOptions, ConfigError> {
    let mut options = match &args.config {
        Some(path) => EngineOptions::load_from_file(path)?,
        None => EngineOptions::default(),
    };
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if let Some(ticks) = args.ticks {
        options.ticks = ticks;
    }
    if args.quiet {
        options.print_messages = false;
    }
    options.validate()?;
    Ok(options)
}

fn run(args: &Args) -> Result<(), SimError> {
    if args.list_kinds {
        for kind in CreatureKind::iter() {
            println!("{}", kind);
        }
        return Ok(());
    }
    if args.list_saves {
        for (path, header) in mg_save::list_saves()? {
            println!(
                "{}  tick {}  {} creatures  {}",
                path.display(),
                header.tick,
                header.creatures,
                header.saved_at.format("%Y-%m-%d %H:%M")
            );
        }
        return Ok(());
    }

    let options = options(args)?;
    let mut rng = options.rng();
    log::info!("seed {}", rng.seed());

    let mut factory = CreatureFactory::new();
    let (mut world, level) = match &args.load {
        Some(path) => (mg_save::load_world(path)?, LevelId(0)),
        None => {
            let mut world = options.world();
            let level = args.scenario.build(&mut world, &mut factory, &mut rng)?;
            (world, level)
        }
    };
    for name in &args.spawn {
        let id = scenario::spawn(&mut world, &mut factory, level, name, &mut rng)?;
        log::info!("spawned {} as {:?}", name, id);
    }

    for _ in 0..options.ticks {
        world.tick(&mut rng);
        if world.living_ids().is_empty() {
            log::info!("nothing left alive at {:?}", world.time());
            break;
        }
    }

    if options.print_messages {
        print_log(&world);
    }
    println!(
        "{} creatures alive after {} ticks",
        world.living_ids().len(),
        world.time().0
    );

    if let Some(name) = &args.save {
        let path = mg_save::default_save_path(name);
        mg_save::save_world(&world, &path)?;
        println!("saved to {}", path.display());
    }
    Ok(())
}

fn print_log(world: &World) {
    for message in world.messages().iter() {
        println!("{}", format_message(message));
    }
}

fn format_message(message: &Message) -> String {
    match message.recipient {
        Some(id) => format!("{:>4} [{:?}] {}", message.time.0, id, message.text),
        None => format!("{:>4} {}", message.time.0, message.text),
    }
}
