use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use gripspace_common::Transform;
use gripspace_grip::{Grabbable, GripConfig, GripPoint};
use gripspace_input::{ButtonTracker, GripAction};
use gripspace_kernel::{TouchSphere, World, WorldEvent};
use tracing_subscriber::EnvFilter;

mod scenario;

use scenario::Frame;

#[derive(Parser)]
#[command(name = "gripspace-cli", about = "Run scripted grip scenarios")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default grip configuration
    Info,
    /// Run a scripted scenario and print each frame
    Simulate {
        #[arg(short, long, value_enum, default_value_t = Scenario::Fumble)]
        scenario: Scenario,
        /// JSON grip config overriding the scenario's own
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fraction of the gap a joint closes per step
        #[arg(short, long, default_value = "0.5")]
        drive: f32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Grab beyond the hold radius and let the joint reel it in
    LongReach,
    /// Anchor a long-reach grab, then yank the hand away
    Fumble,
    /// Toggle input: press to grab, press again to drop
    Toggle,
    /// Hold input: press grabs, release drops
    Hold,
    /// Interact with an object while idle and while holding it
    Interact,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gripspace-cli v{}", env!("CARGO_PKG_VERSION"));
            let actions: Vec<&str> = GripAction::ALL.iter().map(|a| a.name()).collect();
            println!("actions: {}", actions.join(", "));
            println!(
                "default config: {}",
                serde_json::to_string_pretty(&GripConfig::default())?
            );
        }
        Commands::Simulate {
            scenario,
            config,
            drive,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => scenario::config_for(scenario),
            };
            config.validate().context("invalid grip config")?;
            simulate(scenario, config, drive)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<GripConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn simulate(scenario: Scenario, config: GripConfig, drive: f32) -> anyhow::Result<()> {
    tracing::info!(?scenario, ?config, drive, "starting scenario");

    let mut world = World::with_drive_strength(drive);
    let hand = world.spawn_hand(Transform::default());
    world.set_name(hand, "hand")?;
    let target = world.spawn_grabbable(
        Transform::from_position(scenario::target_position(scenario)),
        Grabbable::default(),
    );
    world.set_name(target, "cube")?;
    if matches!(scenario, Scenario::Interact) {
        world.insert_interactable(target, None)?;
    }

    let mut grip = GripPoint::new(hand, config, TouchSphere::default());
    let mut buttons = ButtonTracker::new();

    for (n, frame) in scenario::script(scenario).into_iter().enumerate() {
        let Frame {
            grab,
            interact,
            hand_at,
        } = frame;
        if let Some(position) = hand_at {
            world.set_position(hand, position);
        }
        buttons.set(GripAction::Grab.name(), grab);
        buttons.set(GripAction::Interact.name(), interact);
        world.step();
        grip.tick(&mut world, Some(&buttons));
        buttons.end_frame();

        let distance = world
            .get(target)
            .zip(world.get(hand))
            .map(|(t, h)| t.transform.position.distance(h.transform.position))
            .unwrap_or(f32::NAN);
        println!(
            "frame {n:>2}: grab={} interact={} distance={distance:.3} state={:?}",
            u8::from(grab),
            u8::from(interact),
            grip.state()
        );
        for event in grip.drain_events() {
            println!("          {event}");
        }
        for event in world.drain_events() {
            match event {
                WorldEvent::JointCreated { joint, .. } => {
                    println!("          world: joint {} created", joint.0);
                }
                WorldEvent::JointDestroyed { joint, .. } => {
                    println!("          world: joint {} destroyed", joint.0);
                }
                _ => {}
            }
        }
    }

    println!("{}", world.summary());
    if let Some(slot) = world.get(target).and_then(|d| d.interactable.as_ref()) {
        println!("interactions: pressed={} held={}", slot.pressed, slot.held);
    }
    Ok(())
}
