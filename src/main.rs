//! Scroller entry point
//!
//! Loads settings, then runs either the windowed game (feature `gpu`) or the
//! headless driver.

use std::path::PathBuf;

use clap::Parser;

use scroller::clock::ManualClock;
use scroller::consts::PHYS_DT;
use scroller::platform::headless::{HeadlessRunner, autopilot};
use scroller::renderer::HeadlessSurface;
use scroller::scheduler::FixedTimestep;
use scroller::{Error, Host, Scroller, Settings};

#[derive(Debug, Parser)]
#[command(name = "scroller", version, about = "Side-scrolling arcade shooter")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without a window against a recording surface
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated display refresh rate in headless mode
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound
    #[arg(long)]
    no_sound: bool,

    /// Directory searched for ship.png, enemy.png and background.png
    #[arg(long)]
    assets: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<Settings, Error> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        settings.apply_env();

        if self.no_sound {
            settings.sound = false;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.assets.is_some() {
            settings.asset_dir = self.assets.clone();
        }
        Ok(settings)
    }
}

fn run_headless(settings: &Settings, frames: u64, refresh_hz: f64) -> Result<(), Error> {
    let seed = settings.resolve_seed();
    let scheduler = FixedTimestep::new(PHYS_DT, settings.max_catch_up_ticks);
    let mut host = Host::from_settings(Scroller::new(seed, scheduler), ManualClock::new(), settings)?;
    let mut surface = HeadlessSurface::new(settings.width, settings.height);

    host.init(&mut surface)?;
    let report = HeadlessRunner::new(frames, refresh_hz)
        .with_inputs(autopilot(frames, 20))
        .run(&mut host, &mut surface)?;

    if let Some(world) = host.behavior().world() {
        log::info!(
            "Final state: tick {}, {} enemies, {} bullets, {} particles",
            world.time_ticks,
            world.enemies.len(),
            world.bullets.len(),
            world.particle_count()
        );
    }
    log::debug!("{:?}", report);

    host.shutdown(&mut surface);
    Ok(())
}

#[cfg(feature = "gpu")]
fn run_windowed(settings: Settings, _cli: &Cli) -> Result<(), Error> {
    scroller::platform::desktop::run(settings)
}

#[cfg(not(feature = "gpu"))]
fn run_windowed(settings: Settings, cli: &Cli) -> Result<(), Error> {
    log::info!("Built without the gpu feature - running headless");
    run_headless(&settings, cli.frames, cli.refresh_hz)
}

fn run(cli: Cli) -> Result<(), Error> {
    let settings = cli.settings()?;
    if cli.headless {
        run_headless(&settings, cli.frames, cli.refresh_hz)
    } else {
        run_windowed(settings, &cli)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Scroller starting...");

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
