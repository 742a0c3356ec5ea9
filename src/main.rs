use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swift_traffic::{
    parse_feed, ConfigurationManager, FeedEvent, Geod, TrafficConfig, TrafficError, TrafficManager,
};

/// Replay a recorded swift traffic feed against offline scenery
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON-lines traffic feed
    #[arg(short, long)]
    feed: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame time (s) used for poses not followed by an explicit tick
    #[arg(long, default_value_t = 0.05)]
    dt: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?.get_config().clone(),
        None => TrafficConfig::default(),
    };
    init_logging(config.debug_logging);

    let scenery = Arc::new(config.scenery.build_scenery());
    let mut manager = TrafficManager::new(config.adapter.clone(), scenery);

    let events = parse_feed(&fs::read_to_string(&args.feed)?)?;
    info!(events = events.len(), feed = %args.feed.display(), "replaying feed");

    let report = replay(&mut manager, events, args.dt);
    for line in &report.lines {
        println!("{}", line);
    }

    for entity in manager.entities() {
        let pos = entity.position();
        println!(
            "{} {} {:.6} {:.6} {:.0} ft",
            entity.callsign(),
            entity.model_path(),
            pos.latitude_deg,
            pos.longitude_deg,
            pos.elevation_ft
        );
    }

    Ok(())
}

/// Output of a feed replay
#[derive(Debug, Default)]
struct ReplayReport {
    /// One line per elevation query
    lines: Vec<String>,
    /// Rejected events, replay continues past them
    errors: Vec<TrafficError>,
}

impl ReplayReport {
    fn record(&mut self, result: Result<(), TrafficError>) {
        if let Err(e) = result {
            warn!("{}", e);
            self.errors.push(e);
        }
    }
}

/// Apply feed events in order. Poses not followed by an explicit tick get a
/// `dt` tick before the next elevation query and at the end of the feed.
fn replay(manager: &mut TrafficManager, events: Vec<FeedEvent>, dt: f64) -> ReplayReport {
    let mut report = ReplayReport::default();
    let mut pending_tick = false;

    for event in events {
        match event {
            FeedEvent::Add { callsign, model } => report.record(manager.add_aircraft(&callsign, &model)),
            FeedEvent::Remove { callsign } => report.record(manager.remove_aircraft(&callsign)),
            FeedEvent::Pose(update) => {
                report.record(manager.update_position(&update));
                pending_tick = true;
            }
            FeedEvent::Tick { dt } => {
                manager.update(dt);
                pending_tick = false;
            }
            FeedEvent::Elevation { callsign, latitude, longitude } => {
                if pending_tick {
                    manager.update(dt);
                    pending_tick = false;
                }
                let pos = Geod::from_deg_ft(latitude, longitude, 0.0);
                match manager.ground_elevation_m(&callsign, &pos) {
                    Ok(elevation) if elevation.is_nan() => {
                        report.lines.push(format!("{callsign} {latitude:.6} {longitude:.6} unknown"))
                    }
                    Ok(elevation) => {
                        report.lines.push(format!("{callsign} {latitude:.6} {longitude:.6} {elevation:.2} m"))
                    }
                    Err(e) => report.record(Err(e)),
                }
            }
        }
    }
    if pending_tick {
        manager.update(dt);
    }

    report
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // only succeeds if no global subscriber is set yet
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging not initialized: {}", e);
    }
}
