use clap::Parser;
use log::info;
use queue::config::QueueConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim::world::{SimOptions, SimWorld};
use tokio::time::{interval, Duration, MissedTickBehavior};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of bot participants
    #[arg(short = 'n', long, default_value = "4")]
    participants: usize,

    /// How long to run, in seconds of simulated time
    #[arg(short, long, default_value = "60")]
    duration: u64,

    /// Simulation step in milliseconds
    #[arg(short, long, default_value = "100")]
    tick_ms: u64,

    /// Base replication latency in milliseconds
    #[arg(short, long, default_value = "120")]
    latency: u64,

    /// Random extra latency in milliseconds
    #[arg(short, long, default_value = "80")]
    jitter: u64,

    /// Maximum turn duration in milliseconds
    #[arg(long, default_value = "15000")]
    max_turn_ms: u64,

    /// Inactivity timeout in milliseconds
    #[arg(long, default_value = "8000")]
    inactivity_ms: u64,

    /// Seed for the transport and the bots
    #[arg(short, long, default_value = "7")]
    seed: u64,
}

/// One scripted participant. Bots join the queue at staggered times, poke at
/// the game while they hold the turn, and wander off after a while.
struct Bot {
    ix: usize,
    rng: StdRng,
    joined: bool,
    plays_until_ms: u64,
}

impl Bot {
    fn new(ix: usize, seed: u64) -> Self {
        Self {
            ix,
            rng: StdRng::seed_from_u64(seed),
            joined: false,
            plays_until_ms: 0,
        }
    }

    fn act(&mut self, world: &mut SimWorld, now_ms: u64) {
        if !self.joined {
            if now_ms > 5_000 || self.rng.gen_bool(0.05) {
                world.client_mut(self.ix).engine.join();
                self.joined = true;
                self.plays_until_ms = now_ms + self.rng.gen_range(3_000..10_000);
            }
            return;
        }

        let client = world.client_mut(self.ix);
        if client.engine.is_local_participant_active() {
            if self.rng.gen_bool(0.7) {
                client.engine.record_activity();
            }
            if now_ms >= self.plays_until_ms {
                client.engine.leave();
                self.joined = false;
            }
        }
    }
}

/// Main-method of the demo.
/// Parses command-line arguments, builds a simulated world full of bots, and
/// drives it from a tokio interval while logging every turn change.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::init();
    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Hint: set RUST_LOG=info to see queue activity");
    }

    let mut world = SimWorld::new(SimOptions {
        latency_ms: args.latency,
        jitter_ms: args.jitter,
        seed: args.seed,
        config: QueueConfig {
            max_turn_ms: Some(args.max_turn_ms),
            inactivity_timeout_ms: Some(args.inactivity_ms),
            ..QueueConfig::default()
        },
        ..SimOptions::default()
    });

    let mut bots = Vec::with_capacity(args.participants);
    for i in 0..args.participants {
        let name = format!("Bot {}", i + 1);
        let ix = world.add_participant(&name)?;
        bots.push(Bot::new(ix, args.seed.wrapping_add(i as u64)));

        let label = name.clone();
        world
            .client_mut(ix)
            .engine
            .set_turn_listener(Box::new(move |entry| match entry {
                Some(entry) => info!("[{}] turn changed: {} is up", label, entry.participant_id),
                None => info!("[{}] turn changed: queue is empty", label),
            }));
    }

    let mut interval_timer = interval(Duration::from_millis(args.tick_ms));
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let total_steps = args.duration * 1000 / args.tick_ms;
    for _ in 0..total_steps {
        interval_timer.tick().await;

        let now = world.now_ms();
        for bot in &mut bots {
            bot.act(&mut world, now);
        }
        world.step(args.tick_ms);
    }

    // Final state as seen by the first client
    let client = world.client(0);
    println!("--- final queue (seen by {}) ---", client.display_name);
    for entry in client.engine.ordered_queue() {
        let name = client
            .engine
            .display_name(&entry.participant_id)
            .unwrap_or_else(|| entry.participant_id.clone());
        println!(
            "{:>12}  joined_at={}  active={}",
            name, entry.joined_at, entry.active
        );
    }

    Ok(())
}
