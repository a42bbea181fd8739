//! Classroom lawsuit negotiation: a two-player signaling game.
//!
//! A Sender (the defendant) privately knows whether it is Guilty or Innocent
//! and proposes a settlement; a Receiver (the plaintiff) sees only the offer
//! and decides whether to accept it. Participants register against a shared
//! document store, get balanced into the two pools, are paired up, and play
//! one offer/response exchange per round. The report compares what the class
//! did against the classroom benchmark values.

pub mod classroom;
pub mod game;
pub mod lobby;
pub mod players;
pub mod report;
pub mod store;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Payoff units awarded at settlement.
pub type Utility = i32;
/// Observed frequencies, posteriors and mixing probabilities.
pub type Probability = f64;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Chance that a freshly assigned Sender is Guilty.
pub const GUILT_PROBABILITY: Probability = 0.25;
/// Payoff pair returned for (type, offer, response) triples the rules never reach.
pub const PAYOFF_SENTINEL: (Utility, Utility) = (0, 0);

// ============================================================================
// BENCHMARKS
// Reference mixing rates the class report is compared against. These are
// fixed teaching values, not solved from whichever payoff table is loaded.
// ============================================================================
/// Benchmark rate at which a Guilty Sender mimics the Innocent and offers Stingy.
pub const NASH_GUILTY_STINGY: Probability = 3. / 7.;
/// Benchmark rate at which the Receiver accepts a Stingy offer.
pub const NASH_ACCEPT_STINGY: Probability = 2. / 5.;
/// Benchmark belief that the Sender is Guilty after observing Stingy.
pub const NASH_POSTERIOR: Probability = 1. / 8.;

// ============================================================================
// STORE LAYOUT
// ============================================================================
/// Expected number of participants (Game Configuration).
pub const EXPECTED: &str = "lawsuit_expected_players";
/// Participant registry, keyed by display name.
pub const PLAYERS: &str = "lawsuit_players";
/// Live pairing registry for the current round.
pub const MATCHES: &str = "lawsuit_matches";
/// Round number and phase.
pub const ROUND: &str = "lawsuit_round";
/// Archive of settled pairings, one subtree per round number.
pub const ROUNDS: &str = "lawsuit_rounds";
/// Separator between sender and receiver names in a pairing key.
pub const VERSUS: &str = "_vs_";

// ============================================================================
// SESSION LOOP
// ============================================================================
/// Delay between two passes of a participant's poll-and-rerun loop.
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(2);
/// Upper bound on compare-and-swap retries before a write is abandoned.
pub const CAS_ATTEMPTS: usize = 32;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Logs the classroom to the terminal and to `logs/classroom-<timestamp>.log`.
/// Per-poll chatter (waiting, pending, lost races) only reaches the file;
/// the terminal shows registrations, pairings and moves.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .set_time_format_rfc3339()
        .add_filter_allow_str("lawsuit")
        .add_filter_allow_str("classroom")
        .build();
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let path = format!("logs/classroom-{}.log", stamp);
    let file = std::fs::File::create(&path).expect("create log file");
    simplelog::CombinedLogger::init(vec![
        simplelog::TermLogger::new(
            log::LevelFilter::Info,
            config.clone(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        ),
        simplelog::WriteLogger::new(log::LevelFilter::Debug, config, file),
    ])
    .expect("initialize logger");
    log::debug!("logging to {}", path);
}

/// Register Ctrl+C handler for immediate termination of the session loops.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, abandoning classroom");
            std::process::exit(0);
        }
    });
}
