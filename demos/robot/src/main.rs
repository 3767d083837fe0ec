//! Robot player binary.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local server
//! noughts-robot
//!
//! # Connect elsewhere, think for half a second per move
//! noughts-robot game.example.org 9000 --thinking-ms 500
//! ```
//!
//! Ctrl-C aborts the session and exits.

use std::time::Duration;

use clap::Parser;
use noughts::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CENTRE: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Noughts robot player
#[derive(Parser, Debug)]
#[command(name = "noughts-robot")]
#[command(about = "Connects to a noughts server and plays automatically")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(env = "NOUGHTS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port (1024-65535)
    #[arg(env = "NOUGHTS_PORT", default_value_t = 9000)]
    port: u16,

    /// Delay before each move, in milliseconds
    #[arg(long, default_value_t = 1000)]
    thinking_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ---------------------------------------------------------------------------
// Decision agent
// ---------------------------------------------------------------------------

/// Plays a simple strong-ish line: win, block, centre, corner, side.
struct HeuristicAgent;

impl DecisionAgent for HeuristicAgent {
    fn choose_move(&self, board: &Board, me: Mark) -> Option<usize> {
        pick(board, me, &mut rand::rng())
    }
}

fn pick<R: Rng + ?Sized>(board: &Board, me: Mark, rng: &mut R) -> Option<usize> {
    if let Some(cell) = completing_cell(board, me) {
        return Some(cell);
    }
    if let Some(cell) = completing_cell(board, me.opponent()) {
        return Some(cell);
    }
    if is_free(board, CENTRE) {
        return Some(CENTRE);
    }
    [CORNERS, SIDES].iter().find_map(|group| {
        let free: Vec<usize> = group.iter().copied().filter(|&i| is_free(board, i)).collect();
        free.choose(rng).copied()
    })
}

/// The empty cell that would give `mark` three in a row, if any.
fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    let own = Cell::from(mark);
    Board::lines().iter().find_map(|line| {
        let owned = line.iter().filter(|&&i| board.get(i) == Some(own)).count();
        let mut free = line.iter().copied().filter(|&i| is_free(board, i));
        match (owned, free.next(), free.next()) {
            (2, Some(cell), None) => Some(cell),
            _ => None,
        }
    })
}

fn is_free(board: &Board, index: usize) -> bool {
    board.get(index).is_some_and(Cell::is_empty)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Sends everything the controller would show on screen to the log.
struct TracingSink;

impl PresentationSink for TracingSink {
    fn redraw(&self) {
        tracing::trace!("redraw");
    }

    fn show_info(&self, text: &str) {
        tracing::info!("{text}");
    }

    fn set_connection_controls_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "connection controls");
    }

    fn set_abort_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "abort control");
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = ClientConfig {
        thinking_delay: Duration::from_millis(args.thinking_ms),
        ..ClientConfig::default()
    };

    let client = ClientBuilder::new()
        .config(config)
        .agent(HeuristicAgent)
        .spawn(TcpConnector, TracingSink);

    tracing::info!(host = %args.host, port = args.port, "noughts robot starting");
    client.request_connect(args.host, args.port)?;

    let mut snapshots = client.watch_snapshot();
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);
    loop {
        tokio::select! {
            result = &mut interrupt => {
                result?;
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(snapshot) = snapshots.borrow_and_update().as_ref() {
                    tracing::debug!(board = %snapshot.board, status = %snapshot.status, "board");
                }
            }
        }
    }

    tracing::info!(connected = client.phase().is_connected(), "shutting down");
    // The controller may already be gone if the snapshot channel closed.
    let _ = client.request_abort();
    client.shutdown().await;
    Ok(())
}
