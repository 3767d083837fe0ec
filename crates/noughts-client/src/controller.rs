//! Controller actor: the single task that owns a client session.
//!
//! Everything that can change session state funnels into one
//! `tokio::select!` loop here: user intents, transport events, the result
//! of a connect attempt, and two timers (reconnect and thinking). Nothing
//! else mutates [`SessionState`]; the UI reads copies through `watch`
//! channels.

use std::pin::Pin;
use std::sync::Arc;

use noughts_protocol::{self as protocol, Cell, Codec, GameSnapshot, Status};
use noughts_transport::{
    ConnectError, ConnectionTarget, Connector, EventSender, TransportEvent,
};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Sleep;

use crate::sink::{status_info, DISCONNECTED_INFO};
use crate::state::{validate_move, Phase, SessionState};
use crate::{ClientConfig, DecisionAgent, PresentationSink};

/// Requests from the UI side, delivered through the client handle.
#[derive(Debug)]
pub(crate) enum Intent {
    Connect(ConnectionTarget),
    Abort,
    CellClick(usize),
    Shutdown,
}

/// One unit of work for the loop.
enum Input<S> {
    Intent(Intent),
    Transport(TransportEvent),
    ConnectFinished(Result<Result<S, ConnectError>, JoinError>),
    ReconnectDue,
    ThinkingElapsed,
    Stop,
}

type Timer = Option<Pin<Box<Sleep>>>;

/// Channels the controller talks through.
pub(crate) struct Wiring {
    pub(crate) intents: mpsc::UnboundedReceiver<Intent>,
    pub(crate) snapshot: watch::Sender<Option<GameSnapshot>>,
    pub(crate) phase: watch::Sender<Phase>,
}

pub(crate) struct Controller<C: Connector, K: Codec> {
    config: ClientConfig,
    connector: Arc<C>,
    codec: K,
    sink: Box<dyn PresentationSink>,
    agent: Option<Box<dyn DecisionAgent>>,

    session: SessionState,
    phase: Phase,

    intents: mpsc::UnboundedReceiver<Intent>,
    events_tx: EventSender,
    events: mpsc::UnboundedReceiver<TransportEvent>,
    snapshot_tx: watch::Sender<Option<GameSnapshot>>,
    phase_tx: watch::Sender<Phase>,

    connect_task: Option<JoinHandle<Result<C::Stream, ConnectError>>>,
    reconnect_timer: Timer,
    thinking_timer: Timer,
}

impl<C: Connector, K: Codec> Controller<C, K> {
    pub(crate) fn new(
        config: ClientConfig,
        connector: C,
        codec: K,
        sink: Box<dyn PresentationSink>,
        agent: Option<Box<dyn DecisionAgent>>,
        wiring: Wiring,
    ) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();
        Self {
            config,
            connector: Arc::new(connector),
            codec,
            sink,
            agent,
            session: SessionState::default(),
            phase: Phase::Disconnected,
            intents: wiring.intents,
            events_tx,
            events,
            snapshot_tx: wiring.snapshot,
            phase_tx: wiring.phase,
            connect_task: None,
            reconnect_timer: None,
            thinking_timer: None,
        }
    }

    /// Runs until shutdown is requested or every client handle is dropped.
    pub(crate) async fn run(mut self) {
        tracing::info!(robot = self.agent.is_some(), "client controller started");
        self.sink.set_connection_controls_enabled(true);
        self.sink.set_abort_enabled(false);

        loop {
            // Biased so a pending close is always seen before a timer that
            // became due in the same poll.
            let input = tokio::select! {
                biased;

                intent = self.intents.recv() => match intent {
                    Some(Intent::Shutdown) | None => Input::Stop,
                    Some(intent) => Input::Intent(intent),
                },
                Some(event) = self.events.recv() => Input::Transport(event),
                result = join(&mut self.connect_task) => Input::ConnectFinished(result),
                () = fire(&mut self.reconnect_timer) => Input::ReconnectDue,
                () = fire(&mut self.thinking_timer) => Input::ThinkingElapsed,
            };

            match input {
                Input::Intent(Intent::Connect(target)) => self.on_connect_intent(target),
                Input::Intent(Intent::Abort) => self.on_abort(),
                Input::Intent(Intent::CellClick(cell)) => self.on_cell_click(cell),
                Input::Intent(Intent::Shutdown) | Input::Stop => break,
                Input::Transport(event) => self.on_transport_event(event),
                Input::ConnectFinished(result) => self.on_connect_finished(result),
                Input::ReconnectDue => self.on_reconnect_due(),
                Input::ThinkingElapsed => self.on_thinking_elapsed(),
            }
        }

        self.teardown();
        tracing::info!("client controller stopped");
    }

    // -----------------------------------------------------------------------
    // User intents
    // -----------------------------------------------------------------------

    fn on_connect_intent(&mut self, target: ConnectionTarget) {
        if self.phase != Phase::Disconnected {
            tracing::debug!(phase = %self.phase, %target, "connect ignored, session in progress");
            return;
        }

        tracing::info!(%target, "connect requested");
        self.session.target = Some(target);
        self.session.auto_reconnect = true;
        self.reconnect_timer = None;

        self.sink.set_connection_controls_enabled(false);
        self.sink.set_abort_enabled(true);

        self.start_connect();
    }

    fn on_abort(&mut self) {
        tracing::info!(phase = %self.phase, "abort requested");
        self.session.auto_reconnect = false;
        self.reconnect_timer = None;
        if let Some(task) = self.connect_task.take() {
            task.abort();
        }

        // The transport's own Closed event arrives for a handle that is no
        // longer active and is dropped as stale.
        self.clear_session();

        self.sink.set_connection_controls_enabled(true);
        self.sink.set_abort_enabled(false);
    }

    fn on_cell_click(&mut self, cell: usize) {
        if self.agent.is_some() {
            tracing::trace!(cell, "cell click ignored, agent controls moves");
            return;
        }
        self.submit_move(cell);
    }

    // -----------------------------------------------------------------------
    // Connection lifecycle
    // -----------------------------------------------------------------------

    fn start_connect(&mut self) {
        let Some(target) = self.session.target.clone() else {
            return;
        };

        tracing::info!(%target, "connecting");
        self.set_phase(Phase::Connecting);

        let connector = Arc::clone(&self.connector);
        let timeout = self.config.connect_timeout;
        self.connect_task = Some(tokio::spawn(async move {
            noughts_transport::connect(&*connector, &target, timeout).await
        }));
    }

    fn on_connect_finished(&mut self, result: Result<Result<C::Stream, ConnectError>, JoinError>) {
        self.connect_task = None;
        if self.phase != Phase::Connecting {
            return;
        }

        match result {
            Ok(Ok(stream)) => {
                let transport = noughts_transport::open(
                    stream,
                    self.config.read_buffer_bytes,
                    self.events_tx.clone(),
                );
                tracing::debug!(conn_id = %transport.id(), "transport started");
                self.session.transport = Some(transport);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "connect failed");
                self.enter_disconnected();
            }
            Err(e) => {
                tracing::warn!(error = %e, "connect task failed");
                self.enter_disconnected();
            }
        }
    }

    fn on_transport_event(&mut self, event: TransportEvent) {
        let conn_id = event.connection_id();
        if !self.session.is_active(conn_id) {
            tracing::debug!(%conn_id, "event from inactive connection dropped");
            return;
        }

        match event {
            TransportEvent::Opened(_) => {
                tracing::info!(%conn_id, "connected");
                self.set_phase(Phase::WaitingServer);
            }
            TransportEvent::Received(_, text) => self.on_message(&text),
            TransportEvent::Error(_, e) => {
                tracing::warn!(%conn_id, error = %e, "transport error");
                if let Some(transport) = &self.session.transport {
                    transport.close();
                }
            }
            TransportEvent::Closed(_) => {
                tracing::info!(%conn_id, "connection closed");
                self.enter_disconnected();
            }
        }
    }

    /// Drops to `Disconnected` after the connection went away on its own,
    /// and schedules a reconnect unless the user aborted.
    fn enter_disconnected(&mut self) {
        self.clear_session();

        if self.session.auto_reconnect && self.session.target.is_some() {
            tracing::debug!(delay = ?self.config.reconnect_delay, "reconnect scheduled");
            self.reconnect_timer = Some(Box::pin(tokio::time::sleep(self.config.reconnect_delay)));
        }
    }

    fn on_reconnect_due(&mut self) {
        self.reconnect_timer = None;
        if self.session.auto_reconnect && self.phase == Phase::Disconnected {
            self.start_connect();
        }
    }

    fn clear_session(&mut self) {
        self.thinking_timer = None;
        self.session.reset_connection();
        self.publish_snapshot();
        self.set_phase(Phase::Disconnected);
        self.sink.show_info(DISCONNECTED_INFO);
        self.sink.redraw();
    }

    fn teardown(&mut self) {
        if self.phase.is_connected() {
            tracing::info!(phase = %self.phase, "closing live connection");
        }
        self.session.auto_reconnect = false;
        self.reconnect_timer = None;
        self.thinking_timer = None;
        if let Some(task) = self.connect_task.take() {
            task.abort();
        }
        self.session.reset_connection();
        self.publish_snapshot();
        self.set_phase(Phase::Disconnected);
    }

    // -----------------------------------------------------------------------
    // Turn synchronization
    // -----------------------------------------------------------------------

    fn on_message(&mut self, text: &str) {
        let snapshot = match protocol::decode(&self.codec, text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "malformed message dropped");
                return;
            }
        };

        if let Some(current) = &self.session.snapshot {
            if current.player != snapshot.player {
                tracing::warn!(
                    assigned = %current.player,
                    received = %snapshot.player,
                    "player mark changed mid-session, message dropped"
                );
                return;
            }
        }

        tracing::debug!(
            player = %snapshot.player,
            status = %snapshot.status,
            board = %snapshot.board,
            "state received"
        );

        let status = snapshot.status;
        let info = status_info(&snapshot);
        // The server is the single source of truth: full replacement.
        self.session.snapshot = Some(snapshot);
        self.publish_snapshot();
        self.sink.redraw();
        self.sink.show_info(&info);

        if status.is_terminal() {
            tracing::info!(%status, "game over");
            self.session.game_over = true;
            self.thinking_timer = None;
            self.set_phase(Phase::GameOver);
        } else if self.session.game_over {
            tracing::debug!(%status, "game already over on this connection");
        } else if status == Status::YourTurn {
            self.begin_turn();
        } else {
            self.thinking_timer = None;
            self.set_phase(Phase::WaitingServer);
        }
    }

    fn begin_turn(&mut self) {
        self.set_phase(Phase::MyTurn);
        if self.agent.is_some() && self.thinking_timer.is_none() {
            self.thinking_timer = Some(Box::pin(tokio::time::sleep(self.config.thinking_delay)));
        }
    }

    fn on_thinking_elapsed(&mut self) {
        self.thinking_timer = None;
        if self.phase != Phase::MyTurn {
            return;
        }

        let choice = match (&self.agent, &self.session.snapshot) {
            (Some(agent), Some(snapshot)) => agent.choose_move(&snapshot.board, snapshot.player),
            _ => return,
        };

        match choice {
            Some(cell) => self.submit_move(cell),
            None => tracing::debug!("agent has no move"),
        }
    }

    /// Validates, commits locally and sends one move. Invalid moves are
    /// dropped without telling anyone.
    fn submit_move(&mut self, cell: usize) {
        if self.phase != Phase::MyTurn {
            tracing::debug!(cell, phase = %self.phase, "move ignored outside our turn");
            return;
        }
        let Some(snapshot) = self.session.snapshot.as_mut() else {
            return;
        };
        if let Err(reason) = validate_move(snapshot, cell, self.session.game_over) {
            tracing::debug!(cell, %reason, "move rejected");
            return;
        }

        let mut outbound = snapshot.clone();
        outbound.board.set(cell, Cell::from(outbound.player));
        outbound.pending_move = Some(cell);

        let text = match protocol::encode(&self.codec, &outbound) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(cell, error = %e, "failed to encode move");
                return;
            }
        };

        *snapshot = outbound;
        if let Some(transport) = &self.session.transport {
            transport.send(text);
        }
        tracing::info!(cell, "move sent");

        self.publish_snapshot();
        self.sink.redraw();
        self.set_phase(Phase::WaitingServer);
    }

    // -----------------------------------------------------------------------
    // Publishing
    // -----------------------------------------------------------------------

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(self.session.snapshot.clone());
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        tracing::debug!(from = %self.phase, to = %phase, "phase changed");
        self.phase = phase;
        self.phase_tx.send_replace(phase);
    }
}

/// Waits for the in-flight connect task, or forever if there is none.
async fn join<T>(task: &mut Option<JoinHandle<T>>) -> Result<T, JoinError> {
    match task {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Waits for a timer, or forever if it is not armed.
async fn fire(timer: &mut Timer) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
