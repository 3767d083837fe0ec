//! `ClientBuilder` and the `ClientHandle` the UI holds.

use noughts_protocol::{Codec, GameSnapshot, JsonCodec};
use noughts_transport::{ConnectionTarget, Connector};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::controller::{Controller, Intent, Wiring};
use crate::{ClientConfig, ClientError, DecisionAgent, Phase, PresentationSink};

/// Builder for configuring and starting a client controller.
///
/// # Example
///
/// ```rust,no_run
/// use noughts_client::{ClientBuilder, PresentationSink};
/// use noughts_protocol::{Board, Mark};
/// use noughts_transport::TcpConnector;
///
/// struct Quiet;
/// impl PresentationSink for Quiet {
///     fn redraw(&self) {}
///     fn show_info(&self, _: &str) {}
///     fn set_connection_controls_enabled(&self, _: bool) {}
///     fn set_abort_enabled(&self, _: bool) {}
/// }
///
/// # async fn run() -> Result<(), noughts_client::ClientError> {
/// let client = ClientBuilder::new()
///     .agent(|board: &Board, _: Mark| board.empty_cells().next())
///     .spawn(TcpConnector, Quiet);
/// client.request_connect("127.0.0.1", 9000)?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: ClientConfig,
    agent: Option<Box<dyn DecisionAgent>>,
}

impl ClientBuilder {
    /// Creates a builder with default settings and no agent (human play).
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            agent: None,
        }
    }

    /// Sets the client configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Lets `agent` pick every move. Cell clicks are ignored from then on.
    pub fn agent(mut self, agent: impl DecisionAgent) -> Self {
        self.agent = Some(Box::new(agent));
        self
    }

    /// Starts the controller with the JSON wire grammar.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<C: Connector>(self, connector: C, sink: impl PresentationSink) -> ClientHandle {
        self.spawn_with_codec(connector, JsonCodec, sink)
    }

    /// Starts the controller with a custom codec.
    pub fn spawn_with_codec<C: Connector, K: Codec>(
        self,
        connector: C,
        codec: K,
        sink: impl PresentationSink,
    ) -> ClientHandle {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (phase_tx, phase_rx) = watch::channel(Phase::Disconnected);

        let controller = Controller::new(
            self.config,
            connector,
            codec,
            Box::new(sink),
            self.agent,
            Wiring {
                intents: intent_rx,
                snapshot: snapshot_tx,
                phase: phase_tx,
            },
        );
        let task = tokio::spawn(controller.run());

        ClientHandle {
            intents: intent_tx,
            snapshot: snapshot_rx,
            phase: phase_rx,
            task,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The UI's side of a running client.
///
/// Intents are fire-and-forget; state is read back through
/// [`snapshot`](Self::snapshot) and [`phase`](Self::phase). Dropping the
/// handle stops the controller and closes any live connection.
pub struct ClientHandle {
    intents: mpsc::UnboundedSender<Intent>,
    snapshot: watch::Receiver<Option<GameSnapshot>>,
    phase: watch::Receiver<Phase>,
    task: JoinHandle<()>,
}

impl ClientHandle {
    /// Asks the controller to connect to `host:port` and keep reconnecting
    /// until aborted.
    pub fn request_connect(&self, host: impl Into<String>, port: u16) -> Result<(), ClientError> {
        let target = ConnectionTarget::new(host, port)?;
        self.send(Intent::Connect(target))
    }

    /// Asks the controller to disconnect and stop reconnecting.
    pub fn request_abort(&self) -> Result<(), ClientError> {
        self.send(Intent::Abort)
    }

    /// Reports a click on board cell `index`. Only acted upon when no
    /// agent is configured.
    pub fn request_cell_click(&self, index: usize) -> Result<(), ClientError> {
        self.send(Intent::CellClick(index))
    }

    /// A copy of the current authoritative snapshot, `None` while there is
    /// no game state.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// The controller's current phase.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// A receiver that observes every snapshot change.
    pub fn watch_snapshot(&self) -> watch::Receiver<Option<GameSnapshot>> {
        self.snapshot.clone()
    }

    /// A receiver that observes every phase change.
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Stops the controller and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.intents.send(Intent::Shutdown);
        if let Err(e) = self.task.await {
            tracing::debug!(error = %e, "controller task ended abnormally");
        }
    }

    fn send(&self, intent: Intent) -> Result<(), ClientError> {
        self.intents.send(intent).map_err(|_| ClientError::Unavailable)
    }
}
