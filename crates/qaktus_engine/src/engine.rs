use std::sync::{mpsc, Arc};
use std::thread;

use qaktus_core::LinkTarget;
use qaktus_logging::{qaktus_error, qaktus_info, qaktus_trace};

use crate::generate::{LinkGenerator, ReqwestLinkGenerator};
use crate::waitlist::{ReqwestWaitlistClient, WaitlistClient};
use crate::{ClientSettings, EngineError, EngineEvent, FailureKind, RequestError};

enum EngineCommand {
    Generate { targets: Vec<LinkTarget> },
    JoinWaitlist { email: String },
}

/// Runs collaborator requests on a background runtime and reports results as
/// [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        settings: &ClientSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let generator: Arc<dyn LinkGenerator> = Arc::new(ReqwestLinkGenerator::new(settings)?);
        let waitlist: Arc<dyn WaitlistClient> = Arc::new(ReqwestWaitlistClient::new(settings)?);
        Self::with_clients(generator, waitlist, event_tx)
    }

    pub fn with_clients(
        generator: Arc<dyn LinkGenerator>,
        waitlist: Arc<dyn WaitlistClient>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let generator = generator.clone();
                let waitlist = waitlist.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    let event =
                        handle_command(generator.as_ref(), waitlist.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_tx })
    }

    pub fn generate_link(&self, targets: Vec<LinkTarget>) {
        qaktus_info!("Submitting {} destination(s) for a short link", targets.len());
        self.dispatch(EngineCommand::Generate { targets });
    }

    pub fn join_waitlist(&self, email: impl Into<String>) {
        self.dispatch(EngineCommand::JoinWaitlist {
            email: email.into(),
        });
    }

    /// Sends `command` to the worker. If the worker is gone the command fails
    /// right away so the caller still gets an answer.
    fn dispatch(&self, command: EngineCommand) {
        let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) else {
            return;
        };
        qaktus_error!("Engine worker is gone; failing request");
        let _ = self.event_tx.send(worker_gone(command));
    }
}

fn worker_gone(command: EngineCommand) -> EngineEvent {
    let err = RequestError::new(FailureKind::Network, "engine worker stopped");
    match command {
        EngineCommand::Generate { .. } => EngineEvent::LinkGenerated { result: Err(err) },
        EngineCommand::JoinWaitlist { .. } => EngineEvent::WaitlistAnswered { result: Err(err) },
    }
}

async fn handle_command(
    generator: &dyn LinkGenerator,
    waitlist: &dyn WaitlistClient,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Generate { targets } => {
            qaktus_trace!("Generating link for {} target(s)", targets.len());
            EngineEvent::LinkGenerated {
                result: generator.generate(&targets).await,
            }
        }
        EngineCommand::JoinWaitlist { email } => EngineEvent::WaitlistAnswered {
            result: waitlist.join(&email).await,
        },
    }
}
