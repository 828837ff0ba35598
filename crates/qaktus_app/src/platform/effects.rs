use std::sync::mpsc;
use std::thread;

use qaktus_core::{Effect, Msg};
use qaktus_engine::{ClientSettings, EngineEvent, EngineHandle, RequestError};
use qaktus_logging::{qaktus_info, qaktus_warn};

use super::clipboard::ClipboardWriter;
use super::ui::commands::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardWriter>,
    app_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: &ClientSettings,
        clipboard: Box<dyn ClipboardWriter>,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> anyhow::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(settings, event_tx)?;
        spawn_event_loop(event_rx, app_tx.clone());
        Ok(Self {
            engine,
            clipboard,
            app_tx,
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateLink { targets } => {
                    qaktus_info!("GenerateLink targets={}", targets.len());
                    self.engine.generate_link(targets);
                }
                Effect::CopyToClipboard { text } => match self.clipboard.write(&text) {
                    Ok(()) => {
                        let _ = self.app_tx.send(AppEvent::Msg(Msg::ClipboardWritten));
                    }
                    Err(err) => {
                        qaktus_warn!("Clipboard write failed: {:#}", err);
                        let _ = self
                            .app_tx
                            .send(AppEvent::Notice(format!("could not copy: {err}")));
                    }
                },
                Effect::JoinWaitlist { email } => {
                    qaktus_info!("JoinWaitlist email_len={}", email.len());
                    self.engine.join_waitlist(email);
                }
            }
        }
    }
}

fn spawn_event_loop(event_rx: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LinkGenerated { result } => Msg::GenerationCompleted {
            result: result.map_err(describe),
        },
        EngineEvent::WaitlistAnswered { result } => Msg::WaitlistCompleted {
            result: result.map_err(describe),
        },
    }
}

fn describe(err: RequestError) -> String {
    qaktus_warn!("Request failed: {}", err);
    err.kind.to_string()
}

#[cfg(test)]
mod tests {
    use qaktus_core::SignupReceipt;
    use qaktus_engine::FailureKind;

    use super::*;

    struct FailingClipboard;

    impl ClipboardWriter for FailingClipboard {
        fn write(&mut self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("no display")
        }
    }

    struct AcceptingClipboard;

    impl ClipboardWriter for AcceptingClipboard {
        fn write(&mut self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn copy_effect() -> Vec<Effect> {
        vec![Effect::CopyToClipboard {
            text: "https://qaktus.com/aD2f3".to_string(),
        }]
    }

    #[test]
    fn failed_clipboard_write_sends_notice_not_copied() {
        let (app_tx, app_rx) = mpsc::channel();
        let mut runner =
            EffectRunner::new(&ClientSettings::default(), Box::new(FailingClipboard), app_tx)
                .expect("runner starts");

        runner.run(copy_effect());

        match app_rx.try_recv() {
            Ok(AppEvent::Notice(text)) => assert!(text.contains("could not copy")),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(app_rx.try_recv().is_err());
    }

    #[test]
    fn successful_clipboard_write_reports_copied() {
        let (app_tx, app_rx) = mpsc::channel();
        let mut runner =
            EffectRunner::new(&ClientSettings::default(), Box::new(AcceptingClipboard), app_tx)
                .expect("runner starts");

        runner.run(copy_effect());

        assert_eq!(app_rx.try_recv(), Ok(AppEvent::Msg(Msg::ClipboardWritten)));
        assert!(app_rx.try_recv().is_err());
    }

    #[test]
    fn engine_failures_become_displayable_messages() {
        let msg = map_event(EngineEvent::LinkGenerated {
            result: Err(RequestError {
                kind: FailureKind::HttpStatus(502),
                message: "502 Bad Gateway".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::GenerationCompleted {
                result: Err("http status 502".to_string()),
            }
        );
    }

    #[test]
    fn duplicate_signup_passes_through_as_receipt() {
        let msg = map_event(EngineEvent::WaitlistAnswered {
            result: Ok(SignupReceipt::AlreadyListed),
        });
        assert_eq!(
            msg,
            Msg::WaitlistCompleted {
                result: Ok(SignupReceipt::AlreadyListed),
            }
        );
    }
}
