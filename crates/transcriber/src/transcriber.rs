use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;
use voxnote_audio::DEFAULT_CHUNK_SECONDS;
use voxnote_stt::{EngineLoader, SpeechEngine};

use crate::events::TranscriptionEvent;
use crate::run::{self, RunContext};
use crate::{Result, TranscribeError};

/// Lifecycle of a [`Transcriber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No engine loaded.
    Idle,
    /// A model load is in flight.
    Initializing,
    /// Engine loaded, no run active. Terminal run events land here too:
    /// the model stays loaded for the next file.
    Ready,
    /// A run is active; `start` and `initialize` are rejected until it
    /// reaches its terminal event.
    Transcribing,
}

struct State {
    phase: Phase,
    engine: Option<Arc<dyn SpeechEngine>>,
    run: Option<RunHandle>,
}

struct RunHandle {
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

struct Inner {
    loader: Arc<dyn EngineLoader>,
    models_dir: PathBuf,
    chunk_seconds: u32,
    state: Mutex<State>,
}

/// Owns one loaded speech engine and runs one file at a time.
///
/// All methods take `&self`; the handle is cheap to clone and every clone
/// drives the same underlying state machine.
#[derive(Clone)]
pub struct Transcriber {
    inner: Arc<Inner>,
}

impl Transcriber {
    /// A transcriber with the default 30-second chunk length.
    pub fn new(loader: Arc<dyn EngineLoader>, models_dir: impl Into<PathBuf>) -> Self {
        Self::with_chunk_seconds(loader, models_dir, DEFAULT_CHUNK_SECONDS)
    }

    pub fn with_chunk_seconds(
        loader: Arc<dyn EngineLoader>,
        models_dir: impl Into<PathBuf>,
        chunk_seconds: u32,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader,
                models_dir: models_dir.into(),
                chunk_seconds,
                state: Mutex::new(State {
                    phase: Phase::Idle,
                    engine: None,
                    run: None,
                }),
            }),
        }
    }

    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    pub fn is_transcribing(&self) -> bool {
        self.phase() == Phase::Transcribing
    }

    /// Loads `model_name` from the models directory and installs it as the
    /// current engine. Rejected while a run is active. On failure the
    /// previous engine is dropped and the transcriber returns to `Idle`.
    pub fn initialize(&self, model_name: &str) -> Result<()> {
        {
            let mut state = self.lock_state();
            if state.phase == Phase::Transcribing {
                return Err(TranscribeError::Busy);
            }
            state.phase = Phase::Initializing;
        }

        let model_path = self.inner.models_dir.join(model_name);
        match self.inner.loader.load(&model_path) {
            Ok(engine) => {
                tracing::info!(model = model_name, "model loaded");
                let mut state = self.lock_state();
                state.engine = Some(engine);
                state.phase = Phase::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::error!(model = model_name, "model load failed: {err}");
                let mut state = self.lock_state();
                state.engine = None;
                state.phase = Phase::Idle;
                Err(TranscribeError::ModelLoad(err.to_string()))
            }
        }
    }

    /// Starts transcribing the WAV file at `path` and returns the run's
    /// event stream. The stream ends with exactly one terminal event, after
    /// which the channel closes and the transcriber is `Ready` again.
    pub fn start(
        &self,
        path: impl Into<PathBuf>,
        language: impl Into<String>,
    ) -> Result<UnboundedReceiver<TranscriptionEvent>> {
        let path = path.into();
        let language = language.into();

        let mut state = self.lock_state();
        match state.phase {
            Phase::Transcribing => return Err(TranscribeError::Busy),
            Phase::Idle | Phase::Initializing => return Err(TranscribeError::ModelNotLoaded),
            Phase::Ready => {}
        }
        let Some(engine) = state.engine.clone() else {
            return Err(TranscribeError::ModelNotLoaded);
        };

        let (events, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let ctx = RunContext {
            engine,
            path,
            language,
            chunk_seconds: self.inner.chunk_seconds,
            cancel: cancel.clone(),
            events,
        };

        let owner = self.clone();
        let worker = thread::spawn(move || {
            let terminal = run::execute(&ctx);
            owner.run_finished();
            let _ = ctx.events.send(terminal);
        });

        state.phase = Phase::Transcribing;
        state.run = Some(RunHandle { cancel, worker });

        Ok(receiver)
    }

    /// Requests a cooperative stop. The worker checks between chunks; the
    /// in-flight chunk completes and its segments are still delivered. A
    /// no-op when nothing is running.
    pub fn stop(&self) {
        let state = self.lock_state();
        if state.phase == Phase::Transcribing {
            if let Some(run) = state.run.as_ref() {
                tracing::info!("stop requested");
                run.cancel.cancel();
            }
        }
    }

    /// Stops any active run, waits for its worker, drops the engine and
    /// returns to `Idle`. The run still delivers its terminal event.
    pub fn finish(&self) {
        let run = {
            let mut state = self.lock_state();
            state.run.take()
        };
        if let Some(run) = run {
            run.cancel.cancel();
            let _ = run.worker.join();
        }

        let mut state = self.lock_state();
        state.engine = None;
        state.phase = Phase::Idle;
        tracing::info!("transcriber released");
    }

    pub fn does_model_exist(&self, model_name: &str) -> bool {
        self.inner.models_dir.join(model_name).exists()
    }

    /// Validates a model file by loading it. On success the loaded engine
    /// stays installed, so a subsequent `start` needs no `initialize`.
    /// `false` while a run is active.
    pub fn is_valid_model(&self, model_name: &str) -> bool {
        self.initialize(model_name).is_ok()
    }

    fn run_finished(&self) {
        let mut state = self.lock_state();
        state.phase = Phase::Ready;
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
