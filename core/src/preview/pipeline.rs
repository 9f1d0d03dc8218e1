use crate::error::Result;
use crate::extraction::FallbackMetadata;
use crate::preview::{FileHandle, HandleRegistry, PreviewState, RasterSnapshot};
use crate::types::PreviewConfig;
use crate::upload::SelectedFile;
use log::{debug, info, warn};

/// Decodes and draws a file, then captures a still image
#[allow(async_fn_in_trait)]
pub trait PrimaryRenderer {
    async fn render(&self, handle: &FileHandle) -> Result<RasterSnapshot>;
}

/// Parses identification fields from raw file bytes
#[allow(async_fn_in_trait)]
pub trait FallbackReader {
    async fn read(&self, bytes: &[u8]) -> Result<FallbackMetadata>;
}

/// Identifies which file selection a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
}

impl PreviewTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of delivering a completion to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state advanced
    Applied,
    /// The primary render failed; the fallback reader must run next
    FallbackRequired,
    /// Stale ticket or unexpected state; nothing changed
    Ignored,
}

/// Two-tier preview state machine
///
/// Primary render first; on error, an unrenderable frame, or no frame within
/// [`PreviewConfig::primary_timeout`], the metadata-only fallback runs.
/// Each selection bumps a generation counter and completions carrying an
/// older [`PreviewTicket`] are ignored. The per-file [`FileHandle`] is
/// released on reselection, on [`PreviewPipeline::close`], and on drop.
pub struct PreviewPipeline {
    config: PreviewConfig,
    registry: HandleRegistry,
    state: PreviewState,
    generation: u64,
    handle: Option<FileHandle>,
    last_render_failure: Option<String>,
}

impl PreviewPipeline {
    pub fn new(config: PreviewConfig) -> Self {
        Self::with_registry(config, HandleRegistry::new())
    }

    pub fn with_registry(config: PreviewConfig, registry: HandleRegistry) -> Self {
        Self {
            config,
            registry,
            state: PreviewState::Idle,
            generation: 0,
            handle: None,
            last_render_failure: None,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Handle held for the current file, if any
    pub fn handle(&self) -> Option<&FileHandle> {
        self.handle.as_ref()
    }

    /// Reason the most recent primary render failed
    pub fn last_render_failure(&self) -> Option<&str> {
        self.last_render_failure.as_deref()
    }

    /// Starts a preview for a newly selected file
    ///
    /// Any previous preview is abandoned: the state drops to Idle, the old
    /// handle is released and its ticket goes stale.
    pub fn select(&mut self, file: &SelectedFile) -> PreviewTicket {
        self.reset();
        self.handle = Some(self.registry.acquire(file));
        self.transition(PreviewState::LoadingPrimary);
        info!("Previewing {} (generation {})", file.name(), self.generation);
        PreviewTicket {
            generation: self.generation,
        }
    }

    /// Closes the preview and releases the current handle
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.handle = None;
        self.last_render_failure = None;
        self.transition(PreviewState::Idle);
    }

    fn transition(&mut self, next: PreviewState) {
        debug!("Preview {} -> {}", self.state, next);
        self.state = next;
    }

    fn accepts(&self, ticket: PreviewTicket, expected: fn(&PreviewState) -> bool) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Ignoring completion for generation {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        if !expected(&self.state) {
            debug!("Ignoring completion in state {}", self.state);
            return false;
        }
        true
    }

    /// Primary renderer produced a frame
    ///
    /// A frame that is not renderable counts as a failure.
    pub fn primary_rendered(&mut self, ticket: PreviewTicket, snapshot: RasterSnapshot) -> Transition {
        if !self.accepts(ticket, |s| matches!(s, PreviewState::LoadingPrimary)) {
            return Transition::Ignored;
        }
        if !snapshot.is_renderable() {
            return self.primary_failed(ticket, "no renderable frame".to_string());
        }
        self.transition(PreviewState::PrimaryRendered(snapshot));
        Transition::Applied
    }

    /// Primary renderer failed or timed out
    pub fn primary_failed(&mut self, ticket: PreviewTicket, reason: String) -> Transition {
        if !self.accepts(ticket, |s| matches!(s, PreviewState::LoadingPrimary)) {
            return Transition::Ignored;
        }
        warn!("Primary render failed, falling back to metadata: {}", reason);
        self.last_render_failure = Some(reason.clone());
        self.transition(PreviewState::PrimaryFailed(reason));
        self.transition(PreviewState::LoadingFallback);
        Transition::FallbackRequired
    }

    /// Fallback reader returned metadata
    pub fn fallback_parsed(&mut self, ticket: PreviewTicket, metadata: FallbackMetadata) -> Transition {
        if !self.accepts(ticket, |s| matches!(s, PreviewState::LoadingFallback)) {
            return Transition::Ignored;
        }
        self.transition(PreviewState::FallbackRendered(metadata));
        Transition::Applied
    }

    /// Fallback reader failed; `message` is shown to the user
    pub fn fallback_failed(&mut self, ticket: PreviewTicket, message: String) -> Transition {
        if !self.accepts(ticket, |s| matches!(s, PreviewState::LoadingFallback)) {
            return Transition::Ignored;
        }
        warn!("Preview unavailable: {}", message);
        self.transition(PreviewState::FallbackFailed(message));
        Transition::Applied
    }

    /// Runs the whole preview for one file
    ///
    /// Always returns with a terminal state.
    pub async fn preview<R, F>(
        &mut self,
        file: &SelectedFile,
        renderer: &R,
        reader: &F,
    ) -> &PreviewState
    where
        R: PrimaryRenderer,
        F: FallbackReader,
    {
        let ticket = self.select(file);
        let timeout = self.config.primary_timeout;

        let attempt = match self.handle.as_ref() {
            Some(handle) => Some(tokio::time::timeout(timeout, renderer.render(handle)).await),
            None => None,
        };

        let next = match attempt {
            Some(Ok(Ok(snapshot))) => self.primary_rendered(ticket, snapshot),
            Some(Ok(Err(e))) => self.primary_failed(ticket, e.to_string()),
            Some(Err(_)) => self.primary_failed(
                ticket,
                format!("no renderable frame within {} ms", timeout.as_millis()),
            ),
            None => self.primary_failed(ticket, "file handle was released".to_string()),
        };

        if next == Transition::FallbackRequired {
            match reader.read(file.bytes()).await {
                Ok(metadata) => self.fallback_parsed(ticket, metadata),
                Err(e) => self.fallback_failed(ticket, e.to_string()),
            };
        }

        &self.state
    }
}
