//! Refresh loop.
//!
//! One timeline drives `Sampling → Rendering → Waiting` until cancelled:
//!
//! ```text
//! Initializing ─▶ Sampling ─▶ Rendering ─▶ Waiting ─┐
//!      │              ▲                     │        │
//!      │              └─────────────────────┘        │
//!      └──────────────────────────────▶ Terminated ◀─┘
//! ```
//!
//! Cancellation is checked only while waiting. Termination by cancellation
//! always samples and renders one final snapshot; single-shot mode renders
//! exactly once.

use std::time::Duration;
use tracing::{debug, info, trace};

use crate::analyzers::{aggregate, project, ModelInput, DEFAULT_LIMIT_PCT};
use crate::collectors::StatsSource;
use crate::error::{AdvisorError, Result};
use crate::types::{Context, Snapshot};

/// Turns snapshots into output. Must not alter what it is given.
pub trait Renderer {
    /// Prepare output before the first frame (e.g. enter the alternate screen).
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be set up.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Show one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the frame fails.
    fn render(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()>;

    /// Tear down and show the last frame persistently.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the final frame fails.
    fn finish(&mut self, snapshot: &Snapshot, context: &Context) -> Result<()>;
}

/// Interruptible wait.
pub trait Interrupt {
    /// Block for up to `timeout`; `Ok(true)` when cancellation arrived first.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal source fails.
    fn wait(&mut self, timeout: Duration) -> Result<bool>;
}

/// Plain sleep that is never cancelled.
#[derive(Debug, Default)]
pub struct NoInterrupt;

impl Interrupt for NoInterrupt {
    fn wait(&mut self, timeout: Duration) -> Result<bool> {
        std::thread::sleep(timeout);
        Ok(false)
    }
}

/// Loop states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Sampling,
    Rendering,
    Waiting,
    Terminated,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Single-shot mode rendered its one frame.
    Once,
    /// Cancelled; a final snapshot was rendered.
    Cancelled,
}

/// Loop parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub limit_pct: f64,
    pub tick: Duration,
    pub warmup: Duration,
    pub once: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            limit_pct: DEFAULT_LIMIT_PCT,
            tick: Duration::from_secs(1),
            warmup: Duration::from_secs(2),
            once: false,
        }
    }
}

/// Sample a source and project it.
///
/// # Errors
///
/// Returns [`AdvisorError::NoZram`] when no device is active, or the source's
/// own error.
pub fn take_snapshot<S: StatsSource + ?Sized>(source: &mut S, limit_pct: f64) -> Result<Snapshot> {
    let memory = source.memory_totals()?;
    let devices = source.devices()?;
    let aggregated = aggregate(&devices).ok_or(AdvisorError::NoZram)?;
    let projection = project(&ModelInput::new(&memory, &aggregated, limit_pct));
    debug!(source = source.id(), devices = devices.len(), "sampled");
    Ok(Snapshot {
        memory,
        devices,
        aggregated,
        projection,
    })
}

/// Drives sampling, projection, and rendering.
pub struct MonitorLoop<S, R, I> {
    source: S,
    renderer: R,
    interrupt: I,
    context: Context,
    settings: LoopSettings,
    frames: u64,
}

impl<S, R, I> MonitorLoop<S, R, I>
where
    S: StatsSource,
    R: Renderer,
    I: Interrupt,
{
    pub fn new(
        source: S,
        renderer: R,
        interrupt: I,
        context: Context,
        settings: LoopSettings,
    ) -> Self {
        Self {
            source,
            renderer,
            interrupt,
            context,
            settings,
            frames: 0,
        }
    }

    /// Frames rendered so far, final snapshot included.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the renderer (to inspect captured output).
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Run until single-shot completion or cancellation.
    ///
    /// # Errors
    ///
    /// [`AdvisorError::NoZram`] if no device is active at any sample; any
    /// source, renderer, or interrupt error otherwise.
    pub fn run(&mut self) -> Result<LoopExit> {
        let mut state = LoopState::Initializing;
        let mut current: Option<Snapshot> = None;
        info!(settings = ?self.settings, "monitor loop starting");

        loop {
            trace!(?state);
            state = match state {
                LoopState::Initializing => {
                    // No zRAM must be reported before any output is set up.
                    current = Some(take_snapshot(&mut self.source, self.settings.limit_pct)?);
                    if self.settings.once {
                        LoopState::Rendering
                    } else {
                        self.renderer.start()?;
                        if self.interrupt.wait(self.settings.warmup)? {
                            LoopState::Terminated
                        } else {
                            LoopState::Sampling
                        }
                    }
                }
                LoopState::Sampling => {
                    current = Some(take_snapshot(&mut self.source, self.settings.limit_pct)?);
                    LoopState::Rendering
                }
                LoopState::Rendering => {
                    if let Some(snapshot) = current.as_ref() {
                        self.renderer.render(snapshot, &self.context)?;
                        self.frames += 1;
                    }
                    if self.settings.once {
                        LoopState::Terminated
                    } else {
                        LoopState::Waiting
                    }
                }
                LoopState::Waiting => {
                    if self.interrupt.wait(self.settings.tick)? {
                        LoopState::Terminated
                    } else {
                        LoopState::Sampling
                    }
                }
                LoopState::Terminated => {
                    if self.settings.once {
                        info!(frames = self.frames, "single-shot complete");
                        return Ok(LoopExit::Once);
                    }
                    let last = take_snapshot(&mut self.source, self.settings.limit_pct)?;
                    self.renderer.finish(&last, &self.context)?;
                    self.frames += 1;
                    info!(frames = self.frames, "monitor loop cancelled");
                    return Ok(LoopExit::Cancelled);
                }
            };
        }
    }
}
