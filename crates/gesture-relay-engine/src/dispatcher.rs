//! Command routing.
//!
//! [`CommandDispatcher`] is the single entry point for typed commands. It is
//! the only component that touches the cursor on behalf of a command and
//! the only one that turns gesture outcomes into the boolean result the
//! remote controller sees.

use std::sync::Arc;

use gesture_relay_input::GestureBackend;
use gesture_relay_types::{
    Command, DeviceInput, Gesture, GestureError, GestureOutcome, GlobalAction, Key, KeyState,
    MouseButton, Point, Response, TouchPoint,
};
use tracing::{debug, info, warn};

use crate::actions::GlobalActionMap;
use crate::composer::GestureComposer;
use crate::config::GestureDefaults;
use crate::context::EngineContext;
use crate::cursor::CursorState;
use crate::error::EngineError;
use crate::execution::{GestureExecutionEngine, GestureHandle};

/// Opens whatever surface lets the user enable the input capability.
pub trait SettingsOpener: Send + Sync {
    fn open_settings(&self);
}

/// What [`CommandDispatcher::submit`] left to do.
#[derive(Debug)]
pub enum Submission {
    /// The command has taken full effect.
    Ready(Response),
    /// A gesture is playing; its result arrives later.
    Pending(PendingGesture),
}

impl Submission {
    /// Wait for the final response.
    pub async fn finish(self) -> Response {
        match self {
            Self::Ready(response) => response,
            Self::Pending(pending) => pending.finish().await,
        }
    }
}

/// A dispatched gesture whose outcome has not been reported yet.
#[derive(Debug)]
pub struct PendingGesture {
    command: &'static str,
    handle: GestureHandle,
}

impl PendingGesture {
    /// Wait for the gesture and map its outcome to `Done`.
    pub async fn finish(self) -> Response {
        let id = self.handle.id();
        match self.handle.outcome().await {
            GestureOutcome::Completed => Response::Done(true),
            GestureOutcome::Cancelled => {
                warn!(%id, command = self.command, "gesture cancelled");
                Response::Done(false)
            }
        }
    }
}

pub struct CommandDispatcher {
    context: Arc<EngineContext>,
    engine: GestureExecutionEngine,
    composer: GestureComposer,
    actions: GlobalActionMap,
    settings: Arc<dyn SettingsOpener>,
}

impl CommandDispatcher {
    pub fn new(
        context: Arc<EngineContext>,
        backend: Arc<dyn GestureBackend>,
        defaults: GestureDefaults,
        settings: Arc<dyn SettingsOpener>,
    ) -> Self {
        let engine = GestureExecutionEngine::new(backend, context.availability().clone());
        Self {
            context,
            engine,
            composer: GestureComposer::new(defaults),
            actions: GlobalActionMap,
            settings,
        }
    }

    pub fn context(&self) -> &Arc<EngineContext> {
        &self.context
    }

    /// Execute one command and wait for its result.
    pub async fn execute(&self, command: Command) -> Result<Response, EngineError> {
        Ok(self.submit(command).await?.finish().await)
    }

    /// Apply one command up to the point where only a gesture's outcome is
    /// outstanding.
    ///
    /// Validation, cursor reads and updates, composition and the hand-off to
    /// the backend all happen before this returns, so commands submitted one
    /// after another take effect in that order. Bad input is reported before
    /// availability is consulted. Anything that cannot run yields
    /// `Done(false)`.
    pub async fn submit(&self, command: Command) -> Result<Submission, EngineError> {
        let name = command.name();
        debug!(command = name, "executing command");

        let response = match command {
            Command::Tap { .. }
            | Command::Swipe { .. }
            | Command::LongPress { .. }
            | Command::Click {
                button: MouseButton::Left,
                ..
            }
            | Command::MultiTouch { .. } => {
                let gesture = self.compose(&command)?;
                return Ok(self.dispatch(name, gesture).await);
            }
            Command::Click { button, .. } => {
                Response::Done(self.engine.dispatch_input(&DeviceInput::click(button)).await)
            }
            Command::Global { ref action } => {
                let action: GlobalAction = action.parse()?;
                let id = self.actions.lookup(action);
                debug!(%action, platform_id = %id, "global action");
                Response::Done(self.engine.dispatch_global_action(id).await)
            }
            Command::Scroll { dx, dy } => Response::Done(
                self.engine
                    .dispatch_input(&[DeviceInput::Scroll { dx, dy }])
                    .await,
            ),
            Command::KeyPress { ref key } => {
                let key: Key = key.parse()?;
                Response::Done(self.engine.dispatch_input(&DeviceInput::key_press(key)).await)
            }
            Command::KeyDown { ref key } => {
                let key: Key = key.parse()?;
                Response::Done(self.key(key, KeyState::Pressed).await)
            }
            Command::KeyUp { ref key } => {
                let key: Key = key.parse()?;
                Response::Done(self.key(key, KeyState::Released).await)
            }
            Command::RelativeMove { dx, dy } => {
                if dx.is_nan() || dy.is_nan() {
                    return Err(GestureError::NonFiniteCoordinate.into());
                }
                Response::Done(self.update_cursor(name, |cursor| cursor.move_by(dx, dy)))
            }
            Command::SetPosition { x, y } => {
                let target = finite(x, y)?;
                Response::Done(self.update_cursor(name, |cursor| cursor.set(target.x, target.y)))
            }
            Command::GetPosition => Response::Position(self.context.position()),
            Command::IsAvailable => Response::Available(self.context.is_available()),
            Command::RequestEnable => {
                info!("opening capability settings");
                self.settings.open_settings();
                Response::Accepted
            }
            Command::Unsupported => {
                warn!("unsupported command");
                return Err(EngineError::Unsupported);
            }
        };
        Ok(Submission::Ready(response))
    }

    /// Build the gesture a command produces, with coordinates clamped to the
    /// current bounds. Does not dispatch anything.
    pub fn compose(&self, command: &Command) -> Result<Gesture, EngineError> {
        let composer = &self.composer;
        match *command {
            Command::Tap { x, y, duration_ms } => {
                composer.tap(self.clamp(finite(x, y)?), duration_ms)
            }
            Command::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration_ms,
            } => {
                let from = self.clamp(finite(x1, y1)?);
                let to = self.clamp(finite(x2, y2)?);
                composer.swipe(from, to, duration_ms)
            }
            Command::LongPress { x, y, duration_ms } => {
                composer.long_press(self.clamp(finite(x, y)?), duration_ms)
            }
            Command::Click {
                duration_ms,
                button: MouseButton::Left,
            } => composer.tap(self.context.position(), duration_ms),
            Command::MultiTouch { ref points } => {
                let points = points
                    .iter()
                    .map(|p| -> Result<TouchPoint, EngineError> {
                        let at = self.clamp(finite(p.x, p.y)?);
                        Ok(TouchPoint::new(at.x, at.y, p.start_offset_ms, p.duration_ms))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                composer.multi_touch(&points)
            }
            Command::Click { .. }
            | Command::Global { .. }
            | Command::Scroll { .. }
            | Command::KeyPress { .. }
            | Command::KeyDown { .. }
            | Command::KeyUp { .. }
            | Command::RelativeMove { .. }
            | Command::GetPosition
            | Command::SetPosition { .. }
            | Command::IsAvailable
            | Command::RequestEnable
            | Command::Unsupported => Err(EngineError::Unsupported),
        }
    }

    /// Detach the capability and tear down the backend.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.context.detach();
        self.engine.shutdown().await
    }

    async fn dispatch(&self, command: &'static str, gesture: Gesture) -> Submission {
        match self.engine.dispatch(gesture).await {
            Some(handle) => Submission::Pending(PendingGesture { command, handle }),
            None => {
                debug!(command, "gesture not dispatched");
                Submission::Ready(Response::Done(false))
            }
        }
    }

    async fn key(&self, key: Key, state: KeyState) -> bool {
        self.engine
            .dispatch_input(&[DeviceInput::Key { key, state }])
            .await
    }

    fn update_cursor(
        &self,
        command: &'static str,
        f: impl FnOnce(&mut CursorState) -> Point,
    ) -> bool {
        let moved = self
            .context
            .with_cursor(|cursor, available| available.then(|| f(cursor)));
        match moved {
            Some(position) => {
                debug!(command, x = position.x, y = position.y, "cursor updated");
                true
            }
            None => {
                debug!(command, "capability detached, cursor unchanged");
                false
            }
        }
    }

    fn clamp(&self, point: Point) -> Point {
        self.context.with_cursor(|cursor, _| cursor.clamp(point))
    }
}

fn finite(x: f32, y: f32) -> Result<Point, EngineError> {
    let point = Point::new(x, y);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(GestureError::NonFiniteCoordinate.into())
    }
}
