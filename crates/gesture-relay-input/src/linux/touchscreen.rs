//! uinput-based gesture playback for Linux.
//!
//! Gestures are played on a virtual type-B multitouch touchscreen. Each
//! stroke owns one slot; positions are sampled once per frame and line
//! strokes are interpolated linearly. Only one gesture plays at a time: a new
//! submission interrupts the gesture in progress, which lifts its contacts
//! and reports `Cancelled`.
//!
//! Global-action keys, keyboard keys, pointer buttons and the wheel live on a
//! second virtual device so the touchscreen stays a plain touchscreen.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use evdev::uinput::VirtualDevice;
use evdev::{
    AbsInfo, AbsoluteAxisCode, AttributeSet, EventType, InputEvent, KeyCode as EvdevKey,
    RelativeAxisCode, UinputAbsSetup,
};
use gesture_relay_types::{
    DeviceInput, Gesture, GestureOutcome, Key, MouseButton, PlatformActionId, StrokePath,
    MAX_STROKES,
};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::keymap;
use crate::error::InputError;
use crate::{GestureBackend, GestureCallback, GestureId};

/// Largest tracking id before wrapping back to zero.
const MAX_TRACKING_ID: i32 = 0xFFFF;

/// Virtual touchscreen parameters.
#[derive(Debug, Clone)]
pub struct TouchscreenConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Interval between sampled frames during playback.
    pub frame_interval: Duration,
}

struct Inner {
    touch: Mutex<VirtualDevice>,
    controls: Mutex<VirtualDevice>,
    frame_interval: Duration,
    /// Id of the gesture allowed to play; any other playing gesture stops.
    active: AtomicU64,
    shutdown: AtomicBool,
    previous: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn emit(&self, events: &[InputEvent]) -> Result<(), InputError> {
        emit_to(&self.touch, events)
    }

    fn emit_controls(&self, events: &[InputEvent]) -> Result<(), InputError> {
        emit_to(&self.controls, events)
    }

    fn is_preempted(&self, id: GestureId) -> bool {
        self.shutdown.load(Ordering::SeqCst) || self.active.load(Ordering::SeqCst) != id.0
    }
}

fn emit_to(device: &Mutex<VirtualDevice>, events: &[InputEvent]) -> Result<(), InputError> {
    if events.is_empty() {
        return Ok(());
    }
    device
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .emit(events)
        .map_err(|e| InputError::Inject(e.to_string()))
}

/// Linux gesture backend using a uinput virtual touchscreen.
pub struct UinputTouchscreen {
    inner: Arc<Inner>,
}

impl UinputTouchscreen {
    pub fn new(config: &TouchscreenConfig) -> Result<Self, InputError> {
        let touch = Self::build_touch_device(config)?;
        let controls = Self::build_controls_device(&format!("{} controls", config.name))?;
        info!(
            name = %config.name,
            width = config.width,
            height = config.height,
            "created virtual touchscreen"
        );
        Ok(Self {
            inner: Arc::new(Inner {
                touch: Mutex::new(touch),
                controls: Mutex::new(controls),
                frame_interval: config.frame_interval.max(Duration::from_millis(1)),
                active: AtomicU64::new(0),
                shutdown: AtomicBool::new(false),
                previous: tokio::sync::Mutex::new(None),
            }),
        })
    }

    fn build_touch_device(config: &TouchscreenConfig) -> Result<VirtualDevice, InputError> {
        let max_x = i32::try_from(config.width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(config.height).unwrap_or(i32::MAX);
        let max_slot = i32::try_from(MAX_STROKES - 1).unwrap_or(0);

        let mut keys = AttributeSet::<EvdevKey>::new();
        keys.insert(EvdevKey::BTN_TOUCH);

        let axes = [
            (AbsoluteAxisCode::ABS_X, max_x),
            (AbsoluteAxisCode::ABS_Y, max_y),
            (AbsoluteAxisCode::ABS_MT_SLOT, max_slot),
            (AbsoluteAxisCode::ABS_MT_TRACKING_ID, MAX_TRACKING_ID),
            (AbsoluteAxisCode::ABS_MT_POSITION_X, max_x),
            (AbsoluteAxisCode::ABS_MT_POSITION_Y, max_y),
        ];

        let mut builder = VirtualDevice::builder()
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?
            .name(&config.name)
            .with_keys(&keys)
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?;

        for (axis, max) in axes {
            let setup = UinputAbsSetup::new(axis, AbsInfo::new(0, 0, max, 0, 0, 0));
            builder = builder
                .with_absolute_axis(&setup)
                .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?;
        }

        builder
            .build()
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))
    }

    /// Pointer-and-keyboard device for keys, buttons and the wheel.
    fn build_controls_device(name: &str) -> Result<VirtualDevice, InputError> {
        let mut keys = AttributeSet::<EvdevKey>::new();
        for key in keymap::action_keys() {
            keys.insert(key);
        }
        for key in Key::ALL {
            keys.insert(keymap::key_to_evdev_key(key));
        }
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            keys.insert(keymap::mouse_button_to_evdev_key(button));
        }

        let mut rel = AttributeSet::<RelativeAxisCode>::new();
        rel.insert(RelativeAxisCode::REL_X);
        rel.insert(RelativeAxisCode::REL_Y);
        rel.insert(RelativeAxisCode::REL_WHEEL);
        rel.insert(RelativeAxisCode::REL_HWHEEL);

        VirtualDevice::builder()
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?
            .name(name)
            .with_keys(&keys)
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?
            .with_relative_axes(&rel)
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))?
            .build()
            .map_err(|e| InputError::VirtualDeviceCreate(e.to_string()))
    }
}

#[async_trait]
impl GestureBackend for UinputTouchscreen {
    async fn dispatch_gesture(
        &self,
        gesture: Gesture,
        callback: GestureCallback,
    ) -> Result<(), InputError> {
        if self.inner.shutdown.load(Ordering::SeqCst) {
            return Err(InputError::Unavailable);
        }
        let id = callback.id();
        let mut previous = self.inner.previous.lock().await;
        self.inner.active.store(id.0, Ordering::SeqCst);
        let prior = previous.take();
        let inner = Arc::clone(&self.inner);

        *previous = Some(tokio::spawn(async move {
            if let Some(prior) = prior {
                let _ = prior.await;
            }
            let outcome = play(&inner, &callback, &gesture).await;
            debug!(%id, %outcome, "touchscreen playback finished");
            callback.resolve(outcome);
        }));
        Ok(())
    }

    async fn perform_global_action(&self, action: PlatformActionId) -> Result<(), InputError> {
        let key = keymap::action_to_evdev_key(action).ok_or(InputError::UnsupportedAction(action))?;
        self.inner
            .emit_controls(&[InputEvent::new(EventType::KEY.0, key.0, 1)])?;
        self.inner
            .emit_controls(&[InputEvent::new(EventType::KEY.0, key.0, 0)])?;
        debug!(%action, ?key, "performed global action");
        Ok(())
    }

    async fn inject(&self, input: DeviceInput) -> Result<(), InputError> {
        if self.inner.shutdown.load(Ordering::SeqCst) {
            return Err(InputError::Unavailable);
        }
        self.inner.emit_controls(&device_input_to_evdev(input))?;
        debug!(?input, "injected input");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), InputError> {
        self.inner.shutdown.store(true, Ordering::SeqCst);
        if let Some(playing) = self.inner.previous.lock().await.take() {
            let _ = playing.await;
        }
        info!("shut down touchscreen backend");
        Ok(())
    }
}

fn device_input_to_evdev(input: DeviceInput) -> Vec<InputEvent> {
    match input {
        DeviceInput::Button { button, state } => {
            let key = keymap::mouse_button_to_evdev_key(button);
            vec![InputEvent::new(
                EventType::KEY.0,
                key.0,
                keymap::key_state_to_evdev_value(state),
            )]
        }
        DeviceInput::Key { key, state } => {
            let key = keymap::key_to_evdev_key(key);
            vec![InputEvent::new(
                EventType::KEY.0,
                key.0,
                keymap::key_state_to_evdev_value(state),
            )]
        }
        DeviceInput::Scroll { dx, dy } => [
            (RelativeAxisCode::REL_WHEEL, dy),
            (RelativeAxisCode::REL_HWHEEL, dx),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount != 0)
        .map(|(axis, amount)| InputEvent::new(EventType::RELATIVE.0, axis.0, amount))
        .collect(),
    }
}

async fn play(inner: &Inner, callback: &GestureCallback, gesture: &Gesture) -> GestureOutcome {
    let id = callback.id();
    let mut playback = Playback::new(gesture.stroke_count());
    let mut ticker = tokio::time::interval(inner.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();

    loop {
        ticker.tick().await;
        if inner.is_preempted(id) || callback.is_abandoned() {
            if let Err(e) = inner.emit(&playback.release_all()) {
                warn!(%id, error = %e, "failed to lift contacts of interrupted gesture");
            }
            return GestureOutcome::Cancelled;
        }

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let events = playback.frame(gesture, elapsed);
        if let Err(e) = inner.emit(&events) {
            warn!(%id, error = %e, "gesture playback failed");
            let _ = inner.emit(&playback.release_all());
            return GestureOutcome::Cancelled;
        }
        if playback.is_finished() {
            return GestureOutcome::Completed;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Pending,
    Down,
    Lifted,
}

/// Frame-by-frame conversion of a gesture into multitouch events.
#[derive(Debug)]
struct Playback {
    contacts: Vec<Contact>,
    next_tracking_id: i32,
    touching: bool,
}

impl Playback {
    fn new(strokes: usize) -> Self {
        Self {
            contacts: vec![Contact::Pending; strokes],
            next_tracking_id: 0,
            touching: false,
        }
    }

    fn is_finished(&self) -> bool {
        self.contacts.iter().all(|c| *c == Contact::Lifted)
    }

    /// Events for the frame sampled `elapsed_ms` after gesture start.
    ///
    /// A contact goes down in the first frame at or after its start offset
    /// and lifts in a later frame, so every stroke touches at least once.
    fn frame(&mut self, gesture: &Gesture, elapsed_ms: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for (slot, stroke) in gesture.strokes().iter().enumerate() {
            match self.contacts[slot] {
                Contact::Pending if elapsed_ms >= stroke.start_offset_ms() => {
                    let tracking_id = self.take_tracking_id();
                    let at = stroke.position_at(elapsed_ms);
                    events.push(abs(AbsoluteAxisCode::ABS_MT_SLOT, slot_value(slot)));
                    events.push(abs(AbsoluteAxisCode::ABS_MT_TRACKING_ID, tracking_id));
                    events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_X, axis_value(at.x)));
                    events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_Y, axis_value(at.y)));
                    self.contacts[slot] = Contact::Down;
                }
                Contact::Down if elapsed_ms >= stroke.end_offset_ms() => {
                    events.push(abs(AbsoluteAxisCode::ABS_MT_SLOT, slot_value(slot)));
                    if let StrokePath::Line { to, .. } = stroke.path() {
                        events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_X, axis_value(to.x)));
                        events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_Y, axis_value(to.y)));
                    }
                    events.push(abs(AbsoluteAxisCode::ABS_MT_TRACKING_ID, -1));
                    self.contacts[slot] = Contact::Lifted;
                }
                Contact::Down => {
                    if let StrokePath::Line { .. } = stroke.path() {
                        let at = stroke.position_at(elapsed_ms);
                        events.push(abs(AbsoluteAxisCode::ABS_MT_SLOT, slot_value(slot)));
                        events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_X, axis_value(at.x)));
                        events.push(abs(AbsoluteAxisCode::ABS_MT_POSITION_Y, axis_value(at.y)));
                    }
                }
                Contact::Pending | Contact::Lifted => {}
            }
        }
        self.sync_touch(&mut events);
        events
    }

    /// Events lifting every contact still down.
    fn release_all(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for (slot, contact) in self.contacts.iter_mut().enumerate() {
            if *contact == Contact::Down {
                events.push(abs(AbsoluteAxisCode::ABS_MT_SLOT, slot_value(slot)));
                events.push(abs(AbsoluteAxisCode::ABS_MT_TRACKING_ID, -1));
            }
            *contact = Contact::Lifted;
        }
        self.sync_touch(&mut events);
        events
    }

    fn sync_touch(&mut self, events: &mut Vec<InputEvent>) {
        let touching = self.contacts.contains(&Contact::Down);
        if touching != self.touching {
            events.push(InputEvent::new(
                EventType::KEY.0,
                EvdevKey::BTN_TOUCH.0,
                i32::from(touching),
            ));
            self.touching = touching;
        }
    }

    fn take_tracking_id(&mut self) -> i32 {
        let id = self.next_tracking_id;
        self.next_tracking_id = if id >= MAX_TRACKING_ID { 0 } else { id + 1 };
        id
    }
}

fn abs(axis: AbsoluteAxisCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::ABSOLUTE.0, axis.0, value)
}

fn slot_value(slot: usize) -> i32 {
    i32::try_from(slot).unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn axis_value(coordinate: f32) -> i32 {
    coordinate.round() as i32
}
