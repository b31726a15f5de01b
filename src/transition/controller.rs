//! Mutually exclusive transitions between the overview and zoom views.
//!
//! A request is accepted or dropped synchronously, under the controller
//! lock, and the accepted sequence then runs as a spawned task on the
//! current tokio runtime. The phase is marked as transitioning before the
//! task is spawned, so any request arriving before the task settles is
//! dropped.

use super::phase::{InputScope, ViewPhase, ZoomViewState};
use super::presenter::ViewPresenter;
use super::room::RoomSide;
use crate::core::{State, StateHistory, StateTransition};
use crate::events::{EventChannel, GameEvent, Subscription, Topic, WeakEventChannel};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Why a transition request was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Another transition is still running.
    InFlight,
    /// Open requested while not settled in the overview.
    NotInOverview,
    /// Close requested while not settled in a zoom view.
    NotInZoom,
    UnknownView,
    /// No tokio runtime to drive the animation on.
    NoRuntime,
}

#[derive(Debug)]
pub enum TransitionOutcome {
    /// The sequence is running; the handle resolves to the settled phase.
    Started(JoinHandle<ViewPhase>),
    Dropped(DropReason),
}

impl TransitionOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }

    pub fn dropped_reason(&self) -> Option<DropReason> {
        match self {
            Self::Started(_) => None,
            Self::Dropped(reason) => Some(*reason),
        }
    }

    /// Wait for a started transition to settle.
    pub async fn settled(self) -> Option<ViewPhase> {
        match self {
            Self::Started(handle) => handle.await.ok(),
            Self::Dropped(_) => None,
        }
    }
}

struct ControllerState {
    phase: ViewPhase,
    input: InputScope,
    overview_active: bool,
    zoom_views: BTreeMap<String, bool>,
    side: RoomSide,
    history: StateHistory<ViewPhase>,
}

impl ControllerState {
    fn open_denial(&self, view_id: &str) -> Option<DropReason> {
        if self.phase.is_transitioning() {
            Some(DropReason::InFlight)
        } else if self.phase != ViewPhase::Overview {
            Some(DropReason::NotInOverview)
        } else if !self.zoom_views.contains_key(view_id) {
            Some(DropReason::UnknownView)
        } else {
            None
        }
    }

    fn settle(&mut self, from: ViewPhase, to: ViewPhase, input: InputScope) {
        self.history = self.history.record(StateTransition::now(from, to.clone()));
        self.phase = to;
        self.input = input;
    }
}

/// Handle captured by event handlers. Holds the controller state and the
/// channel weakly, so a registered handler never keeps either alive.
struct WeakController {
    state: Weak<Mutex<ControllerState>>,
    presenter: Arc<dyn ViewPresenter>,
    events: WeakEventChannel,
}

impl WeakController {
    fn upgrade(&self) -> Option<TransitionController> {
        let controller = TransitionController {
            state: self.state.upgrade()?,
            presenter: Arc::clone(&self.presenter),
            events: self.events.upgrade()?,
        };
        Some(controller)
    }
}

/// Owner of the overview/zoom presentation state.
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct TransitionController {
    state: Arc<Mutex<ControllerState>>,
    presenter: Arc<dyn ViewPresenter>,
    events: EventChannel,
}

impl TransitionController {
    /// Start settled in the overview on the main side, input enabled.
    pub fn new(presenter: Arc<dyn ViewPresenter>, events: EventChannel) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                phase: ViewPhase::Overview,
                input: InputScope::Overview,
                overview_active: true,
                zoom_views: BTreeMap::new(),
                side: RoomSide::Main,
                history: StateHistory::new(),
            })),
            presenter,
            events,
        }
    }

    fn downgrade(&self) -> WeakController {
        WeakController {
            state: Arc::downgrade(&self.state),
            presenter: Arc::clone(&self.presenter),
            events: self.events.downgrade(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a zoom view during setup. Views start inactive.
    ///
    /// Returns `false` if the id was already registered.
    pub fn register_zoom_view(&self, view_id: impl Into<String>) -> bool {
        let view_id = view_id.into();
        let mut state = self.lock();
        if state.zoom_views.contains_key(&view_id) {
            return false;
        }
        state.zoom_views.insert(view_id, false);
        true
    }

    /// Begin the overview to zoom sequence.
    ///
    /// Disable input, fade out, swap the overview for the zoom view, fade in,
    /// then scope input to the zoom view.
    pub fn open_zoom_view(&self, view_id: &str) -> TransitionOutcome {
        let runtime = {
            let mut state = self.lock();
            if let Some(reason) = state.open_denial(view_id) {
                drop(state);
                return self.dropped(reason, Some(view_id));
            }
            let Ok(runtime) = Handle::try_current() else {
                drop(state);
                return self.dropped(DropReason::NoRuntime, Some(view_id));
            };
            state.phase = ViewPhase::TransitioningToZoom {
                view_id: view_id.to_string(),
            };
            state.input = InputScope::Disabled;
            runtime
        };
        self.presenter.set_input(&InputScope::Disabled);
        debug!(view = view_id, "Opening zoom view");

        let controller = self.clone();
        let view_id = view_id.to_string();
        TransitionOutcome::Started(runtime.spawn(async move { controller.run_open(view_id).await }))
    }

    /// Begin the zoom to overview sequence; the reverse of
    /// [`TransitionController::open_zoom_view`].
    pub fn close_zoom_view(&self) -> TransitionOutcome {
        let (runtime, view_id) = {
            let mut state = self.lock();
            let view_id = match state.phase.clone() {
                ViewPhase::Zoom { view_id } => view_id,
                ViewPhase::Overview => {
                    drop(state);
                    return self.dropped(DropReason::NotInZoom, None);
                }
                _ => {
                    drop(state);
                    return self.dropped(DropReason::InFlight, None);
                }
            };
            let Ok(runtime) = Handle::try_current() else {
                drop(state);
                return self.dropped(DropReason::NoRuntime, Some(&view_id));
            };
            state.phase = ViewPhase::TransitioningToOverview {
                view_id: view_id.clone(),
            };
            state.input = InputScope::Disabled;
            (runtime, view_id)
        };
        self.presenter.set_input(&InputScope::Disabled);
        debug!(view = %view_id, "Closing zoom view");

        let controller = self.clone();
        TransitionOutcome::Started(runtime.spawn(async move { controller.run_close(view_id).await }))
    }

    fn dropped(&self, reason: DropReason, view_id: Option<&str>) -> TransitionOutcome {
        if reason == DropReason::UnknownView {
            warn!(view = view_id, "Ignoring request for unregistered zoom view");
        } else {
            debug!(view = view_id, ?reason, "Transition request dropped");
        }
        TransitionOutcome::Dropped(reason)
    }

    async fn run_open(self, view_id: String) -> ViewPhase {
        self.presenter.fade_out().await;

        {
            let mut state = self.lock();
            state.overview_active = false;
            if let Some(active) = state.zoom_views.get_mut(&view_id) {
                *active = true;
            }
        }
        self.presenter.set_overview_visible(false);
        self.presenter.set_zoom_view_visible(&view_id, true);

        self.presenter.fade_in().await;

        let settled = ViewPhase::zoom(view_id.clone());
        let input = InputScope::Zoom(view_id.clone());
        self.lock()
            .settle(ViewPhase::Overview, settled.clone(), input.clone());
        self.presenter.set_input(&input);
        info!(view = %view_id, "Zoom view open");
        settled
    }

    async fn run_close(self, view_id: String) -> ViewPhase {
        self.presenter.fade_out().await;

        {
            let mut state = self.lock();
            if let Some(active) = state.zoom_views.get_mut(&view_id) {
                *active = false;
            }
            state.overview_active = true;
        }
        self.presenter.set_zoom_view_visible(&view_id, false);
        self.presenter.set_overview_visible(true);

        self.presenter.fade_in().await;

        self.lock().settle(
            ViewPhase::zoom(view_id.clone()),
            ViewPhase::Overview,
            InputScope::Overview,
        );
        self.presenter.set_input(&InputScope::Overview);
        info!(view = %view_id, "Back to overview");
        ViewPhase::Overview
    }

    /// Turn to the next wall. Only accepted while settled in the overview
    /// with input enabled.
    pub fn next_side(&self) -> Option<RoomSide> {
        self.turn(RoomSide::next)
    }

    pub fn previous_side(&self) -> Option<RoomSide> {
        self.turn(RoomSide::previous)
    }

    fn turn(&self, step: fn(RoomSide) -> RoomSide) -> Option<RoomSide> {
        let side = {
            let mut state = self.lock();
            if state.phase != ViewPhase::Overview || state.input != InputScope::Overview {
                debug!(phase = state.phase.name(), "Ignoring room turn outside overview");
                return None;
            }
            state.side = step(state.side);
            state.side
        };
        self.presenter.show_room_side(side);
        info!(?side, "Room side changed");
        Some(side)
    }

    /// Publish a `ZoomEnter` request on the session channel.
    pub fn request_open(&self, view_id: impl Into<String>) {
        self.events.publish(GameEvent::zoom_enter(view_id));
    }

    /// Publish a `ZoomExit` request on the session channel.
    pub fn request_close(&self) {
        self.events.publish(GameEvent::ZoomExit);
    }

    /// Drive transitions from `ZoomEnter`/`ZoomExit` events.
    ///
    /// The handlers live as long as the returned subscriptions. They hold the
    /// controller weakly; once every controller handle is dropped, requests
    /// are ignored.
    pub fn attach(&self) -> [Subscription; 2] {
        let opener = self.downgrade();
        let enter = self.events.subscribe(Topic::ZoomEnter, move |event| {
            let GameEvent::ZoomEnter { view_id } = event else {
                return;
            };
            match opener.upgrade() {
                Some(controller) => {
                    controller.open_zoom_view(view_id);
                }
                None => debug!(view = %view_id, "Zoom request after controller dropped"),
            }
        });
        let closer = self.downgrade();
        let exit = self.events.subscribe(Topic::ZoomExit, move |_| match closer.upgrade() {
            Some(controller) => {
                controller.close_zoom_view();
            }
            None => debug!("Zoom exit request after controller dropped"),
        });
        [enter, exit]
    }

    pub fn phase(&self) -> ViewPhase {
        self.lock().phase.clone()
    }

    pub fn input_scope(&self) -> InputScope {
        self.lock().input.clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.lock().phase.is_transitioning()
    }

    pub fn active_zoom_view(&self) -> Option<String> {
        self.lock().phase.active_zoom().map(str::to_string)
    }

    pub fn is_overview_active(&self) -> bool {
        self.lock().overview_active
    }

    pub fn zoom_view_state(&self, view_id: &str) -> Option<ZoomViewState> {
        self.lock()
            .zoom_views
            .get(view_id)
            .map(|&active| ZoomViewState {
                view_id: view_id.to_string(),
                active,
            })
    }

    pub fn zoom_views(&self) -> Vec<ZoomViewState> {
        self.lock()
            .zoom_views
            .iter()
            .map(|(view_id, &active)| ZoomViewState {
                view_id: view_id.clone(),
                active,
            })
            .collect()
    }

    pub fn room_side(&self) -> RoomSide {
        self.lock().side
    }

    /// Settled changes so far.
    pub fn history(&self) -> StateHistory<ViewPhase> {
        self.lock().history.clone()
    }
}

impl fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TransitionController")
            .field("phase", &state.phase)
            .field("input", &state.input)
            .field("overview_active", &state.overview_active)
            .field("zoom_views", &state.zoom_views)
            .field("side", &state.side)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{InstantPresenter, TimedPresenter};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// Each fade waits for one permit released by the test.
    struct GatedPresenter {
        gate: Semaphore,
        calls: std::sync::Mutex<Vec<String>>,
    }

    impl GatedPresenter {
        fn new() -> Self {
            Self {
                gate: Semaphore::new(0),
                calls: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn release(&self, fades: usize) {
            self.gate.add_permits(fades);
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ViewPresenter for GatedPresenter {
        async fn fade_out(&self) {
            self.log("fade_out".to_string());
            self.gate.acquire().await.unwrap().forget();
        }

        async fn fade_in(&self) {
            self.log("fade_in".to_string());
            self.gate.acquire().await.unwrap().forget();
        }

        fn set_overview_visible(&self, visible: bool) {
            self.log(format!("overview:{visible}"));
        }

        fn set_zoom_view_visible(&self, view_id: &str, visible: bool) {
            self.log(format!("{view_id}:{visible}"));
        }

        fn set_input(&self, scope: &InputScope) {
            self.log(format!("input:{scope:?}"));
        }
    }

    fn gated() -> (TransitionController, Arc<GatedPresenter>) {
        let presenter = Arc::new(GatedPresenter::new());
        let controller = TransitionController::new(presenter.clone(), EventChannel::new());
        controller.register_zoom_view("dial_safe");
        controller.register_zoom_view("code_panel");
        (controller, presenter)
    }

    fn instant() -> TransitionController {
        let controller = TransitionController::new(Arc::new(InstantPresenter), EventChannel::new());
        controller.register_zoom_view("dial_safe");
        controller
    }

    #[tokio::test]
    async fn open_runs_full_sequence() {
        let (controller, presenter) = gated();

        let outcome = controller.open_zoom_view("dial_safe");
        assert!(outcome.is_started());
        assert!(controller.is_transitioning());
        assert_eq!(controller.input_scope(), InputScope::Disabled);

        presenter.release(2);
        assert_eq!(outcome.settled().await, Some(ViewPhase::zoom("dial_safe")));

        assert_eq!(controller.input_scope(), InputScope::Zoom("dial_safe".to_string()));
        assert!(!controller.is_overview_active());
        assert_eq!(
            controller.zoom_view_state("dial_safe"),
            Some(ZoomViewState {
                view_id: "dial_safe".to_string(),
                active: true
            })
        );
        assert_eq!(
            presenter.calls(),
            vec![
                "input:Disabled",
                "fade_out",
                "overview:false",
                "dial_safe:true",
                "fade_in",
                "input:Zoom(\"dial_safe\")",
            ]
        );
    }

    #[tokio::test]
    async fn requests_mid_transition_are_dropped() {
        let (controller, presenter) = gated();
        let first = controller.open_zoom_view("dial_safe");

        assert_eq!(
            controller.open_zoom_view("code_panel").dropped_reason(),
            Some(DropReason::InFlight)
        );
        assert_eq!(
            controller.close_zoom_view().dropped_reason(),
            Some(DropReason::InFlight)
        );

        presenter.release(1);
        while controller.is_overview_active() {
            tokio::task::yield_now().await;
        }
        // Between the fades neither view is settled active.
        assert!(controller.is_transitioning());
        assert_eq!(controller.active_zoom_view(), None);
        assert_eq!(
            controller.open_zoom_view("dial_safe").dropped_reason(),
            Some(DropReason::InFlight)
        );

        presenter.release(1);
        first.settled().await;

        assert_eq!(controller.active_zoom_view(), Some("dial_safe".to_string()));
        assert_eq!(
            controller.zoom_view_state("code_panel").map(|view| view.active),
            Some(false)
        );
        assert_eq!(controller.history().transitions().len(), 1);
    }

    #[tokio::test]
    async fn requests_during_close_are_dropped() {
        let (controller, presenter) = gated();
        presenter.release(2);
        controller.open_zoom_view("dial_safe").settled().await;

        let closing = controller.close_zoom_view();
        assert!(closing.is_started());
        assert_eq!(
            controller.phase(),
            ViewPhase::TransitioningToOverview {
                view_id: "dial_safe".to_string()
            }
        );
        assert_eq!(
            controller.open_zoom_view("code_panel").dropped_reason(),
            Some(DropReason::InFlight)
        );
        assert_eq!(
            controller.close_zoom_view().dropped_reason(),
            Some(DropReason::InFlight)
        );

        presenter.release(1);
        while !controller.is_overview_active() {
            tokio::task::yield_now().await;
        }
        assert!(controller.is_transitioning());
        assert_eq!(controller.input_scope(), InputScope::Disabled);
        assert_eq!(
            controller.open_zoom_view("dial_safe").dropped_reason(),
            Some(DropReason::InFlight)
        );
        assert_eq!(
            controller.close_zoom_view().dropped_reason(),
            Some(DropReason::InFlight)
        );

        presenter.release(1);
        assert_eq!(closing.settled().await, Some(ViewPhase::Overview));

        assert_eq!(controller.active_zoom_view(), None);
        assert_eq!(
            controller.zoom_view_state("code_panel").map(|view| view.active),
            Some(false)
        );
        assert_eq!(controller.history().transitions().len(), 2);
    }

    #[tokio::test]
    async fn close_returns_to_overview() {
        let controller = instant();
        controller.open_zoom_view("dial_safe").settled().await;

        let outcome = controller.close_zoom_view();
        assert_eq!(outcome.settled().await, Some(ViewPhase::Overview));

        assert!(controller.is_overview_active());
        assert_eq!(controller.input_scope(), InputScope::Overview);
        assert_eq!(
            controller.zoom_view_state("dial_safe").map(|view| view.active),
            Some(false)
        );
        let history = controller.history();
        assert_eq!(
            history.get_path(),
            vec![
                &ViewPhase::Overview,
                &ViewPhase::zoom("dial_safe"),
                &ViewPhase::Overview,
            ]
        );
    }

    #[tokio::test]
    async fn open_from_zoom_and_close_from_overview_are_dropped() {
        let controller = instant();
        assert_eq!(
            controller.close_zoom_view().dropped_reason(),
            Some(DropReason::NotInZoom)
        );

        controller.open_zoom_view("dial_safe").settled().await;
        assert_eq!(
            controller.open_zoom_view("dial_safe").dropped_reason(),
            Some(DropReason::NotInOverview)
        );
    }

    #[tokio::test]
    async fn unknown_view_is_dropped_without_state_change() {
        let controller = instant();

        let outcome = controller.open_zoom_view("wardrobe");

        assert_eq!(outcome.dropped_reason(), Some(DropReason::UnknownView));
        assert_eq!(controller.phase(), ViewPhase::Overview);
        assert_eq!(controller.input_scope(), InputScope::Overview);
    }

    #[test]
    fn without_runtime_requests_are_dropped() {
        let controller = instant();

        let outcome = controller.open_zoom_view("dial_safe");

        assert_eq!(outcome.dropped_reason(), Some(DropReason::NoRuntime));
        assert_eq!(controller.phase(), ViewPhase::Overview);
    }

    #[tokio::test]
    async fn room_turns_only_in_settled_overview() {
        let controller = instant();

        assert_eq!(controller.next_side(), Some(RoomSide::Right));
        assert_eq!(controller.previous_side(), Some(RoomSide::Main));
        assert_eq!(controller.previous_side(), Some(RoomSide::Left));

        controller.open_zoom_view("dial_safe").settled().await;
        assert_eq!(controller.next_side(), None);
        assert_eq!(controller.room_side(), RoomSide::Left);
    }

    #[tokio::test]
    async fn attached_controller_follows_zoom_events() {
        let (controller, presenter) = gated();
        let _subscriptions = controller.attach();

        controller.request_open("code_panel");
        assert!(controller.is_transitioning());
        controller.request_open("dial_safe");

        presenter.release(2);
        while controller.is_transitioning() {
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.active_zoom_view(), Some("code_panel".to_string()));

        controller.request_close();
        presenter.release(2);
        while controller.is_transitioning() {
            tokio::task::yield_now().await;
        }
        assert_eq!(controller.phase(), ViewPhase::Overview);
    }

    #[tokio::test]
    async fn detached_handlers_do_not_keep_controller_alive() {
        let events = EventChannel::new();
        let controller = TransitionController::new(Arc::new(InstantPresenter), events.clone());
        controller.register_zoom_view("dial_safe");
        for subscription in controller.attach() {
            let _ = subscription.detach();
        }
        let state = Arc::downgrade(&controller.state);

        drop(controller);

        assert!(state.upgrade().is_none());
        assert_eq!(events.subscriber_count(Topic::ZoomEnter), 1);
        assert_eq!(events.publish(GameEvent::zoom_enter("dial_safe")), 1);
        assert_eq!(events.publish(GameEvent::ZoomExit), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_presenter_waits_both_fades() {
        let duration = Duration::from_millis(300);
        let controller =
            TransitionController::new(Arc::new(TimedPresenter::new(duration)), EventChannel::new());
        controller.register_zoom_view("book_clue");
        let start = tokio::time::Instant::now();

        controller.open_zoom_view("book_clue").settled().await;

        assert!(start.elapsed() >= duration * 2);
        assert_eq!(controller.active_zoom_view(), Some("book_clue".to_string()));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let controller = instant();
        assert!(!controller.register_zoom_view("dial_safe"));
        assert_eq!(controller.zoom_views().len(), 1);
    }
}
