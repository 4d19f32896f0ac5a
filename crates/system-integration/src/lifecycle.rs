//! Widget lifecycle
//!
//! On mount and on every prop update the widget looks the requested index up
//! in the polygon's statistics cache. A hit draws straight away; a miss hides
//! the canvas and starts one summary request, whose completion writes the
//! cache and draws. Failed requests are logged and otherwise ignored, leaving
//! the widget in its loading state.
//!
//! Requests are tracked per (polygon, index) pair. Presenting a pair whose
//! request is still in flight waits for that request instead of issuing
//! another. A successful response always fills its own pair's cache slot.
//! Under [`StalePolicy::Ignore`] it is only drawn if that pair is still the
//! one on screen; under [`StalePolicy::LastWriteWins`] every response draws in
//! arrival order.

use crate::markup::Markup;
use crate::runtime::spawn_local;
use ndi_gauge_config::{CanvasConfig, GaugeConfig, StalePolicy};
use ndi_gauge_data::{PolygonSource, SummaryFetcher, SummaryTransport};
use ndi_gauge_renderer::{DrawSurface, GaugeRenderer};
use ndi_gauge_shared::{GaugeResult, IndexId, LayerType, Times};
use std::any::Any;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// Inbound properties supplied by the host
pub struct Props<P> {
    pub poly: Rc<P>,
    pub ndi: IndexId,
    pub times: Times,
    pub layer_type: LayerType,
}

impl<P> Props<P> {
    pub fn new(
        poly: Rc<P>,
        ndi: impl Into<IndexId>,
        times: Times,
        layer_type: impl Into<LayerType>,
    ) -> Self {
        Self {
            poly,
            ndi: ndi.into(),
            times,
            layer_type: layer_type.into(),
        }
    }
}

impl<P> Clone for Props<P> {
    fn clone(&self) -> Self {
        Self {
            poly: Rc::clone(&self.poly),
            ndi: self.ndi.clone(),
            times: self.times.clone(),
            layer_type: self.layer_type.clone(),
        }
    }
}

/// Outcome of presenting props to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The cached value was drawn synchronously
    Drawn,
    /// A summary request for the pair is in flight
    Fetching,
    /// Cache miss, but no request could be built; the widget stays loading
    Stalled,
    /// Nothing changed
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Mount,
    Update,
}

/// A (polygon, index) pair with the polygon type erased
struct PairRef {
    poly: Rc<dyn Any>,
    index: IndexId,
}

impl PairRef {
    fn new<P: PolygonSource + 'static>(poly: &Rc<P>, index: &IndexId) -> Self {
        let poly: Rc<dyn Any> = poly.clone();
        Self {
            poly,
            index: index.clone(),
        }
    }

    fn matches<P: PolygonSource + 'static>(&self, poly: &P, index: &IndexId) -> bool {
        self.index == *index
            && self
                .poly
                .downcast_ref::<P>()
                .is_some_and(|other| other.same_polygon(poly))
    }
}

struct PendingRequest {
    token: u64,
    pair: PairRef,
}

#[derive(Default)]
struct WidgetState {
    loaded: bool,
    mounted: bool,
    next_token: u64,
    /// Pair most recently presented while mounted
    current: Option<PairRef>,
    pending: Vec<PendingRequest>,
}

type MarkupObserver = Box<dyn Fn(&Markup)>;

struct Shared<T, S> {
    id: Uuid,
    policy: StalePolicy,
    loading_text: String,
    canvas: CanvasConfig,
    fetcher: SummaryFetcher<T>,
    renderer: GaugeRenderer,
    surface: RefCell<S>,
    state: RefCell<WidgetState>,
    observers: RefCell<Vec<MarkupObserver>>,
}

/// Gauge widget comparing an index over a drawn polygon
///
/// Single-threaded: completions run on the thread that mounted the widget.
/// Native hosts drive it from inside a `tokio::task::LocalSet`.
pub struct IndexComparison<T, S> {
    shared: Rc<Shared<T, S>>,
}

impl<T, S> IndexComparison<T, S>
where
    T: SummaryTransport + 'static,
    S: DrawSurface + 'static,
{
    /// Create a widget that owns `surface` and reaches the service through `transport`
    pub fn new(config: GaugeConfig, transport: T, surface: S) -> GaugeResult<Self> {
        let config = config.validated()?;
        let id = Uuid::new_v4();

        let fetcher = SummaryFetcher::new(transport, config.endpoint.clone());
        let renderer = GaugeRenderer::new(&config);
        log::debug!("[{id}] Created index comparison widget");

        Ok(Self {
            shared: Rc::new(Shared {
                id,
                policy: config.fetch.stale_responses,
                loading_text: config.loading_text,
                canvas: config.canvas,
                fetcher,
                renderer,
                surface: RefCell::new(surface),
                state: RefCell::new(WidgetState::default()),
                observers: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Attach to the host and present the first props
    ///
    /// # Panics
    ///
    /// On native targets a cache miss spawns the request with
    /// `tokio::task::spawn_local`, which panics outside a `LocalSet`. Cache
    /// hits never spawn.
    pub fn mount<P: PolygonSource + 'static>(&self, props: Props<P>) -> Transition {
        self.shared.state.borrow_mut().mounted = true;
        log::debug!(
            "[{}] Mounting {} gauge ({})",
            self.shared.id,
            props.ndi,
            props.layer_type
        );
        self.present(props, Phase::Mount)
    }

    /// Present updated props; same `LocalSet` requirement as [`Self::mount`]
    pub fn receive_props<P: PolygonSource + 'static>(&self, props: Props<P>) -> Transition {
        if !self.shared.state.borrow().mounted {
            log::debug!("[{}] Ignoring props for unmounted widget", self.shared.id);
            return Transition::Unchanged;
        }
        self.present(props, Phase::Update)
    }

    /// Detach from the host
    ///
    /// Outstanding requests are not aborted. Their responses still fill the
    /// cache but never draw.
    pub fn unmount(&self) {
        let mut state = self.shared.state.borrow_mut();
        state.mounted = false;
        state.current = None;
        log::debug!(
            "[{}] Unmounted with {} request(s) in flight",
            self.shared.id,
            state.pending.len()
        );
    }

    pub fn instance_id(&self) -> Uuid {
        self.shared.id
    }

    pub fn is_loaded(&self) -> bool {
        self.shared.state.borrow().loaded
    }

    pub fn pending_requests(&self) -> usize {
        self.shared.state.borrow().pending.len()
    }

    pub fn render(&self) -> Markup {
        self.shared.markup()
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.shared.surface.borrow()
    }

    /// Call `observer` with fresh markup whenever the loaded flag flips
    ///
    /// Observers must not register further observers from inside the callback.
    pub fn on_markup_change<F>(&self, observer: F)
    where
        F: Fn(&Markup) + 'static,
    {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    fn present<P: PolygonSource + 'static>(&self, props: Props<P>, phase: Phase) -> Transition {
        let shared = &self.shared;
        let cached = props.poly.stats().contains(&props.ndi);
        let loaded = shared.is_loaded();

        if cached
            && phase == Phase::Update
            && !loaded
            && shared.policy == StalePolicy::LastWriteWins
        {
            log::debug!(
                "[{}] {} is cached but an earlier request is outstanding",
                shared.id,
                props.ndi
            );
            return Transition::Unchanged;
        }

        shared.state.borrow_mut().current = Some(PairRef::new(&props.poly, &props.ndi));

        if !cached {
            shared.set_loaded(false);
            return self.start_fetch(props);
        }

        if phase == Phase::Update && !loaded {
            log::debug!(
                "[{}] Showing cached {} ahead of the outstanding request",
                shared.id,
                props.ndi
            );
        }

        shared.set_loaded(true);
        shared.draw_cached(&*props.poly, &props.ndi);
        Transition::Drawn
    }

    fn start_fetch<P: PolygonSource + 'static>(&self, props: Props<P>) -> Transition {
        if self.shared.is_pending(&*props.poly, &props.ndi) {
            log::debug!(
                "[{}] {} summary already in flight for this polygon",
                self.shared.id,
                props.ndi
            );
            return Transition::Fetching;
        }

        let request = match self.shared.fetcher.request_for(
            &*props.poly,
            &props.ndi,
            &props.times,
            &props.layer_type,
        ) {
            Ok(request) => request,
            Err(e) => {
                log::warn!(
                    "[{}] Cannot request {} summary: {}",
                    self.shared.id,
                    props.ndi,
                    e
                );
                return Transition::Stalled;
            }
        };

        let token = {
            let mut state = self.shared.state.borrow_mut();
            state.next_token += 1;
            let token = state.next_token;
            state.pending.push(PendingRequest {
                token,
                pair: PairRef::new(&props.poly, &props.ndi),
            });
            token
        };
        log::debug!(
            "[{}] Fetching {} summary (request {})",
            self.shared.id,
            props.ndi,
            token
        );

        let shared = Rc::clone(&self.shared);
        spawn_local(async move {
            let result = shared.fetcher.fetch(&request).await;
            shared.complete(token, &*props.poly, &props.ndi, result);
        });

        Transition::Fetching
    }
}

impl<T, S> Shared<T, S>
where
    T: SummaryTransport,
    S: DrawSurface,
{
    fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    fn is_pending<P: PolygonSource + 'static>(&self, poly: &P, index: &IndexId) -> bool {
        self.state
            .borrow()
            .pending
            .iter()
            .any(|request| request.pair.matches(poly, index))
    }

    fn markup(&self) -> Markup {
        Markup::for_state(self.is_loaded(), &self.loading_text, &self.canvas)
    }

    fn set_loaded(&self, loaded: bool) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.loaded != loaded;
            state.loaded = loaded;
            changed
        };

        if changed {
            let markup = self.markup();
            for observer in self.observers.borrow().iter() {
                observer(&markup);
            }
        }
    }

    fn draw_cached<P: PolygonSource + ?Sized>(&self, poly: &P, index: &IndexId) {
        match poly.stats().get(index) {
            Some(value) => {
                let mut surface = self.surface.borrow_mut();
                self.renderer.render(&mut *surface, value, index);
            }
            None => log::warn!("[{}] No cached {} value to draw", self.id, index),
        }
    }

    fn complete<P: PolygonSource + 'static>(
        &self,
        token: u64,
        poly: &P,
        index: &IndexId,
        result: GaugeResult<f64>,
    ) {
        let (current, mounted) = {
            let mut state = self.state.borrow_mut();
            state.pending.retain(|request| request.token != token);
            let current = state
                .current
                .as_ref()
                .is_some_and(|pair| pair.matches(poly, index));
            (current, state.mounted)
        };

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "[{}] {} summary request failed, staying in loading state: {}",
                    self.id,
                    index,
                    e
                );
                return;
            }
        };

        poly.stats().set(index, value);

        if !mounted {
            log::debug!("[{}] Cached {} after unmount, not drawing", self.id, index);
            return;
        }

        if !current && self.policy == StalePolicy::Ignore {
            log::debug!(
                "[{}] Cached {} (request {}) for a pair no longer shown",
                self.id,
                index,
                token
            );
            return;
        }

        self.set_loaded(true);
        self.draw_cached(poly, index);
    }
}
