use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;

use logger::{Color, Logger};

use crate::extent_table::ExtentTable;
use crate::projection::{default_zoom_range, fit_zoom};
use crate::state::{Subscription, ViewState, ViewStateStore};
use crate::surface::MapSurface;
use crate::types::{City, CountryExtent, MapBounds, MapViewport, ScreenSize, CITY_ZOOM};

/// Whether the map is currently limited to a country.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    Unbounded,
    Bounded(CountryExtent),
}

impl ControllerState {
    pub fn extent(&self) -> Option<&CountryExtent> {
        match self {
            ControllerState::Unbounded => None,
            ControllerState::Bounded(extent) => Some(extent),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, ControllerState::Bounded(_))
    }
}

/// Computes the viewport the map should show for `state`.
///
/// When the state is bounded and its country is known, the viewport is
/// centered on the country and uses the most zoomed-in level of `zoom_range`
/// at which the country's bounding box is entirely visible on `screen`.
/// Otherwise `last_unconstrained` is returned unchanged.
pub fn compute_target_viewport(
    state: &ViewState,
    table: &ExtentTable,
    last_unconstrained: &MapViewport,
    screen: ScreenSize,
    zoom_range: &RangeInclusive<u8>,
) -> MapViewport {
    if !state.is_bounded {
        return *last_unconstrained;
    }

    match table.resolve_extent(&state.country_code) {
        Some(extent) => MapViewport::new(
            extent.center,
            fit_zoom(&extent.bounds, extent.center, screen, zoom_range),
        ),
        None => *last_unconstrained,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AppliedView {
    viewport: MapViewport,
    limit: Option<MapBounds>,
}

/// Translates the view state edited in the menu into viewport requests on a
/// [`MapSurface`].
///
/// Store notifications only record the latest state; the map view calls
/// [`BoundedViewController::apply_pending`] once per frame, so a burst of
/// edits between two frames results in a single update reflecting the last
/// one.
pub struct BoundedViewController {
    table: ExtentTable,
    state: ControllerState,
    current: ViewState,
    pending: Rc<RefCell<Option<ViewState>>>,
    subscription: Option<Subscription>,
    last_unconstrained: MapViewport,
    applied: Option<AppliedView>,
    screen: ScreenSize,
    zoom_range: RangeInclusive<u8>,
    logger: Option<Logger>,
}

impl BoundedViewController {
    /// Creates an unbounded controller. `initial` is the viewport restored
    /// when bounded mode is left before the user moved the map.
    pub fn new(table: ExtentTable, initial: MapViewport) -> Self {
        Self {
            table,
            state: ControllerState::Unbounded,
            current: ViewState::default(),
            pending: Rc::new(RefCell::new(None)),
            subscription: None,
            last_unconstrained: initial,
            applied: None,
            screen: ScreenSize::default(),
            zoom_range: default_zoom_range(),
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_zoom_range(mut self, zoom_range: RangeInclusive<u8>) -> Self {
        if !zoom_range.is_empty() {
            self.zoom_range = zoom_range;
        }
        self
    }

    pub fn with_screen_size(mut self, screen: ScreenSize) -> Self {
        self.screen = screen;
        self
    }

    /// Subscribes to `store`. The store's current state becomes pending so
    /// the first [`BoundedViewController::apply_pending`] applies it.
    pub fn attach(&mut self, store: &ViewStateStore) {
        self.detach();
        *self.pending.borrow_mut() = Some(store.state().clone());

        let pending = Rc::clone(&self.pending);
        self.subscription = Some(store.subscribe(move |state| {
            *pending.borrow_mut() = Some(state.clone());
        }));
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn table(&self) -> &ExtentTable {
        &self.table
    }

    pub fn resolve_extent(&self, code: &str) -> Option<&CountryExtent> {
        self.table.resolve_extent(code)
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    pub fn zoom_range(&self) -> &RangeInclusive<u8> {
        &self.zoom_range
    }

    pub fn last_unconstrained(&self) -> MapViewport {
        self.last_unconstrained
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Records where the user left the map. Ignored while bounded, so leaving
    /// bounded mode restores the view from before it was entered.
    pub fn observe_viewport(&mut self, viewport: MapViewport) {
        if !self.state.is_bounded() {
            self.last_unconstrained = viewport;
        }
    }

    /// Updates the map area size used for zoom fitting. While bounded, a new
    /// size schedules a recomputation of the target viewport.
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        if screen.width <= 0.0 || screen.height <= 0.0 || screen == self.screen {
            return;
        }
        self.screen = screen;

        if self.state.is_bounded() {
            let mut pending = self.pending.borrow_mut();
            if pending.is_none() {
                *pending = Some(self.current.clone());
            }
        }
    }

    /// Applies the most recent view state recorded since the last call.
    /// Returns whether there was anything to apply.
    pub fn apply_pending<M: MapSurface>(&mut self, map: &mut M) -> bool {
        let pending = self.pending.borrow_mut().take();
        match pending {
            Some(view_state) => {
                self.apply(&view_state, map);
                true
            }
            None => false,
        }
    }

    /// Moves the controller to the state implied by `view_state` and enforces
    /// the resulting viewport on `map`.
    pub fn apply<M: MapSurface>(&mut self, view_state: &ViewState, map: &mut M) {
        let next = self.next_state(view_state);
        if next != self.state {
            self.log_transition(&next);
        }
        self.state = next;
        self.current = view_state.clone();

        let target = self.target_viewport(view_state);
        self.enforce_bounds(map, target);
    }

    /// Viewport for `view_state` given this controller's table, screen size
    /// and last unconstrained viewport.
    pub fn target_viewport(&self, view_state: &ViewState) -> MapViewport {
        compute_target_viewport(
            view_state,
            &self.table,
            &self.last_unconstrained,
            self.screen,
            &self.zoom_range,
        )
    }

    /// Asks `map` to show `target` and, while bounded, limits panning to the
    /// active extent. Repeating the call with the same target and limit does
    /// not touch the map.
    pub fn enforce_bounds<M: MapSurface>(&mut self, map: &mut M, target: MapViewport) {
        let limit = self.state.extent().map(|extent| extent.bounds);
        let requested = AppliedView {
            viewport: target,
            limit,
        };
        if self.applied == Some(requested) {
            return;
        }

        map.set_view(target.center, target.zoom);

        let previous_limit = self.applied.and_then(|applied| applied.limit);
        if limit != previous_limit && map.supports_max_bounds() {
            match &limit {
                Some(bounds) => map.set_max_bounds(bounds),
                None => map.remove_max_bounds(),
            }
        }

        self.log_debug(&format!(
            "set_view center=({:.5}, {:.5}) zoom={} limited={}",
            target.center.lat,
            target.center.lon,
            target.zoom,
            limit.is_some()
        ));
        self.applied = Some(requested);
    }

    /// Centers the map on `city` at the city zoom level. While bounded, the
    /// center is clamped into the active extent.
    pub fn focus<M: MapSurface>(&mut self, city: &City, map: &mut M) -> MapViewport {
        let center = match &self.state {
            ControllerState::Bounded(extent) => extent.bounds.clamp(city.position),
            ControllerState::Unbounded => city.position,
        };
        let zoom = CITY_ZOOM.clamp(*self.zoom_range.start(), *self.zoom_range.end());
        let viewport = MapViewport::new(center, zoom);

        map.set_view(center, zoom);
        self.applied = Some(AppliedView {
            viewport,
            limit: self.applied.and_then(|applied| applied.limit),
        });
        if !self.state.is_bounded() {
            self.last_unconstrained = viewport;
        }

        self.log_info(&format!("Focused on {}", city.name), Color::Blue);
        viewport
    }

    fn next_state(&self, view_state: &ViewState) -> ControllerState {
        if !view_state.is_bounded {
            return ControllerState::Unbounded;
        }

        match self.table.try_resolve(&view_state.country_code) {
            Ok(extent) => ControllerState::Bounded(extent.clone()),
            Err(e) => {
                self.log_warn(&format!("{}, keeping the map unbounded", e));
                ControllerState::Unbounded
            }
        }
    }

    fn log_transition(&self, next: &ControllerState) {
        match next {
            ControllerState::Bounded(extent) => self.log_info(
                &format!("Bounded to {} ({})", extent.name, extent.country_code),
                Color::Green,
            ),
            ControllerState::Unbounded => self.log_info("Unbounded", Color::Cyan),
        }
    }

    fn log_info(&self, message: &str, color: Color) {
        if let Some(logger) = &self.logger {
            let _ = logger.info(message, color, true);
        }
    }

    fn log_warn(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.warn(message, true);
        }
    }

    fn log_debug(&self, message: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.debug(message);
        }
    }
}

impl Drop for BoundedViewController {
    fn drop(&mut self) {
        self.detach();
    }
}
