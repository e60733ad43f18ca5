//! Top-level orchestrator.
//!
//! [`App`] owns the frame scheduler and wires the scroll publisher, trigger
//! registry, section choreography, transition overlay, contact form, loading
//! sequence and cursor follower together. The host feeds it raw input and a
//! monotonic clock; it writes visual styles to the [`Stage`] and draws the
//! cursor on its [`CursorSurface`].
//!
//! Per frame the phase order is fixed by ticker registration order:
//! loading, then the scroll/trigger/timeline pipeline, then the cursor.
//! Trigger callbacks publish on the bus synchronously inside the pipeline
//! phase, so the overlay sees this frame's transitions before it advances.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::TransitionBus;
use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::cursor::CursorFollower;
use crate::geometry::Vec2;
use crate::loading::LoadingSequence;
use crate::overlay::TransitionOverlay;
use crate::scroll::{ScrollConfig, SmoothScroll};
use crate::sections::{self, Choreography};
use crate::stage::{CursorSurface, ElementId, Stage};
use crate::ticker::{Ticker, TickerHandle};
use crate::trigger::TriggerRegistry;

pub struct App {
    config: SiteConfig,
    stage: Rc<RefCell<dyn Stage>>,
    surface: Rc<RefCell<dyn CursorSurface>>,
    ticker: Ticker,
    handles: Vec<TickerHandle>,
    bus: Rc<TransitionBus>,
    scroll: Rc<RefCell<SmoothScroll>>,
    registry: Rc<RefCell<TriggerRegistry>>,
    choreography: Rc<RefCell<Choreography>>,
    overlay: Rc<RefCell<TransitionOverlay>>,
    contact: Rc<RefCell<ContactForm>>,
    loading: Option<Rc<RefCell<LoadingSequence>>>,
    cursor: Option<Rc<RefCell<CursorFollower>>>,
    torn_down: bool,
}

impl App {
    pub fn new(
        config: SiteConfig,
        stage: Rc<RefCell<dyn Stage>>,
        surface: Rc<RefCell<dyn CursorSurface>>,
    ) -> Self {
        let viewport = stage.borrow().viewport();

        let mut scroll_config = ScrollConfig::default();
        if !config.features.enable_smooth_scroll {
            // Native mode: the offset tracks input directly, with no glide
            // and no input scaling.
            scroll_config.duration_secs = 0.0;
            scroll_config.wheel_multiplier = 1.0;
            scroll_config.touch_multiplier = 1.0;
        }
        let limit = content_limit(&*stage.borrow(), &config);
        let scroll = Rc::new(RefCell::new(SmoothScroll::new(scroll_config, limit)));

        let bus = Rc::new(TransitionBus::new());
        let registry = Rc::new(RefCell::new(TriggerRegistry::new()));
        let choreography = Rc::new(RefCell::new(sections::install(
            &mut registry.borrow_mut(),
            &config,
        )));
        let overlay = Rc::new(RefCell::new(TransitionOverlay::new(bus.clone())));
        let contact = Rc::new(RefCell::new(ContactForm::new()));

        let loading = config
            .features
            .show_loading_screen
            .then(|| Rc::new(RefCell::new(LoadingSequence::new(viewport.y))));
        let cursor = config
            .features
            .show_cursor
            .then(|| Rc::new(RefCell::new(CursorFollower::new(config.cursor))));

        let mut app = Self {
            config,
            stage,
            surface,
            ticker: Ticker::new(),
            handles: Vec::new(),
            bus,
            scroll,
            registry,
            choreography,
            overlay,
            contact,
            loading,
            cursor,
            torn_down: false,
        };
        app.register_frame_callbacks();

        if app.loading.is_none() {
            // No loading screen: the page is live immediately.
            app.scroll.borrow_mut().start();
            app.choreography.borrow_mut().release();
        }
        app
    }

    fn register_frame_callbacks(&mut self) {
        // Phase 1: loading sequence. Releases the rest of the page exactly
        // once when it completes.
        if let Some(loading) = &self.loading {
            let loading = loading.clone();
            let stage = self.stage.clone();
            let scroll = self.scroll.clone();
            let registry = self.registry.clone();
            let choreography = self.choreography.clone();
            self.handles.push(self.ticker.register(move |tick| {
                let mut loading = loading.borrow_mut();
                if loading.is_done() {
                    return;
                }
                loading.advance(tick.dt, &mut *stage.borrow_mut());
                if loading.is_done() {
                    let mut scroll = scroll.borrow_mut();
                    scroll.start();
                    // The page shifts when the loading panel leaves; rebind
                    // trigger geometry before anything fires.
                    registry
                        .borrow_mut()
                        .refresh(&*stage.borrow(), scroll.state().smoothed);
                    choreography.borrow_mut().release();
                }
            }));
        }

        // Phase 2: scroll → triggers (bus publishes happen inside) →
        // timelines → overlay → contact.
        let scroll = self.scroll.clone();
        let registry = self.registry.clone();
        let stage = self.stage.clone();
        let bus = self.bus.clone();
        let choreography = self.choreography.clone();
        let overlay = self.overlay.clone();
        let contact = self.contact.clone();
        self.handles.push(self.ticker.register(move |tick| {
            scroll.borrow_mut().on_frame(tick);
            let state = *scroll.borrow().state();
            let stage = &mut *stage.borrow_mut();
            registry.borrow_mut().update(&state, stage, &bus);
            let mut choreography = choreography.borrow_mut();
            choreography.set_scroll_velocity(state.velocity);
            choreography.advance(tick.dt, stage);
            overlay.borrow_mut().advance(tick.dt, stage);
            contact.borrow_mut().tick(tick.dt);
        }));

        // Phase 3: cursor follower, mounted once loading is over.
        if let Some(cursor) = &self.cursor {
            let cursor = cursor.clone();
            let loading = self.loading.clone();
            let stage = self.stage.clone();
            let surface = self.surface.clone();
            self.handles.push(self.ticker.register(move |_tick| {
                if let Some(loading) = &loading {
                    if !loading.borrow().is_done() {
                        return;
                    }
                }
                cursor
                    .borrow_mut()
                    .advance(&*stage.borrow(), &mut *surface.borrow_mut());
            }));
        }
    }

    /// Run one frame. `now` is the host clock in seconds.
    pub fn frame(&mut self, now: f64) {
        if self.torn_down {
            return;
        }
        self.ticker.tick(now);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(cursor) = &self.cursor {
            cursor.borrow_mut().pointer_moved(position);
        }
    }

    /// The host resolved which interactive element the pointer is over.
    pub fn hover_changed(&mut self, target: Option<ElementId>) {
        if let Some(cursor) = &self.cursor {
            cursor.borrow_mut().set_hover_target(target);
        }
    }

    /// Pointer entered or left a works card; drives its tilt and warp.
    pub fn card_hover_changed(&mut self, index: usize, hovered: bool) {
        self.choreography.borrow_mut().set_card_hover(index, hovered);
    }

    /// Warp uniform for a card's distortion canvas, for hosts that render
    /// one. `None` when the warp canvas is disabled or the index is unknown.
    pub fn card_warp(&self, index: usize) -> Option<f32> {
        self.choreography.borrow().card_warp(index)
    }

    pub fn wheel(&mut self, delta: f32) {
        self.scroll.borrow_mut().handle_wheel(delta);
    }

    pub fn touch(&mut self, delta: f32) {
        self.scroll.borrow_mut().handle_touch(delta);
    }

    /// Layout changed: recompute the scroll extent, rebind trigger geometry
    /// and resize the cursor surface. The host updates the stage's regions
    /// and viewport before calling this.
    pub fn resize(&mut self) {
        let stage = self.stage.borrow();
        let viewport = stage.viewport();
        log::debug!("app: resize to {}x{}", viewport.x, viewport.y);
        let mut scroll = self.scroll.borrow_mut();
        scroll.set_limit(content_limit(&*stage, &self.config));
        self.registry
            .borrow_mut()
            .refresh(&*stage, scroll.state().smoothed);
        if let Some(cursor) = &self.cursor {
            cursor
                .borrow()
                .resize(&mut *self.surface.borrow_mut(), viewport);
        }
    }

    /// Glide to a navigation section's top. Unknown ids are a no-op.
    pub fn scroll_to_section(&mut self, id: &str) {
        let region = self.stage.borrow().region(&id.into());
        match region {
            Some(region) => {
                log::debug!("app: scrolling to section {id}");
                let mut scroll = self.scroll.borrow_mut();
                if self.config.features.enable_smooth_scroll {
                    scroll.scroll_to(region.top());
                } else {
                    scroll.jump_to(region.top());
                }
            }
            None => log::warn!("app: unknown section {id:?}"),
        }
    }

    pub fn scroll_state(&self) -> crate::scroll::ScrollState {
        *self.scroll.borrow().state()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn bus(&self) -> Rc<TransitionBus> {
        self.bus.clone()
    }

    pub fn contact(&self) -> Rc<RefCell<ContactForm>> {
        self.contact.clone()
    }

    pub fn loading_counter(&self) -> Option<u8> {
        self.loading.as_ref().map(|l| l.borrow().counter())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
            .as_ref()
            .map(|l| !l.borrow().is_done())
            .unwrap_or(false)
    }

    /// Stop everything: frame callbacks, bus subscriptions, triggers,
    /// timelines. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        log::info!("app: teardown");
        self.torn_down = true;
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
        let stage = &mut *self.stage.borrow_mut();
        self.overlay.borrow_mut().teardown(stage);
        self.choreography
            .borrow_mut()
            .teardown(&mut self.registry.borrow_mut(), stage);
        self.scroll.borrow_mut().stop();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Scrollable extent: the deepest navigation section bottom minus one
/// viewport. Sections without a mounted region are skipped.
fn content_limit(stage: &dyn Stage, config: &SiteConfig) -> f32 {
    let viewport = stage.viewport();
    let deepest = config
        .navigation
        .sections
        .iter()
        .filter_map(|section| stage.region(&section.id.as_str().into()))
        .map(|region| region.bottom())
        .fold(0.0, f32::max);
    (deepest - viewport.y).max(0.0)
}
