//! Per-section choreography.
//!
//! Builds the timelines and viewport triggers each section of the site uses,
//! wired from [`SiteConfig`] content: the hero bento explosion and its scroll
//! tilt, the works cards with parallax and hover warp, the philosophy and
//! skills entrances with their floating loops, the contact capsule, and the
//! bus-published `shatter`/`lightspeed` section transitions.
//!
//! Element id conventions follow the section markup: a section's region id is
//! its navigation id (`"hero"`, `"works"`, ...), members are suffixed with
//! their index (`"work-card-0"`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{
    Easing, Smoothed, Stagger, StaggerOrigin, Step, StepPosition, TargetStyles, Timeline,
};
use crate::bus::{TransitionEvent, TransitionKind};
use crate::config::SiteConfig;
use crate::stage::{ElementId, Stage, VisualStyle};
use crate::trigger::{
    RegionEdge, ThresholdSpec, ToggleActions, TriggerBuilder, TriggerId, TriggerRegistry,
};

pub const HERO_ID: &str = "hero";
pub const HERO_GRID_ID: &str = "hero-bento";
pub const WORKS_ID: &str = "works";
pub const PHILOSOPHY_ID: &str = "philosophy";
pub const SKILLS_ID: &str = "skills";
pub const CONTACT_ID: &str = "contact";

pub const HERO_TILE_COUNT: usize = 8;

pub fn hero_tile_id(index: usize) -> ElementId {
    ElementId::new(format!("hero-tile-{index}"))
}

pub fn hero_content_id(index: usize) -> ElementId {
    ElementId::new(format!("hero-tile-content-{index}"))
}

pub fn work_card_id(index: usize) -> ElementId {
    ElementId::new(format!("work-card-{index}"))
}

pub fn philosophy_node_id(index: usize) -> ElementId {
    ElementId::new(format!("philosophy-node-{index}"))
}

pub fn skill_cube_id(index: usize) -> ElementId {
    ElementId::new(format!("skill-cube-{index}"))
}

/// Every timeline and trigger the section wiring owns, so the app can drive
/// and tear it down as a unit.
pub struct Choreography {
    /// Played once the loading sequence releases the page.
    hero_entrance: Rc<RefCell<Timeline>>,
    /// Endless floating loops, started together with the hero entrance.
    loops: Vec<Rc<RefCell<Timeline>>>,
    /// Trigger-gated timelines; the registry toggles them, the app advances
    /// them.
    gated: Vec<Rc<RefCell<Timeline>>>,
    /// One hover tilt per works card, empty when the warp canvas is
    /// disabled.
    tilts: Vec<CardTilt>,
    triggers: Vec<TriggerId>,
    released: bool,
}

impl Choreography {
    /// Whether the post-loading choreography has been released yet.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Start the hero entrance and the floating loops. Called once when the
    /// loading screen finishes (or immediately when it is disabled).
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        log::info!("sections: releasing entrance choreography");
        self.released = true;
        self.hero_entrance.borrow_mut().play();
        for tl in &self.loops {
            tl.borrow_mut().play();
        }
    }

    /// Step every owned timeline and hover tilt.
    pub fn advance(&mut self, dt: f32, stage: &mut dyn Stage) {
        self.hero_entrance.borrow_mut().advance(dt, stage);
        for tl in self.loops.iter().chain(self.gated.iter()) {
            tl.borrow_mut().advance(dt, stage);
        }
        for tilt in &mut self.tilts {
            tilt.advance(stage);
        }
    }

    /// Pointer entered or left a works card. Out-of-range indices are a
    /// no-op (the host may know about cards this config does not).
    pub fn set_card_hover(&mut self, index: usize, hovered: bool) {
        if let Some(tilt) = self.tilts.get_mut(index) {
            tilt.set_hovered(hovered);
        }
    }

    /// Feed the current scroll velocity into every card's warp.
    pub fn set_scroll_velocity(&mut self, velocity: f32) {
        for tilt in &mut self.tilts {
            tilt.set_scroll_velocity(velocity);
        }
    }

    /// Warp uniform for a card's distortion canvas.
    pub fn card_warp(&self, index: usize) -> Option<f32> {
        self.tilts.get(index).map(CardTilt::warp)
    }

    /// Remove every trigger and snap every timeline back to rest.
    pub fn teardown(&mut self, registry: &mut TriggerRegistry, stage: &mut dyn Stage) {
        for id in self.triggers.drain(..) {
            registry.remove(id);
        }
        self.hero_entrance.borrow_mut().cancel(stage);
        for tl in self.loops.drain(..).chain(self.gated.drain(..)) {
            tl.borrow_mut().cancel(stage);
        }
        self.tilts.clear();
        self.released = false;
    }
}

/// Wire every section's timelines and triggers.
pub fn install(registry: &mut TriggerRegistry, config: &SiteConfig) -> Choreography {
    let tilts = if config.features.enable_warp_canvas {
        config
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| CardTilt::new(work_card_id(i), project.warp_intensity))
            .collect()
    } else {
        Vec::new()
    };
    let mut choreo = Choreography {
        hero_entrance: Rc::new(RefCell::new(hero_entrance_timeline(config))),
        loops: Vec::new(),
        gated: Vec::new(),
        tilts,
        triggers: Vec::new(),
        released: false,
    };
    install_hero_triggers(registry, config, &mut choreo);
    install_works(registry, config, &mut choreo);
    install_philosophy(registry, config, &mut choreo);
    install_skills(registry, config, &mut choreo);
    install_contact(registry, config, &mut choreo);
    install_section_transitions(registry, &mut choreo);
    log::debug!(
        "sections: installed {} triggers, {} gated timelines",
        choreo.triggers.len(),
        choreo.gated.len(),
    );
    choreo
}

/// Bento tiles pop from a centered origin, then tile content rises and
/// de-blurs, overlapping the tail of the explosion.
fn hero_entrance_timeline(config: &SiteConfig) -> Timeline {
    let tiles = (0..HERO_TILE_COUNT)
        .map(|i| {
            // Left column tiles converge from the left, right from the
            // right; the top half falls in, the bottom half rises.
            let dx = if i % 2 == 0 { -100.0 } else { 100.0 };
            let dy = if i < HERO_TILE_COUNT / 2 { -50.0 } else { 50.0 };
            TargetStyles {
                id: hero_tile_id(i),
                from: VisualStyle::default()
                    .with_scale(0.2)
                    .with_opacity(0.0)
                    .with_translate(dx, dy),
                to: VisualStyle::default(),
            }
        })
        .collect();
    let content_from = VisualStyle::default()
        .with_translate(0.0, 30.0)
        .with_opacity(0.0)
        .with_blur(10.0);
    Timeline::new()
        .delay(0.2)
        .step(
            Step::per_target(tiles)
                .duration(1.2)
                .easing(Easing::ElasticOut {
                    amplitude: 1.0,
                    period: 0.7,
                })
                .stagger(Stagger::amount(0.5).from(StaggerOrigin::Center)),
        )
        .step(
            Step::uniform(
                (0..HERO_TILE_COUNT).map(hero_content_id),
                content_from,
                VisualStyle::default(),
            )
            .duration(0.8)
            .easing(Easing::PowerOut(4))
            .stagger(Stagger::each(config.animation.stagger.default))
            .position(StepPosition::RelativeToPrevious(-0.6)),
        )
}

fn install_hero_triggers(
    registry: &mut TriggerRegistry,
    config: &SiteConfig,
    choreo: &mut Choreography,
) {
    let scrub = config.animation.scroll.scrub;

    // 3D tilt while the hero scrolls out: tiles fold back and recede.
    choreo.triggers.push(registry.register(
        TriggerBuilder::new(HERO_ID, ThresholdSpec::new(RegionEdge::Top, 0.0))
            .end(ThresholdSpec::new(RegionEdge::Bottom, 0.0))
            .scrub(scrub, |progress, stage| {
                let style = VisualStyle::default()
                    .with_rotate_x(progress * 15.0)
                    .with_depth(-progress * 200.0)
                    .with_opacity(1.0 - progress * 0.8);
                for i in 0..HERO_TILE_COUNT {
                    stage.apply(&hero_tile_id(i), &style);
                }
            }),
    ));

    // Spatial collapse of the whole grid over the last viewport of hero.
    choreo.triggers.push(registry.register(
        TriggerBuilder::new(HERO_ID, ThresholdSpec::new(RegionEdge::Bottom, 1.0))
            .end(ThresholdSpec::new(RegionEdge::Bottom, 0.0))
            .scrub(1.0, |progress, stage| {
                let style = VisualStyle::default()
                    .with_scale(1.0 - progress * 0.5)
                    .with_opacity(1.0 - progress)
                    .with_depth(-progress * 500.0);
                stage.apply(&HERO_GRID_ID.into(), &style);
            }),
    ));
}

/// A header rise-in gated behind `top 80%` with play/reverse toggling; the
/// pattern every section header uses.
fn header_rise(
    registry: &mut TriggerRegistry,
    choreo: &mut Choreography,
    header_id: &str,
    duration: f32,
) {
    let timeline = Rc::new(RefCell::new(
        Timeline::new().step(
            Step::uniform(
                [header_id],
                VisualStyle::default().with_translate(0.0, 50.0).with_opacity(0.0),
                VisualStyle::default(),
            )
            .duration(duration)
            .easing(Easing::PowerOut(4)),
        ),
    ));
    choreo.triggers.push(registry.register(
        TriggerBuilder::new(header_id, ThresholdSpec::new(RegionEdge::Top, 0.8))
            .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
    ));
    choreo.gated.push(timeline);
}

fn install_works(registry: &mut TriggerRegistry, config: &SiteConfig, choreo: &mut Choreography) {
    header_rise(registry, choreo, "works-header", 0.8);

    let scrub = config.animation.scroll.scrub;
    for (i, project) in config.projects.iter().enumerate() {
        let card = work_card_id(i);
        log::debug!("sections: wiring card {} ({})", i, project.title);

        // Staggered entrance: each card rises, un-tilts and scales up once
        // its own top clears 85% of the viewport.
        let timeline = Rc::new(RefCell::new(
            Timeline::new().delay(i as f32 * 0.15).step(
                Step::uniform(
                    [card.clone()],
                    VisualStyle::default()
                        .with_translate(0.0, 100.0)
                        .with_opacity(0.0)
                        .with_rotate_x(15.0)
                        .with_scale(0.9),
                    VisualStyle::default(),
                )
                .duration(1.0)
                .easing(Easing::PowerOut(4)),
            ),
        ));
        choreo.triggers.push(registry.register(
            TriggerBuilder::new(card.clone(), ThresholdSpec::new(RegionEdge::Top, 0.85))
                .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
        ));
        choreo.gated.push(timeline);

        // Parallax drift across the card's whole time on screen, direction
        // alternating per card.
        let parallax_card = card.clone();
        let drift = -30.0 * if i % 2 == 0 { 1.0 } else { -1.0 };
        choreo.triggers.push(registry.register(
            TriggerBuilder::new(card, ThresholdSpec::new(RegionEdge::Top, 1.0))
                .end(ThresholdSpec::new(RegionEdge::Bottom, 0.0))
                .scrub(scrub, move |progress, stage| {
                    let style = VisualStyle::default().with_translate(0.0, drift * progress);
                    stage.apply(&parallax_card, &style);
                }),
        ));
    }
}

fn install_philosophy(
    registry: &mut TriggerRegistry,
    config: &SiteConfig,
    choreo: &mut Choreography,
) {
    header_rise(registry, choreo, "philosophy-header", 0.8);

    for i in 0..config.philosophy.len() {
        let node = philosophy_node_id(i);

        let timeline = Rc::new(RefCell::new(
            Timeline::new().delay(i as f32 * 0.1).step(
                Step::uniform(
                    [node.clone()],
                    VisualStyle::default()
                        .with_scale(0.0)
                        .with_opacity(0.0)
                        .with_rotate_y(-90.0),
                    VisualStyle::default(),
                )
                .duration(1.0)
                .easing(Easing::PowerOut(4)),
            ),
        ));
        choreo.triggers.push(registry.register(
            TriggerBuilder::new(node.clone(), ThresholdSpec::new(RegionEdge::Top, 0.85))
                .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
        ));
        choreo.gated.push(timeline);

        // Gentle endless float, period offset per node so they desync.
        choreo.loops.push(Rc::new(RefCell::new(
            Timeline::new().step(
                Step::uniform(
                    [node],
                    VisualStyle::default(),
                    VisualStyle::default().with_translate(0.0, 15.0),
                )
                .duration(2.0 + i as f32 * 0.3)
                .easing(Easing::SineInOut)
                .yoyo(),
            ),
        )));
    }
}

fn install_skills(registry: &mut TriggerRegistry, config: &SiteConfig, choreo: &mut Choreography) {
    header_rise(registry, choreo, "skills-header", 0.8);

    for i in 0..config.skills.tools.len() {
        let cube = skill_cube_id(i);

        // Light-speed entrance: cubes race in from deep z.
        let timeline = Rc::new(RefCell::new(
            Timeline::new().delay(i as f32 * 0.1).step(
                Step::uniform(
                    [cube.clone()],
                    VisualStyle::default()
                        .with_depth(-500.0)
                        .with_opacity(0.0)
                        .with_rotate_x(45.0)
                        .with_rotate_y(-45.0),
                    VisualStyle::default(),
                )
                .duration(1.2)
                .easing(Easing::PowerOut(4)),
            ),
        ));
        choreo.triggers.push(registry.register(
            TriggerBuilder::new(cube.clone(), ThresholdSpec::new(RegionEdge::Top, 0.9))
                .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
        ));
        choreo.gated.push(timeline);

        // Subtle bob.
        choreo.loops.push(Rc::new(RefCell::new(
            Timeline::new().step(
                Step::uniform(
                    [cube],
                    VisualStyle::default(),
                    VisualStyle::default().with_translate(0.0, 8.0),
                )
                .duration(2.0 + i as f32 * 0.2)
                .easing(Easing::SineInOut)
                .yoyo(),
            ),
        )));
    }
}

fn install_contact(registry: &mut TriggerRegistry, _config: &SiteConfig, choreo: &mut Choreography) {
    // Capsule deep-dive entrance.
    let timeline = Rc::new(RefCell::new(
        Timeline::new().step(
            Step::uniform(
                ["contact-capsule"],
                VisualStyle::default()
                    .with_scale(0.8)
                    .with_opacity(0.0)
                    .with_rotate_x(15.0),
                VisualStyle::default(),
            )
            .duration(1.0)
            .easing(Easing::PowerOut(4)),
        ),
    ));
    choreo.triggers.push(registry.register(
        TriggerBuilder::new("contact-capsule", ThresholdSpec::new(RegionEdge::Top, 0.8))
            .timeline(timeline.clone(), ToggleActions::PLAY_REVERSE),
    ));
    choreo.gated.push(timeline);
}

/// Section handoff effects, published on the bus when the outgoing section's
/// bottom edge crosses 20% of the viewport, in either direction.
fn install_section_transitions(registry: &mut TriggerRegistry, choreo: &mut Choreography) {
    for (section, kind) in [
        (WORKS_ID, TransitionKind::Shatter),
        (PHILOSOPHY_ID, TransitionKind::Lightspeed),
    ] {
        let enter_kind = kind.clone();
        let back_kind = kind;
        choreo.triggers.push(registry.register(
            TriggerBuilder::new(section, ThresholdSpec::new(RegionEdge::Bottom, 0.2))
                .on_enter(move |ctx| {
                    ctx.bus.publish(&TransitionEvent::new(enter_kind.clone()));
                })
                .on_enter_back(move |ctx| {
                    ctx.bus.publish(&TransitionEvent::new(back_kind.clone()));
                }),
        ));
    }
}

/// Hover tilt state for a works card: velocity-driven warp plus a smoothed
/// scale and Y rotation, all easing at the same lazy factor.
pub struct CardTilt {
    card: ElementId,
    warp_intensity: f32,
    velocity: Smoothed<f32>,
    scale: Smoothed<f32>,
    rotate_y: Smoothed<f32>,
    hovered: bool,
}

impl CardTilt {
    const FACTOR: f32 = 0.1;

    pub fn new(card: ElementId, warp_intensity: f32) -> Self {
        Self {
            card,
            warp_intensity,
            velocity: Smoothed::new(0.0, Self::FACTOR),
            scale: Smoothed::new(1.0, Self::FACTOR),
            rotate_y: Smoothed::new(0.0, Self::FACTOR),
            hovered: false,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.scale.set_target(if hovered { 1.1 } else { 1.0 });
        self.rotate_y.set_target(if hovered { 3.0 } else { 0.0 });
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Feed the current scroll velocity; it drives the warp strength.
    pub fn set_scroll_velocity(&mut self, velocity: f32) {
        self.velocity.set_target(velocity * self.warp_intensity);
    }

    /// Smoothed warp amount for the card's distortion shader.
    pub fn warp(&self) -> f32 {
        *self.velocity.current()
    }

    pub fn advance(&mut self, stage: &mut dyn Stage) {
        self.velocity.advance();
        let scale = *self.scale.advance();
        let rotate_y = *self.rotate_y.advance();
        // Write only while the tilt is visibly in motion, so an idle card's
        // style stays whatever its entrance or parallax last wrote.
        if self.hovered || (scale - 1.0).abs() > 1e-4 || rotate_y.abs() > 1e-4 {
            let style = VisualStyle::default().with_scale(scale).with_rotate_y(rotate_y);
            stage.apply(&self.card, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::TransitionBus;
    use crate::geometry::{Rect, Vec2};
    use crate::scroll::{ScrollDirection, ScrollState};
    use crate::stage::MemoryStage;

    fn scroll_at(offset: f32) -> ScrollState {
        ScrollState {
            raw: offset,
            smoothed: offset,
            velocity: 0.0,
            direction: ScrollDirection::Down,
        }
    }

    fn page_stage() -> MemoryStage {
        // A page laid out as five viewport-tall sections.
        let mut stage = MemoryStage::new(Vec2::new(1440.0, 1000.0));
        for (i, id) in [HERO_ID, WORKS_ID, PHILOSOPHY_ID, SKILLS_ID, CONTACT_ID]
            .iter()
            .enumerate()
        {
            let top = i as f32 * 1000.0;
            stage.insert_region(*id, Rect::new(0.0, top, 1440.0, 1000.0));
        }
        stage.insert_region("works-header", Rect::new(0.0, 1050.0, 1440.0, 100.0));
        for i in 0..4 {
            stage.insert_region(
                work_card_id(i).as_str(),
                Rect::new(0.0, 1200.0 + i as f32 * 180.0, 700.0, 160.0),
            );
        }
        stage
    }

    #[test]
    fn test_hero_entrance_reaches_rest() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        let mut stage = page_stage();

        choreo.release();
        for _ in 0..240 {
            choreo.advance(1.0 / 60.0, &mut stage);
        }
        for i in 0..HERO_TILE_COUNT {
            let style = stage.style(&hero_tile_id(i)).unwrap();
            assert!((style.scale - 1.0).abs() < 1e-3, "tile {i}: {style:?}");
            assert!((style.opacity - 1.0).abs() < 1e-3);
            assert!(style.translate.x.abs() < 1e-2);
        }
        let content = stage.style(&hero_content_id(0)).unwrap();
        assert_eq!(content.blur, 0.0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        choreo.release();
        choreo.release();
        assert!(choreo.is_released());
    }

    #[test]
    fn test_works_header_plays_and_reverses() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        let mut stage = page_stage();
        let bus = TransitionBus::new();

        // Header top is 1050; "top 80%" crosses at 1050 - 800 = 250.
        registry.update(&scroll_at(300.0), &mut stage, &bus);
        for _ in 0..120 {
            choreo.advance(1.0 / 60.0, &mut stage);
        }
        let style = stage.style(&"works-header".into()).unwrap();
        assert!((style.opacity - 1.0).abs() < 1e-3);

        // Scrolling back above the threshold reverses the rise.
        registry.update(&scroll_at(100.0), &mut stage, &bus);
        for _ in 0..120 {
            choreo.advance(1.0 / 60.0, &mut stage);
        }
        let style = stage.style(&"works-header".into()).unwrap();
        assert!(style.opacity.abs() < 1e-3);
    }

    #[test]
    fn test_card_parallax_alternates_direction() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        let mut stage = page_stage();
        let bus = TransitionBus::new();

        // Deep enough that every card's parallax span has some progress,
        // repeated so the scrub smoothing settles. Entrance timelines are
        // not advanced, so the parallax write is the last style applied.
        for _ in 0..200 {
            registry.update(&scroll_at(1600.0), &mut stage, &bus);
        }
        let even = stage.style(&work_card_id(0)).unwrap().translate.y;
        let odd = stage.style(&work_card_id(1)).unwrap().translate.y;
        assert!(even < 0.0, "even cards drift up: {even}");
        assert!(odd > 0.0, "odd cards drift down: {odd}");
        let _ = &mut choreo;
    }

    #[test]
    fn test_shatter_published_on_enter_and_enter_back() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let _choreo = install(&mut registry, &config);
        let mut stage = page_stage();
        let bus = TransitionBus::new();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        bus.subscribe(move |event| sink.borrow_mut().push(event.kind.clone()));

        // Works bottom is 2000; "bottom 20%" crosses at 2000 - 200 = 1800.
        registry.update(&scroll_at(0.0), &mut stage, &bus);
        registry.update(&scroll_at(1850.0), &mut stage, &bus);
        assert_eq!(events.borrow().as_slice(), &[TransitionKind::Shatter]);

        // Far past the end, then back inside: enter-back fires again.
        registry.update(&scroll_at(4000.0), &mut stage, &bus);
        events.borrow_mut().clear();
        registry.update(&scroll_at(1850.0), &mut stage, &bus);
        assert!(events.borrow().contains(&TransitionKind::Shatter));
    }

    #[test]
    fn test_teardown_removes_triggers_and_rests_styles() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        let mut stage = page_stage();

        assert!(!registry.is_empty());
        choreo.release();
        choreo.advance(1.0, &mut stage);
        choreo.teardown(&mut registry, &mut stage);
        assert!(registry.is_empty());
        assert!(!choreo.is_released());

        // Hero tiles are back at their pre-entrance rest state.
        let style = stage.style(&hero_tile_id(0)).unwrap();
        assert_eq!(style.opacity, 0.0);
        assert!((style.scale - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_install_wires_default_content() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let choreo = install(&mut registry, &config);

        // hero tilt + collapse, three headers, one entrance per card, node
        // and cube plus one parallax per card, contact capsule, two section
        // transitions.
        let expected = 2
            + 3
            + 2 * config.projects.len()
            + config.philosophy.len()
            + config.skills.tools.len()
            + 1
            + 2;
        assert_eq!(registry.len(), expected);
        assert_eq!(choreo.tilts.len(), config.projects.len());
        assert_eq!(choreo.loops.len(), config.philosophy.len() + config.skills.tools.len());
    }

    #[test]
    fn test_warp_canvas_flag_disables_tilts() {
        let mut registry = TriggerRegistry::new();
        let mut config = SiteConfig::default();
        config.features.enable_warp_canvas = false;
        let mut choreo = install(&mut registry, &config);
        assert!(choreo.tilts.is_empty());
        // Hover requests become no-ops rather than panics.
        choreo.set_card_hover(0, true);
        assert_eq!(choreo.card_warp(0), None);
    }

    #[test]
    fn test_choreography_drives_card_hover() {
        let mut registry = TriggerRegistry::new();
        let config = SiteConfig::default();
        let mut choreo = install(&mut registry, &config);
        let mut stage = page_stage();

        choreo.set_card_hover(1, true);
        for _ in 0..200 {
            choreo.advance(1.0 / 60.0, &mut stage);
        }
        let style = stage.style(&work_card_id(1)).unwrap();
        assert!((style.scale - 1.1).abs() < 1e-3);
        assert!((style.rotate_y - 3.0).abs() < 1e-2);

        // Scroll velocity feeds each card's warp scaled by its intensity.
        choreo.set_scroll_velocity(10.0);
        for _ in 0..300 {
            choreo.advance(1.0 / 60.0, &mut stage);
        }
        let intensity = config.projects[1].warp_intensity;
        assert!((choreo.card_warp(1).unwrap() - 10.0 * intensity).abs() < 0.1);
    }

    #[test]
    fn test_card_tilt_smooths_toward_hover() {
        let mut stage = page_stage();
        let mut tilt = CardTilt::new(work_card_id(0), 0.8);

        tilt.set_hovered(true);
        tilt.advance(&mut stage);
        let first = stage.style(&work_card_id(0)).unwrap().scale;
        assert!(first > 1.0 && first < 1.1);

        for _ in 0..200 {
            tilt.advance(&mut stage);
        }
        let settled = stage.style(&work_card_id(0)).unwrap();
        assert!((settled.scale - 1.1).abs() < 1e-3);
        assert!((settled.rotate_y - 3.0).abs() < 1e-2);

        tilt.set_hovered(false);
        for _ in 0..200 {
            tilt.advance(&mut stage);
        }
        assert!((stage.style(&work_card_id(0)).unwrap().scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_card_tilt_warp_follows_scroll_velocity() {
        let mut tilt = CardTilt::new(work_card_id(0), 0.5);
        tilt.set_scroll_velocity(20.0);
        let mut stage = page_stage();
        for _ in 0..300 {
            tilt.advance(&mut stage);
        }
        assert!((tilt.warp() - 10.0).abs() < 0.1); // velocity * intensity
    }
}
