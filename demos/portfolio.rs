//! Headless walkthrough of the portfolio choreography: runs the loading
//! sequence, scrolls through every section and submits the contact form,
//! printing what the stage sees along the way.
//!
//! Run with `RUST_LOG=debug cargo run --example portfolio` for the full
//! trigger/timeline trace.

use std::cell::RefCell;
use std::rc::Rc;

use choreo::prelude::*;
use choreo::sections;

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let config = SiteConfig::default();
    let stage = Rc::new(RefCell::new(page_stage(&config)));
    let surface = Rc::new(RefCell::new(MemorySurface::new(Vec2::new(1440.0, 1000.0))));
    let mut app = App::new(config, stage.clone(), surface.clone());

    let mut now = 0.0;
    let mut run = |app: &mut App, secs: f64| {
        let frames = (secs / FRAME).round() as u64;
        for _ in 0..frames {
            now += FRAME;
            app.frame(now);
        }
    };

    println!("== loading ==");
    while app.is_loading() {
        run(&mut app, 0.25);
        if let Some(counter) = app.loading_counter() {
            println!("  counter at {counter}%");
        }
    }

    run(&mut app, 2.0);
    let tile = *stage
        .borrow()
        .style(&sections::hero_tile_id(0))
        .expect("hero tile styled");
    println!("== hero entrance done, tile 0: {tile:?}");

    println!("== scrolling through the page ==");
    app.pointer_moved(Vec2::new(720.0, 400.0));
    for section in [
        sections::WORKS_ID,
        sections::PHILOSOPHY_ID,
        sections::SKILLS_ID,
        sections::CONTACT_ID,
    ] {
        app.scroll_to_section(section);
        run(&mut app, 2.0);
        println!("  {} at offset {:.0}", section, app.scroll_state().smoothed);
    }
    println!(
        "  cursor drew {} commands last frame",
        surface.borrow().frame_commands().len()
    );

    println!("== card hover ==");
    app.card_hover_changed(0, true);
    run(&mut app, 1.0);
    println!(
        "  card 0 warp uniform: {:.3}",
        app.card_warp(0).unwrap_or(0.0)
    );
    app.card_hover_changed(0, false);

    println!("== contact form ==");
    let contact = app.contact();
    {
        let mut form = contact.borrow_mut();
        form.set_name("Ada");
        form.set_email("ada@example.com");
        form.set_message("Let's build something.");
        form.submit().expect("valid form");
    }
    run(&mut app, 2.0);
    println!("  state after submit: {:?}", contact.borrow().state());

    app.teardown();
    println!("done");
}

/// Lay the five sections out as full-viewport rows with the hero bento
/// tiles, work cards, philosophy nodes and skill cubes the choreography
/// expects.
fn page_stage(config: &SiteConfig) -> MemoryStage {
    let viewport = Vec2::new(1440.0, 1000.0);
    let mut stage = MemoryStage::new(viewport);

    for (i, section) in config.navigation.sections.iter().enumerate() {
        stage.insert_region(
            section.id.as_str(),
            Rect::new(0.0, i as f32 * 1000.0, viewport.x, 1000.0),
        );
    }
    stage.insert_region(sections::HERO_GRID_ID, Rect::new(120.0, 100.0, 1200.0, 800.0));
    for i in 0..sections::HERO_TILE_COUNT {
        let col = (i % 2) as f32;
        let row = (i / 2) as f32;
        stage.insert_region(
            sections::hero_tile_id(i),
            Rect::new(120.0 + col * 610.0, 100.0 + row * 205.0, 590.0, 185.0),
        );
    }
    stage.insert_region("works-header", Rect::new(120.0, 1050.0, 1200.0, 100.0));
    for i in 0..config.projects.len() {
        stage.insert_region(
            sections::work_card_id(i),
            Rect::new(120.0, 1200.0 + i as f32 * 180.0, 1200.0, 160.0),
        );
    }
    stage.insert_region("philosophy-header", Rect::new(120.0, 2050.0, 1200.0, 100.0));
    for i in 0..config.philosophy.len() {
        stage.insert_region(
            sections::philosophy_node_id(i),
            Rect::new(120.0 + i as f32 * 250.0, 2300.0, 230.0, 280.0),
        );
    }
    stage.insert_region("skills-header", Rect::new(120.0, 3050.0, 1200.0, 100.0));
    for i in 0..config.skills.tools.len() {
        stage.insert_region(
            sections::skill_cube_id(i),
            Rect::new(120.0 + i as f32 * 200.0, 3300.0, 180.0, 180.0),
        );
    }
    stage.insert_region("contact-capsule", Rect::new(320.0, 4200.0, 800.0, 500.0));
    stage
}
