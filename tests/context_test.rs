use std::rc::Rc;

use swatch_ngin::{
    ConfiguratorEvent, MaterialDescriptor, PartId,
    config::ConfiguratorConfig,
    context::Context,
    data_structures::material::Rgb,
    flow::Driver,
};

use crate::common::test_utils::{
    MemorySource, material_name_of, material_of, part_of, png_bytes, scene_of,
};

mod common;

const CHAIR: &[&str] = &[
    "chair_back",
    "chair_base",
    "chair_cushions_seat",
    "chair_legs_front",
    "chair_legs_rear",
    "chair_supports",
];

fn context_with(config: ConfiguratorConfig, source: Rc<MemorySource>) -> Context {
    let mut ctx = Context::new(scene_of(CHAIR), config, source);
    assert!(ctx.init().is_empty());
    ctx
}

#[test]
fn init_binds_every_stock_part() {
    let ctx = context_with(ConfiguratorConfig::default(), MemorySource::new().into_rc());

    assert_eq!(part_of(ctx.root(), "chair_back").as_deref(), Some("back"));
    assert_eq!(part_of(ctx.root(), "chair_cushions_seat").as_deref(), Some("cushions"));
    assert_eq!(part_of(ctx.root(), "chair_legs_rear").as_deref(), Some("legs"));
    assert_eq!(part_of(ctx.root(), "chair_supports").as_deref(), Some("supports"));
    let initial = material_of(ctx.root(), "chair_base").unwrap();
    assert_eq!(initial.color(), Some(Rgb::new(0xF1, 0xF1, 0xF1)));
    assert_eq!(initial.shininess, 10.0);
    assert_eq!(ctx.active_part(), Some(&PartId::from("legs")));
}

#[test]
fn colour_swatch_recolours_the_active_part_only() {
    let mut ctx = context_with(ConfiguratorConfig::default(), MemorySource::new().into_rc());

    let out = ctx.handle_event(ConfiguratorEvent::SwatchSelected(2));

    assert!(out.is_empty());
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#66533C"));
    assert_eq!(material_name_of(ctx.root(), "chair_legs_rear").as_deref(), Some("#66533C"));
    assert_eq!(material_name_of(ctx.root(), "chair_back").as_deref(), Some("#F1F1F1"));
}

#[test]
fn switching_tabs_redirects_later_swatches() {
    let mut ctx = context_with(ConfiguratorConfig::default(), MemorySource::new().into_rc());

    let tab = ctx.handle_event(ConfiguratorEvent::PartTabSelected(PartId::from("back")));
    assert!(tab.is_empty());
    assert!(ctx.handle_event(ConfiguratorEvent::SwatchSelected(6)).is_empty());

    assert_eq!(material_name_of(ctx.root(), "chair_back").as_deref(), Some("#438AAC"));
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#F1F1F1"));
}

#[test]
fn unknown_swatch_changes_nothing() {
    let mut ctx = context_with(ConfiguratorConfig::default(), MemorySource::new().into_rc());

    let out = ctx.on_swatch_selected(42);

    assert!(out.is_empty());
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#F1F1F1"));
}

#[test]
fn swatch_without_active_part_is_ignored() {
    let config = ConfiguratorConfig {
        active_part: None,
        ..Default::default()
    };
    let mut ctx = context_with(config, MemorySource::new().into_rc());

    assert!(ctx.on_swatch_selected(3).is_empty());

    for name in CHAIR {
        assert_eq!(material_name_of(ctx.root(), name).as_deref(), Some("#F1F1F1"));
    }
}

#[test]
fn blank_active_part_in_toml_means_no_part_yet() {
    let config = ConfiguratorConfig::from_toml_str("active_part = \"\"").unwrap();
    let mut ctx = context_with(config, MemorySource::new().into_rc());

    assert_eq!(ctx.active_part(), None);
    assert!(ctx.on_swatch_selected(2).is_empty());
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#F1F1F1"));

    ctx.on_part_tab_selected(PartId::from("legs"));
    assert!(ctx.on_swatch_selected(2).is_empty());
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#66533C"));
}

#[test]
fn malformed_swatch_leaves_the_scene_untouched() {
    let config = ConfiguratorConfig {
        swatches: vec![MaterialDescriptor::color("not-a-colour")],
        ..Default::default()
    };
    let mut ctx = context_with(config, MemorySource::new().into_rc());

    let out = ctx.on_swatch_selected(0);

    assert!(out.is_empty());
    assert_eq!(material_name_of(ctx.root(), "chair_legs_front").as_deref(), Some("#F1F1F1"));
    assert_eq!(part_of(ctx.root(), "chair_legs_front").as_deref(), Some("legs"));
}

#[test]
fn texture_swatch_applies_now_and_fills_in_later() {
    let source = MemorySource::new()
        .with_file("texture/gold.jpg", png_bytes(2, 2, [212, 175, 55, 255]))
        .into_rc();
    let mut ctx = context_with(ConfiguratorConfig::default(), source.clone());
    let driver = Driver::new().unwrap();

    let out = ctx.on_swatch_selected(0);
    assert_eq!(out.len(), 1);

    let gold = material_of(ctx.root(), "chair_legs_front").unwrap();
    let slot = gold.texture().expect("textured").clone();
    assert!(slot.is_pending());
    assert_eq!(gold.shininess, 60.0);

    // the user moves on before the image arrives
    ctx.on_part_tab_selected(PartId::from("back"));
    assert!(ctx.on_swatch_selected(3).is_empty());

    driver.run(out);

    assert!(slot.is_ready());
    assert!(material_of(ctx.root(), "chair_legs_rear").unwrap().texture().unwrap().is_ready());
    assert_eq!(material_name_of(ctx.root(), "chair_back").as_deref(), Some("#173A2F"));
    assert_eq!(source.fetches(), 1);
}

#[test]
fn texture_whose_load_was_dropped_loads_on_the_next_click() {
    let source = MemorySource::new()
        .with_file("texture/gold.jpg", png_bytes(2, 2, [212, 175, 55, 255]))
        .into_rc();
    let mut ctx = context_with(ConfiguratorConfig::default(), source.clone());

    drop(ctx.on_swatch_selected(0));
    assert_eq!(source.fetches(), 0);

    let out = ctx.on_swatch_selected(0);
    assert_eq!(out.len(), 1);
    Driver::new().unwrap().run(out);

    let gold = material_of(ctx.root(), "chair_legs_front").unwrap();
    assert!(gold.texture().unwrap().is_ready());
    assert_eq!(source.fetches(), 1);
}

#[test]
fn failed_texture_keeps_the_material_applied() {
    let mut ctx = context_with(ConfiguratorConfig::default(), MemorySource::new().into_rc());
    let driver = Driver::new().unwrap();

    let out = ctx.on_swatch_selected(1);
    driver.run(out);

    let wood = material_of(ctx.root(), "chair_legs_front").unwrap();
    assert_eq!(wood.name, "texture/wood.png");
    assert!(wood.texture().unwrap().is_failed());
    assert_eq!(part_of(ctx.root(), "chair_legs_front").as_deref(), Some("legs"));
}

#[test]
fn textured_initial_material_hands_back_its_load() {
    let source = MemorySource::new()
        .with_file("texture/base.png", png_bytes(1, 1, [255, 255, 255, 255]))
        .into_rc();
    let config = ConfiguratorConfig {
        initial_material: MaterialDescriptor::texture("texture/base.png", [1.0; 3]),
        ..Default::default()
    };
    let mut ctx = Context::new(scene_of(CHAIR), config, source);

    let out = ctx.init();
    assert_eq!(out.len(), 1);
    Driver::new().unwrap().run(out);

    let base = material_of(ctx.root(), "chair_base").unwrap();
    assert!(base.texture().unwrap().is_ready());
}
