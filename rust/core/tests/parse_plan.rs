// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end parse tests over generator-shaped drawings.

use plan_lite_core::{parse, ElementKind, Layer};

#[test]
fn minimal_plan_end_to_end() {
    let drawing = r#"<svg viewBox="0 0 100 80">
        <rect x="10" y="10" width="20" height="15" class="space"/>
        <line x1="0" y1="0" x2="100" y2="0" class="wall"/>
    </svg>"#;

    let plan = parse(drawing).unwrap();
    assert_eq!(plan.width, 100.0);
    assert_eq!(plan.height, 80.0);
    assert_eq!(plan.elements.len(), 2);

    let rect = &plan.elements[0];
    assert_eq!(rect.layer, Layer::Architectural);
    assert_eq!(rect.kind, ElementKind::Space);
    assert_eq!(rect.space.as_ref().unwrap().area, 300.0);

    let line = &plan.elements[1];
    assert_eq!(line.kind, ElementKind::Wall);
}

#[test]
fn generator_layer_groups_classify_children() {
    // Mirrors the layered group structure the plan generator emits.
    let drawing = r##"<svg viewBox="-6 -6 72 52" data-grid-x="0.00,12.00,24.00,36.00,48.00,60.00" data-grid-y="0.00,12.00,24.00,36.00">
        <g class="layer-axes">
            <line x1="12" y1="0" x2="12" y2="40" stroke="#e1d4c4" stroke-width="0.2"/>
            <text class="axis-label" x="12" y="-2">B</text>
        </g>
        <g class="layer-dims">
            <line x1="0" y1="-3" x2="60" y2="-3" stroke="#8d7b6a" stroke-width="0.35"/>
            <text class="dim-text" x="30" y="-4">60.00 m</text>
        </g>
        <g class="layer-arch">
            <rect x="0" y="0" width="60" height="40" fill="#fbf6ef" stroke="#c7b8a8" stroke-width="0.7" class="outline"/>
            <rect x="24" y="14" width="12" height="12" fill="#e4d4c2" stroke="#b8a897" stroke-width="0.45" class="core" data-name="Core" data-space-type="core"/>
            <rect x="2" y="2" width="18" height="12" class="space" data-name="Open Office" data-space-type="open_office" data-daylight="true"/>
            <path d="M30 40 A1.2 1.2 0 0 0 30 38.8" stroke="#7d6a58" fill="none" class="door"/>
            <line x1="44" y1="0" x2="50" y2="0" stroke="#8aa6c1" stroke-width="0.35" class="window"/>
        </g>
        <g class="layer-struct">
            <circle cx="12" cy="12" r="0.4" fill="none" stroke="red" class="column"/>
        </g>
        <g class="layer-mep">
            <line x1="24" y1="20" x2="48" y2="20" stroke="cyan" stroke-width="0.45" class="duct"/>
        </g>
    </svg>"##;

    let plan = parse(drawing).unwrap();
    assert_eq!(plan.width, 72.0);
    assert_eq!(plan.height, 52.0);
    assert_eq!(plan.grid_x.len(), 6);
    assert_eq!(plan.grid_labels_x, ["A", "B", "C", "D", "E", "F"]);
    assert_eq!(plan.grid_labels_y, ["1", "2", "3", "4"]);

    // The door path is approximated to its line start and dropped for
    // having fewer than two usable points.
    let kinds: Vec<ElementKind> = plan.elements.iter().map(|e| e.kind).collect();
    assert!(!kinds.contains(&ElementKind::Door));

    let axis_line = &plan.elements[0];
    assert_eq!(axis_line.layer, Layer::Grid);
    assert_eq!(axis_line.kind, ElementKind::GridLine);

    // "axis" outranks "label" in the ordered kind table, so the axis caption
    // classifies as grid-line while keeping its text payload and no bounds.
    let axis_label = &plan.elements[1];
    assert_eq!(axis_label.layer, Layer::Grid);
    assert_eq!(axis_label.kind, ElementKind::GridLine);
    assert!(axis_label.bounds.is_none());
    assert_eq!(axis_label.text.as_ref().unwrap().text, "B");

    let dim_line = plan
        .elements
        .iter()
        .find(|e| e.layer == Layer::Dimensions)
        .unwrap();
    assert_eq!(dim_line.kind, ElementKind::Dimension);

    let core = plan
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Core)
        .unwrap();
    assert_eq!(core.space.as_ref().unwrap().name, "Core");
    assert_eq!(core.space.as_ref().unwrap().area, 144.0);
    assert!(!core.space.as_ref().unwrap().requires_daylight);

    let office = plan
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Space && e.space.as_ref().unwrap().name == "Open Office")
        .unwrap();
    assert!(office.space.as_ref().unwrap().requires_daylight);
    assert_eq!(office.space.as_ref().unwrap().space_type, "open_office");

    let column = plan
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Column)
        .unwrap();
    assert_eq!(column.layer, Layer::Structural);
    assert_eq!(column.radius, Some(0.4));
    assert_eq!(column.points.len(), 1);

    let duct = plan
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Duct)
        .unwrap();
    assert_eq!(duct.layer, Layer::MepHvac);

    let window = plan
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Window)
        .unwrap();
    assert_eq!(window.layer, Layer::Architectural);
}

#[test]
fn paint_order_is_preserved() {
    let drawing = r#"<svg viewBox="0 0 10 10">
        <rect x="0" y="0" width="10" height="10" class="space" id="under"/>
        <rect x="2" y="2" width="4" height="4" class="space" id="over"/>
    </svg>"#;
    let plan = parse(drawing).unwrap();
    assert_eq!(plan.elements[0].id, "under");
    assert_eq!(plan.elements[1].id, "over");
}

#[test]
fn reparse_replaces_wholesale() {
    let first = parse("<svg viewBox='0 0 10 10'><rect width='4' height='4' class='space'/></svg>")
        .unwrap();
    let second = parse("<svg viewBox='0 0 20 20'></svg>").unwrap();
    assert_eq!(first.elements.len(), 1);
    assert!(second.elements.is_empty());
    // The earlier parse result is untouched by the newer one.
    assert_eq!(first.width, 10.0);
}
