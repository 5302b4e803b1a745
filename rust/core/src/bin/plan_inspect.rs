// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: parse a plan SVG and print a layer/kind summary
//!
//! Usage:
//!   plan-inspect <plan.svg> [options]

use plan_lite_core::{parse, Layer};
use rustc_hash::FxHashMap;
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let plan_path = &args[1];
    let mut list_elements = false;
    let mut show_grid = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--elements" => {
                list_elements = true;
            }
            "--grid" => {
                show_grid = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let text = match fs::read_to_string(plan_path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read {}: {}", plan_path, err);
            std::process::exit(1);
        }
    };

    let plan = match parse(&text) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("Failed to parse {}: {}", plan_path, err);
            std::process::exit(1);
        }
    };

    println!("Document: {} x {}", plan.width, plan.height);
    println!(
        "Grid: {} x-axes ({}), {} y-axes ({})",
        plan.grid_x.len(),
        plan.grid_labels_x.join(","),
        plan.grid_y.len(),
        plan.grid_labels_y.join(",")
    );
    println!("Elements: {}", plan.elements.len());

    let mut per_layer: FxHashMap<Layer, usize> = FxHashMap::default();
    for element in &plan.elements {
        *per_layer.entry(element.layer).or_default() += 1;
    }
    for layer in Layer::ALL {
        if let Some(count) = per_layer.get(&layer) {
            println!("  {:16} {}", layer.to_string(), count);
        }
    }

    if show_grid {
        for (label, x) in plan.grid_labels_x.iter().zip(&plan.grid_x) {
            println!("  axis {:3} x={:.2}", label, x);
        }
        for (label, y) in plan.grid_labels_y.iter().zip(&plan.grid_y) {
            println!("  axis {:3} y={:.2}", label, y);
        }
    }

    if list_elements {
        for element in &plan.elements {
            println!(
                "  {:24} {:12} {:14} {} pts",
                element.id,
                element.kind.to_string(),
                element.layer.to_string(),
                element.points.len()
            );
        }
    }
}

fn print_usage() {
    println!("plan-inspect: summarize a parsed floor-plan drawing");
    println!();
    println!("Usage:");
    println!("  plan-inspect <plan.svg> [options]");
    println!();
    println!("Options:");
    println!("  --elements   List every parsed element");
    println!("  --grid       List grid axis coordinates and labels");
}
