// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tokenizer for the SVG path `d` mini-language
//!
//! Only the line-type commands (`M/L/H/V`, absolute and relative) produce
//! points. Curve commands (`C/S/Q/T/A`) have their arguments consumed and
//! contribute nothing; `Z` is a no-op. Curves are a documented approximation
//! of this interpreter, not an omission to repair here.

use crate::geometry::Point2D;
use nom::{
    bytes::complete::take_while, character::complete::one_of, number::complete::double,
    sequence::preceded, IResult,
};

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace() || c == ',')(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    preceded(separators, double)(input)
}

fn command(input: &str) -> IResult<&str, char> {
    preceded(separators, one_of("MmLlHhVvZzCcSsQqTtAa"))(input)
}

fn arguments(mut input: &str) -> (&str, Vec<f64>) {
    let mut args = Vec::new();
    while let Ok((rest, value)) = number(input) {
        args.push(value);
        input = rest;
    }
    (input, args)
}

/// Extract the usable polyline points from a path `d` attribute.
///
/// Relative commands are resolved against the running point. Unparseable
/// trailing content ends the scan with whatever was captured so far.
pub fn extract_path_points(d: &str) -> Vec<Point2D> {
    let mut points = Vec::new();
    let mut cursor = Point2D::new(0.0, 0.0);
    let mut rest = d;

    while let Ok((after_cmd, cmd)) = command(rest) {
        let (after_args, args) = arguments(after_cmd);
        rest = after_args;

        match cmd {
            'M' | 'L' => {
                for pair in args.chunks_exact(2) {
                    cursor = Point2D::new(pair[0], pair[1]);
                    points.push(cursor);
                }
            }
            'm' | 'l' => {
                for pair in args.chunks_exact(2) {
                    cursor = Point2D::new(cursor.x + pair[0], cursor.y + pair[1]);
                    points.push(cursor);
                }
            }
            'H' => {
                for x in &args {
                    cursor.x = *x;
                    points.push(cursor);
                }
            }
            'h' => {
                for dx in &args {
                    cursor.x += dx;
                    points.push(cursor);
                }
            }
            'V' => {
                for y in &args {
                    cursor.y = *y;
                    points.push(cursor);
                }
            }
            'v' => {
                for dy in &args {
                    cursor.y += dy;
                    points.push(cursor);
                }
            }
            // Z closes without adding a point; curve commands are skipped
            _ => {}
        }
    }

    points
}
