// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

pub const COLORS: [&str; 15] = [
    "#5DADE2", "#AF7AC5", "#EC7063", "#F8B88B", "#52BE80", "#E74C3C", "#9B59B6", "#17A589",
    "#F39C12", "#76D7C4", "#3498DB", "#E67E22", "#16A085", "#8E44AD", "#C0392B",
];

/// Hands out a color per category in first-encounter order and remembers it.
/// Wraps around once every palette entry is taken.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    assigned: HashMap<String, usize>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, category: &str) -> &'static str {
        let next = self.assigned.len();
        let idx = *self
            .assigned
            .entry(category.to_string())
            .or_insert(next % COLORS.len());
        COLORS[idx]
    }
}

/// Terminal rendering of a hex color, for comfy-table cells.
pub fn to_table_color(hex: &str) -> comfy_table::Color {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| {
        h.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    comfy_table::Color::Rgb {
        r: channel(0),
        g: channel(2),
        b: channel(4),
    }
}
