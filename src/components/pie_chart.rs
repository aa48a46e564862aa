use dioxus::prelude::*;

use crate::shared::types::CategorySalesDto;
use crate::utils::format::{format_amount, format_share};

pub const SLICE_COLORS: [&str; 10] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff8042", "#0088FE", "#00C49F", "#FFBB28", "#FF8042",
    "#EA4C89", "#0052CC",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Fraction of the whole, 0.0..=1.0.
    pub share: f64,
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: &'static str,
}

impl PieSlice {
    pub fn legend(&self) -> String {
        format!("{} {}", self.label, format_share(self.share))
    }
}

/// Lays categories out clockwise from 12 o'clock. Non-positive values get no slice.
pub fn pie_slices(data: &[CategorySalesDto]) -> Vec<PieSlice> {
    let total: f64 = data.iter().map(|d| d.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = 0.0f32;
    data.iter()
        .filter(|d| d.value > 0.0)
        .enumerate()
        .map(|(i, d)| {
            let share = d.value / total;
            let start = angle;
            angle += (share * 360.0) as f32;
            PieSlice {
                label: d.category.clone(),
                value: d.value,
                share,
                start_angle: start,
                end_angle: angle,
                color: SLICE_COLORS[i % SLICE_COLORS.len()],
            }
        })
        .collect()
}

fn polar(cx: f32, cy: f32, r: f32, ang: f32) -> (f32, f32) {
    // 0 degrees points up
    let rad = (ang - 90.0).to_radians();
    (cx + r * rad.cos(), cy + r * rad.sin())
}

fn slice_path(cx: f32, cy: f32, r: f32, a0: f32, a1: f32) -> String {
    let (x0, y0) = polar(cx, cy, r, a0);
    let (x1, y1) = polar(cx, cy, r, a1);
    let large_arc = if (a1 - a0).abs() > 180.0 { 1 } else { 0 };
    format!("M {cx:.3} {cy:.3} L {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x1:.3} {y1:.3} Z")
}

#[allow(non_snake_case)]
#[component]
pub fn PieChart(slices: Vec<PieSlice>, size: i32) -> Element {
    let c = (size as f32) / 2.0;
    let r = c - 2.0;
    let view_box = format!("0 0 {size} {size}");
    let size_attr = size.to_string();

    rsx! {
        div { class: "flex flex-col items-center gap-4",
            svg { width: "{size_attr}", height: "{size_attr}", view_box: "{view_box}",
                for (i, s) in slices.iter().enumerate() {
                    // an arc from a point back to itself draws nothing
                    if s.end_angle - s.start_angle >= 359.99 {
                        circle { key: "{i}", cx: "{c}", cy: "{c}", r: "{r}", fill: "{s.color}",
                            title { "{s.label}: {format_amount(s.value)}" }
                        }
                    } else {
                        path { key: "{i}", d: "{slice_path(c, c, r, s.start_angle, s.end_angle)}", fill: "{s.color}",
                            title { "{s.label}: {format_amount(s.value)}" }
                        }
                    }
                }
            }
            ul { class: "flex flex-wrap justify-center gap-x-4 gap-y-1 text-sm text-gray-300",
                for (i, s) in slices.iter().enumerate() {
                    li { key: "{i}", class: "flex items-center gap-2",
                        span { class: "inline-block h-3 w-3 rounded-sm", style: "background-color:{s.color}" }
                        "{s.legend()}"
                    }
                }
            }
        }
    }
}
