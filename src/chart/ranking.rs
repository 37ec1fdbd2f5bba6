//! Horizontal bar ranking of locations

use super::{
    abbreviate, scale_annotation, DrawCommand, Font, Point, Surface, TextAlign, TextMeasure,
};
use crate::stats::{LocationCount, TOP_LOCATIONS};

/// Bar colors, one per rank
const BAR_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ef4444"];
const TEXT_COLOR: &str = "#000";

/// Characters kept when a location name is too wide for its column
const NAME_KEEP_CHARS: usize = 10;

/// Draw one bar per location, longest for the most frequent
///
/// At most five locations are drawn. Names are right-aligned in the left
/// column and shortened when they would render wider than a quarter of the
/// surface. An empty ranking only clears the surface.
pub fn ranking_chart(
    locations: &[LocationCount],
    surface: Surface,
    measure: &dyn TextMeasure,
) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear];

    if locations.is_empty() {
        return commands;
    }

    let Surface { width, height } = surface;

    let shown = &locations[..locations.len().min(TOP_LOCATIONS)];
    let bar_height = (height * 0.12).min(height / (shown.len() as f64 + 2.0));
    let spacing = (height * 0.05).min(bar_height / 2.0);
    let max_value = shown.iter().map(|l| l.count).max().unwrap_or(0) as u64;
    let scale_text = scale_annotation(max_value);

    let font_size = (width / 40.0).clamp(8.0, 12.0);
    let font = Font::regular(font_size);
    let name_budget = width * 0.25;
    let bar_start = width * 0.3;

    for (index, location) in shown.iter().enumerate() {
        let bar_width = if max_value == 0 {
            0.0
        } else {
            location.count as f64 / max_value as f64 * (width * 0.6)
        };
        let y = spacing + index as f64 * (bar_height + spacing);
        let text_y = y + bar_height / 2.0 + 4.0;

        commands.push(DrawCommand::FillRect {
            x: bar_start,
            y,
            width: bar_width,
            height: bar_height,
            color: BAR_COLORS[index % BAR_COLORS.len()],
        });

        commands.push(DrawCommand::Text {
            text: fit_name(&location.location, name_budget, &font, measure),
            at: Point::new(width * 0.28, text_y),
            font,
            align: TextAlign::Right,
            color: TEXT_COLOR,
        });

        commands.push(DrawCommand::Text {
            text: abbreviate(location.count as u64),
            at: Point::new(bar_start + bar_width + 5.0, text_y),
            font,
            align: TextAlign::Left,
            color: TEXT_COLOR,
        });
    }

    commands.push(DrawCommand::Text {
        text: format!("Distribuição por Localização{}", scale_text),
        at: Point::new(width * 0.5, height * 0.95),
        font: Font::bold(font_size + 2.0),
        align: TextAlign::Center,
        color: TEXT_COLOR,
    });

    commands
}

fn fit_name(name: &str, budget: f64, font: &Font, measure: &dyn TextMeasure) -> String {
    if measure.text_width(name, font) > budget {
        let kept: String = name.chars().take(NAME_KEEP_CHARS).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}
