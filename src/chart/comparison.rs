//! Target vs. actual bar chart

use super::{abbreviate, scale_annotation, DrawCommand, Font, Point, Surface, TextAlign};

const TARGET_COLOR: &str = "#94a3b8";
const ACTUAL_COLOR: &str = "#3b82f6";
const GOAL_LINE_COLOR: &str = "#ef4444";
const TEXT_COLOR: &str = "#000";

/// Space kept below the bars for the axis labels
const BASELINE_OFFSET: f64 = 40.0;

/// Draw two bars, target on the left and actual on the right
///
/// Both bars are scaled to the larger of the two values over 70% of the
/// surface height, with a dashed line at the target level and the percentage
/// reached as a headline.
pub fn comparison_chart(actual: u64, target: u64, surface: Surface) -> Vec<DrawCommand> {
    let Surface { width, height } = surface;

    let bar_width = (width * 0.3).min(100.0);
    let max_value = actual.max(target);
    let scale_text = scale_annotation(max_value);

    let bar_height = |value: u64| {
        if max_value == 0 {
            0.0
        } else {
            value as f64 / max_value as f64 * (height * 0.7)
        }
    };
    let target_height = bar_height(target);
    let actual_height = bar_height(actual);

    let target_x = width * 0.25;
    let actual_x = width * 0.75;
    let target_top = height - target_height - BASELINE_OFFSET;
    let actual_top = height - actual_height - BASELINE_OFFSET;

    let font_size = (width / 30.0).clamp(10.0, 14.0);
    let font = Font::regular(font_size);
    let label = |text: String, x: f64, y: f64, color: &'static str| DrawCommand::Text {
        text,
        at: Point::new(x, y),
        font,
        align: TextAlign::Center,
        color,
    };

    let percentage = if target == 0 {
        0.0
    } else {
        100.0 * actual as f64 / target as f64
    };

    vec![
        DrawCommand::Clear,
        DrawCommand::FillRect {
            x: target_x - bar_width / 2.0,
            y: target_top,
            width: bar_width,
            height: target_height,
            color: TARGET_COLOR,
        },
        DrawCommand::FillRect {
            x: actual_x - bar_width / 2.0,
            y: actual_top,
            width: bar_width,
            height: actual_height,
            color: ACTUAL_COLOR,
        },
        label("Expectativa".to_string(), target_x, height - 10.0, TEXT_COLOR),
        label(abbreviate(target), target_x, target_top - 10.0, TEXT_COLOR),
        label("Realidade".to_string(), actual_x, height - 10.0, TEXT_COLOR),
        label(abbreviate(actual), actual_x, actual_top - 10.0, TEXT_COLOR),
        DrawCommand::Line {
            from: Point::new(width * 0.1, target_top),
            to: Point::new(width * 0.9, target_top),
            color: GOAL_LINE_COLOR,
            width: 2.0,
            dash: Some([5.0, 3.0]),
        },
        label("Meta".to_string(), width * 0.1, target_top - 10.0, GOAL_LINE_COLOR),
        DrawCommand::Text {
            text: format!("{:.1}% Alcançado{}", percentage, scale_text),
            at: Point::new(width * 0.5, height * 0.15),
            font: Font::bold(font_size + 2.0),
            align: TextAlign::Center,
            color: TEXT_COLOR,
        },
    ]
}
