//! SVG output for chart commands
//!
//! Replays a command list onto plotters' SVG backend so charts can be
//! produced outside the browser.

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use super::{ChartError, DrawCommand, Surface, TextAlign};

/// Render `commands` into a standalone SVG document
pub fn render_svg(commands: &[DrawCommand], surface: Surface) -> Result<String, ChartError> {
    let size = (
        surface.width.max(1.0).round() as u32,
        surface.height.max(1.0).round() as u32,
    );

    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        let render = |e: DrawingAreaErrorKind<std::io::Error>| ChartError::Render(e.to_string());

        for command in commands {
            match command {
                DrawCommand::Clear => {
                    root.fill(&WHITE).map_err(render)?;
                }
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    let color = parse_color(color)?;
                    let corners = [
                        (px(*x), px(*y)),
                        (px(x + width), px(y + height)),
                    ];
                    root.draw(&Rectangle::new(corners, color.filled()))
                        .map_err(render)?;
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                    dash,
                } => {
                    let style = parse_color(color)?.stroke_width(width.round().max(1.0) as u32);
                    let segments = match dash {
                        Some([on, off]) => dash_segments((from.x, from.y), (to.x, to.y), *on, *off),
                        None => vec![((from.x, from.y), (to.x, to.y))],
                    };
                    for (start, end) in segments {
                        root.draw(&PathElement::new(
                            vec![(px(start.0), px(start.1)), (px(end.0), px(end.1))],
                            style,
                        ))
                        .map_err(render)?;
                    }
                }
                DrawCommand::Text {
                    text,
                    at,
                    font,
                    align,
                    color,
                } => {
                    let color = parse_color(color)?;
                    let mut desc = (super::Font::FAMILY, font.size).into_font();
                    if font.bold {
                        desc = desc.style(FontStyle::Bold);
                    }
                    let hpos = match align {
                        TextAlign::Left => HPos::Left,
                        TextAlign::Center => HPos::Center,
                        TextAlign::Right => HPos::Right,
                    };
                    let style = desc.color(&color).pos(Pos::new(hpos, VPos::Bottom));
                    root.draw(&Text::new(text.clone(), (px(at.x), px(at.y)), style))
                        .map_err(render)?;
                }
            }
        }

        root.present().map_err(render)?;
    }

    Ok(buffer)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

/// Parse `#rgb` or `#rrggbb`
fn parse_color(hex: &str) -> Result<RGBColor, ChartError> {
    let digits = hex.trim_start_matches('#');
    let invalid = || ChartError::InvalidColor(hex.to_string());

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match digits.len() {
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Ok(RGBColor(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(RGBColor(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(invalid()),
    }
}

/// Split a line into the visible pieces of an (on, off) dash pattern
fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    on: f64,
    off: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();

    if length == 0.0 || on <= 0.0 {
        return Vec::new();
    }

    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut offset = 0.0;

    while offset < length {
        let end = (offset + on).min(length);
        segments.push((
            (from.0 + ux * offset, from.1 + uy * offset),
            (from.0 + ux * end, from.1 + uy * end),
        ));
        offset = end + off.max(0.0);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{comparison_chart, ranking_chart, GlyphEstimate};
    use crate::stats::LocationCount;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000").unwrap(), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#3b82f6").unwrap(), RGBColor(0x3b, 0x82, 0xf6));
        assert!(matches!(parse_color("blue"), Err(ChartError::InvalidColor(_))));
    }

    #[test]
    fn test_dash_segments() {
        let segments = dash_segments((0.0, 0.0), (16.0, 0.0), 5.0, 3.0);
        assert_eq!(
            segments,
            vec![
                ((0.0, 0.0), (5.0, 0.0)),
                ((8.0, 0.0), (13.0, 0.0)),
            ]
        );

        assert!(dash_segments((1.0, 1.0), (1.0, 1.0), 5.0, 3.0).is_empty());
    }

    #[test]
    fn test_render_comparison_svg() {
        let surface = Surface::new(600.0, 300.0);
        let svg = render_svg(&comparison_chart(250, 1000, surface), surface).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Expectativa"));
        assert!(svg.contains("25.0% Alcançado"));
    }

    #[test]
    fn test_render_ranking_svg() {
        let surface = Surface::new(400.0, 300.0);
        let data = vec![LocationCount::new("Muhala", 3), LocationCount::new("Central", 1)];
        let commands = ranking_chart(&data, surface, &GlyphEstimate::default());
        let svg = render_svg(&commands, surface).unwrap();

        assert!(svg.contains("Muhala"));
        assert!(svg.contains("Distribuição por Localização"));
    }
}
