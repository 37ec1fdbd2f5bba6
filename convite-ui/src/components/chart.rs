//! Chart Component
//!
//! Paints the dashboard charts on an HTML5 canvas sized to its container.
//! Layout comes from `convite::chart`; this module only replays the commands.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use convite::chart::{comparison_chart, ranking_chart, DrawCommand, Font, Surface, TextMeasure};

use crate::state::{GlobalState, ParticipantsState};

/// Which dashboard chart a canvas shows
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Target vs. confirmed participants
    Comparison,
    /// Top five locations
    Ranking,
}

/// Canvas chart that redraws on data changes and window resizes
#[component]
pub fn ChartCanvas(kind: ChartKind) -> impl IntoView {
    let global = use_context::<GlobalState>().expect("GlobalState not found");
    let state = use_context::<ParticipantsState>().expect("ParticipantsState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let (resized, set_resized) = create_signal(0u32);

    // Released when the page unmounts
    let handle = window_event_listener(ev::resize, move |_| {
        set_resized.update(|n| *n = n.wrapping_add(1));
    });
    on_cleanup(move || handle.remove());

    create_effect(move |_| {
        resized.track();
        let target = global.target.get();
        let count = state.records.with(|records| records.len());
        let top = state.top_locations();

        if let Some(canvas) = canvas_ref.get() {
            draw(&canvas, kind, count, target, &top);
        }
    });

    view! {
        <div class="w-full h-full">
            <canvas node_ref=canvas_ref class="w-full h-full" />
        </div>
    }
}

/// Text widths from the canvas' own font metrics
struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl TextMeasure for CanvasMeasure<'_> {
    fn text_width(&self, text: &str, font: &Font) -> f64 {
        self.ctx.set_font(&font.css());
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }
}

fn draw(
    canvas: &HtmlCanvasElement,
    kind: ChartKind,
    count: usize,
    target: u32,
    top: &[convite::LocationCount],
) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let surface = fit_to_container(canvas);

    let commands = match kind {
        ChartKind::Comparison => comparison_chart(count as u64, target as u64, surface),
        ChartKind::Ranking => ranking_chart(top, surface, &CanvasMeasure { ctx: &ctx }),
    };

    paint(&ctx, surface, &commands);
}

/// Match the bitmap size to the container so drawing stays crisp
fn fit_to_container(canvas: &HtmlCanvasElement) -> Surface {
    let (width, height) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => (canvas.client_width(), canvas.client_height()),
    };

    canvas.set_width(width.max(1) as u32);
    canvas.set_height(height.max(1) as u32);

    Surface::new(canvas.width() as f64, canvas.height() as f64)
}

fn paint(ctx: &CanvasRenderingContext2d, surface: Surface, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Clear => {
                ctx.clear_rect(0.0, 0.0, surface.width, surface.height);
            }
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ctx.set_fill_style(&JsValue::from_str(color));
                ctx.fill_rect(*x, *y, *width, *height);
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                dash,
            } => {
                ctx.set_stroke_style(&JsValue::from_str(color));
                ctx.set_line_width(*width);
                let pattern = js_sys::Array::new();
                if let Some([on, off]) = dash {
                    pattern.push(&JsValue::from_f64(*on));
                    pattern.push(&JsValue::from_f64(*off));
                }
                let _ = ctx.set_line_dash(&pattern);

                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();

                let _ = ctx.set_line_dash(&js_sys::Array::new());
            }
            DrawCommand::Text {
                text,
                at,
                font,
                align,
                color,
            } => {
                ctx.set_font(&font.css());
                ctx.set_text_align(align.as_css());
                ctx.set_fill_style(&JsValue::from_str(color));
                let _ = ctx.fill_text(text, at.x, at.y);
            }
        }
    }
}
