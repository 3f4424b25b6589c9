use crate::constants::{ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD, DEFAULT_CANVAS_WIDTH};
use crate::editor::{tap_routing, ConnectionMode, MapEditorSession};
use crate::geometry::{self, CanvasScale};
use crate::models::{MapNode, NodeId};
use leptos::{component, create_effect, create_node_ref, create_signal, view, Callable, Callback, CollectView, IntoView, RwSignal, Signal, SignalGet, SignalSet, SignalWith};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, MouseEvent};

const EDGE_COLOR: &str = "#2d7ff9";
const SELECTED_EDGE_COLOR: &str = "#ff9f1c";
const EDGE_WIDTH: f64 = 3.0;
const SELECTED_EDGE_WIDTH: f64 = 5.0;
const PLACEHOLDER_COLOR: &str = "#f2f2f2";
const PLACEHOLDER_TEXT_COLOR: &str = "#888";
const PLACEHOLDER_FONT: &str = "16px sans-serif";

/// Canvas-space geometry for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub size: (f64, f64),
    pub scale: CanvasScale,
}

impl CanvasLayout {
    /// Lay out an image of `image_size` at `width`, keeping its aspect ratio.
    ///
    /// An unknown image size lays out a square canvas at identity scale.
    #[must_use]
    pub fn for_image(image_size: (f64, f64), width: f64) -> Self {
        let (w, h) = image_size;
        if w <= 0.0 || h <= 0.0 {
            return Self {
                size: (width, width),
                scale: CanvasScale::IDENTITY,
            };
        }
        let size = (width, width * h / w);
        Self {
            size,
            scale: CanvasScale::fit(image_size, size),
        }
    }

    #[must_use]
    pub fn marker_origin(&self, node: &MapNode, radius: f64) -> (f64, f64) {
        let (x, y) = self.scale.to_canvas(node.position);
        (x - radius, y - radius)
    }
}

fn context_2d(canvas: &web_sys::HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_edge(ctx: &CanvasRenderingContext2d, from: (f64, f64), to: (f64, f64), selected: bool) {
    let (color, width) = if selected {
        (SELECTED_EDGE_COLOR, SELECTED_EDGE_WIDTH)
    } else {
        (EDGE_COLOR, EDGE_WIDTH)
    };

    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);

    if let Some((left, right)) = geometry::arrow_head(from, to, ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD) {
        ctx.move_to(left.0, left.1);
        ctx.line_to(to.0, to.1);
        ctx.line_to(right.0, right.1);
    }
    ctx.stroke();
}

/// Paint the floor plan and every connection. Node markers are separate elements.
pub fn draw_map(
    ctx: &CanvasRenderingContext2d,
    image: Option<&HtmlImageElement>,
    layout: CanvasLayout,
    session: &MapEditorSession,
) {
    let (width, height) = layout.size;
    ctx.clear_rect(0.0, 0.0, width, height);

    match image {
        Some(img) => {
            if let Err(err) = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, width, height) {
                crate::log_warn!("Failed to draw floor plan: {:?}", err);
            }
        }
        None => {
            ctx.set_fill_style_str(PLACEHOLDER_COLOR);
            ctx.fill_rect(0.0, 0.0, width, height);
            ctx.set_fill_style_str(PLACEHOLDER_TEXT_COLOR);
            ctx.set_font(PLACEHOLDER_FONT);
            let _ = ctx.fill_text("Loading floor plan…", 16.0, 28.0);
        }
    }

    let selected = session.selected_connection();
    for connection in session.connections() {
        let Some((from, to)) = tap_routing::connection_segment(connection, layout.scale, session.nodes()) else {
            continue;
        };
        draw_edge(ctx, from, to, selected == Some(connection.id.as_str()));
    }
}

fn marker_class(session: &MapEditorSession, id: &NodeId) -> &'static str {
    let is_start = matches!(
        session.mode(),
        ConnectionMode::AwaitingEnd { start } | ConnectionMode::PathRecordingRequested { start, .. } if &start.id == id
    );
    if session.repositioning() == Some(id) {
        "node-marker repositioning"
    } else if is_start {
        "node-marker connection-start"
    } else if session.selected_node().is_some_and(|n| &n.id == id) {
        "node-marker selected"
    } else {
        "node-marker"
    }
}

#[component]
#[must_use]
pub fn MapCanvas(
    session: RwSignal<MapEditorSession>,
    #[prop(into)] marker_radius: Signal<f64>,
    on_node_tap: Callback<NodeId>,
    on_canvas_tap: Callback<((f64, f64), CanvasScale)>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<leptos::html::Canvas>();
    let image_ref = create_node_ref::<leptos::html::Img>();
    let (image_ready, set_image_ready) = create_signal(false);
    let (natural_size, set_natural_size) = create_signal((0.0, 0.0));

    let image_url = move || session.with(|s| s.map().map(|m| m.image_url.clone()).unwrap_or_default());

    let layout = Signal::derive(move || {
        let stored = session.with(|s| s.map().map_or((0.0, 0.0), |m| m.image_size));
        let image_size = if stored.0 > 0.0 && stored.1 > 0.0 { stored } else { natural_size.get() };
        CanvasLayout::for_image(image_size, DEFAULT_CANVAS_WIDTH)
    });

    let handle_image_load = move |_| {
        if let Some(img) = image_ref.get() {
            let img: &HtmlImageElement = &img;
            set_natural_size.set((f64::from(img.natural_width()), f64::from(img.natural_height())));
        }
        set_image_ready.set(true);
    };

    create_effect(move |_| {
        let current_layout = layout.get();
        let ready = image_ready.get();

        let Some(canvas) = canvas_ref.get() else { return };
        let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            canvas_elem.set_width(current_layout.size.0.round() as u32);
            canvas_elem.set_height(current_layout.size.1.round() as u32);
        }
        let Some(ctx) = context_2d(canvas_elem) else { return };

        let image = if ready { image_ref.get() } else { None };
        let image_elem: Option<&HtmlImageElement> = image.as_deref();
        session.with(|s| draw_map(&ctx, image_elem, current_layout, s));
    });

    let handle_click = move |ev: MouseEvent| {
        let Some(canvas) = canvas_ref.get() else { return };
        let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
        let rect = canvas_elem.get_bounding_client_rect();
        let x = f64::from(ev.client_x()) - rect.left();
        let y = f64::from(ev.client_y()) - rect.top();
        let scale = layout.get().scale;

        // Clicks that miss a marker button by a pixel still belong to the node,
        // except while a move is pending, where the tap is the new position.
        let marker_hit = session.with(|s| {
            if s.repositioning().is_some() {
                return None;
            }
            tap_routing::node_at((x, y), scale, s.nodes(), marker_radius.get()).map(|n| n.id.clone())
        });
        match marker_hit {
            Some(id) => on_node_tap.call(id),
            None => on_canvas_tap.call(((x, y), scale)),
        }
    };

    let markers = move || {
        let current_layout = layout.get();
        let radius = marker_radius.get();
        session.with(|s| {
            s.nodes()
                .values()
                .map(|node| {
                    let id = node.id.clone();
                    let (left, top) = current_layout.marker_origin(node, radius);
                    let style = format!(
                        "left: {left}px; top: {top}px; width: {d}px; height: {d}px;",
                        d = radius * 2.0
                    );
                    let label = node.display_name();
                    view! {
                        <button
                            class=marker_class(s, &node.id)
                            style=style
                            title=label.clone()
                            aria-label=label
                            on:click=move |ev: MouseEvent| {
                                ev.stop_propagation();
                                on_node_tap.call(id.clone());
                            }
                        ></button>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div
            class="map-canvas-container"
            style=move || format!("width: {}px; height: {}px;", layout.get().size.0, layout.get().size.1)
        >
            <img
                node_ref=image_ref
                class="map-canvas-source"
                src=image_url
                alt=""
                style="display: none;"
                on:load=handle_image_load
            />
            <canvas node_ref=canvas_ref class="map-canvas" on:click=handle_click></canvas>
            <div class="node-layer">{markers}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_keeps_aspect_ratio() {
        let layout = CanvasLayout::for_image((1920.0, 1080.0), 960.0);
        assert_eq!(layout.size, (960.0, 540.0));
        assert_eq!(layout.scale, CanvasScale::new(0.5, 0.5));
    }

    #[test]
    fn test_layout_without_image_size() {
        let layout = CanvasLayout::for_image((0.0, 0.0), 500.0);
        assert_eq!(layout.size, (500.0, 500.0));
        assert_eq!(layout.scale, CanvasScale::IDENTITY);
    }

    #[test]
    fn test_marker_origin_centres_on_node() {
        let layout = CanvasLayout::for_image((200.0, 100.0), 400.0);
        let node = MapNode::new("a", "m1", "A", (50.0, 25.0));
        assert_eq!(layout.marker_origin(&node, 10.0), (90.0, 40.0));
    }
}
