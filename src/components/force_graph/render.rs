use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::options::GraphOptions;
use super::state::{ForceGraphState, NodeInfo};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
	format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Part a node plays in the hover highlight.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Role {
	Hovered,
	Neighbor,
	/// Outside the highlight, or no highlight at all.
	Dimmed,
}

/// How a node is drawn at highlight progress `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Disc {
	radius: f64,
	/// Halo radius; zero draws no halo.
	glow: f64,
	alpha: f64,
}

impl Role {
	fn of(state: &ForceGraphState, idx: DefaultNodeIdx) -> Self {
		if !state.has_active_highlight() || !state.is_highlighted(idx) {
			Role::Dimmed
		} else if state.is_hovered(idx) {
			Role::Hovered
		} else {
			Role::Neighbor
		}
	}

	fn disc(self, base: f64, t: f64, dim: f64) -> Disc {
		match self {
			Role::Hovered => Disc {
				radius: base * (1.0 + 0.35 * t),
				glow: base * (1.8 + 1.2 * t),
				alpha: 1.0,
			},
			Role::Neighbor => Disc {
				radius: base * (1.0 + 0.2 * t),
				glow: base * (1.4 + 0.6 * t),
				alpha: 1.0,
			},
			Role::Dimmed => Disc {
				radius: base * (1.0 - 0.15 * t),
				glow: 0.0,
				alpha: 1.0 - dim * t,
			},
		}
	}
}

/// Stroke alpha, arrow alpha and width factor of an edge at progress `t`.
fn edge_stroke(highlighted: bool, t: f64) -> (f64, f64, f64) {
	if highlighted {
		(0.6 + 0.3 * t, 0.8 + 0.1 * t, 1.0 + 0.3 * t)
	} else {
		(0.6 - 0.45 * t, 0.8 - 0.45 * t, 1.0 - 0.3 * t)
	}
}

/// Screen geometry of one directed edge between two node discs.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Arrow {
	start: (f64, f64),
	/// Where the dashed shaft ends and the head begins.
	neck: (f64, f64),
	tip: (f64, f64),
	barbs: [(f64, f64); 2],
	mid: (f64, f64),
}

impl Arrow {
	/// `None` when both ends sit on the same spot.
	fn between(from: (f64, f64), to: (f64, f64), radius: f64, size: f64) -> Option<Self> {
		let (dx, dy) = (to.0 - from.0, to.1 - from.1);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			return None;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let tip = (to.0 - ux * radius, to.1 - uy * radius);
		let neck = (tip.0 - ux * size, tip.1 - uy * size);
		let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
		Some(Self {
			start: (from.0 + ux * radius, from.1 + uy * radius),
			neck,
			tip,
			barbs: [(neck.0 + px, neck.1 + py), (neck.0 - px, neck.1 - py)],
			mid: ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0),
		})
	}
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.options.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let opts = &state.options;
	let k = state.transform.k;
	let dash = (opts.dash.0 / k, opts.dash.1 / k);
	let arrow_size = opts.arrow_size / k;
	let dash_offset = -(state.flow_time * opts.flow_speed) % (dash.0 + dash.1);
	let t = ease_out_cubic(state.hover.highlight_t);
	let label_font = format!("{}px sans-serif", opts.edge_label_px / k.max(0.5));

	state.graph.visit_edges(|n1, n2, _| {
		let from = (n1.x() as f64, n1.y() as f64);
		let to = (n2.x() as f64, n2.y() as f64);
		let Some(arrow) = Arrow::between(from, to, opts.node_radius, arrow_size) else {
			return;
		};
		let highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let (stroke_alpha, head_alpha, width) = edge_stroke(highlighted, t);

		ctx.set_stroke_style_str(&rgba(opts.edge_rgb, stroke_alpha));
		ctx.set_line_width(opts.edge_width / k * width);
		set_dash(ctx, Some(dash));
		ctx.set_line_dash_offset(dash_offset);
		ctx.begin_path();
		ctx.move_to(arrow.start.0, arrow.start.1);
		ctx.line_to(arrow.neck.0, arrow.neck.1);
		ctx.stroke();

		set_dash(ctx, None);
		ctx.set_fill_style_str(&rgba(opts.edge_rgb, head_alpha));
		ctx.begin_path();
		ctx.move_to(arrow.tip.0, arrow.tip.1);
		for (bx, by) in arrow.barbs {
			ctx.line_to(bx, by);
		}
		ctx.close_path();
		ctx.fill();

		if let Some(label) = state.edge_label(n1.index(), n2.index()) {
			ctx.set_fill_style_str(&rgba(opts.edge_label_rgb, stroke_alpha));
			ctx.set_font(&label_font);
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, arrow.mid.0, arrow.mid.1 - 3.0 / k);
			ctx.set_text_align("start");
		}
	});
	set_dash(ctx, None);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let font = format!(
		"{}px sans-serif",
		state.options.label_px / state.transform.k.max(0.5)
	);

	// dimmed nodes first so the highlighted ones sit on top
	for pass in [true, false] {
		state.graph.visit_nodes(|node| {
			let role = Role::of(state, node.index());
			if (role == Role::Dimmed) != pass {
				return;
			}
			let at = (node.x() as f64, node.y() as f64);
			draw_node(state, ctx, &node.data.user_data, at, role, t, &font);
		});
	}
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	role: Role,
	t: f64,
	font: &str,
) {
	let opts: &GraphOptions = &state.options;
	let k = state.transform.k;
	let disc = role.disc(opts.node_radius, t, opts.dim);

	if disc.glow > 0.0 && t > 0.01 {
		draw_glow(ctx, opts, (x, y), &disc, role, t);
	}

	ctx.set_global_alpha(disc.alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, disc.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color);
	ctx.fill();
	ctx.set_global_alpha(1.0);

	if role == Role::Hovered && t > 0.01 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, disc.radius + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&rgba(opts.label_rgb, 0.7 * t));
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}

	let label_alpha = if role == Role::Dimmed { disc.alpha * 0.8 } else { 1.0 };
	ctx.set_fill_style_str(&rgba(opts.label_rgb, label_alpha));
	ctx.set_font(font);
	let _ = ctx.fill_text(&info.label, x + disc.radius + 3.0, y + 3.0);
}

fn draw_glow(
	ctx: &CanvasRenderingContext2d,
	opts: &GraphOptions,
	(x, y): (f64, f64),
	disc: &Disc,
	role: Role,
	t: f64,
) {
	let Ok(gradient) = ctx.create_radial_gradient(x, y, disc.radius * 0.3, x, y, disc.glow) else {
		return;
	};
	let alpha = if role == Role::Hovered { 0.35 * t } else { 0.2 * t };
	let _ = gradient.add_color_stop(0.0, &rgba(opts.label_rgb, alpha));
	let _ = gradient.add_color_stop(0.6, &rgba(opts.glow_rgb, alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, &rgba(opts.label_rgb, 0.0));
	ctx.begin_path();
	let _ = ctx.arc(x, y, disc.glow, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	#[test]
	fn arrow_stops_at_the_node_rims() {
		let arrow = Arrow::between((0.0, 0.0), (100.0, 0.0), 8.0, 10.0).unwrap();
		assert!(close(arrow.start, (8.0, 0.0)));
		assert!(close(arrow.tip, (92.0, 0.0)));
		assert!(close(arrow.neck, (82.0, 0.0)));
		assert!(close(arrow.barbs[0], (82.0, 5.0)));
		assert!(close(arrow.barbs[1], (82.0, -5.0)));
		assert!(close(arrow.mid, (50.0, 0.0)));
	}

	#[test]
	fn coincident_nodes_draw_no_arrow() {
		assert!(Arrow::between((3.0, 4.0), (3.0, 4.0), 8.0, 10.0).is_none());
	}

	#[test]
	fn highlight_grows_hovered_and_fades_the_rest() {
		let base = 8.0;
		assert_eq!(
			Role::Dimmed.disc(base, 0.0, 0.7),
			Disc {
				radius: base,
				glow: 0.0,
				alpha: 1.0
			}
		);

		let hovered = Role::Hovered.disc(base, 1.0, 0.7);
		let neighbor = Role::Neighbor.disc(base, 1.0, 0.7);
		let dimmed = Role::Dimmed.disc(base, 1.0, 0.7);
		assert!(hovered.radius > neighbor.radius && neighbor.radius > base);
		assert!(hovered.glow > neighbor.glow);
		assert!(dimmed.radius < base);
		assert!((dimmed.alpha - 0.3).abs() < 1e-9);
		assert_eq!(Role::Dimmed.disc(base, 1.0, 0.0).alpha, 1.0);
	}

	#[test]
	fn highlighted_edges_brighten_while_others_dim() {
		assert_eq!(edge_stroke(true, 0.0), edge_stroke(false, 0.0));
		let (on, _, on_w) = edge_stroke(true, 1.0);
		let (off, _, off_w) = edge_stroke(false, 1.0);
		assert!(on > off && on_w > off_w);
	}

	#[test]
	fn colours_are_css_rgba() {
		assert_eq!(rgba((100, 180, 255), 0.5), "rgba(100, 180, 255, 0.5)");
	}
}
