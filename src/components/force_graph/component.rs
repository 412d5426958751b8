use leptos::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::options::GraphOptions;
use super::types::GraphData;
use super::widget::{GraphWidget, Sizing, WidgetSlot};

#[derive(Clone, Debug, PartialEq)]
struct Tooltip {
	html: String,
	x: f64,
	y: f64,
}

/// Canvas force graph. Every change of `data` tears the running widget down
/// and mounts a fresh one, and unmounting the component tears down the last
/// one. `on_node_click` receives the clicked node's id.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] on_node_click: Callback<String>,
	#[prop(default = GraphOptions::default())] options: GraphOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot: WidgetSlot<GraphWidget> = WidgetSlot::default();
	slot.clear_on_cleanup();
	let tooltip = RwSignal::new(None::<Tooltip>);
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};

	let slot_mount = slot.clone();
	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		tooltip.set(None);
		slot_mount.remount(|| GraphWidget::mount(&canvas, &data, options, sizing));
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let slot_md = slot.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		slot_md.with_mut(|w| w.with_state(|s| s.press(x, y)));
	};

	let slot_mm = slot.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let hovered = slot_mm
			.with_mut(|w| {
				w.with_state(|s| {
					s.pointer_move(x, y)
						.and_then(|idx| s.node(idx))
						.map(|n| n.tooltip.clone())
				})
			})
			.flatten();
		tooltip.set(hovered.map(|html| Tooltip { html, x, y }));
	};

	let slot_mu = slot.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = slot_mu
			.with_mut(|w| {
				w.with_state(|s| {
					s.release()
						.and_then(|idx| s.node(idx))
						.map(|n| n.id.clone())
				})
			})
			.flatten();
		if let Some(id) = clicked {
			tooltip.set(None);
			on_node_click.run(id);
		}
	};

	let slot_ml = slot.clone();
	let on_mouseleave = move |_: MouseEvent| {
		slot_ml.with_mut(|w| w.with_state(|s| s.leave()));
		tooltip.set(None);
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		slot.with_mut(|w| w.with_state(|s| s.zoom(x, y, ev.delta_y() < 0.0)));
	};

	view! {
		<div class="force-graph-surface" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block;"
				style:cursor=move || if tooltip.with(Option::is_some) { "pointer" } else { "grab" }
			/>
			{move || {
				tooltip
					.get()
					.map(|t| {
						view! {
							<div
								class="graph-tooltip"
								style:left=format!("{}px", t.x + 14.0)
								style:top=format!("{}px", t.y + 14.0)
								inner_html=t.html
							/>
						}
					})
			}}
		</div>
	}
}
