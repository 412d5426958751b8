use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::on_cleanup;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::options::GraphOptions;
use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

/// Something attached to the page that has to be detached explicitly.
pub trait Teardown {
	fn destroy(&mut self);
}

/// Holds at most one live widget. Installing a new one destroys the old one
/// first.
pub struct WidgetSlot<W: Teardown> {
	current: Rc<RefCell<Option<W>>>,
}

impl<W: Teardown> Clone for WidgetSlot<W> {
	fn clone(&self) -> Self {
		Self {
			current: self.current.clone(),
		}
	}
}

impl<W: Teardown> Default for WidgetSlot<W> {
	fn default() -> Self {
		Self {
			current: Rc::new(RefCell::new(None)),
		}
	}
}

impl<W: Teardown> WidgetSlot<W> {
	/// Destroy the current widget, then install whatever `make` builds.
	pub fn remount(&self, make: impl FnOnce() -> Option<W>) {
		self.clear();
		let widget = make();
		*self.current.borrow_mut() = widget;
	}

	pub fn clear(&self) {
		let old = self.current.borrow_mut().take();
		if let Some(mut old) = old {
			old.destroy();
		}
	}

	pub fn with_mut<R>(&self, f: impl FnOnce(&mut W) -> R) -> Option<R> {
		self.current.borrow_mut().as_mut().map(f)
	}
}

impl<W: Teardown + 'static> WidgetSlot<W> {
	/// Destroy the mounted widget when the current reactive owner is disposed.
	pub fn clear_on_cleanup(&self) {
		let slot = SendWrapper::new(self.clone());
		on_cleanup(move || slot.clear());
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Sizing {
	pub fullscreen: bool,
	pub width: Option<f64>,
	pub height: Option<f64>,
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_size(canvas: &HtmlCanvasElement, window: &Window, sizing: Sizing) -> (f64, f64) {
	if sizing.fullscreen {
		if let Some(size) = window_size(window) {
			return size;
		}
	}
	let parent = |f: fn(&web_sys::Element) -> i32, default: f64| {
		canvas
			.parent_element()
			.map(|p| f(&p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(default)
	};
	(
		sizing
			.width
			.unwrap_or_else(|| parent(web_sys::Element::client_width, 800.0)),
		sizing
			.height
			.unwrap_or_else(|| parent(web_sys::Element::client_height, 600.0)),
	)
}

/// One mounted graph: the simulation, its animation loop and its window
/// listeners.
pub struct GraphWidget {
	state: Rc<RefCell<ForceGraphState>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl GraphWidget {
	pub fn mount(
		canvas: &HtmlCanvasElement,
		data: &GraphData,
		options: GraphOptions,
		sizing: Sizing,
	) -> Option<Self> {
		let window = web_sys::window()?;
		let (w, h) = canvas_size(canvas, &window, sizing);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into().ok()?,
			_ => {
				warn!("canvas has no 2d context");
				return None;
			}
		};
		let state = Rc::new(RefCell::new(ForceGraphState::new(data, options, w, h)));
		debug!(
			"graph widget mounted: {} nodes, {} edges, {w}x{h}",
			data.nodes.len(),
			data.edges.len()
		);

		let resize_cb = sizing.fullscreen.then(|| {
			let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			cb
		});

		let frame = Rc::new(Cell::new(None));
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let (state_anim, frame_anim, animate_inner) = (state.clone(), frame.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Some(Self {
			state,
			frame,
			animate,
			resize_cb,
		})
	}

	pub fn with_state<R>(&self, f: impl FnOnce(&mut ForceGraphState) -> R) -> R {
		f(&mut self.state.borrow_mut())
	}
}

impl Teardown for GraphWidget {
	fn destroy(&mut self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(id) = self.frame.take() {
			let _ = window.cancel_animation_frame(id);
		}
		// dropping the closure also breaks its self-reference
		self.animate.borrow_mut().take();
		if let Some(cb) = self.resize_cb.take() {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.state.borrow_mut().animation_running = false;
		debug!("graph widget destroyed");
	}
}

#[cfg(test)]
mod tests {
	use leptos::prelude::Owner;

	use super::*;

	struct FakeWidget {
		live: Rc<Cell<i32>>,
		destroyed: bool,
	}

	impl FakeWidget {
		fn new(live: &Rc<Cell<i32>>) -> Self {
			live.set(live.get() + 1);
			Self {
				live: live.clone(),
				destroyed: false,
			}
		}
	}

	impl Teardown for FakeWidget {
		fn destroy(&mut self) {
			assert!(!self.destroyed, "destroyed twice");
			self.destroyed = true;
			self.live.set(self.live.get() - 1);
		}
	}

	#[test]
	fn remounting_keeps_one_live_instance() {
		let live = Rc::new(Cell::new(0));
		let slot = WidgetSlot::default();
		for _ in 0..3 {
			slot.remount(|| Some(FakeWidget::new(&live)));
			assert_eq!(live.get(), 1);
		}
		assert_eq!(slot.with_mut(|p| p.destroyed), Some(false));
	}

	#[test]
	fn old_instance_is_gone_before_the_new_one_is_built() {
		let live = Rc::new(Cell::new(0));
		let slot = WidgetSlot::default();
		slot.remount(|| Some(FakeWidget::new(&live)));
		slot.remount(|| {
			assert_eq!(live.get(), 0);
			Some(FakeWidget::new(&live))
		});
		assert_eq!(live.get(), 1);
	}

	#[test]
	fn disposing_the_owner_destroys_the_widget() {
		let live = Rc::new(Cell::new(0));
		let slot = WidgetSlot::default();
		let owner = Owner::new();
		owner.with(|| slot.clear_on_cleanup());
		slot.remount(|| Some(FakeWidget::new(&live)));
		assert_eq!(live.get(), 1);

		owner.cleanup();
		assert_eq!(live.get(), 0);
		assert!(slot.with_mut(|p| p.destroyed).is_none());
	}

	#[test]
	fn failed_mount_leaves_slot_empty() {
		let live = Rc::new(Cell::new(0));
		let slot = WidgetSlot::default();
		slot.remount(|| Some(FakeWidget::new(&live)));
		slot.remount(|| None::<FakeWidget>);
		assert_eq!(live.get(), 0);
		assert!(slot.with_mut(|p| p.destroyed).is_none());
	}
}
