use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::layout::layout;
use super::render;
use super::state::ConceptGraphState;
use super::types::{ConceptGraph, Direction};

const ZOOM_STEP: f64 = 1.2;

fn window_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		read(window.inner_width(), 800.0),
		read(window.inner_height(), 600.0),
	)
}

/// Selection for the next frame. Empty once the owning view is gone.
fn frame_selection(selected: Signal<Option<String>>) -> Option<String> {
	selected.try_get_untracked().flatten()
}

/// Browser callbacks the canvas registers outside the reactive graph.
#[derive(Default)]
struct CanvasHandles {
	frame: Option<Closure<dyn FnMut()>>,
	frame_id: Option<i32>,
	resize: Option<Closure<dyn FnMut()>>,
}

impl CanvasHandles {
	fn schedule_frame(&mut self) {
		self.frame_id = match (&self.frame, web_sys::window()) {
			(Some(cb), Some(win)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
			_ => None,
		};
	}

	/// Stops the frame loop and detaches the resize listener.
	fn release(&mut self) {
		let window = web_sys::window();
		if let (Some(id), Some(win)) = (self.frame_id.take(), &window) {
			let _ = win.cancel_animation_frame(id);
		}
		if let (Some(cb), Some(win)) = (self.resize.take(), &window) {
			let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if self.frame.take().is_some() {
			debug!("concept graph frame loop stopped");
		}
	}
}

fn pointer_in(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas drawing of a laid-out concept graph with pan, zoom and node clicks.
///
/// Layout runs once per graph value; pointer input only moves the viewport.
#[component]
pub fn ConceptGraphCanvas(
	#[prop(into)] data: Signal<ConceptGraph>,
	#[prop(default = Direction::TopToBottom)] direction: Direction,
	/// Node currently shown in the detail overlay, drawn highlighted.
	#[prop(into)]
	selected: Signal<Option<String>>,
	/// Invoked with the id of a clicked node.
	on_select: Callback<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ConceptGraphState>>> = Rc::new(RefCell::new(None));
	let handles: Rc<RefCell<CanvasHandles>> = Rc::default();
	let (state_init, handles_init) = (state.clone(), handles.clone());

	// The frame closure holds its own handle, so the cycle is broken here.
	let handles_store = StoredValue::new_local(handles);
	on_cleanup(move || {
		handles_store.try_with_value(|handles| handles.borrow_mut().release());
	});

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let result = layout(&graph.nodes, &graph.edges, direction);
		info!(
			"concept graph laid out: {} nodes, {} edges",
			result.nodes.len(),
			result.edges.len()
		);
		*state_init.borrow_mut() = Some(ConceptGraphState::new(result, w, h));

		if fullscreen && handles_init.borrow().resize.is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let on_resize = Closure::<dyn FnMut()>::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
			let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
			handles_init.borrow_mut().resize = Some(on_resize);
		}

		// The frame loop survives re-layouts; it always draws the latest state.
		if handles_init.borrow().frame.is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			debug!("canvas has no 2d context");
			return;
		};
		let (state_anim, handles_anim) = (state_init.clone(), handles_init.clone());
		let frame = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				let open = frame_selection(selected);
				render::render(s, &ctx, open.as_deref());
			}
			handles_anim.borrow_mut().schedule_frame();
		});
		let mut handles = handles_init.borrow_mut();
		handles.frame = Some(frame);
		handles.schedule_frame();
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_in(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_pointer(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_in(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.move_pointer(x, y);
			let cursor = if s.pan.moved {
				"grabbing"
			} else if s.hover.node.is_some() {
				"pointer"
			} else {
				"grab"
			};
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_in(&canvas, &ev);
		// Release the borrow before handing control to the callback.
		let clicked = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.end_pointer(x, y),
			None => None,
		};
		if let Some(id) = clicked {
			debug!("concept node {id} clicked");
			on_select.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel_pointer();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_in(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	let (state_in, state_out, state_fit) = (state.clone(), state.clone(), state.clone());
	let zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_in.borrow_mut() {
			s.zoom_by(ZOOM_STEP);
		}
	};
	let zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_out.borrow_mut() {
			s.zoom_by(1.0 / ZOOM_STEP);
		}
	};
	let fit = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			s.fit_view();
		}
	};

	view! {
		<div class="concept-graph">
			<canvas
				node_ref=canvas_ref
				class="concept-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-controls">
				<button title="Zoom in" on:click=zoom_in>"+"</button>
				<button title="Zoom out" on:click=zoom_out>"−"</button>
				<button title="Fit view" on:click=fit>"⤢"</button>
			</div>
		</div>
	}
}
