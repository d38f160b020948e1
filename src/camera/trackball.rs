//! Trackball-style camera controls.
//!
//! Left drag rotates around the target on a virtual sphere, middle drag
//! zooms, right drag pans. Holding one of the modifier keys forces a mode
//! for any button. When `static_moving` is off, motion keeps going after
//! release and decays by `dynamic_damping_factor`.

use glam::{Quat, Vec2, Vec3};

use super::PerspectiveCamera;

const EPS: f32 = 0.000001;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlState {
	#[default]
	None,
	Rotate,
	Zoom,
	Pan,
}

impl ControlState {
	fn from_button(button: i16) -> Self {
		match button {
			0 => ControlState::Rotate,
			1 => ControlState::Zoom,
			2 => ControlState::Pan,
			_ => ControlState::None,
		}
	}
}

#[derive(Clone, Debug)]
pub struct TrackballControls {
	pub rotate_speed: f32,
	pub zoom_speed: f32,
	pub pan_speed: f32,
	pub no_rotate: bool,
	pub no_zoom: bool,
	pub no_pan: bool,
	pub static_moving: bool,
	pub dynamic_damping_factor: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	/// Key codes forcing rotate, zoom and pan.
	pub keys: [u32; 3],

	screen: Vec2,
	state: ControlState,
	prev_state: ControlState,
	key_held: bool,
	pointer_held: bool,
	move_prev: Vec2,
	move_curr: Vec2,
	last_axis: Vec3,
	last_angle: f32,
	zoom_start: Vec2,
	zoom_end: Vec2,
	pan_start: Vec2,
	pan_end: Vec2,
	last_position: Vec3,
}

impl TrackballControls {
	pub fn new(width: f32, height: f32) -> Self {
		Self {
			rotate_speed: 1.0,
			zoom_speed: 1.2,
			pan_speed: 0.3,
			no_rotate: false,
			no_zoom: false,
			no_pan: false,
			static_moving: false,
			dynamic_damping_factor: 0.2,
			min_distance: 0.0,
			max_distance: f32::INFINITY,
			keys: [65, 83, 68],
			screen: Vec2::new(width, height),
			state: ControlState::None,
			prev_state: ControlState::None,
			key_held: false,
			pointer_held: false,
			move_prev: Vec2::ZERO,
			move_curr: Vec2::ZERO,
			last_axis: Vec3::ZERO,
			last_angle: 0.0,
			zoom_start: Vec2::ZERO,
			zoom_end: Vec2::ZERO,
			pan_start: Vec2::ZERO,
			pan_end: Vec2::ZERO,
			last_position: Vec3::ZERO,
		}
	}

	#[cfg(test)]
	pub fn state(&self) -> ControlState {
		self.state
	}

	pub fn handle_resize(&mut self, width: f32, height: f32) {
		self.screen = Vec2::new(width, height);
	}

	/// Auto-repeated presses are ignored until `key_up`.
	pub fn key_down(&mut self, key_code: u32) {
		if self.key_held {
			return;
		}
		self.key_held = true;
		self.prev_state = self.state;
		if self.state != ControlState::None {
			return;
		}
		if key_code == self.keys[0] && !self.no_rotate {
			self.state = ControlState::Rotate;
		} else if key_code == self.keys[1] && !self.no_zoom {
			self.state = ControlState::Zoom;
		} else if key_code == self.keys[2] && !self.no_pan {
			self.state = ControlState::Pan;
		}
	}

	pub fn key_up(&mut self) {
		if !self.key_held {
			return;
		}
		self.key_held = false;
		self.state = self.prev_state;
	}

	/// `x`/`y` are canvas-relative pixels.
	pub fn pointer_down(&mut self, button: i16, x: f32, y: f32) {
		self.pointer_held = true;
		if self.state == ControlState::None {
			self.state = ControlState::from_button(button);
		}
		match self.state {
			ControlState::Rotate if !self.no_rotate => {
				self.move_curr = self.mouse_on_circle(x, y);
				self.move_prev = self.move_curr;
			}
			ControlState::Zoom if !self.no_zoom => {
				self.zoom_start = self.mouse_on_screen(x, y);
				self.zoom_end = self.zoom_start;
			}
			ControlState::Pan if !self.no_pan => {
				self.pan_start = self.mouse_on_screen(x, y);
				self.pan_end = self.pan_start;
			}
			_ => {}
		}
	}

	pub fn pointer_move(&mut self, x: f32, y: f32) {
		if !self.pointer_held {
			return;
		}
		match self.state {
			ControlState::Rotate if !self.no_rotate => {
				self.move_prev = self.move_curr;
				self.move_curr = self.mouse_on_circle(x, y);
			}
			ControlState::Zoom if !self.no_zoom => {
				self.zoom_end = self.mouse_on_screen(x, y);
			}
			ControlState::Pan if !self.no_pan => {
				self.pan_end = self.mouse_on_screen(x, y);
			}
			_ => {}
		}
	}

	pub fn pointer_up(&mut self) {
		self.pointer_held = false;
		self.state = ControlState::None;
	}

	/// `delta_mode` follows `WheelEvent.deltaMode` (pixels, lines, pages).
	pub fn wheel(&mut self, delta_y: f32, delta_mode: u32) {
		if self.no_zoom {
			return;
		}
		let scale = match delta_mode {
			2 => 0.025,
			1 => 0.01,
			_ => 0.00025,
		};
		self.zoom_start.y -= delta_y * scale;
	}

	/// Apply pending rotation, zoom and pan to `camera`. Returns whether the
	/// camera moved.
	pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
		let mut eye = camera.position - camera.target;

		if !self.no_rotate {
			self.rotate(camera, &mut eye);
		}
		if !self.no_zoom {
			self.zoom(&mut eye);
		}
		if !self.no_pan {
			self.pan(camera, eye);
		}

		camera.position = camera.target + eye;
		self.check_distances(camera, &mut eye);

		if self.last_position.distance_squared(camera.position) > EPS {
			self.last_position = camera.position;
			return true;
		}
		false
	}

	fn mouse_on_screen(&self, x: f32, y: f32) -> Vec2 {
		Vec2::new(x / self.screen.x, y / self.screen.y)
	}

	fn mouse_on_circle(&self, x: f32, y: f32) -> Vec2 {
		Vec2::new(
			(x - self.screen.x * 0.5) / (self.screen.x * 0.5),
			(self.screen.y - 2.0 * y) / self.screen.x,
		)
	}

	fn rotate(&mut self, camera: &mut PerspectiveCamera, eye: &mut Vec3) {
		let delta = self.move_curr - self.move_prev;
		let mut angle = delta.length();

		if angle > 0.0 {
			let eye_direction = eye.normalize_or_zero();
			let up = camera.up.normalize_or_zero();
			let sideways = up.cross(eye_direction).normalize_or_zero();
			let move_direction = up * delta.y + sideways * delta.x;
			let axis = move_direction.cross(*eye).normalize_or_zero();
			if axis != Vec3::ZERO {
				angle *= self.rotate_speed;
				let quaternion = Quat::from_axis_angle(axis, angle);
				*eye = quaternion * *eye;
				camera.up = quaternion * camera.up;
				self.last_axis = axis;
				self.last_angle = angle;
			}
		} else if !self.static_moving && self.last_angle > 0.0 && self.last_axis != Vec3::ZERO {
			self.last_angle *= (1.0 - self.dynamic_damping_factor).sqrt();
			let quaternion = Quat::from_axis_angle(self.last_axis, self.last_angle);
			*eye = quaternion * *eye;
			camera.up = quaternion * camera.up;
		}

		self.move_prev = self.move_curr;
	}

	fn zoom(&mut self, eye: &mut Vec3) {
		let factor = 1.0 + (self.zoom_end.y - self.zoom_start.y) * self.zoom_speed;
		if factor != 1.0 && factor > 0.0 {
			*eye *= factor;
		}

		if self.static_moving {
			self.zoom_start = self.zoom_end;
		} else {
			self.zoom_start.y +=
				(self.zoom_end.y - self.zoom_start.y) * self.dynamic_damping_factor;
		}
	}

	fn pan(&mut self, camera: &mut PerspectiveCamera, eye: Vec3) {
		let change = self.pan_end - self.pan_start;
		if change.length_squared() == 0.0 {
			return;
		}

		let change = change * eye.length() * self.pan_speed;
		let pan = eye.cross(camera.up).normalize_or_zero() * change.x
			+ camera.up.normalize_or_zero() * change.y;
		camera.position += pan;
		camera.target += pan;

		if self.static_moving {
			self.pan_start = self.pan_end;
		} else {
			self.pan_start += (self.pan_end - self.pan_start) * self.dynamic_damping_factor;
		}
	}

	fn check_distances(&mut self, camera: &mut PerspectiveCamera, eye: &mut Vec3) {
		if self.no_zoom && self.no_pan {
			return;
		}
		let length_sq = eye.length_squared();
		if length_sq > self.max_distance * self.max_distance {
			*eye = eye.normalize_or_zero() * self.max_distance;
			camera.position = camera.target + *eye;
			self.zoom_start = self.zoom_end;
		}
		if length_sq < self.min_distance * self.min_distance {
			*eye = eye.normalize_or_zero() * self.min_distance;
			camera.position = camera.target + *eye;
			self.zoom_start = self.zoom_end;
		}
	}
}
