//! Perspective camera and the pointer-driven controls that move it.
//!
//! The scene is projected in software onto a 2d canvas: world positions go
//! through view and projection matrices, then get mapped to canvas pixels.

mod trackball;

use glam::{Mat4, Vec2, Vec3, Vec4};

pub use trackball::TrackballControls;

/// A point mapped to canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance in front of the camera along the view axis.
	pub depth: f32,
	/// Canvas pixels per world unit at this depth.
	pub scale: f32,
}

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
	pub fov: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
	pub position: Vec3,
	pub up: Vec3,
	pub target: Vec3,
	viewport: Vec2,
}

impl PerspectiveCamera {
	/// `fov` is the vertical field of view in degrees.
	pub fn new(fov: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
		Self {
			fov,
			aspect: width / height.max(1.0),
			near,
			far,
			position: Vec3::ZERO,
			up: Vec3::Y,
			target: Vec3::ZERO,
			viewport: Vec2::new(width, height),
		}
	}

	pub fn set_viewport(&mut self, width: f32, height: f32) {
		self.viewport = Vec2::new(width, height);
		self.aspect = width / height.max(1.0);
	}

	#[cfg(test)]
	pub fn viewport(&self) -> Vec2 {
		self.viewport
	}

	#[cfg(test)]
	pub fn distance(&self) -> f32 {
		self.position.distance(self.target)
	}

	pub fn view_projection(&self) -> Mat4 {
		let projection =
			Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
		let view = Mat4::look_at_rh(self.position, self.target, self.up);
		projection * view
	}

	#[cfg(test)]
	pub fn project(&self, world: Vec3) -> Option<Projected> {
		self.project_with(&self.view_projection(), world)
	}

	/// Project `world` with a precomputed view-projection matrix. `None` when
	/// it lies behind the near plane.
	pub fn project_with(&self, view_projection: &Mat4, world: Vec3) -> Option<Projected> {
		let clip = *view_projection * world.extend(1.0);
		if clip.w < self.near {
			return None;
		}
		let screen = self.clip_to_screen(clip);
		let half_height = self.viewport.y * 0.5;
		let scale = half_height / (clip.w * (self.fov.to_radians() * 0.5).tan());
		Some(Projected {
			x: screen.x as f64,
			y: screen.y as f64,
			depth: clip.w,
			scale,
		})
	}

	/// Project a line segment, clipping it against the near plane. `None`
	/// when the whole segment is behind the camera.
	pub fn project_segment(
		&self,
		view_projection: &Mat4,
		a: Vec3,
		b: Vec3,
	) -> Option<(Vec2, Vec2)> {
		let mut ca = *view_projection * a.extend(1.0);
		let mut cb = *view_projection * b.extend(1.0);
		if ca.w < self.near && cb.w < self.near {
			return None;
		}
		if ca.w < self.near {
			ca = ca.lerp(cb, (self.near - ca.w) / (cb.w - ca.w));
		} else if cb.w < self.near {
			cb = cb.lerp(ca, (self.near - cb.w) / (ca.w - cb.w));
		}
		Some((self.clip_to_screen(ca), self.clip_to_screen(cb)))
	}

	fn clip_to_screen(&self, clip: Vec4) -> Vec2 {
		let ndc = clip.truncate() / clip.w;
		Vec2::new(
			(ndc.x + 1.0) * 0.5 * self.viewport.x,
			(1.0 - ndc.y) * 0.5 * self.viewport.y,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn camera() -> PerspectiveCamera {
		let mut camera = PerspectiveCamera::new(40.0, 800.0, 600.0, 1.0, 1_000_000.0);
		camera.position = Vec3::new(0.0, 0.0, 10_000.0);
		camera
	}

	#[test]
	fn target_lands_in_the_middle() {
		let p = camera().project(Vec3::ZERO).unwrap();
		assert!((p.x - 400.0).abs() < 1e-3);
		assert!((p.y - 300.0).abs() < 1e-3);
		assert!((p.depth - 10_000.0).abs() < 1e-2);
	}

	#[test]
	fn up_is_up_on_screen() {
		let p = camera().project(Vec3::new(0.0, 500.0, 0.0)).unwrap();
		assert!(p.y < 300.0);
		let p = camera().project(Vec3::new(500.0, 0.0, 0.0)).unwrap();
		assert!(p.x > 400.0);
	}

	#[test]
	fn points_behind_the_camera_are_dropped() {
		assert!(camera().project(Vec3::new(0.0, 0.0, 20_000.0)).is_none());
	}

	#[test]
	fn farther_points_shrink() {
		let cam = camera();
		let near = cam.project(Vec3::new(0.0, 0.0, 5_000.0)).unwrap();
		let far = cam.project(Vec3::new(0.0, 0.0, -5_000.0)).unwrap();
		assert!(near.scale > far.scale);
	}

	#[test]
	fn scale_matches_projected_extent() {
		let cam = camera();
		let center = cam.project(Vec3::ZERO).unwrap();
		let edge = cam.project(Vec3::new(0.0, 300.0, 0.0)).unwrap();
		let projected = (center.y - edge.y) as f32;
		assert!((projected - 300.0 * center.scale).abs() < 0.01);
	}

	#[test]
	fn segment_crossing_the_camera_is_clipped() {
		let cam = camera();
		let vp = cam.view_projection();
		let seg = cam.project_segment(&vp, Vec3::ZERO, Vec3::new(0.0, 100.0, 20_000.0));
		let (a, b) = seg.unwrap();
		assert!((a.x - 400.0).abs() < 1e-3);
		assert!(b.x.is_finite() && b.y.is_finite());

		let behind = cam.project_segment(
			&vp,
			Vec3::new(0.0, 0.0, 20_000.0),
			Vec3::new(0.0, 0.0, 30_000.0),
		);
		assert!(behind.is_none());
	}
}
