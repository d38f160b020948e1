/// Frames-per-second counter sampled once per second, with the lowest and
/// highest rate seen so far.
#[derive(Clone, Debug)]
pub struct FrameStats {
	frames: u32,
	prev_time: f64,
	fps: u32,
	min: u32,
	max: u32,
}

impl FrameStats {
	pub fn new(now_ms: f64) -> Self {
		Self {
			frames: 0,
			prev_time: now_ms,
			fps: 0,
			min: u32::MAX,
			max: 0,
		}
	}

	/// Count one frame. Returns true when a new sample was taken.
	pub fn update(&mut self, now_ms: f64) -> bool {
		self.frames += 1;
		let elapsed = now_ms - self.prev_time;
		if elapsed < 1000.0 {
			return false;
		}

		self.fps = (f64::from(self.frames) * 1000.0 / elapsed).round() as u32;
		self.min = self.min.min(self.fps);
		self.max = self.max.max(self.fps);
		self.prev_time = now_ms;
		self.frames = 0;
		true
	}

	pub fn fps(&self) -> u32 {
		self.fps
	}

	pub fn text(&self) -> String {
		if self.max == 0 && self.min == u32::MAX {
			return format!("{} FPS", self.fps());
		}
		format!("{} FPS ({}-{})", self.fps(), self.min, self.max)
	}
}
