//! Wall clock in milliseconds, usable from both the browser and host tests.

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
	use std::time::{SystemTime, UNIX_EPOCH};

	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs_f64() * 1000.0)
		.unwrap_or(0.0)
}
