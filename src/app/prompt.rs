use log::warn;

/// Blocking questions and notices shown to the user.
pub trait Prompt {
	fn confirm(&self, message: &str) -> bool;
	fn alert(&self, message: &str);
}

/// `window.confirm` / `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
	fn confirm(&self, message: &str) -> bool {
		web_sys::window()
			.and_then(|w| w.confirm_with_message(message).ok())
			.unwrap_or(false)
	}

	fn alert(&self, message: &str) {
		match web_sys::window() {
			Some(w) => {
				let _ = w.alert_with_message(message);
			}
			None => warn!("no window to alert: {message}"),
		}
	}
}
