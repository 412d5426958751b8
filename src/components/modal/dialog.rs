#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogState {
	#[default]
	Closed,
	Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogEvent {
	Trigger,
	CloseControl,
	ClickOutside,
	Saved,
}

impl DialogState {
	pub fn on(self, event: DialogEvent) -> Self {
		match event {
			DialogEvent::Trigger => DialogState::Open,
			DialogEvent::CloseControl | DialogEvent::ClickOutside | DialogEvent::Saved => {
				DialogState::Closed
			}
		}
	}

	pub fn is_open(self) -> bool {
		self == DialogState::Open
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_close_path_closes() {
		for ev in [
			DialogEvent::CloseControl,
			DialogEvent::ClickOutside,
			DialogEvent::Saved,
		] {
			assert_eq!(DialogState::Open.on(ev), DialogState::Closed);
			assert_eq!(DialogState::Closed.on(ev), DialogState::Closed);
		}
	}

	#[test]
	fn trigger_opens_and_reopening_is_idempotent() {
		let s = DialogState::default().on(DialogEvent::Trigger);
		assert!(s.is_open());
		assert!(s.on(DialogEvent::Trigger).is_open());
	}
}
