use force_graph::SimulationParameters;

/// Force layout tuning handed to the `force_graph` simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
	pub charge: f32,
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
	/// Simulation steps run before the first frame is drawn.
	pub stabilization_ticks: u32,
}

impl Physics {
	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

/// Style and physics configuration of the graph widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphOptions {
	pub physics: Physics,
	pub node_radius: f64,
	/// World-space radius within which the pointer hits a node.
	pub hit_radius: f64,
	pub background: &'static str,
	/// `r, g, b` of edges and arrows; alpha is applied per frame.
	pub edge_rgb: (u8, u8, u8),
	pub edge_width: f64,
	/// Dash and gap length of the flowing edge stroke.
	pub dash: (f64, f64),
	/// Dash offset travel per second.
	pub flow_speed: f64,
	pub arrow_size: f64,
	pub label_px: f64,
	pub label_rgb: (u8, u8, u8),
	pub edge_label_px: f64,
	pub edge_label_rgb: (u8, u8, u8),
	/// Tint of the halo around hovered nodes and their neighbours.
	pub glow_rgb: (u8, u8, u8),
	/// How far nodes outside the highlight fade (0 keeps them opaque).
	pub dim: f64,
	/// Pointer travel (screen px) below which a press counts as a click.
	pub click_slop: f64,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			physics: Physics {
				charge: 150.0,
				spring: 0.05,
				max_force: 100.0,
				node_speed: 3000.0,
				damping: 0.9,
				stabilization_ticks: 200,
			},
			node_radius: 8.0,
			hit_radius: 14.0,
			background: "#1a1a2e",
			edge_rgb: (100, 180, 255),
			edge_width: 2.0,
			dash: (8.0, 4.0),
			flow_speed: 30.0,
			arrow_size: 9.6,
			label_px: 14.0,
			label_rgb: (255, 255, 255),
			edge_label_px: 10.0,
			edge_label_rgb: (200, 200, 200),
			glow_rgb: (200, 220, 255),
			dim: 0.7,
			click_slop: 4.0,
		}
	}
}
