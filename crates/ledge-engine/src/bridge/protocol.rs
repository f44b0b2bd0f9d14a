/// Shared-memory layout read by the host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_LEVEL_READY: usize = 6;
pub const HEADER_VIEWPORT_W: usize = 7;
pub const HEADER_VIEWPORT_H: usize = 8;
pub const HEADER_PX_PER_UNIT: usize = 9;
pub const HEADER_CAMERA_X: usize = 10;
pub const HEADER_CAMERA_Y: usize = 11;
pub const HEADER_PLAYER_VX: usize = 12;
pub const HEADER_PLAYER_VY: usize = 13;
pub const HEADER_SESSION_TIME: usize = 14;
pub const HEADER_TICKS_LAST_FRAME: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }
}

/// Per-frame values the runner publishes in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u32,
    pub instance_count: u32,
    pub event_count: u32,
    pub level_ready: bool,
    pub viewport: [f32; 2],
    pub px_per_unit: f32,
    pub camera: [f32; 2],
    pub player_vel: [f32; 2],
    pub time: f32,
    pub ticks: u32,
}

impl FrameHeader {
    /// Write the header floats, capacities taken from `layout`.
    pub fn write(&self, layout: &ProtocolLayout, out: &mut [f32; HEADER_FLOATS]) {
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_FRAME_COUNTER] = self.frame as f32;
        out[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        out[HEADER_INSTANCE_COUNT] = self.instance_count as f32;
        out[HEADER_MAX_EVENTS] = layout.max_events as f32;
        out[HEADER_EVENT_COUNT] = self.event_count as f32;
        out[HEADER_LEVEL_READY] = if self.level_ready { 1.0 } else { 0.0 };
        out[HEADER_VIEWPORT_W] = self.viewport[0];
        out[HEADER_VIEWPORT_H] = self.viewport[1];
        out[HEADER_PX_PER_UNIT] = self.px_per_unit;
        out[HEADER_CAMERA_X] = self.camera[0];
        out[HEADER_CAMERA_Y] = self.camera[1];
        out[HEADER_PLAYER_VX] = self.player_vel[0];
        out[HEADER_PLAYER_VY] = self.player_vel[1];
        out[HEADER_SESSION_TIME] = self.time;
        out[HEADER_TICKS_LAST_FRAME] = self.ticks as f32;
    }
}
