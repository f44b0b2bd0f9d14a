use bytemuck::{Pod, Zeroable};

use crate::components::layer::RenderLayer;

/// Per-instance render data read by the host's canvas renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Positions and sizes are already projected to screen pixels, so the host
/// only fills rectangles/circles; it never needs the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge in screen pixels (circle center for stars and hills).
    pub x: f32,
    /// Top edge in screen pixels (circle center for stars and hills).
    pub y: f32,
    /// Width in pixels (radius for circles).
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
    /// Layer-specific variant: tile id, star size class, hill index.
    pub kind: f32,
    /// [`RenderLayer`] discriminant.
    pub layer: f32,
    /// -1.0 facing left, 1.0 facing right, 0.0 when not applicable.
    pub facing: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(layer: RenderLayer, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            kind: 0.0,
            layer: layer.as_u8() as f32,
            facing: 0.0,
            alpha: 1.0,
        }
    }

    pub fn with_kind(mut self, kind: f32) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_facing(mut self, facing: f32) -> Self {
        self.facing = facing;
        self
    }
}

/// Render buffer holding one frame of instances, back to front.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// A buffer that refuses to grow past `capacity` instances
    /// (the host's shared region is sized for it).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Returns `false` (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn is_full(&self) -> bool {
        self.instances.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instances as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
