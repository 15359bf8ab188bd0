use crate::layout::{as_bytes, Ball};

/// Read-only storage buffer holding one frame's balls.
///
/// The buffer is never smaller than [`MIN_CAPACITY`](Self::MIN_CAPACITY)
/// elements, so a frame with zero balls still binds a valid, non-empty
/// resource. The live element count travels separately in `FieldParameters`.
pub struct BallBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
}

impl BallBuffer {
    pub const MIN_CAPACITY: usize = 64;

    pub fn new(device: &wgpu::Device) -> Self {
        let capacity = Self::MIN_CAPACITY;
        Self {
            buffer: Self::allocate(device, capacity),
            capacity,
            len: 0,
        }
    }

    /// Capacity chosen for `required` balls: next power of two, at least
    /// [`MIN_CAPACITY`](Self::MIN_CAPACITY).
    ///
    /// The rounded capacity is cut back to what fits in `max_binding_bytes`,
    /// but never below `required`.
    pub fn capacity_for(required: usize, max_binding_bytes: u64) -> usize {
        let stride = std::mem::size_of::<Ball>() as u64;
        let max_balls = usize::try_from(max_binding_bytes / stride).unwrap_or(usize::MAX);
        required
            .next_power_of_two()
            .max(Self::MIN_CAPACITY)
            .min(max_balls)
            .max(required)
    }

    /// Uploads `balls`, growing the buffer when needed.
    ///
    /// Returns `true` when the buffer was reallocated; bind groups referencing
    /// the old buffer must be rebuilt.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, balls: &[Ball]) -> bool {
        let mut reallocated = false;
        if balls.len() > self.capacity {
            let max_binding_bytes = u64::from(device.limits().max_storage_buffer_binding_size);
            let capacity = Self::capacity_for(balls.len(), max_binding_bytes);
            log::debug!("growing ball buffer {} -> {capacity}", self.capacity);
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
            reallocated = true;
        }

        if !balls.is_empty() {
            queue.write_buffer(&self.buffer, 0, as_bytes(balls));
        }
        self.len = balls.len();
        reallocated
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of balls written by the last [`write`](Self::write).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("metaballs ball storage"),
            size: (capacity * std::mem::size_of::<Ball>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}
