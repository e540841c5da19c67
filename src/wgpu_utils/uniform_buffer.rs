use std::marker::PhantomData;

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Uniform buffer holding a single `Content` value
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Update buffer content, skipping the write when nothing changed
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Vertex or index buffer that is reallocated when the data outgrows it.
///
/// Capacity only ever grows (to the next power of two), so a scene of stable
/// size settles into one allocation and every later frame is a plain write.
pub struct GrowableBuffer<Content> {
    buffer: wgpu::Buffer,
    usage: wgpu::BufferUsages,
    content_type: PhantomData<Content>,
    capacity: usize,
    len: usize,
}

impl<Content: bytemuck::Pod> GrowableBuffer<Content> {
    pub fn new(device: &wgpu::Device, usage: wgpu::BufferUsages, capacity: usize) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, usage, capacity),
            usage,
            content_type: PhantomData,
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, usage: wgpu::BufferUsages, capacity: usize) -> wgpu::Buffer {
        // write_buffer needs a size multiple of COPY_BUFFER_ALIGNMENT
        let bytes = (capacity * std::mem::size_of::<Content>()) as u64;
        let size = bytes.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT;
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("GrowableBuffer<{}>", short_type_name::<Content>())),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Uploads `data`, growing the buffer first if needed.
    ///
    /// Returns true when the buffer was reallocated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[Content]) -> bool {
        let grown = data.len() > self.capacity;
        if grown {
            self.capacity = data.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.usage, self.capacity);
            log::debug!(
                "Grew {} to {} elements",
                short_type_name::<Content>(),
                self.capacity
            );
        }

        let bytes: &[u8] = bytemuck::cast_slice(data);
        // Pad the tail so the write length stays 4-byte aligned
        let aligned = bytes.len() - bytes.len() % wgpu::COPY_BUFFER_ALIGNMENT as usize;
        if aligned > 0 {
            queue.write_buffer(&self.buffer, 0, &bytes[..aligned]);
        }
        if aligned < bytes.len() {
            let mut tail = [0u8; wgpu::COPY_BUFFER_ALIGNMENT as usize];
            tail[..bytes.len() - aligned].copy_from_slice(&bytes[aligned..]);
            queue.write_buffer(&self.buffer, aligned as u64, &tail);
        }

        self.len = data.len();
        grown
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
