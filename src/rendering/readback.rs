//! Copy a rendered texture back to the CPU and write it as PNG.

use std::path::Path;
use std::sync::mpsc;

use crate::error::RenderError;

const BYTES_PER_PIXEL: u32 = 4; // RGBA8

/// Row pitch wgpu requires for texture-to-buffer copies
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drop the per-row padding from a mapped copy
pub fn strip_padding(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let padded = padded_bytes_per_row(width) as usize;
    let unpadded = (width * BYTES_PER_PIXEL) as usize;
    let mut image_data = Vec::with_capacity(unpadded * height as usize);
    for row in data.chunks(padded).take(height as usize) {
        image_data.extend_from_slice(&row[..unpadded]);
    }
    image_data
}

/// Read an RGBA8 texture back and save it to `path`
pub fn save_texture_png(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    path: &Path,
) -> Result<(), RenderError> {
    let width = texture.width();
    let height = texture.height();
    let padded = padded_bytes_per_row(width);

    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Frame Capture Buffer"),
        size: (padded * height) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Frame Capture Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &buffer,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        texture.size(),
    );
    queue.submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::Maintain::Wait);
    rx.recv()
        .map_err(|_| RenderError::Capture("readback callback never ran".into()))?
        .map_err(|e| RenderError::Capture(e.to_string()))?;

    let image_data = {
        let data = slice.get_mapped_range();
        strip_padding(&data, width, height)
    };
    buffer.unmap();

    image::save_buffer(path, &image_data, width, height, image::ColorType::Rgba8)?;
    Ok(())
}
