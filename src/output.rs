//! Image output: PNG and EXR files, plus live viewing in TEV.
//!
//! PNG export converts the linear f32 buffer to 8-bit with sRGB gamma;
//! EXR export keeps the full linear values. TEV (The EXR Viewer) output
//! streams the linear buffer over TCP for real-time display.

use std::net::TcpStream;

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

/// Send an f32 RGB image to TEV for real-time visualization.
///
/// Connects over TCP (default port 14158 when none is given), creates the
/// image, converts the buffer from interleaved to planar channel layout and
/// streams it. Connection or protocol failures are logged and swallowed;
/// losing the live view never aborts a render.
pub fn send_image_to_tev(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    tev_address: &str,
    width: u32,
    height: u32,
) {
    // Add default port if not specified
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Attempting to connect to TEV at {}", tev_address);

    match TcpStream::connect(&tev_address) {
        Ok(stream) => {
            if let Err(e) = stream.set_nodelay(true) {
                debug!("Failed to set TCP_NODELAY: {}", e);
            }

            let mut client = TevClient::wrap(stream);

            let create_packet = PacketCreateImage {
                image_name: "lumecast_output",
                width,
                height,
                channel_names: &["R", "G", "B"],
                grab_focus: true,
            };

            if let Err(e) = client.send(create_packet) {
                warn!("Failed to create image in TEV: {}", e);
                return;
            }

            // TEV wants planar data (RRR...GGG...BBB...), the buffer is
            // interleaved
            let pixel_count = (width * height) as usize;
            let mut rgb_data = Vec::with_capacity(pixel_count * 3);
            for channel in 0..3 {
                for pixel in image.pixels() {
                    rgb_data.push(pixel[channel]);
                }
            }

            let start_time = std::time::Instant::now();
            let update_packet = PacketUpdateImage {
                image_name: "lumecast_output",
                grab_focus: false,
                channel_names: &["R", "G", "B"],
                x: 0,
                y: 0,
                width,
                height,
                channel_offsets: &[0, (width * height) as u64, (2 * width * height) as u64],
                channel_strides: &[1, 1, 1],
                data: &rgb_data,
            };

            match client.send(update_packet) {
                Ok(_) => info!(
                    "Image data sent to TEV at {} in {:.2?}",
                    tev_address,
                    start_time.elapsed()
                ),
                Err(e) => warn!("Failed to send image data to TEV: {}", e),
            }
        }
        Err(e) => warn!("Failed to connect to TEV on {}: {}", tev_address, e),
    }
}

/// Save an f32 RGB image as an 8-bit PNG.
///
/// Values are clamped to [0, 1] and run through the sRGB transfer curve
/// (linear segment below 0.0031308, power segment above) before the scale
/// to [0, 255]. I/O errors are logged as warnings, never panics.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let linear_to_gamma = |linear: f32| -> f32 {
        if linear <= 0.0 {
            0.0
        } else if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    };

    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGB image as OpenEXR with full linear HDR precision.
///
/// No tone mapping or gamma is applied; the file holds the buffer exactly
/// as rendered. I/O errors are logged as warnings, never panics.
pub fn save_image_as_exr(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: &str,
    width: u32,
    height: u32,
) {
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        pixels[y * (width as usize) + x]
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
