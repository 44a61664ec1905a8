use crate::config::ExportConfig;
use crate::error::{QuickQrError, Result};
use crate::types::{Kind, Payload};

use chrono::{DateTime, Utc};
use image::{GrayImage, ImageBuffer, Luma};
pub use qrcodegen::{QrCode, QrCodeEcc};
use std::fs;
use std::path::PathBuf;

/// Error correction used for every code. The highest level keeps codes
/// scannable when partly covered.
pub const ERROR_CORRECTION: QrCodeEcc = QrCodeEcc::High;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Builds the QR symbol for a payload.
///
/// Returns `Ok(None)` for the empty payload: there is nothing to render.
///
/// # Errors
///
/// Returns [`QuickQrError::Render`] if the payload exceeds the capacity of
/// the largest symbol at [`ERROR_CORRECTION`].
///
/// # Example
///
/// ```
/// use quickqr::render::encode_matrix;
/// use quickqr::Payload;
///
/// let qr = encode_matrix(&Payload::from("https://example.com")).unwrap().unwrap();
/// assert!(qr.size() >= 21);
/// assert!(encode_matrix(&Payload::empty()).unwrap().is_none());
/// ```
pub fn encode_matrix(payload: &Payload) -> Result<Option<QrCode>> {
	if payload.is_empty() {
		return Ok(None);
	}
	QrCode::encode_text(payload.as_str(), ERROR_CORRECTION)
		.map(Some)
		.map_err(|e| QuickQrError::Render(format!("{e:?}")))
}

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrCode, border: i32) -> String {
	let border = border.max(0);
	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
	let dimension = qr.size() + border * 2;
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n", dimension);
	result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
	result += "\t<path d=\"";
	let mut first = true;
	for y in 0 .. qr.size() {
		for x in 0 .. qr.size() {
			if qr.get_module(x, y) {
				if !first {
					result += " ";
				}
				first = false;
				result += &format!("M{},{}h1v1h-1z", x + border, y + border);
			}
		}
	}
	result += "\" fill=\"#000000\"/>\n";
	result += "</svg>\n";
	result
}

/// Rasterizes a QR Code into a `size` x `size` grayscale image.
///
/// Each pixel takes the colour of the module under it. `size` is raised to
/// the module count so that no module is dropped.
pub fn to_image_buffer(qr: &QrCode, size: u32) -> GrayImage {
	let modules = qr.size() as u32;
	let size = size.max(modules);
	let mut img = ImageBuffer::new(size, size);

	for (x, y, pixel) in img.enumerate_pixels_mut() {
		let qr_x = (u64::from(x) * u64::from(modules) / u64::from(size)) as i32;
		let qr_y = (u64::from(y) * u64::from(modules) / u64::from(size)) as i32;
		*pixel = if qr.get_module(qr_x, qr_y) { DARK } else { LIGHT };
	}

	img
}

/// Largest margin accepted on each side of an exported image.
pub const MAX_MARGIN: u32 = 4096;

/// Surrounds an image with `margin` pixels of white on every side.
///
/// `margin` is clamped to [`MAX_MARGIN`].
pub fn pad_image(img: &GrayImage, margin: u32) -> GrayImage {
	let margin = margin.min(MAX_MARGIN);
	let (width, height) = img.dimensions();
	let mut padded = ImageBuffer::from_pixel(
		width.saturating_add(2 * margin),
		height.saturating_add(2 * margin),
		LIGHT,
	);

	for (x, y, pixel) in img.enumerate_pixels() {
		padded.put_pixel(x + margin, y + margin, *pixel);
	}

	padded
}

/// File name of an exported image: `<prefix>-<kind>-<unix millis>.png`.
pub fn export_file_name(prefix: &str, kind: Kind, at: DateTime<Utc>) -> String {
	format!("{}-{}-{}.png", prefix, kind, at.timestamp_millis())
}

/// Renders a payload and saves it as a PNG in `config.dir`.
///
/// Returns the written path, or `Ok(None)` for the empty payload. The
/// directory is created if it does not exist.
///
/// # Errors
///
/// Fails if the payload does not fit in a QR Code, or if the directory or
/// image cannot be written.
pub fn export_png(
	payload: &Payload,
	kind: Kind,
	config: &ExportConfig,
	at: DateTime<Utc>,
) -> Result<Option<PathBuf>> {
	let Some(qr) = encode_matrix(payload)? else {
		return Ok(None);
	};

	let img = pad_image(&to_image_buffer(&qr, config.size), config.margin);

	if !config.dir.exists() {
		fs::create_dir_all(&config.dir)?;
	}
	let file_path = config.dir.join(export_file_name(&config.file_prefix, kind, at));
	img.save(&file_path)?;

	tracing::info!("exported {} code to {}", kind, file_path.display());
	Ok(Some(file_path))
}
