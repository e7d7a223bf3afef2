//! Receipt image upload checks

use std::path::Path;

use crate::receipt::error::ReceiptError;

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Validate an uploaded receipt: the filename must carry an image
/// extension and the content must start like a JPEG or PNG file.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> Result<ImageFormat, ReceiptError> {
    if filename.is_empty() {
        return Err(ReceiptError::EmptyFilename);
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(ReceiptError::UnsupportedFormat)?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ReceiptError::UnsupportedFormat);
    }

    sniff_format(bytes)
}

fn sniff_format(bytes: &[u8]) -> Result<ImageFormat, ReceiptError> {
    if bytes.is_empty() {
        return Err(ReceiptError::InvalidImage("file is empty".to_string()));
    }
    if bytes.starts_with(JPEG_MAGIC) {
        Ok(ImageFormat::Jpeg)
    } else if bytes.starts_with(PNG_MAGIC) {
        Ok(ImageFormat::Png)
    } else {
        Err(ReceiptError::InvalidImage(
            "cannot identify image file".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    #[test]
    fn test_accepts_images() {
        assert_eq!(validate_upload("receipt.png", PNG).unwrap(), ImageFormat::Png);
        assert_eq!(validate_upload("receipt.JPG", JPEG).unwrap(), ImageFormat::Jpeg);
        assert_eq!(validate_upload("scan.jpeg", JPEG).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_rejects_empty_filename() {
        assert!(matches!(
            validate_upload("", PNG),
            Err(ReceiptError::EmptyFilename)
        ));
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["receipt.gif", "receipt", "receiptpng", "notes.txt"] {
            assert!(
                matches!(validate_upload(name, PNG), Err(ReceiptError::UnsupportedFormat)),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let err = validate_upload("receipt.png", b"hello world").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to process the image: cannot identify image file"
        );
        assert!(matches!(
            validate_upload("receipt.png", b""),
            Err(ReceiptError::InvalidImage(_))
        ));
    }
}
