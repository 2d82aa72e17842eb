mod capture;
mod ocr;
mod permission;
mod probe;

pub use capture::{Acquisition, CameraSource, CaptureError, GallerySource, ImageSource};
pub use ocr::{RecognizeError, TesseractRecognizer, TextRecognizer};
pub use permission::CameraPermission;
pub use probe::probe_image;
