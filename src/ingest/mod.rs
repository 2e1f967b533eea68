pub mod encoded;
pub mod media_type;
pub mod picker;
pub mod preview;

pub use encoded::{ingest, EncodedImage};
pub use media_type::media_type_for;
pub use picker::ImagePicker;
pub use preview::PreviewHandle;
