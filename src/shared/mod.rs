pub mod api;
pub mod patch_field;
pub mod serde_helpers;
