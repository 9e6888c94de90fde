//! Kernel module - masking infrastructure shared by handlers and binaries.

pub mod pii;
pub mod traits;

pub use self::pii::{create_pii_masker, EngineMasker, NoopMasker};
pub use self::traits::{BasePiiMasker, MaskOptions, MaskResult};
