pub mod cipher;
pub mod config;
pub mod error;
pub mod giants;
pub mod optimizer;
pub mod scorer;

pub use cipher::Cipher;
pub use error::{CfResult, CipherForgeError};
