//! Fetch a paper's listing page from the IACR Cryptology ePrint Archive and extract its metadata.
//!
//! ```no_run
//! use iacr_dl::{Archive, Identifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let id: Identifier = "https://ia.cr/2019/579".parse()?;
//! let record = Archive::default().resolve(&id)?;
//! println!("{}", record.citation());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod identifier;
pub mod record;
pub mod resolver;
pub mod text;

pub use config::Config;
pub use error::{Error, ExtractionError, Result, TransportError, ValidationError};
pub use identifier::Identifier;
pub use record::Record;
pub use resolver::Archive;
