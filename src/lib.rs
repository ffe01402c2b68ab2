//! Stardoc - a decoder core for legacy StarOffice binary documents
//!
//! StarOffice (StarWriter, StarCalc, StarDraw, StarChart) stored its
//! documents as OLE storages whose streams are nested, length-prefixed
//! records. This crate provides the three layers every one of those readers
//! shares:
//!
//! - **Record zone engine** ([`zone`]): a stack of open records over a byte
//!   stream, with record-boundary healing, version and charset context, the
//!   compressed-integer and string codecs, and the stream header.
//! - **Attribute registry and decoders** ([`attribute`]): one prototype per
//!   `(pool family, which-id)` pairing a payload decoder with its effect on
//!   a [`StyleState`](state::StyleState), plus the canonical trace form.
//! - **Items, item sets and styles** ([`item`]): an arena-backed pool of
//!   decoded attributes, serialized item sets, and cycle-safe named-style
//!   resolution.
//!
//! Damaged input is the norm for these files, so almost nothing here is
//! fatal: local problems are recorded as [`Diagnostic`]s and decoding
//! resumes at the nearest record boundary.
//!
//! # Example - Reading an item set
//!
//! ```no_run
//! use stardoc::attribute::PoolFamily;
//! use stardoc::config::DecoderConfig;
//! use stardoc::input::StarInput;
//! use stardoc::item::{ItemPool, ItemSet, WhichRange};
//! use stardoc::state::StyleState;
//! use stardoc::zone::StarZone;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("items.bin")?;
//! let end = data.len() as u64;
//! let mut zone = StarZone::new(StarInput::new(data), "items", DecoderConfig::new())?;
//!
//! let mut pool = ItemPool::new();
//! let mut set = ItemSet::new();
//! set.read(&mut zone, WhichRange::all(PoolFamily::Writer), end, &mut pool);
//!
//! let mut state = StyleState::new();
//! let mut traversal = stardoc::item::Traversal::new(&pool);
//! set.add_to(&mut state, &pool, &mut traversal);
//! println!("{}", set.print_data(&pool, &mut traversal));
//! for diagnostic in zone.diagnostics().entries() {
//!     eprintln!("{}", diagnostic);
//! }
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod common;
pub mod config;
pub mod input;
pub mod item;
pub mod listener;
pub mod state;
pub mod zone;

#[cfg(test)]
mod testutil;

pub use attribute::{Attribute, AttributeKey, AttributeValue, PoolFamily, registry};
pub use common::{Diagnostic, Diagnostics, Error, Length, Result, StarColor};
pub use config::DecoderConfig;
pub use item::{ItemPool, ItemSet, Style, StyleFamily};
pub use listener::ContentListener;
pub use state::StyleState;
pub use zone::StarZone;
