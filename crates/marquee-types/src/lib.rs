//! Shared type definitions for the Marquee movie service.
//!
//! This crate is the single source of truth for the data model used across
//! the Marquee workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for browser clients of the event stream.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`structs`] -- The [`Movie`] record and the [`MovieEvent`] notification

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::MovieId;
pub use structs::{Movie, MovieEvent};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the wire types.

    #[test]
    fn export_bindings() {
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::MovieId::export_all();
        let _ = crate::structs::Movie::export_all();
        let _ = crate::structs::MovieEvent::export_all();
    }
}
