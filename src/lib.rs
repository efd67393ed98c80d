//! gbacomp, a builder for Game Boy Advance emulator compilations.
//!
//! Several GBA emulators for older systems (Cologne, PocketNES, PCEAdvance
//! and ZXAdvance) load their games from a romlist appended to the emulator
//! binary. This crate builds those images: it derives each entry's header
//! from the game's file name, lays the headers and payloads out the way each
//! emulator expects, and writes the result along with the side files that
//! EZ-Flash IV firmware needs.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod artifact;
pub mod compile;
pub mod controls;
pub mod error;
pub mod extract;
pub mod flags;
pub mod image;
pub mod inspect;
pub mod pad;
pub mod record;
pub mod schema;
pub mod target;
pub mod title;
