//! Shared types for the nectar dictionary tools.
//!
//! - [`case`] -- Case classification of dictionary stems
//! - [`category`] -- Lexical categories and their priority order

pub mod case;
pub mod category;
