//! Static description of the sensing surface: cells, scoring lines and pieces.

pub use self::{cell::*, lines::*, piece::*};

pub(crate) mod cell;
pub(crate) mod lines;
pub(crate) mod piece;
