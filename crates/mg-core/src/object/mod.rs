//! Items and item recipes

mod item;

pub use item::*;
