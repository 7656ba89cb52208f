//! Well-known filesystem locations.

pub mod xdg_root;
