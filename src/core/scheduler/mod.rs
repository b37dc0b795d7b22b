pub mod bin_packing;
pub mod drf;
pub mod fuse;
pub mod interface;
pub mod shares;
