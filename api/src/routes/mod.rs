pub mod produtos;
pub mod status;
