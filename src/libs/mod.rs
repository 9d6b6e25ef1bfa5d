pub mod assemble;
pub mod cluster;
pub mod paf;
pub mod transcript;
