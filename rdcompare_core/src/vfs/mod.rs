pub mod local;

#[cfg(test)]
pub(crate) mod memory;

pub use local::LocalVfs;
