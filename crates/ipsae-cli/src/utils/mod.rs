pub mod progress;

#[cfg(test)]
pub(crate) mod fixtures;
