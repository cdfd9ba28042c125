pub mod dataset;
pub mod parse;
pub mod row;
pub mod stats;

#[cfg(test)]
mod test;
