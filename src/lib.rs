pub mod app;
pub mod assessment;
pub mod cli;
pub mod coach;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod test_utils;
