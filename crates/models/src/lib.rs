pub mod errors;
pub mod db;
pub mod rating;
pub mod ship;

#[cfg(test)]
mod tests;
