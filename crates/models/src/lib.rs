pub mod errors;
pub mod db;
pub mod genre;
pub mod user;
pub mod movie;
pub mod rating;

#[cfg(test)]
mod tests;
