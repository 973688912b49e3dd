pub mod health;
pub mod todos;
pub mod token;
