pub mod add;
pub mod capture;
pub mod extract;
pub mod tasks;
