pub mod controller;

pub use controller::{reconstruct_elapsed, TaskTimer};
