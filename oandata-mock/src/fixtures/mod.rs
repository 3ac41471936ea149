pub mod instruments;
