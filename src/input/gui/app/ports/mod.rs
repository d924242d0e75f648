pub mod presenter;
