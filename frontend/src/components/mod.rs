pub mod brd;
