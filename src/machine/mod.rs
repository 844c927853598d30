pub mod generic;
pub mod vga;
