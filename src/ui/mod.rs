// src/ui/mod.rs
pub mod background;
pub mod loading;
pub mod manual_input;
pub mod result;
pub mod theme;
pub mod url_input;
