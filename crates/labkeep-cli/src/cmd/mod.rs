pub mod clinic;
pub mod config;
pub mod lab;

/// Whether a menu action wants the shell to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
