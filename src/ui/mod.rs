// Terminal driver

pub mod interrupt;
pub mod session;

pub use interrupt::{install_interrupt_handler, INTERRUPT_MESSAGE};
pub use session::{establish_keys, Session};
