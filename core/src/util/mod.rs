mod atomic;
mod weak;

pub use atomic::Atomic;
pub use weak::WeakElements;
