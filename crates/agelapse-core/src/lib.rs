pub mod align;
pub mod consts;
pub mod erase;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod unify;
