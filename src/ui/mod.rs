pub mod badges;
pub mod board;
pub mod icons;

pub use badges::{render_snapshot, status_presentation};
pub use board::render_board;
