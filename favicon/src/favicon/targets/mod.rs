mod ico;
mod png;

pub use self::ico::process_ico_target;
pub use self::png::process_png_target;
