pub mod automation;
pub mod constants;
pub mod playback;
pub mod scroll;
pub mod segments;
pub mod visual;
