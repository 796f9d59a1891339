pub mod candidates;
pub mod features;
pub mod importance;
pub mod overlay;
pub mod pipeline;
pub mod prescale;
pub mod resize;
pub mod score;
pub mod select;
