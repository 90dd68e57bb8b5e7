pub mod bins;
pub mod panels;
pub mod plot;
