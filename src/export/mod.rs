pub mod lottie;
pub mod serialize;
